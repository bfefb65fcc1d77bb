//! Tab-delimited text form of a [`Matrix`]: one row per line, decimal
//! integers, no header.

pub use csv;

use {
    crate::{ChunkSize, Matrix, MatrixError, Result},
    std::{fs::File, io, path::Path},
    tracing::info,
};

pub fn writer_builder() -> csv::WriterBuilder {
    let mut builder = csv::WriterBuilder::new();
    builder
        .has_headers(false)
        .delimiter(b'\t')
        .terminator(csv::Terminator::Any(b'\n'));
    builder
}

pub fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(false)
        .delimiter(b'\t')
        .flexible(true)
        .trim(csv::Trim::All);
    builder
}

pub fn serialize_tsv<W>(matrix: &Matrix, writer: &mut csv::Writer<W>) -> csv::Result<()>
where
    W: io::Write,
{
    for line in matrix.rows() {
        for value in line {
            writer.write_field(value.to_string())?;
        }
        writer.write_record(None::<&[u8]>)?;
    }

    Ok(())
}

pub fn deserialize_tsv<R>(reader: &mut csv::Reader<R>) -> Result<Matrix>
where
    R: io::Read,
{
    let rows = reader
        .records()
        .enumerate()
        .map(|(row, record)| {
            let record = record?;
            record
                .iter()
                .enumerate()
                .map(|(column, field)| {
                    field.parse::<ChunkSize>().map_err(|_| MatrixError::Parse {
                        row,
                        column,
                        value: field.to_string(),
                    })
                })
                .collect::<Result<Vec<ChunkSize>>>()
        })
        .collect::<Result<Vec<Vec<ChunkSize>>>>()?;

    Matrix::from_rows(rows)
}

pub fn write_matrix<P: AsRef<Path>>(matrix: &Matrix, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| MatrixError::io(path, "create", e))?;

    let mut writer = writer_builder().from_writer(file);
    serialize_tsv(matrix, &mut writer)
        .map_err(|e| MatrixError::io(path, "write", io::Error::from(e)))?;
    writer
        .flush()
        .map_err(|e| MatrixError::io(path, "write", e))?;

    info!(path = %path.display(), nodes = matrix.size(), "matrix written");
    Ok(())
}

pub fn read_matrix<P: AsRef<Path>>(path: P) -> Result<Matrix> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| MatrixError::io(path, "open", e))?;

    let mut reader = reader_builder().from_reader(file);
    deserialize_tsv(&mut reader)
}
