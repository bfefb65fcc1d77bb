pub mod error;
pub mod models;

use {
    rand::Rng,
    std::fmt,
    tracing::debug,
};

pub use error::{ConfigError, MatrixError, Result};

pub type ChunkSize = u64;

pub const NODES_DEFAULT: usize = 8;
pub const CHUNK_SIZES_DEFAULT: [ChunkSize; 5] = [0, 256, 512, 1024, 2048];
pub const SPARSITY_DEFAULT: f64 = 0.2;
pub const OUTPUT_DEFAULT: &str = "MeshChunkMatrix.txt";

/// Square node-to-node grid of chunk sizes. `cells[src][dst]` is the payload
/// `src` sends to `dst`, zero meaning no communication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    cells: Vec<Vec<ChunkSize>>,
}

impl Matrix {
    pub fn zeros(n: usize) -> Self {
        Self {
            cells: vec![vec![0; n]; n],
        }
    }

    pub fn from_rows(rows: Vec<Vec<ChunkSize>>) -> Result<Self> {
        let expected = rows.len();
        if expected == 0 {
            return Err(MatrixError::Empty);
        }
        if let Some((row, line)) = rows.iter().enumerate().find(|(_, l)| l.len() != expected) {
            return Err(MatrixError::NotSquare {
                row,
                len: line.len(),
                expected,
            });
        }
        Ok(Self { cells: rows })
    }

    pub fn size(&self) -> usize {
        self.cells.len()
    }

    pub fn get(&self, src: usize, dst: usize) -> ChunkSize {
        self.cells[src][dst]
    }

    pub fn rows(&self) -> &[Vec<ChunkSize>] {
        &self.cells
    }

    pub fn is_symmetric(&self) -> bool {
        let n = self.size();
        (0..n).all(|i| (0..i).all(|j| self.cells[i][j] == self.cells[j][i]))
    }

    pub fn diagonal_is_zero(&self) -> bool {
        (0..self.size()).all(|i| self.cells[i][i] == 0)
    }

    /// Nonzero off-diagonal cells as `(src, dst, chunk_size)`, row-major.
    pub fn transfers(&self) -> impl Iterator<Item = (usize, usize, ChunkSize)> + '_ {
        self.cells.iter().enumerate().flat_map(|(src, line)| {
            line.iter()
                .enumerate()
                .filter(move |&(dst, &size)| dst != src && size > 0)
                .map(move |(dst, &size)| (src, dst, size))
        })
    }

    pub fn total_volume(&self) -> u128 {
        self.transfers().map(|(_, _, size)| size as u128).sum()
    }

    // Mirrors the upper triangle, diagonal included, onto the lower one.
    // Whatever was drawn below the diagonal is discarded.
    fn mirror_upper(&mut self) {
        let n = self.size();
        for i in 0..n {
            for j in 0..i {
                self.cells[i][j] = self.cells[j][i];
            }
        }
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .cells
            .iter()
            .flatten()
            .map(|v| v.to_string().len())
            .max()
            .unwrap_or(1);

        for line in &self.cells {
            let row = line
                .iter()
                .map(|v| format!("{v:>width$}"))
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(f, "[{row}]")?;
        }
        Ok(())
    }
}

/// Which cells receive a random chunk size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InclusionMask {
    cells: Vec<Vec<bool>>,
}

impl InclusionMask {
    /// One uniform draw per cell (diagonal included) when `sparsity > 0`;
    /// a cell survives if its draw is strictly above `sparsity`. The draw is
    /// not symmetric even when the matrix will later be symmetrized.
    pub fn build<R>(n: usize, sparsity: f64, diagonal_zero: bool, rng: &mut R) -> Self
    where
        R: Rng,
    {
        let mut cells = vec![vec![true; n]; n];
        for i in 0..n {
            for j in 0..n {
                let eligible = !(diagonal_zero && i == j);
                let kept = if sparsity > 0.0 {
                    rng.random::<f64>() > sparsity
                } else {
                    true
                };
                cells[i][j] = eligible && kept;
            }
        }
        Self { cells }
    }

    pub fn is_included(&self, i: usize, j: usize) -> bool {
        self.cells[i][j]
    }

    pub fn included_count(&self) -> usize {
        self.cells.iter().flatten().filter(|&&c| c).count()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    pub node_count: usize,
    pub chunk_sizes: Vec<ChunkSize>,
    pub sparsity: f64,
    pub symmetric: bool,
    pub diagonal_zero: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            node_count: NODES_DEFAULT,
            chunk_sizes: CHUNK_SIZES_DEFAULT.to_vec(),
            sparsity: SPARSITY_DEFAULT,
            symmetric: false,
            diagonal_zero: true,
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.node_count == 0 {
            return Err(ConfigError::ZeroNodes);
        }
        if self.chunk_sizes.is_empty() {
            return Err(ConfigError::EmptyChunkSizes);
        }
        if !(0.0..=1.0).contains(&self.sparsity) {
            return Err(ConfigError::SparsityOutOfRange(self.sparsity));
        }
        Ok(())
    }
}

/// Draws a communication matrix. `on_row` fires once per filled row.
pub fn generate<R, F>(config: &GeneratorConfig, rng: &mut R, mut on_row: F) -> Result<Matrix>
where
    R: Rng,
    F: FnMut(),
{
    config.validate()?;

    let n = config.node_count;
    let mask = InclusionMask::build(n, config.sparsity, config.diagonal_zero, rng);
    debug!(
        nodes = n,
        included = mask.included_count(),
        sparsity = config.sparsity,
        "inclusion mask built"
    );

    let mut matrix = Matrix::zeros(n);
    let choices = config.chunk_sizes.len();
    for i in 0..n {
        for j in 0..n {
            if mask.is_included(i, j) {
                matrix.cells[i][j] = config.chunk_sizes[rng.random_range(0..choices)];
            }
        }
        on_row();
    }

    if config.symmetric {
        matrix.mirror_upper();
        debug!("matrix symmetrized from upper triangle");
    }

    Ok(matrix)
}

pub fn generate_communication_matrix<R>(
    node_count: usize,
    chunk_sizes: &[ChunkSize],
    sparsity: f64,
    symmetric: bool,
    diagonal_zero: bool,
    rng: &mut R,
) -> Result<Matrix>
where
    R: Rng,
{
    let config = GeneratorConfig {
        node_count,
        chunk_sizes: chunk_sizes.to_vec(),
        sparsity,
        symmetric,
        diagonal_zero,
    };
    generate(&config, rng, || ())
}
