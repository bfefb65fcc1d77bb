use {std::path::Path, thiserror::Error};

pub type Result<T> = std::result::Result<T, MatrixError>;

/// Rejected generator parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("node count must be at least 1")]
    ZeroNodes,

    #[error("chunk size set must not be empty")]
    EmptyChunkSizes,

    #[error("sparsity {0} is not between 0..1")]
    SparsityOutOfRange(f64),
}

#[derive(Debug, Error)]
pub enum MatrixError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("TSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {row}, column {column}: {value:?} is not a chunk size")]
    Parse {
        row: usize,
        column: usize,
        value: String,
    },

    #[error("matrix has no rows")]
    Empty,

    #[error("matrix is not square: row {row} has {len} values, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },
}

impl MatrixError {
    pub(crate) fn io(path: &Path, action: &str, source: std::io::Error) -> Self {
        MatrixError::Io {
            context: format!("failed to {action} {}", path.display()),
            source,
        }
    }
}
