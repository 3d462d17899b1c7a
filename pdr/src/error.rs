use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Signal(#[from] signal::Error),

    #[error("Failed to read CSV. Reason: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON. Reason: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing column `{0}`")]
    MissingColumn(String),

    #[error("Unparsable value {value:?} in column `{column}` on line {line}")]
    Parse {
        line: u64,
        column: String,
        value: String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
