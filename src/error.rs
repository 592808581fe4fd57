use thiserror::Error;

#[derive(Error, Debug)]
pub enum BdoError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Format Error: {0}")]
    Format(String),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Incompatible Records: {0}")]
    Incompatible(String),
}

pub type BdoResult<T> = Result<T, BdoError>;
