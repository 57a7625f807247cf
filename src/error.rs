use thiserror::Error;

#[derive(Error, Debug)]
pub enum KeyGraphError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Model Error: {0}")]
    Model(String),

    #[error("Degenerate Input: {0}")]
    DegenerateInput(String),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Data Validation Error: {0}")]
    Validation(String),
}

pub type KgResult<T> = Result<T, KeyGraphError>;
