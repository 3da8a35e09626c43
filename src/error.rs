use thiserror::Error;

#[derive(Error, Debug)]
pub enum LinkError {
    #[error("{protocol} proxy is missing required field `{field}`")]
    MissingField {
        protocol: &'static str,
        field: &'static str,
    },

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to decode proxy record: {0}")]
    Decode(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
