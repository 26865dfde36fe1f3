use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChunkError {
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Rule table error: {0}")]
    Rule(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(String),

    #[error("{0}")]
    Other(String),
}
