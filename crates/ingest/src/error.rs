use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Failed to read the snapshot file: {0}")]
    Io(#[from] std::io::Error),

    #[error("The snapshot file is not a valid JSON document: {0}")]
    Parse(#[from] serde_json::Error),
}
