use thiserror::Error;

#[derive(Error, Debug)]
pub enum AcvError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid dataset: {reason}")]
    InvalidDataset { reason: String },

    #[error("Conservation violated for {identity}: expected {expected}, got {actual}")]
    ConservationViolation {
        identity: String,
        expected: f64,
        actual: f64,
    },
}

pub type AcvResult<T> = Result<T, AcvError>;
