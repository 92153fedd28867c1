use thiserror::Error;

/// Errors raised while loading data, building networks or persisting them.
#[derive(Debug, Error)]
pub enum NetError {
    /// The dataset header did not start with the expected magic number.
    #[error("bad magic number: expected {expected:#010x}, found {found:#010x}")]
    BadMagic { expected: u32, found: u32 },

    #[error("image file holds {images} items but label file holds {labels}")]
    CountMismatch { images: usize, labels: usize },

    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("invalid topology: {0}")]
    InvalidTopology(String),

    #[error("label {label} at item {index} is out of range for {classes} classes")]
    InvalidLabel { index: usize, label: u8, classes: usize },

    #[error("batch size must be between 1 and the number of samples")]
    InvalidBatchSize,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, NetError>;
