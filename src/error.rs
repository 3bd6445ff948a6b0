use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Receive cancelled")]
    Cancelled,
    #[error("Channel error: {0}")]
    Channel(String),
    #[error("Transaction error: {0}")]
    Transaction(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "storage-rocksdb")]
    #[error("RocksDB error: {0}")]
    RocksDB(#[from] rocksdb::Error),
    #[error(transparent)]
    Internal(Box<dyn std::error::Error + Send + Sync>),
}

impl RelayError {
    /// Wraps a foreign fault so that its own text is what callers see.
    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Internal(err.into())
    }
}

pub type Result<T> = std::result::Result<T, RelayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_error_keeps_source_text() {
        let err = RelayError::internal("disk full");
        assert_eq!(err.to_string(), "disk full");

        let err = RelayError::internal(std::io::Error::other("quota exceeded"));
        assert_eq!(err.to_string(), "quota exceeded");
    }

    #[test]
    fn test_channel_error_is_prefixed() {
        let err = RelayError::Channel("broker unreachable".to_string());
        assert_eq!(err.to_string(), "Channel error: broker unreachable");
    }
}
