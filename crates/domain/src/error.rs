#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("inaccessible storage: {0}")]
    Inaccessible(String),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("malformed stored data: {0}")]
    Malformed(String),
}

#[derive(thiserror::Error, Debug)]
pub enum WriteError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("malformed stored data: {0}")]
    Malformed(String),
}

impl From<ReadError> for WriteError {
    fn from(value: ReadError) -> Self {
        match value {
            ReadError::Storage(storage) => WriteError::Storage(storage),
            ReadError::Malformed(malformed) => WriteError::Malformed(malformed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_error_from_read_error() {
        assert!(matches!(
            WriteError::from(ReadError::Storage(StorageError::Inaccessible(
                "foo".to_string()
            ))),
            WriteError::Storage(StorageError::Inaccessible(message)) if message == "foo"
        ));
        assert!(matches!(
            WriteError::from(ReadError::Malformed("bar".to_string())),
            WriteError::Malformed(message) if message == "bar"
        ));
    }
}
