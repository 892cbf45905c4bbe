use crate::model::Collection;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BumoError {
    #[error("{} not found: {}", .collection.label(), .id)]
    NotFound { collection: Collection, id: String },

    #[error("Upload of {size} bytes exceeds the {limit} byte limit")]
    PayloadTooLarge { size: u64, limit: u64 },

    #[error("Invalid asset: {0}")]
    InvalidAsset(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[from] std::io::Error),

    #[error("Corrupt document: {0}")]
    CorruptDocument(#[from] serde_json::Error),

    #[error("Unknown collection: {0}")]
    UnknownCollection(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl BumoError {
    /// True for errors caused by the caller's input rather than the store.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            BumoError::NotFound { .. }
                | BumoError::PayloadTooLarge { .. }
                | BumoError::InvalidAsset(_)
                | BumoError::UnknownCollection(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, BumoError>;
