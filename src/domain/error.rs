// src/domain/error.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Memo not found: {0}")]
    MemoNotFound(String),
    #[error("Invalid memo: {0}")]
    InvalidMemo(String),
    #[error("Media rejected: {0}")]
    MediaRejected(String),
    #[error("Store error: {0}")]
    StoreError(String),
}
