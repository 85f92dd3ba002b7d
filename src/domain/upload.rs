// src/domain/upload.rs
use serde::{Deserialize, Serialize};

/// Result of an image upload: the stored filename and the path it is
/// served from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageUpload {
    pub filename: String,
    pub url: String,
}
