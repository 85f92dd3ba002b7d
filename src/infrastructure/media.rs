// src/infrastructure/media.rs
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use regex::Regex;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::constants::{ALLOWED_IMAGE_EXTENSIONS, MAX_IMAGE_BYTES};
use crate::domain::DomainError;

/// On-disk store for uploaded memo images.
///
/// Files are written under a single uploads directory with generated
/// uuid filenames; the original name only contributes its extension.
pub struct MediaStore {
    root: PathBuf,
    data_uri_prefix: Regex,
}

impl MediaStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = PathBuf::from(root.as_ref());
        std::fs::create_dir_all(&root)
            .with_context(|| format!("Failed to create uploads directory {}", root.display()))?;
        Ok(Self {
            root,
            data_uri_prefix: Regex::new(r"^data:image/[a-zA-Z0-9.+-]+;base64,")
                .expect("Failed to compile data URI regex"),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Validate and persist an uploaded file, returning the stored filename.
    #[instrument(level = "debug", skip(self, bytes))]
    pub fn save_upload(&self, original_name: &str, bytes: &[u8]) -> Result<String, DomainError> {
        let extension = extension_of(original_name).ok_or_else(|| {
            DomainError::MediaRejected("Invalid file type. Only images are allowed.".to_string())
        })?;
        if !ALLOWED_IMAGE_EXTENSIONS.contains(&extension.as_str()) {
            return Err(DomainError::MediaRejected(
                "Invalid file type. Only images are allowed.".to_string(),
            ));
        }
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(DomainError::MediaRejected(
                "File too large. Maximum size is 5MB.".to_string(),
            ));
        }

        let filename = format!("{}{}", Uuid::new_v4(), extension);
        let path = self.root.join(&filename);
        std::fs::write(&path, bytes)
            .map_err(|e| DomainError::MediaRejected(format!("Failed to store image: {e}")))?;
        debug!(%filename, size = bytes.len(), "Stored uploaded image");
        Ok(filename)
    }

    /// Decode a base64 payload (camera capture) and persist it. A
    /// `data:image/...;base64,` prefix is stripped if present.
    #[instrument(level = "debug", skip(self, data))]
    pub fn save_base64(&self, data: &str, original_name: &str) -> Result<String, DomainError> {
        let payload = self.data_uri_prefix.replace(data.trim(), "");
        let bytes = BASE64
            .decode(payload.as_bytes())
            .map_err(|e| DomainError::MediaRejected(format!("Failed to process image: {e}")))?;
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(DomainError::MediaRejected(
                "Image too large. Maximum size is 5MB.".to_string(),
            ));
        }
        self.save_upload(original_name, &bytes)
    }

    /// Remove a stored image. Missing files are not an error.
    pub fn delete(&self, filename: &str) -> bool {
        match self.resolve(filename) {
            Some(path) if path.exists() => std::fs::remove_file(&path).is_ok(),
            _ => false,
        }
    }

    /// Path of a stored image, or `None` if unknown or the name is unsafe.
    pub fn path_of(&self, filename: &str) -> Option<PathBuf> {
        self.resolve(filename).filter(|p| p.exists())
    }

    // Reject anything that could escape the uploads directory.
    fn resolve(&self, filename: &str) -> Option<PathBuf> {
        if filename.is_empty()
            || filename.contains('/')
            || filename.contains('\\')
            || filename.contains("..")
        {
            return None;
        }
        Some(self.root.join(filename))
    }
}

/// Lowercased extension with leading dot, e.g. `.png`.
pub fn extension_of(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()))
}

/// Content type for serving a stored image, keyed by extension.
pub fn content_type_of(filename: &str) -> &'static str {
    match extension_of(filename).as_deref() {
        Some(".jpg") | Some(".jpeg") => "image/jpeg",
        Some(".png") => "image/png",
        Some(".gif") => "image/gif",
        Some(".webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // 1x1 transparent PNG
    const TINY_PNG: &[u8] = &[
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48,
        0x44, 0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00,
        0x00, 0x1F, 0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78,
        0x9C, 0x62, 0x00, 0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00,
        0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ];

    fn store() -> (TempDir, MediaStore) {
        let temp = TempDir::new().expect("Temp dir should be created");
        let store = MediaStore::new(temp.path()).expect("Media store should open");
        (temp, store)
    }

    #[test]
    fn given_png_upload_when_saving_then_stores_with_uuid_name_and_extension() {
        // Arrange
        let (_temp, store) = store();

        // Act
        let filename = store
            .save_upload("holiday photo.PNG", TINY_PNG)
            .expect("Save should succeed");

        // Assert
        assert!(filename.ends_with(".png"));
        let path = store.path_of(&filename).expect("Stored file should resolve");
        assert_eq!(std::fs::read(path).expect("File should be readable"), TINY_PNG);
    }

    #[test]
    fn given_disallowed_extension_when_saving_then_rejects() {
        let (_temp, store) = store();
        let result = store.save_upload("notes.txt", b"not an image");
        assert!(matches!(result, Err(DomainError::MediaRejected(_))));
    }

    #[test]
    fn given_missing_extension_when_saving_then_rejects() {
        let (_temp, store) = store();
        let result = store.save_upload("noextension", TINY_PNG);
        assert!(matches!(result, Err(DomainError::MediaRejected(_))));
    }

    #[test]
    fn given_oversized_upload_when_saving_then_rejects() {
        // Arrange
        let (_temp, store) = store();
        let oversized = vec![0u8; MAX_IMAGE_BYTES + 1];

        // Act
        let result = store.save_upload("big.png", &oversized);

        // Assert
        assert!(matches!(result, Err(DomainError::MediaRejected(_))));
    }

    #[test]
    fn given_data_uri_when_saving_base64_then_strips_prefix_and_decodes() {
        // Arrange
        let (_temp, store) = store();
        let data = format!("data:image/png;base64,{}", BASE64.encode(TINY_PNG));

        // Act
        let filename = store
            .save_base64(&data, "capture.png")
            .expect("Save should succeed");

        // Assert
        let path = store.path_of(&filename).expect("Stored file should resolve");
        assert_eq!(std::fs::read(path).expect("File should be readable"), TINY_PNG);
    }

    #[test]
    fn given_bare_base64_when_saving_then_decodes_without_prefix() {
        let (_temp, store) = store();
        let filename = store
            .save_base64(&BASE64.encode(TINY_PNG), "capture.jpg")
            .expect("Save should succeed");
        assert!(filename.ends_with(".jpg"));
    }

    #[test]
    fn given_garbage_base64_when_saving_then_rejects() {
        let (_temp, store) = store();
        let result = store.save_base64("definitely not base64!!!", "capture.jpg");
        assert!(matches!(result, Err(DomainError::MediaRejected(_))));
    }

    #[test]
    fn given_traversal_filename_when_resolving_then_refuses() {
        let (_temp, store) = store();
        assert!(store.path_of("../etc/passwd").is_none());
        assert!(store.path_of("a/b.png").is_none());
        assert!(store.path_of("").is_none());
    }

    #[test]
    fn given_stored_file_when_deleting_then_removes_and_reports() {
        // Arrange
        let (_temp, store) = store();
        let filename = store
            .save_upload("photo.png", TINY_PNG)
            .expect("Save should succeed");

        // Act & Assert
        assert!(store.delete(&filename));
        assert!(store.path_of(&filename).is_none());
        assert!(!store.delete(&filename), "Second delete reports missing");
    }

    #[test]
    fn given_known_extensions_when_looking_up_content_type_then_maps() {
        assert_eq!(content_type_of("a.jpeg"), "image/jpeg");
        assert_eq!(content_type_of("a.webp"), "image/webp");
        assert_eq!(content_type_of("a.bin"), "application/octet-stream");
    }
}
