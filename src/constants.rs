// src/constants.rs
//
// Application-wide constants extracted from magic numbers throughout the codebase.
// Each constant is documented with its purpose and usage context.

/// Seconds between reminder scans in watch mode.
///
/// The watch loop fetches the memo list and runs one scan per tick. A tick
/// always runs to completion before the next can fire.
///
/// Used in: `application/reminder_scanner.rs`, `cli/args.rs`
pub const SCAN_INTERVAL_SECS: u64 = 30;

/// Look-ahead window for due alarms, in seconds.
///
/// An alarm fires when it lies strictly in the future but no further than
/// this many seconds away. Alarms already in the past never fire.
///
/// Used in: `application/reminder_scanner.rs`
pub const REMINDER_WINDOW_SECS: i64 = 60;

/// Maximum memo title length in characters. Titles must also be non-empty
/// after trimming.
///
/// Used in: `application/memo_service.rs`
pub const MAX_TITLE_LEN: usize = 200;

/// Maximum memo content length in characters.
///
/// Used in: `application/memo_service.rs`
pub const MAX_CONTENT_LEN: usize = 5000;

/// Maximum accepted image upload size in bytes (5 MiB).
///
/// Applies to both multipart file uploads and decoded base64 captures.
///
/// Used in: `infrastructure/media.rs`
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// File extensions accepted for image uploads, lowercase with leading dot.
///
/// Used in: `infrastructure/media.rs`
pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".webp"];

/// Characters of memo content shown per memo in `list` output.
///
/// Used in: `util/text.rs`
pub const LIST_PREVIEW_LEN: usize = 60;
