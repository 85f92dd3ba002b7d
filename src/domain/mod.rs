// src/domain/mod.rs
pub mod error;
pub mod memo;
pub mod reminder;
pub mod upload;

pub use error::DomainError;
pub use memo::{Alarm, Memo, MemoDraft, MemoKind, MemoPatch};
pub use reminder::Reminder;
pub use upload::ImageUpload;
