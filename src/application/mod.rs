// src/application/mod.rs
pub mod memo_query;
pub mod memo_service;
pub mod reminder_scanner;

pub use memo_query::{MemoFilter, MemoQuery, SortKey};
pub use memo_service::{MemoService, MemoStore};
pub use reminder_scanner::ReminderScanner;
