// src/api/state.rs
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::application::MemoService;
use crate::infrastructure::{MediaStore, SqliteStore};

/// Shared router state: the memo service behind a single lock plus the
/// uploads directory. The store is the only shared mutable resource.
#[derive(Clone)]
pub struct AppState {
    pub memos: Arc<Mutex<MemoService<SqliteStore>>>,
    pub media: Arc<MediaStore>,
}

impl AppState {
    pub fn new(store: SqliteStore, media: MediaStore) -> Self {
        Self {
            memos: Arc::new(Mutex::new(MemoService::new(store))),
            media: Arc::new(media),
        }
    }
}
