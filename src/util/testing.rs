// src/util/testing.rs

use anyhow::Result;
use chrono::Utc;
use std::env;
use tracing::{debug, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::MemoStore;
use crate::domain::{DomainError, Memo, MemoDraft, MemoPatch};

/// Shared mock store for testing use cases that depend on MemoStore
///
/// Behaves like a real in-memory store (create assigns sequential ids and
/// timestamps, update/delete/toggle mutate the held list) and can be
/// configured to fail individual operations, eliminating the need for each
/// test file to define its own mock.
///
/// # Examples
///
/// ```
/// use timenotes::util::testing::MockMemoStore;
/// use timenotes::application::MemoStore;
/// use timenotes::domain::MemoDraft;
///
/// let mut mock = MockMemoStore::builder().build();
/// let memo = mock.create(MemoDraft::new("Groceries", "Milk")).unwrap();
/// assert_eq!(memo.id, "memo-1");
/// ```
pub struct MockMemoStore {
    memos: Vec<Memo>,
    next_id: usize,
    list_failure: Option<String>,
    update_failure: Option<String>,
}

impl MockMemoStore {
    pub fn builder() -> MockMemoStoreBuilder {
        MockMemoStoreBuilder::new()
    }

    fn position(&self, id: &str) -> Result<usize, DomainError> {
        self.memos
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| DomainError::MemoNotFound(id.to_string()))
    }
}

impl MemoStore for MockMemoStore {
    fn list(&mut self) -> Result<Vec<Memo>, DomainError> {
        if let Some(reason) = &self.list_failure {
            return Err(DomainError::StoreError(reason.clone()));
        }
        let mut memos = self.memos.clone();
        memos.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(memos)
    }

    fn get(&mut self, id: &str) -> Result<Memo, DomainError> {
        let idx = self.position(id)?;
        Ok(self.memos[idx].clone())
    }

    fn create(&mut self, draft: MemoDraft) -> Result<Memo, DomainError> {
        let now = Utc::now();
        let memo = Memo {
            id: format!("memo-{}", self.next_id),
            title: draft.title,
            content: draft.content,
            image: draft.image,
            kind: draft.kind,
            alarm: draft.alarm,
            created_at: now,
            updated_at: now,
        };
        self.next_id += 1;
        self.memos.push(memo.clone());
        Ok(memo)
    }

    fn update(&mut self, id: &str, patch: MemoPatch) -> Result<Memo, DomainError> {
        if let Some(reason) = &self.update_failure {
            return Err(DomainError::StoreError(reason.clone()));
        }
        let idx = self.position(id)?;
        patch.apply_to(&mut self.memos[idx]);
        self.memos[idx].updated_at = Utc::now();
        Ok(self.memos[idx].clone())
    }

    fn delete(&mut self, id: &str) -> Result<(), DomainError> {
        let idx = self.position(id)?;
        self.memos.remove(idx);
        Ok(())
    }

    fn toggle_alarm(&mut self, id: &str) -> Result<Memo, DomainError> {
        let idx = self.position(id)?;
        let enabled = self.memos[idx].alarm.enabled;
        self.memos[idx].alarm.enabled = !enabled;
        self.memos[idx].updated_at = Utc::now();
        Ok(self.memos[idx].clone())
    }
}

/// Builder for MockMemoStore
///
/// Provides a fluent interface for configuring mock behavior.
pub struct MockMemoStoreBuilder {
    memos: Vec<Memo>,
    list_failure: Option<String>,
    update_failure: Option<String>,
}

impl MockMemoStoreBuilder {
    pub fn new() -> Self {
        Self {
            memos: Vec::new(),
            list_failure: None,
            update_failure: None,
        }
    }

    /// Seed the store with an existing memo.
    pub fn with_memo(mut self, memo: Memo) -> Self {
        self.memos.push(memo);
        self
    }

    /// Configure list to fail with a store error.
    pub fn with_list_failure(mut self, reason: impl Into<String>) -> Self {
        self.list_failure = Some(reason.into());
        self
    }

    /// Configure update to fail with a store error.
    pub fn with_update_failure(mut self, reason: impl Into<String>) -> Self {
        self.update_failure = Some(reason.into());
        self
    }

    pub fn build(self) -> MockMemoStore {
        MockMemoStore {
            next_id: self.memos.len() + 1,
            memos: self.memos,
            list_failure: self.list_failure,
            update_failure: self.update_failure,
        }
    }
}

impl Default for MockMemoStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn init_test_setup() -> Result<()> {
    setup_test_logging();

    info!("Test Setup complete");
    Ok(())
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "trace");
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}
