// src/application/memo_service.rs
use crate::constants::{MAX_CONTENT_LEN, MAX_TITLE_LEN};
use crate::domain::{DomainError, Memo, MemoDraft, MemoPatch};

/// Persistence boundary for memos.
///
/// Each operation fails independently; a failed call must leave stored
/// state unchanged.
pub trait MemoStore {
    /// All memos, newest first.
    fn list(&mut self) -> Result<Vec<Memo>, DomainError>;

    fn get(&mut self, id: &str) -> Result<Memo, DomainError>;

    /// Create a memo. The store assigns the id and both timestamps.
    fn create(&mut self, draft: MemoDraft) -> Result<Memo, DomainError>;

    /// Apply a partial update and return the canonical updated memo.
    fn update(&mut self, id: &str, patch: MemoPatch) -> Result<Memo, DomainError>;

    fn delete(&mut self, id: &str) -> Result<(), DomainError>;

    /// Flip `alarm.enabled`, retaining the scheduled time, and return the
    /// canonical updated memo.
    fn toggle_alarm(&mut self, id: &str) -> Result<Memo, DomainError>;
}

pub struct MemoService<S: MemoStore> {
    store: S,
}

impl<S: MemoStore> MemoService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn list(&mut self) -> Result<Vec<Memo>, DomainError> {
        self.store.list()
    }

    pub fn get(&mut self, id: &str) -> Result<Memo, DomainError> {
        self.store.get(id)
    }

    pub fn create(&mut self, draft: MemoDraft) -> Result<Memo, DomainError> {
        validate_title(&draft.title)?;
        validate_content(&draft.content)?;
        self.store.create(draft)
    }

    pub fn update(&mut self, id: &str, patch: MemoPatch) -> Result<Memo, DomainError> {
        if patch.is_empty() {
            return Err(DomainError::InvalidMemo(
                "No data provided for update".to_string(),
            ));
        }
        if let Some(title) = &patch.title {
            validate_title(title)?;
        }
        if let Some(content) = &patch.content {
            validate_content(content)?;
        }
        self.store.update(id, patch)
    }

    pub fn delete(&mut self, id: &str) -> Result<(), DomainError> {
        self.store.delete(id)
    }

    pub fn toggle_alarm(&mut self, id: &str) -> Result<Memo, DomainError> {
        self.store.toggle_alarm(id)
    }
}

fn validate_title(title: &str) -> Result<(), DomainError> {
    if title.trim().is_empty() {
        return Err(DomainError::InvalidMemo("Title must not be empty".to_string()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(DomainError::InvalidMemo(format!(
            "Title exceeds {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(())
}

fn validate_content(content: &str) -> Result<(), DomainError> {
    if content.chars().count() > MAX_CONTENT_LEN {
        return Err(DomainError::InvalidMemo(format!(
            "Content exceeds {MAX_CONTENT_LEN} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::MockMemoStore;

    #[test]
    fn given_valid_draft_when_creating_then_store_assigns_id_and_timestamps() {
        // Arrange
        let mock = MockMemoStore::builder().build();
        let mut service = MemoService::new(mock);

        // Act
        let memo = service
            .create(MemoDraft::new("Groceries", "Milk"))
            .expect("Create should succeed");

        // Assert
        assert!(!memo.id.is_empty());
        assert_eq!(memo.title, "Groceries");
        assert_eq!(memo.created_at, memo.updated_at);
    }

    #[test]
    fn given_blank_title_when_creating_then_returns_invalid_memo() {
        // Arrange
        let mock = MockMemoStore::builder().build();
        let mut service = MemoService::new(mock);

        // Act
        let result = service.create(MemoDraft::new("   ", "text"));

        // Assert
        assert!(matches!(result, Err(DomainError::InvalidMemo(_))));
    }

    #[test]
    fn given_oversized_title_when_creating_then_returns_invalid_memo() {
        // Arrange
        let mock = MockMemoStore::builder().build();
        let mut service = MemoService::new(mock);
        let title = "x".repeat(MAX_TITLE_LEN + 1);

        // Act
        let result = service.create(MemoDraft::new(title, ""));

        // Assert
        assert!(matches!(result, Err(DomainError::InvalidMemo(_))));
    }

    #[test]
    fn given_empty_patch_when_updating_then_rejects_without_touching_store() {
        // Arrange
        let mock = MockMemoStore::builder().build();
        let mut service = MemoService::new(mock);

        // Act
        let result = service.update("memo-1", MemoPatch::default());

        // Assert
        assert!(matches!(result, Err(DomainError::InvalidMemo(_))));
    }

    #[test]
    fn given_unknown_id_when_updating_then_returns_not_found() {
        // Arrange
        let mock = MockMemoStore::builder().build();
        let mut service = MemoService::new(mock);
        let patch = MemoPatch {
            title: Some("New".to_string()),
            ..Default::default()
        };

        // Act
        let result = service.update("missing", patch);

        // Assert
        assert!(matches!(result, Err(DomainError::MemoNotFound(_))));
    }

    #[test]
    fn given_existing_memo_when_toggling_alarm_then_enabled_flips_and_time_survives() {
        // Arrange
        let mock = MockMemoStore::builder().build();
        let mut service = MemoService::new(mock);
        let alarm_time = chrono::Utc::now() + chrono::Duration::hours(1);
        let mut draft = MemoDraft::new("Standup", "");
        draft.alarm = crate::domain::Alarm::at(alarm_time);
        let memo = service.create(draft).expect("Create should succeed");

        // Act
        let toggled = service.toggle_alarm(&memo.id).expect("Toggle should succeed");

        // Assert
        assert!(!toggled.alarm.enabled);
        assert_eq!(toggled.alarm.time, Some(alarm_time));
    }

    #[test]
    fn given_failed_update_when_listing_then_previous_state_is_unchanged() {
        // Arrange
        let mock = MockMemoStore::builder().build();
        let mut service = MemoService::new(mock);
        let memo = service
            .create(MemoDraft::new("Original", "text"))
            .expect("Create should succeed");
        let bad_patch = MemoPatch {
            title: Some(String::new()),
            ..Default::default()
        };

        // Act
        let result = service.update(&memo.id, bad_patch);

        // Assert
        assert!(result.is_err());
        let listed = service.list().expect("List should succeed");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].title, "Original");
    }
}
