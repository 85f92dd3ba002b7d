// src/domain/memo.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Scheduled alarm attached to a memo.
///
/// `time` is meaningful only while `enabled` is true; disabling an alarm
/// retains the stale time so re-enabling restores the previous schedule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Alarm {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub time: Option<DateTime<Utc>>,
}

impl Alarm {
    pub fn at(time: DateTime<Utc>) -> Self {
        Self {
            enabled: true,
            time: Some(time),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoKind {
    #[default]
    Text,
    Image,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Memo {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub kind: MemoKind,
    #[serde(default)]
    pub alarm: Alarm,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied by the caller at creation time. The store assigns the id
/// and both timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoDraft {
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub kind: MemoKind,
    #[serde(default)]
    pub alarm: Alarm,
}

impl MemoDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            image: None,
            kind: MemoKind::Text,
            alarm: Alarm::default(),
        }
    }
}

/// Partial update. `None` fields leave the stored value untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<MemoKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alarm: Option<Alarm>,
}

impl MemoPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.image.is_none()
            && self.kind.is_none()
            && self.alarm.is_none()
    }

    /// Apply this patch to a memo in place, leaving timestamps to the store.
    pub fn apply_to(&self, memo: &mut Memo) {
        if let Some(title) = &self.title {
            memo.title = title.clone();
        }
        if let Some(content) = &self.content {
            memo.content = content.clone();
        }
        if let Some(image) = &self.image {
            memo.image = Some(image.clone());
        }
        if let Some(kind) = self.kind {
            memo.kind = kind;
        }
        if let Some(alarm) = &self.alarm {
            memo.alarm = alarm.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_memo() -> Memo {
        let t = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        Memo {
            id: "memo-1".to_string(),
            title: "Groceries".to_string(),
            content: "Milk, eggs".to_string(),
            image: None,
            kind: MemoKind::Text,
            alarm: Alarm::default(),
            created_at: t,
            updated_at: t,
        }
    }

    #[test]
    fn given_empty_patch_when_checking_then_is_empty() {
        let patch = MemoPatch::default();
        assert!(patch.is_empty());
    }

    #[test]
    fn given_patch_with_title_when_applying_then_only_title_changes() {
        // Arrange
        let mut memo = sample_memo();
        let patch = MemoPatch {
            title: Some("Shopping".to_string()),
            ..Default::default()
        };

        // Act
        patch.apply_to(&mut memo);

        // Assert
        assert_eq!(memo.title, "Shopping");
        assert_eq!(memo.content, "Milk, eggs");
        assert!(!memo.alarm.enabled);
    }

    #[test]
    fn given_disabled_alarm_patch_when_applying_then_stale_time_is_retained() {
        // Arrange
        let mut memo = sample_memo();
        let alarm_time = Utc.with_ymd_and_hms(2025, 6, 2, 9, 0, 0).unwrap();
        memo.alarm = Alarm::at(alarm_time);
        let patch = MemoPatch {
            alarm: Some(Alarm {
                enabled: false,
                time: Some(alarm_time),
            }),
            ..Default::default()
        };

        // Act
        patch.apply_to(&mut memo);

        // Assert
        assert!(!memo.alarm.enabled);
        assert_eq!(memo.alarm.time, Some(alarm_time));
    }

    #[test]
    fn given_memo_json_when_round_tripping_then_alarm_survives() {
        // Arrange
        let mut memo = sample_memo();
        memo.alarm = Alarm::at(Utc.with_ymd_and_hms(2025, 6, 2, 9, 0, 0).unwrap());

        // Act
        let json = serde_json::to_string(&memo).unwrap();
        let parsed: Memo = serde_json::from_str(&json).unwrap();

        // Assert
        assert_eq!(parsed.alarm, memo.alarm);
        assert!(json.contains(r#""kind":"text""#));
    }
}
