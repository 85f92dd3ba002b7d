// src/application/memo_query.rs
//
// Presentation-side filter/sort over the full memo list. Pure and
// synchronous, recomputed on every invocation; the data volumes of a
// personal memo collection need no index.

use clap::ValueEnum;

use crate::domain::Memo;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum MemoFilter {
    /// Every memo.
    #[default]
    All,
    /// Memos without an image.
    Text,
    /// Memos carrying an image.
    Image,
    /// Memos with an enabled alarm.
    Alarm,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SortKey {
    /// Newest first.
    #[default]
    Recent,
    /// Oldest first.
    Oldest,
    /// Case-insensitive title, ascending.
    Title,
    /// Enabled alarms first, earliest alarm time leading; disabled last.
    Alarm,
}

#[derive(Debug, Clone, Default)]
pub struct MemoQuery {
    pub search: Option<String>,
    pub filter: MemoFilter,
    pub sort: SortKey,
}

impl MemoQuery {
    /// Apply search, filter and sort to the full list.
    pub fn apply(&self, memos: &[Memo]) -> Vec<Memo> {
        let needle = self
            .search
            .as_deref()
            .map(str::to_lowercase)
            .filter(|s| !s.is_empty());

        let mut result: Vec<Memo> = memos
            .iter()
            .filter(|memo| self.matches_filter(memo))
            .filter(|memo| match &needle {
                None => true,
                Some(q) => {
                    memo.title.to_lowercase().contains(q)
                        || memo.content.to_lowercase().contains(q)
                }
            })
            .cloned()
            .collect();

        match self.sort {
            SortKey::Recent => result.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            SortKey::Oldest => result.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
            SortKey::Title => {
                result.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
            }
            SortKey::Alarm => result.sort_by(|a, b| alarm_rank(a).cmp(&alarm_rank(b))),
        }
        result
    }

    fn matches_filter(&self, memo: &Memo) -> bool {
        match self.filter {
            MemoFilter::All => true,
            MemoFilter::Text => memo.image.is_none(),
            MemoFilter::Image => memo.image.is_some(),
            MemoFilter::Alarm => memo.alarm.enabled,
        }
    }
}

/// Total order for the alarm sort: timed enabled alarms by time, then
/// enabled alarms without a time, then everything disabled.
fn alarm_rank(memo: &Memo) -> (u8, chrono::DateTime<chrono::Utc>) {
    match (memo.alarm.enabled, memo.alarm.time) {
        (true, Some(t)) => (0, t),
        (true, None) => (1, chrono::DateTime::<chrono::Utc>::MIN_UTC),
        (false, _) => (2, chrono::DateTime::<chrono::Utc>::MIN_UTC),
    }
}
