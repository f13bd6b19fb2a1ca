use std::{
    collections::{VecDeque, vec_deque},
    fmt,
};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::item::DATE_FORMAT;

/// Kind of lending event recorded in the history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LendingAction {
    /// An item left the shelf
    Borrowed,
    /// An item came back
    Returned,
}

impl fmt::Display for LendingAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Borrowed => f.write_str("borrowed"),
            Self::Returned => f.write_str("returned"),
        }
    }
}

/// One successful borrow or return, immutable once created
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TransactionRecord {
    /// Day the transaction happened
    date: NaiveDate,
    /// Title of the item involved
    item_title: String,
    /// What happened
    action: LendingAction,
    /// Borrower the transaction was made for
    actor: String,
}

impl TransactionRecord {
    /// Create a new record
    #[must_use]
    pub fn new(date: NaiveDate, item_title: &str, action: LendingAction, actor: &str) -> Self {
        Self { date, item_title: item_title.to_string(), action, actor: actor.to_string() }
    }

    /// Day the transaction happened
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Title of the item involved
    #[must_use]
    pub fn item_title(&self) -> &str {
        &self.item_title
    }

    /// What happened
    #[must_use]
    pub const fn action(&self) -> LendingAction {
        self.action
    }

    /// Borrower the transaction was made for
    #[must_use]
    pub fn actor(&self) -> &str {
        &self.actor
    }
}

impl fmt::Display for TransactionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - '{}' {} by {}",
            self.date.format(DATE_FORMAT),
            self.item_title,
            self.action,
            self.actor
        )
    }
}

/// Newest-first log of lending transactions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    /// Records, most recent at the front
    records: VecDeque<TransactionRecord>,
}

impl History {
    /// Create an empty history
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend a record; it becomes the most recent entry
    pub(crate) fn record(&mut self, record: TransactionRecord) {
        self.records.push_front(record);
    }

    /// Number of recorded transactions
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing has been recorded yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Most recent transaction, if any
    #[must_use]
    pub fn latest(&self) -> Option<&TransactionRecord> {
        self.records.front()
    }

    /// Up to `limit` records, newest first
    #[must_use]
    pub fn recent(&self, limit: usize) -> Vec<&TransactionRecord> {
        self.records.iter().take(limit).collect()
    }

    /// All records, newest first
    pub fn iter(&self) -> vec_deque::Iter<'_, TransactionRecord> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a TransactionRecord;
    type IntoIter = vec_deque::Iter<'a, TransactionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a record dated on the given day of March 2024
    #[allow(clippy::expect_used)]
    fn record_on(day: u32, title: &str, action: LendingAction, actor: &str) -> TransactionRecord {
        let date = NaiveDate::from_ymd_opt(2024, 3, day).expect("valid date");
        TransactionRecord::new(date, title, action, actor)
    }

    #[test]
    fn record_display_matches_log_line() {
        let borrowed = record_on(1, "1984", LendingAction::Borrowed, "Alice");
        assert_eq!(borrowed.to_string(), "2024-03-01 - '1984' borrowed by Alice");

        let returned = record_on(2, "1984", LendingAction::Returned, "Alice");
        assert_eq!(returned.to_string(), "2024-03-02 - '1984' returned by Alice");
    }

    #[test]
    fn history_is_newest_first() {
        let mut history = History::new();
        assert!(history.is_empty());
        assert_eq!(history.latest(), None);

        history.record(record_on(1, "Emma", LendingAction::Borrowed, "Alice"));
        history.record(record_on(2, "Emma", LendingAction::Returned, "Alice"));
        history.record(record_on(3, "Dune", LendingAction::Borrowed, "Bob"));

        assert_eq!(history.len(), 3);
        let titles: Vec<&str> = history.iter().map(TransactionRecord::item_title).collect();
        assert_eq!(titles, vec!["Dune", "Emma", "Emma"]);
        assert_eq!(history.latest().map(TransactionRecord::actor), Some("Bob"));
    }

    #[test]
    fn recent_respects_limit() {
        let mut history = History::new();
        history.record(record_on(1, "Emma", LendingAction::Borrowed, "Alice"));
        history.record(record_on(2, "Emma", LendingAction::Returned, "Alice"));

        assert!(history.recent(0).is_empty());
        assert_eq!(history.recent(1).len(), 1);
        assert_eq!(history.recent(1).first().map(|r| r.action()), Some(LendingAction::Returned));
        assert_eq!(history.recent(usize::MAX).len(), 2);
    }

    #[test]
    fn action_serializes_as_upper_case_tag() {
        let record = record_on(4, "Emma", LendingAction::Borrowed, "Alice");
        let json = serde_json::to_value(&record);
        assert!(json.is_ok());
        if let Ok(value) = json {
            assert_eq!(value["action"], "BORROWED");
            assert_eq!(value["date"], "2024-03-04");
            assert_eq!(value["item_title"], "Emma");
        }
    }
}
