use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Represents the lending state of a single catalog item
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum ItemState {
    /// Item is on the shelf and can be lent out
    #[default]
    Available,
    /// Item is held by a borrower
    Borrowed {
        /// Name the borrower gave at checkout
        borrower: String,
        /// Day the item left the shelf
        borrowed_on: NaiveDate,
    },
}

impl ItemState {
    /// Whether the item can currently be lent out
    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }

    /// Name of the current holder, if any
    #[must_use]
    pub fn borrower(&self) -> Option<&str> {
        match self {
            Self::Available => None,
            Self::Borrowed { borrower, .. } => Some(borrower),
        }
    }

    /// Day the current loan started, if any
    #[must_use]
    pub const fn borrowed_on(&self) -> Option<NaiveDate> {
        match self {
            Self::Available => None,
            Self::Borrowed { borrowed_on, .. } => Some(*borrowed_on),
        }
    }

    /// Short status label used in item details
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Borrowed { .. } => "Borrowed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_available() {
        let state = ItemState::default();
        assert!(state.is_available());
        assert_eq!(state.borrower(), None);
        assert_eq!(state.borrowed_on(), None);
        assert_eq!(state.label(), "Available");
    }

    #[test]
    fn borrowed_state_exposes_holder_and_date() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1);
        assert!(date.is_some());
        if let Some(borrowed_on) = date {
            let state = ItemState::Borrowed { borrower: "Alice".to_string(), borrowed_on };
            assert!(!state.is_available());
            assert_eq!(state.borrower(), Some("Alice"));
            assert_eq!(state.borrowed_on(), Some(borrowed_on));
            assert_eq!(state.label(), "Borrowed");
        }
    }
}
