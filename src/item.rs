use std::fmt;

use chrono::NaiveDate;

use crate::{
    clock::{Clock, SystemClock},
    item_state::ItemState,
};

/// Date layout used wherever a date is rendered into text
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Width of the rule framing [`Item::details`]
const DETAILS_RULE_WIDTH: usize = 30;

/// Case-insensitive string equality
pub(crate) fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Case-insensitive substring test
pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// A single lendable catalog entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Title, not unique across the catalog
    title: String,
    /// Author or creator
    author: String,
    /// Current lending state
    state: ItemState,
}

impl Item {
    /// Create an item that starts out available
    #[must_use]
    pub fn new(title: &str, author: &str) -> Self {
        Self { title: title.to_string(), author: author.to_string(), state: ItemState::Available }
    }

    /// Title of the item
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Author of the item
    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Whether the item is on the shelf
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.state.is_available()
    }

    /// Current holder, present exactly when the item is lent out
    #[must_use]
    pub fn borrower(&self) -> Option<&str> {
        self.state.borrower()
    }

    /// Start of the current loan, present exactly when the item is lent out
    #[must_use]
    pub const fn borrowed_on(&self) -> Option<NaiveDate> {
        self.state.borrowed_on()
    }

    /// Lend the item out as of today.
    ///
    /// Returns `false` and leaves the item untouched if it is already lent out.
    pub fn borrow(&mut self, borrower: &str) -> bool {
        self.borrow_on(borrower, SystemClock.today())
    }

    /// Lend the item out as of `date`.
    ///
    /// The borrower name is stored as given; callers validate it.
    pub fn borrow_on(&mut self, borrower: &str, date: NaiveDate) -> bool {
        if !self.state.is_available() {
            return false;
        }
        self.state = ItemState::Borrowed { borrower: borrower.to_string(), borrowed_on: date };
        true
    }

    /// Put the item back on the shelf.
    ///
    /// Returns `false` and leaves the item untouched if it was not lent out.
    pub fn return_item(&mut self) -> bool {
        if self.state.is_available() {
            return false;
        }
        self.state = ItemState::Available;
        true
    }

    /// One-line summary, e.g. `'1984' by George Orwell - AVAILABLE`
    #[must_use]
    pub fn describe(&self) -> String {
        self.to_string()
    }

    /// Multi-line detail block framed by rule lines
    #[must_use]
    pub fn details(&self) -> String {
        let rule = "━".repeat(DETAILS_RULE_WIDTH);
        let mut lines = vec![
            rule.clone(),
            format!("Title:  {}", self.title),
            format!("Author: {}", self.author),
            format!("Status: {}", self.state.label()),
        ];
        if let ItemState::Borrowed { borrower, borrowed_on } = &self.state {
            lines.push(format!("Borrowed by: {borrower}"));
            lines.push(format!("Borrow date: {}", borrowed_on.format(DATE_FORMAT)));
        }
        lines.push(rule);
        lines.join("\n")
    }

    /// Title equals `title`, ignoring case
    #[must_use]
    pub fn title_matches(&self, title: &str) -> bool {
        eq_ignore_case(&self.title, title)
    }

    /// Lent out to `name`, ignoring case
    #[must_use]
    pub fn is_held_by(&self, name: &str) -> bool {
        self.state.borrower().is_some_and(|borrower| eq_ignore_case(borrower, name))
    }

    /// Title or author contains `term`, ignoring case
    #[must_use]
    pub fn matches_term(&self, term: &str) -> bool {
        contains_ignore_case(&self.title, term) || contains_ignore_case(&self.author, term)
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            ItemState::Available => write!(f, "'{}' by {} - AVAILABLE", self.title, self.author),
            ItemState::Borrowed { borrower, borrowed_on } => write!(
                f,
                "'{}' by {} - BORROWED by {borrower} on {}",
                self.title,
                self.author,
                borrowed_on.format(DATE_FORMAT)
            ),
        }
    }
}
