use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::{
    clock::{Clock, SystemClock},
    error::LendingError,
    history::{History, LendingAction, TransactionRecord},
    item::Item,
    observers::{LendingObserver, TransactionLogger},
};

/// Point-in-time counts over the catalog
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    /// Number of items in the catalog
    pub total_items: usize,
    /// Items on the shelf
    pub available_count: usize,
    /// Items lent out
    pub borrowed_count: usize,
    /// Length of the transaction history
    pub total_transactions: usize,
}

/// Catalog of lendable items and the log of their transactions
pub struct Catalog {
    /// Items in insertion order
    items: Vec<Item>,
    /// Successful transactions, newest first
    history: History,
    /// Source of transaction dates
    clock: Box<dyn Clock>,
    /// Registered transaction observers
    observers: Vec<Box<dyn LendingObserver>>,
}

// Manual implementation of Debug for Catalog
impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog")
            .field("items", &self.items)
            .field("history", &self.history)
            .field("observers_count", &self.observers.len())
            .finish()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

/// Reject names that are empty once surrounding whitespace is removed
fn require_actor(name: &str) -> Result<(), LendingError> {
    if name.trim().is_empty() { Err(LendingError::InvalidActor) } else { Ok(()) }
}

impl Catalog {
    /// Create an empty catalog dated by the system clock
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Box::new(SystemClock))
    }

    /// Create an empty catalog dated by `clock`
    #[must_use]
    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        Self {
            items: Vec::new(),
            history: History::new(),
            clock,
            observers: vec![Box::new(TransactionLogger)],
        }
    }

    /// Register an observer to be notified of every successful transaction
    pub fn register_observer(&mut self, observer: Box<dyn LendingObserver>) {
        self.observers.push(observer);
    }

    /// Append a new, available item to the end of the catalog
    pub fn add(&mut self, title: &str, author: &str) {
        self.items.push(Item::new(title, author));
        debug!(title, author, total = self.items.len(), "item added");
    }

    /// Lend the first available item titled `title` to `borrower`.
    ///
    /// Returns `false` when the name is blank or no copy is available.
    pub fn borrow(&mut self, title: &str, borrower: &str) -> bool {
        self.try_borrow(title, borrower).is_ok()
    }

    /// Lend the first available item titled `title` to `borrower` and hand
    /// back the item as it now stands.
    ///
    /// Titles match ignoring case. Another copy of the same title that is
    /// already lent out is skipped; items with other titles are never
    /// considered.
    ///
    /// # Errors
    ///
    /// - `LendingError::InvalidActor` if `borrower` is blank
    /// - `LendingError::NotFound` if no item has the title
    /// - `LendingError::WrongState` if every copy is lent out
    pub fn try_borrow(&mut self, title: &str, borrower: &str) -> Result<&Item, LendingError> {
        require_actor(borrower)?;
        let Some(idx) =
            self.position_where(|item| item.title_matches(title) && item.is_available())
        else {
            let error = self.borrow_refusal(title);
            debug!(title, borrower, %error, "borrow refused");
            return Err(error);
        };
        self.apply(idx, title, LendingAction::Borrowed, borrower)
    }

    /// Take back the first item titled `title` that `borrower` holds.
    ///
    /// Returns `false` when the name is blank or `borrower` holds no such item.
    pub fn return_item(&mut self, title: &str, borrower: &str) -> bool {
        self.try_return(title, borrower).is_ok()
    }

    /// Take back the first item titled `title` that `borrower` holds and
    /// hand back the item, now available.
    ///
    /// Titles and borrower names match ignoring case.
    ///
    /// # Errors
    ///
    /// - `LendingError::InvalidActor` if `borrower` is blank
    /// - `LendingError::NotFound` if no item has the title
    /// - `LendingError::WrongState` if no copy is lent out
    /// - `LendingError::BorrowerMismatch` if copies are lent out, but not to `borrower`
    pub fn try_return(&mut self, title: &str, borrower: &str) -> Result<&Item, LendingError> {
        require_actor(borrower)?;
        let Some(idx) =
            self.position_where(|item| item.title_matches(title) && item.is_held_by(borrower))
        else {
            let error = self.return_refusal(title, borrower);
            debug!(title, borrower, %error, "return refused");
            return Err(error);
        };
        self.apply(idx, title, LendingAction::Returned, borrower)
    }

    /// Items whose title or author contains `term`, ignoring case
    #[must_use]
    pub fn search(&self, term: &str) -> Vec<&Item> {
        self.items_where(|item| item.matches_term(term))
    }

    /// Every item, in catalog order
    #[must_use]
    pub fn list_all(&self) -> Vec<&Item> {
        self.items.iter().collect()
    }

    /// Items on the shelf, in catalog order
    #[must_use]
    pub fn list_available(&self) -> Vec<&Item> {
        self.items_where(Item::is_available)
    }

    /// Items lent out, in catalog order
    #[must_use]
    pub fn list_borrowed(&self) -> Vec<&Item> {
        self.items_where(|item| !item.is_available())
    }

    /// Items currently held by `borrower`, ignoring case, in catalog order
    #[must_use]
    pub fn list_by_borrower(&self, borrower: &str) -> Vec<&Item> {
        self.items_where(|item| item.is_held_by(borrower))
    }

    /// Up to `limit` most recent transactions, newest first
    #[must_use]
    pub fn recent_history(&self, limit: usize) -> Vec<&TransactionRecord> {
        self.history.recent(limit)
    }

    /// The full transaction history
    #[must_use]
    pub const fn history(&self) -> &History {
        &self.history
    }

    /// Counts of items by state plus the number of transactions
    #[must_use]
    pub fn stats(&self) -> CatalogStats {
        let total_items = self.items.len();
        let available_count = self.items.iter().filter(|item| item.is_available()).count();
        CatalogStats {
            total_items,
            available_count,
            borrowed_count: total_items.saturating_sub(available_count),
            total_transactions: self.history.len(),
        }
    }

    /// Number of items in the catalog
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog has no items
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Index of the first item satisfying `predicate`
    fn position_where(&self, predicate: impl Fn(&Item) -> bool) -> Option<usize> {
        self.items.iter().position(predicate)
    }

    /// Every item satisfying `predicate`, in catalog order
    fn items_where(&self, predicate: impl Fn(&Item) -> bool) -> Vec<&Item> {
        self.items.iter().filter(|&item| predicate(item)).collect()
    }

    /// Apply a transition to the item at `idx`, then record and announce it.
    ///
    /// The record carries `title` as the caller spelled it.
    fn apply(
        &mut self,
        idx: usize,
        title: &str,
        action: LendingAction,
        actor: &str,
    ) -> Result<&Item, LendingError> {
        let today = self.clock.today();
        let item = self
            .items
            .get_mut(idx)
            .ok_or_else(|| LendingError::NotFound { title: title.to_string() })?;
        let applied = match action {
            LendingAction::Borrowed => item.borrow_on(actor, today),
            LendingAction::Returned => item.return_item(),
        };
        if !applied {
            return Err(LendingError::WrongState { title: item.title().to_string(), action });
        }

        self.history.record(TransactionRecord::new(today, title, action, actor));
        if let Some(record) = self.history.latest() {
            for observer in &self.observers {
                observer.on_transaction(record);
            }
        }
        self.items.get(idx).ok_or_else(|| LendingError::NotFound { title: title.to_string() })
    }

    /// Explain why no copy of `title` could be borrowed
    fn borrow_refusal(&self, title: &str) -> LendingError {
        if self.items.iter().any(|item| item.title_matches(title)) {
            LendingError::WrongState { title: title.to_string(), action: LendingAction::Borrowed }
        } else {
            LendingError::NotFound { title: title.to_string() }
        }
    }

    /// Explain why `borrower` could not return `title`
    fn return_refusal(&self, title: &str, borrower: &str) -> LendingError {
        let copies = self.items_where(|item| item.title_matches(title));
        if copies.is_empty() {
            LendingError::NotFound { title: title.to_string() }
        } else if copies.iter().any(|item| !item.is_available()) {
            LendingError::BorrowerMismatch { title: title.to_string(), actor: borrower.to_string() }
        } else {
            LendingError::WrongState { title: title.to_string(), action: LendingAction::Returned }
        }
    }
}
