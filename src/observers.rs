use tracing::info;

use crate::history::TransactionRecord;

/// Trait for lending transaction observation
pub trait LendingObserver {
    /// Called after a borrow or return has been applied and recorded
    fn on_transaction(&self, record: &TransactionRecord);
}

/// Emits a structured log event for every transaction
#[derive(Debug, Clone, Copy, Default)]
pub struct TransactionLogger;

impl LendingObserver for TransactionLogger {
    fn on_transaction(&self, record: &TransactionRecord) {
        info!(
            action = %record.action(),
            title = record.item_title(),
            actor = record.actor(),
            date = %record.date(),
            "lending transaction recorded"
        );
    }
}
