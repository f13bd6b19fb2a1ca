//! Lending catalog for tracking which items are on the shelf and who holds the rest.
//!
//! This crate provides the catalog state machine for lendable items, a
//! newest-first log of lending events, and the console collaborators
//! (menu shell, report rendering, sample data) built on top of it.

pub mod catalog;
pub mod clock;
pub mod config;
pub mod error;
pub mod history;
pub mod item;
pub mod item_state;
pub mod logger;
pub mod observers;
pub mod report;
pub mod sample;
pub mod shell;

pub use catalog::{Catalog, CatalogStats};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::AppConfig;
pub use error::{AppError, LendingError};
pub use history::{History, LendingAction, TransactionRecord};
pub use item::Item;
pub use item_state::ItemState;
pub use observers::{LendingObserver, TransactionLogger};
pub use report::CatalogReport;
pub use shell::Shell;
