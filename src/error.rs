//! Error types for lending operations and the application shell.

use thiserror::Error;

use crate::history::LendingAction;

/// Why a borrow or return was refused.
///
/// A refused operation never changes the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LendingError {
    /// No usable borrower name was given
    #[error("please provide your name")]
    InvalidActor,
    /// No item in the catalog has the requested title
    #[error("no item titled '{title}' in the catalog")]
    NotFound {
        /// Title as requested
        title: String,
    },
    /// Items with the title exist but none is in the state the action needs
    #[error("'{title}' cannot be {action} right now")]
    WrongState {
        /// Title as requested
        title: String,
        /// Action that was refused
        action: LendingAction,
    },
    /// Copies are lent out, but none to this borrower
    #[error("{actor} hasn't borrowed '{title}'")]
    BorrowerMismatch {
        /// Title as requested
        title: String,
        /// Name that attempted the return
        actor: String,
    },
}

/// Application-level errors raised outside the lending core
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be read or applied
    #[error("config error: {0}")]
    Config(String),

    /// Logging could not be initialised
    #[error("logger error: {0}")]
    Logger(String),

    /// Output could not be rendered as JSON
    #[error("render error: {0}")]
    Render(#[from] serde_json::Error),

    /// Console or file I/O failed
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn lending_error_messages_name_the_title() {
        let not_found = LendingError::NotFound { title: "Dune".into() };
        assert!(not_found.to_string().contains("'Dune'"));

        let wrong = LendingError::WrongState { title: "1984".into(), action: LendingAction::Borrowed };
        assert_eq!(wrong.to_string(), "'1984' cannot be borrowed right now");

        let mismatch = LendingError::BorrowerMismatch { title: "1984".into(), actor: "Bob".into() };
        assert_eq!(mismatch.to_string(), "Bob hasn't borrowed '1984'");
    }

    #[test]
    fn config_error_display() {
        let e = AppError::Config("missing field".into());
        assert!(e.to_string().contains("missing field"));
    }

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let e: AppError = io_err.into();
        assert!(e.to_string().contains("io error"));
        let _: &dyn Error = &e;
    }
}
