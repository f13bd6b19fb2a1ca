//! Text and JSON rendering of catalog query results.
//!
//! Everything here returns plain strings; the shell decides where they go.

use serde::Serialize;

use crate::{
    catalog::CatalogStats,
    history::TransactionRecord,
    item::{DATE_FORMAT, Item},
};

/// Width of the boxed section headings
const HEADING_WIDTH: usize = 50;

/// Flat JSON shape of an item
#[derive(Debug, Serialize)]
struct ItemRow<'a> {
    /// Item title
    title: &'a str,
    /// Item author
    author: &'a str,
    /// Whether the item is on the shelf
    available: bool,
    /// Current holder
    borrower: Option<&'a str>,
    /// Start of the current loan as `YYYY-MM-DD`
    borrowed_on: Option<String>,
}

impl<'a> From<&'a Item> for ItemRow<'a> {
    fn from(item: &'a Item) -> Self {
        Self {
            title: item.title(),
            author: item.author(),
            available: item.is_available(),
            borrower: item.borrower(),
            borrowed_on: item.borrowed_on().map(|date| date.format(DATE_FORMAT).to_string()),
        }
    }
}

/// Rendering helpers for catalog output
#[derive(Debug)]
pub struct CatalogReport;

impl CatalogReport {
    /// Boxed section heading
    #[must_use]
    pub fn heading(title: &str) -> String {
        let rule = "═".repeat(HEADING_WIDTH);
        format!("╔{rule}╗\n  {title}\n╚{rule}╝")
    }

    /// Numbered item list, or `empty_message` when there is nothing to show
    #[must_use]
    pub fn items(items: &[&Item], empty_message: &str) -> String {
        Self::numbered(items.iter().map(ToString::to_string), empty_message)
    }

    /// Numbered transaction list, newest first
    #[must_use]
    pub fn history(records: &[&TransactionRecord]) -> String {
        Self::numbered(
            records.iter().map(ToString::to_string),
            "No transaction history available.",
        )
    }

    /// Aligned statistics block
    #[must_use]
    pub fn stats(stats: &CatalogStats) -> String {
        [
            format!("Total Items:        {}", stats.total_items),
            format!("Available Items:    {}", stats.available_count),
            format!("Borrowed Items:     {}", stats.borrowed_count),
            format!("Total Transactions: {}", stats.total_transactions),
        ]
        .join("\n")
    }

    /// Items as a pretty-printed JSON array
    ///
    /// # Errors
    ///
    /// Returns a `serde_json::Error` if serialization fails
    pub fn items_json(items: &[&Item]) -> Result<String, serde_json::Error> {
        let rows: Vec<ItemRow<'_>> = items.iter().map(|&item| ItemRow::from(item)).collect();
        serde_json::to_string_pretty(&rows)
    }

    /// Transactions as a pretty-printed JSON array
    ///
    /// # Errors
    ///
    /// Returns a `serde_json::Error` if serialization fails
    pub fn history_json(records: &[&TransactionRecord]) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(records)
    }

    /// Statistics as a pretty-printed JSON object
    ///
    /// # Errors
    ///
    /// Returns a `serde_json::Error` if serialization fails
    pub fn stats_json(stats: &CatalogStats) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(stats)
    }

    /// Number lines from 1, falling back to `empty_message`
    fn numbered(lines: impl Iterator<Item = String>, empty_message: &str) -> String {
        let rendered: Vec<String> =
            (1_usize..).zip(lines).map(|(n, line)| format!("{n}. {line}")).collect();
        if rendered.is_empty() { empty_message.to_string() } else { rendered.join("\n") }
    }
}
