//! Interactive menu loop driving a [`Catalog`].
//!
//! The shell reads from any [`BufRead`] and writes to any [`Write`], so a
//! session can run against the terminal or a scripted buffer alike. It only
//! forwards what was typed; all validation happens in the catalog.

use std::{
    io::{BufRead, Write},
    ops::ControlFlow,
};

use colored::Colorize;
use tracing::{debug, info};

use crate::{
    catalog::Catalog, config::AppConfig, error::AppError, item::Item, report::CatalogReport,
};

/// Outcome of one menu action: keep going or end the session
type Step = Result<ControlFlow<()>, AppError>;

/// Menu lines in display order
const MENU: [&str; 11] = [
    "1. Add Item",
    "2. Borrow Item",
    "3. Return Item",
    "4. Search Items",
    "5. Display All Items",
    "6. Display Available Items",
    "7. Display Borrowed Items",
    "8. Display My Borrowed Items",
    "9. Display Transaction History",
    "10. Display Catalog Statistics",
    "0. Exit",
];

/// A selection from the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// Add a new item
    Add,
    /// Borrow an item by title
    Borrow,
    /// Return an item by title
    Return,
    /// Search titles and authors
    Search,
    /// List every item
    ListAll,
    /// List items on the shelf
    ListAvailable,
    /// List items lent out
    ListBorrowed,
    /// List items held by one borrower
    ListMine,
    /// Show recent transactions
    History,
    /// Show catalog statistics
    Stats,
    /// End the session
    Exit,
}

impl MenuChoice {
    /// Parse the number typed at the menu prompt
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().parse::<u8>().ok()? {
            0 => Some(Self::Exit),
            1 => Some(Self::Add),
            2 => Some(Self::Borrow),
            3 => Some(Self::Return),
            4 => Some(Self::Search),
            5 => Some(Self::ListAll),
            6 => Some(Self::ListAvailable),
            7 => Some(Self::ListBorrowed),
            8 => Some(Self::ListMine),
            9 => Some(Self::History),
            10 => Some(Self::Stats),
            _ => None,
        }
    }
}

/// Parse a transaction count; blank means `default`, negative means none
fn parse_history_limit(input: &str, default: usize) -> Option<usize> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Some(default);
    }
    trimmed.parse::<i64>().ok().map(|n| usize::try_from(n).unwrap_or(0))
}

/// Menu-driven console session over a catalog
#[derive(Debug)]
pub struct Shell<R, W> {
    /// Catalog the session operates on
    catalog: Catalog,
    /// Source of menu choices and field values
    input: R,
    /// Destination for prompts and results
    output: W,
    /// Transactions shown when no count is entered
    history_limit: usize,
    /// Render listings as JSON instead of text
    json: bool,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    /// Create a shell over `catalog` using the session settings in `config`
    #[must_use]
    pub fn new(catalog: Catalog, input: R, output: W, config: &AppConfig) -> Self {
        Self { catalog, input, output, history_limit: config.history_limit, json: config.json }
    }

    /// The catalog the session operates on
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Tear the shell down, handing back the catalog and the output
    #[must_use]
    pub fn into_parts(self) -> (Catalog, W) {
        (self.catalog, self.output)
    }

    /// Run the menu loop until the user exits or input ends
    ///
    /// # Errors
    ///
    /// Returns `AppError::Io` if reading input or writing output fails, and
    /// `AppError::Render` if JSON rendering fails.
    pub fn run(&mut self) -> Result<(), AppError> {
        info!(items = self.catalog.len(), "session started");
        loop {
            self.print_menu()?;
            let Some(line) = self.read_line()? else {
                break;
            };
            let Some(choice) = MenuChoice::parse(&line) else {
                writeln!(self.output, "{}", "✗ Invalid choice. Please try again.".red())?;
                continue;
            };
            if self.dispatch(choice)?.is_break() {
                break;
            }
        }
        writeln!(
            self.output,
            "\n{}",
            CatalogReport::heading("Thank you for using the lending catalog!").green()
        )?;
        info!(transactions = self.catalog.history().len(), "session ended");
        Ok(())
    }

    /// Route one menu choice to its handler
    fn dispatch(&mut self, choice: MenuChoice) -> Step {
        debug!(?choice, "menu choice");
        match choice {
            MenuChoice::Add => self.add_item(),
            MenuChoice::Borrow => self.borrow_item(),
            MenuChoice::Return => self.return_item(),
            MenuChoice::Search => self.search(),
            MenuChoice::ListAll => {
                let body =
                    self.render_items(&self.catalog.list_all(), "No items in the catalog.")?;
                self.emit("All Items in Catalog", &body)
            }
            MenuChoice::ListAvailable => {
                let body = self
                    .render_items(&self.catalog.list_available(), "No items currently available.")?;
                self.emit("Available Items", &body)
            }
            MenuChoice::ListBorrowed => {
                let body = self
                    .render_items(&self.catalog.list_borrowed(), "No items currently borrowed.")?;
                self.emit("Borrowed Items", &body)
            }
            MenuChoice::ListMine => self.list_mine(),
            MenuChoice::History => self.history(),
            MenuChoice::Stats => {
                let stats = self.catalog.stats();
                let body = if self.json {
                    CatalogReport::stats_json(&stats)?
                } else {
                    CatalogReport::stats(&stats)
                };
                self.emit("Catalog Statistics", &body)
            }
            MenuChoice::Exit => Ok(ControlFlow::Break(())),
        }
    }

    /// Menu action: add an item
    fn add_item(&mut self) -> Step {
        let Some(title) = self.prompt("\nEnter item title: ")? else {
            return Ok(ControlFlow::Break(()));
        };
        let Some(author) = self.prompt("Enter item author: ")? else {
            return Ok(ControlFlow::Break(()));
        };
        self.catalog.add(&title, &author);
        writeln!(self.output, "{}", "✓ Item added successfully!".green())?;
        writeln!(self.output, "  Title: {title}\n  Author: {author}")?;
        Ok(ControlFlow::Continue(()))
    }

    /// Menu action: borrow an item
    fn borrow_item(&mut self) -> Step {
        let Some(title) = self.prompt("\nEnter item title to borrow: ")? else {
            return Ok(ControlFlow::Break(()));
        };
        let Some(name) = self.prompt("Enter your name: ")? else {
            return Ok(ControlFlow::Break(()));
        };
        match self.catalog.try_borrow(&title, &name) {
            Ok(item) => {
                let details = item.details();
                writeln!(self.output, "{}", "✓ Item borrowed successfully!".green())?;
                writeln!(self.output, "{details}")?;
            }
            Err(error) => writeln!(self.output, "{}", format!("✗ {error}").red())?,
        }
        Ok(ControlFlow::Continue(()))
    }

    /// Menu action: return an item
    fn return_item(&mut self) -> Step {
        let Some(title) = self.prompt("\nEnter item title to return: ")? else {
            return Ok(ControlFlow::Break(()));
        };
        let Some(name) = self.prompt("Enter your name: ")? else {
            return Ok(ControlFlow::Break(()));
        };
        match self.catalog.try_return(&title, &name) {
            Ok(_) => {
                writeln!(self.output, "{}", "✓ Item returned successfully!".green())?;
                writeln!(self.output, "  Item: '{title}'\n  User: {name}")?;
            }
            Err(error) => writeln!(self.output, "{}", format!("✗ {error}").red())?,
        }
        Ok(ControlFlow::Continue(()))
    }

    /// Menu action: search titles and authors
    fn search(&mut self) -> Step {
        let Some(term) = self.prompt("\nEnter search term (title or author): ")? else {
            return Ok(ControlFlow::Break(()));
        };
        let empty = format!("No items found matching '{term}'");
        let body = self.render_items(&self.catalog.search(&term), &empty)?;
        self.emit(&format!("Search Results for '{term}'"), &body)
    }

    /// Menu action: list one borrower's items
    fn list_mine(&mut self) -> Step {
        let Some(name) = self.prompt("\nEnter your name: ")? else {
            return Ok(ControlFlow::Break(()));
        };
        let empty = format!("{name} hasn't borrowed any items.");
        let body = self.render_items(&self.catalog.list_by_borrower(&name), &empty)?;
        self.emit(&format!("Items Borrowed by {name}"), &body)
    }

    /// Menu action: show recent transactions
    fn history(&mut self) -> Step {
        let label = format!(
            "\nEnter number of recent transactions to display [{}]: ",
            self.history_limit
        );
        let Some(input) = self.prompt(&label)? else {
            return Ok(ControlFlow::Break(()));
        };
        let Some(limit) = parse_history_limit(&input, self.history_limit) else {
            writeln!(self.output, "{}", format!("✗ '{}' is not a number.", input.trim()).red())?;
            return Ok(ControlFlow::Continue(()));
        };
        let records = self.catalog.recent_history(limit);
        let body = if self.json {
            CatalogReport::history_json(&records)?
        } else {
            CatalogReport::history(&records)
        };
        self.emit("Recent Transaction History", &body)
    }

    /// Render items as text or JSON depending on the session mode
    fn render_items(&self, items: &[&Item], empty_message: &str) -> Result<String, AppError> {
        if self.json {
            Ok(CatalogReport::items_json(items)?)
        } else {
            Ok(CatalogReport::items(items, empty_message))
        }
    }

    /// Write a section; JSON mode omits the heading
    fn emit(&mut self, heading: &str, body: &str) -> Step {
        if !self.json {
            writeln!(self.output, "\n{}", CatalogReport::heading(heading).cyan())?;
        }
        writeln!(self.output, "{body}")?;
        Ok(ControlFlow::Continue(()))
    }

    /// Print the main menu and the choice prompt
    fn print_menu(&mut self) -> Result<(), AppError> {
        writeln!(self.output, "\n{}", CatalogReport::heading("LENDING CATALOG").bold())?;
        for entry in MENU {
            writeln!(self.output, "{entry}")?;
        }
        write!(self.output, "Enter your choice: ")?;
        self.output.flush()?;
        Ok(())
    }

    /// Show `label` and read the answer
    fn prompt(&mut self, label: &str) -> Result<Option<String>, AppError> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        self.read_line()
    }

    /// Read one line without its terminator; `None` at end of input
    fn read_line(&mut self) -> Result<Option<String>, AppError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(len);
        Ok(Some(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_choices_parse() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::Add));
        assert_eq!(MenuChoice::parse(" 10 "), Some(MenuChoice::Stats));
        assert_eq!(MenuChoice::parse("0"), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("11"), None);
        assert_eq!(MenuChoice::parse("-1"), None);
        assert_eq!(MenuChoice::parse("borrow"), None);
        assert_eq!(MenuChoice::parse(""), None);
    }

    #[test]
    fn history_limit_parsing() {
        assert_eq!(parse_history_limit("", 5), Some(5));
        assert_eq!(parse_history_limit(" 3 ", 5), Some(3));
        assert_eq!(parse_history_limit("-4", 5), Some(0));
        assert_eq!(parse_history_limit("lots", 5), None);
    }
}
