use tracing::info;

use crate::catalog::Catalog;

/// Titles and authors stocked when a session starts with sample data
pub const SAMPLE_ITEMS: [(&str, &str); 5] = [
    ("To Kill a Mockingbird", "Harper Lee"),
    ("1984", "George Orwell"),
    ("Pride and Prejudice", "Jane Austen"),
    ("The Great Gatsby", "F. Scott Fitzgerald"),
    ("Harry Potter and the Sorcerer's Stone", "J.K. Rowling"),
];

/// Stock `catalog` with the sample items
pub fn seed(catalog: &mut Catalog) {
    for (title, author) in SAMPLE_ITEMS {
        catalog.add(title, author);
    }
    info!(count = SAMPLE_ITEMS.len(), "sample items added");
}
