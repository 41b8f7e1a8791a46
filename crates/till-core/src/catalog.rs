//! # Catalog Module
//!
//! Read-only projection over the static menu catalog: category tabs and
//! name search. Presentation-only — filtering never touches cart or
//! checkout state, and any debouncing of search input is the UI's concern
//! (display may lag; cart mutations never do).

use crate::types::{CatalogItem, ItemId};

/// The menu catalog as loaded at terminal startup.
///
/// Items are trusted as-is from the catalog collaborator; the cart does not
/// validate add-item arguments against this list.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    pub fn new(items: Vec<CatalogItem>) -> Self {
        Catalog { items }
    }

    /// All items, in catalog order.
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// Looks up an item by id.
    pub fn item(&self, id: ItemId) -> Option<&CatalogItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Category tabs in first-seen order, deduplicated.
    pub fn categories(&self) -> Vec<&str> {
        let mut cats: Vec<&str> = Vec::new();
        for item in &self.items {
            if !cats.contains(&item.category.as_str()) {
                cats.push(&item.category);
            }
        }
        cats
    }

    /// Items visible for a category tab and search query.
    ///
    /// `category: None` searches every tab. The query is a case-insensitive
    /// substring match on the item name; an empty query matches everything.
    pub fn filter(&self, category: Option<&str>, query: &str) -> Vec<&CatalogItem> {
        let query = query.trim().to_lowercase();
        self.items
            .iter()
            .filter(|i| category.map_or(true, |c| i.category == c))
            .filter(|i| query.is_empty() || i.name.to_lowercase().contains(&query))
            .collect()
    }
}
