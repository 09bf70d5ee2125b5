//! Catalog management service

use super::Library;
use crate::{
    error::AppResult,
    models::{Book, Category},
};

impl Library {
    /// Add a book and save
    pub fn add_book(&mut self, id: &str, title: &str, author: &str, category: Category) -> AppResult<()> {
        self.state
            .catalog
            .add(id, title, author, category)
            .inspect_err(|e| tracing::warn!("Add book rejected: {}", e))?;
        tracing::info!("Added {} book {}", category, id);
        self.persist()
    }

    pub fn get_book(&self, id: &str) -> Option<&Book> {
        self.state.catalog.get(id)
    }

    /// All books in insertion order
    pub fn list_books(&self) -> Vec<&Book> {
        self.state.catalog.list()
    }

    /// Case-insensitive search on title and author
    pub fn search_books(&self, keyword: &str) -> Vec<&Book> {
        let found = self.state.catalog.search(keyword);
        tracing::debug!("Search '{}' matched {} books", keyword, found.len());
        found
    }
}
