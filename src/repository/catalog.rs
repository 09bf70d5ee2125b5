//! In-memory book catalog

use indexmap::IndexMap;

use crate::{
    error::{AppError, AppResult, EntityKind},
    models::{Book, Category},
};

/// All known books, keyed by id, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    books: IndexMap<String, Book>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new, un-borrowed book
    pub fn add(&mut self, id: &str, title: &str, author: &str, category: Category) -> AppResult<()> {
        if self.books.contains_key(id) {
            return Err(AppError::DuplicateId {
                kind: EntityKind::Book,
                id: id.to_string(),
            });
        }
        self.books
            .insert(id.to_string(), Book::new(id, title, author, category));
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Book> {
        self.books.get(id)
    }

    pub fn list(&self) -> Vec<&Book> {
        self.books.values().collect()
    }

    /// Books whose title or author contains `keyword`, ignoring case
    pub fn search(&self, keyword: &str) -> Vec<&Book> {
        let needle = keyword.to_lowercase();
        self.books.values().filter(|b| b.matches(&needle)).collect()
    }

    /// Set the borrowed flag. Lendability checks are the caller's job.
    pub fn set_borrowed(&mut self, id: &str, value: bool) -> AppResult<()> {
        let book = self
            .books
            .get_mut(id)
            .ok_or_else(|| AppError::UnknownBook(id.to_string()))?;
        book.borrowed = value;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Insert a fully-formed book as read from storage
    pub(crate) fn restore(&mut self, book: Book) {
        self.books.insert(book.id.clone(), book);
    }
}
