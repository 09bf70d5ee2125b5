//! User model

/// A registered library member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
    /// Books currently held, in borrow order
    pub borrowed_book_ids: Vec<String>,
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            borrowed_book_ids: Vec::new(),
        }
    }

    pub fn has_borrowed(&self, book_id: &str) -> bool {
        self.borrowed_book_ids.iter().any(|id| id == book_id)
    }
}
