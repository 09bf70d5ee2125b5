//! Book model and related types

use std::fmt;

/// Lendability class of a book, fixed at creation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Category {
    #[default]
    General,
    Reference,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::General => "General",
            Category::Reference => "Reference",
        }
    }

    /// Reference books never leave the library.
    pub fn is_lendable(&self) -> bool {
        matches!(self, Category::General)
    }
}

/// Lenient parse used for operator input:
/// only "reference" (any case) selects [`Category::Reference`].
impl From<&str> for Category {
    fn from(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("reference") {
            Category::Reference
        } else {
            Category::General
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Availability shown in listings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookStatus {
    Available,
    Borrowed,
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookStatus::Available => f.write_str("Available"),
            BookStatus::Borrowed => f.write_str("Borrowed"),
        }
    }
}

/// A catalogued book
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    pub category: Category,
    pub borrowed: bool,
}

impl Book {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        category: Category,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            category,
            borrowed: false,
        }
    }

    pub fn status(&self) -> BookStatus {
        if self.borrowed {
            BookStatus::Borrowed
        } else {
            BookStatus::Available
        }
    }

    /// Case-insensitive substring match on title or author.
    /// `needle` must already be lowercased.
    pub(crate) fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.author.to_lowercase().contains(needle)
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {} | {} | {}",
            self.id,
            self.title,
            self.author,
            self.category,
            self.status()
        )
    }
}
