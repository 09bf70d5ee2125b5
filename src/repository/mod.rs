//! Repository layer: in-memory collections and their file storage

pub mod catalog;
pub mod membership;
pub mod storage;

use std::fmt;

pub use catalog::Catalog;
pub use membership::Membership;
pub use storage::Storage;

/// Catalog and membership together; the unit of persistence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibraryState {
    pub catalog: Catalog,
    pub membership: Membership,
}

/// A broken cross-reference between users and books
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsistencyIssue {
    /// A user holds an id that is not in the catalog
    UnknownBookOnLoan { user_id: String, book_id: String },
    /// A user holds a book whose flag says it is on the shelf
    NotMarkedBorrowed { user_id: String, book_id: String },
    /// A user holds a reference book
    ReferenceOnLoan { user_id: String, book_id: String },
    /// A book appears in more than one borrow list
    SharedLoan { book_id: String, user_ids: Vec<String> },
    /// A book is flagged borrowed but nobody holds it
    NoBorrower { book_id: String },
}

impl fmt::Display for ConsistencyIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownBookOnLoan { user_id, book_id } => {
                write!(f, "user '{user_id}' holds unknown book '{book_id}'")
            }
            Self::NotMarkedBorrowed { user_id, book_id } => {
                write!(f, "user '{user_id}' holds book '{book_id}' which is not marked borrowed")
            }
            Self::ReferenceOnLoan { user_id, book_id } => {
                write!(f, "user '{user_id}' holds reference book '{book_id}'")
            }
            Self::SharedLoan { book_id, user_ids } => {
                write!(f, "book '{book_id}' is held by several users: {}", user_ids.join(", "))
            }
            Self::NoBorrower { book_id } => {
                write!(f, "book '{book_id}' is marked borrowed but no user holds it")
            }
        }
    }
}

impl LibraryState {
    /// Check the book/user cross-references
    pub fn check(&self) -> Vec<ConsistencyIssue> {
        let mut issues = Vec::new();

        for user in self.membership.list() {
            for book_id in &user.borrowed_book_ids {
                let issue = match self.catalog.get(book_id) {
                    None => Some(ConsistencyIssue::UnknownBookOnLoan {
                        user_id: user.id.clone(),
                        book_id: book_id.clone(),
                    }),
                    Some(book) if !book.category.is_lendable() => {
                        Some(ConsistencyIssue::ReferenceOnLoan {
                            user_id: user.id.clone(),
                            book_id: book_id.clone(),
                        })
                    }
                    Some(book) if !book.borrowed => Some(ConsistencyIssue::NotMarkedBorrowed {
                        user_id: user.id.clone(),
                        book_id: book_id.clone(),
                    }),
                    Some(_) => None,
                };
                issues.extend(issue);
            }
        }

        for book in self.catalog.list() {
            let holders: Vec<String> = self
                .membership
                .list()
                .into_iter()
                .filter(|u| u.has_borrowed(&book.id))
                .map(|u| u.id.clone())
                .collect();
            if holders.len() > 1 {
                issues.push(ConsistencyIssue::SharedLoan {
                    book_id: book.id.clone(),
                    user_ids: holders,
                });
            } else if book.borrowed && holders.is_empty() {
                issues.push(ConsistencyIssue::NoBorrower {
                    book_id: book.id.clone(),
                });
            }
        }

        issues
    }
}
