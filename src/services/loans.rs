//! Lending rules: borrowing and returning books
//!
//! A general book moves between Available and Borrowed; a reference book
//! never leaves Available. Both operations check everything before
//! touching memory, so a rejected call leaves the state and the file as
//! they were.

use super::Library;
use crate::{
    error::{AppError, AppResult},
    models::{Book, User},
};

impl Library {
    /// Lend `book_id` to `user_id`
    pub fn borrow(&mut self, user_id: &str, book_id: &str) -> AppResult<()> {
        self.check_borrow(user_id, book_id)
            .inspect_err(|e| tracing::warn!("Borrow rejected: {}", e))?;

        self.state.catalog.set_borrowed(book_id, true)?;
        self.state.membership.record_borrow(user_id, book_id)?;
        tracing::info!("User {} borrowed book {}", user_id, book_id);
        self.persist()
    }

    /// Take `book_id` back from `user_id`.
    ///
    /// If the user's list names a book that is no longer in the catalog, the
    /// entry is still cleared so the user record can be repaired; the missing
    /// book is logged.
    pub fn return_book(&mut self, user_id: &str, book_id: &str) -> AppResult<()> {
        let user = self
            .state
            .membership
            .get(user_id)
            .ok_or_else(|| AppError::UnknownUser(user_id.to_string()))
            .inspect_err(|e| tracing::warn!("Return rejected: {}", e))?;
        if !user.has_borrowed(book_id) {
            let err = AppError::NotBorrowedByUser {
                user_id: user_id.to_string(),
                book_id: book_id.to_string(),
            };
            tracing::warn!("Return rejected: {}", err);
            return Err(err);
        }

        self.state.membership.record_return(user_id, book_id)?;
        match self.state.catalog.set_borrowed(book_id, false) {
            Ok(()) => {}
            Err(AppError::UnknownBook(_)) => {
                tracing::warn!(
                    "User {} returned book {} which is not in the catalog",
                    user_id,
                    book_id
                );
            }
            Err(e) => return Err(e),
        }
        tracing::info!("User {} returned book {}", user_id, book_id);
        self.persist()
    }

    /// The user currently holding `book_id`
    pub fn borrower_of(&self, book_id: &str) -> Option<&User> {
        self.state.membership.borrower_of(book_id)
    }

    /// Books held by `user_id`, in borrow order. Ids missing from the
    /// catalog are skipped.
    pub fn loans_of(&self, user_id: &str) -> AppResult<Vec<&Book>> {
        let user = self
            .state
            .membership
            .get(user_id)
            .ok_or_else(|| AppError::UnknownUser(user_id.to_string()))?;
        Ok(user
            .borrowed_book_ids
            .iter()
            .filter_map(|id| self.state.catalog.get(id))
            .collect())
    }

    fn check_borrow(&self, user_id: &str, book_id: &str) -> AppResult<()> {
        if self.state.membership.get(user_id).is_none() {
            return Err(AppError::UnknownUser(user_id.to_string()));
        }
        let book = self
            .state
            .catalog
            .get(book_id)
            .ok_or_else(|| AppError::UnknownBook(book_id.to_string()))?;
        if !book.category.is_lendable() {
            return Err(AppError::NotLendable(book_id.to_string()));
        }
        if book.borrowed {
            return Err(AppError::AlreadyBorrowed(book_id.to_string()));
        }
        Ok(())
    }
}
