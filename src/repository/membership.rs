//! In-memory user registry

use indexmap::IndexMap;

use crate::{
    error::{AppError, AppResult, EntityKind},
    models::User,
};

/// All registered users, keyed by id, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Membership {
    users: IndexMap<String, User>,
}

impl Membership {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user with no borrowed books
    pub fn add(&mut self, id: &str, name: &str) -> AppResult<()> {
        if self.users.contains_key(id) {
            return Err(AppError::DuplicateId {
                kind: EntityKind::User,
                id: id.to_string(),
            });
        }
        self.users.insert(id.to_string(), User::new(id, name));
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&User> {
        self.users.get(id)
    }

    pub fn list(&self) -> Vec<&User> {
        self.users.values().collect()
    }

    pub fn record_borrow(&mut self, user_id: &str, book_id: &str) -> AppResult<()> {
        self.get_mut(user_id)?.borrowed_book_ids.push(book_id.to_string());
        Ok(())
    }

    pub fn record_return(&mut self, user_id: &str, book_id: &str) -> AppResult<()> {
        let user = self.get_mut(user_id)?;
        let pos = user
            .borrowed_book_ids
            .iter()
            .position(|id| id == book_id)
            .ok_or_else(|| AppError::NotBorrowedByUser {
                user_id: user_id.to_string(),
                book_id: book_id.to_string(),
            })?;
        user.borrowed_book_ids.remove(pos);
        Ok(())
    }

    /// The user currently holding `book_id`, if any
    pub fn borrower_of(&self, book_id: &str) -> Option<&User> {
        self.users.values().find(|u| u.has_borrowed(book_id))
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub(crate) fn restore(&mut self, user: User) {
        self.users.insert(user.id.clone(), user);
    }

    fn get_mut(&mut self, id: &str) -> AppResult<&mut User> {
        self.users
            .get_mut(id)
            .ok_or_else(|| AppError::UnknownUser(id.to_string()))
    }
}
