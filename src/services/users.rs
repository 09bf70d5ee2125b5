//! User management service

use super::Library;
use crate::{error::AppResult, models::User};

impl Library {
    /// Register a user and save
    pub fn add_user(&mut self, id: &str, name: &str) -> AppResult<()> {
        self.state
            .membership
            .add(id, name)
            .inspect_err(|e| tracing::warn!("Add user rejected: {}", e))?;
        tracing::info!("Added user {}", id);
        self.persist()
    }

    pub fn get_user(&self, id: &str) -> Option<&User> {
        self.state.membership.get(id)
    }

    pub fn list_users(&self) -> Vec<&User> {
        self.state.membership.list()
    }
}
