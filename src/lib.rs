//! Libris Library Management System
//!
//! Tracks books, users and loans for a single operator, keeping the whole
//! state in one JSON file that is rewritten after every change.

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod shell;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use repository::{LibraryState, Storage};
pub use services::Library;
