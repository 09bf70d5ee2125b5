//! Error types for Libris

use std::path::PathBuf;

use thiserror::Error;

/// Numeric error codes, used as the exit status of one-shot commands.
/// Success is 0 and failures outside [`AppError`] exit with 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Duplicate = 2,
    NoSuchUser = 3,
    NoSuchItem = 4,
    NotBorrowable = 5,
    ItemNotAvailable = 6,
    NotBorrowed = 7,
    StorageFailure = 8,
    CorruptData = 9,
    BadConfig = 10,
}

/// Kind of entity an identifier belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Book,
    User,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Book => write!(f, "Book"),
            EntityKind::User => write!(f, "User"),
        }
    }
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{kind} with id '{id}' already exists")]
    DuplicateId { kind: EntityKind, id: String },

    #[error("No book with id '{0}'")]
    UnknownBook(String),

    #[error("No user with id '{0}'")]
    UnknownUser(String),

    #[error("Book '{0}' is a reference book and cannot be borrowed")]
    NotLendable(String),

    #[error("Book '{0}' is already borrowed")]
    AlreadyBorrowed(String),

    #[error("User '{user_id}' has not borrowed book '{book_id}'")]
    NotBorrowedByUser { user_id: String, book_id: String },

    #[error("Storage error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed data file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::DuplicateId { .. } => ErrorCode::Duplicate,
            AppError::UnknownBook(_) => ErrorCode::NoSuchItem,
            AppError::UnknownUser(_) => ErrorCode::NoSuchUser,
            AppError::NotLendable(_) => ErrorCode::NotBorrowable,
            AppError::AlreadyBorrowed(_) => ErrorCode::ItemNotAvailable,
            AppError::NotBorrowedByUser { .. } => ErrorCode::NotBorrowed,
            AppError::Io { .. } => ErrorCode::StorageFailure,
            AppError::Parse { .. } => ErrorCode::CorruptData,
            AppError::Config(_) => ErrorCode::BadConfig,
        }
    }

    /// True for failures of the storage layer rather than a library rule.
    /// The in-memory change that preceded a failed save is kept.
    pub fn is_persistence(&self) -> bool {
        matches!(self, AppError::Io { .. } | AppError::Parse { .. })
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
