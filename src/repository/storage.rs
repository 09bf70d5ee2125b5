//! JSON file storage for the library state
//!
//! The file holds one object with two maps, `books` and `users`, each
//! keyed by entity id. Records are encoded through the explicit schema
//! below rather than the in-memory types, so the on-disk field names stay
//! stable when the models change.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::LibraryState;
use crate::{
    config::StorageConfig,
    error::{AppError, AppResult},
    models::{Book, Category, User},
};

#[derive(Debug, Default, Serialize, Deserialize)]
struct StateRecord {
    #[serde(default)]
    books: IndexMap<String, BookRecord>,
    #[serde(default)]
    users: IndexMap<String, UserRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
struct BookRecord {
    id: String,
    title: String,
    author: String,
    category: CategoryRecord,
    borrowed: bool,
}

/// Stored category names; anything else makes the file malformed
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
enum CategoryRecord {
    General,
    Reference,
}

impl From<Category> for CategoryRecord {
    fn from(c: Category) -> Self {
        match c {
            Category::General => CategoryRecord::General,
            Category::Reference => CategoryRecord::Reference,
        }
    }
}

impl From<CategoryRecord> for Category {
    fn from(c: CategoryRecord) -> Self {
        match c {
            CategoryRecord::General => Category::General,
            CategoryRecord::Reference => Category::Reference,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserRecord {
    id: String,
    name: String,
    borrowed_book_ids: Vec<String>,
}

impl From<&Book> for BookRecord {
    fn from(b: &Book) -> Self {
        Self {
            id: b.id.clone(),
            title: b.title.clone(),
            author: b.author.clone(),
            category: b.category.into(),
            borrowed: b.borrowed,
        }
    }
}

impl From<BookRecord> for Book {
    fn from(r: BookRecord) -> Self {
        Self {
            id: r.id,
            title: r.title,
            author: r.author,
            category: r.category.into(),
            borrowed: r.borrowed,
        }
    }
}

impl From<&User> for UserRecord {
    fn from(u: &User) -> Self {
        Self {
            id: u.id.clone(),
            name: u.name.clone(),
            borrowed_book_ids: u.borrowed_book_ids.clone(),
        }
    }
}

impl From<UserRecord> for User {
    fn from(r: UserRecord) -> Self {
        Self {
            id: r.id,
            name: r.name,
            borrowed_book_ids: r.borrowed_book_ids,
        }
    }
}

/// Reads and fully rewrites the data file
#[derive(Debug, Clone)]
pub struct Storage {
    path: PathBuf,
    indent: usize,
}

impl Storage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            indent: StorageConfig::default().pretty_indent,
        }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self {
            path: config.path.clone(),
            indent: config.pretty_indent,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the state. A missing file yields an empty state.
    pub fn load(&self) -> AppResult<LibraryState> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("No data file at {}, starting empty", self.path.display());
                return Ok(LibraryState::default());
            }
            Err(e) => return Err(self.io_error(e)),
        };

        let record: StateRecord =
            serde_json::from_str(&content).map_err(|e| self.parse_error(e))?;

        let mut state = LibraryState::default();
        for (key, book) in record.books {
            if key != book.id {
                return Err(self.key_mismatch("books", &key, &book.id));
            }
            state.catalog.restore(book.into());
        }
        for (key, user) in record.users {
            if key != user.id {
                return Err(self.key_mismatch("users", &key, &user.id));
            }
            state.membership.restore(user.into());
        }

        tracing::debug!(
            "Loaded {} books and {} users from {}",
            state.catalog.len(),
            state.membership.len(),
            self.path.display()
        );
        Ok(state)
    }

    /// Replace the data file with the full state.
    ///
    /// Writes a sibling temporary file and renames it over the target, so a
    /// crash mid-write leaves the previous file intact.
    pub fn save(&self, state: &LibraryState) -> AppResult<()> {
        let record = StateRecord {
            books: state
                .catalog
                .list()
                .into_iter()
                .map(|b| (b.id.clone(), BookRecord::from(b)))
                .collect(),
            users: state
                .membership
                .list()
                .into_iter()
                .map(|u| (u.id.clone(), UserRecord::from(u)))
                .collect(),
        };

        let mut buf = Vec::new();
        let indent = vec![b' '; self.indent];
        let formatter = serde_json::ser::PrettyFormatter::with_indent(&indent);
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        record
            .serialize(&mut serializer)
            .map_err(|e| self.io_error(e.into()))?;
        buf.push(b'\n');

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let temp_path = self.temp_path();
        let written = fs::File::create(&temp_path).and_then(|mut file| {
            file.write_all(&buf)?;
            file.sync_all()
        });
        if let Err(e) = written.and_then(|()| fs::rename(&temp_path, &self.path)) {
            let _ = fs::remove_file(&temp_path);
            return Err(self.io_error(e));
        }

        tracing::debug!("Saved {} bytes to {}", buf.len(), self.path.display());
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn io_error(&self, source: io::Error) -> AppError {
        AppError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn parse_error(&self, source: serde_json::Error) -> AppError {
        AppError::Parse {
            path: self.path.clone(),
            source,
        }
    }

    fn key_mismatch(&self, section: &str, key: &str, id: &str) -> AppError {
        self.parse_error(serde::de::Error::custom(format!(
            "{section} entry '{key}' holds a record with id '{id}'"
        )))
    }
}
