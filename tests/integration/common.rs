//! Shared helpers for integration tests

use libris::{Library, Storage};
use tempfile::TempDir;

/// A library backed by a data file inside a fresh temporary directory
pub fn open_library() -> (TempDir, Library) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let library = Library::open(Storage::new(dir.path().join("library_data.json")))
        .expect("Failed to open library");
    (dir, library)
}

/// Reopen the library from the same data file
pub fn reopen(library: &Library) -> Library {
    Library::open(library.storage().clone()).expect("Failed to reopen library")
}

pub fn file_contents(library: &Library) -> Option<String> {
    std::fs::read_to_string(library.storage().path()).ok()
}

/// Every held id is a borrowed general book, and reference books are
/// never flagged borrowed
pub fn assert_invariants(library: &Library) {
    for user in library.list_users() {
        for id in &user.borrowed_book_ids {
            let book = library
                .get_book(id)
                .unwrap_or_else(|| panic!("{} holds unknown book {}", user.id, id));
            assert!(book.borrowed, "{} should be flagged borrowed", id);
            assert!(book.category.is_lendable(), "{} is a reference book", id);
        }
    }
    for book in library.list_books() {
        if !book.category.is_lendable() {
            assert!(!book.borrowed, "reference book {} is borrowed", book.id);
        }
    }
    assert!(library.check().is_empty());
}
