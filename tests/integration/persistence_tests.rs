//! Storage behaviour seen through the library

use std::fs;

use libris::{models::Category, AppError, Library, Storage};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

use crate::common::{open_library, reopen};

#[test]
fn test_missing_file_opens_empty() {
    let (_dir, lib) = open_library();
    assert!(lib.list_books().is_empty());
    assert!(lib.list_users().is_empty());
    assert!(!lib.storage().path().exists());
}

#[test]
fn test_every_mutation_is_saved() {
    let (_dir, mut lib) = open_library();
    lib.add_book("B1", "Dune", "Herbert", Category::General).unwrap();
    assert_eq!(reopen(&lib).list_books().len(), 1);

    lib.add_user("U1", "Alice").unwrap();
    assert!(reopen(&lib).get_user("U1").is_some());

    lib.borrow("U1", "B1").unwrap();
    let reloaded = reopen(&lib);
    assert!(reloaded.get_book("B1").unwrap().borrowed);
    assert_eq!(reloaded.get_user("U1").unwrap().borrowed_book_ids, ["B1"]);

    lib.return_book("U1", "B1").unwrap();
    assert!(!reopen(&lib).get_book("B1").unwrap().borrowed);
}

#[test]
fn test_reload_preserves_state() {
    let (_dir, mut lib) = open_library();
    lib.add_book("B3", "Zen", "Pirsig", Category::General).unwrap();
    lib.add_book("B1", "Atlas", "Various", Category::Reference).unwrap();
    lib.add_book("B2", "Dune", "Herbert", Category::General).unwrap();
    lib.add_user("U2", "Bob").unwrap();
    lib.add_user("U1", "Alice").unwrap();
    lib.borrow("U1", "B2").unwrap();
    lib.borrow("U1", "B3").unwrap();

    let reloaded = reopen(&lib);
    assert_eq!(reloaded.state(), lib.state());
    let ids: Vec<&str> = reloaded.list_books().iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, ["B3", "B1", "B2"]);
    assert_eq!(reloaded.get_book("B1").unwrap().category, Category::Reference);
    assert_eq!(reloaded.get_user("U1").unwrap().borrowed_book_ids, ["B2", "B3"]);
}

#[test]
fn test_reads_hand_written_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("library_data.json");
    fs::write(
        &path,
        r#"{
    "books": {
        "B1": {"id": "B1", "title": "Dune", "author": "Herbert", "category": "General", "borrowed": true},
        "B2": {"id": "B2", "title": "Atlas", "author": "Various", "category": "Reference", "borrowed": false}
    },
    "users": {
        "U1": {"id": "U1", "name": "Alice", "borrowedBookIds": ["B1"]}
    }
}"#,
    )
    .unwrap();

    let lib = Library::open(Storage::new(&path)).unwrap();
    assert_eq!(lib.borrower_of("B1").unwrap().id, "U1");
    assert_eq!(lib.get_book("B2").unwrap().category, Category::Reference);
    assert!(lib.check().is_empty());
}

#[test]
fn test_malformed_file_is_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("library_data.json");
    fs::write(&path, "not json").unwrap();
    let err = Library::open(Storage::new(&path)).unwrap_err();
    assert!(matches!(err, AppError::Parse { .. }));
    assert!(err.to_string().contains("library_data.json"));
}
