//! Catalog, membership and lending scenarios

use libris::{models::Category, AppError};
use pretty_assertions::assert_eq;

use crate::common::{assert_invariants, file_contents, open_library};

#[test]
fn test_duplicate_book_id() {
    let (_dir, mut lib) = open_library();
    lib.add_book("B1", "Dune", "Herbert", Category::from("general")).unwrap();
    let err = lib
        .add_book("B1", "Dune Messiah", "Herbert", Category::General)
        .unwrap_err();
    assert!(matches!(err, AppError::DuplicateId { .. }));
    assert_eq!(lib.get_book("B1").unwrap().title, "Dune");
}

#[test]
fn test_duplicate_user_id() {
    let (_dir, mut lib) = open_library();
    lib.add_user("U1", "Alice").unwrap();
    assert!(matches!(lib.add_user("U1", "Bob"), Err(AppError::DuplicateId { .. })));
}

#[test]
fn test_reference_book_not_lendable() {
    let (_dir, mut lib) = open_library();
    lib.add_book("B2", "Encyclopedia", "X", Category::from("reference")).unwrap();
    lib.add_user("U1", "Alice").unwrap();
    assert!(matches!(lib.borrow("U1", "B2"), Err(AppError::NotLendable(_))));
    assert!(!lib.get_book("B2").unwrap().borrowed);
    assert!(lib.get_user("U1").unwrap().borrowed_book_ids.is_empty());
    assert_invariants(&lib);
}

#[test]
fn test_borrow_then_return() {
    let (_dir, mut lib) = open_library();
    lib.add_book("B3", "Dune", "Herbert", Category::General).unwrap();
    lib.add_user("U1", "Alice").unwrap();

    lib.borrow("U1", "B3").unwrap();
    assert!(lib.get_book("B3").unwrap().borrowed);
    assert_eq!(lib.get_user("U1").unwrap().borrowed_book_ids, ["B3"]);
    assert_invariants(&lib);

    assert!(matches!(lib.borrow("U1", "B3"), Err(AppError::AlreadyBorrowed(_))));

    lib.return_book("U1", "B3").unwrap();
    assert!(!lib.get_book("B3").unwrap().borrowed);
    assert!(lib.get_user("U1").unwrap().borrowed_book_ids.is_empty());
    assert!(lib.borrower_of("B3").is_none());
    assert_invariants(&lib);
}

#[test]
fn test_search_ignores_case() {
    let (_dir, mut lib) = open_library();
    lib.add_book("B1", "Dune", "Herbert", Category::General).unwrap();
    lib.add_book("B2", "Emma", "Jane Austen", Category::General).unwrap();

    let found = lib.search_books("dune");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, "B1");
    assert_eq!(lib.search_books("AUSTEN")[0].id, "B2");
    assert!(lib.search_books("tolstoy").is_empty());
}

#[test]
fn test_failed_operations_leave_file_untouched() {
    let (_dir, mut lib) = open_library();
    lib.add_book("B1", "Dune", "Herbert", Category::General).unwrap();
    lib.add_book("R1", "Atlas", "Various", Category::Reference).unwrap();
    lib.add_user("U1", "Alice").unwrap();
    lib.add_user("U2", "Bob").unwrap();
    lib.borrow("U1", "B1").unwrap();

    let state = lib.state().clone();
    let file = file_contents(&lib);

    let failures = [
        lib.borrow("U9", "B1"),
        lib.borrow("U2", "B9"),
        lib.borrow("U2", "R1"),
        lib.borrow("U2", "B1"),
        lib.return_book("U9", "B1"),
        lib.return_book("U2", "B1"),
        lib.return_book("U1", "R1"),
    ];
    assert!(failures.iter().all(Result::is_err));
    assert_eq!(lib.state(), &state);
    assert_eq!(file_contents(&lib), file);
    assert_invariants(&lib);
}

#[test]
fn test_many_loans_keep_invariants() {
    let (_dir, mut lib) = open_library();
    for i in 0..6 {
        let category = if i % 3 == 0 { Category::Reference } else { Category::General };
        lib.add_book(&format!("B{i}"), &format!("Title {i}"), "Author", category).unwrap();
    }
    lib.add_user("U1", "Alice").unwrap();
    lib.add_user("U2", "Bob").unwrap();

    for i in 0..6 {
        let user = if i % 2 == 0 { "U1" } else { "U2" };
        let _ = lib.borrow(user, &format!("B{i}"));
        let _ = lib.borrow("U1", &format!("B{i}"));
        assert_invariants(&lib);
    }
    assert_eq!(lib.get_user("U1").unwrap().borrowed_book_ids, ["B2", "B4"]);
    assert_eq!(lib.get_user("U2").unwrap().borrowed_book_ids, ["B1", "B5"]);

    lib.return_book("U2", "B1").unwrap();
    lib.borrow("U1", "B1").unwrap();
    assert_eq!(lib.get_user("U1").unwrap().borrowed_book_ids, ["B2", "B4", "B1"]);
    assert_eq!(lib.borrower_of("B1").unwrap().name, "Alice");
    assert_invariants(&lib);
}

#[test]
fn test_blank_fields_accepted() {
    let (_dir, mut lib) = open_library();
    lib.add_book("", "", "", Category::General).unwrap();
    lib.add_user("", "").unwrap();
    lib.borrow("", "").unwrap();
    assert!(lib.get_book("").unwrap().borrowed);
}
