//! Interactive menu for the operator
//!
//! Generic over the input and output streams so the whole loop can be
//! driven from tests.

use std::io::{self, BufRead, Write};

use crate::{
    error::AppResult,
    models::{Book, Category, User},
    services::Library,
};

const MENU: &str = "\n--- Library Management System ---
1. Add Book
2. View Books
3. Search Book
4. Add User
5. Borrow Book
6. Return Book
7. Exit";

/// Print one book per line as `id | title | author | category | status`
pub fn write_books<W: Write>(out: &mut W, books: &[&Book], empty: &str) -> io::Result<()> {
    if books.is_empty() {
        return writeln!(out, "{}", empty);
    }
    for book in books {
        writeln!(out, "{}", book)?;
    }
    Ok(())
}

pub fn write_users<W: Write>(out: &mut W, users: &[&User]) -> io::Result<()> {
    if users.is_empty() {
        return writeln!(out, "No users registered.");
    }
    for user in users {
        writeln!(
            out,
            "{} | {} | {}",
            user.id,
            user.name,
            user.borrowed_book_ids.join(", ")
        )?;
    }
    Ok(())
}

/// Print the outcome of a mutating operation
pub fn write_outcome<W: Write>(out: &mut W, result: &AppResult<()>, success: &str) -> io::Result<()> {
    match result {
        Ok(()) => writeln!(out, "{}", success),
        Err(e) if e.is_persistence() => {
            writeln!(out, "Error: {}", e)?;
            writeln!(out, "The last change may not have been saved.")
        }
        Err(e) => writeln!(out, "Error: {}", e),
    }
}

/// One line read from the operator
enum Input {
    Line(String),
    Invalid,
    End,
}

/// Menu loop over a [`Library`]
pub struct Shell<'a, R, W> {
    library: &'a mut Library,
    input: R,
    output: W,
    finished: bool,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(library: &'a mut Library, input: R, output: W) -> Self {
        Self {
            library,
            input,
            output,
            finished: false,
        }
    }

    /// Run until the operator picks Exit or input ends
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.output, "{}", MENU)?;
            let choice = match self.read_line("Enter choice: ")? {
                Input::Line(line) => line,
                Input::Invalid => String::new(),
                Input::End => break,
            };
            let keep_going = match choice.trim() {
                "1" => self.add_book()?,
                "2" => self.view_books()?,
                "3" => self.search_books()?,
                "4" => self.add_user()?,
                "5" => self.borrow()?,
                "6" => self.return_book()?,
                "7" => false,
                _ => {
                    writeln!(self.output, "Invalid choice.")?;
                    true
                }
            };
            if !keep_going {
                break;
            }
        }
        writeln!(self.output, "Exiting system...")?;
        self.output.flush()
    }

    /// Read one line after printing `label`
    fn read_line(&mut self, label: &str) -> io::Result<Input> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(Input::End);
        }
        match String::from_utf8(buf) {
            Ok(line) => Ok(Input::Line(line.trim_end_matches(['\r', '\n']).to_string())),
            Err(_) => {
                tracing::warn!("Discarded input line that is not valid UTF-8");
                Ok(Input::Invalid)
            }
        }
    }

    /// Read one field; `None` ends the current action.
    ///
    /// Undecodable input is reported and cancels the action, but the menu
    /// keeps running. End of input is reported through `self.finished`.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        match self.read_line(label)? {
            Input::Line(line) => Ok(Some(line)),
            Input::Invalid => {
                writeln!(self.output, "Error: input is not valid UTF-8")?;
                Ok(None)
            }
            Input::End => {
                self.finished = true;
                Ok(None)
            }
        }
    }

    /// Read several fields in order; `None` if any of them is missing
    fn prompt_all<const N: usize>(&mut self, labels: [&str; N]) -> io::Result<Option<[String; N]>> {
        let mut values: [String; N] = std::array::from_fn(|_| String::new());
        for (value, label) in values.iter_mut().zip(labels) {
            match self.prompt(label)? {
                Some(v) => *value = v,
                None => return Ok(None),
            }
        }
        Ok(Some(values))
    }

    fn add_book(&mut self) -> io::Result<bool> {
        let Some([id, title, author, category]) =
            self.prompt_all(["Book ID: ", "Title: ", "Author: ", "Type (general/reference): "])?
        else {
            return Ok(!self.finished);
        };
        let result = self
            .library
            .add_book(&id, &title, &author, Category::from(category.as_str()));
        write_outcome(&mut self.output, &result, "Book added successfully.")?;
        Ok(true)
    }

    fn view_books(&mut self) -> io::Result<bool> {
        let books = self.library.list_books();
        write_books(&mut self.output, &books, "No books available.")?;
        Ok(true)
    }

    fn search_books(&mut self) -> io::Result<bool> {
        let Some(keyword) = self.prompt("Enter title or author to search: ")? else {
            return Ok(!self.finished);
        };
        let books = self.library.search_books(&keyword);
        write_books(&mut self.output, &books, "No matching books found.")?;
        Ok(true)
    }

    fn add_user(&mut self) -> io::Result<bool> {
        let Some([id, name]) = self.prompt_all(["User ID: ", "User Name: "])? else {
            return Ok(!self.finished);
        };
        let result = self.library.add_user(&id, &name);
        write_outcome(&mut self.output, &result, "User added successfully.")?;
        Ok(true)
    }

    fn borrow(&mut self) -> io::Result<bool> {
        let Some([user_id, book_id]) = self.prompt_all(["User ID: ", "Book ID: "])? else {
            return Ok(!self.finished);
        };
        let result = self.library.borrow(&user_id, &book_id);
        write_outcome(&mut self.output, &result, "Book borrowed successfully.")?;
        Ok(true)
    }

    fn return_book(&mut self) -> io::Result<bool> {
        let Some([user_id, book_id]) = self.prompt_all(["User ID: ", "Book ID: "])? else {
            return Ok(!self.finished);
        };
        let result = self.library.return_book(&user_id, &book_id);
        write_outcome(&mut self.output, &result, "Book returned successfully.")?;
        Ok(true)
    }
}
