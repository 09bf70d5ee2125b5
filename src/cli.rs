//! Command line arguments and one-shot commands

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::{
    error::AppResult,
    models::Category,
    services::Library,
    shell::{self, Shell},
};

/// Libris - manage a small library's books, members and loans
#[derive(Parser, Debug)]
#[command(name = "libris", version, about)]
pub struct Args {
    /// Command to run; the interactive menu when omitted
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Data file (overrides storage.path from the configuration)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub data_file: Option<PathBuf>,

    /// Extra configuration file
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the interactive menu
    Menu,
    /// Add a book to the catalog
    AddBook {
        id: String,
        title: String,
        author: String,
        #[arg(value_enum, default_value_t = CategoryArg::General)]
        category: CategoryArg,
    },
    /// List every book
    List,
    /// Find books by title or author, ignoring case
    Search { keyword: String },
    /// Register a user
    AddUser { id: String, name: String },
    /// List every user with the books they hold
    Users,
    /// Lend a book to a user
    Borrow { user_id: String, book_id: String },
    /// Take a book back from a user
    Return { user_id: String, book_id: String },
    /// Report broken references between users and books
    Check,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CategoryArg {
    General,
    Reference,
}

impl From<CategoryArg> for Category {
    fn from(c: CategoryArg) -> Self {
        match c {
            CategoryArg::General => Category::General,
            CategoryArg::Reference => Category::Reference,
        }
    }
}

/// Run `command` against `library`, writing results to `out`.
///
/// Returns the error of a failed mutation after it has been printed, so the
/// caller can turn it into an exit status.
pub fn execute<R: BufRead, W: Write>(
    command: Command,
    library: &mut Library,
    input: R,
    mut out: W,
) -> io::Result<Option<crate::AppError>> {
    let result: AppResult<()> = match command {
        Command::Menu => {
            Shell::new(library, input, out).run()?;
            return Ok(None);
        }
        Command::List => {
            shell::write_books(&mut out, &library.list_books(), "No books available.")?;
            return Ok(None);
        }
        Command::Search { keyword } => {
            shell::write_books(&mut out, &library.search_books(&keyword), "No matching books found.")?;
            return Ok(None);
        }
        Command::Users => {
            shell::write_users(&mut out, &library.list_users())?;
            return Ok(None);
        }
        Command::Check => {
            let issues = library.check();
            if issues.is_empty() {
                writeln!(out, "No problems found.")?;
            }
            for issue in &issues {
                writeln!(out, "{}", issue)?;
            }
            return Ok(None);
        }
        Command::AddBook { id, title, author, category } => {
            let r = library.add_book(&id, &title, &author, category.into());
            shell::write_outcome(&mut out, &r, "Book added successfully.")?;
            r
        }
        Command::AddUser { id, name } => {
            let r = library.add_user(&id, &name);
            shell::write_outcome(&mut out, &r, "User added successfully.")?;
            r
        }
        Command::Borrow { user_id, book_id } => {
            let r = library.borrow(&user_id, &book_id);
            shell::write_outcome(&mut out, &r, "Book borrowed successfully.")?;
            r
        }
        Command::Return { user_id, book_id } => {
            let r = library.return_book(&user_id, &book_id);
            shell::write_outcome(&mut out, &r, "Book returned successfully.")?;
            r
        }
    };
    Ok(result.err())
}
