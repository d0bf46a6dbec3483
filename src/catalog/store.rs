//! # Book store
//!
//! The in-memory collection behind the REST surface. Owns id assignment,
//! the CRUD contract, and the single lock that keeps concurrent mutations
//! from interleaving.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use super::book::{Book, BookPatch, NewBook};
use super::errors::{CatalogError, CatalogResult};
use super::filter::BookFilter;

/// Collection contents plus the id counter.
///
/// `next_id` is tracked separately from the collection and only moves
/// forward: recomputing `max(id) + 1` after a delete could hand out an id
/// a client has already seen.
#[derive(Debug)]
struct CatalogState {
    books: Vec<Book>,
    next_id: u64,
}

/// In-memory book collection with store-assigned ids.
///
/// Every mutation (create/update/delete) runs under the write half of one
/// `RwLock` for its whole duration; reads take the read half. Operations
/// never hold the lock across an await point, so the std lock is safe to
/// use from async handlers.
pub struct BookStore {
    state: RwLock<CatalogState>,
}

impl BookStore {
    /// Create an empty store; the first created book gets id 1.
    pub fn new() -> Self {
        Self::with_books(Vec::new())
    }

    /// Create a store holding `books`, with the id counter set one past
    /// the highest id present.
    pub fn with_books(books: Vec<Book>) -> Self {
        let next_id = books.iter().map(|b| b.id).max().unwrap_or(0) + 1;
        Self {
            state: RwLock::new(CatalogState { books, next_id }),
        }
    }

    /// Create a store holding the fixed startup records.
    pub fn seeded() -> Self {
        Self::with_books(seed_books())
    }

    /// List books in insertion order, keeping only those matching `filter`.
    pub fn list(&self, filter: &BookFilter) -> CatalogResult<Vec<Book>> {
        let state = self.read()?;
        Ok(state
            .books
            .iter()
            .filter(|b| filter.matches(b))
            .cloned()
            .collect())
    }

    /// Fetch a single book by id.
    pub fn get(&self, id: u64) -> CatalogResult<Book> {
        let state = self.read()?;
        state
            .books
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or(CatalogError::NotFound)
    }

    /// Add a new book, assigning the next id.
    ///
    /// Validation runs before the counter moves, so a rejected create
    /// consumes no id and leaves the collection untouched.
    pub fn create(&self, new: NewBook) -> CatalogResult<Book> {
        if new.title.is_empty() || new.author.is_empty() {
            return Err(CatalogError::validation("Missing 'title' or 'author'"));
        }

        let mut state = self.write()?;
        let book = Book {
            id: state.next_id,
            title: new.title,
            author: new.author,
            year: new.year,
            isbn: new.isbn,
        };
        state.next_id += 1;
        state.books.push(book.clone());

        debug!(id = book.id, "book created");
        Ok(book)
    }

    /// Apply a sparse patch to the book with `id` and return the result.
    ///
    /// Fails with `NotFound` before any field is written, so a miss leaves
    /// the collection unchanged.
    pub fn update(&self, id: u64, patch: BookPatch) -> CatalogResult<Book> {
        let mut state = self.write()?;
        let book = state
            .books
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(CatalogError::NotFound)?;
        patch.apply_to(book);

        debug!(id, "book updated");
        Ok(book.clone())
    }

    /// Remove the book with `id`. The id is never handed out again.
    pub fn delete(&self, id: u64) -> CatalogResult<()> {
        let mut state = self.write()?;
        let idx = state
            .books
            .iter()
            .position(|b| b.id == id)
            .ok_or(CatalogError::NotFound)?;
        state.books.remove(idx);

        debug!(id, "book deleted");
        Ok(())
    }

    /// Number of books currently held.
    pub fn len(&self) -> CatalogResult<usize> {
        Ok(self.read()?.books.len())
    }

    /// True when the collection holds no books.
    pub fn is_empty(&self) -> CatalogResult<bool> {
        Ok(self.read()?.books.is_empty())
    }

    fn read(&self) -> CatalogResult<RwLockReadGuard<'_, CatalogState>> {
        self.state
            .read()
            .map_err(|_| CatalogError::Internal("Lock poisoned".to_string()))
    }

    fn write(&self) -> CatalogResult<RwLockWriteGuard<'_, CatalogState>> {
        self.state
            .write()
            .map_err(|_| CatalogError::Internal("Lock poisoned".to_string()))
    }
}

impl Default for BookStore {
    fn default() -> Self {
        Self::new()
    }
}

/// The fixed records present at process start.
pub fn seed_books() -> Vec<Book> {
    vec![
        Book {
            id: 1,
            title: "Pride and Prejudice".to_string(),
            author: "Jane Austen".to_string(),
            year: Some(1813),
            isbn: Some("1111111111".to_string()),
        },
        Book {
            id: 2,
            title: "1984".to_string(),
            author: "George Orwell".to_string(),
            year: Some(1949),
            isbn: Some("2222222222".to_string()),
        },
    ]
}
