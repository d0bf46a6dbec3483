//! # Book record types
//!
//! The stored record plus the two request payload shapes: `NewBook` for
//! create and `BookPatch` for sparse updates. Required vs. optional fields
//! are enforced by the (de)serialization schema, so malformed input never
//! reaches the store.

use serde::{Deserialize, Deserializer, Serialize};

/// One record in the catalog.
///
/// `id` is store-assigned and immutable; `year` and `isbn` serialize as
/// `null` when unset so every response carries all five keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Unique, monotonically assigned identifier
    pub id: u64,
    /// Title, required on create
    pub title: String,
    /// Author, required on create
    pub author: String,
    /// Publication year
    pub year: Option<i32>,
    /// ISBN string
    pub isbn: Option<String>,
}

/// Create payload: `title` and `author` are required by the schema,
/// `year` and `isbn` may be omitted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub isbn: Option<String>,
}

/// Sparse update payload: every field is optional and only present fields
/// are applied.
///
/// For the clearable fields (`year`, `isbn`) the outer `Option` records
/// whether the key was present and the inner one holds the new value, so
/// an explicit `null` clears the stored value while an absent key leaves
/// it untouched. `title`/`author` cannot be cleared; for those a `null`
/// body value is indistinguishable from an absent key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BookPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub year: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub isbn: Option<Option<String>>,
}

impl BookPatch {
    /// Merge this patch into `book`, sparse-patch style: present keys
    /// overwrite the stored value (empty strings included), absent keys
    /// change nothing. `id` is never touched.
    pub fn apply_to(self, book: &mut Book) {
        if let Some(title) = self.title {
            book.title = title;
        }
        if let Some(author) = self.author {
            book.author = author;
        }
        if let Some(year) = self.year {
            book.year = year;
        }
        if let Some(isbn) = self.isbn {
            book.isbn = isbn;
        }
    }

    /// True when no field is present.
    pub fn is_noop(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.year.is_none() && self.isbn.is_none()
    }
}

/// Distinguishes an absent key from an explicit `null`.
///
/// Serde only calls this when the key is present, so the outer `Option`
/// is always `Some`; the field default covers the absent case.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
