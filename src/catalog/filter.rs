//! # List filters
//!
//! Substring filters applied by the list operation. Matching is
//! case-insensitive and the two fields compose with logical AND.

use super::book::Book;

/// Case-insensitive substring filter over the collection.
///
/// An unset field matches every book; empty strings are normalized to
/// unset at construction, so `?author=` behaves like no filter at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFilter {
    author: Option<String>,
    title: Option<String>,
}

impl BookFilter {
    /// Build a filter, treating empty strings as unset.
    pub fn new(author: Option<String>, title: Option<String>) -> Self {
        Self {
            author: author.filter(|s| !s.is_empty()),
            title: title.filter(|s| !s.is_empty()),
        }
    }

    /// The filter that matches every book.
    pub fn all() -> Self {
        Self::default()
    }

    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.author.is_none() && self.title.is_none()
    }

    /// Check whether a book passes this filter.
    pub fn matches(&self, book: &Book) -> bool {
        let author_ok = self
            .author
            .as_deref()
            .map_or(true, |needle| contains_ignore_case(&book.author, needle));
        let title_ok = self
            .title
            .as_deref()
            .map_or(true, |needle| contains_ignore_case(&book.title, needle));

        author_ok && title_ok
    }
}

/// Case-insensitive substring test.
fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
