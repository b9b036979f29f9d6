//! Search categories and record predicates

use serde::Deserialize;
use std::{fmt, str::FromStr};

use super::book::Book;

/// The field a search targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchCategory {
    Title,
    Author,
    Genre,
    Year,
}

impl SearchCategory {
    pub const ALL: [SearchCategory; 4] = [
        SearchCategory::Title,
        SearchCategory::Author,
        SearchCategory::Genre,
        SearchCategory::Year,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchCategory::Title => "title",
            SearchCategory::Author => "author",
            SearchCategory::Genre => "genre",
            SearchCategory::Year => "year",
        }
    }

    /// Build the predicate for a (trimmed, non-blank) query.
    ///
    /// Returns `None` when the query cannot match anything in this category,
    /// i.e. a non-numeric year.
    pub fn predicate(&self, query: &str) -> Option<BookPredicate> {
        let needle = query.to_lowercase();
        match self {
            SearchCategory::Title => Some(BookPredicate::TitleContains(needle)),
            SearchCategory::Author => Some(BookPredicate::AuthorContains(needle)),
            SearchCategory::Genre => Some(BookPredicate::GenreContains(needle)),
            SearchCategory::Year => query.parse::<i32>().ok().map(BookPredicate::YearEquals),
        }
    }
}

impl fmt::Display for SearchCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl FromStr for SearchCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "title" => Ok(SearchCategory::Title),
            "author" => Ok(SearchCategory::Author),
            "genre" => Ok(SearchCategory::Genre),
            "year" => Ok(SearchCategory::Year),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}

/// Filter a store can evaluate. Text needles are already lower-cased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookPredicate {
    TitleContains(String),
    AuthorContains(String),
    GenreContains(String),
    YearEquals(i32),
}

impl BookPredicate {
    /// In-process evaluation; must agree with the SQL rendition in the
    /// PostgreSQL repository.
    ///
    /// Only the targeted field is checked: a book without a genre is skipped by
    /// genre searches but still matches on title, author or year. (The Express
    /// catalog this replaces dropped genre-less books from every search.)
    pub fn matches(&self, book: &Book) -> bool {
        match self {
            BookPredicate::TitleContains(needle) => contains(Some(&book.title), needle),
            BookPredicate::AuthorContains(needle) => contains(Some(&book.author), needle),
            BookPredicate::GenreContains(needle) => contains(book.genre.as_ref(), needle),
            BookPredicate::YearEquals(year) => book.year == Some(*year),
        }
    }
}

fn contains(field: Option<&String>, needle: &str) -> bool {
    match field {
        Some(value) if !value.is_empty() => value.to_lowercase().contains(needle),
        _ => false,
    }
}

/// Query string of `GET /search`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    pub category: Option<String>,
    pub search: Option<String>,
}
