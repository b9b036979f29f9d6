//! Book model

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::FromRow;
use validator::Validate;

/// Book record as stored
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub genre: Option<String>,
    /// Publication year
    pub year: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw form submission for the new/update pages.
///
/// Every field is kept as submitted so a rejected form can be re-rendered verbatim.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct BookForm {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub year: String,
}

/// Validated values ready to be persisted (create or full replace)
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct BookInput {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    pub genre: Option<String>,
    pub year: Option<i32>,
}

/// A message attached to one form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

const FIELD_ORDER: [&str; 4] = ["title", "author", "genre", "year"];

fn blank_to_none(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl BookForm {
    /// Trim, convert and validate the submission.
    ///
    /// Errors are returned in form order (title, author, year).
    pub fn validate(&self) -> Result<BookInput, Vec<FieldError>> {
        let mut errors = Vec::new();

        let year = match blank_to_none(&self.year) {
            None => None,
            Some(raw) => match raw.parse::<i32>() {
                Ok(year) => Some(year),
                Err(_) => {
                    errors.push(FieldError::new("year", "Year must be a whole number"));
                    None
                }
            },
        };

        let input = BookInput {
            title: self.title.trim().to_string(),
            author: self.author.trim().to_string(),
            genre: blank_to_none(&self.genre),
            year,
        };

        if let Err(validation) = input.validate() {
            for (field, field_errors) in validation.field_errors() {
                for error in field_errors.iter() {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", field));
                    errors.push(FieldError::new(field.to_string(), message));
                }
            }
        }

        if errors.is_empty() {
            return Ok(input);
        }

        errors.sort_by_key(|e| {
            FIELD_ORDER
                .iter()
                .position(|f| *f == e.field)
                .unwrap_or(FIELD_ORDER.len())
        });
        Err(errors)
    }
}

impl From<&Book> for BookForm {
    fn from(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            genre: book.genre.clone().unwrap_or_default(),
            year: book.year.map(|y| y.to_string()).unwrap_or_default(),
        }
    }
}
