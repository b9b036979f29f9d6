//! Data models for the book catalog

pub mod book;
pub mod pagination;
pub mod search;

// Re-export commonly used types
pub use book::{Book, BookForm, BookInput, FieldError};
pub use pagination::{paginate, PageParams, Pagination};
pub use search::{BookPredicate, SearchCategory, SearchParams};
