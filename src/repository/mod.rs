//! Repository layer: the record store behind every handler

pub mod books;
pub mod memory;

use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{Book, BookInput, BookPredicate},
};

pub use books::BooksRepository;
pub use memory::MemoryBookStore;

/// Options for `BookStore::find_all`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FindQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub filter: Option<BookPredicate>,
}

impl FindQuery {
    pub fn page(limit: i64, offset: i64) -> Self {
        Self {
            limit: Some(limit),
            offset: Some(offset),
            filter: None,
        }
    }

    pub fn filtered(filter: BookPredicate) -> Self {
        Self {
            filter: Some(filter),
            ..Self::default()
        }
    }
}

/// Persistence contract for book records.
///
/// Results are ordered by ascending id. `update` replaces all editable fields.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    async fn count(&self, filter: Option<BookPredicate>) -> AppResult<i64>;

    async fn find_all(&self, query: FindQuery) -> AppResult<Vec<Book>>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Book>>;

    async fn create(&self, input: BookInput) -> AppResult<Book>;

    /// Returns `None` when no record has this id
    async fn update(&self, id: i32, input: BookInput) -> AppResult<Option<Book>>;

    /// Returns whether a record was removed
    async fn destroy(&self, id: i32) -> AppResult<bool>;

    /// Check the store is reachable
    async fn ping(&self) -> AppResult<()>;
}

/// Shared handle injected into services
pub type SharedStore = Arc<dyn BookStore>;
