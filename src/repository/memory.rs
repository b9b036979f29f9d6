//! In-process book store.
//!
//! Backs the `memory` storage backend and the router tests. Ids are assigned
//! from a counter and never reused after a delete.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use super::{BookStore, FindQuery};
use crate::{
    error::AppResult,
    models::{Book, BookInput, BookPredicate},
};

#[derive(Default)]
struct Inner {
    books: BTreeMap<i32, Book>,
    last_id: i32,
}

#[derive(Default)]
pub struct MemoryBookStore {
    inner: RwLock<Inner>,
}

impl MemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store, assigning ids in order
    pub async fn with_books(inputs: impl IntoIterator<Item = BookInput>) -> AppResult<Self> {
        let store = Self::new();
        for input in inputs {
            store.create(input).await?;
        }
        Ok(store)
    }
}

fn keep(filter: &Option<BookPredicate>, book: &Book) -> bool {
    filter.as_ref().map_or(true, |p| p.matches(book))
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn count(&self, filter: Option<BookPredicate>) -> AppResult<i64> {
        let inner = self.inner.read().await;
        Ok(inner.books.values().filter(|b| keep(&filter, b)).count() as i64)
    }

    async fn find_all(&self, query: FindQuery) -> AppResult<Vec<Book>> {
        let inner = self.inner.read().await;
        let offset = query.offset.unwrap_or(0).max(0) as usize;
        let limit = query.limit.map_or(usize::MAX, |l| l.max(0) as usize);

        Ok(inner
            .books
            .values()
            .filter(|b| keep(&query.filter, b))
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        Ok(self.inner.read().await.books.get(&id).cloned())
    }

    async fn create(&self, input: BookInput) -> AppResult<Book> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let now = Utc::now();
        let book = Book {
            id: inner.last_id,
            title: input.title,
            author: input.author,
            genre: input.genre,
            year: input.year,
            created_at: now,
            updated_at: now,
        };
        inner.books.insert(book.id, book.clone());
        Ok(book)
    }

    async fn update(&self, id: i32, input: BookInput) -> AppResult<Option<Book>> {
        let mut inner = self.inner.write().await;
        Ok(inner.books.get_mut(&id).map(|book| {
            book.title = input.title;
            book.author = input.author;
            book.genre = input.genre;
            book.year = input.year;
            book.updated_at = Utc::now();
            book.clone()
        }))
    }

    async fn destroy(&self, id: i32) -> AppResult<bool> {
        Ok(self.inner.write().await.books.remove(&id).is_some())
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
