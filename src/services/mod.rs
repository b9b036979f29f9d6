//! Business logic services

pub mod books;
pub mod search;

use crate::{config::CatalogConfig, repository::SharedStore};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub books: books::BookService,
    pub search: search::SearchService,
    store: SharedStore,
}

impl Services {
    /// Create all services around one injected store
    pub fn new(store: SharedStore, catalog: &CatalogConfig) -> Self {
        Self {
            books: books::BookService::new(store.clone(), catalog.page_size),
            search: search::SearchService::new(store.clone(), catalog.search_strategy),
            store,
        }
    }

    /// Readiness probe against the store
    pub async fn ping(&self) -> crate::error::AppResult<()> {
        self.store.ping().await
    }
}
