//! Search/filter engine

use crate::{
    config::SearchStrategy,
    error::{AppError, AppResult},
    models::{Book, SearchCategory, SearchParams},
    repository::{FindQuery, SharedStore},
};

/// Result of a search request
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// The query was empty or whitespace; no data was consulted
    BlankQuery,
    /// Matching records, possibly none
    Results(Vec<Book>),
}

impl SearchOutcome {
    pub fn books(&self) -> &[Book] {
        match self {
            SearchOutcome::BlankQuery => &[],
            SearchOutcome::Results(books) => books,
        }
    }
}

#[derive(Clone)]
pub struct SearchService {
    store: SharedStore,
    strategy: SearchStrategy,
}

impl SearchService {
    pub fn new(store: SharedStore, strategy: SearchStrategy) -> Self {
        Self { store, strategy }
    }

    /// Run a search from raw query-string parameters.
    ///
    /// Blank query wins over a bad category: both are checked before the
    /// store is touched.
    pub async fn search(&self, params: &SearchParams) -> AppResult<SearchOutcome> {
        let query = params.search.as_deref().unwrap_or("").trim();
        if query.is_empty() {
            return Ok(SearchOutcome::BlankQuery);
        }

        let category = match params.category.as_deref() {
            None => return Err(AppError::BadRequest("Missing search category".to_string())),
            Some(raw) => raw.parse::<SearchCategory>().map_err(|e| {
                AppError::BadRequest(format!(
                    "Unknown search category '{}'; expected one of title, author, genre, year",
                    e.0
                ))
            })?,
        };

        let books = self.search_category(category, query).await?;
        tracing::debug!(
            "Search {}={:?} matched {} book(s)",
            category,
            query,
            books.len()
        );
        Ok(SearchOutcome::Results(books))
    }

    /// Match `query` (trimmed, non-blank) against one category
    pub async fn search_category(
        &self,
        category: SearchCategory,
        query: &str,
    ) -> AppResult<Vec<Book>> {
        let Some(predicate) = category.predicate(query) else {
            return Ok(Vec::new());
        };

        match self.strategy {
            SearchStrategy::Database => self.store.find_all(FindQuery::filtered(predicate)).await,
            SearchStrategy::Memory => {
                let all = self.store.find_all(FindQuery::default()).await?;
                Ok(all.into_iter().filter(|b| predicate.matches(b)).collect())
            }
        }
    }
}
