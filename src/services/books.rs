//! Book CRUD service

use crate::{
    error::{AppError, AppResult},
    models::{paginate, Book, BookForm, Pagination},
    repository::{FindQuery, SharedStore},
};

#[derive(Clone)]
pub struct BookService {
    store: SharedStore,
    page_size: i64,
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Book {} was not found", id))
}

impl BookService {
    pub fn new(store: SharedStore, page_size: i64) -> Self {
        Self {
            store,
            page_size: page_size.max(1),
        }
    }

    /// Fetch one listing page
    pub async fn list_page(&self, page: Option<i64>) -> AppResult<(Vec<Book>, Pagination)> {
        let total = self.store.count(None).await?;
        let pagination = paginate(page, self.page_size, total);
        let books = self
            .store
            .find_all(FindQuery::page(pagination.limit, pagination.offset))
            .await?;
        Ok((books, pagination))
    }

    pub async fn get(&self, id: i32) -> AppResult<Book> {
        self.store.find_by_id(id).await?.ok_or_else(|| not_found(id))
    }

    /// Validate and persist a new book.
    ///
    /// Nothing is written when the form is rejected.
    pub async fn create(&self, form: &BookForm) -> AppResult<Book> {
        let input = form.validate().map_err(|errors| {
            tracing::debug!("Rejected new book: {} field error(s)", errors.len());
            AppError::Validation(errors)
        })?;
        let book = self.store.create(input).await?;
        tracing::info!("Created book id={} title={:?}", book.id, book.title);
        Ok(book)
    }

    /// Replace all editable fields of an existing book
    pub async fn update(&self, id: i32, form: &BookForm) -> AppResult<Book> {
        self.get(id).await?;
        let input = form.validate().map_err(|errors| {
            tracing::debug!("Rejected update of book {}: {} field error(s)", id, errors.len());
            AppError::Validation(errors)
        })?;
        // Deleted between the lookup and the write
        let book = self.store.update(id, input).await?.ok_or_else(|| not_found(id))?;
        tracing::info!("Updated book id={}", id);
        Ok(book)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.get(id).await?;
        if !self.store.destroy(id).await? {
            return Err(not_found(id));
        }
        tracing::info!("Deleted book id={}", id);
        Ok(())
    }
}
