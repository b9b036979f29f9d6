//! PostgreSQL-backed book repository

use async_trait::async_trait;
use sqlx::{Pool, Postgres, QueryBuilder};

use super::{BookStore, FindQuery};
use crate::{
    error::{AppError, AppResult},
    models::{Book, BookInput, BookPredicate, FieldError},
};

const BOOK_COLUMNS: &str = "id, title, author, genre, year, created_at, updated_at";

/// Escape LIKE metacharacters and wrap the needle for substring matching
fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn push_predicate(builder: &mut QueryBuilder<'_, Postgres>, predicate: &BookPredicate) {
    let (column, needle) = match predicate {
        BookPredicate::YearEquals(year) => {
            builder.push(" WHERE year = ").push_bind(*year);
            return;
        }
        BookPredicate::TitleContains(n) => ("title", n),
        BookPredicate::AuthorContains(n) => ("author", n),
        BookPredicate::GenreContains(n) => ("genre", n),
    };
    builder
        .push(format!(" WHERE LOWER({}) LIKE ", column))
        .push_bind(like_pattern(needle))
        .push(" ESCAPE '\\'");
}

/// Map constraint violations raised by the `books` table to field errors
fn map_write_error(err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(ref db_err) = err {
        match db_err.constraint() {
            Some("books_title_not_blank") => {
                return AppError::Validation(vec![FieldError::new("title", "Title is required")])
            }
            Some("books_author_not_blank") => {
                return AppError::Validation(vec![FieldError::new("author", "Author is required")])
            }
            _ => {}
        }
    }
    AppError::Database(err)
}

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStore for BooksRepository {
    async fn count(&self, filter: Option<BookPredicate>) -> AppResult<i64> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM books");
        if let Some(ref predicate) = filter {
            push_predicate(&mut builder, predicate);
        }
        let count: i64 = builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn find_all(&self, query: FindQuery) -> AppResult<Vec<Book>> {
        let mut builder =
            QueryBuilder::<Postgres>::new(format!("SELECT {} FROM books", BOOK_COLUMNS));
        if let Some(ref predicate) = query.filter {
            push_predicate(&mut builder, predicate);
        }
        builder.push(" ORDER BY id");
        if let Some(limit) = query.limit {
            builder.push(" LIMIT ").push_bind(limit);
        }
        if let Some(offset) = query.offset {
            builder.push(" OFFSET ").push_bind(offset);
        }

        let rows = builder
            .build_query_as::<Book>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        let row = sqlx::query_as::<_, Book>(&format!(
            "SELECT {} FROM books WHERE id = $1",
            BOOK_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn create(&self, input: BookInput) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(&format!(
            r#"
            INSERT INTO books (title, author, genre, year)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            BOOK_COLUMNS
        ))
        .bind(&input.title)
        .bind(&input.author)
        .bind(&input.genre)
        .bind(input.year)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)
    }

    async fn update(&self, id: i32, input: BookInput) -> AppResult<Option<Book>> {
        sqlx::query_as::<_, Book>(&format!(
            r#"
            UPDATE books
            SET title = $1, author = $2, genre = $3, year = $4, updated_at = NOW()
            WHERE id = $5
            RETURNING {}
            "#,
            BOOK_COLUMNS
        ))
        .bind(&input.title)
        .bind(&input.author)
        .bind(&input.genre)
        .bind(input.year)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_error)
    }

    async fn destroy(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
