//! API integration tests

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use book_catalog::{
    api::create_router,
    config::{AppConfig, RunMode, SearchStrategy},
    models::{Book, BookInput, BookPredicate},
    repository::{BookStore, FindQuery, MemoryBookStore},
    AppError, AppResult, AppState,
};

fn input(title: &str, author: &str, genre: Option<&str>, year: Option<i32>) -> BookInput {
    BookInput {
        title: title.to_string(),
        author: author.to_string(),
        genre: genre.map(String::from),
        year,
    }
}

async fn setup(books: Vec<BookInput>) -> (Router, Arc<MemoryBookStore>) {
    let store = Arc::new(MemoryBookStore::with_books(books).await.unwrap());
    let app = create_router(AppState::new(AppConfig::default(), store.clone()));
    (app, store)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    read(response).await
}

async fn post_form(app: &Router, uri: &str, form: &str) -> (StatusCode, Option<String>, String) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_string());
    let (status, body) = read(response).await;
    (status, location, body)
}

async fn read(response: axum::response::Response) -> (StatusCode, String) {
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn row_count(html: &str) -> usize {
    html.matches("<tr><td>").count()
}

#[tokio::test]
async fn test_list_empty_catalog() {
    let (app, _) = setup(vec![]).await;
    let (status, body) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<h1>Books</h1>"));
    assert_eq!(row_count(&body), 0);
}

#[tokio::test]
async fn test_list_paginates() {
    let books = (1..=25)
        .map(|i| input(&format!("Book {:02}", i), "Author", None, None))
        .collect();
    let (app, _) = setup(books).await;

    let (_, first) = get(&app, "/").await;
    assert_eq!(row_count(&first), 10);
    assert!(first.contains("Book 01"));

    let (_, third) = get(&app, "/?page=3").await;
    assert_eq!(row_count(&third), 5);
    assert!(third.contains("Book 21"));
    assert!(!third.contains("Book 20"));

    let (status, past_end) = get(&app, "/?page=9").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(row_count(&past_end), 0);

    let (_, bogus) = get(&app, "/?page=zero").await;
    assert!(bogus.contains("Book 01"));
}

#[tokio::test]
async fn test_create_book_redirects_and_persists() {
    let (app, store) = setup(vec![]).await;

    let (status, location, _) = post_form(&app, "/new", "title=Dune&author=Herbert").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/"));
    assert_eq!(store.count(None).await.unwrap(), 1);

    let book = store.find_by_id(1).await.unwrap().unwrap();
    assert_eq!(book.title, "Dune");
    assert_eq!(book.author, "Herbert");
    assert_eq!(book.genre, None);
    assert_eq!(book.year, None);
}

#[tokio::test]
async fn test_create_with_blank_title_rerenders_form() {
    let (app, store) = setup(vec![]).await;

    let (status, _, body) =
        post_form(&app, "/new", "title=++&author=Herbert&genre=SF&year=1965").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Title is required"));
    assert!(body.contains(r#"value="Herbert""#));
    assert!(body.contains(r#"value="1965""#));
    assert_eq!(store.count(None).await.unwrap(), 0);
}

#[tokio::test]
async fn test_new_form_renders() {
    let (app, _) = setup(vec![]).await;
    let (status, body) = get(&app, "/new").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"action="/new""#));
}

#[tokio::test]
async fn test_edit_form() {
    let (app, _) = setup(vec![input("Emma", "Jane Austen", Some("Novel"), Some(1815))]).await;

    let (status, body) = get(&app, "/1").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Update Book"));
    assert!(body.contains(r#"value="Jane Austen""#));

    let (status, body) = get(&app, "/99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Book 99 was not found"));

    let (status, _) = get(&app, "/not-a-number").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_book() {
    let (app, store) = setup(vec![input("Emma", "Austen", Some("Novel"), Some(1815))]).await;

    let (status, location, _) =
        post_form(&app, "/1", "title=Persuasion&author=Jane+Austen&genre=&year=1817").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/"));

    let book = store.find_by_id(1).await.unwrap().unwrap();
    assert_eq!(book.title, "Persuasion");
    assert_eq!(book.author, "Jane Austen");
    assert_eq!(book.genre, None);
    assert_eq!(book.year, Some(1817));
}

#[tokio::test]
async fn test_update_with_blank_author_is_rejected() {
    let (app, store) = setup(vec![input("Emma", "Austen", None, None)]).await;

    let (status, _, body) = post_form(&app, "/1", "title=Emma+II&author=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Author is required"));
    assert!(body.contains(r#"value="Emma II""#));

    let book = store.find_by_id(1).await.unwrap().unwrap();
    assert_eq!(book.title, "Emma");
}

#[tokio::test]
async fn test_update_missing_book_is_not_found() {
    let (app, store) = setup(vec![input("Emma", "Austen", None, None)]).await;

    let (status, _, _) = post_form(&app, "/42", "title=X&author=Y").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(store.count(None).await.unwrap(), 1);
    assert_eq!(store.find_by_id(1).await.unwrap().unwrap().title, "Emma");
}

#[tokio::test]
async fn test_delete_book() {
    let (app, store) = setup(vec![
        input("Emma", "Austen", None, None),
        input("Dune", "Herbert", None, None),
    ])
    .await;

    let (status, location, _) = post_form(&app, "/1/delete", "").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/"));
    assert_eq!(store.count(None).await.unwrap(), 1);
    assert!(store.find_by_id(1).await.unwrap().is_none());

    let (status, _, body) = post_form(&app, "/1/delete", "").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());
    assert_eq!(store.count(None).await.unwrap(), 1);
}

#[tokio::test]
async fn test_search() {
    let (app, _) = setup(vec![
        input("Dune", "Frank Herbert", Some("Science Fiction"), Some(1965)),
        input("Emma", "Jane Austen", None, Some(1815)),
    ])
    .await;

    let (status, body) = get(&app, "/search?category=title&search=DUN").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<h1>Results</h1>"));
    assert!(body.contains("Dune"));
    assert!(!body.contains("Emma"));

    let (_, body) = get(&app, "/search?category=year&search=1815").await;
    assert!(body.contains("Emma"));

    let (status, body) = get(&app, "/search?category=year&search=eighteen").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No results were found."));

    let (_, body) = get(&app, "/search?category=genre&search=poetry").await;
    assert!(body.contains("No results were found."));
}

#[tokio::test]
async fn test_search_blank_and_bad_parameters() {
    let (app, _) = setup(vec![input("Dune", "Herbert", None, None)]).await;

    let (status, body) = get(&app, "/search?category=title&search=+++").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No results were found."));

    let (status, body) = get(&app, "/search?search=dune").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Missing search category");

    let (status, _) = get(&app, "/search?category=isbn&search=dune").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_in_memory_strategy() {
    let store = Arc::new(
        MemoryBookStore::with_books(vec![input("Dune", "Frank Herbert", None, None)])
            .await
            .unwrap(),
    );
    let mut config = AppConfig::default();
    config.catalog.search_strategy = SearchStrategy::Memory;
    let app = create_router(AppState::new(config, store));

    let (_, body) = get(&app, "/search?category=author&search=herbert").await;
    assert!(body.contains("Dune"));
}

#[tokio::test]
async fn test_favicon_and_unknown_routes() {
    let (app, _) = setup(vec![]).await;

    let (status, body) = get(&app, "/favicon.ico").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());

    let (status, body) = get(&app, "/no/such/page").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("<!DOCTYPE html>"));
    assert!(body.contains("Page not found"));
}

async fn request(app: &Router, method: &str, uri: &str) -> (StatusCode, String) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    read(response).await
}

#[tokio::test]
async fn test_wrong_method_renders_not_found_page() {
    let (app, store) = setup(vec![input("Emma", "Austen", None, None)]).await;

    for (method, uri) in [
        ("GET", "/1/delete"),
        ("DELETE", "/1"),
        ("PUT", "/"),
        ("POST", "/search"),
        ("DELETE", "/new"),
    ] {
        let (status, body) = request(&app, method, uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{} {}", method, uri);
        assert!(body.contains("<!DOCTYPE html>"), "{} {}", method, uri);
        assert!(body.contains("Page not found"), "{} {}", method, uri);
    }
    assert_eq!(store.count(None).await.unwrap(), 1);
}

#[tokio::test]
async fn test_health() {
    let (app, _) = setup(vec![]).await;
    let (status, body) = get(&app, "/ready").await;
    assert_eq!(status, StatusCode::OK);

    let body: Value = serde_json::from_str(&body).expect("Failed to parse response");
    assert_eq!(body["status"], "ready");
}

/// Store whose every call fails
struct BrokenStore;

#[async_trait]
impl BookStore for BrokenStore {
    async fn count(&self, _: Option<BookPredicate>) -> AppResult<i64> {
        Err(AppError::Internal("connection reset by peer".into()))
    }
    async fn find_all(&self, _: FindQuery) -> AppResult<Vec<Book>> {
        Err(AppError::Internal("connection reset by peer".into()))
    }
    async fn find_by_id(&self, _: i32) -> AppResult<Option<Book>> {
        Err(AppError::Internal("connection reset by peer".into()))
    }
    async fn create(&self, _: BookInput) -> AppResult<Book> {
        Err(AppError::Internal("connection reset by peer".into()))
    }
    async fn update(&self, _: i32, _: BookInput) -> AppResult<Option<Book>> {
        Err(AppError::Internal("connection reset by peer".into()))
    }
    async fn destroy(&self, _: i32) -> AppResult<bool> {
        Err(AppError::Internal("connection reset by peer".into()))
    }
    async fn ping(&self) -> AppResult<()> {
        Err(AppError::Internal("connection reset by peer".into()))
    }
}

#[tokio::test]
async fn test_store_failure_renders_error_page() {
    let app = create_router(AppState::new(AppConfig::default(), Arc::new(BrokenStore)));
    let (status, body) = get(&app, "/").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("Something went wrong"));
    assert!(body.contains("connection reset by peer"));

    let (status, _, _) = post_form(&app, "/1/delete", "").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, _) = get(&app, "/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_production_hides_error_details() {
    let mut config = AppConfig::default();
    config.server.environment = RunMode::Production;
    let app = create_router(AppState::new(config, Arc::new(BrokenStore)));

    let (status, body) = get(&app, "/").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("Something went wrong"));
    assert!(!body.contains("connection reset by peer"));
}
