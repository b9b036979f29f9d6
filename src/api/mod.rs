//! HTTP routes for the catalog pages

pub mod books;
pub mod health;

use axum::{
    extract::{Request, State},
    middleware::{self, Next},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::{
    error::{AppError, ErrorPage},
    views, AppState,
};

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Unsupported methods on known paths get the same 404 page as unknown paths
        .route("/", get(books::list_books).fallback(not_found))
        .route("/search", get(books::search_books).fallback(not_found))
        .route(
            "/new",
            get(books::new_book_form)
                .post(books::create_book)
                .fallback(not_found),
        )
        .route("/favicon.ico", get(books::favicon).fallback(not_found))
        .route("/health", get(health::health_check).fallback(not_found))
        .route("/ready", get(health::readiness_check).fallback(not_found))
        .route(
            "/:id",
            get(books::edit_book_form)
                .post(books::update_book)
                .fallback(not_found),
        )
        .route("/:id/delete", post(books::delete_book).fallback(not_found))
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(state.clone(), render_error_pages))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found() -> AppError {
    AppError::NotFound("Page not found".to_string())
}

/// Turn error responses produced by `AppError` into the HTML error page
async fn render_error_pages(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;
    let Some(page) = response.extensions().get::<ErrorPage>().cloned() else {
        return response;
    };

    let detail = page
        .detail
        .as_deref()
        .filter(|_| state.config.exposes_error_details());
    let body = views::error_page(page.status.as_u16(), &page.message, detail);
    (page.status, Html(body)).into_response()
}
