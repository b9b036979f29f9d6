//! Book page handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};

use crate::{
    error::{AppError, AppResult},
    models::{BookForm, PageParams, SearchParams},
    services::search::SearchOutcome,
    views::{self, FormKind},
    AppState,
};

/// Non-numeric ids cannot match a record
fn parse_id(raw: &str) -> AppResult<i32> {
    raw.parse::<i32>()
        .map_err(|_| AppError::NotFound(format!("Book {} was not found", raw)))
}

/// `GET /` - paginated listing
pub async fn list_books(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> AppResult<Html<String>> {
    let (books, pagination) = state.services.books.list_page(params.page()).await?;
    Ok(Html(views::book_list("Books", &books, Some(&pagination))))
}

/// `GET /search?category=&search=`
pub async fn search_books(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Html<String>> {
    let page = match state.services.search.search(&params).await? {
        SearchOutcome::Results(books) if !books.is_empty() => {
            views::book_list("Results", &books, None)
        }
        _ => views::no_results(),
    };
    Ok(Html(page))
}

/// `GET /new`
pub async fn new_book_form() -> Html<String> {
    Html(views::book_form(FormKind::New, &BookForm::default(), &[]))
}

/// `POST /new`
pub async fn create_book(
    State(state): State<AppState>,
    Form(form): Form<BookForm>,
) -> AppResult<Response> {
    match state.services.books.create(&form).await {
        Ok(_) => Ok(Redirect::to("/").into_response()),
        Err(AppError::Validation(errors)) => Ok((
            StatusCode::BAD_REQUEST,
            Html(views::book_form(FormKind::New, &form, &errors)),
        )
            .into_response()),
        Err(e) => Err(e),
    }
}

/// `GET /:id` - edit form
pub async fn edit_book_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let id = parse_id(&id)?;
    let book = state.services.books.get(id).await?;
    Ok(Html(views::book_form(
        FormKind::Update(book.id),
        &BookForm::from(&book),
        &[],
    )))
}

/// `POST /:id`
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<BookForm>,
) -> AppResult<Response> {
    let id = parse_id(&id)?;
    match state.services.books.update(id, &form).await {
        Ok(_) => Ok(Redirect::to("/").into_response()),
        Err(AppError::Validation(errors)) => Ok((
            StatusCode::BAD_REQUEST,
            Html(views::book_form(FormKind::Update(id), &form, &errors)),
        )
            .into_response()),
        Err(e) => Err(e),
    }
}

/// `POST /:id/delete` - bare 404 when the book does not exist
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let Ok(id) = id.parse::<i32>() else {
        return Ok(StatusCode::NOT_FOUND.into_response());
    };
    match state.services.books.delete(id).await {
        Ok(()) => Ok(Redirect::to("/").into_response()),
        Err(AppError::NotFound(_)) => Ok(StatusCode::NOT_FOUND.into_response()),
        Err(e) => Err(e),
    }
}

/// `GET /favicon.ico`
pub async fn favicon() -> StatusCode {
    StatusCode::NO_CONTENT
}
