//! Server-rendered HTML pages

use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

use crate::models::{Book, BookForm, FieldError, Pagination};

/// Wrap page content in the shared document shell
pub fn layout(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
</head>
<body>
<header><a href="/">Books</a></header>
<main>
<h1>{title}</h1>
{content}
</main>
</body>
</html>
"#,
        title = text(title),
        content = content,
    )
}

fn search_form() -> String {
    let options: String = crate::models::SearchCategory::ALL
        .iter()
        .map(|c| format!(r#"<option value="{0}">{0}</option>"#, c.as_str()))
        .collect();
    format!(
        r#"<form action="/search" method="get" class="search">
<select name="category">{options}</select>
<input type="search" name="search" placeholder="Search...">
<button type="submit">Search</button>
</form>"#
    )
}

fn book_table(books: &[Book]) -> String {
    let rows: String = books
        .iter()
        .map(|b| {
            format!(
                r#"<tr><td><a href="/{id}">{title}</a></td><td>{author}</td><td>{genre}</td><td>{year}</td></tr>
"#,
                id = b.id,
                title = text(&b.title),
                author = text(&b.author),
                genre = text(b.genre.as_deref().unwrap_or("")),
                year = b.year.map(|y| y.to_string()).unwrap_or_default(),
            )
        })
        .collect();

    format!(
        r#"<table>
<thead><tr><th>Title</th><th>Author</th><th>Genre</th><th>Year</th></tr></thead>
<tbody>
{rows}</tbody>
</table>"#
    )
}

/// Page numbers shown on each side of the current page
const PAGER_RADIUS: i64 = 2;

fn page_link(page: i64, current: i64) -> String {
    if page == current {
        format!("<strong>{}</strong>", page)
    } else {
        format!(r#"<a href="/?page={0}">{0}</a>"#, page)
    }
}

/// Previous/next links plus a window of page numbers around the current page,
/// always including the first and last page
fn pager(pagination: &Pagination) -> String {
    if pagination.total_pages <= 1 {
        return String::new();
    }

    let mut links = Vec::new();
    if pagination.has_previous() {
        links.push(format!(r#"<a href="/?page={}">&laquo; Previous</a>"#, pagination.page - 1));
    }
    // Past-the-end pages still anchor the window on the last page
    let first = (pagination.page - PAGER_RADIUS)
        .max(1)
        .min(pagination.total_pages);
    let last = (pagination.page + PAGER_RADIUS).min(pagination.total_pages);
    if first > 1 {
        links.push(page_link(1, pagination.page));
        if first > 2 {
            links.push("&hellip;".to_string());
        }
    }
    for page in first..=last {
        links.push(page_link(page, pagination.page));
    }
    if last < pagination.total_pages {
        if last < pagination.total_pages - 1 {
            links.push("&hellip;".to_string());
        }
        links.push(page_link(pagination.total_pages, pagination.page));
    }
    if pagination.has_next() {
        links.push(format!(r#"<a href="/?page={}">Next &raquo;</a>"#, pagination.page + 1));
    }
    format!(r#"<nav class="pagination">{}</nav>"#, links.join(" "))
}

/// Listing page; `pagination` is absent for search results
pub fn book_list(title: &str, books: &[Book], pagination: Option<&Pagination>) -> String {
    let mut content = String::new();
    content.push_str(r#"<p><a href="/new">Create New Book</a></p>"#);
    content.push('\n');
    content.push_str(&search_form());
    content.push('\n');
    content.push_str(&book_table(books));
    if let Some(pagination) = pagination {
        content.push('\n');
        content.push_str(&pager(pagination));
    }
    layout(title, &content)
}

/// Which form is being rendered
#[derive(Debug, Clone, Copy)]
pub enum FormKind {
    New,
    Update(i32),
}

/// New/update form, pre-filled and with any field errors listed on top
pub fn book_form(kind: FormKind, form: &BookForm, errors: &[FieldError]) -> String {
    let (title, action, submit) = match kind {
        FormKind::New => ("New Book", "/new".to_string(), "Create New Book"),
        FormKind::Update(id) => ("Update Book", format!("/{}", id), "Update Book"),
    };

    let mut content = String::new();
    if !errors.is_empty() {
        content.push_str("<h2>Oops!</h2>\n<ul class=\"errors\">\n");
        for error in errors {
            content.push_str(&format!("<li>{}</li>\n", text(&error.message)));
        }
        content.push_str("</ul>\n");
    }

    content.push_str(&format!(
        r#"<form action="{action}" method="post">
<p><label for="title">Title</label><input name="title" type="text" id="title" value="{title}"></p>
<p><label for="author">Author</label><input name="author" type="text" id="author" value="{author}"></p>
<p><label for="genre">Genre</label><input name="genre" type="text" id="genre" value="{genre}"></p>
<p><label for="year">Year</label><input name="year" type="text" id="year" value="{year}"></p>
<p><input type="submit" value="{submit}"></p>
</form>
"#,
        action = attr(&action),
        title = attr(&form.title),
        author = attr(&form.author),
        genre = attr(&form.genre),
        year = attr(&form.year),
        submit = submit,
    ));

    if let FormKind::Update(id) = kind {
        content.push_str(&format!(
            r#"<form method="post" action="/{}/delete" onsubmit="return confirm('Do you really want to delete this book?');">
<p><input type="submit" value="Delete Book"></p>
</form>
"#,
            id
        ));
    }
    content.push_str(r#"<p><a class="button" href="/">Cancel</a></p>"#);

    layout(title, &content)
}

pub fn no_results() -> String {
    layout(
        "No results were found.",
        r#"<p><a href="/">Back to all books</a></p>"#,
    )
}

/// Error page; `detail` is only passed in development mode
pub fn error_page(status: u16, message: &str, detail: Option<&str>) -> String {
    let mut content = format!("<h2>{}</h2>\n", status);
    if let Some(detail) = detail {
        content.push_str(&format!("<pre>{}</pre>\n", text(detail)));
    }
    content.push_str(r#"<p><a href="/">Back to all books</a></p>"#);
    layout(message, &content)
}
