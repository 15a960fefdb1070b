//! Page handlers.
//!
//! - `view`: render a stored page, or send the client to the edit form if the
//!   page doesn't exist yet
//! - `edit`: render the edit form, blank for a page that doesn't exist yet
//! - `save`: store the submitted body and send the client to the view page

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{FromRequest, Request, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use percent_encoding::percent_decode;
use wiki_storage::Page;

use crate::error::ServerError;
use crate::render::Template;
use crate::routing::{Action, PagePath};
use crate::state::AppState;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Form submitted by the edit page.
///
/// The `body` field is percent-decoded to raw bytes, so a page body need not
/// be UTF-8. A missing field saves an empty page.
#[derive(Debug)]
pub(crate) struct SaveForm {
    body: Vec<u8>,
}

impl<S: Send + Sync> FromRequest<S> for SaveForm {
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with(FORM_CONTENT_TYPE));
        if !is_form {
            return Err(StatusCode::UNSUPPORTED_MEDIA_TYPE.into_response());
        }

        let form = Bytes::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;
        Ok(Self {
            body: form_field(&form, "body").unwrap_or_default(),
        })
    }
}

/// First value of `name` in an `application/x-www-form-urlencoded` body.
fn form_field(form: &[u8], name: &str) -> Option<Vec<u8>> {
    form.split(|&b| b == b'&').find_map(|pair| {
        let mut parts = pair.splitn(2, |&b| b == b'=');
        let key = parts.next().unwrap_or_default();
        let value = parts.next().unwrap_or_default();
        (form_decode(key) == name.as_bytes()).then(|| form_decode(value))
    })
}

/// Decode one form component: `+` is a space, then `%XX` escapes.
fn form_decode(raw: &[u8]) -> Vec<u8> {
    let spaced: Vec<u8> = raw
        .iter()
        .map(|&b| if b == b'+' { b' ' } else { b })
        .collect();
    percent_decode(&spaced).collect()
}

/// Handle GET/POST /view/{title}.
pub(crate) async fn view_page(
    State(state): State<Arc<AppState>>,
    PagePath { title, .. }: PagePath,
) -> Result<Response, ServerError> {
    tracing::info!(title = %title, "View page");

    match state.store.load(&title) {
        Ok(page) => render(&state, Template::View, &page),
        Err(e) if e.is_not_found() => Ok(found(&Action::Edit.path_for(&title))),
        Err(e) => Err(e.into()),
    }
}

/// Handle GET /edit/{title}.
pub(crate) async fn edit_page(
    State(state): State<Arc<AppState>>,
    PagePath { title, .. }: PagePath,
) -> Result<Response, ServerError> {
    tracing::info!(title = %title, "Edit page");

    let page = match state.store.load(&title) {
        Ok(page) => page,
        Err(e) if e.is_not_found() => Page::empty(title),
        Err(e) => return Err(e.into()),
    };
    render(&state, Template::Edit, &page)
}

/// Handle POST /save/{title}.
pub(crate) async fn save_page(
    State(state): State<Arc<AppState>>,
    PagePath { title, .. }: PagePath,
    form: SaveForm,
) -> Result<Response, ServerError> {
    tracing::info!(title = %title, bytes = form.body.len(), "Save page");

    let page = Page::new(title, form.body);
    state.store.save(&page)?;
    Ok(found(&Action::View.path_for(&page.title)))
}

/// Render a page into a complete HTML response.
fn render(state: &AppState, template: Template, page: &Page) -> Result<Response, ServerError> {
    let html = state.templates.render(template, page)?;
    Ok(Html(html).into_response())
}

/// 302 Found redirect.
fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_owned())]).into_response()
}
