//! Page handlers.
//!
//! Each request builds its own [`Page`](pagekit_core::Page), renders it with
//! the shared shell renderer and lets [`PageResponse`] negotiate compression
//! and synthesize headers from the page's flags.

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::Response,
    Json,
};
use pagekit_core::Page;
use pagekit_http::Response as PageResponse;

use crate::{handlers::AppError, layouts, state::AppState};

/// Renders `page` for the request described by `headers`.
fn respond(state: &AppState, page: &Page, headers: &HeaderMap) -> Result<Response, AppError> {
    let response = PageResponse::new(state.renderer.as_ref(), page)
        .with_config(&state.response_config);
    Ok(response.into_axum(headers)?)
}

/// GET / - Landing page.
#[axum::debug_handler]
pub async fn home(State(state): State<AppState>, headers: HeaderMap) -> Result<Response, AppError> {
    let page = layouts::home_page(&state.site);
    respond(&state, &page, &headers)
}

/// GET /page/{slug} - Content page rendered as an SPA shell.
#[axum::debug_handler]
pub async fn content(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    tracing::debug!(slug = %slug, "building content page");
    let page = layouts::content_page(&state.site, &slug);
    respond(&state, &page, &headers)
}

/// GET /page/{slug}/state - Hydration payload for a content page.
#[axum::debug_handler]
pub async fn content_state(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let page = layouts::content_page(&state.site, &slug);
    Ok(Json(page.to_value()?))
}
