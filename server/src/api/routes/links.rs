//! Short-link resolver
//!
//! Mounted at the server root rather than under `/api/v1` so that the
//! tokens embedded in shared URLs stay one path segment long.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;

use crate::api::types::ApiError;
use crate::domain::CatalogService;

/// Shared state for the short-link resolver
#[derive(Clone)]
pub struct LinksApiState {
    pub catalog: Arc<CatalogService>,
}

/// Build short-link routes
pub fn routes(catalog: Arc<CatalogService>) -> Router<()> {
    let state = LinksApiState { catalog };

    Router::new()
        .route("/{token}", get(resolve_short_link))
        .with_state(state)
}

/// Redirect a share token to its recipe page
#[utoipa::path(
    get,
    path = "/s/{token}",
    tag = "links",
    params(
        ("token" = String, Path, description = "Share token")
    ),
    responses(
        (status = 302, description = "Redirect to the recipe page"),
        (status = 404, description = "Unknown token")
    )
)]
pub async fn resolve_short_link(
    State(state): State<LinksApiState>,
    Path(token): Path<String>,
) -> Result<Response, ApiError> {
    let recipe_id = state
        .catalog
        .resolve_short_link(&token)
        .await
        .map_err(ApiError::from_store)?;

    let location = format!("/recipes/{recipe_id}");

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}
