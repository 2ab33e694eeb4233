//! Tag catalog API endpoints
//!
//! Reads are open; writes are management operations the gateway is
//! expected to restrict.

pub mod types;

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::extractors::{CurrentUser, ValidatedJson};
use crate::api::types::ApiError;
use crate::data::types::TagRow;
use crate::domain::CatalogService;

use types::CreateTagRequest;

/// Shared state for Tags API endpoints
#[derive(Clone)]
pub struct TagsApiState {
    pub catalog: Arc<CatalogService>,
}

/// Build Tags API routes
pub fn routes(catalog: Arc<CatalogService>) -> Router<()> {
    let state = TagsApiState { catalog };

    Router::new()
        .route("/", get(list_tags).post(create_tag))
        .route("/{id}", get(get_tag).delete(delete_tag))
        .with_state(state)
}

/// List all tags
#[utoipa::path(
    get,
    path = "/api/v1/tags",
    tag = "tags",
    responses(
        (status = 200, description = "List of tags", body = [TagRow])
    )
)]
pub async fn list_tags(
    State(state): State<TagsApiState>,
) -> Result<Json<Vec<TagRow>>, ApiError> {
    let rows = state.catalog.list_tags().await.map_err(ApiError::from_store)?;

    Ok(Json(rows))
}

/// Get a single tag by ID
#[utoipa::path(
    get,
    path = "/api/v1/tags/{id}",
    tag = "tags",
    params(
        ("id" = i64, Path, description = "Tag ID")
    ),
    responses(
        (status = 200, description = "Tag details", body = TagRow),
        (status = 404, description = "Tag not found")
    )
)]
pub async fn get_tag(
    State(state): State<TagsApiState>,
    Path(id): Path<i64>,
) -> Result<Json<TagRow>, ApiError> {
    let row = state.catalog.get_tag(id).await.map_err(ApiError::from_store)?;

    Ok(Json(row))
}

/// Create a tag; name and slug must each be unique
#[utoipa::path(
    post,
    path = "/api/v1/tags",
    tag = "tags",
    request_body = CreateTagRequest,
    responses(
        (status = 201, description = "Tag created", body = TagRow),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Identity required"),
        (status = 409, description = "Name or slug already exists")
    )
)]
pub async fn create_tag(
    State(state): State<TagsApiState>,
    CurrentUser(_user_id): CurrentUser,
    ValidatedJson(body): ValidatedJson<CreateTagRequest>,
) -> Result<(StatusCode, Json<TagRow>), ApiError> {
    let row = state
        .catalog
        .create_tag(&body.name, &body.slug)
        .await
        .map_err(ApiError::from_store)?;

    Ok((StatusCode::CREATED, Json(row)))
}

/// Delete a tag, cascading it out of recipes that carry it
#[utoipa::path(
    delete,
    path = "/api/v1/tags/{id}",
    tag = "tags",
    params(
        ("id" = i64, Path, description = "Tag ID")
    ),
    responses(
        (status = 204, description = "Tag deleted"),
        (status = 401, description = "Identity required"),
        (status = 404, description = "Tag not found")
    )
)]
pub async fn delete_tag(
    State(state): State<TagsApiState>,
    CurrentUser(_user_id): CurrentUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state
        .catalog
        .delete_tag(id)
        .await
        .map_err(ApiError::from_store)?;

    Ok(StatusCode::NO_CONTENT)
}
