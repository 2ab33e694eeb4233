//! Ingredient catalog API endpoints
//!
//! Reads are open; writes are management operations the gateway is
//! expected to restrict.

pub mod types;

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::extractors::{CurrentUser, ValidatedJson, ValidatedQuery};
use crate::api::types::ApiError;
use crate::data::types::IngredientRow;
use crate::domain::CatalogService;

use types::{CreateIngredientRequest, ListIngredientsQuery};

/// Shared state for Ingredients API endpoints
#[derive(Clone)]
pub struct IngredientsApiState {
    pub catalog: Arc<CatalogService>,
}

/// Build Ingredients API routes
pub fn routes(catalog: Arc<CatalogService>) -> Router<()> {
    let state = IngredientsApiState { catalog };

    Router::new()
        .route("/", get(list_ingredients).post(create_ingredient))
        .route("/{id}", get(get_ingredient).delete(delete_ingredient))
        .with_state(state)
}

/// List ingredients, optionally narrowed to a name prefix
#[utoipa::path(
    get,
    path = "/api/v1/ingredients",
    tag = "ingredients",
    params(
        ("search" = Option<String>, Query, description = "Name prefix filter")
    ),
    responses(
        (status = 200, description = "List of ingredients", body = [IngredientRow])
    )
)]
pub async fn list_ingredients(
    State(state): State<IngredientsApiState>,
    ValidatedQuery(query): ValidatedQuery<ListIngredientsQuery>,
) -> Result<Json<Vec<IngredientRow>>, ApiError> {
    let rows = state
        .catalog
        .list_ingredients(query.search.as_deref())
        .await
        .map_err(ApiError::from_store)?;

    Ok(Json(rows))
}

/// Get a single ingredient by ID
#[utoipa::path(
    get,
    path = "/api/v1/ingredients/{id}",
    tag = "ingredients",
    params(
        ("id" = i64, Path, description = "Ingredient ID")
    ),
    responses(
        (status = 200, description = "Ingredient details", body = IngredientRow),
        (status = 404, description = "Ingredient not found")
    )
)]
pub async fn get_ingredient(
    State(state): State<IngredientsApiState>,
    Path(id): Path<i64>,
) -> Result<Json<IngredientRow>, ApiError> {
    let row = state
        .catalog
        .get_ingredient(id)
        .await
        .map_err(ApiError::from_store)?;

    Ok(Json(row))
}

/// Create an ingredient
#[utoipa::path(
    post,
    path = "/api/v1/ingredients",
    tag = "ingredients",
    request_body = CreateIngredientRequest,
    responses(
        (status = 201, description = "Ingredient created", body = IngredientRow),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Identity required")
    )
)]
pub async fn create_ingredient(
    State(state): State<IngredientsApiState>,
    CurrentUser(_user_id): CurrentUser,
    ValidatedJson(body): ValidatedJson<CreateIngredientRequest>,
) -> Result<(StatusCode, Json<IngredientRow>), ApiError> {
    let row = state
        .catalog
        .create_ingredient(&body.name, &body.measurement_unit)
        .await
        .map_err(ApiError::from_store)?;

    Ok((StatusCode::CREATED, Json(row)))
}

/// Delete an ingredient, cascading it out of recipes that use it
#[utoipa::path(
    delete,
    path = "/api/v1/ingredients/{id}",
    tag = "ingredients",
    params(
        ("id" = i64, Path, description = "Ingredient ID")
    ),
    responses(
        (status = 204, description = "Ingredient deleted"),
        (status = 401, description = "Identity required"),
        (status = 404, description = "Ingredient not found")
    )
)]
pub async fn delete_ingredient(
    State(state): State<IngredientsApiState>,
    CurrentUser(_user_id): CurrentUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state
        .catalog
        .delete_ingredient(id)
        .await
        .map_err(ApiError::from_store)?;

    Ok(StatusCode::NO_CONTENT)
}
