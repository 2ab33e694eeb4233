//! Recipe API endpoints
//!
//! Listing and detail reads are open and personalized through the
//! optional caller identity; every write requires one. Favorite and
//! shopping list membership live under the recipe they reference.

pub mod types;

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::extractors::{CurrentUser, MaybeUser, ValidatedJson, ValidatedQuery};
use crate::api::types::{ApiError, PaginatedResponse};
use crate::domain::CatalogService;
use crate::domain::catalog::{RecipeDetail, RecipePreview, RecipeQuery};
use crate::domain::{shopping_list, short_link};
use crate::utils::string::parse_slug_list;

use types::{ListRecipesQuery, RecipeRequest, ShortLinkResponse};

/// Shared state for Recipes API endpoints
#[derive(Clone)]
pub struct RecipesApiState {
    pub catalog: Arc<CatalogService>,
    /// Base URL used when rendering absolute short links
    pub public_base_url: String,
}

/// Build Recipes API routes
pub fn routes(catalog: Arc<CatalogService>, public_base_url: String) -> Router<()> {
    let state = RecipesApiState {
        catalog,
        public_base_url,
    };

    Router::new()
        .route("/", get(list_recipes).post(create_recipe))
        .route("/download_shopping_cart", get(download_shopping_cart))
        .route(
            "/{id}",
            get(get_recipe).patch(update_recipe).delete(delete_recipe),
        )
        .route("/{id}/favorite", post(add_favorite).delete(remove_favorite))
        .route(
            "/{id}/shopping_cart",
            post(add_to_shopping_cart).delete(remove_from_shopping_cart),
        )
        .route("/{id}/get-link", get(get_short_link))
        .with_state(state)
}

fn preview_of(detail: RecipeDetail) -> RecipePreview {
    RecipePreview {
        id: detail.id,
        name: detail.name,
        image: detail.image,
        cooking_time: detail.cooking_time,
    }
}

/// List recipes, newest first
#[utoipa::path(
    get,
    path = "/api/v1/recipes",
    tag = "recipes",
    params(
        ("page" = Option<u32>, Query, description = "Page number (1-100)"),
        ("limit" = Option<u32>, Query, description = "Items per page (1-100)"),
        ("author" = Option<i64>, Query, description = "Filter by author id"),
        ("tags" = Option<String>, Query, description = "Comma-separated tag slugs (any match)"),
        ("is_favorited" = Option<String>, Query, description = "1/true restricts to caller's favorites"),
        ("is_in_shopping_cart" = Option<String>, Query, description = "1/true restricts to caller's shopping list")
    ),
    responses(
        (status = 200, description = "Page of recipes with pagination metadata")
    )
)]
pub async fn list_recipes(
    State(state): State<RecipesApiState>,
    MaybeUser(viewer): MaybeUser,
    ValidatedQuery(params): ValidatedQuery<ListRecipesQuery>,
) -> Result<Json<PaginatedResponse<RecipeDetail>>, ApiError> {
    let query = RecipeQuery {
        author: params.author,
        tag_slugs: params
            .tags
            .as_deref()
            .map(parse_slug_list)
            .unwrap_or_default(),
        favorited_only: params.is_favorited,
        in_shopping_cart_only: params.is_in_shopping_cart,
    };

    let (data, total) = state
        .catalog
        .list_recipes(&query, viewer, params.page, params.limit)
        .await
        .map_err(ApiError::from_store)?;

    Ok(Json(PaginatedResponse::new(
        data,
        params.page,
        params.limit,
        total,
    )))
}

/// Create a recipe authored by the caller
#[utoipa::path(
    post,
    path = "/api/v1/recipes",
    tag = "recipes",
    request_body = RecipeRequest,
    responses(
        (status = 201, description = "Recipe created", body = RecipeDetail),
        (status = 400, description = "Invalid request or unknown ingredient/tag id"),
        (status = 401, description = "Identity required")
    )
)]
pub async fn create_recipe(
    State(state): State<RecipesApiState>,
    CurrentUser(user_id): CurrentUser,
    ValidatedJson(body): ValidatedJson<RecipeRequest>,
) -> Result<(StatusCode, Json<RecipeDetail>), ApiError> {
    let detail = state
        .catalog
        .create_recipe(user_id, body.into())
        .await
        .map_err(ApiError::from_store)?;

    Ok((StatusCode::CREATED, Json(detail)))
}

/// Get a single recipe with viewer flags
#[utoipa::path(
    get,
    path = "/api/v1/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = i64, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe details", body = RecipeDetail),
        (status = 404, description = "Recipe not found")
    )
)]
pub async fn get_recipe(
    State(state): State<RecipesApiState>,
    MaybeUser(viewer): MaybeUser,
    Path(id): Path<i64>,
) -> Result<Json<RecipeDetail>, ApiError> {
    let detail = state
        .catalog
        .get_recipe(id, viewer)
        .await
        .map_err(ApiError::from_store)?;

    Ok(Json(detail))
}

/// Replace a recipe's fields and join sets (author only)
#[utoipa::path(
    patch,
    path = "/api/v1/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = i64, Path, description = "Recipe ID")
    ),
    request_body = RecipeRequest,
    responses(
        (status = 200, description = "Recipe updated", body = RecipeDetail),
        (status = 403, description = "Caller is not the author"),
        (status = 404, description = "Recipe not found")
    )
)]
pub async fn update_recipe(
    State(state): State<RecipesApiState>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<i64>,
    ValidatedJson(body): ValidatedJson<RecipeRequest>,
) -> Result<Json<RecipeDetail>, ApiError> {
    let detail = state
        .catalog
        .update_recipe(id, user_id, body.into())
        .await
        .map_err(ApiError::from_store)?;

    Ok(Json(detail))
}

/// Delete a recipe (author only)
#[utoipa::path(
    delete,
    path = "/api/v1/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = i64, Path, description = "Recipe ID")
    ),
    responses(
        (status = 204, description = "Recipe deleted"),
        (status = 403, description = "Caller is not the author"),
        (status = 404, description = "Recipe not found")
    )
)]
pub async fn delete_recipe(
    State(state): State<RecipesApiState>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state
        .catalog
        .delete_recipe(id, user_id)
        .await
        .map_err(ApiError::from_store)?;

    Ok(StatusCode::NO_CONTENT)
}

/// Add a recipe to the caller's favorites
#[utoipa::path(
    post,
    path = "/api/v1/recipes/{id}/favorite",
    tag = "recipes",
    params(
        ("id" = i64, Path, description = "Recipe ID")
    ),
    responses(
        (status = 201, description = "Added to favorites", body = RecipePreview),
        (status = 404, description = "Recipe not found"),
        (status = 409, description = "Already in favorites")
    )
)]
pub async fn add_favorite(
    State(state): State<RecipesApiState>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<RecipePreview>), ApiError> {
    state
        .catalog
        .toggle_favorite(user_id, id, true)
        .await
        .map_err(ApiError::from_store)?;

    let detail = state
        .catalog
        .get_recipe(id, None)
        .await
        .map_err(ApiError::from_store)?;

    Ok((StatusCode::CREATED, Json(preview_of(detail))))
}

/// Remove a recipe from the caller's favorites
#[utoipa::path(
    delete,
    path = "/api/v1/recipes/{id}/favorite",
    tag = "recipes",
    params(
        ("id" = i64, Path, description = "Recipe ID")
    ),
    responses(
        (status = 204, description = "Removed from favorites"),
        (status = 404, description = "Recipe or favorite not found")
    )
)]
pub async fn remove_favorite(
    State(state): State<RecipesApiState>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state
        .catalog
        .toggle_favorite(user_id, id, false)
        .await
        .map_err(ApiError::from_store)?;

    Ok(StatusCode::NO_CONTENT)
}

/// Add a recipe to the caller's shopping list
#[utoipa::path(
    post,
    path = "/api/v1/recipes/{id}/shopping_cart",
    tag = "recipes",
    params(
        ("id" = i64, Path, description = "Recipe ID")
    ),
    responses(
        (status = 201, description = "Added to shopping list", body = RecipePreview),
        (status = 404, description = "Recipe not found"),
        (status = 409, description = "Already in the shopping list")
    )
)]
pub async fn add_to_shopping_cart(
    State(state): State<RecipesApiState>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<RecipePreview>), ApiError> {
    state
        .catalog
        .toggle_shopping_list(user_id, id, true)
        .await
        .map_err(ApiError::from_store)?;

    let detail = state
        .catalog
        .get_recipe(id, None)
        .await
        .map_err(ApiError::from_store)?;

    Ok((StatusCode::CREATED, Json(preview_of(detail))))
}

/// Remove a recipe from the caller's shopping list
#[utoipa::path(
    delete,
    path = "/api/v1/recipes/{id}/shopping_cart",
    tag = "recipes",
    params(
        ("id" = i64, Path, description = "Recipe ID")
    ),
    responses(
        (status = 204, description = "Removed from the shopping list"),
        (status = 404, description = "Recipe or entry not found")
    )
)]
pub async fn remove_from_shopping_cart(
    State(state): State<RecipesApiState>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state
        .catalog
        .toggle_shopping_list(user_id, id, false)
        .await
        .map_err(ApiError::from_store)?;

    Ok(StatusCode::NO_CONTENT)
}

/// Download the caller's aggregated shopping list as a text file
#[utoipa::path(
    get,
    path = "/api/v1/recipes/download_shopping_cart",
    tag = "recipes",
    responses(
        (status = 200, description = "Plain-text shopping list attachment"),
        (status = 401, description = "Identity required")
    )
)]
pub async fn download_shopping_cart(
    State(state): State<RecipesApiState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Response, ApiError> {
    let text = state
        .catalog
        .render_shopping_list(user_id)
        .await
        .map_err(ApiError::from_store)?;

    let disposition = format!(
        "attachment; filename=\"{}\"",
        shopping_list::DOWNLOAD_FILE_NAME
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        text,
    )
        .into_response())
}

/// Get the recipe's stable share link, assigning one if needed
#[utoipa::path(
    get,
    path = "/api/v1/recipes/{id}/get-link",
    tag = "recipes",
    params(
        ("id" = i64, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Absolute short link", body = ShortLinkResponse),
        (status = 404, description = "Recipe not found")
    )
)]
pub async fn get_short_link(
    State(state): State<RecipesApiState>,
    Path(id): Path<i64>,
) -> Result<Json<ShortLinkResponse>, ApiError> {
    let token = state
        .catalog
        .get_or_create_short_link(id)
        .await
        .map_err(ApiError::from_store)?;

    Ok(Json(ShortLinkResponse {
        short_link: short_link::full_url(&state.public_base_url, &token),
    }))
}
