//! User API endpoints
//!
//! Profile registration happens here; authentication does not. The
//! gateway owns credentials and forwards the resolved caller id, so
//! this area only manages profiles and the follow graph.

pub mod types;

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::extractors::{CurrentUser, MaybeUser, ValidatedJson, ValidatedQuery};
use crate::api::types::{ApiError, PaginatedResponse};
use crate::domain::CatalogService;
use crate::domain::catalog::{SubscriptionView, UserView};

use types::{CreateUserRequest, ListUsersQuery, SubscriptionsQuery};

/// Shared state for Users API endpoints
#[derive(Clone)]
pub struct UsersApiState {
    pub catalog: Arc<CatalogService>,
}

/// Build Users API routes
pub fn routes(catalog: Arc<CatalogService>) -> Router<()> {
    let state = UsersApiState { catalog };

    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/me", get(get_current_user))
        .route("/subscriptions", get(list_subscriptions))
        .route("/{id}", get(get_user))
        .route("/{id}/subscribe", post(subscribe).delete(unsubscribe))
        .with_state(state)
}

/// List user profiles
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "users",
    params(
        ("page" = Option<u32>, Query, description = "Page number (1-100)"),
        ("limit" = Option<u32>, Query, description = "Items per page (1-100)")
    ),
    responses(
        (status = 200, description = "Page of users with pagination metadata")
    )
)]
pub async fn list_users(
    State(state): State<UsersApiState>,
    MaybeUser(viewer): MaybeUser,
    ValidatedQuery(params): ValidatedQuery<ListUsersQuery>,
) -> Result<Json<PaginatedResponse<UserView>>, ApiError> {
    let (data, total) = state
        .catalog
        .list_users(viewer, params.page, params.limit)
        .await
        .map_err(ApiError::from_store)?;

    Ok(Json(PaginatedResponse::new(
        data,
        params.page,
        params.limit,
        total,
    )))
}

/// Register a user profile
#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "Profile created", body = UserView),
        (status = 400, description = "Invalid request"),
        (status = 409, description = "Email or username already taken")
    )
)]
pub async fn create_user(
    State(state): State<UsersApiState>,
    ValidatedJson(body): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserView>), ApiError> {
    let user = state
        .catalog
        .create_user(body.into())
        .await
        .map_err(ApiError::from_store)?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// Get the caller's own profile
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    tag = "users",
    responses(
        (status = 200, description = "Caller profile", body = UserView),
        (status = 401, description = "Identity required")
    )
)]
pub async fn get_current_user(
    State(state): State<UsersApiState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<UserView>, ApiError> {
    let user = state
        .catalog
        .get_user(user_id, Some(user_id))
        .await
        .map_err(ApiError::from_store)?;

    Ok(Json(user))
}

/// List the authors the caller follows, with recipe previews
#[utoipa::path(
    get,
    path = "/api/v1/users/subscriptions",
    tag = "users",
    params(
        ("recipes_limit" = Option<u32>, Query, description = "Cap on preview recipes per author")
    ),
    responses(
        (status = 200, description = "Followed authors with previews", body = [SubscriptionView]),
        (status = 401, description = "Identity required")
    )
)]
pub async fn list_subscriptions(
    State(state): State<UsersApiState>,
    CurrentUser(user_id): CurrentUser,
    ValidatedQuery(params): ValidatedQuery<SubscriptionsQuery>,
) -> Result<Json<Vec<SubscriptionView>>, ApiError> {
    let subscriptions = state
        .catalog
        .list_subscriptions(user_id, params.recipes_limit.map(i64::from))
        .await
        .map_err(ApiError::from_store)?;

    Ok(Json(subscriptions))
}

/// Get a user profile by id
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "users",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User profile", body = UserView),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<UsersApiState>,
    MaybeUser(viewer): MaybeUser,
    Path(id): Path<i64>,
) -> Result<Json<UserView>, ApiError> {
    let user = state
        .catalog
        .get_user(id, viewer)
        .await
        .map_err(ApiError::from_store)?;

    Ok(Json(user))
}

/// Follow an author
#[utoipa::path(
    post,
    path = "/api/v1/users/{id}/subscribe",
    tag = "users",
    params(
        ("id" = i64, Path, description = "Author ID")
    ),
    responses(
        (status = 201, description = "Subscribed", body = UserView),
        (status = 400, description = "Self-subscription or unknown author"),
        (status = 409, description = "Already subscribed")
    )
)]
pub async fn subscribe(
    State(state): State<UsersApiState>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<UserView>), ApiError> {
    state
        .catalog
        .subscribe(user_id, id)
        .await
        .map_err(ApiError::from_store)?;

    let author = state
        .catalog
        .get_user(id, Some(user_id))
        .await
        .map_err(ApiError::from_store)?;

    Ok((StatusCode::CREATED, Json(author)))
}

/// Unfollow an author
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}/subscribe",
    tag = "users",
    params(
        ("id" = i64, Path, description = "Author ID")
    ),
    responses(
        (status = 204, description = "Unsubscribed"),
        (status = 404, description = "Subscription not found")
    )
)]
pub async fn unsubscribe(
    State(state): State<UsersApiState>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state
        .catalog
        .unsubscribe(user_id, id)
        .await
        .map_err(ApiError::from_store)?;

    Ok(StatusCode::NO_CONTENT)
}
