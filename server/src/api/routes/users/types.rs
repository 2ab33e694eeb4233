//! User API types

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::types::{DEFAULT_LIMIT, DEFAULT_PAGE, default_limit, default_page, validate_limit, validate_page};
use crate::data::types::NewUser;

/// Request body for registering a user profile
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(email(message = "Email must be a valid address"))]
    #[validate(length(max = 254, message = "Email must be at most 254 characters"))]
    pub email: String,
    #[validate(length(min = 1, max = 150, message = "Username must be 1-150 characters"))]
    pub username: String,
    #[validate(length(max = 150, message = "First name must be at most 150 characters"))]
    pub first_name: String,
    #[validate(length(max = 150, message = "Last name must be at most 150 characters"))]
    pub last_name: String,
    /// Avatar image reference (URL or data URI), stored verbatim
    pub avatar: Option<String>,
}

impl From<CreateUserRequest> for NewUser {
    fn from(req: CreateUserRequest) -> Self {
        NewUser {
            email: req.email,
            username: req.username,
            first_name: req.first_name,
            last_name: req.last_name,
            avatar: req.avatar,
        }
    }
}

/// Query parameters for listing users
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ListUsersQuery {
    #[serde(default = "default_page")]
    #[validate(custom(function = "validate_page"))]
    pub page: u32,
    #[serde(default = "default_limit")]
    #[validate(custom(function = "validate_limit"))]
    pub limit: u32,
}

impl Default for ListUsersQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Query parameters for the caller's subscription feed
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SubscriptionsQuery {
    /// Cap on preview recipes returned per followed author
    #[validate(range(max = 100, message = "recipes_limit must be at most 100"))]
    pub recipes_limit: Option<u32>,
}
