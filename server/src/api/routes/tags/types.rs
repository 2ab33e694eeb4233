//! Tag API types

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

/// Request body for creating a tag
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTagRequest {
    #[validate(length(min = 1, max = 64, message = "Name must be 1-64 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 64, message = "Slug must be 1-64 characters"))]
    pub slug: String,
}
