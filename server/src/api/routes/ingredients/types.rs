//! Ingredient API types

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

/// Request body for creating an ingredient
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateIngredientRequest {
    #[validate(length(min = 1, max = 64, message = "Name must be 1-64 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 64, message = "Measurement unit must be 1-64 characters"))]
    pub measurement_unit: String,
}

/// Query params for listing ingredients
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ListIngredientsQuery {
    /// Case-insensitive name prefix filter
    #[validate(length(max = 64, message = "Search term must be at most 64 characters"))]
    pub search: Option<String>,
}
