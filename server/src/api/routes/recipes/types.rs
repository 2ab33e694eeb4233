//! Recipe API types

use serde::{Deserialize, Deserializer};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::types::{default_limit, default_page, validate_limit, validate_page};
use crate::data::types::{IngredientAmount, NewRecipe};

/// Request body for creating or fully replacing a recipe
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RecipeRequest {
    #[validate(length(min = 1, max = 64, message = "Name must be 1-64 characters"))]
    pub name: String,

    /// Optional image reference (URL or data URI)
    pub image: Option<String>,

    #[validate(length(min = 1, message = "Text must not be empty"))]
    pub text: String,

    #[validate(range(
        min = 1,
        max = 10000,
        message = "Cooking time must be between 1 and 10000 minutes"
    ))]
    pub cooking_time: i64,

    /// Full replacement set; per-item bounds are checked by the catalog
    pub ingredients: Vec<IngredientAmount>,

    /// Full replacement set of tag ids
    pub tags: Vec<i64>,
}

impl From<RecipeRequest> for NewRecipe {
    fn from(req: RecipeRequest) -> Self {
        Self {
            name: req.name,
            image: req.image,
            text: req.text,
            cooking_time: req.cooking_time,
            ingredients: req.ingredients,
            tags: req.tags,
        }
    }
}

/// Accept `1`/`true` as set, anything else (including absence) as unset
fn flag_param<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(matches!(raw.as_deref(), Some("1") | Some("true")))
}

/// Query params for listing recipes
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ListRecipesQuery {
    #[serde(default = "default_page")]
    #[validate(custom(function = "validate_page"))]
    pub page: u32,

    #[serde(default = "default_limit")]
    #[validate(custom(function = "validate_limit"))]
    pub limit: u32,

    /// Filter by author id
    pub author: Option<i64>,

    /// Comma-separated tag slugs; recipes carrying any of them match
    pub tags: Option<String>,

    /// Restrict to the caller's favorites (needs an identity to match)
    #[serde(default, deserialize_with = "flag_param")]
    pub is_favorited: bool,

    /// Restrict to the caller's shopping list (needs an identity to match)
    #[serde(default, deserialize_with = "flag_param")]
    pub is_in_shopping_cart: bool,
}

/// Response body for GET /recipes/{id}/get-link
#[derive(Debug, serde::Serialize, ToSchema)]
pub struct ShortLinkResponse {
    #[serde(rename = "short-link")]
    pub short_link: String,
}
