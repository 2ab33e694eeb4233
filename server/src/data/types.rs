//! Shared data types for the store
//!
//! Row types returned by repositories plus the input and filter types the
//! domain layer hands to them.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ============================================================================
// User types
// ============================================================================

/// User row from database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRow {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    /// Opaque reference to an avatar blob, resolved by an upstream service
    pub avatar: Option<String>,
    pub created_at: i64,
}

/// Fields for creating a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar: Option<String>,
}

// ============================================================================
// Catalog types
// ============================================================================

/// Ingredient row from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct IngredientRow {
    pub id: i64,
    pub name: String,
    pub measurement_unit: String,
}

/// Tag row from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TagRow {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

// ============================================================================
// Recipe types
// ============================================================================

/// Recipe row from database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeRow {
    pub id: i64,
    pub author_id: i64,
    pub name: String,
    /// Opaque reference to an image blob, resolved by an upstream service
    pub image: Option<String>,
    pub text: String,
    pub cooking_time: i64,
    /// Server-assigned at creation, never updated
    pub pub_date: i64,
    /// Assigned once at creation, immutable thereafter
    pub short_link: Option<String>,
}

/// One ingredient of a recipe with its amount (ingredient join detail)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RecipeIngredientDetail {
    pub ingredient_id: i64,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i64,
}

/// Ingredient reference with an amount, as supplied on recipe writes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct IngredientAmount {
    pub ingredient_id: i64,
    pub amount: i64,
}

/// Fields for creating or fully replacing a recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRecipe {
    pub name: String,
    pub image: Option<String>,
    pub text: String,
    pub cooking_time: i64,
    pub ingredients: Vec<IngredientAmount>,
    pub tags: Vec<i64>,
}

/// Listing filters for recipes. All fields combine with AND; `tag_slugs`
/// matches recipes carrying ANY of the given slugs.
#[derive(Debug, Clone, Default)]
pub struct RecipeFilter {
    pub author: Option<i64>,
    pub tag_slugs: Vec<String>,
    /// Only recipes favorited by this user
    pub favorited_by: Option<i64>,
    /// Only recipes on this user's shopping list
    pub in_shopping_list_of: Option<i64>,
}

// ============================================================================
// Aggregation types
// ============================================================================

/// One line of an aggregated shopping list, grouped by (name, unit)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct IngredientTotal {
    pub name: String,
    pub measurement_unit: String,
    pub total: i64,
}
