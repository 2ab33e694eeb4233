//! Shopping list repository for SQLite operations
//!
//! Aggregation happens here rather than in Rust: ingredient amounts are
//! summed by the database, grouped by name and unit so that duplicate
//! catalog rows merge into one line.

use std::collections::HashSet;

use sqlx::SqlitePool;

use crate::data::error::StoreError;
use crate::data::types::IngredientTotal;

/// Put a recipe on a user's shopping list.
/// A second add for the same pair is a `Duplicate` error.
pub async fn add(pool: &SqlitePool, user_id: i64, recipe_id: i64) -> Result<(), StoreError> {
    let now = chrono::Utc::now().timestamp();

    sqlx::query("INSERT INTO shopping_list_entries (user_id, recipe_id, created_at) VALUES (?, ?, ?)")
        .bind(user_id)
        .bind(recipe_id)
        .bind(now)
        .execute(pool)
        .await
        .map_err(|e| {
            StoreError::from_write(
                e,
                "shopping_list_entries(user_id, recipe_id)",
                Some(("recipe", recipe_id)),
            )
        })?;

    Ok(())
}

/// Take a recipe off the list. Removing one that is not on it is `NotFound`.
pub async fn remove(pool: &SqlitePool, user_id: i64, recipe_id: i64) -> Result<(), StoreError> {
    let result = sqlx::query("DELETE FROM shopping_list_entries WHERE user_id = ? AND recipe_id = ?")
        .bind(user_id)
        .bind(recipe_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StoreError::not_found("shopping list entry", recipe_id));
    }

    Ok(())
}

/// Check whether a recipe is on a user's shopping list
pub async fn contains(
    pool: &SqlitePool,
    user_id: i64,
    recipe_id: i64,
) -> Result<bool, StoreError> {
    let (count,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM shopping_list_entries WHERE user_id = ? AND recipe_id = ?",
    )
    .bind(user_id)
    .bind(recipe_id)
    .fetch_one(pool)
    .await?;

    Ok(count > 0)
}

/// All recipe IDs on a user's shopping list, for flagging whole listings
/// in one query
pub async fn list_recipe_ids(pool: &SqlitePool, user_id: i64) -> Result<HashSet<i64>, StoreError> {
    let rows: Vec<(i64,)> =
        sqlx::query_as("SELECT recipe_id FROM shopping_list_entries WHERE user_id = ?")
            .bind(user_id)
            .fetch_all(pool)
            .await?;

    Ok(rows.into_iter().map(|(id,)| id).collect())
}

/// Sum ingredient amounts across every recipe on the user's list.
///
/// Grouping is by ingredient name and measurement unit, not by catalog
/// row id, so duplicate catalog entries collapse into one total. The
/// same name under a different unit stays a separate line. Ordered
/// alphabetically.
pub async fn aggregate_ingredients(
    pool: &SqlitePool,
    user_id: i64,
) -> Result<Vec<IngredientTotal>, StoreError> {
    let rows: Vec<(String, String, i64)> = sqlx::query_as(
        r#"
        SELECT i.name, i.measurement_unit, SUM(ri.amount)
        FROM shopping_list_entries s
        JOIN recipe_ingredients ri ON ri.recipe_id = s.recipe_id
        JOIN ingredients i ON i.id = ri.ingredient_id
        WHERE s.user_id = ?
        GROUP BY i.name, i.measurement_unit
        ORDER BY i.name, i.measurement_unit
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(name, measurement_unit, total)| IngredientTotal {
            name,
            measurement_unit,
            total,
        })
        .collect())
}
