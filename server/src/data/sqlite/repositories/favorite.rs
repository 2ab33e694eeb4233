//! Favorite repository for SQLite operations

use std::collections::HashSet;

use sqlx::SqlitePool;

use crate::data::error::StoreError;

/// Mark a recipe as a favorite of a user.
/// A second add for the same pair is a `Duplicate` error.
pub async fn add(pool: &SqlitePool, user_id: i64, recipe_id: i64) -> Result<(), StoreError> {
    let now = chrono::Utc::now().timestamp();

    sqlx::query("INSERT INTO favorites (user_id, recipe_id, created_at) VALUES (?, ?, ?)")
        .bind(user_id)
        .bind(recipe_id)
        .bind(now)
        .execute(pool)
        .await
        .map_err(|e| {
            StoreError::from_write(
                e,
                "favorites(user_id, recipe_id)",
                Some(("recipe", recipe_id)),
            )
        })?;

    Ok(())
}

/// Remove a favorite. Removing one that does not exist is `NotFound`.
pub async fn remove(pool: &SqlitePool, user_id: i64, recipe_id: i64) -> Result<(), StoreError> {
    let result = sqlx::query("DELETE FROM favorites WHERE user_id = ? AND recipe_id = ?")
        .bind(user_id)
        .bind(recipe_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StoreError::not_found("favorite", recipe_id));
    }

    Ok(())
}

/// Check whether a user has favorited a recipe
pub async fn is_favorite(
    pool: &SqlitePool,
    user_id: i64,
    recipe_id: i64,
) -> Result<bool, StoreError> {
    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM favorites WHERE user_id = ? AND recipe_id = ?")
            .bind(user_id)
            .bind(recipe_id)
            .fetch_one(pool)
            .await?;

    Ok(count > 0)
}

/// All recipe IDs a user has favorited, for flagging whole listings in
/// one query
pub async fn list_recipe_ids(pool: &SqlitePool, user_id: i64) -> Result<HashSet<i64>, StoreError> {
    let rows: Vec<(i64,)> = sqlx::query_as("SELECT recipe_id FROM favorites WHERE user_id = ?")
        .bind(user_id)
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(|(id,)| id).collect())
}
