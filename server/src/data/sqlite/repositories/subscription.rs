//! Subscription repository for SQLite operations
//!
//! Rows are (follower, author) pairs. The self-subscription rule is
//! enforced above the store; this module only knows about the table.

use std::collections::HashSet;

use sqlx::SqlitePool;

use crate::data::error::StoreError;
use crate::data::types::UserRow;

/// Subscribe a user to an author.
/// Subscribing twice to the same author is a `Duplicate` error.
pub async fn add(pool: &SqlitePool, user_id: i64, author_id: i64) -> Result<(), StoreError> {
    let now = chrono::Utc::now().timestamp();

    sqlx::query("INSERT INTO subscriptions (user_id, author_id, created_at) VALUES (?, ?, ?)")
        .bind(user_id)
        .bind(author_id)
        .bind(now)
        .execute(pool)
        .await
        .map_err(|e| {
            StoreError::from_write(
                e,
                "subscriptions(user_id, author_id)",
                Some(("user", author_id)),
            )
        })?;

    Ok(())
}

/// Drop a subscription. Dropping one that does not exist is `NotFound`.
pub async fn remove(pool: &SqlitePool, user_id: i64, author_id: i64) -> Result<(), StoreError> {
    let result = sqlx::query("DELETE FROM subscriptions WHERE user_id = ? AND author_id = ?")
        .bind(user_id)
        .bind(author_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StoreError::not_found("subscription", author_id));
    }

    Ok(())
}

/// Check whether a user is subscribed to an author
pub async fn exists(pool: &SqlitePool, user_id: i64, author_id: i64) -> Result<bool, StoreError> {
    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM subscriptions WHERE user_id = ? AND author_id = ?")
            .bind(user_id)
            .bind(author_id)
            .fetch_one(pool)
            .await?;

    Ok(count > 0)
}

/// Authors a user is subscribed to, most recent subscription first
pub async fn list_for_user(pool: &SqlitePool, user_id: i64) -> Result<Vec<UserRow>, StoreError> {
    let rows: Vec<(i64, String, String, String, String, Option<String>, i64)> = sqlx::query_as(
        r#"
        SELECT u.id, u.email, u.username, u.first_name, u.last_name, u.avatar, u.created_at
        FROM subscriptions s
        JOIN users u ON u.id = s.author_id
        WHERE s.user_id = ?
        ORDER BY s.created_at DESC, u.id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(
            |(id, email, username, first_name, last_name, avatar, created_at)| UserRow {
                id,
                email,
                username,
                first_name,
                last_name,
                avatar,
                created_at,
            },
        )
        .collect())
}

/// All user IDs subscribed to an author, for answering "does this author
/// follow back" over a whole listing in one query
pub async fn list_follower_ids(
    pool: &SqlitePool,
    author_id: i64,
) -> Result<HashSet<i64>, StoreError> {
    let rows: Vec<(i64,)> = sqlx::query_as("SELECT user_id FROM subscriptions WHERE author_id = ?")
        .bind(author_id)
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(|(id,)| id).collect())
}
