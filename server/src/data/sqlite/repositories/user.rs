//! User repository for SQLite operations
//!
//! Users are identity rows only: email and username are unique, everything
//! credential-shaped lives upstream. Deleting a user cascades to authored
//! recipes, favorites, shopping list entries, and subscriptions in both
//! directions.

use sqlx::SqlitePool;

use crate::data::error::StoreError;
use crate::data::types::{NewUser, UserRow};

/// Create a new user; email and username must each be unique
pub async fn create_user(pool: &SqlitePool, new: &NewUser) -> Result<UserRow, StoreError> {
    let now = chrono::Utc::now().timestamp();

    let result = sqlx::query(
        "INSERT INTO users (email, username, first_name, last_name, avatar, created_at) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&new.email)
    .bind(&new.username)
    .bind(&new.first_name)
    .bind(&new.last_name)
    .bind(&new.avatar)
    .bind(now)
    .execute(pool)
    .await
    .map_err(classify_unique)?;

    Ok(UserRow {
        id: result.last_insert_rowid(),
        email: new.email.clone(),
        username: new.username.clone(),
        first_name: new.first_name.clone(),
        last_name: new.last_name.clone(),
        avatar: new.avatar.clone(),
        created_at: now,
    })
}

/// Pick the violated unique column out of the database message. SQLite names
/// the column in the message, nowhere structured.
fn classify_unique(e: sqlx::Error) -> StoreError {
    if let Some(db) = e.as_database_error()
        && db.is_unique_violation()
    {
        let constraint = if db.message().contains("users.email") {
            "users.email"
        } else {
            "users.username"
        };
        return StoreError::Duplicate { constraint };
    }
    StoreError::Database(e)
}

/// Get a user by ID
pub async fn get_user(pool: &SqlitePool, id: i64) -> Result<Option<UserRow>, StoreError> {
    let row = sqlx::query_as::<_, (i64, String, String, String, String, Option<String>, i64)>(
        "SELECT id, email, username, first_name, last_name, avatar, created_at FROM users WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(into_user_row))
}

/// Get a user by username
pub async fn get_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<UserRow>, StoreError> {
    let row = sqlx::query_as::<_, (i64, String, String, String, String, Option<String>, i64)>(
        "SELECT id, email, username, first_name, last_name, avatar, created_at FROM users WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(into_user_row))
}

/// List users with pagination, ordered by id
pub async fn list_users(
    pool: &SqlitePool,
    page: u32,
    limit: u32,
) -> Result<(Vec<UserRow>, u64), StoreError> {
    let offset = (page.saturating_sub(1)) * limit;

    let rows = sqlx::query_as::<_, (i64, String, String, String, String, Option<String>, i64)>(
        "SELECT id, email, username, first_name, last_name, avatar, created_at FROM users ORDER BY id LIMIT ? OFFSET ?",
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;

    Ok((
        rows.into_iter().map(into_user_row).collect(),
        total.0 as u64,
    ))
}

/// Delete a user by ID, cascading to everything they authored or marked
pub async fn delete_user(pool: &SqlitePool, id: i64) -> Result<bool, StoreError> {
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

fn into_user_row(
    (id, email, username, first_name, last_name, avatar, created_at): (
        i64,
        String,
        String,
        String,
        String,
        Option<String>,
        i64,
    ),
) -> UserRow {
    UserRow {
        id,
        email,
        username,
        first_name,
        last_name,
        avatar,
        created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup_test_pool() -> SqlitePool {
        let pool = SqlitePool::connect(":memory:").await.unwrap();
        sqlx::query(crate::data::sqlite::schema::SCHEMA)
            .execute(&pool)
            .await
            .unwrap();
        pool
    }

    fn sample_user(n: u32) -> NewUser {
        NewUser {
            email: format!("cook{}@example.com", n),
            username: format!("cook{}", n),
            first_name: "Test".to_string(),
            last_name: "Cook".to_string(),
            avatar: None,
        }
    }

    #[tokio::test]
    async fn test_create_user() {
        let pool = setup_test_pool().await;
        let user = create_user(&pool, &sample_user(1)).await.unwrap();

        assert!(user.id > 0);
        assert_eq!(user.email, "cook1@example.com");
        assert_eq!(user.username, "cook1");
        assert!(user.avatar.is_none());
    }

    #[tokio::test]
    async fn test_create_user_duplicate_email() {
        let pool = setup_test_pool().await;
        create_user(&pool, &sample_user(1)).await.unwrap();

        let mut dup = sample_user(2);
        dup.email = "cook1@example.com".to_string();
        let err = create_user(&pool, &dup).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::Duplicate {
                constraint: "users.email"
            }
        ));
    }

    #[tokio::test]
    async fn test_create_user_duplicate_username() {
        let pool = setup_test_pool().await;
        create_user(&pool, &sample_user(1)).await.unwrap();

        let mut dup = sample_user(2);
        dup.username = "cook1".to_string();
        let err = create_user(&pool, &dup).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::Duplicate {
                constraint: "users.username"
            }
        ));
    }

    #[tokio::test]
    async fn test_get_user() {
        let pool = setup_test_pool().await;
        let created = create_user(&pool, &sample_user(1)).await.unwrap();

        let fetched = get_user(&pool, created.id).await.unwrap().unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.email, "cook1@example.com");

        assert!(get_user(&pool, 999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_by_username() {
        let pool = setup_test_pool().await;
        create_user(&pool, &sample_user(1)).await.unwrap();

        let fetched = get_by_username(&pool, "cook1").await.unwrap();
        assert!(fetched.is_some());
        assert!(get_by_username(&pool, "nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_users_paginated() {
        let pool = setup_test_pool().await;
        for n in 1..=5 {
            create_user(&pool, &sample_user(n)).await.unwrap();
        }

        let (users, total) = list_users(&pool, 1, 2).await.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(total, 5);
        assert_eq!(users[0].username, "cook1");

        let (users, _) = list_users(&pool, 3, 2).await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].username, "cook5");
    }

    #[tokio::test]
    async fn test_delete_user() {
        let pool = setup_test_pool().await;
        let user = create_user(&pool, &sample_user(1)).await.unwrap();

        assert!(delete_user(&pool, user.id).await.unwrap());
        assert!(get_user(&pool, user.id).await.unwrap().is_none());
        assert!(!delete_user(&pool, user.id).await.unwrap());
    }
}
