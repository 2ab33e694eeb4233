//! Tag repository for SQLite operations
//!
//! Tag names and slugs are both unique across the catalog.

use sqlx::SqlitePool;

use crate::data::error::StoreError;
use crate::data::types::TagRow;

/// Create a tag; name and slug must each be unique
pub async fn create_tag(pool: &SqlitePool, name: &str, slug: &str) -> Result<TagRow, StoreError> {
    let result = sqlx::query("INSERT INTO tags (name, slug) VALUES (?, ?)")
        .bind(name)
        .bind(slug)
        .execute(pool)
        .await
        .map_err(classify_unique)?;

    Ok(TagRow {
        id: result.last_insert_rowid(),
        name: name.to_string(),
        slug: slug.to_string(),
    })
}

/// Pick the violated unique column out of the database message
fn classify_unique(e: sqlx::Error) -> StoreError {
    if let Some(db) = e.as_database_error()
        && db.is_unique_violation()
    {
        let constraint = if db.message().contains("tags.slug") {
            "tags.slug"
        } else {
            "tags.name"
        };
        return StoreError::Duplicate { constraint };
    }
    StoreError::Database(e)
}

/// Get a tag by ID
pub async fn get_tag(pool: &SqlitePool, id: i64) -> Result<Option<TagRow>, StoreError> {
    let row = sqlx::query_as::<_, (i64, String, String)>(
        "SELECT id, name, slug FROM tags WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|(id, name, slug)| TagRow { id, name, slug }))
}

/// List all tags ordered by name
pub async fn list_tags(pool: &SqlitePool) -> Result<Vec<TagRow>, StoreError> {
    let rows = sqlx::query_as::<_, (i64, String, String)>(
        "SELECT id, name, slug FROM tags ORDER BY name",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(id, name, slug)| TagRow { id, name, slug })
        .collect())
}

/// Get the tag matching `name`, creating one when none exists.
/// Returns the row and whether it was created.
pub async fn get_or_create(
    pool: &SqlitePool,
    name: &str,
    slug: &str,
) -> Result<(TagRow, bool), StoreError> {
    let existing =
        sqlx::query_as::<_, (i64, String, String)>("SELECT id, name, slug FROM tags WHERE name = ?")
            .bind(name)
            .fetch_optional(pool)
            .await?;

    if let Some((id, name, slug)) = existing {
        return Ok((TagRow { id, name, slug }, false));
    }

    let created = create_tag(pool, name, slug).await?;
    Ok((created, true))
}

/// Delete a tag by ID, cascading out of any recipes that carry it
pub async fn delete_tag(pool: &SqlitePool, id: i64) -> Result<bool, StoreError> {
    let result = sqlx::query("DELETE FROM tags WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
