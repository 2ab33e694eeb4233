//! Ingredient repository for SQLite operations
//!
//! The catalog carries no uniqueness on (name, measurement_unit): duplicate
//! rows are allowed and merge by name+unit in the shopping list aggregation.
//! `get_or_create` matches on name alone, which is what the CSV import
//! relies on for idempotency.

use sqlx::SqlitePool;

use crate::data::error::StoreError;
use crate::data::types::IngredientRow;

/// Create an ingredient row. Duplicates of an existing (name, unit) pair are
/// permitted.
pub async fn create_ingredient(
    pool: &SqlitePool,
    name: &str,
    measurement_unit: &str,
) -> Result<IngredientRow, StoreError> {
    let result = sqlx::query("INSERT INTO ingredients (name, measurement_unit) VALUES (?, ?)")
        .bind(name)
        .bind(measurement_unit)
        .execute(pool)
        .await
        .map_err(|e| StoreError::from_write(e, "ingredients", None))?;

    Ok(IngredientRow {
        id: result.last_insert_rowid(),
        name: name.to_string(),
        measurement_unit: measurement_unit.to_string(),
    })
}

/// Get an ingredient by ID
pub async fn get_ingredient(
    pool: &SqlitePool,
    id: i64,
) -> Result<Option<IngredientRow>, StoreError> {
    let row = sqlx::query_as::<_, (i64, String, String)>(
        "SELECT id, name, measurement_unit FROM ingredients WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|(id, name, measurement_unit)| IngredientRow {
        id,
        name,
        measurement_unit,
    }))
}

/// Escape `\`, `%` and `_` so a LIKE pattern matches them literally
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// List ingredients ordered by name, optionally narrowed to a
/// case-insensitive name prefix. The prefix is matched literally, so
/// `%` and `_` in the search term carry no wildcard meaning.
pub async fn list_ingredients(
    pool: &SqlitePool,
    search: Option<&str>,
) -> Result<Vec<IngredientRow>, StoreError> {
    let rows = match search {
        Some(prefix) => {
            sqlx::query_as::<_, (i64, String, String)>(
                "SELECT id, name, measurement_unit FROM ingredients WHERE name LIKE ? || '%' ESCAPE '\\' ORDER BY name, id",
            )
            .bind(escape_like(prefix))
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, (i64, String, String)>(
                "SELECT id, name, measurement_unit FROM ingredients ORDER BY name, id",
            )
            .fetch_all(pool)
            .await?
        }
    };

    Ok(rows
        .into_iter()
        .map(|(id, name, measurement_unit)| IngredientRow {
            id,
            name,
            measurement_unit,
        })
        .collect())
}

/// Get the first ingredient matching `name`, creating one when none exists.
/// Returns the row and whether it was created.
pub async fn get_or_create(
    pool: &SqlitePool,
    name: &str,
    measurement_unit: &str,
) -> Result<(IngredientRow, bool), StoreError> {
    let existing = sqlx::query_as::<_, (i64, String, String)>(
        "SELECT id, name, measurement_unit FROM ingredients WHERE name = ? ORDER BY id LIMIT 1",
    )
    .bind(name)
    .fetch_optional(pool)
    .await?;

    if let Some((id, name, measurement_unit)) = existing {
        return Ok((
            IngredientRow {
                id,
                name,
                measurement_unit,
            },
            false,
        ));
    }

    let created = create_ingredient(pool, name, measurement_unit).await?;
    Ok((created, true))
}

/// Delete an ingredient by ID, cascading out of any recipes that use it
pub async fn delete_ingredient(pool: &SqlitePool, id: i64) -> Result<bool, StoreError> {
    let result = sqlx::query("DELETE FROM ingredients WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
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

    #[tokio::test]
    async fn test_create_ingredient() {
        let pool = setup_test_pool().await;
        let row = create_ingredient(&pool, "Flour", "g").await.unwrap();

        assert!(row.id > 0);
        assert_eq!(row.name, "Flour");
        assert_eq!(row.measurement_unit, "g");
    }

    #[tokio::test]
    async fn test_duplicate_name_unit_rows_are_allowed() {
        let pool = setup_test_pool().await;
        let first = create_ingredient(&pool, "Flour", "g").await.unwrap();
        let second = create_ingredient(&pool, "Flour", "g").await.unwrap();

        assert_ne!(first.id, second.id);
        let all = list_ingredients(&pool, None).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_get_ingredient() {
        let pool = setup_test_pool().await;
        let created = create_ingredient(&pool, "Salt", "g").await.unwrap();

        let fetched = get_ingredient(&pool, created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert!(get_ingredient(&pool, 999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_ingredients_ordered_by_name() {
        let pool = setup_test_pool().await;
        create_ingredient(&pool, "Sugar", "g").await.unwrap();
        create_ingredient(&pool, "Butter", "g").await.unwrap();
        create_ingredient(&pool, "Milk", "ml").await.unwrap();

        let all = list_ingredients(&pool, None).await.unwrap();
        let names: Vec<&str> = all.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Butter", "Milk", "Sugar"]);
    }

    #[tokio::test]
    async fn test_search_matches_case_insensitive_prefix() {
        let pool = setup_test_pool().await;
        create_ingredient(&pool, "Flour", "g").await.unwrap();
        create_ingredient(&pool, "Sea salt", "g").await.unwrap();

        let hits = list_ingredients(&pool, Some("fl")).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Flour");

        // Prefix only, not substring
        let hits = list_ingredients(&pool, Some("salt")).await.unwrap();
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn test_search_treats_wildcards_as_literals() {
        let pool = setup_test_pool().await;
        create_ingredient(&pool, "2% milk", "ml").await.unwrap();
        create_ingredient(&pool, "2x concentrated broth", "ml")
            .await
            .unwrap();
        create_ingredient(&pool, "sea_salt", "g").await.unwrap();
        create_ingredient(&pool, "seaXsalt", "g").await.unwrap();

        let hits = list_ingredients(&pool, Some("2%")).await.unwrap();
        let names: Vec<&str> = hits.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["2% milk"]);

        let hits = list_ingredients(&pool, Some("sea_")).await.unwrap();
        let names: Vec<&str> = hits.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["sea_salt"]);
    }

    #[tokio::test]
    async fn test_search_escapes_backslash() {
        let pool = setup_test_pool().await;
        create_ingredient(&pool, "half\\half cream", "ml").await.unwrap();
        create_ingredient(&pool, "half fat butter", "g").await.unwrap();

        // A trailing backslash in the term must not swallow the appended
        // wildcard or error out
        let hits = list_ingredients(&pool, Some("half\\")).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "half\\half cream");
    }

    #[tokio::test]
    async fn test_get_or_create_matches_on_name_alone() {
        let pool = setup_test_pool().await;
        let (first, created) = get_or_create(&pool, "Flour", "g").await.unwrap();
        assert!(created);

        // Same name with a different unit still resolves to the first row
        let (again, created) = get_or_create(&pool, "Flour", "kg").await.unwrap();
        assert!(!created);
        assert_eq!(again.id, first.id);
        assert_eq!(again.measurement_unit, "g");

        let all = list_ingredients(&pool, None).await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_ingredient() {
        let pool = setup_test_pool().await;
        let row = create_ingredient(&pool, "Flour", "g").await.unwrap();

        assert!(delete_ingredient(&pool, row.id).await.unwrap());
        assert!(!delete_ingredient(&pool, row.id).await.unwrap());
    }
}
