//! Recipe repository for SQLite operations
//!
//! Creation is two-phase inside one transaction: the recipe row is inserted
//! first to obtain its id, join rows follow, and the short link derived from
//! the id is set last. Updates fully replace the join sets and never touch
//! `pub_date` or `short_link`.

use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::data::error::StoreError;
use crate::data::types::{NewRecipe, RecipeFilter, RecipeIngredientDetail, RecipeRow, TagRow};

type RecipeTuple = (
    i64,
    i64,
    String,
    Option<String>,
    String,
    i64,
    i64,
    Option<String>,
);

/// Create a recipe with its ingredient amounts and tags.
///
/// `link_token` derives the short link from the freshly assigned id; the
/// whole write commits atomically or not at all. A token collision is
/// rejected by the unique index as `Duplicate` with no retry.
pub async fn create_recipe(
    pool: &SqlitePool,
    author_id: i64,
    new: &NewRecipe,
    link_token: impl FnOnce(i64) -> String,
) -> Result<RecipeRow, StoreError> {
    let now = chrono::Utc::now().timestamp();

    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        "INSERT INTO recipes (author_id, name, image, text, cooking_time, pub_date) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(author_id)
    .bind(&new.name)
    .bind(&new.image)
    .bind(&new.text)
    .bind(new.cooking_time)
    .bind(now)
    .execute(&mut *tx)
    .await
    .map_err(|e| StoreError::from_write(e, "recipes", Some(("user", author_id))))?;

    let id = result.last_insert_rowid();

    insert_joins(&mut tx, id, new).await?;

    let token = link_token(id);
    sqlx::query("UPDATE recipes SET short_link = ? WHERE id = ?")
        .bind(&token)
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| StoreError::from_write(e, "recipes.short_link", None))?;

    tx.commit().await?;

    Ok(RecipeRow {
        id,
        author_id,
        name: new.name.clone(),
        image: new.image.clone(),
        text: new.text.clone(),
        cooking_time: new.cooking_time,
        pub_date: now,
        short_link: Some(token),
    })
}

/// Insert join rows for a recipe inside an open transaction
async fn insert_joins(
    tx: &mut sqlx::Transaction<'_, Sqlite>,
    recipe_id: i64,
    new: &NewRecipe,
) -> Result<(), StoreError> {
    for item in &new.ingredients {
        sqlx::query(
            "INSERT INTO recipe_ingredients (recipe_id, ingredient_id, amount) VALUES (?, ?, ?)",
        )
        .bind(recipe_id)
        .bind(item.ingredient_id)
        .bind(item.amount)
        .execute(&mut **tx)
        .await
        .map_err(|e| {
            StoreError::from_write(
                e,
                "recipe_ingredients(recipe_id, ingredient_id)",
                Some(("ingredient", item.ingredient_id)),
            )
        })?;
    }

    for tag_id in &new.tags {
        sqlx::query("INSERT INTO recipe_tags (recipe_id, tag_id) VALUES (?, ?)")
            .bind(recipe_id)
            .bind(*tag_id)
            .execute(&mut **tx)
            .await
            .map_err(|e| {
                StoreError::from_write(
                    e,
                    "recipe_tags(recipe_id, tag_id)",
                    Some(("tag", *tag_id)),
                )
            })?;
    }

    Ok(())
}

/// Get a recipe by ID
pub async fn get_recipe(pool: &SqlitePool, id: i64) -> Result<Option<RecipeRow>, StoreError> {
    let row = sqlx::query_as::<_, RecipeTuple>(
        "SELECT id, author_id, name, image, text, cooking_time, pub_date, short_link FROM recipes WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(into_recipe_row))
}

/// List a recipe's ingredients with names, units, and amounts
pub async fn list_ingredients_for(
    pool: &SqlitePool,
    recipe_id: i64,
) -> Result<Vec<RecipeIngredientDetail>, StoreError> {
    let rows = sqlx::query_as::<_, (i64, String, String, i64)>(
        r#"
        SELECT ri.ingredient_id, i.name, i.measurement_unit, ri.amount
        FROM recipe_ingredients ri
        JOIN ingredients i ON i.id = ri.ingredient_id
        WHERE ri.recipe_id = ?
        ORDER BY i.name, ri.ingredient_id
        "#,
    )
    .bind(recipe_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(
            |(ingredient_id, name, measurement_unit, amount)| RecipeIngredientDetail {
                ingredient_id,
                name,
                measurement_unit,
                amount,
            },
        )
        .collect())
}

/// List a recipe's tags
pub async fn list_tags_for(pool: &SqlitePool, recipe_id: i64) -> Result<Vec<TagRow>, StoreError> {
    let rows = sqlx::query_as::<_, (i64, String, String)>(
        r#"
        SELECT t.id, t.name, t.slug
        FROM recipe_tags rt
        JOIN tags t ON t.id = rt.tag_id
        WHERE rt.recipe_id = ?
        ORDER BY t.name
        "#,
    )
    .bind(recipe_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(id, name, slug)| TagRow { id, name, slug })
        .collect())
}

/// Append filter conditions shared by the listing and count queries
fn push_filters(qb: &mut QueryBuilder<'_, Sqlite>, filter: &RecipeFilter) {
    if let Some(author) = filter.author {
        qb.push(" AND r.author_id = ").push_bind(author);
    }
    if !filter.tag_slugs.is_empty() {
        qb.push(
            " AND r.id IN (SELECT rt.recipe_id FROM recipe_tags rt JOIN tags t ON t.id = rt.tag_id WHERE t.slug IN (",
        );
        {
            let mut slugs = qb.separated(", ");
            for slug in &filter.tag_slugs {
                slugs.push_bind(slug.clone());
            }
        }
        qb.push("))");
    }
    if let Some(user_id) = filter.favorited_by {
        qb.push(" AND r.id IN (SELECT recipe_id FROM favorites WHERE user_id = ")
            .push_bind(user_id)
            .push(")");
    }
    if let Some(user_id) = filter.in_shopping_list_of {
        qb.push(" AND r.id IN (SELECT recipe_id FROM shopping_list_entries WHERE user_id = ")
            .push_bind(user_id)
            .push(")");
    }
}

/// List recipes newest first with pagination. Filters combine with AND;
/// the tag filter matches any of the given slugs.
pub async fn list_recipes(
    pool: &SqlitePool,
    filter: &RecipeFilter,
    page: u32,
    limit: u32,
) -> Result<(Vec<RecipeRow>, u64), StoreError> {
    let offset = (page.saturating_sub(1)) * limit;

    let mut qb = QueryBuilder::<Sqlite>::new(
        "SELECT r.id, r.author_id, r.name, r.image, r.text, r.cooking_time, r.pub_date, r.short_link FROM recipes r WHERE 1=1",
    );
    push_filters(&mut qb, filter);
    qb.push(" ORDER BY r.pub_date DESC, r.id DESC LIMIT ");
    qb.push_bind(limit as i64);
    qb.push(" OFFSET ");
    qb.push_bind(offset as i64);

    let rows: Vec<RecipeTuple> = qb.build_query_as().fetch_all(pool).await?;

    let mut count_qb = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM recipes r WHERE 1=1");
    push_filters(&mut count_qb, filter);
    let total: i64 = count_qb.build_query_scalar().fetch_one(pool).await?;

    Ok((
        rows.into_iter().map(into_recipe_row).collect(),
        total as u64,
    ))
}

/// Replace a recipe's fields and both join sets. `pub_date` and
/// `short_link` are left as they were.
pub async fn update_recipe(
    pool: &SqlitePool,
    recipe_id: i64,
    new: &NewRecipe,
) -> Result<RecipeRow, StoreError> {
    let mut tx = pool.begin().await?;

    let result =
        sqlx::query("UPDATE recipes SET name = ?, image = ?, text = ?, cooking_time = ? WHERE id = ?")
            .bind(&new.name)
            .bind(&new.image)
            .bind(&new.text)
            .bind(new.cooking_time)
            .bind(recipe_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| StoreError::from_write(e, "recipes", None))?;

    if result.rows_affected() == 0 {
        return Err(StoreError::not_found("recipe", recipe_id));
    }

    sqlx::query("DELETE FROM recipe_ingredients WHERE recipe_id = ?")
        .bind(recipe_id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM recipe_tags WHERE recipe_id = ?")
        .bind(recipe_id)
        .execute(&mut *tx)
        .await?;

    insert_joins(&mut tx, recipe_id, new).await?;

    let row: RecipeTuple = sqlx::query_as(
        "SELECT id, author_id, name, image, text, cooking_time, pub_date, short_link FROM recipes WHERE id = ?",
    )
    .bind(recipe_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(into_recipe_row(row))
}

/// Delete a recipe by ID, cascading its joins, favorites, and shopping
/// list entries
pub async fn delete_recipe(pool: &SqlitePool, id: i64) -> Result<bool, StoreError> {
    let result = sqlx::query("DELETE FROM recipes WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Count recipes authored by a user
pub async fn count_by_author(pool: &SqlitePool, author_id: i64) -> Result<i64, StoreError> {
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM recipes WHERE author_id = ?")
        .bind(author_id)
        .fetch_one(pool)
        .await?;

    Ok(count.0)
}

/// List recipes authored by a user, newest first. A negative or absent
/// limit returns all of them.
pub async fn list_by_author(
    pool: &SqlitePool,
    author_id: i64,
    limit: Option<i64>,
) -> Result<Vec<RecipeRow>, StoreError> {
    let rows = sqlx::query_as::<_, RecipeTuple>(
        "SELECT id, author_id, name, image, text, cooking_time, pub_date, short_link FROM recipes WHERE author_id = ? ORDER BY pub_date DESC, id DESC LIMIT ?",
    )
    .bind(author_id)
    .bind(limit.unwrap_or(-1))
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(into_recipe_row).collect())
}

/// Find the recipe carrying a short link token
pub async fn find_by_short_link(
    pool: &SqlitePool,
    token: &str,
) -> Result<Option<RecipeRow>, StoreError> {
    let row = sqlx::query_as::<_, RecipeTuple>(
        "SELECT id, author_id, name, image, text, cooking_time, pub_date, short_link FROM recipes WHERE short_link = ?",
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(into_recipe_row))
}

/// Persist a short link token for a recipe that predates them
pub async fn set_short_link(
    pool: &SqlitePool,
    recipe_id: i64,
    token: &str,
) -> Result<(), StoreError> {
    sqlx::query("UPDATE recipes SET short_link = ? WHERE id = ?")
        .bind(token)
        .bind(recipe_id)
        .execute(pool)
        .await
        .map_err(|e| StoreError::from_write(e, "recipes.short_link", None))?;

    Ok(())
}

fn into_recipe_row(
    (id, author_id, name, image, text, cooking_time, pub_date, short_link): RecipeTuple,
) -> RecipeRow {
    RecipeRow {
        id,
        author_id,
        name,
        image,
        text,
        cooking_time,
        pub_date,
        short_link,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sqlite::repositories::{favorite, ingredient, shopping_list, tag, user};
    use crate::data::types::{IngredientAmount, NewUser};

    async fn setup_test_pool() -> SqlitePool {
        let pool = SqlitePool::connect(":memory:").await.unwrap();
        sqlx::query(crate::data::sqlite::schema::SCHEMA)
            .execute(&pool)
            .await
            .unwrap();
        pool
    }

    async fn seed_user(pool: &SqlitePool, n: u32) -> i64 {
        user::create_user(
            pool,
            &NewUser {
                email: format!("cook{}@example.com", n),
                username: format!("cook{}", n),
                first_name: "Test".to_string(),
                last_name: "Cook".to_string(),
                avatar: None,
            },
        )
        .await
        .unwrap()
        .id
    }

    /// Seeds two ingredients (Flour g, Sugar g) and two tags
    async fn seed_catalog(pool: &SqlitePool) -> (Vec<i64>, Vec<i64>) {
        let flour = ingredient::create_ingredient(pool, "Flour", "g")
            .await
            .unwrap();
        let sugar = ingredient::create_ingredient(pool, "Sugar", "g")
            .await
            .unwrap();
        let breakfast = tag::create_tag(pool, "Breakfast", "breakfast").await.unwrap();
        let dinner = tag::create_tag(pool, "Dinner", "dinner").await.unwrap();
        (vec![flour.id, sugar.id], vec![breakfast.id, dinner.id])
    }

    fn recipe_input(name: &str, ingredients: &[(i64, i64)], tags: &[i64]) -> NewRecipe {
        NewRecipe {
            name: name.to_string(),
            image: None,
            text: "Mix and bake.".to_string(),
            cooking_time: 30,
            ingredients: ingredients
                .iter()
                .map(|&(ingredient_id, amount)| IngredientAmount {
                    ingredient_id,
                    amount,
                })
                .collect(),
            tags: tags.to_vec(),
        }
    }

    fn test_token(id: i64) -> String {
        format!("{:08x}", id)
    }

    #[tokio::test]
    async fn test_create_recipe() {
        let pool = setup_test_pool().await;
        let author = seed_user(&pool, 1).await;
        let (ingredients, tags) = seed_catalog(&pool).await;

        let new = recipe_input(
            "Pancakes",
            &[(ingredients[0], 500), (ingredients[1], 50)],
            &[tags[0]],
        );
        let recipe = create_recipe(&pool, author, &new, test_token).await.unwrap();

        assert!(recipe.id > 0);
        assert_eq!(recipe.author_id, author);
        assert_eq!(recipe.name, "Pancakes");
        assert_eq!(recipe.cooking_time, 30);
        assert_eq!(recipe.short_link.as_deref(), Some("00000001"));

        let details = list_ingredients_for(&pool, recipe.id).await.unwrap();
        assert_eq!(details.len(), 2);
        assert_eq!(details[0].name, "Flour");
        assert_eq!(details[0].amount, 500);

        let recipe_tags = list_tags_for(&pool, recipe.id).await.unwrap();
        assert_eq!(recipe_tags.len(), 1);
        assert_eq!(recipe_tags[0].slug, "breakfast");
    }

    #[tokio::test]
    async fn test_create_recipe_unknown_ingredient_rolls_back() {
        let pool = setup_test_pool().await;
        let author = seed_user(&pool, 1).await;
        let (_, tags) = seed_catalog(&pool).await;

        let new = recipe_input("Pancakes", &[(999, 100)], &[tags[0]]);
        let err = create_recipe(&pool, author, &new, test_token)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::MissingReference {
                entity: "ingredient",
                id: 999
            }
        ));

        // Nothing committed
        let (rows, total) = list_recipes(&pool, &RecipeFilter::default(), 1, 10)
            .await
            .unwrap();
        assert!(rows.is_empty());
        assert_eq!(total, 0);
    }

    #[tokio::test]
    async fn test_create_recipe_unknown_tag() {
        let pool = setup_test_pool().await;
        let author = seed_user(&pool, 1).await;
        let (ingredients, _) = seed_catalog(&pool).await;

        let new = recipe_input("Pancakes", &[(ingredients[0], 100)], &[999]);
        let err = create_recipe(&pool, author, &new, test_token)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::MissingReference {
                entity: "tag",
                id: 999
            }
        ));
    }

    #[tokio::test]
    async fn test_create_recipe_unknown_author() {
        let pool = setup_test_pool().await;
        let (ingredients, tags) = seed_catalog(&pool).await;

        let new = recipe_input("Pancakes", &[(ingredients[0], 100)], &[tags[0]]);
        let err = create_recipe(&pool, 999, &new, test_token).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::MissingReference {
                entity: "user",
                id: 999
            }
        ));
    }

    #[tokio::test]
    async fn test_create_recipe_repeated_ingredient_is_duplicate() {
        let pool = setup_test_pool().await;
        let author = seed_user(&pool, 1).await;
        let (ingredients, tags) = seed_catalog(&pool).await;

        let new = recipe_input(
            "Pancakes",
            &[(ingredients[0], 100), (ingredients[0], 200)],
            &[tags[0]],
        );
        let err = create_recipe(&pool, author, &new, test_token)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Duplicate { .. }));
    }

    #[tokio::test]
    async fn test_create_recipe_short_link_collision_rolls_back() {
        let pool = setup_test_pool().await;
        let author = seed_user(&pool, 1).await;
        let (ingredients, tags) = seed_catalog(&pool).await;

        let new = recipe_input("First", &[(ingredients[0], 100)], &[tags[0]]);
        create_recipe(&pool, author, &new, |_| "collide".to_string())
            .await
            .unwrap();

        let new = recipe_input("Second", &[(ingredients[0], 100)], &[tags[0]]);
        let err = create_recipe(&pool, author, &new, |_| "collide".to_string())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Duplicate {
                constraint: "recipes.short_link"
            }
        ));

        let (_, total) = list_recipes(&pool, &RecipeFilter::default(), 1, 10)
            .await
            .unwrap();
        assert_eq!(total, 1);
    }

    #[tokio::test]
    async fn test_list_recipes_newest_first() {
        let pool = setup_test_pool().await;
        let author = seed_user(&pool, 1).await;
        let (ingredients, tags) = seed_catalog(&pool).await;

        let mut ids = Vec::new();
        for name in ["A", "B", "C"] {
            let new = recipe_input(name, &[(ingredients[0], 100)], &[tags[0]]);
            ids.push(create_recipe(&pool, author, &new, test_token).await.unwrap().id);
        }

        // Same pub_date second: id is the tiebreak, newest insert first
        let (rows, total) = list_recipes(&pool, &RecipeFilter::default(), 1, 10)
            .await
            .unwrap();
        assert_eq!(total, 3);
        let listed: Vec<i64> = rows.iter().map(|r| r.id).collect();
        assert_eq!(listed, vec![ids[2], ids[1], ids[0]]);
    }

    #[tokio::test]
    async fn test_list_recipes_pagination() {
        let pool = setup_test_pool().await;
        let author = seed_user(&pool, 1).await;
        let (ingredients, tags) = seed_catalog(&pool).await;

        for n in 0..5 {
            let new = recipe_input(&format!("R{}", n), &[(ingredients[0], 100)], &[tags[0]]);
            create_recipe(&pool, author, &new, test_token).await.unwrap();
        }

        let (rows, total) = list_recipes(&pool, &RecipeFilter::default(), 2, 2)
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(total, 5);

        let (rows, _) = list_recipes(&pool, &RecipeFilter::default(), 3, 2)
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn test_list_recipes_filter_author() {
        let pool = setup_test_pool().await;
        let alice = seed_user(&pool, 1).await;
        let bob = seed_user(&pool, 2).await;
        let (ingredients, tags) = seed_catalog(&pool).await;

        let new = recipe_input("Alices", &[(ingredients[0], 100)], &[tags[0]]);
        create_recipe(&pool, alice, &new, test_token).await.unwrap();
        let new = recipe_input("Bobs", &[(ingredients[0], 100)], &[tags[0]]);
        create_recipe(&pool, bob, &new, test_token).await.unwrap();

        let filter = RecipeFilter {
            author: Some(alice),
            ..Default::default()
        };
        let (rows, total) = list_recipes(&pool, &filter, 1, 10).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(rows[0].name, "Alices");
    }

    #[tokio::test]
    async fn test_list_recipes_filter_tags_any_of() {
        let pool = setup_test_pool().await;
        let author = seed_user(&pool, 1).await;
        let (ingredients, tags) = seed_catalog(&pool).await;

        let new = recipe_input("Morning", &[(ingredients[0], 100)], &[tags[0]]);
        let morning = create_recipe(&pool, author, &new, test_token).await.unwrap();
        let new = recipe_input("Evening", &[(ingredients[0], 100)], &[tags[1]]);
        let evening = create_recipe(&pool, author, &new, test_token).await.unwrap();
        let new = recipe_input("Both", &[(ingredients[0], 100)], &[tags[0], tags[1]]);
        let both = create_recipe(&pool, author, &new, test_token).await.unwrap();

        let filter = RecipeFilter {
            tag_slugs: vec!["breakfast".to_string()],
            ..Default::default()
        };
        let (rows, _) = list_recipes(&pool, &filter, 1, 10).await.unwrap();
        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        assert!(ids.contains(&morning.id));
        assert!(ids.contains(&both.id));
        assert!(!ids.contains(&evening.id));

        // A recipe matching several requested slugs appears once
        let filter = RecipeFilter {
            tag_slugs: vec!["breakfast".to_string(), "dinner".to_string()],
            ..Default::default()
        };
        let (rows, total) = list_recipes(&pool, &filter, 1, 10).await.unwrap();
        assert_eq!(total, 3);
        assert_eq!(rows.len(), 3);
    }

    #[tokio::test]
    async fn test_list_recipes_filter_favorited_and_shopping_list() {
        let pool = setup_test_pool().await;
        let author = seed_user(&pool, 1).await;
        let viewer = seed_user(&pool, 2).await;
        let (ingredients, tags) = seed_catalog(&pool).await;

        let new = recipe_input("Liked", &[(ingredients[0], 100)], &[tags[0]]);
        let liked = create_recipe(&pool, author, &new, test_token).await.unwrap();
        let new = recipe_input("Listed", &[(ingredients[0], 100)], &[tags[0]]);
        let listed = create_recipe(&pool, author, &new, test_token).await.unwrap();

        favorite::add(&pool, viewer, liked.id).await.unwrap();
        shopping_list::add(&pool, viewer, listed.id).await.unwrap();

        let filter = RecipeFilter {
            favorited_by: Some(viewer),
            ..Default::default()
        };
        let (rows, _) = list_recipes(&pool, &filter, 1, 10).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, liked.id);

        let filter = RecipeFilter {
            in_shopping_list_of: Some(viewer),
            ..Default::default()
        };
        let (rows, _) = list_recipes(&pool, &filter, 1, 10).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, listed.id);
    }

    #[tokio::test]
    async fn test_update_recipe_replaces_joins() {
        let pool = setup_test_pool().await;
        let author = seed_user(&pool, 1).await;
        let (ingredients, tags) = seed_catalog(&pool).await;

        let new = recipe_input("Pancakes", &[(ingredients[0], 500)], &[tags[0]]);
        let created = create_recipe(&pool, author, &new, test_token).await.unwrap();

        let mut replacement = recipe_input("Crepes", &[(ingredients[1], 250)], &[tags[1]]);
        replacement.cooking_time = 45;
        let updated = update_recipe(&pool, created.id, &replacement).await.unwrap();

        assert_eq!(updated.name, "Crepes");
        assert_eq!(updated.cooking_time, 45);
        // Immutable fields survive the update
        assert_eq!(updated.pub_date, created.pub_date);
        assert_eq!(updated.short_link, created.short_link);

        let details = list_ingredients_for(&pool, created.id).await.unwrap();
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].ingredient_id, ingredients[1]);
        assert_eq!(details[0].amount, 250);

        let recipe_tags = list_tags_for(&pool, created.id).await.unwrap();
        assert_eq!(recipe_tags.len(), 1);
        assert_eq!(recipe_tags[0].slug, "dinner");
    }

    #[tokio::test]
    async fn test_update_missing_recipe() {
        let pool = setup_test_pool().await;
        let (ingredients, tags) = seed_catalog(&pool).await;

        let new = recipe_input("Ghost", &[(ingredients[0], 100)], &[tags[0]]);
        let err = update_recipe(&pool, 999, &new).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { entity: "recipe", .. }));
    }

    #[tokio::test]
    async fn test_delete_recipe_cascades() {
        let pool = setup_test_pool().await;
        let author = seed_user(&pool, 1).await;
        let viewer = seed_user(&pool, 2).await;
        let (ingredients, tags) = seed_catalog(&pool).await;

        let new = recipe_input("Doomed", &[(ingredients[0], 100)], &[tags[0]]);
        let recipe = create_recipe(&pool, author, &new, test_token).await.unwrap();
        favorite::add(&pool, viewer, recipe.id).await.unwrap();
        shopping_list::add(&pool, viewer, recipe.id).await.unwrap();

        assert!(delete_recipe(&pool, recipe.id).await.unwrap());

        assert!(get_recipe(&pool, recipe.id).await.unwrap().is_none());
        assert!(list_ingredients_for(&pool, recipe.id).await.unwrap().is_empty());
        assert!(list_tags_for(&pool, recipe.id).await.unwrap().is_empty());
        assert!(!favorite::is_favorite(&pool, viewer, recipe.id).await.unwrap());
        assert!(!shopping_list::contains(&pool, viewer, recipe.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_by_author_with_limit() {
        let pool = setup_test_pool().await;
        let author = seed_user(&pool, 1).await;
        let (ingredients, tags) = seed_catalog(&pool).await;

        for n in 0..4 {
            let new = recipe_input(&format!("R{}", n), &[(ingredients[0], 100)], &[tags[0]]);
            create_recipe(&pool, author, &new, test_token).await.unwrap();
        }

        assert_eq!(count_by_author(&pool, author).await.unwrap(), 4);
        assert_eq!(list_by_author(&pool, author, None).await.unwrap().len(), 4);
        let limited = list_by_author(&pool, author, Some(2)).await.unwrap();
        assert_eq!(limited.len(), 2);
        assert_eq!(limited[0].name, "R3");
    }

    #[tokio::test]
    async fn test_find_by_short_link() {
        let pool = setup_test_pool().await;
        let author = seed_user(&pool, 1).await;
        let (ingredients, tags) = seed_catalog(&pool).await;

        let new = recipe_input("Linked", &[(ingredients[0], 100)], &[tags[0]]);
        let recipe = create_recipe(&pool, author, &new, test_token).await.unwrap();

        let token = recipe.short_link.clone().unwrap();
        let found = find_by_short_link(&pool, &token).await.unwrap().unwrap();
        assert_eq!(found.id, recipe.id);

        assert!(find_by_short_link(&pool, "missing1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_short_link_rejects_taken_token() {
        let pool = setup_test_pool().await;
        let author = seed_user(&pool, 1).await;
        let (ingredients, tags) = seed_catalog(&pool).await;

        let new = recipe_input("First", &[(ingredients[0], 100)], &[tags[0]]);
        let first = create_recipe(&pool, author, &new, test_token).await.unwrap();
        let new = recipe_input("Second", &[(ingredients[0], 100)], &[tags[0]]);
        let second = create_recipe(&pool, author, &new, test_token).await.unwrap();

        let taken = first.short_link.unwrap();
        let err = set_short_link(&pool, second.id, &taken).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::Duplicate {
                constraint: "recipes.short_link"
            }
        ));
    }
}
