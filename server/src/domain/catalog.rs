//! Catalog service: the single entry point for recipe, user, and
//! subscription operations
//!
//! Every operation takes the caller identity as an explicit parameter;
//! there is no ambient request context. Reads assemble view types with
//! per-viewer flags, writes validate before touching the store, and the
//! store's own constraints settle races (no locks, no retries).

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use utoipa::ToSchema;

use crate::core::constants::{
    EMAIL_MAX_LEN, MAX_COOKING_TIME, MAX_INGREDIENT_AMOUNT, MIN_COOKING_TIME,
    MIN_INGREDIENT_AMOUNT, NAME_MAX_LEN, UNIT_MAX_LEN, USERNAME_MAX_LEN,
};
use crate::data::sqlite::repositories as repos;
use crate::data::types::{
    IngredientRow, IngredientTotal, NewRecipe, NewUser, RecipeFilter, RecipeIngredientDetail,
    RecipeRow, TagRow, UserRow,
};
use crate::data::{SqliteService, StoreError};
use crate::domain::{shopping_list, short_link};

// ============================================================================
// VIEW TYPES
// ============================================================================

/// User as presented to a viewer
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserView {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar: Option<String>,
    /// Whether the viewer is subscribed to this user
    pub is_subscribed: bool,
}

impl UserView {
    fn from_row(row: UserRow, is_subscribed: bool) -> Self {
        Self {
            id: row.id,
            email: row.email,
            username: row.username,
            first_name: row.first_name,
            last_name: row.last_name,
            avatar: row.avatar,
            is_subscribed,
        }
    }
}

/// Compact recipe used in subscription previews
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipePreview {
    pub id: i64,
    pub name: String,
    pub image: Option<String>,
    pub cooking_time: i64,
}

impl RecipePreview {
    fn from_row(row: RecipeRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            image: row.image,
            cooking_time: row.cooking_time,
        }
    }
}

/// Full recipe with joins and viewer flags
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeDetail {
    pub id: i64,
    pub author: UserView,
    pub name: String,
    pub image: Option<String>,
    pub text: String,
    pub cooking_time: i64,
    /// Unix timestamp of creation, untouched by updates
    pub pub_date: i64,
    pub ingredients: Vec<RecipeIngredientDetail>,
    pub tags: Vec<TagRow>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

/// One followed author with recipe previews
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SubscriptionView {
    pub author: UserView,
    /// Whether the author also subscribes back to the viewer
    pub is_mutual: bool,
    pub preview_recipes: Vec<RecipePreview>,
    pub total_recipe_count: i64,
}

/// Recipe listing query as accepted from the API layer.
///
/// The two viewer-scoped restrictions need a viewer to mean anything;
/// with an anonymous caller they match nothing rather than erroring.
#[derive(Debug, Clone, Default)]
pub struct RecipeQuery {
    pub author: Option<i64>,
    /// Match recipes carrying ANY of these tag slugs
    pub tag_slugs: Vec<String>,
    pub favorited_only: bool,
    pub in_shopping_cart_only: bool,
}

// ============================================================================
// VALIDATION
// ============================================================================

fn require_text(field: &str, value: &str, max: usize) -> Result<(), StoreError> {
    if value.trim().is_empty() {
        return Err(StoreError::validation(format!("{} must not be empty", field)));
    }
    if value.chars().count() > max {
        return Err(StoreError::validation(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }
    Ok(())
}

fn validate_recipe(new: &NewRecipe) -> Result<(), StoreError> {
    require_text("name", &new.name, NAME_MAX_LEN)?;
    if new.text.trim().is_empty() {
        return Err(StoreError::validation("text must not be empty"));
    }
    if !(MIN_COOKING_TIME..=MAX_COOKING_TIME).contains(&new.cooking_time) {
        return Err(StoreError::validation(format!(
            "cooking_time must be between {} and {}",
            MIN_COOKING_TIME, MAX_COOKING_TIME
        )));
    }
    if new.ingredients.is_empty() {
        return Err(StoreError::validation("recipe needs at least one ingredient"));
    }
    if new.tags.is_empty() {
        return Err(StoreError::validation("recipe needs at least one tag"));
    }

    let mut seen_ingredients = HashSet::new();
    for item in &new.ingredients {
        if !(MIN_INGREDIENT_AMOUNT..=MAX_INGREDIENT_AMOUNT).contains(&item.amount) {
            return Err(StoreError::validation(format!(
                "amount for ingredient {} must be between {} and {}",
                item.ingredient_id, MIN_INGREDIENT_AMOUNT, MAX_INGREDIENT_AMOUNT
            )));
        }
        if !seen_ingredients.insert(item.ingredient_id) {
            return Err(StoreError::validation(format!(
                "ingredient {} is listed more than once",
                item.ingredient_id
            )));
        }
    }

    let mut seen_tags = HashSet::new();
    for tag_id in &new.tags {
        if !seen_tags.insert(*tag_id) {
            return Err(StoreError::validation(format!(
                "tag {} is listed more than once",
                tag_id
            )));
        }
    }

    Ok(())
}

// ============================================================================
// SERVICE
// ============================================================================

pub struct CatalogService {
    database: Arc<SqliteService>,
}

impl CatalogService {
    pub fn new(database: Arc<SqliteService>) -> Self {
        Self { database }
    }

    fn pool(&self) -> &sqlx::SqlitePool {
        self.database.pool()
    }

    // ------------------------------------------------------------------
    // Users
    // ------------------------------------------------------------------

    pub async fn create_user(&self, new: NewUser) -> Result<UserView, StoreError> {
        require_text("email", &new.email, EMAIL_MAX_LEN)?;
        require_text("username", &new.username, USERNAME_MAX_LEN)?;
        // Display names may be blank, only their length is bounded
        if new.first_name.chars().count() > USERNAME_MAX_LEN
            || new.last_name.chars().count() > USERNAME_MAX_LEN
        {
            return Err(StoreError::validation(format!(
                "display names must be at most {} characters",
                USERNAME_MAX_LEN
            )));
        }
        let row = repos::create_user(self.pool(), &new).await?;
        Ok(UserView::from_row(row, false))
    }

    pub async fn get_user(&self, id: i64, viewer: Option<i64>) -> Result<UserView, StoreError> {
        let row = repos::get_user(self.pool(), id)
            .await?
            .ok_or_else(|| StoreError::not_found("user", id))?;
        let is_subscribed = match viewer {
            Some(v) => repos::subscription_exists(self.pool(), v, id).await?,
            None => false,
        };
        Ok(UserView::from_row(row, is_subscribed))
    }

    pub async fn list_users(
        &self,
        viewer: Option<i64>,
        page: u32,
        limit: u32,
    ) -> Result<(Vec<UserView>, u64), StoreError> {
        let (rows, total) = repos::list_users(self.pool(), page, limit).await?;
        let subscribed = self.subscribed_author_ids(viewer).await?;
        let views = rows
            .into_iter()
            .map(|row| {
                let flag = subscribed.contains(&row.id);
                UserView::from_row(row, flag)
            })
            .collect();
        Ok((views, total))
    }

    // ------------------------------------------------------------------
    // Ingredients
    // ------------------------------------------------------------------

    pub async fn list_ingredients(
        &self,
        search: Option<&str>,
    ) -> Result<Vec<IngredientRow>, StoreError> {
        repos::list_ingredients(self.pool(), search).await
    }

    pub async fn get_ingredient(&self, id: i64) -> Result<IngredientRow, StoreError> {
        repos::get_ingredient(self.pool(), id)
            .await?
            .ok_or_else(|| StoreError::not_found("ingredient", id))
    }

    pub async fn create_ingredient(
        &self,
        name: &str,
        measurement_unit: &str,
    ) -> Result<IngredientRow, StoreError> {
        require_text("name", name, NAME_MAX_LEN)?;
        require_text("measurement_unit", measurement_unit, UNIT_MAX_LEN)?;
        repos::create_ingredient(self.pool(), name, measurement_unit).await
    }

    /// Delete a catalog ingredient. Join rows referencing it cascade away,
    /// so recipes silently lose the ingredient.
    pub async fn delete_ingredient(&self, id: i64) -> Result<(), StoreError> {
        if !repos::delete_ingredient(self.pool(), id).await? {
            return Err(StoreError::not_found("ingredient", id));
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Tags
    // ------------------------------------------------------------------

    pub async fn list_tags(&self) -> Result<Vec<TagRow>, StoreError> {
        repos::list_tags(self.pool()).await
    }

    pub async fn get_tag(&self, id: i64) -> Result<TagRow, StoreError> {
        repos::get_tag(self.pool(), id)
            .await?
            .ok_or_else(|| StoreError::not_found("tag", id))
    }

    pub async fn create_tag(&self, name: &str, slug: &str) -> Result<TagRow, StoreError> {
        require_text("name", name, NAME_MAX_LEN)?;
        require_text("slug", slug, UNIT_MAX_LEN)?;
        repos::create_tag(self.pool(), name, slug).await
    }

    pub async fn delete_tag(&self, id: i64) -> Result<(), StoreError> {
        if !repos::delete_tag(self.pool(), id).await? {
            return Err(StoreError::not_found("tag", id));
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Recipes
    // ------------------------------------------------------------------

    pub async fn create_recipe(
        &self,
        author: i64,
        new: NewRecipe,
    ) -> Result<RecipeDetail, StoreError> {
        validate_recipe(&new)?;
        let row = repos::create_recipe(self.pool(), author, &new, |id| {
            short_link::generate(id, &new.name)
        })
        .await?;
        self.assemble_recipe(row, Some(author)).await
    }

    pub async fn get_recipe(
        &self,
        recipe_id: i64,
        viewer: Option<i64>,
    ) -> Result<RecipeDetail, StoreError> {
        let row = repos::get_recipe(self.pool(), recipe_id)
            .await?
            .ok_or_else(|| StoreError::not_found("recipe", recipe_id))?;
        self.assemble_recipe(row, viewer).await
    }

    pub async fn update_recipe(
        &self,
        recipe_id: i64,
        editor: i64,
        new: NewRecipe,
    ) -> Result<RecipeDetail, StoreError> {
        let existing = repos::get_recipe(self.pool(), recipe_id)
            .await?
            .ok_or_else(|| StoreError::not_found("recipe", recipe_id))?;
        if existing.author_id != editor {
            return Err(StoreError::PermissionDenied);
        }
        validate_recipe(&new)?;
        let row = repos::update_recipe(self.pool(), recipe_id, &new).await?;
        self.assemble_recipe(row, Some(editor)).await
    }

    pub async fn delete_recipe(&self, recipe_id: i64, editor: i64) -> Result<(), StoreError> {
        let existing = repos::get_recipe(self.pool(), recipe_id)
            .await?
            .ok_or_else(|| StoreError::not_found("recipe", recipe_id))?;
        if existing.author_id != editor {
            return Err(StoreError::PermissionDenied);
        }
        repos::delete_recipe(self.pool(), recipe_id).await?;
        Ok(())
    }

    pub async fn list_recipes(
        &self,
        query: &RecipeQuery,
        viewer: Option<i64>,
        page: u32,
        limit: u32,
    ) -> Result<(Vec<RecipeDetail>, u64), StoreError> {
        if (query.favorited_only || query.in_shopping_cart_only) && viewer.is_none() {
            return Ok((Vec::new(), 0));
        }

        let filter = RecipeFilter {
            author: query.author,
            tag_slugs: query.tag_slugs.clone(),
            favorited_by: if query.favorited_only { viewer } else { None },
            in_shopping_list_of: if query.in_shopping_cart_only { viewer } else { None },
        };
        let (rows, total) = repos::list_recipes(self.pool(), &filter, page, limit).await?;

        // Viewer flags for the whole page come from three set lookups
        let (favorites, cart) = match viewer {
            Some(v) => (
                repos::list_favorite_recipe_ids(self.pool(), v).await?,
                repos::list_shopping_list_recipe_ids(self.pool(), v).await?,
            ),
            None => (HashSet::new(), HashSet::new()),
        };
        let subscribed = self.subscribed_author_ids(viewer).await?;

        let mut details = Vec::with_capacity(rows.len());
        for row in rows {
            let ingredients = repos::list_recipe_ingredients(self.pool(), row.id).await?;
            let tags = repos::list_recipe_tags(self.pool(), row.id).await?;
            let author_row = repos::get_user(self.pool(), row.author_id)
                .await?
                .ok_or_else(|| StoreError::not_found("user", row.author_id))?;
            details.push(RecipeDetail {
                id: row.id,
                author: UserView::from_row(author_row, subscribed.contains(&row.author_id)),
                name: row.name,
                image: row.image,
                text: row.text,
                cooking_time: row.cooking_time,
                pub_date: row.pub_date,
                ingredients,
                tags,
                is_favorited: favorites.contains(&row.id),
                is_in_shopping_cart: cart.contains(&row.id),
            });
        }
        Ok((details, total))
    }

    // ------------------------------------------------------------------
    // Favorites and shopping list
    // ------------------------------------------------------------------

    pub async fn toggle_favorite(
        &self,
        user: i64,
        recipe_id: i64,
        add: bool,
    ) -> Result<(), StoreError> {
        self.require_recipe(recipe_id).await?;
        if add {
            repos::add_favorite(self.pool(), user, recipe_id).await
        } else {
            repos::remove_favorite(self.pool(), user, recipe_id).await
        }
    }

    pub async fn toggle_shopping_list(
        &self,
        user: i64,
        recipe_id: i64,
        add: bool,
    ) -> Result<(), StoreError> {
        self.require_recipe(recipe_id).await?;
        if add {
            repos::add_to_shopping_list(self.pool(), user, recipe_id).await
        } else {
            repos::remove_from_shopping_list(self.pool(), user, recipe_id).await
        }
    }

    pub async fn aggregate_shopping_list(
        &self,
        user: i64,
    ) -> Result<Vec<IngredientTotal>, StoreError> {
        repos::aggregate_ingredients(self.pool(), user).await
    }

    /// Aggregate and render as the downloadable text document
    pub async fn render_shopping_list(&self, user: i64) -> Result<String, StoreError> {
        let totals = self.aggregate_shopping_list(user).await?;
        Ok(shopping_list::render(&totals))
    }

    // ------------------------------------------------------------------
    // Subscriptions
    // ------------------------------------------------------------------

    pub async fn subscribe(&self, user: i64, author_id: i64) -> Result<(), StoreError> {
        if user == author_id {
            return Err(StoreError::SelfSubscription);
        }
        repos::add_subscription(self.pool(), user, author_id).await
    }

    pub async fn unsubscribe(&self, user: i64, author_id: i64) -> Result<(), StoreError> {
        repos::remove_subscription(self.pool(), user, author_id).await
    }

    /// Followed authors with recipe previews, most recent subscription
    /// first. `recipe_preview_limit` truncates each author's previews;
    /// `None` means all of them.
    pub async fn list_subscriptions(
        &self,
        user: i64,
        recipe_preview_limit: Option<i64>,
    ) -> Result<Vec<SubscriptionView>, StoreError> {
        let authors = repos::list_subscribed_authors(self.pool(), user).await?;
        let followers = repos::list_follower_ids(self.pool(), user).await?;

        let mut views = Vec::with_capacity(authors.len());
        for author in authors {
            let is_mutual = followers.contains(&author.id);
            let total_recipe_count = repos::count_recipes_by_author(self.pool(), author.id).await?;
            let preview_recipes =
                repos::list_recipes_by_author(self.pool(), author.id, recipe_preview_limit)
                    .await?
                    .into_iter()
                    .map(RecipePreview::from_row)
                    .collect();
            views.push(SubscriptionView {
                author: UserView::from_row(author, true),
                is_mutual,
                preview_recipes,
                total_recipe_count,
            });
        }
        Ok(views)
    }

    // ------------------------------------------------------------------
    // Short links
    // ------------------------------------------------------------------

    /// Token for a recipe, assigning one first for rows that predate
    /// short links. The token never changes once stored.
    pub async fn get_or_create_short_link(&self, recipe_id: i64) -> Result<String, StoreError> {
        let row = repos::get_recipe(self.pool(), recipe_id)
            .await?
            .ok_or_else(|| StoreError::not_found("recipe", recipe_id))?;
        if let Some(token) = row.short_link {
            return Ok(token);
        }
        let token = short_link::generate(row.id, &row.name);
        repos::set_short_link(self.pool(), row.id, &token).await?;
        Ok(token)
    }

    pub async fn resolve_short_link(&self, token: &str) -> Result<i64, StoreError> {
        let row = repos::find_by_short_link(self.pool(), token)
            .await?
            .ok_or_else(|| StoreError::not_found("recipe", token))?;
        Ok(row.id)
    }

    // ------------------------------------------------------------------
    // Internal helpers
    // ------------------------------------------------------------------

    async fn require_recipe(&self, recipe_id: i64) -> Result<(), StoreError> {
        if repos::get_recipe(self.pool(), recipe_id).await?.is_none() {
            return Err(StoreError::not_found("recipe", recipe_id));
        }
        Ok(())
    }

    async fn subscribed_author_ids(
        &self,
        viewer: Option<i64>,
    ) -> Result<HashSet<i64>, StoreError> {
        match viewer {
            Some(v) => Ok(repos::list_subscribed_authors(self.pool(), v)
                .await?
                .into_iter()
                .map(|u| u.id)
                .collect()),
            None => Ok(HashSet::new()),
        }
    }

    async fn assemble_recipe(
        &self,
        row: RecipeRow,
        viewer: Option<i64>,
    ) -> Result<RecipeDetail, StoreError> {
        let ingredients = repos::list_recipe_ingredients(self.pool(), row.id).await?;
        let tags = repos::list_recipe_tags(self.pool(), row.id).await?;
        let author_row = repos::get_user(self.pool(), row.author_id)
            .await?
            .ok_or_else(|| StoreError::not_found("user", row.author_id))?;

        let (is_favorited, is_in_shopping_cart, is_subscribed) = match viewer {
            Some(v) => (
                repos::is_favorite(self.pool(), v, row.id).await?,
                repos::shopping_list_contains(self.pool(), v, row.id).await?,
                repos::subscription_exists(self.pool(), v, row.author_id).await?,
            ),
            None => (false, false, false),
        };

        Ok(RecipeDetail {
            id: row.id,
            author: UserView::from_row(author_row, is_subscribed),
            name: row.name,
            image: row.image,
            text: row.text,
            cooking_time: row.cooking_time,
            pub_date: row.pub_date,
            ingredients,
            tags,
            is_favorited,
            is_in_shopping_cart,
        })
    }
}
