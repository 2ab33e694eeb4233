//! SQLite schema definitions
//!
//! Version 1 carried everything except recipe short links; version 2 added
//! them. Fresh databases apply the consolidated schema below in one step.

/// Current schema version
pub const SCHEMA_VERSION: i32 = 2;

/// Complete schema SQL
pub const SCHEMA: &str = r#"
-- =============================================================================
-- Infrastructure: Schema version tracking
-- =============================================================================
CREATE TABLE IF NOT EXISTS schema_version (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    version INTEGER NOT NULL,
    applied_at INTEGER NOT NULL,
    description TEXT
);

CREATE TABLE IF NOT EXISTS schema_migrations (
    version INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    applied_at INTEGER NOT NULL,
    checksum TEXT NOT NULL,
    execution_time_ms INTEGER,
    success INTEGER NOT NULL DEFAULT 1
);

-- =============================================================================
-- 1. Users (identity rows only; authentication lives upstream)
-- =============================================================================
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    email TEXT NOT NULL UNIQUE CHECK(length(email) >= 3 AND length(email) <= 254),
    username TEXT NOT NULL UNIQUE CHECK(length(username) >= 1 AND length(username) <= 150),
    first_name TEXT NOT NULL CHECK(length(first_name) <= 150),
    last_name TEXT NOT NULL CHECK(length(last_name) <= 150),
    avatar TEXT,
    created_at INTEGER NOT NULL
);

-- =============================================================================
-- 2. Ingredients (shared catalog)
-- =============================================================================
-- No uniqueness on (name, measurement_unit): duplicate catalog rows are
-- allowed and merge by name+unit at aggregation time.
CREATE TABLE IF NOT EXISTS ingredients (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL CHECK(length(name) >= 1 AND length(name) <= 64),
    measurement_unit TEXT NOT NULL CHECK(length(measurement_unit) >= 1 AND length(measurement_unit) <= 64)
);

CREATE INDEX IF NOT EXISTS idx_ingredients_name ON ingredients(name);

-- =============================================================================
-- 3. Tags (shared catalog)
-- =============================================================================
CREATE TABLE IF NOT EXISTS tags (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE CHECK(length(name) >= 1 AND length(name) <= 64),
    slug TEXT NOT NULL UNIQUE CHECK(length(slug) >= 1 AND length(slug) <= 64)
);

-- =============================================================================
-- 4. Recipes (references users)
-- =============================================================================
CREATE TABLE IF NOT EXISTS recipes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    author_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    name TEXT NOT NULL CHECK(length(name) >= 1 AND length(name) <= 64),
    image TEXT,
    text TEXT NOT NULL,
    cooking_time INTEGER NOT NULL CHECK(cooking_time >= 1 AND cooking_time <= 10000),
    pub_date INTEGER NOT NULL,
    short_link TEXT CHECK(short_link IS NULL OR length(short_link) <= 20)
);

CREATE INDEX IF NOT EXISTS idx_recipes_author ON recipes(author_id);
CREATE INDEX IF NOT EXISTS idx_recipes_pub_date ON recipes(pub_date DESC, id DESC);

-- Nullable uniqueness: rows created before version 2 have no link yet
CREATE UNIQUE INDEX IF NOT EXISTS idx_recipes_short_link
    ON recipes(short_link)
    WHERE short_link IS NOT NULL;

-- =============================================================================
-- 5. Recipe Ingredients (junction, references recipes and ingredients)
-- =============================================================================
CREATE TABLE IF NOT EXISTS recipe_ingredients (
    recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
    ingredient_id INTEGER NOT NULL REFERENCES ingredients(id) ON DELETE CASCADE,
    amount INTEGER NOT NULL CHECK(amount >= 1 AND amount <= 10000),
    PRIMARY KEY (recipe_id, ingredient_id)
);

CREATE INDEX IF NOT EXISTS idx_recipe_ingredients_ingredient ON recipe_ingredients(ingredient_id);

-- =============================================================================
-- 6. Recipe Tags (junction, references recipes and tags)
-- =============================================================================
CREATE TABLE IF NOT EXISTS recipe_tags (
    recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
    tag_id INTEGER NOT NULL REFERENCES tags(id) ON DELETE CASCADE,
    PRIMARY KEY (recipe_id, tag_id)
);

CREATE INDEX IF NOT EXISTS idx_recipe_tags_tag ON recipe_tags(tag_id);

-- =============================================================================
-- 7. Favorites (user-scoped, references users and recipes)
-- =============================================================================
CREATE TABLE IF NOT EXISTS favorites (
    user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
    created_at INTEGER NOT NULL,
    PRIMARY KEY (user_id, recipe_id)
);

CREATE INDEX IF NOT EXISTS idx_favorites_recipe ON favorites(recipe_id);

-- =============================================================================
-- 8. Shopping List Entries (user-scoped, references users and recipes)
-- =============================================================================
CREATE TABLE IF NOT EXISTS shopping_list_entries (
    user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
    created_at INTEGER NOT NULL,
    PRIMARY KEY (user_id, recipe_id)
);

CREATE INDEX IF NOT EXISTS idx_shopping_list_recipe ON shopping_list_entries(recipe_id);

-- =============================================================================
-- 9. Subscriptions (user follows author, both reference users)
-- =============================================================================
-- user_id != author_id is validated at write time, not stored as a constraint.
CREATE TABLE IF NOT EXISTS subscriptions (
    user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    author_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    created_at INTEGER NOT NULL,
    PRIMARY KEY (user_id, author_id)
);

CREATE INDEX IF NOT EXISTS idx_subscriptions_author ON subscriptions(author_id);
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::assertions_on_constants)]
    fn test_schema_version_is_positive() {
        assert!(SCHEMA_VERSION > 0);
    }

    #[test]
    #[allow(clippy::const_is_empty)]
    fn test_schema_is_not_empty() {
        assert!(!SCHEMA.is_empty());
    }

    #[test]
    fn test_schema_contains_required_tables() {
        let required_tables = [
            "schema_version",
            "schema_migrations",
            "users",
            "ingredients",
            "tags",
            "recipes",
            "recipe_ingredients",
            "recipe_tags",
            "favorites",
            "shopping_list_entries",
            "subscriptions",
        ];

        for table in required_tables {
            assert!(
                SCHEMA.contains(&format!("CREATE TABLE IF NOT EXISTS {}", table)),
                "Schema missing table: {}",
                table
            );
        }
    }

    #[test]
    fn test_schema_has_no_ingredient_pair_uniqueness() {
        // Duplicate (name, unit) catalog rows are an upheld source behavior;
        // the only index on ingredients must be the plain name index.
        assert!(SCHEMA.contains("CREATE INDEX IF NOT EXISTS idx_ingredients_name"));
        assert!(!SCHEMA.contains("UNIQUE INDEX IF NOT EXISTS idx_ingredients"));
    }

    #[test]
    fn test_schema_short_link_uniqueness_is_partial() {
        assert!(SCHEMA.contains("CREATE UNIQUE INDEX IF NOT EXISTS idx_recipes_short_link"));
        assert!(SCHEMA.contains("WHERE short_link IS NOT NULL"));
    }
}
