//! SQLite repositories
//!
//! Types (UserRow, RecipeRow, etc.) should be imported from `crate::data::types`.

pub mod favorite;
pub mod ingredient;
pub mod recipe;
pub mod shopping_list;
pub mod subscription;
pub mod tag;
pub mod user;

pub use favorite::{
    add as add_favorite, is_favorite, list_recipe_ids as list_favorite_recipe_ids,
    remove as remove_favorite,
};
pub use ingredient::{
    create_ingredient, delete_ingredient, get_ingredient,
    get_or_create as get_or_create_ingredient, list_ingredients,
};
pub use recipe::{
    count_by_author as count_recipes_by_author, create_recipe, delete_recipe, find_by_short_link,
    get_recipe, list_by_author as list_recipes_by_author,
    list_ingredients_for as list_recipe_ingredients, list_recipes, list_tags_for as list_recipe_tags,
    set_short_link, update_recipe,
};
pub use shopping_list::{
    add as add_to_shopping_list, aggregate_ingredients, contains as shopping_list_contains,
    list_recipe_ids as list_shopping_list_recipe_ids, remove as remove_from_shopping_list,
};
pub use subscription::{
    add as add_subscription, exists as subscription_exists, list_follower_ids,
    list_for_user as list_subscribed_authors, remove as remove_subscription,
};
pub use tag::{create_tag, delete_tag, get_or_create as get_or_create_tag, get_tag, list_tags};
pub use user::{create_user, delete_user, get_by_username, get_user, list_users};
