//! Domain logic for the recipe catalog
//!
//! - `catalog` - recipe, user, and subscription operations behind one facade
//! - `import` - CSV fixture import for ingredients and tags
//! - `shopping_list` - plain-text rendering of aggregated ingredients
//! - `short_link` - stable share tokens derived from recipe identity

pub mod catalog;
pub mod import;
pub mod shopping_list;
pub mod short_link;

pub use catalog::CatalogService;
