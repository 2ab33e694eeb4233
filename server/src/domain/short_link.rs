//! Short-link tokens for recipes
//!
//! A token is the first 8 hex chars of the SHA-256 of the recipe id
//! concatenated with its name at creation time. The id keeps tokens
//! apart for identically named recipes; renames never change the token
//! because it is persisted, not recomputed.

use crate::core::constants::{SHORT_LINK_LENGTH, SHORT_LINK_PREFIX};
use crate::utils::crypto::sha256_hex;

/// Derive the token for a recipe. Deterministic for a given id and name.
pub fn generate(recipe_id: i64, name: &str) -> String {
    let digest = sha256_hex(format!("{}{}", recipe_id, name).as_bytes());
    digest[..SHORT_LINK_LENGTH].to_string()
}

/// Absolute short-link URL for a token, e.g. `https://host/s/ab12cd34`
pub fn full_url(public_url: &str, token: &str) -> String {
    format!(
        "{}{}/{}",
        public_url.trim_end_matches('/'),
        SHORT_LINK_PREFIX,
        token
    )
}
