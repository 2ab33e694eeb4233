//! API route handlers

pub mod health;
pub mod ingredients;
pub mod links;
pub mod recipes;
pub mod tags;
pub mod users;
