//! Domain types for the user store.

pub mod errors;
pub mod user;
