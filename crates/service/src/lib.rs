//! Service layer owning the user collection and its persistence.
//! - `storage` holds the generic JSON file-backed list store.
//! - `file` holds the concrete file-backed user store.
//! - `repository` is the trait seam handlers depend on.

pub mod errors;
pub mod repository;
pub mod storage;
pub mod file;
#[cfg(test)]
pub mod test_support;
