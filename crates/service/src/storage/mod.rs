//! Storage abstractions for service layer
//!
//! Contains reusable file-backed stores that keep a small collection in
//! memory and rewrite the whole JSON file on every mutation.

pub mod json_list_store;
