use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Message returned when a create request carries no usable name.
pub const NAME_REQUIRED: &str = "name is required";

/// One account. Serialized as `{"id": <int>, "name": <string>}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
}

impl User {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }
}

/// A validated creation input: the name is already trimmed and non-empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewUser {
    name: String,
}

impl NewUser {
    pub fn parse(raw_name: &str) -> Result<Self, ModelError> {
        let name = validate_name(raw_name)?;
        Ok(Self { name: name.to_string() })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn into_user(self, id: u64) -> User {
        User { id, name: self.name }
    }
}

/// Trim `name` and reject it when nothing is left.
pub fn validate_name(name: &str) -> Result<&str, ModelError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ModelError::Validation(NAME_REQUIRED.into()));
    }
    Ok(trimmed)
}

/// Next id for `users`: max existing id + 1, or 1 when empty.
/// Fails when the max id is already `u64::MAX`.
pub fn next_id(users: &[User]) -> Result<u64, ModelError> {
    match users.iter().map(|u| u.id).max() {
        None => Ok(1),
        Some(max) => max.checked_add(1).ok_or(ModelError::IdsExhausted(max)),
    }
}

/// Records written when no backing file exists yet.
pub fn seed_users() -> Vec<User> {
    vec![User::new(1, "Alice"), User::new(2, "Bob")]
}
