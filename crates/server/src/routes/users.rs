use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use models::user::User;
use serde_json::{Map, Value};

use super::AppState;
use crate::errors::ApiError;

/// Body of `POST /users`. Only a JSON object is accepted; `name` is kept
/// when it is a string and dropped otherwise.
#[derive(Debug)]
pub struct CreateUserRequest {
    pub name: Option<String>,
}

impl From<Map<String, Value>> for CreateUserRequest {
    fn from(mut body: Map<String, Value>) -> Self {
        let name = match body.remove("name") {
            Some(Value::String(name)) => Some(name),
            _ => None,
        };
        Self { name }
    }
}

/// `GET /users/:id`. An id that is not an unsigned integer matches no user.
pub async fn get_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<User>, ApiError> {
    let found = match raw_id.trim().parse::<u64>() {
        Ok(id) => state.users.find_by_id(id).await,
        Err(_) => None,
    };
    found.map(Json).ok_or_else(ApiError::user_not_found)
}

/// `POST /users`
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let Json(body) = payload?;
    let req = CreateUserRequest::from(body);
    let name = req.name.ok_or_else(ApiError::name_required)?;
    let created = state.users.create(&name).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /users`, whole collection in insertion order.
pub async fn list_users(State(state): State<AppState>) -> Json<Vec<User>> {
    Json(state.users.list().await)
}
