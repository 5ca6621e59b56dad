//! User handlers.

use std::borrow::Cow;

use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::api::extractors::ValidatedJson;
use crate::api::state::AppState;
use crate::domain::{NewUser, User};
use crate::errors::{AppError, AppResult};
use crate::types::{Created, MaybeFound, NoContent};

/// Body accepted by create and update.
///
/// Fields take any JSON value. Falsy values (`null`, `false`, `0`, `""`)
/// count as missing; anything else is stored as text.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UserPayload {
    #[schema(value_type = Option<String>, example = "Ana")]
    pub name: Option<Value>,
    #[schema(value_type = Option<String>, example = "ana@x.com")]
    pub email: Option<Value>,
}

/// Text stored for a field, or `None` when the value is falsy.
fn field_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

fn required(field: &'static str, message: &'static str, errors: &mut ValidationErrors) {
    let mut error = ValidationError::new("required");
    error.message = Some(Cow::Borrowed(message));
    errors.add(field, error);
}

impl Validate for UserPayload {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if field_text(self.name.as_ref()).is_none() {
            required("name", "name is required", &mut errors);
        }
        if field_text(self.email.as_ref()).is_none() {
            required("email", "email is required", &mut errors);
        }

        if errors.errors().is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl TryFrom<UserPayload> for NewUser {
    type Error = AppError;

    fn try_from(payload: UserPayload) -> Result<Self, Self::Error> {
        let name = field_text(payload.name.as_ref())
            .ok_or_else(|| AppError::validation("name is required"))?;
        let email = field_text(payload.email.as_ref())
            .ok_or_else(|| AppError::validation("email is required"))?;
        Ok(NewUser::new(name, email))
    }
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
}

/// List all users, ascending by id
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses(
        (status = 200, description = "Every stored user", body = Vec<User>),
        (status = 500, description = "Store failure")
    )
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<User>>> {
    let users = state.user_service.list_users().await?;
    Ok(Json(users))
}

/// Get user by id
///
/// An unknown id answers 200 with `{}`.
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "The user, or `{}` when absent", body = User),
        (status = 500, description = "Store failure, including a non-numeric id")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MaybeFound<User>>> {
    let user = state.user_service.get_user(&id).await?;
    Ok(Json(user.into()))
}

/// Create a user
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = UserPayload,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Missing or empty name or email"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UserPayload>,
) -> AppResult<Created<User>> {
    let user = state.user_service.create_user(payload.try_into()?).await?;
    Ok(Created(user))
}

/// Replace a user's name and email
///
/// An unknown id answers 200 with `{}`.
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    request_body = UserPayload,
    responses(
        (status = 200, description = "Updated user, or `{}` when absent", body = User),
        (status = 400, description = "Missing or empty name or email"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UserPayload>,
) -> AppResult<Json<MaybeFound<User>>> {
    let user = state
        .user_service
        .update_user(&id, payload.try_into()?)
        .await?;
    Ok(Json(user.into()))
}

/// Delete a user
///
/// Idempotent: deleting an absent id also answers 204.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted or already absent"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<NoContent> {
    state.user_service.delete_user(&id).await?;
    Ok(NoContent)
}
