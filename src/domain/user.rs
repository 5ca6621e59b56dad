//! User domain entity and related types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A persisted user row.
///
/// `name` and `email` are nullable at the table level, so rows written by
/// something other than this service may carry `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Store-assigned identifier
    #[schema(example = 1)]
    pub id: i32,
    /// Display name
    #[schema(example = "Ana")]
    pub name: Option<String>,
    /// Email address (not validated)
    #[schema(example = "ana@x.com")]
    pub email: Option<String>,
}

/// Validated field values for an insert or a full replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

impl NewUser {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}
