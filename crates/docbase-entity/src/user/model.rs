//! User payload model.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Kind tag under which users are stored.
pub const USER_KIND: &str = "User";

/// Fields of a user document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct User {
    /// Full name.
    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
    pub name: String,
    /// Contact email.
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
}

impl User {
    /// Create a user payload.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}
