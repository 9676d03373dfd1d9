/// User domain types
use super::limits::{check_len, require_text, MAX_PERSONAL_NAME_LEN, MAX_USERNAME_LEN};
use super::UserId;
use serde::{Deserialize, Serialize};

/// User account
///
/// The password hash is kept out of this type; it is only read through the
/// credential queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: UserId,

    /// Unique login name
    pub username: String,

    /// Unique e-mail address
    pub email: String,

    pub first_name: String,

    pub last_name: String,

    /// Account creation timestamp (ISO string)
    pub created_at: String,
}

/// Data for registering a new user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// Already hashed (bcrypt)
    pub password_hash: String,
}

impl CreateUser {
    /// Username and e-mail are required; names are length-limited
    pub fn validate(&self) -> crate::Result<()> {
        require_text("username", &self.username, MAX_USERNAME_LEN)?;
        if self.email.trim().is_empty() {
            return Err(crate::MelodyError::invalid_input("email must not be empty"));
        }
        check_len("first_name", &self.first_name, MAX_PERSONAL_NAME_LEN)?;
        check_len("last_name", &self.last_name, MAX_PERSONAL_NAME_LEN)
    }
}
