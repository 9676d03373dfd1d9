//! Length limits for user-supplied text
//!
//! The same limits are enforced by CHECK constraints in the database
//! schema; validating here turns an overlong value into `InvalidInput`
//! before any write.

use crate::error::{MelodyError, Result};

/// Track, album and playlist titles
pub const MAX_TITLE_LEN: usize = 128;

/// Performer names
pub const MAX_NAME_LEN: usize = 128;

pub const MAX_USERNAME_LEN: usize = 100;

/// User first and last names
pub const MAX_PERSONAL_NAME_LEN: usize = 50;

/// Playlist descriptions
pub const MAX_DESCRIPTION_LEN: usize = 512;

/// Check that a trimmed value is non-empty and at most `max` characters
pub(crate) fn require_text(field: &str, value: &str, max: usize) -> Result<()> {
    let value = value.trim();
    if value.is_empty() {
        return Err(MelodyError::invalid_input(format!("{field} must not be empty")));
    }
    check_len(field, value, max)
}

/// Check that a value is at most `max` characters
pub(crate) fn check_len(field: &str, value: &str, max: usize) -> Result<()> {
    if value.chars().count() > max {
        return Err(MelodyError::invalid_input(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}
