//! User-facing validation errors
//!
//! These are advisory: the caller shows them as a toast and leaves session
//! state untouched. Operations called from the wrong state are not errors at
//! all; they return `false`/`None` and are logged at debug level.

use thiserror::Error;

use crate::notify::Toast;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required form field was left empty
    #[error("Please fill in the {0}")]
    MissingField(&'static str),

    /// Sign-in / sign-up with any required field empty
    #[error("Please fill in all fields")]
    IncompleteForm,

    #[error("New passwords do not match.")]
    PasswordMismatch,
}

impl ValidationError {
    pub fn to_toast(&self) -> Toast {
        Toast::error(self.to_string())
    }
}
