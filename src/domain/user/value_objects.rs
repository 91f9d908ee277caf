use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::errors::{DomainError, DomainResult};

/// Email value object representing a valid email address
///
/// # Invariants
/// - Must contain '@' character
/// - Must be at least 3 characters long after trimming
/// - Is immutable after construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// Creates a new Email value object
    ///
    /// Surrounding whitespace is trimmed before validation; the stored value
    /// is the trimmed form.
    ///
    /// # Returns
    /// * `Ok(Email)` - If the address is valid
    /// * `Err(DomainError::InvalidEmail)` - Otherwise
    ///
    /// # Example
    /// ```
    /// use promptverse_api::domain::user::value_objects::Email;
    ///
    /// let email = Email::new("jane.doe@example.com").expect("valid email");
    /// assert_eq!(email.as_str(), "jane.doe@example.com");
    /// ```
    pub fn new(email: impl Into<String>) -> DomainResult<Self> {
        let email = email.into();
        let trimmed = email.trim();
        if Self::is_valid(trimmed) {
            Ok(Email(trimmed.to_string()))
        } else {
            Err(DomainError::InvalidEmail(email))
        }
    }

    fn is_valid(email: &str) -> bool {
        email.contains('@') && email.len() >= 3
    }

    /// Returns the email as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
