// Password hashing utilities
// Uses bcrypt for secure password hashing

use bcrypt::{hash, verify, DEFAULT_COST};

/// Hashes a password using bcrypt
///
/// # Returns
/// * `Ok(String)` - The bcrypt hash
/// * `Err(String)` - If hashing fails
///
/// # Example
/// ```
/// use promptverse_api::auth::password::hash_password;
///
/// let hash = hash_password("my_password").expect("valid hash");
/// assert!(hash.starts_with("$2"));
/// ```
pub fn hash_password(password: &str) -> Result<String, String> {
    hash(password, DEFAULT_COST).map_err(|e| e.to_string())
}

/// Verifies a password against a bcrypt hash
///
/// # Returns
/// * `Ok(bool)` - True if the password matches
/// * `Err(String)` - If verification fails
///
/// # Example
/// ```
/// use promptverse_api::auth::password::{hash_password, verify_password};
///
/// let hash = hash_password("my_password").unwrap();
/// assert!(verify_password("my_password", &hash).unwrap());
/// ```
pub fn verify_password(password: &str, hash: &str) -> Result<bool, String> {
    verify(password, hash).map_err(|e| e.to_string())
}
