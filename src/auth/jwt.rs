// JWT token creation and verification
// Handles authentication tokens with 8-hour expiry

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// JWT claims structure
///
/// # Fields
/// * `sub` - Subject: the opaque profile id of the authenticated user
/// * `exp` - Expiry time (seconds since epoch)
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Profile id (subject)
    pub sub: String,
    /// Expiry timestamp (seconds since epoch)
    pub exp: usize,
}

/// Creates a JWT token for a profile
///
/// # Arguments
/// * `user_id` - The profile id to include in the token
/// * `secret` - The secret key for signing (from environment)
///
/// # Token Properties
/// - Expires after 8 hours
/// - Signed with HS256 algorithm
/// - Contains the profile id in the 'sub' claim
///
/// # Example
/// ```
/// use promptverse_api::auth::jwt::create_token;
///
/// let token = create_token("profile-1", "your-secret-key").expect("valid token");
/// assert!(!token.is_empty());
/// ```
pub fn create_token(user_id: &str, secret: &str) -> Result<String, String> {
    let expiry = Utc::now() + Duration::hours(8);
    let claims = Claims {
        sub: user_id.to_string(),
        exp: expiry.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
    .map_err(|e| e.to_string())
}

/// Verifies and decodes a JWT token
///
/// # Returns
/// * `Ok(Claims)` - The decoded claims if the token is valid
/// * `Err(String)` - If the token is invalid or expired
///
/// # Example
/// ```
/// use promptverse_api::auth::jwt::{create_token, verify_token};
///
/// let secret = "your-secret-key";
/// let token = create_token("profile-1", secret).unwrap();
///
/// let claims = verify_token(&token, secret).expect("valid token");
/// assert_eq!(claims.sub, "profile-1");
/// ```
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| e.to_string())
}
