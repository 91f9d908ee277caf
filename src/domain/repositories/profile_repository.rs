use async_trait::async_trait;

use crate::domain::user::{Email, ProfileRecord};

/// Repository trait for profile rows
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Create a new profile, returning its id
    async fn create(&self, profile: ProfileRecord) -> Result<String, String>;

    /// Find a profile by its opaque id
    async fn find_by_id(&self, id: &str) -> Result<Option<ProfileRecord>, String>;

    /// Find a profile by email address
    async fn find_by_email(&self, email: &Email) -> Result<Option<ProfileRecord>, String>;
}
