use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::value_objects::Email;
use crate::domain::display_name::RawProfile;

/// Profile row as stored in the `profiles` table.
///
/// The id is an opaque string rather than a UUID: rows created through
/// registration get a generated UUID string, but imported legacy rows carry
/// whatever identifier the old system used; in the oldest batch that is the
/// user's email address. Every display-identity field is optional and
/// inconsistently populated; nothing here is guaranteed presentable, which
/// is why display goes through the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRecord {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    /// Absent on legacy rows imported without credentials; such profiles
    /// cannot log in.
    pub password_hash: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ProfileRecord {
    /// Creates the profile row for a fresh registration.
    pub fn register(email: &Email, name: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: Some(name),
            email: Some(email.as_str().to_string()),
            avatar_url: None,
            password_hash: Some(password_hash),
            created_at: Utc::now(),
        }
    }

    /// Adapts this row into the resolver's input shape.
    ///
    /// All display code goes through this single adaptation point so the
    /// resolver stays isolated from the row layout.
    pub fn display_source(&self) -> RawProfile {
        RawProfile {
            id: Some(self.id.clone()),
            name: self.name.clone(),
            email: self.email.clone(),
            avatar_url: self.avatar_url.clone(),
        }
    }
}
