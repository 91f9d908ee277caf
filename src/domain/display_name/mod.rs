// Display name resolution
// Maps possibly-malformed profile records to a presentable name, avatar
// URL, and initials before anything reaches a client.

pub mod policy;
pub mod resolver;

// Re-export main types for convenience
pub use policy::NamePolicy;
pub use resolver::{resolve, RawProfile, ResolvedDisplayName};
