// Prompt domain module
// Contains the prompt aggregate root, category catalog, and domain events

#![allow(clippy::module_inception)]

pub mod events;
pub mod prompt;
pub mod value_objects;

// Re-export main types for convenience
pub use events::PromptEvent;
pub use prompt::Prompt;
pub use value_objects::{CategoryInfo, BUILT_IN_CATEGORIES};
