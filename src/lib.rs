//! PromptVerse API Library
//!
//! Backend for the PromptVerse prompt-sharing community: prompt catalog,
//! comments, votes, categories, token authentication, and the display-name
//! resolution that keeps degraded profile data out of client payloads.

pub mod api;
pub mod auth;
pub mod domain;
pub mod infrastructure;
