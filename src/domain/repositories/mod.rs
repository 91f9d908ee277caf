// Repository interfaces (ports)
// Implemented by the infrastructure layer

pub mod comment_repository;
pub mod profile_repository;
pub mod prompt_repository;
pub mod vote_repository;

pub use comment_repository::{CommentRepository, CommentWithAuthor};
pub use profile_repository::ProfileRepository;
pub use prompt_repository::{PromptFilter, PromptListing, PromptRepository};
pub use vote_repository::VoteRepository;
