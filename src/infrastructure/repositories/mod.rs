// Repository implementations (data access layer)
// Adapters that implement domain repository interfaces

pub mod memory;
pub mod postgres_comment_repository;
pub mod postgres_profile_repository;
pub mod postgres_prompt_repository;
pub mod postgres_vote_repository;

pub use memory::MemoryRepository;
pub use postgres_comment_repository::PostgresCommentRepository;
pub use postgres_profile_repository::PostgresProfileRepository;
pub use postgres_prompt_repository::PostgresPromptRepository;
pub use postgres_vote_repository::PostgresVoteRepository;
