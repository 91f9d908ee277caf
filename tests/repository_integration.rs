//! Integration tests for repository layer
//!
//! These tests verify that the Postgres repository implementations correctly
//! round-trip domain objects: profile CRUD, prompt listings with derived
//! tallies, comment ordering, and vote upserts.
//!
//! They need a Postgres database with the migrations applied, so the whole
//! suite sits behind the `postgres-tests` feature:
//! `DATABASE_URL=... cargo test --features postgres-tests`

#![cfg(feature = "postgres-tests")]

use promptverse_api::auth::password::hash_password;
use promptverse_api::domain::comment::Comment;
use promptverse_api::domain::prompt::Prompt;
use promptverse_api::domain::repositories::{
    CommentRepository, ProfileRepository, PromptFilter, PromptRepository, VoteRepository,
};
use promptverse_api::domain::user::{Email, ProfileRecord};
use promptverse_api::domain::vote::{Vote, VoteKind};
use promptverse_api::infrastructure::repositories::{
    PostgresCommentRepository, PostgresProfileRepository, PostgresPromptRepository,
    PostgresVoteRepository,
};
use sqlx::PgPool;
use uuid::Uuid;

/// Set up test database connection pool
async fn setup_test_db() -> PgPool {
    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for integration tests");

    PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to test database")
}

/// Create a registered test profile, returning its id
async fn create_test_profile(pool: &PgPool, email: &str, name: &str) -> String {
    let email = Email::new(email).expect("valid email");
    let password_hash = hash_password("testpass123").expect("hash password");
    let profile = ProfileRecord::register(&email, name.to_string(), password_hash);

    PostgresProfileRepository::new(pool.clone())
        .create(profile)
        .await
        .expect("Failed to create test profile")
}

/// Insert a legacy profile row: email in the id column, nothing else set
async fn create_legacy_profile(pool: &PgPool, id: &str) {
    sqlx::query("INSERT INTO profiles (id) VALUES ($1)")
        .bind(id)
        .execute(pool)
        .await
        .expect("Failed to create legacy profile");
}

fn build_prompt(author_id: &str, title: &str, category: &str) -> Prompt {
    let (prompt, _) = Prompt::new(
        author_id.to_string(),
        title.to_string(),
        "Repository test description".to_string(),
        "Repository test content".to_string(),
        category.to_string(),
        vec!["repo-test".to_string()],
        vec![],
        vec![],
    )
    .expect("valid prompt");
    prompt
}

/// Clean up everything a test created
async fn cleanup_profile(pool: &PgPool, user_id: &str) {
    sqlx::query("DELETE FROM user_prompts WHERE user_id = $1")
        .bind(user_id)
        .execute(pool)
        .await
        .expect("Failed to cleanup prompts");
    sqlx::query("DELETE FROM profiles WHERE id = $1")
        .bind(user_id)
        .execute(pool)
        .await
        .expect("Failed to cleanup profile");
}

#[tokio::test]
async fn test_profile_repository_create_and_find_by_email() {
    let pool = setup_test_db().await;

    let user_id = create_test_profile(&pool, "repo-profile@test.com", "Repo Profile").await;

    let profile_repo = PostgresProfileRepository::new(pool.clone());
    let email = Email::new("repo-profile@test.com").unwrap();
    let found = profile_repo
        .find_by_email(&email)
        .await
        .expect("query ok")
        .expect("profile found");

    assert_eq!(found.id, user_id);
    assert_eq!(found.name.as_deref(), Some("Repo Profile"));
    assert!(found.password_hash.is_some());

    let by_id = profile_repo
        .find_by_id(&user_id)
        .await
        .expect("query ok")
        .expect("profile found");
    assert_eq!(by_id.email.as_deref(), Some("repo-profile@test.com"));

    cleanup_profile(&pool, &user_id).await;
}

#[tokio::test]
async fn test_duplicate_email_is_rejected() {
    let pool = setup_test_db().await;

    let user_id = create_test_profile(&pool, "repo-dup@test.com", "First").await;

    let email = Email::new("repo-dup@test.com").unwrap();
    let second = ProfileRecord::register(&email, "Second".to_string(), "hash".to_string());
    let result = PostgresProfileRepository::new(pool.clone())
        .create(second)
        .await;

    let err = result.expect_err("duplicate must fail");
    assert!(err.contains("duplicate") || err.contains("unique"));

    cleanup_profile(&pool, &user_id).await;
}

#[tokio::test]
async fn test_legacy_profile_round_trip() {
    let pool = setup_test_db().await;

    let legacy_id = format!("legacy-{}@old.example", Uuid::new_v4());
    create_legacy_profile(&pool, &legacy_id).await;

    let profile_repo = PostgresProfileRepository::new(pool.clone());
    let found = profile_repo
        .find_by_id(&legacy_id)
        .await
        .expect("query ok")
        .expect("profile found");

    assert_eq!(found.id, legacy_id);
    assert!(found.name.is_none());
    assert!(found.email.is_none());
    assert!(found.password_hash.is_none());

    cleanup_profile(&pool, &legacy_id).await;
}

#[tokio::test]
async fn test_prompt_save_and_find_with_author() {
    let pool = setup_test_db().await;

    let user_id = create_test_profile(&pool, "repo-prompt@test.com", "Prompt Author").await;
    let prompt = build_prompt(&user_id, "Repo prompt", "Programming");

    let prompt_repo = PostgresPromptRepository::new(pool.clone());
    prompt_repo.save(&prompt).await.expect("save ok");

    let listing = prompt_repo
        .find_by_id(prompt.id())
        .await
        .expect("query ok")
        .expect("prompt found");

    assert_eq!(listing.prompt.title(), "Repo prompt");
    assert_eq!(listing.prompt.tags(), ["repo-test"]);
    assert!(listing.prompt.is_featured());
    assert_eq!(listing.tally.upvotes, 0);
    assert_eq!(listing.comment_count, 0);

    let author = listing.author.expect("author joined");
    assert_eq!(author.id, user_id);
    assert_eq!(author.name.as_deref(), Some("Prompt Author"));

    cleanup_profile(&pool, &user_id).await;
}

#[tokio::test]
async fn test_prompt_without_profile_row_lists_with_no_author() {
    let pool = setup_test_db().await;

    // No profiles row for this author at all
    let ghost_id = format!("ghost-{}", Uuid::new_v4());
    let prompt = build_prompt(&ghost_id, "Orphaned prompt", "Business");

    let prompt_repo = PostgresPromptRepository::new(pool.clone());
    prompt_repo.save(&prompt).await.expect("save ok");

    let listing = prompt_repo
        .find_by_id(prompt.id())
        .await
        .expect("query ok")
        .expect("prompt found");
    assert!(listing.author.is_none());

    cleanup_profile(&pool, &ghost_id).await;
}

#[tokio::test]
async fn test_prompt_list_filters() {
    let pool = setup_test_db().await;

    let user_id = create_test_profile(&pool, "repo-filter@test.com", "Filter Author").await;
    let marker = Uuid::new_v4().simple().to_string();

    let programming = build_prompt(
        &user_id,
        &format!("Rust helper {}", marker),
        "Programming",
    );
    let business = build_prompt(&user_id, &format!("Pitch deck {}", marker), "Business");

    let prompt_repo = PostgresPromptRepository::new(pool.clone());
    prompt_repo.save(&programming).await.expect("save ok");
    prompt_repo.save(&business).await.expect("save ok");

    // Search hits both via the marker in the title
    let searched = prompt_repo
        .list(&PromptFilter {
            search: Some(marker.clone()),
            ..PromptFilter::default()
        })
        .await
        .expect("query ok");
    assert_eq!(searched.len(), 2);

    // Category narrows to one
    let narrowed = prompt_repo
        .list(&PromptFilter {
            category: Some("Business".to_string()),
            search: Some(marker.clone()),
            ..PromptFilter::default()
        })
        .await
        .expect("query ok");
    assert_eq!(narrowed.len(), 1);
    assert_eq!(narrowed[0].prompt.id(), business.id());

    // Tag search matches too
    let by_tag = prompt_repo
        .list(&PromptFilter {
            search: Some("repo-test".to_string()),
            ..PromptFilter::default()
        })
        .await
        .expect("query ok");
    assert!(by_tag.len() >= 2);

    // Author listing returns newest first
    let mine = prompt_repo.find_by_author(&user_id).await.expect("query ok");
    assert_eq!(mine.len(), 2);
    assert!(mine[0].prompt.created_at() >= mine[1].prompt.created_at());

    cleanup_profile(&pool, &user_id).await;
}

#[tokio::test]
async fn test_vote_record_is_an_upsert() {
    let pool = setup_test_db().await;

    let user_id = create_test_profile(&pool, "repo-voter@test.com", "Repo Voter").await;
    let prompt = build_prompt(&user_id, "Voted prompt", "Programming");

    let prompt_repo = PostgresPromptRepository::new(pool.clone());
    prompt_repo.save(&prompt).await.expect("save ok");

    let vote_repo = PostgresVoteRepository::new(pool.clone());

    vote_repo
        .record(&Vote::new(prompt.id(), user_id.clone(), VoteKind::Up))
        .await
        .expect("record ok");
    assert_eq!(
        vote_repo.find(prompt.id(), &user_id).await.expect("query ok"),
        Some(VoteKind::Up)
    );

    // Same pair, different kind: overwritten, not duplicated
    vote_repo
        .record(&Vote::new(prompt.id(), user_id.clone(), VoteKind::Down))
        .await
        .expect("record ok");
    let tally = vote_repo.tally(prompt.id()).await.expect("query ok");
    assert_eq!(tally.upvotes, 0);
    assert_eq!(tally.downvotes, 1);

    vote_repo
        .remove(prompt.id(), &user_id)
        .await
        .expect("remove ok");
    let tally = vote_repo.tally(prompt.id()).await.expect("query ok");
    assert_eq!(tally.upvotes, 0);
    assert_eq!(tally.downvotes, 0);

    cleanup_profile(&pool, &user_id).await;
}

#[tokio::test]
async fn test_comments_list_oldest_first() {
    let pool = setup_test_db().await;

    let user_id = create_test_profile(&pool, "repo-commenter@test.com", "Repo Commenter").await;
    let prompt = build_prompt(&user_id, "Commented prompt", "Programming");

    let prompt_repo = PostgresPromptRepository::new(pool.clone());
    prompt_repo.save(&prompt).await.expect("save ok");

    let comment_repo = PostgresCommentRepository::new(pool.clone());
    let first = Comment::new(prompt.id(), user_id.clone(), "first".to_string()).unwrap();
    let second = Comment::new(prompt.id(), user_id.clone(), "second".to_string()).unwrap();
    comment_repo.save(&first).await.expect("save ok");
    comment_repo.save(&second).await.expect("save ok");

    let comments = comment_repo
        .list_for_prompt(prompt.id())
        .await
        .expect("query ok");
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].comment.body(), "first");
    assert_eq!(comments[1].comment.body(), "second");
    assert_eq!(
        comments[0].author.as_ref().map(|a| a.id.as_str()),
        Some(user_id.as_str())
    );

    let listing = prompt_repo
        .find_by_id(prompt.id())
        .await
        .expect("query ok")
        .expect("prompt found");
    assert_eq!(listing.comment_count, 2);

    cleanup_profile(&pool, &user_id).await;
}

#[tokio::test]
async fn test_delete_prompt_cascades() {
    let pool = setup_test_db().await;

    let user_id = create_test_profile(&pool, "repo-delete@test.com", "Repo Deleter").await;
    let prompt = build_prompt(&user_id, "Doomed prompt", "Programming");

    let prompt_repo = PostgresPromptRepository::new(pool.clone());
    prompt_repo.save(&prompt).await.expect("save ok");

    let comment = Comment::new(prompt.id(), user_id.clone(), "soon gone".to_string()).unwrap();
    PostgresCommentRepository::new(pool.clone())
        .save(&comment)
        .await
        .expect("save ok");
    PostgresVoteRepository::new(pool.clone())
        .record(&Vote::new(prompt.id(), user_id.clone(), VoteKind::Up))
        .await
        .expect("record ok");

    prompt_repo.delete(prompt.id()).await.expect("delete ok");

    assert!(prompt_repo
        .find_by_id(prompt.id())
        .await
        .expect("query ok")
        .is_none());

    let comments = PostgresCommentRepository::new(pool.clone())
        .list_for_prompt(prompt.id())
        .await
        .expect("query ok");
    assert!(comments.is_empty());

    let tally = PostgresVoteRepository::new(pool.clone())
        .tally(prompt.id())
        .await
        .expect("query ok");
    assert_eq!(tally.upvotes, 0);

    cleanup_profile(&pool, &user_id).await;
}

#[tokio::test]
async fn test_delete_missing_prompt_errors() {
    let pool = setup_test_db().await;

    let prompt_repo = PostgresPromptRepository::new(pool);
    let result = prompt_repo.delete(Uuid::new_v4()).await;

    let err = result.expect_err("missing prompt must fail");
    assert!(err.contains("not found"));
}
