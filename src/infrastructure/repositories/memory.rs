use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::comment::Comment;
use crate::domain::prompt::Prompt;
use crate::domain::repositories::{
    CommentRepository, CommentWithAuthor, ProfileRepository, PromptFilter, PromptListing,
    PromptRepository, VoteRepository,
};
use crate::domain::user::{Email, ProfileRecord};
use crate::domain::vote::{Vote, VoteKind, VoteTally};

/// In-memory implementation of every repository interface
///
/// One process-local store standing in for the database, with the same
/// contract the Postgres adapters honor. Used to exercise repository-level
/// flows without a running Postgres; also the drop-in answer when a caller
/// needs a short-lived local cache of community content.
#[derive(Default)]
pub struct MemoryRepository {
    profiles: RwLock<HashMap<String, ProfileRecord>>,
    prompts: RwLock<Vec<Prompt>>,
    comments: RwLock<Vec<Comment>>,
    votes: RwLock<HashMap<(Uuid, String), Vote>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn listing_for(&self, prompt: &Prompt) -> Result<PromptListing, String> {
        let author = self
            .profiles
            .read()
            .map_err(|_| "profile store lock poisoned".to_string())?
            .get(prompt.author_id())
            .cloned();

        let votes = self
            .votes
            .read()
            .map_err(|_| "vote store lock poisoned".to_string())?;
        let tally = votes
            .values()
            .filter(|vote| vote.prompt_id == prompt.id())
            .fold(VoteTally::default(), |mut tally, vote| {
                match vote.kind {
                    VoteKind::Up => tally.upvotes += 1,
                    VoteKind::Down => tally.downvotes += 1,
                }
                tally
            });

        let comment_count = self
            .comments
            .read()
            .map_err(|_| "comment store lock poisoned".to_string())?
            .iter()
            .filter(|comment| comment.prompt_id() == prompt.id())
            .count() as i64;

        Ok(PromptListing {
            prompt: prompt.clone(),
            author,
            tally,
            comment_count,
        })
    }
}

fn matches(filter: &PromptFilter, prompt: &Prompt) -> bool {
    if let Some(category) = filter.category.as_deref() {
        if prompt.category() != category {
            return false;
        }
    }
    if let Some(search) = filter.search.as_deref() {
        let needle = search.to_lowercase();
        let in_title = prompt.title().to_lowercase().contains(&needle);
        let in_description = prompt.description().to_lowercase().contains(&needle);
        let in_tags = prompt
            .tags()
            .iter()
            .any(|tag| tag.to_lowercase().contains(&needle));
        if !(in_title || in_description || in_tags) {
            return false;
        }
    }
    if filter.featured_only && !prompt.is_featured() {
        return false;
    }
    if filter.trending_only && !prompt.is_trending() {
        return false;
    }
    true
}

#[async_trait]
impl ProfileRepository for MemoryRepository {
    async fn create(&self, profile: ProfileRecord) -> Result<String, String> {
        let mut profiles = self
            .profiles
            .write()
            .map_err(|_| "profile store lock poisoned".to_string())?;

        let duplicate_email = profile.email.as_deref().is_some_and(|email| {
            profiles
                .values()
                .any(|existing| existing.email.as_deref() == Some(email))
        });
        if duplicate_email || profiles.contains_key(&profile.id) {
            return Err("unique constraint violated on profiles".to_string());
        }

        let id = profile.id.clone();
        profiles.insert(id.clone(), profile);
        Ok(id)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<ProfileRecord>, String> {
        Ok(self
            .profiles
            .read()
            .map_err(|_| "profile store lock poisoned".to_string())?
            .get(id)
            .cloned())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<ProfileRecord>, String> {
        Ok(self
            .profiles
            .read()
            .map_err(|_| "profile store lock poisoned".to_string())?
            .values()
            .find(|profile| profile.email.as_deref() == Some(email.as_str()))
            .cloned())
    }
}

#[async_trait]
impl PromptRepository for MemoryRepository {
    async fn save(&self, prompt: &Prompt) -> Result<(), String> {
        let mut prompts = self
            .prompts
            .write()
            .map_err(|_| "prompt store lock poisoned".to_string())?;

        prompts.retain(|existing| existing.id() != prompt.id());
        prompts.push(prompt.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<PromptListing>, String> {
        let prompt = {
            let prompts = self
                .prompts
                .read()
                .map_err(|_| "prompt store lock poisoned".to_string())?;
            prompts.iter().find(|p| p.id() == id).cloned()
        };

        prompt.map(|p| self.listing_for(&p)).transpose()
    }

    async fn list(&self, filter: &PromptFilter) -> Result<Vec<PromptListing>, String> {
        let mut selected: Vec<Prompt> = {
            let prompts = self
                .prompts
                .read()
                .map_err(|_| "prompt store lock poisoned".to_string())?;
            prompts
                .iter()
                .filter(|p| matches(filter, p))
                .cloned()
                .collect()
        };
        selected.sort_by(|a, b| b.created_at().cmp(&a.created_at()));

        selected.iter().map(|p| self.listing_for(p)).collect()
    }

    async fn find_by_author(&self, author_id: &str) -> Result<Vec<PromptListing>, String> {
        let mut selected: Vec<Prompt> = {
            let prompts = self
                .prompts
                .read()
                .map_err(|_| "prompt store lock poisoned".to_string())?;
            prompts
                .iter()
                .filter(|p| p.author_id() == author_id)
                .cloned()
                .collect()
        };
        selected.sort_by(|a, b| b.created_at().cmp(&a.created_at()));

        selected.iter().map(|p| self.listing_for(p)).collect()
    }

    async fn count_by_category(&self) -> Result<Vec<(String, i64)>, String> {
        let prompts = self
            .prompts
            .read()
            .map_err(|_| "prompt store lock poisoned".to_string())?;

        let mut counts: HashMap<String, i64> = HashMap::new();
        for prompt in prompts.iter() {
            *counts.entry(prompt.category().to_string()).or_default() += 1;
        }
        Ok(counts.into_iter().collect())
    }

    async fn delete(&self, id: Uuid) -> Result<(), String> {
        let mut prompts = self
            .prompts
            .write()
            .map_err(|_| "prompt store lock poisoned".to_string())?;
        let before = prompts.len();
        prompts.retain(|p| p.id() != id);
        if prompts.len() == before {
            return Err(format!("Prompt not found: {}", id));
        }
        drop(prompts);

        // Cascade, as the schema does
        self.comments
            .write()
            .map_err(|_| "comment store lock poisoned".to_string())?
            .retain(|c| c.prompt_id() != id);
        self.votes
            .write()
            .map_err(|_| "vote store lock poisoned".to_string())?
            .retain(|(prompt_id, _), _| *prompt_id != id);

        Ok(())
    }
}

#[async_trait]
impl CommentRepository for MemoryRepository {
    async fn save(&self, comment: &Comment) -> Result<(), String> {
        self.comments
            .write()
            .map_err(|_| "comment store lock poisoned".to_string())?
            .push(comment.clone());
        Ok(())
    }

    async fn list_for_prompt(&self, prompt_id: Uuid) -> Result<Vec<CommentWithAuthor>, String> {
        let mut selected: Vec<Comment> = {
            let comments = self
                .comments
                .read()
                .map_err(|_| "comment store lock poisoned".to_string())?;
            comments
                .iter()
                .filter(|c| c.prompt_id() == prompt_id)
                .cloned()
                .collect()
        };
        selected.sort_by(|a, b| a.created_at().cmp(&b.created_at()));

        let profiles = self
            .profiles
            .read()
            .map_err(|_| "profile store lock poisoned".to_string())?;

        Ok(selected
            .into_iter()
            .map(|comment| {
                let author = profiles.get(comment.author_id()).cloned();
                CommentWithAuthor { comment, author }
            })
            .collect())
    }
}

#[async_trait]
impl VoteRepository for MemoryRepository {
    async fn find(&self, prompt_id: Uuid, user_id: &str) -> Result<Option<VoteKind>, String> {
        Ok(self
            .votes
            .read()
            .map_err(|_| "vote store lock poisoned".to_string())?
            .get(&(prompt_id, user_id.to_string()))
            .map(|vote| vote.kind))
    }

    async fn record(&self, vote: &Vote) -> Result<(), String> {
        self.votes
            .write()
            .map_err(|_| "vote store lock poisoned".to_string())?
            .insert((vote.prompt_id, vote.user_id.clone()), vote.clone());
        Ok(())
    }

    async fn remove(&self, prompt_id: Uuid, user_id: &str) -> Result<(), String> {
        self.votes
            .write()
            .map_err(|_| "vote store lock poisoned".to_string())?
            .remove(&(prompt_id, user_id.to_string()));
        Ok(())
    }

    async fn tally(&self, prompt_id: Uuid) -> Result<VoteTally, String> {
        let votes = self
            .votes
            .read()
            .map_err(|_| "vote store lock poisoned".to_string())?;

        Ok(votes
            .values()
            .filter(|vote| vote.prompt_id == prompt_id)
            .fold(VoteTally::default(), |mut tally, vote| {
                match vote.kind {
                    VoteKind::Up => tally.upvotes += 1,
                    VoteKind::Down => tally.downvotes += 1,
                }
                tally
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::display_name::resolve;
    use crate::domain::vote::{apply_vote, VoteOutcome};
    use chrono::Utc;

    fn sample_prompt(author_id: &str, title: &str, category: &str) -> Prompt {
        let (prompt, _) = Prompt::new(
            author_id.to_string(),
            title.to_string(),
            "A description".to_string(),
            "The prompt body".to_string(),
            category.to_string(),
            vec!["testing".to_string()],
            vec![],
            vec![],
        )
        .unwrap();
        prompt
    }

    fn legacy_profile(id: &str) -> ProfileRecord {
        ProfileRecord {
            id: id.to_string(),
            name: None,
            email: None,
            avatar_url: None,
            password_hash: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn save_and_fetch_prompt_with_author() {
        let repo = MemoryRepository::new();
        let email = Email::new("jane.doe@example.com").unwrap();
        let profile = ProfileRecord::register(&email, "".to_string(), "hash".to_string());
        let author_id = ProfileRepository::create(&repo, profile).await.unwrap();

        let prompt = sample_prompt(&author_id, "Test prompt", "Programming");
        PromptRepository::save(&repo, &prompt).await.unwrap();

        let listing = PromptRepository::find_by_id(&repo, prompt.id())
            .await
            .unwrap()
            .expect("prompt exists");

        assert_eq!(listing.prompt.title(), "Test prompt");
        assert_eq!(listing.comment_count, 0);
        assert_eq!(listing.tally, VoteTally::default());

        // The stored name is blank, so display falls back to the email
        let author = listing.author.expect("author row");
        let resolved = resolve(Some(&author.display_source()));
        assert_eq!(resolved.name, "Jane Doe");
    }

    #[tokio::test]
    async fn duplicate_email_registration_is_rejected() {
        let repo = MemoryRepository::new();
        let email = Email::new("dup@example.com").unwrap();
        let first = ProfileRecord::register(&email, "A".to_string(), "h".to_string());
        let second = ProfileRecord::register(&email, "B".to_string(), "h".to_string());

        ProfileRepository::create(&repo, first).await.unwrap();
        let err = ProfileRepository::create(&repo, second).await.unwrap_err();
        assert!(err.contains("unique"));
    }

    #[tokio::test]
    async fn list_filters_by_category_and_search() {
        let repo = MemoryRepository::new();
        PromptRepository::save(&repo, &sample_prompt("u1", "Refactoring helper", "Programming"))
            .await
            .unwrap();
        PromptRepository::save(&repo, &sample_prompt("u1", "Sales pitch", "Business"))
            .await
            .unwrap();

        let by_category = repo
            .list(&PromptFilter {
                category: Some("Business".to_string()),
                ..PromptFilter::default()
            })
            .await
            .unwrap();
        assert_eq!(by_category.len(), 1);
        assert_eq!(by_category[0].prompt.title(), "Sales pitch");

        let by_search = repo
            .list(&PromptFilter {
                search: Some("refactor".to_string()),
                ..PromptFilter::default()
            })
            .await
            .unwrap();
        assert_eq!(by_search.len(), 1);
        assert_eq!(by_search[0].prompt.title(), "Refactoring helper");

        let by_tag = repo
            .list(&PromptFilter {
                search: Some("TESTING".to_string()),
                ..PromptFilter::default()
            })
            .await
            .unwrap();
        assert_eq!(by_tag.len(), 2);
    }

    #[tokio::test]
    async fn vote_toggle_round_trip() {
        let repo = MemoryRepository::new();
        let prompt = sample_prompt("u1", "Votable", "Programming");
        PromptRepository::save(&repo, &prompt).await.unwrap();

        // First up-vote records
        let outcome = apply_vote(repo.find(prompt.id(), "voter").await.unwrap(), VoteKind::Up);
        assert_eq!(outcome, VoteOutcome::Recorded(VoteKind::Up));
        repo.record(&Vote::new(prompt.id(), "voter".to_string(), VoteKind::Up))
            .await
            .unwrap();
        assert_eq!(repo.tally(prompt.id()).await.unwrap().upvotes, 1);

        // Second up-vote removes
        let outcome = apply_vote(repo.find(prompt.id(), "voter").await.unwrap(), VoteKind::Up);
        assert_eq!(outcome, VoteOutcome::Removed);
        repo.remove(prompt.id(), "voter").await.unwrap();
        assert_eq!(repo.tally(prompt.id()).await.unwrap().upvotes, 0);

        // Down-vote after an up-vote switches
        repo.record(&Vote::new(prompt.id(), "voter".to_string(), VoteKind::Up))
            .await
            .unwrap();
        let outcome = apply_vote(
            repo.find(prompt.id(), "voter").await.unwrap(),
            VoteKind::Down,
        );
        assert_eq!(outcome, VoteOutcome::Switched(VoteKind::Down));
        repo.record(&Vote::new(prompt.id(), "voter".to_string(), VoteKind::Down))
            .await
            .unwrap();

        let tally = repo.tally(prompt.id()).await.unwrap();
        assert_eq!(tally.upvotes, 0);
        assert_eq!(tally.downvotes, 1);
    }

    #[tokio::test]
    async fn comments_list_oldest_first_with_resolved_authors() {
        let repo = MemoryRepository::new();
        let prompt = sample_prompt("u1", "Discussed", "Programming");
        PromptRepository::save(&repo, &prompt).await.unwrap();

        // Legacy commenter: email lives in the profile id
        ProfileRepository::create(&repo, legacy_profile("sam_smith@example.com"))
            .await
            .unwrap();

        let first = Comment::new(
            prompt.id(),
            "sam_smith@example.com".to_string(),
            "first".to_string(),
        )
        .unwrap();
        let second = Comment::new(prompt.id(), "ghost-user".to_string(), "second".to_string())
            .unwrap();
        CommentRepository::save(&repo, &first).await.unwrap();
        CommentRepository::save(&repo, &second).await.unwrap();

        let comments = repo.list_for_prompt(prompt.id()).await.unwrap();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].comment.body(), "first");

        let resolved = resolve(comments[0].author.as_ref().map(|a| a.display_source()).as_ref());
        assert_eq!(resolved.name, "Sam Smith");

        // No profile row at all for the second commenter
        assert!(comments[1].author.is_none());
        let resolved = resolve(None);
        assert_eq!(resolved.name, "Anonymous User");
    }

    #[tokio::test]
    async fn delete_cascades_to_comments_and_votes() {
        let repo = MemoryRepository::new();
        let prompt = sample_prompt("u1", "Doomed", "Programming");
        PromptRepository::save(&repo, &prompt).await.unwrap();

        let comment =
            Comment::new(prompt.id(), "u2".to_string(), "soon gone".to_string()).unwrap();
        CommentRepository::save(&repo, &comment).await.unwrap();
        repo.record(&Vote::new(prompt.id(), "u2".to_string(), VoteKind::Up))
            .await
            .unwrap();

        PromptRepository::delete(&repo, prompt.id()).await.unwrap();

        assert!(PromptRepository::find_by_id(&repo, prompt.id())
            .await
            .unwrap()
            .is_none());
        assert!(repo.list_for_prompt(prompt.id()).await.unwrap().is_empty());
        assert_eq!(repo.tally(prompt.id()).await.unwrap(), VoteTally::default());
    }

    #[tokio::test]
    async fn deleting_missing_prompt_errors() {
        let repo = MemoryRepository::new();
        let result = PromptRepository::delete(&repo, Uuid::new_v4()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn count_by_category_counts_every_row() {
        let repo = MemoryRepository::new();
        PromptRepository::save(&repo, &sample_prompt("u1", "One", "Programming"))
            .await
            .unwrap();
        PromptRepository::save(&repo, &sample_prompt("u1", "Two", "Programming"))
            .await
            .unwrap();
        PromptRepository::save(&repo, &sample_prompt("u2", "Three", "Business"))
            .await
            .unwrap();

        let mut counts = repo.count_by_category().await.unwrap();
        counts.sort();
        assert_eq!(
            counts,
            vec![("Business".to_string(), 1), ("Programming".to_string(), 2)]
        );
    }
}
