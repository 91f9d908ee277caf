use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::events::PromptEvent;
use crate::domain::errors::{DomainError, DomainResult};

/// Prompt aggregate root
///
/// A prompt shared with the community: the text itself plus the metadata
/// used to browse and filter it. Authorship is tracked by the opaque profile
/// id of the creator.
///
/// # Invariants
/// - Title, description, content, and category are non-empty
/// - List fields never contain blank entries
/// - Only the author may delete the prompt
///
/// # Example
/// ```
/// use promptverse_api::domain::prompt::Prompt;
///
/// let (prompt, events) = Prompt::new(
///     "user-1".to_string(),
///     "Code review assistant".to_string(),
///     "Thorough review of a diff".to_string(),
///     "Review the following change for correctness...".to_string(),
///     "Programming".to_string(),
///     vec!["code".to_string(), "review".to_string()],
///     vec![],
///     vec!["Claude".to_string()],
/// ).expect("valid prompt");
///
/// assert_eq!(prompt.title(), "Code review assistant");
/// assert!(!events.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Prompt {
    id: Uuid,
    author_id: String,
    title: String,
    description: String,
    content: String,
    category: String,
    tags: Vec<String>,
    usage_instructions: Vec<String>,
    ai_models: Vec<String>,
    is_featured: bool,
    is_trending: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Prompt {
    /// Creates a new Prompt aggregate
    ///
    /// # Returns
    /// * `Ok((Prompt, Vec<PromptEvent>))` - New prompt and events generated
    /// * `Err(DomainError)` - If any invariant is violated
    ///
    /// # Business Rules Enforced
    /// - Title, description, content, and category must not be blank
    /// - Text fields are stored trimmed; blank list entries are dropped
    /// - New prompts surface in the featured and trending views
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        author_id: String,
        title: String,
        description: String,
        content: String,
        category: String,
        tags: Vec<String>,
        usage_instructions: Vec<String>,
        ai_models: Vec<String>,
    ) -> DomainResult<(Self, Vec<PromptEvent>)> {
        let title = required(title, "Title")?;
        let description = required(description, "Description")?;
        let content = required(content, "Content")?;
        let category = required(category, "Category")?;

        let now = Utc::now();
        let prompt = Self {
            id: Uuid::new_v4(),
            author_id,
            title,
            description,
            content,
            category,
            tags: clean_list(tags),
            usage_instructions: clean_list(usage_instructions),
            ai_models: clean_list(ai_models),
            is_featured: true,
            is_trending: true,
            created_at: now,
            updated_at: now,
        };

        let events = vec![PromptEvent::Created {
            prompt_id: prompt.id,
            author_id: prompt.author_id.clone(),
            title: prompt.title.clone(),
            category: prompt.category.clone(),
        }];

        Ok((prompt, events))
    }

    /// Authorizes deletion of this prompt
    ///
    /// # Returns
    /// * `Ok(PromptEvent)` - Deleted event, when the requester is the author
    /// * `Err(DomainError::NotPromptAuthor)` - Otherwise
    pub fn delete_by(&self, requester_id: &str) -> DomainResult<PromptEvent> {
        if self.author_id != requester_id {
            return Err(DomainError::NotPromptAuthor);
        }

        Ok(PromptEvent::Deleted {
            prompt_id: self.id,
            author_id: self.author_id.clone(),
        })
    }

    // ===== Getters =====

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn author_id(&self) -> &str {
        &self.author_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn usage_instructions(&self) -> &[String] {
        &self.usage_instructions
    }

    pub fn ai_models(&self) -> &[String] {
        &self.ai_models
    }

    pub fn is_featured(&self) -> bool {
        self.is_featured
    }

    pub fn is_trending(&self) -> bool {
        self.is_trending
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Reconstructs a Prompt from persistence layer data
    ///
    /// Bypasses business rule validation; the data was validated when the
    /// row was written.
    ///
    /// # Note
    /// Only to be used by repository implementations for data reconstruction.
    #[allow(clippy::too_many_arguments)]
    pub fn from_persistence(
        id: Uuid,
        author_id: String,
        title: String,
        description: String,
        content: String,
        category: String,
        tags: Vec<String>,
        usage_instructions: Vec<String>,
        ai_models: Vec<String>,
        is_featured: bool,
        is_trending: bool,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            author_id,
            title,
            description,
            content,
            category,
            tags,
            usage_instructions,
            ai_models,
            is_featured,
            is_trending,
            created_at,
            updated_at,
        }
    }
}

fn required(value: String, field: &'static str) -> DomainResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::EmptyField { field });
    }
    Ok(trimmed.to_string())
}

fn clean_list(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_prompt() -> (Prompt, Vec<PromptEvent>) {
        Prompt::new(
            "user-1".to_string(),
            "Test prompt".to_string(),
            "A description".to_string(),
            "The prompt body".to_string(),
            "Programming".to_string(),
            vec!["rust".to_string()],
            vec!["Paste your code".to_string()],
            vec!["Claude".to_string()],
        )
        .unwrap()
    }

    #[test]
    fn create_prompt_with_valid_fields() {
        let (prompt, events) = valid_prompt();

        assert_eq!(prompt.author_id(), "user-1");
        assert_eq!(prompt.title(), "Test prompt");
        assert_eq!(prompt.category(), "Programming");
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn new_prompts_are_featured_and_trending() {
        let (prompt, _) = valid_prompt();
        assert!(prompt.is_featured());
        assert!(prompt.is_trending());
    }

    #[test]
    fn create_prompt_with_empty_title_fails() {
        let result = Prompt::new(
            "user-1".to_string(),
            "   ".to_string(),
            "A description".to_string(),
            "The prompt body".to_string(),
            "Programming".to_string(),
            vec![],
            vec![],
            vec![],
        );

        assert!(matches!(
            result,
            Err(DomainError::EmptyField { field: "Title" })
        ));
    }

    #[test]
    fn create_prompt_with_empty_content_fails() {
        let result = Prompt::new(
            "user-1".to_string(),
            "Title".to_string(),
            "A description".to_string(),
            "".to_string(),
            "Programming".to_string(),
            vec![],
            vec![],
            vec![],
        );

        assert!(matches!(
            result,
            Err(DomainError::EmptyField { field: "Content" })
        ));
    }

    #[test]
    fn text_fields_are_trimmed() {
        let (prompt, _) = Prompt::new(
            "user-1".to_string(),
            "  Title  ".to_string(),
            "desc".to_string(),
            "body".to_string(),
            "  Business  ".to_string(),
            vec![],
            vec![],
            vec![],
        )
        .unwrap();

        assert_eq!(prompt.title(), "Title");
        assert_eq!(prompt.category(), "Business");
    }

    #[test]
    fn blank_list_entries_are_dropped() {
        let (prompt, _) = Prompt::new(
            "user-1".to_string(),
            "Title".to_string(),
            "desc".to_string(),
            "body".to_string(),
            "Business".to_string(),
            vec!["rust".to_string(), "  ".to_string(), "".to_string()],
            vec![],
            vec![" Claude ".to_string()],
        )
        .unwrap();

        assert_eq!(prompt.tags(), ["rust"]);
        assert_eq!(prompt.ai_models(), ["Claude"]);
    }

    #[test]
    fn creation_generates_created_event() {
        let (prompt, events) = valid_prompt();

        match &events[0] {
            PromptEvent::Created {
                prompt_id,
                author_id,
                title,
                category,
            } => {
                assert_eq!(*prompt_id, prompt.id());
                assert_eq!(author_id, "user-1");
                assert_eq!(title, "Test prompt");
                assert_eq!(category, "Programming");
            }
            other => panic!("Expected Created event, got {:?}", other),
        }
    }

    #[test]
    fn author_can_delete() {
        let (prompt, _) = valid_prompt();

        let event = prompt.delete_by("user-1").unwrap();
        match event {
            PromptEvent::Deleted { prompt_id, .. } => assert_eq!(prompt_id, prompt.id()),
            other => panic!("Expected Deleted event, got {:?}", other),
        }
    }

    #[test]
    fn non_author_cannot_delete() {
        let (prompt, _) = valid_prompt();

        let result = prompt.delete_by("someone-else");
        assert!(matches!(result, Err(DomainError::NotPromptAuthor)));
    }

    #[test]
    fn from_persistence_round_trip() {
        let (prompt, _) = valid_prompt();

        let rebuilt = Prompt::from_persistence(
            prompt.id(),
            prompt.author_id().to_string(),
            prompt.title().to_string(),
            prompt.description().to_string(),
            prompt.content().to_string(),
            prompt.category().to_string(),
            prompt.tags().to_vec(),
            prompt.usage_instructions().to_vec(),
            prompt.ai_models().to_vec(),
            prompt.is_featured(),
            prompt.is_trending(),
            prompt.created_at(),
            prompt.updated_at(),
        );

        assert_eq!(rebuilt.id(), prompt.id());
        assert_eq!(rebuilt.title(), prompt.title());
        assert_eq!(rebuilt.tags(), prompt.tags());
    }
}
