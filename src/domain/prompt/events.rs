use uuid::Uuid;

/// Domain events that occur within the Prompt aggregate
///
/// Important business moments in a prompt's lifecycle, usable for audit
/// logging and for publishing to external systems.
#[derive(Debug, Clone)]
pub enum PromptEvent {
    /// Fired when a prompt is shared with the community
    Created {
        /// ID of the newly created prompt
        prompt_id: Uuid,
        /// Profile id of the author
        author_id: String,
        /// The prompt's title
        title: String,
        /// Category it was filed under
        category: String,
    },
    /// Fired when the author removes a prompt
    Deleted {
        /// ID of the deleted prompt
        prompt_id: Uuid,
        /// Profile id of the author
        author_id: String,
    },
}

impl PromptEvent {
    /// Returns the prompt_id for this event
    pub fn prompt_id(&self) -> Uuid {
        match self {
            PromptEvent::Created { prompt_id, .. } => *prompt_id,
            PromptEvent::Deleted { prompt_id, .. } => *prompt_id,
        }
    }
}
