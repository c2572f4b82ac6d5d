use crate::helpers::sanitizer::clip_chars;
use serde::Deserialize;
use uuid::Uuid;

pub const MAX_CONVERSATION_TITLE_CHARS: usize = 255;

#[derive(Debug, Deserialize)]
pub struct RenameForm {
    pub title: Option<String>,
}

impl RenameForm {
    /// Trimmed title clipped to the column width, or `None` when the
    /// client sent nothing usable.
    pub fn cleaned_title(&self) -> Option<String> {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|title| !title.is_empty())
            .map(|title| clip_chars(title, MAX_CONVERSATION_TITLE_CHARS))
    }
}

/// Body of the project assignment call. A missing or null `projectId`
/// detaches the conversation from its project.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignForm {
    pub project_id: Option<Uuid>,
}
