use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TranslationStatus {
    #[default]
    Draft,
    Validated,
    Approved,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    pub id: Uuid,
    pub project_id: Uuid,
    pub source_text: String,
    #[serde(default)]
    pub target_text: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub status: TranslationStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Translation {
    /// Case-insensitive substring match against the source, target and notes.
    ///
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        let hit = |text: &str| text.to_lowercase().contains(needle);
        hit(&self.source_text)
            || self.target_text.as_deref().is_some_and(hit)
            || self.notes.as_deref().is_some_and(hit)
    }

    /// Merge the fields an update carries, leaving the rest untouched.
    pub fn apply(&mut self, update: &TranslationUpdate) {
        if let Some(target_text) = &update.target_text {
            self.target_text = Some(target_text.clone());
        }
        if let Some(notes) = &update.notes {
            self.notes = Some(notes.clone());
        }
        if let Some(status) = update.status {
            self.status = status;
        }
    }
}

/// Partial update for the mutable fields of a translation.
/// `None` means "leave as is".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationUpdate {
    pub target_text: Option<String>,
    pub notes: Option<String>,
    pub status: Option<TranslationStatus>,
}

impl TranslationUpdate {
    pub fn target_text(text: impl Into<String>) -> Self {
        Self {
            target_text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn notes(notes: impl Into<String>) -> Self {
        Self {
            notes: Some(notes.into()),
            ..Self::default()
        }
    }

    pub fn status(status: TranslationStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub project_id: Uuid,
    pub role: ChatRole,
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl ChatMessage {
    /// Message stamped on this side of the gateway, with a locally generated id.
    pub fn local(project_id: Uuid, role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            project_id,
            role,
            content: content.into(),
            created_at: OffsetDateTime::now_utc(),
        }
    }
}
