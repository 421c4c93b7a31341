use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::CommandGateway;
use crate::models::{ChatMessage, ChatRole, Project, Translation, TranslationUpdate};

/// Initial contents of a [`MemoryGateway`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub translations: Vec<Translation>,
    #[serde(default)]
    pub chat_messages: Vec<ChatMessage>,
}

impl Seed {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read seed file {:?}", path))?;
        let seed = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse seed file {:?}", path))?;
        Ok(seed)
    }
}

/// In-process backend holding everything in memory.
#[derive(Debug, Default)]
pub struct MemoryGateway {
    data: Mutex<Seed>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(seed: Seed) -> Self {
        Self {
            data: Mutex::new(seed),
        }
    }
}

fn assistant_reply(message: &str) -> String {
    let message = message.to_lowercase();
    let reply = if message.contains("translate") {
        "Here is a suggested translation. Review the wording against your glossary before approving it."
    } else if message.contains("context") {
        "This phrase carries cultural context worth noting in the translation notes."
    } else if message.contains("improve") {
        "The translation reads well; consider tightening the phrasing and keeping terminology consistent."
    } else {
        "I can help translate entries, explain context, or suggest improvements for this project."
    };
    reply.to_string()
}

impl CommandGateway for MemoryGateway {
    async fn get_projects(&self) -> anyhow::Result<Vec<Project>> {
        let data = self.data.lock().await;
        let mut projects = data.projects.clone();
        projects.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(projects)
    }

    async fn get_project(&self, id: Uuid) -> anyhow::Result<Option<Project>> {
        let data = self.data.lock().await;
        Ok(data.projects.iter().find(|p| p.id == id).cloned())
    }

    async fn create_project(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> anyhow::Result<Project> {
        let now = OffsetDateTime::now_utc();
        let project = Project {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: description.map(str::to_string),
            created_at: now,
            updated_at: now,
        };
        self.data.lock().await.projects.push(project.clone());
        Ok(project)
    }

    async fn get_translations(&self, project_id: Uuid) -> anyhow::Result<Vec<Translation>> {
        let data = self.data.lock().await;
        let mut translations: Vec<Translation> = data
            .translations
            .iter()
            .filter(|t| t.project_id == project_id)
            .cloned()
            .collect();
        translations.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(translations)
    }

    async fn create_translation(
        &self,
        project_id: Uuid,
        source_text: &str,
    ) -> anyhow::Result<Translation> {
        let now = OffsetDateTime::now_utc();
        let translation = Translation {
            id: Uuid::new_v4(),
            project_id,
            source_text: source_text.to_string(),
            target_text: None,
            notes: None,
            status: Default::default(),
            created_at: now,
            updated_at: now,
        };
        self.data
            .lock()
            .await
            .translations
            .push(translation.clone());
        Ok(translation)
    }

    async fn update_translation(&self, id: Uuid, update: &TranslationUpdate) -> anyhow::Result<()> {
        let mut data = self.data.lock().await;
        // Unknown ids are accepted silently, like an UPDATE matching no rows.
        if let Some(translation) = data.translations.iter_mut().find(|t| t.id == id) {
            translation.apply(update);
            translation.updated_at = OffsetDateTime::now_utc();
        }
        Ok(())
    }

    async fn get_chat_messages(&self, project_id: Uuid) -> anyhow::Result<Vec<ChatMessage>> {
        let data = self.data.lock().await;
        let mut messages: Vec<ChatMessage> = data
            .chat_messages
            .iter()
            .filter(|m| m.project_id == project_id)
            .cloned()
            .collect();
        // Stable sort keeps insertion order for identical timestamps.
        messages.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(messages)
    }

    async fn add_chat_message(
        &self,
        project_id: Uuid,
        role: ChatRole,
        content: &str,
    ) -> anyhow::Result<ChatMessage> {
        let message = ChatMessage::local(project_id, role, content);
        self.data.lock().await.chat_messages.push(message.clone());
        Ok(message)
    }

    async fn chat_with_assistant(&self, project_id: Uuid, message: &str) -> anyhow::Result<String> {
        let reply = assistant_reply(message);
        let stored = ChatMessage::local(project_id, ChatRole::Assistant, reply.clone());
        self.data.lock().await.chat_messages.push(stored);
        Ok(reply)
    }
}
