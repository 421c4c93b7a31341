mod invoke;
mod memory;

use std::future::Future;

use uuid::Uuid;

use crate::models::{ChatMessage, ChatRole, Project, Translation, TranslationUpdate};

pub use invoke::{CommandError, Invoke, InvokeGateway};
pub use memory::{MemoryGateway, Seed};

/// Wire names of the backend commands.
pub mod command {
    pub const GET_PROJECTS: &str = "get_projects";
    pub const GET_PROJECT: &str = "get_project";
    pub const CREATE_PROJECT: &str = "create_project";
    pub const GET_TRANSLATIONS: &str = "get_translations";
    pub const CREATE_TRANSLATION: &str = "create_translation";
    pub const UPDATE_TRANSLATION: &str = "update_translation";
    pub const GET_CHAT_MESSAGES: &str = "get_chat_messages";
    pub const ADD_CHAT_MESSAGE: &str = "add_chat_message";
    pub const CHAT_WITH_LLM: &str = "chat_with_llm";
}

/// Typed view of the backend command interface.
///
/// Every call may fail; callers decide how a failure is contained.
pub trait CommandGateway: Send + Sync + 'static {
    fn get_projects(&self) -> impl Future<Output = anyhow::Result<Vec<Project>>> + Send;
    fn get_project(&self, id: Uuid) -> impl Future<Output = anyhow::Result<Option<Project>>> + Send;
    fn create_project(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> impl Future<Output = anyhow::Result<Project>> + Send;

    fn get_translations(
        &self,
        project_id: Uuid,
    ) -> impl Future<Output = anyhow::Result<Vec<Translation>>> + Send;
    fn create_translation(
        &self,
        project_id: Uuid,
        source_text: &str,
    ) -> impl Future<Output = anyhow::Result<Translation>> + Send;
    fn update_translation(
        &self,
        id: Uuid,
        update: &TranslationUpdate,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;

    fn get_chat_messages(
        &self,
        project_id: Uuid,
    ) -> impl Future<Output = anyhow::Result<Vec<ChatMessage>>> + Send;
    fn add_chat_message(
        &self,
        project_id: Uuid,
        role: ChatRole,
        content: &str,
    ) -> impl Future<Output = anyhow::Result<ChatMessage>> + Send;
    /// Ask the assistant for a reply to `message` in the context of a project.
    fn chat_with_assistant(
        &self,
        project_id: Uuid,
        message: &str,
    ) -> impl Future<Output = anyhow::Result<String>> + Send;
}
