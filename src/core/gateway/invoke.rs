use std::future::Future;

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use uuid::Uuid;

use super::{CommandGateway, command};
use crate::models::{
    ChatMessage, ChatRole, Project, Translation, TranslationStatus, TranslationUpdate,
};

/// Raw request/response transport: a command name plus a JSON payload.
///
/// A rejected command resolves to the backend's error message.
pub trait Invoke: Send + Sync + 'static {
    fn invoke(
        &self,
        command: &'static str,
        args: Value,
    ) -> impl Future<Output = Result<Value, String>> + Send;
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("command `{command}` failed: {message}")]
    Rejected {
        command: &'static str,
        message: String,
    },
    #[error("failed to encode arguments for `{command}`")]
    Encode {
        command: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("unexpected response from `{command}`")]
    Decode {
        command: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// [`CommandGateway`] over a named-command transport.
#[derive(Debug, Clone)]
pub struct InvokeGateway<I> {
    transport: I,
}

impl<I: Invoke> InvokeGateway<I> {
    pub fn new(transport: I) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &I {
        &self.transport
    }

    async fn call<A, R>(&self, command: &'static str, args: A) -> Result<R, CommandError>
    where
        A: Serialize + Send,
        R: DeserializeOwned,
    {
        let payload =
            serde_json::to_value(args).map_err(|source| CommandError::Encode { command, source })?;
        tracing::debug!(command, "invoking backend command");
        let response = self
            .transport
            .invoke(command, payload)
            .await
            .map_err(|message| CommandError::Rejected { command, message })?;
        serde_json::from_value(response).map_err(|source| CommandError::Decode { command, source })
    }
}

#[derive(Serialize)]
struct NoArgs {}

#[derive(Serialize)]
struct IdArgs {
    id: Uuid,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectArgs {
    project_id: Uuid,
}

#[derive(Serialize)]
struct CreateProjectArgs<'a> {
    name: &'a str,
    description: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateTranslationArgs<'a> {
    project_id: Uuid,
    source_text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateTranslationArgs<'a> {
    id: Uuid,
    target_text: Option<&'a str>,
    notes: Option<&'a str>,
    status: Option<TranslationStatus>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AddChatMessageArgs<'a> {
    project_id: Uuid,
    role: ChatRole,
    content: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChatArgs<'a> {
    project_id: Uuid,
    message: &'a str,
}

impl<I: Invoke> CommandGateway for InvokeGateway<I> {
    async fn get_projects(&self) -> anyhow::Result<Vec<Project>> {
        Ok(self.call(command::GET_PROJECTS, NoArgs {}).await?)
    }

    async fn get_project(&self, id: Uuid) -> anyhow::Result<Option<Project>> {
        Ok(self.call(command::GET_PROJECT, IdArgs { id }).await?)
    }

    async fn create_project(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> anyhow::Result<Project> {
        let args = CreateProjectArgs { name, description };
        Ok(self.call(command::CREATE_PROJECT, args).await?)
    }

    async fn get_translations(&self, project_id: Uuid) -> anyhow::Result<Vec<Translation>> {
        Ok(self
            .call(command::GET_TRANSLATIONS, ProjectArgs { project_id })
            .await?)
    }

    async fn create_translation(
        &self,
        project_id: Uuid,
        source_text: &str,
    ) -> anyhow::Result<Translation> {
        let args = CreateTranslationArgs {
            project_id,
            source_text,
        };
        Ok(self.call(command::CREATE_TRANSLATION, args).await?)
    }

    async fn update_translation(&self, id: Uuid, update: &TranslationUpdate) -> anyhow::Result<()> {
        let args = UpdateTranslationArgs {
            id,
            target_text: update.target_text.as_deref(),
            notes: update.notes.as_deref(),
            status: update.status,
        };
        Ok(self.call(command::UPDATE_TRANSLATION, args).await?)
    }

    async fn get_chat_messages(&self, project_id: Uuid) -> anyhow::Result<Vec<ChatMessage>> {
        Ok(self
            .call(command::GET_CHAT_MESSAGES, ProjectArgs { project_id })
            .await?)
    }

    async fn add_chat_message(
        &self,
        project_id: Uuid,
        role: ChatRole,
        content: &str,
    ) -> anyhow::Result<ChatMessage> {
        let args = AddChatMessageArgs {
            project_id,
            role,
            content,
        };
        Ok(self.call(command::ADD_CHAT_MESSAGE, args).await?)
    }

    async fn chat_with_assistant(&self, project_id: Uuid, message: &str) -> anyhow::Result<String> {
        let args = ChatArgs {
            project_id,
            message,
        };
        Ok(self.call(command::CHAT_WITH_LLM, args).await?)
    }
}
