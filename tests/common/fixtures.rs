use std::collections::HashSet;
use std::sync::Mutex;

use gaia_shell::core::gateway::{CommandGateway, MemoryGateway, Seed, command};
use gaia_shell::{ChatMessage, ChatRole, Project, Translation, TranslationStatus, TranslationUpdate};
use time::OffsetDateTime;
use tokio::sync::Semaphore;
use uuid::Uuid;

pub fn at(seconds: i64) -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp(1_700_000_000 + seconds).expect("valid timestamp")
}

pub fn make_project(name: &str, updated: i64) -> Project {
    Project {
        id: Uuid::new_v4(),
        name: name.to_string(),
        description: None,
        created_at: at(0),
        updated_at: at(updated),
    }
}

pub fn make_translation(
    project_id: Uuid,
    source_text: &str,
    target_text: Option<&str>,
    notes: Option<&str>,
    created: i64,
) -> Translation {
    Translation {
        id: Uuid::new_v4(),
        project_id,
        source_text: source_text.to_string(),
        target_text: target_text.map(str::to_string),
        notes: notes.map(str::to_string),
        status: TranslationStatus::Draft,
        created_at: at(created),
        updated_at: at(created),
    }
}

/// Two projects; "Novel" has three translations and one chat message.
pub struct SampleData {
    pub seed: Seed,
    pub novel: Project,
    pub manual: Project,
}

pub fn sample_data() -> SampleData {
    let novel = make_project("Novel", 20);
    let manual = make_project("Manual", 10);
    let translations = vec![
        make_translation(novel.id, "Good morning", Some("Bonjour"), None, 1),
        make_translation(novel.id, "The old FOOtbridge", None, Some("check tone"), 2),
        make_translation(novel.id, "Farewell", Some("Adieu"), Some("see chapter Foo"), 3),
        make_translation(manual.id, "Press start", None, None, 4),
    ];
    let chat_messages = vec![ChatMessage {
        id: Uuid::new_v4(),
        project_id: novel.id,
        role: ChatRole::User,
        content: "How formal should chapter one be?".to_string(),
        created_at: at(5),
    }];
    SampleData {
        seed: Seed {
            projects: vec![manual.clone(), novel.clone()],
            translations,
            chat_messages,
        },
        novel,
        manual,
    }
}

/// [`MemoryGateway`] with failure switches, a call log and an optional hold
/// on `add_chat_message`.
pub struct ScriptedGateway {
    inner: MemoryGateway,
    failing: Mutex<HashSet<&'static str>>,
    calls: Mutex<Vec<(&'static str, Option<Uuid>)>>,
    chat_gate: Option<Semaphore>,
}

impl ScriptedGateway {
    pub fn new(seed: Seed) -> Self {
        Self {
            inner: MemoryGateway::with_seed(seed),
            failing: Mutex::new(HashSet::new()),
            calls: Mutex::new(Vec::new()),
            chat_gate: None,
        }
    }

    /// `add_chat_message` waits until [`release_chat`](Self::release_chat).
    pub fn holding_chat(mut self) -> Self {
        self.chat_gate = Some(Semaphore::new(0));
        self
    }

    pub fn release_chat(&self) {
        if let Some(gate) = &self.chat_gate {
            gate.add_permits(1);
        }
    }

    pub fn fail(&self, command: &'static str) {
        self.failing.lock().unwrap().insert(command);
    }

    pub fn recover(&self, command: &'static str) {
        self.failing.lock().unwrap().remove(command);
    }

    pub fn calls(&self) -> Vec<(&'static str, Option<Uuid>)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, command: &'static str, id: Uuid) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(c, i)| *c == command && *i == Some(id))
            .count()
    }

    pub fn backend(&self) -> &MemoryGateway {
        &self.inner
    }

    fn check(&self, command: &'static str, id: Option<Uuid>) -> anyhow::Result<()> {
        self.calls.lock().unwrap().push((command, id));
        if self.failing.lock().unwrap().contains(command) {
            anyhow::bail!("simulated failure in {command}");
        }
        Ok(())
    }
}

impl CommandGateway for ScriptedGateway {
    async fn get_projects(&self) -> anyhow::Result<Vec<Project>> {
        self.check(command::GET_PROJECTS, None)?;
        self.inner.get_projects().await
    }

    async fn get_project(&self, id: Uuid) -> anyhow::Result<Option<Project>> {
        self.check(command::GET_PROJECT, Some(id))?;
        self.inner.get_project(id).await
    }

    async fn create_project(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> anyhow::Result<Project> {
        self.check(command::CREATE_PROJECT, None)?;
        self.inner.create_project(name, description).await
    }

    async fn get_translations(&self, project_id: Uuid) -> anyhow::Result<Vec<Translation>> {
        self.check(command::GET_TRANSLATIONS, Some(project_id))?;
        self.inner.get_translations(project_id).await
    }

    async fn create_translation(
        &self,
        project_id: Uuid,
        source_text: &str,
    ) -> anyhow::Result<Translation> {
        self.check(command::CREATE_TRANSLATION, Some(project_id))?;
        self.inner.create_translation(project_id, source_text).await
    }

    async fn update_translation(&self, id: Uuid, update: &TranslationUpdate) -> anyhow::Result<()> {
        self.check(command::UPDATE_TRANSLATION, Some(id))?;
        self.inner.update_translation(id, update).await
    }

    async fn get_chat_messages(&self, project_id: Uuid) -> anyhow::Result<Vec<ChatMessage>> {
        self.check(command::GET_CHAT_MESSAGES, Some(project_id))?;
        self.inner.get_chat_messages(project_id).await
    }

    async fn add_chat_message(
        &self,
        project_id: Uuid,
        role: ChatRole,
        content: &str,
    ) -> anyhow::Result<ChatMessage> {
        if let Some(gate) = &self.chat_gate {
            gate.acquire().await?.forget();
        }
        self.check(command::ADD_CHAT_MESSAGE, Some(project_id))?;
        self.inner.add_chat_message(project_id, role, content).await
    }

    async fn chat_with_assistant(&self, project_id: Uuid, message: &str) -> anyhow::Result<String> {
        self.check(command::CHAT_WITH_LLM, Some(project_id))?;
        self.inner.chat_with_assistant(project_id, message).await
    }
}
