mod state;

use anyhow::Context;
use tokio::sync::watch;
use uuid::Uuid;

use crate::config::LayoutConfig;
use crate::core::gateway::CommandGateway;
use crate::models::{ChatMessage, ChatRole, TranslationUpdate};

pub use state::{AppState, CHAT_PANEL_BOUNDS, SIDEBAR_BOUNDS, UiState, WidthBounds};

/// Owner of all shared application state and the only caller of the gateway.
///
/// Actions never return errors: a failed backend call is logged and the
/// state is left as the operation documents.
pub struct AppStore<G> {
    gateway: G,
    state: watch::Sender<AppState>,
}

impl<G> std::fmt::Debug for AppStore<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppStore")
            .field("state", &*self.state.borrow())
            .finish()
    }
}

/// Clears `chat_loading` when dropped, however the send ends.
struct ChatLoadingGuard<'a> {
    state: &'a watch::Sender<AppState>,
}

impl Drop for ChatLoadingGuard<'_> {
    fn drop(&mut self) {
        self.state.send_modify(|s| s.chat_loading = false);
    }
}

impl<G: CommandGateway> AppStore<G> {
    pub fn new(gateway: G) -> Self {
        Self::with_layout(gateway, &LayoutConfig::default())
    }

    pub fn with_layout(gateway: G, layout: &LayoutConfig) -> Self {
        let initial = AppState {
            ui: layout.ui_state(),
            ..AppState::default()
        };
        let (state, _) = watch::channel(initial);
        Self { gateway, state }
    }

    /// Backend handle, for inspection only.
    ///
    /// Collaborators must not issue commands through it; every backend call
    /// goes through a store action so its result lands in the state.
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn snapshot(&self) -> AppState {
        self.state.borrow().clone()
    }

    /// Receiver that is notified after every state change.
    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.state.subscribe()
    }

    fn update(&self, f: impl FnOnce(&mut AppState)) {
        self.state.send_modify(f);
    }

    /// Apply `f` and notify only if it reports a change.
    fn update_if(&self, f: impl FnOnce(&mut AppState) -> bool) {
        self.state.send_if_modified(f);
    }

    pub async fn load_projects(&self) {
        match self.gateway.get_projects().await {
            Ok(projects) => self.update(|s| s.projects = projects),
            Err(err) => tracing::error!("Failed to load projects: {err:#}"),
        }
    }

    /// Make `id` the current project and load its translations and chat.
    /// An unknown id leaves the current project as it was.
    pub async fn load_project(&self, id: Uuid) {
        match self.gateway.get_project(id).await {
            Ok(Some(project)) => {
                self.update(|s| s.current_project = Some(project));
                self.load_project_data(id).await;
            }
            Ok(None) => tracing::debug!(%id, "Project not found, keeping current project"),
            Err(err) => tracing::error!(%id, "Failed to load project: {err:#}"),
        }
    }

    pub async fn create_project(&self, name: &str, description: Option<&str>) {
        match self.gateway.create_project(name, description).await {
            Ok(project) => {
                let id = project.id;
                self.update(|s| {
                    s.projects.insert(0, project.clone());
                    s.current_project = Some(project);
                });
                self.load_project_data(id).await;
            }
            Err(err) => tracing::error!(project_name = name, "Failed to create project: {err:#}"),
        }
    }

    /// Both loads write disjoint parts of the state, so they run side by side.
    async fn load_project_data(&self, project_id: Uuid) {
        tokio::join!(
            self.load_translations(project_id),
            self.load_chat_messages(project_id)
        );
    }

    pub async fn load_translations(&self, project_id: Uuid) {
        match self.gateway.get_translations(project_id).await {
            Ok(translations) => self.update(|s| s.translations = translations),
            Err(err) => tracing::error!(%project_id, "Failed to load translations: {err:#}"),
        }
    }

    pub async fn create_translation(&self, project_id: Uuid, source_text: &str) {
        match self.gateway.create_translation(project_id, source_text).await {
            Ok(translation) => self.update(|s| s.translations.push(translation)),
            Err(err) => tracing::error!(%project_id, "Failed to create translation: {err:#}"),
        }
    }

    /// Merge `update` into the local copy once the backend has accepted it.
    pub async fn update_translation(&self, id: Uuid, update: TranslationUpdate) {
        match self.gateway.update_translation(id, &update).await {
            Ok(()) => self.update(|s| {
                if let Some(translation) = s.translations.iter_mut().find(|t| t.id == id) {
                    translation.apply(&update);
                }
            }),
            Err(err) => tracing::error!(%id, "Failed to update translation: {err:#}"),
        }
    }

    pub async fn load_chat_messages(&self, project_id: Uuid) {
        match self.gateway.get_chat_messages(project_id).await {
            Ok(messages) => self.update(|s| s.chat_messages = messages),
            Err(err) => tracing::error!(%project_id, "Failed to load chat messages: {err:#}"),
        }
    }

    /// Optimistically append the user's message, then persist it and ask for
    /// a reply.
    ///
    /// The provisional message keeps its local id and stays in the thread
    /// even when a later step fails. `chat_loading` is set for the duration.
    pub async fn send_chat_message(&self, project_id: Uuid, content: &str) {
        let provisional = ChatMessage::local(project_id, ChatRole::User, content);
        self.update(|s| {
            s.chat_messages.push(provisional);
            s.chat_loading = true;
        });
        let _loading = ChatLoadingGuard { state: &self.state };

        if let Err(err) = self.exchange_chat(project_id, content).await {
            tracing::error!(%project_id, "Failed to send chat message: {err:#}");
        }
    }

    async fn exchange_chat(&self, project_id: Uuid, content: &str) -> anyhow::Result<()> {
        self.gateway
            .add_chat_message(project_id, ChatRole::User, content)
            .await
            .context("saving user message")?;
        let reply = self
            .gateway
            .chat_with_assistant(project_id, content)
            .await
            .context("requesting assistant reply")?;
        let reply = ChatMessage::local(project_id, ChatRole::Assistant, reply);
        self.update(|s| s.chat_messages.push(reply));
        Ok(())
    }

    /// Filter the loaded translations locally. An empty query matches all.
    pub fn search_translations(&self, query: &str) {
        let needle = query.to_lowercase();
        self.update(|s| {
            s.search_results = s
                .translations
                .iter()
                .filter(|t| t.matches(&needle))
                .cloned()
                .collect();
            s.search_query = query.to_string();
        });
    }

    pub fn set_selected_translation(&self, id: Option<Uuid>) {
        self.update_if(|s| replace(&mut s.selected_translation, id));
    }

    pub fn set_sidebar_open(&self, open: bool) {
        self.update_if(|s| replace(&mut s.ui.sidebar_open, open));
    }

    pub fn set_chat_panel_open(&self, open: bool) {
        self.update_if(|s| replace(&mut s.ui.chat_panel_open, open));
    }

    pub fn set_lower_pane_open(&self, open: bool) {
        self.update_if(|s| replace(&mut s.ui.lower_pane_open, open));
    }

    pub fn set_settings_open(&self, open: bool) {
        self.update_if(|s| replace(&mut s.ui.settings_open, open));
    }

    pub fn toggle_sidebar(&self) {
        self.update(|s| s.ui.sidebar_open = !s.ui.sidebar_open);
    }

    pub fn toggle_chat_panel(&self) {
        self.update(|s| s.ui.chat_panel_open = !s.ui.chat_panel_open);
    }

    pub fn toggle_lower_pane(&self) {
        self.update(|s| s.ui.lower_pane_open = !s.ui.lower_pane_open);
    }

    pub fn set_sidebar_width(&self, width: f64) {
        let width = SIDEBAR_BOUNDS.clamp(width);
        self.update_if(|s| replace(&mut s.ui.sidebar_width, width));
    }

    pub fn set_chat_panel_width(&self, width: f64) {
        let width = CHAT_PANEL_BOUNDS.clamp(width);
        self.update_if(|s| replace(&mut s.ui.chat_panel_width, width));
    }
}

/// Assign and report whether the value changed.
fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}
