use uuid::Uuid;

use crate::models::{ChatMessage, Project, Translation};

/// Closed interval a panel width is kept in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WidthBounds {
    pub min: f64,
    pub max: f64,
}

impl WidthBounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Saturate `width` at the bounds. NaN lands on `min`.
    pub fn clamp(&self, width: f64) -> f64 {
        if width.is_nan() {
            return self.min;
        }
        width.max(self.min).min(self.max)
    }

    pub fn contains(&self, width: f64) -> bool {
        width >= self.min && width <= self.max
    }
}

pub const SIDEBAR_BOUNDS: WidthBounds = WidthBounds::new(200.0, 500.0);
pub const CHAT_PANEL_BOUNDS: WidthBounds = WidthBounds::new(250.0, 600.0);

#[derive(Debug, Clone, PartialEq)]
pub struct UiState {
    pub sidebar_open: bool,
    pub chat_panel_open: bool,
    pub lower_pane_open: bool,
    pub settings_open: bool,
    pub sidebar_width: f64,
    pub chat_panel_width: f64,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            sidebar_open: true,
            chat_panel_open: true,
            lower_pane_open: false,
            settings_open: false,
            sidebar_width: 256.0,
            chat_panel_width: 320.0,
        }
    }
}

/// Everything views render from. Only [`AppStore`](super::AppStore) writes it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub projects: Vec<Project>,
    pub current_project: Option<Project>,

    pub translations: Vec<Translation>,
    pub selected_translation: Option<Uuid>,

    pub chat_messages: Vec<ChatMessage>,
    pub chat_loading: bool,

    pub ui: UiState,

    pub search_query: String,
    pub search_results: Vec<Translation>,
}

impl AppState {
    pub fn window_title(&self, app_name: &str) -> String {
        match &self.current_project {
            Some(project) => format!("{} - {}", project.name, app_name),
            None => app_name.to_string(),
        }
    }

    pub fn current_project_id(&self) -> Option<Uuid> {
        self.current_project.as_ref().map(|p| p.id)
    }

    /// Translations that belong to the current project.
    pub fn current_translations(&self) -> impl Iterator<Item = &Translation> {
        let project_id = self.current_project_id();
        self.translations
            .iter()
            .filter(move |t| Some(t.project_id) == project_id)
    }

    pub fn selected(&self) -> Option<&Translation> {
        let id = self.selected_translation?;
        self.translations.iter().find(|t| t.id == id)
    }

    pub fn translation(&self, id: Uuid) -> Option<&Translation> {
        self.translations.iter().find(|t| t.id == id)
    }
}
