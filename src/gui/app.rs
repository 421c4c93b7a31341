use std::sync::Arc;

use crate::config::ShellConfig;
use crate::core::gateway::CommandGateway;
use crate::core::store::{AppStore, CHAT_PANEL_BOUNDS, SIDEBAR_BOUNDS};
use crate::gui::document::Document;
use crate::gui::resize::{ResizeDirection, ResizeEngine, ResizeOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Sidebar,
    ChatPanel,
}

/// The application window: one store, one document scope and the two
/// resizable side panels wired back into the store.
pub struct GaiaShell<G> {
    config: ShellConfig,
    store: Arc<AppStore<G>>,
    document: Document,
    sidebar: ResizeEngine,
    chat_panel: ResizeEngine,
}

impl<G> std::fmt::Debug for GaiaShell<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GaiaShell")
            .field("config", &self.config)
            .field("sidebar", &self.sidebar)
            .field("chat_panel", &self.chat_panel)
            .finish()
    }
}

impl<G: CommandGateway> GaiaShell<G> {
    /// Build the window and load the project list, as on first mount.
    pub async fn start(gateway: G, config: ShellConfig) -> Self {
        let store = Arc::new(AppStore::with_layout(gateway, &config.layout));
        let document = Document::new();
        let ui = store.snapshot().ui;

        let sidebar = {
            let store = Arc::clone(&store);
            ResizeEngine::new(
                &document,
                ResizeOptions::new(ResizeDirection::Left, ui.sidebar_width)
                    .with_bounds(SIDEBAR_BOUNDS),
                move |width| store.set_sidebar_width(width),
            )
        };
        let chat_panel = {
            let store = Arc::clone(&store);
            ResizeEngine::new(
                &document,
                ResizeOptions::new(ResizeDirection::Right, ui.chat_panel_width)
                    .with_bounds(CHAT_PANEL_BOUNDS),
                move |width| store.set_chat_panel_width(width),
            )
        };

        store.load_projects().await;
        tracing::info!(app = %config.app_name, "shell started");

        Self {
            config,
            store,
            document,
            sidebar,
            chat_panel,
        }
    }

    pub fn store(&self) -> &Arc<AppStore<G>> {
        &self.store
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn panel(&self, panel: Panel) -> &ResizeEngine {
        match panel {
            Panel::Sidebar => &self.sidebar,
            Panel::ChatPanel => &self.chat_panel,
        }
    }

    pub fn title(&self) -> String {
        self.store.snapshot().window_title(&self.config.app_name)
    }

    /// Push widths set through the store back into the panels.
    pub fn sync_panel_widths(&self) {
        let ui = self.store.snapshot().ui;
        self.sidebar.set_initial_width(ui.sidebar_width);
        self.chat_panel.set_initial_width(ui.chat_panel_width);
    }

    /// Drag `panel`'s handle from the first position through the rest and
    /// release at the last one.
    pub fn drag(&self, panel: Panel, positions: &[f64]) {
        let Some((&first, rest)) = positions.split_first() else {
            return;
        };
        self.panel(panel).pointer_down(first);
        for &x in rest {
            self.document.dispatch_pointer_move(x);
        }
        self.document
            .dispatch_pointer_up(rest.last().copied().unwrap_or(first));
    }

    /// Dispose both panels, then release the store.
    pub fn shutdown(self) {
        let Self {
            store,
            sidebar,
            chat_panel,
            ..
        } = self;
        sidebar.dispose();
        chat_panel.dispose();
        tracing::info!("shell stopped");
        drop(store);
    }
}
