#![allow(dead_code, unused_imports)]

mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from gaia_shell for tests
pub use gaia_shell::core::gateway::{CommandGateway, MemoryGateway, Seed, command};
pub use gaia_shell::core::store::{AppState, AppStore, CHAT_PANEL_BOUNDS, SIDEBAR_BOUNDS};
pub use gaia_shell::{
    ChatMessage, ChatRole, Project, Translation, TranslationStatus, TranslationUpdate,
};
