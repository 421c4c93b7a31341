pub mod config;
pub mod core;
pub mod gui;
pub mod models;

pub use config::{LayoutConfig, ShellConfig};
pub use crate::core::gateway::{CommandGateway, InvokeGateway, MemoryGateway};
pub use crate::core::store::{AppState, AppStore};
pub use gui::GaiaShell;
pub use models::{ChatMessage, ChatRole, Project, Translation, TranslationStatus, TranslationUpdate};
