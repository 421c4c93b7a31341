mod app;
pub mod document;
pub mod resize;

pub use app::{GaiaShell, Panel};
pub use document::{Cursor, Document, DocumentStyle, PointerCapture, PointerListener};
pub use resize::{ResizeDirection, ResizeEngine, ResizeOptions, ResizePhase};
