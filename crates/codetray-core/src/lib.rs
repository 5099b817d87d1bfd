pub mod builtins;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod filter;
pub mod keyboard;
pub mod models;
pub mod session;
pub mod storage;
pub mod store;
pub mod timer;
pub mod tray;

// Re-export common items for convenience
pub use clipboard::{ClipboardActuator, ClipboardBackend, SystemClipboard};
pub use config::{get_config_dir, Config, Side, TrayDimensions};
pub use error::{
    ActuationError, CodetrayError, LoadError, Result, StorageError, ValidationError,
};
pub use filter::is_visible;
pub use keyboard::{EnigoKeyboard, PasteBackend};
pub use models::{Category, Snippet};
pub use session::TraySession;
pub use storage::Storage;
pub use store::SnippetStore;
pub use tray::{compute_geometry, Geometry, Point, Screen, ScreenSize, TrayStateMachine};
