mod common;
mod editor;
mod sidebar;

// Public API
pub use common::TerminalScreen;
pub use editor::{AddForm, FormAction};
pub use sidebar::{run_sidebar, TERMINAL_TRAY};
