use crate::error::ActuationError;
use enigo::{Direction, Enigo, Key, Keyboard, Settings};
use std::thread;
use std::time::Duration;

/// Simulated keystrokes used for auto-paste.
pub trait PasteBackend {
    /// Switch focus back to the window that was active before the tray.
    fn focus_previous(&mut self) -> Result<(), ActuationError>;
    /// Send the platform paste shortcut to the focused window.
    fn paste(&mut self) -> Result<(), ActuationError>;
}

#[cfg(target_os = "macos")]
const MODIFIER: Key = Key::Meta;
#[cfg(not(target_os = "macos"))]
const MODIFIER: Key = Key::Control;

#[cfg(target_os = "macos")]
const SWITCHER: Key = Key::Meta;
#[cfg(not(target_os = "macos"))]
const SWITCHER: Key = Key::Alt;

/// Keyboard controller backed by enigo, created on first use.
#[derive(Default)]
pub struct EnigoKeyboard {
    enigo: Option<Enigo>,
}

impl EnigoKeyboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn controller(&mut self) -> Result<&mut Enigo, String> {
        if self.enigo.is_none() {
            self.enigo = Some(create_keyboard_controller()?);
        }
        self.enigo
            .as_mut()
            .ok_or_else(|| "keyboard controller unavailable".to_string())
    }
}

impl PasteBackend for EnigoKeyboard {
    fn focus_previous(&mut self) -> Result<(), ActuationError> {
        let keyboard = self.controller().map_err(ActuationError::Focus)?;
        send_chord(keyboard, SWITCHER, Key::Tab).map_err(ActuationError::Focus)
    }

    fn paste(&mut self) -> Result<(), ActuationError> {
        let keyboard = self.controller().map_err(ActuationError::Paste)?;
        send_chord(keyboard, MODIFIER, Key::Unicode('v')).map_err(ActuationError::Paste)
    }
}

/// Create a keyboard controller
pub fn create_keyboard_controller() -> Result<Enigo, String> {
    Enigo::new(&Settings::default())
        .map_err(|err| format!("Failed to create keyboard controller: {}", err))
}

/// Press `key` while holding `modifier`. The modifier is always released,
/// even when the key press fails.
fn send_chord(keyboard: &mut impl Keyboard, modifier: Key, key: Key) -> Result<(), String> {
    keyboard
        .key(modifier, Direction::Press)
        .map_err(|err| format!("Failed to press modifier: {}", err))?;

    // Small delay so the modifier registers before the key
    thread::sleep(Duration::from_millis(5));
    let clicked = keyboard
        .key(key, Direction::Click)
        .map_err(|err| format!("Failed to press key: {}", err));

    let released = keyboard
        .key(modifier, Direction::Release)
        .map_err(|err| format!("Failed to release modifier: {}", err));

    clicked.and(released)
}
