use crate::config::PASTE_DELAY;
use crate::error::ActuationError;
use crate::keyboard::PasteBackend;
use crate::timer::TimerSlot;
use arboard::Clipboard;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Plain-text system clipboard.
pub trait ClipboardBackend {
    fn set_text(&mut self, text: &str) -> Result<(), ActuationError>;
}

/// Clipboard backed by arboard.
///
/// The handle is created on first use and kept for the life of the tray: on
/// X11 and Wayland the copied text is only served while it is alive.
#[derive(Default)]
pub struct SystemClipboard {
    clipboard: Option<Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn handle(&mut self) -> Result<&mut Clipboard, ActuationError> {
        if self.clipboard.is_none() {
            let clipboard =
                Clipboard::new().map_err(|e| ActuationError::Clipboard(e.to_string()))?;
            self.clipboard = Some(clipboard);
        }
        self.clipboard
            .as_mut()
            .ok_or_else(|| ActuationError::Clipboard("clipboard unavailable".to_string()))
    }
}

impl ClipboardBackend for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ActuationError> {
        self.handle()?
            .set_text(text)
            .map_err(|e| ActuationError::Clipboard(e.to_string()))
    }
}

/// Copies snippet text and, best-effort, pastes it into the previously
/// focused window.
pub struct ClipboardActuator<C, K> {
    clipboard: C,
    keyboard: K,
    auto_paste: bool,
    paste_delay: Duration,
    pending_paste: TimerSlot,
}

impl<C: ClipboardBackend, K: PasteBackend> ClipboardActuator<C, K> {
    pub fn new(clipboard: C, keyboard: K) -> Self {
        Self {
            clipboard,
            keyboard,
            auto_paste: true,
            paste_delay: PASTE_DELAY,
            pending_paste: TimerSlot::new(),
        }
    }

    /// Copy only, never simulate keystrokes.
    pub fn without_auto_paste(mut self) -> Self {
        self.auto_paste = false;
        self
    }

    pub fn clipboard_mut(&mut self) -> &mut C {
        &mut self.clipboard
    }

    /// Put `text` on the clipboard, then focus the previous window and
    /// schedule the paste keystroke.
    ///
    /// The copy is the guaranteed effect: when this returns
    /// `ActuationError::Focus` the clipboard already holds `text`.
    pub fn activate(&mut self, text: &str, now: Instant) -> Result<(), ActuationError> {
        self.pending_paste.cancel();
        self.clipboard.set_text(text)?;
        debug!(chars = text.chars().count(), "Copied snippet to clipboard");

        if !self.auto_paste {
            return Ok(());
        }
        self.keyboard.focus_previous()?;
        let id = self.pending_paste.start(now, self.paste_delay);
        trace!(?id, "Paste scheduled");
        Ok(())
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending_paste.deadline()
    }

    /// Send the paste keystroke if it is due.
    pub fn fire_due(&mut self, now: Instant) -> Option<Result<(), ActuationError>> {
        self.pending_paste.take_due(now)?;
        Some(self.keyboard.paste())
    }
}
