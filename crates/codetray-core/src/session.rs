use crate::clipboard::{ClipboardActuator, ClipboardBackend, SystemClipboard};
use crate::config::{Config, Side, TrayDimensions};
use crate::error::{ActuationError, StorageError, ValidationError};
use crate::keyboard::{EnigoKeyboard, PasteBackend};
use crate::models::Snippet;
use crate::storage::Storage;
use crate::store::SnippetStore;
use crate::tray::{Geometry, Screen, TrayStateMachine};
use std::time::Instant;
use tracing::{debug, info, warn};

/// The one tray instance: snippets, config, tray state and clipboard.
///
/// The presentation shell owns a session and forwards its events here.
pub struct TraySession<S, C = SystemClipboard, K = EnigoKeyboard> {
    store: SnippetStore,
    config: Config,
    storage: Storage,
    tray: TrayStateMachine,
    actuator: ClipboardActuator<C, K>,
    screen: S,
}

impl<S: Screen> TraySession<S> {
    /// Session using the real clipboard and keyboard.
    pub fn open(storage: Storage, screen: S, dims: TrayDimensions) -> Self {
        let actuator = ClipboardActuator::new(SystemClipboard::new(), EnigoKeyboard::new());
        Self::with_actuator(storage, screen, dims, actuator)
    }
}

impl<S: Screen, C: ClipboardBackend, K: PasteBackend> TraySession<S, C, K> {
    /// Load snippets and config from `storage`. Nothing here is fatal.
    pub fn with_actuator(
        storage: Storage,
        screen: S,
        dims: TrayDimensions,
        actuator: ClipboardActuator<C, K>,
    ) -> Self {
        let store = SnippetStore::load(storage.clone());
        let config = storage.load_config();
        if let Err(err) = storage.ensure_config(&config) {
            warn!(error = %err, "Could not create config file");
        }
        info!(
            side = %config.side,
            custom = store.list_custom().len(),
            "Tray session opened"
        );

        Self {
            tray: TrayStateMachine::new(config.side, dims),
            store,
            config,
            storage,
            actuator,
            screen,
        }
    }

    pub fn store(&self) -> &SnippetStore {
        &self.store
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn tray(&self) -> &TrayStateMachine {
        &self.tray
    }

    pub fn screen(&self) -> &S {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut S {
        &mut self.screen
    }

    pub fn actuator_mut(&mut self) -> &mut ClipboardActuator<C, K> {
        &mut self.actuator
    }

    pub fn add_custom(
        &mut self,
        label: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<Snippet, ValidationError> {
        self.store.add_custom(label, body)
    }

    pub fn current_geometry(&self) -> Geometry {
        self.tray.current_geometry(&self.screen)
    }

    pub fn pointer_enter(&mut self) -> Option<Geometry> {
        self.tray.pointer_enter(&self.screen)
    }

    pub fn pointer_leave(&mut self, now: Instant) {
        self.tray.pointer_leave(now);
    }

    pub fn set_pinned(&mut self, pinned: bool) {
        self.tray.set_pinned(pinned);
    }

    /// Move the tray to another edge and persist the choice.
    ///
    /// The move always happens. A write failure is returned alongside the new
    /// geometry so the shell can report it.
    pub fn set_side(&mut self, side: Side) -> (Geometry, Result<(), StorageError>) {
        let geometry = self.tray.set_side(side, &self.screen);
        self.config.side = side;
        let saved = self.storage.save_config(&self.config);
        if let Err(err) = &saved {
            warn!(side = %side, error = %err, "Tray side not saved");
        }
        (geometry, saved)
    }

    /// Copy `text` and start the best-effort auto-paste. Actuation errors
    /// are logged and returned for display, never fatal.
    pub fn activate(&mut self, text: &str, now: Instant) -> Result<(), ActuationError> {
        let result = self.actuator.activate(text, now);
        match &result {
            Ok(()) => {}
            Err(ActuationError::Clipboard(msg)) => warn!(error = %msg, "Copy failed"),
            Err(err) => debug!(error = %err, "Auto-paste skipped"),
        }
        result
    }

    /// Earliest instant at which `tick` has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.tray.next_deadline(), self.actuator.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Run every deferred task due at `now`. Returns the new tray geometry
    /// when the tray collapsed.
    pub fn tick(&mut self, now: Instant) -> Option<Geometry> {
        if let Some(Err(err)) = self.actuator.fire_due(now) {
            debug!(error = %err, "Auto-paste failed");
        }
        self.tray.fire_due(now, &self.screen)
    }
}
