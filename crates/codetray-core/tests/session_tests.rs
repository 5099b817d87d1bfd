use codetray_core::{
    is_visible, ActuationError, Category, ClipboardActuator, ClipboardBackend, Geometry,
    PasteBackend, Point, Screen, ScreenSize, Side, Snippet, Storage, TrayDimensions, TraySession,
    ValidationError,
};
use std::cell::Cell;
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

struct TestScreen {
    pointer: Cell<Option<Point>>,
}

impl Screen for TestScreen {
    fn size(&self) -> ScreenSize {
        ScreenSize {
            width: 1280,
            height: 800,
        }
    }

    fn pointer(&self) -> Option<Point> {
        self.pointer.get()
    }
}

#[derive(Default)]
struct MemoryClipboard(Option<String>);

impl ClipboardBackend for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ActuationError> {
        self.0 = Some(text.to_string());
        Ok(())
    }
}

/// Input simulation that is never permitted, like a sandboxed session.
struct DeniedKeys;

impl PasteBackend for DeniedKeys {
    fn focus_previous(&mut self) -> Result<(), ActuationError> {
        Err(ActuationError::Focus("permission denied".to_string()))
    }

    fn paste(&mut self) -> Result<(), ActuationError> {
        Err(ActuationError::Paste("permission denied".to_string()))
    }
}

type TestSession = TraySession<TestScreen, MemoryClipboard, DeniedKeys>;

fn dims() -> TrayDimensions {
    TrayDimensions {
        expanded_width: 300,
        collapsed_width: 10,
        expanded_height: 240,
        collapsed_height: 10,
    }
}

fn open(dir: &Path) -> TestSession {
    let screen = TestScreen {
        pointer: Cell::new(None),
    };
    let actuator = ClipboardActuator::new(MemoryClipboard::default(), DeniedKeys);
    TraySession::with_actuator(Storage::open(dir), screen, dims(), actuator)
}

fn after(start: Instant, ms: u64) -> Instant {
    start + Duration::from_millis(ms)
}

#[test]
fn first_run_creates_default_config() {
    let dir = tempfile::tempdir().unwrap();
    let session = open(dir.path());

    assert_eq!(session.config().side, Side::Right);
    assert!(Storage::open(dir.path()).config_path().exists());
    assert_eq!(
        session.current_geometry(),
        Geometry {
            x: 980,
            y: 0,
            width: 300,
            height: 800
        }
    );
}

#[test]
fn side_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = open(dir.path());

    let (geometry, saved) = session.set_side(Side::Bottom);
    assert!(saved.is_ok());
    assert_eq!(
        geometry,
        Geometry {
            x: 0,
            y: 560,
            width: 1280,
            height: 240
        }
    );
    drop(session);

    assert_eq!(Storage::open(dir.path()).load_config().side, Side::Bottom);
    let reopened = open(dir.path());
    assert_eq!(reopened.tray().side(), Side::Bottom);
    assert!(reopened.tray().is_expanded());
}

#[test]
fn side_change_keeps_foreign_config_keys() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        Storage::open(dir.path()).config_path(),
        r#"{ "side": "Left", "font_size": 11 }"#,
    )
    .unwrap();
    let mut session = open(dir.path());
    assert_eq!(session.tray().side(), Side::Left);

    let (_, saved) = session.set_side(Side::Top);
    assert!(saved.is_ok());

    let raw = fs::read_to_string(Storage::open(dir.path()).config_path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["side"], "Top");
    assert_eq!(value["font_size"], 11);
}

#[test]
fn custom_snippets_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = open(dir.path());

    session.add_custom("Docker run", "docker run --rm -it").unwrap();
    assert!(matches!(
        session.add_custom("", "x"),
        Err(ValidationError::MissingField)
    ));
    drop(session);

    let reopened = open(dir.path());
    assert_eq!(
        reopened.store().list(Category::Custom),
        &[Snippet::new("Docker run", "docker run --rm -it")]
    );
}

#[test]
fn hover_out_and_back_keeps_tray_open() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = open(dir.path());
    let start = Instant::now();

    session.pointer_leave(start);
    assert_eq!(session.pointer_enter(), None);
    assert_eq!(session.next_deadline(), None);
    assert_eq!(session.tick(after(start, 500)), None);
    assert!(session.tray().is_expanded());
}

#[test]
fn pinned_tray_stays_open() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = open(dir.path());
    let start = Instant::now();

    session.set_pinned(true);
    session.pointer_leave(start);
    assert_eq!(session.tick(after(start, 500)), None);
    assert!(session.tray().is_expanded());
}

#[test]
fn unpinned_tray_collapses_then_reopens() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = open(dir.path());
    session.screen().pointer.set(Some(Point { x: 10, y: 10 }));
    let start = Instant::now();

    session.pointer_leave(start);
    assert_eq!(session.next_deadline(), Some(after(start, 500)));
    assert_eq!(
        session.tick(after(start, 500)),
        Some(Geometry {
            x: 1270,
            y: 0,
            width: 10,
            height: 800
        })
    );

    session.screen().pointer.set(Some(Point { x: 1275, y: 10 }));
    assert!(session.pointer_enter().is_some());
    assert!(session.tray().is_expanded());
}

#[test]
fn clipboard_holds_text_even_when_paste_is_denied() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = open(dir.path());
    let start = Instant::now();

    let result = session.activate("console.log();", start);
    assert!(matches!(result, Err(ActuationError::Focus(_))));
    assert_eq!(session.tick(after(start, 150)), None);
    assert_eq!(
        session.actuator_mut().clipboard_mut().0.as_deref(),
        Some("console.log();")
    );
}

#[test]
fn filtering_is_label_only() {
    let dir = tempfile::tempdir().unwrap();
    let session = open(dir.path());

    let boilerplate = &session.store().list_builtins(Category::Html)[0];
    assert_eq!(boilerplate.label, "Boilerplate");
    assert!(boilerplate.body.starts_with("<!DOCTYPE html>"));
    assert!(!is_visible(&boilerplate.label, "doctype"));
    assert_eq!(session.store().visible(Category::Html, "doctype").count(), 0);
}
