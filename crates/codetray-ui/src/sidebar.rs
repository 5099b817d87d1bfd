use crate::common::{geometry_to_rect, TerminalScreen, ACCENT, BG, BUTTON, FG};
use crate::editor::{AddForm, FormAction};
use codetray_core::{
    ActuationError, Category, ClipboardBackend, EnigoKeyboard, PasteBackend, Result, Screen,
    Snippet, Storage, SystemClipboard, TrayDimensions, TraySession, ValidationError,
};
use crossterm::{
    event::{
        self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste,
        EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs},
    Frame, Terminal,
};
use std::io::{self, stdout};
use std::time::{Duration, Instant};
use tracing::info;

/// Longest the loop waits for input when no deferred task is pending.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Tray sizes in terminal cells.
pub const TERMINAL_TRAY: TrayDimensions = TrayDimensions {
    expanded_width: 36,
    collapsed_width: 2,
    expanded_height: 14,
    collapsed_height: 1,
};

type Session<C = SystemClipboard, K = EnigoKeyboard> = TraySession<TerminalScreen, C, K>;

struct SidebarState {
    query: String,
    tab: usize,
    list_state: ListState,
    list_area: Rect,
    form: Option<AddForm>,
    status: Option<(String, Color)>,
    pointer_inside: bool,
    exiting: bool,
}

impl SidebarState {
    fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            query: String::new(),
            tab: 0,
            list_state,
            list_area: Rect::default(),
            form: None,
            status: None,
            pointer_inside: false,
            exiting: false,
        }
    }

    fn category(&self) -> Category {
        Category::ALL[self.tab]
    }

    fn reset_selection(&mut self) {
        self.list_state.select(Some(0));
        *self.list_state.offset_mut() = 0;
    }

    fn set_status(&mut self, message: impl Into<String>, color: Color) {
        self.status = Some((message.into(), color));
    }
}

/// Run the snippet sidebar in the terminal until the user quits.
pub fn run_sidebar(storage: Storage) -> Result<()> {
    enable_raw_mode()?;
    execute!(
        stdout(),
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;

    let mut session = TraySession::open(storage, TerminalScreen::new(), TERMINAL_TRAY);
    let mut state = SidebarState::new();
    let result = run_loop(&mut terminal, &mut session, &mut state);

    // Clean up terminal
    disable_raw_mode()?;
    execute!(
        stdout(),
        DisableBracketedPaste,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    session: &mut Session,
    state: &mut SidebarState,
) -> Result<()> {
    while !state.exiting {
        terminal.draw(|f| render(f, session, state))?;

        let now = Instant::now();
        let timeout = session
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
            .unwrap_or(IDLE_POLL)
            .min(IDLE_POLL);

        if event::poll(timeout)? {
            handle_event(event::read()?, Instant::now(), session, state);
        }
        session.tick(Instant::now());
    }
    info!("Sidebar closed");
    Ok(())
}

fn handle_event<C: ClipboardBackend, K: PasteBackend>(
    event: Event,
    now: Instant,
    session: &mut Session<C, K>,
    state: &mut SidebarState,
) {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            if let Some(form) = state.form.as_mut() {
                match form.handle_key(key) {
                    FormAction::Submit => submit_form(session, state, now),
                    FormAction::Cancel => close_form(session, state, now),
                    FormAction::None => {}
                }
            } else {
                handle_key(key, now, session, state);
            }
        }
        Event::Paste(text) => match state.form.as_mut() {
            Some(form) => form.paste(&text),
            None => {
                state.query.push_str(text.lines().next().unwrap_or_default());
                state.reset_selection();
            }
        },
        Event::Mouse(mouse) => handle_mouse(mouse, now, session, state),
        _ => {}
    }
}

fn handle_key<C: ClipboardBackend, K: PasteBackend>(
    key: KeyEvent,
    now: Instant,
    session: &mut Session<C, K>,
    state: &mut SidebarState,
) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => state.exiting = true,
        KeyCode::Char('p') if ctrl => {
            let pinned = !session.tray().is_pinned();
            session.set_pinned(pinned);
            state.set_status(if pinned { "Pinned" } else { "Unpinned" }, Color::Gray);
        }
        KeyCode::Char('s') if ctrl => {
            let side = session.tray().side().next();
            let (_, saved) = session.set_side(side);
            match saved {
                Ok(()) => state.set_status(format!("Docked {}", side), Color::Gray),
                Err(err) => state.set_status(format!("Side not saved: {}", err), Color::Red),
            }
            sync_pointer(session, state, now);
        }
        KeyCode::Char('n') if ctrl => open_form(session, state),
        KeyCode::Char(c) if !ctrl => {
            state.query.push(c);
            state.reset_selection();
        }
        KeyCode::Backspace => {
            state.query.pop();
            state.reset_selection();
        }
        KeyCode::Esc => {
            if state.query.is_empty() {
                state.exiting = true;
            } else {
                state.query.clear();
                state.reset_selection();
            }
        }
        KeyCode::Left => {
            state.tab = (state.tab + Category::ALL.len() - 1) % Category::ALL.len();
            state.reset_selection();
        }
        KeyCode::Right | KeyCode::Tab => {
            state.tab = (state.tab + 1) % Category::ALL.len();
            state.reset_selection();
        }
        KeyCode::Up => {
            let selected = state.list_state.selected().unwrap_or(0);
            state.list_state.select(Some(selected.saturating_sub(1)));
        }
        KeyCode::Down => {
            let count = visible_snippets(session, state).len();
            let selected = state.list_state.selected().unwrap_or(0);
            if selected + 1 < count {
                state.list_state.select(Some(selected + 1));
            }
        }
        KeyCode::Enter => {
            let selected = state.list_state.selected().unwrap_or(0);
            if let Some(snippet) = visible_snippets(session, state).into_iter().nth(selected) {
                activate(session, state, &snippet, now);
            }
        }
        _ => {}
    }
}

fn handle_mouse<C: ClipboardBackend, K: PasteBackend>(
    mouse: MouseEvent,
    now: Instant,
    session: &mut Session<C, K>,
    state: &mut SidebarState,
) {
    session.screen().set_pointer(mouse.column, mouse.row);
    sync_pointer(session, state, now);

    if mouse.kind != MouseEventKind::Down(MouseButton::Left) || state.form.is_some() {
        return;
    }
    let area = state.list_area;
    let inside_list = mouse.column >= area.x
        && mouse.column < area.right()
        && mouse.row >= area.y
        && mouse.row < area.bottom();
    if !inside_list || !session.tray().is_expanded() {
        return;
    }

    let index = state.list_state.offset() + usize::from(mouse.row - area.y);
    if let Some(snippet) = visible_snippets(session, state).into_iter().nth(index) {
        state.list_state.select(Some(index));
        activate(session, state, &snippet, now);
    }
}

/// Turn pointer movement into enter/leave events for the tray.
///
/// While the add form is open a leave is held back, so the tray cannot
/// collapse underneath the form. Closing the form syncs again.
fn sync_pointer<C: ClipboardBackend, K: PasteBackend>(
    session: &mut Session<C, K>,
    state: &mut SidebarState,
    now: Instant,
) {
    let inside = match session.screen().pointer() {
        Some(pointer) => session.current_geometry().contains(pointer),
        None => false,
    };
    match (state.pointer_inside, inside) {
        (false, true) => {
            session.pointer_enter();
        }
        (true, false) if state.form.is_some() => return,
        (true, false) => session.pointer_leave(now),
        _ => {}
    }
    state.pointer_inside = inside;
}

fn open_form<C: ClipboardBackend, K: PasteBackend>(
    session: &mut Session<C, K>,
    state: &mut SidebarState,
) {
    session.pointer_enter();
    state.pointer_inside = true;
    state.form = Some(AddForm::new());
}

fn close_form<C: ClipboardBackend, K: PasteBackend>(
    session: &mut Session<C, K>,
    state: &mut SidebarState,
    now: Instant,
) {
    state.form = None;
    sync_pointer(session, state, now);
}

fn activate<C: ClipboardBackend, K: PasteBackend>(
    session: &mut Session<C, K>,
    state: &mut SidebarState,
    snippet: &Snippet,
    now: Instant,
) {
    match session.activate(&snippet.body, now) {
        Err(ActuationError::Clipboard(msg)) => {
            state.set_status(format!("Copy failed: {}", msg), Color::Red)
        }
        // Focus and paste failures leave the text on the clipboard
        Ok(()) | Err(_) => state.set_status(format!("Copied '{}'", snippet.label), Color::Green),
    }
}

fn submit_form<C: ClipboardBackend, K: PasteBackend>(
    session: &mut Session<C, K>,
    state: &mut SidebarState,
    now: Instant,
) {
    let Some(form) = state.form.as_mut() else {
        return;
    };
    match session.add_custom(form.label.clone(), form.body.clone()) {
        Ok(snippet) => {
            close_form(session, state, now);
            state.set_status(format!("Added '{}'", snippet.label), Color::Green);
        }
        Err(ValidationError::MissingField) => {
            form.set_error(ValidationError::MissingField.to_string());
            return;
        }
        Err(err @ ValidationError::PersistFailed(_)) => {
            close_form(session, state, now);
            state.set_status(err.to_string(), Color::Red);
        }
    }
    state.tab = Category::ALL
        .iter()
        .position(|category| *category == Category::Custom)
        .unwrap_or(0);
    state.query.clear();
    let last = session.store().list_custom().len().saturating_sub(1);
    state.list_state.select(Some(last));
}

fn visible_snippets<C: ClipboardBackend, K: PasteBackend>(
    session: &Session<C, K>,
    state: &SidebarState,
) -> Vec<Snippet> {
    session
        .store()
        .visible(state.category(), &state.query)
        .cloned()
        .collect()
}

/// First line of a label, so every list row is one terminal line.
fn list_label(label: &str) -> &str {
    label.lines().next().unwrap_or_default()
}

fn render<C: ClipboardBackend, K: PasteBackend>(
    f: &mut Frame,
    session: &Session<C, K>,
    state: &mut SidebarState,
) {
    render_tray(f, session, state);

    if let Some(form) = &state.form {
        let full = f.area();
        form.render(f, full);
    }
}

fn render_tray<C: ClipboardBackend, K: PasteBackend>(
    f: &mut Frame,
    session: &Session<C, K>,
    state: &mut SidebarState,
) {
    let area = geometry_to_rect(session.current_geometry()).intersection(f.area());
    if area.width == 0 || area.height == 0 {
        state.list_area = Rect::default();
        return;
    }

    if !session.tray().is_expanded() {
        let strip = Block::default().style(Style::default().bg(ACCENT));
        f.render_widget(strip, area);
        state.list_area = Rect::default();
        return;
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" CodeSidebar ")
        .border_style(Style::default().fg(ACCENT))
        .style(Style::default().bg(BG).fg(FG));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Search
            Constraint::Length(1), // Tabs
            Constraint::Min(1),    // Snippets
            Constraint::Length(1), // Status
        ])
        .split(inner);

    let search = if state.query.is_empty() {
        Paragraph::new("Search...").style(Style::default().fg(Color::DarkGray).bg(BUTTON))
    } else {
        Paragraph::new(state.query.as_str()).style(Style::default().fg(FG).bg(BUTTON))
    };
    f.render_widget(search, chunks[0]);

    let titles: Vec<Line> = Category::ALL
        .iter()
        .map(|category| Line::from(category.title()))
        .collect();
    let tabs = Tabs::new(titles)
        .select(state.tab)
        .style(Style::default().fg(FG))
        .highlight_style(Style::default().bg(ACCENT).add_modifier(Modifier::BOLD));
    f.render_widget(tabs, chunks[1]);

    let snippets = visible_snippets(session, state);
    let items: Vec<ListItem> = snippets
        .iter()
        .map(|snippet| ListItem::new(list_label(&snippet.label)))
        .collect();
    if let Some(selected) = state.list_state.selected() {
        if selected >= items.len() {
            state.list_state.select(Some(items.len().saturating_sub(1)));
        }
    }
    let list = List::new(items)
        .style(Style::default().fg(FG))
        .highlight_style(Style::default().bg(BUTTON).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");
    f.render_stateful_widget(list, chunks[2], &mut state.list_state);
    state.list_area = chunks[2];

    let (message, color) = match &state.status {
        Some((message, color)) => (message.clone(), *color),
        None => (
            format!(
                "{} | {}  ^N add ^P pin ^S side",
                if session.tray().is_pinned() { "pinned" } else { "auto" },
                session.tray().side()
            ),
            Color::Gray,
        ),
    };
    f.render_widget(
        Paragraph::new(message).style(Style::default().fg(color)),
        chunks[3],
    );
}
