use crate::common::{centered_rect, ACCENT, BG, BUTTON, FG};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const MAX_LABEL_LENGTH: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Label,
    Body,
}

/// What the sidebar should do after a key press in the add form.
#[derive(Debug, PartialEq, Eq)]
pub enum FormAction {
    None,
    Submit,
    Cancel,
}

/// Inline form for a new custom snippet.
#[derive(Debug)]
pub struct AddForm {
    pub label: String,
    pub body: String,
    field: Field,
    error: Option<String>,
}

impl AddForm {
    pub fn new() -> Self {
        Self {
            label: String::new(),
            body: String::new(),
            field: Field::Label,
            error: None,
        }
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormAction {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return FormAction::Cancel,
            KeyCode::Char('w') if ctrl => return FormAction::Submit,
            KeyCode::Tab | KeyCode::BackTab => {
                self.field = match self.field {
                    Field::Label => Field::Body,
                    Field::Body => Field::Label,
                };
            }
            KeyCode::Enter => match self.field {
                Field::Label => self.field = Field::Body,
                Field::Body => self.body.push('\n'),
            },
            KeyCode::Backspace => {
                match self.field {
                    Field::Label => self.label.pop(),
                    Field::Body => self.body.pop(),
                };
            }
            KeyCode::Char(c) if !ctrl => match self.field {
                Field::Label if self.label.chars().count() < MAX_LABEL_LENGTH => {
                    self.label.push(c)
                }
                Field::Label => {}
                Field::Body => self.body.push(c),
            },
            _ => return FormAction::None,
        }
        self.error = None;
        FormAction::None
    }

    /// Append pasted text to the focused field.
    pub fn paste(&mut self, text: &str) {
        match self.field {
            Field::Label => self
                .label
                .extend(text.chars().filter(|c| *c != '\n' && *c != '\r')),
            Field::Body => self.body.push_str(&text.replace("\r\n", "\n")),
        }
        self.error = None;
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let popup = centered_rect(80, 70, area);
        f.render_widget(Clear, popup);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" New snippet ")
            .border_style(Style::default().fg(ACCENT))
            .style(Style::default().bg(BG).fg(FG));
        let inner = block.inner(popup);
        f.render_widget(block, popup);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Label
                Constraint::Min(3),    // Body
                Constraint::Length(1), // Error or help
            ])
            .split(inner);

        let field_style = |field: Field| {
            if self.field == field {
                Style::default().fg(ACCENT)
            } else {
                Style::default().fg(BUTTON)
            }
        };

        let label = Paragraph::new(self.label.as_str()).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Label ")
                .border_style(field_style(Field::Label)),
        );
        f.render_widget(label, chunks[0]);

        let body = Paragraph::new(self.body.as_str())
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Code ")
                    .border_style(field_style(Field::Body)),
            );
        f.render_widget(body, chunks[1]);

        let footer = match &self.error {
            Some(message) => {
                Paragraph::new(message.as_str()).style(Style::default().fg(Color::Red))
            }
            None => Paragraph::new("Tab: switch field  Ctrl+W: save  Esc: cancel")
                .style(Style::default().fg(Color::Gray)),
        };
        f.render_widget(footer, chunks[2]);
    }
}

impl Default for AddForm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(form: &mut AddForm, code: KeyCode) -> FormAction {
        form.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(form: &mut AddForm, text: &str) {
        for c in text.chars() {
            press(form, KeyCode::Char(c));
        }
    }

    #[test]
    fn enter_moves_from_label_to_body_then_inserts_newlines() {
        let mut form = AddForm::new();
        type_text(&mut form, "Loop");
        press(&mut form, KeyCode::Enter);
        type_text(&mut form, "for x in y {");
        press(&mut form, KeyCode::Enter);
        type_text(&mut form, "}");

        assert_eq!(form.label, "Loop");
        assert_eq!(form.body, "for x in y {\n}");
    }

    #[test]
    fn ctrl_w_submits_and_esc_cancels() {
        let mut form = AddForm::new();
        let submit = form.handle_key(KeyEvent::new(KeyCode::Char('w'), KeyModifiers::CONTROL));
        assert_eq!(submit, FormAction::Submit);
        assert_eq!(press(&mut form, KeyCode::Esc), FormAction::Cancel);
        assert!(form.label.is_empty());
    }

    #[test]
    fn typing_clears_the_error() {
        let mut form = AddForm::new();
        form.set_error("Both a label and a body are required");
        type_text(&mut form, "a");
        assert!(form.error.is_none());
    }

    #[test]
    fn pasted_label_drops_newlines() {
        let mut form = AddForm::new();
        form.paste("two\r\nlines");
        assert_eq!(form.label, "twolines");

        press(&mut form, KeyCode::Tab);
        form.paste("a\r\nb");
        assert_eq!(form.body, "a\nb");
    }
}
