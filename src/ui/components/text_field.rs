use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::Theme;
use crate::ui::{Component, EventResult, Result};

pub enum TextFieldEvent {
    /// The value was edited.
    Changed(String),
}

/// Single-line labelled input with a message line underneath.
///
/// The cursor is a character index, so multi-byte input (Cyrillic names)
/// edits correctly.
pub struct TextField {
    label: String,
    value: String,
    cursor: usize,
    placeholder: Option<String>,
    focused: bool,
    error: String,
    hint: String,
}

impl TextField {
    /// Rows needed to render the field and its message line.
    pub const HEIGHT: u16 = 4;

    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: String::new(),
            cursor: 0,
            placeholder: None,
            focused: false,
            error: String::new(),
            hint: String::new(),
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replaces the value when it differs, moving the cursor to the end.
    pub fn sync(&mut self, value: &str) {
        if self.value != value {
            self.value = value.to_string();
            self.cursor = self.len();
        }
    }

    pub const fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    #[allow(dead_code)]
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    /// Error message shown under the input. Empty hides it.
    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error = error.into();
    }

    /// Muted help text shown when there is no error.
    pub fn set_hint(&mut self, hint: impl Into<String>) {
        self.hint = hint.into();
    }

    /// Inserts text at the cursor, e.g. from a paste.
    pub fn insert_str(&mut self, text: &str) -> TextFieldEvent {
        for c in text.chars().filter(|c| !c.is_control()) {
            self.insert_char(c);
        }
        self.changed()
    }

    fn changed(&self) -> TextFieldEvent {
        TextFieldEvent::Changed(self.value.clone())
    }

    fn len(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_index(&self, cursor: usize) -> usize {
        self.value
            .char_indices()
            .nth(cursor)
            .map_or(self.value.len(), |(index, _)| index)
    }

    fn insert_char(&mut self, c: char) {
        let index = self.byte_index(self.cursor);
        self.value.insert(index, c);
        self.cursor += 1;
    }

    fn delete_char_before_cursor(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let index = self.byte_index(self.cursor);
        self.value.remove(index);
        true
    }

    fn delete_char_at_cursor(&mut self) -> bool {
        if self.cursor >= self.len() {
            return false;
        }
        let index = self.byte_index(self.cursor);
        self.value.remove(index);
        true
    }

    fn delete_word_before_cursor(&mut self) -> bool {
        let chars: Vec<char> = self.value.chars().collect();
        let mut start = self.cursor;
        while start > 0 && chars[start - 1] == ' ' {
            start -= 1;
        }
        while start > 0 && chars[start - 1] != ' ' {
            start -= 1;
        }
        if start == self.cursor {
            return false;
        }
        let (from, to) = (self.byte_index(start), self.byte_index(self.cursor));
        self.value.drain(from..to);
        self.cursor = start;
        true
    }

    fn clear(&mut self) -> bool {
        let had_value = !self.value.is_empty();
        self.value.clear();
        self.cursor = 0;
        had_value
    }

    fn edited(&self, changed: bool) -> EventResult<TextFieldEvent> {
        if changed {
            self.changed().into()
        } else {
            EventResult::Consumed
        }
    }

    fn input_line(&self, theme: &Theme) -> Line<'static> {
        let input_style = Style::default().fg(theme.text);

        if self.value.is_empty()
            && let Some(placeholder) = &self.placeholder
            && !self.focused
        {
            return Line::from(Span::styled(
                placeholder.clone(),
                Style::default().fg(theme.subtle),
            ));
        }

        if !self.focused {
            return Line::from(Span::styled(self.value.clone(), input_style));
        }

        let cursor_style = Style::default()
            .fg(theme.background)
            .bg(theme.text)
            .add_modifier(Modifier::BOLD);
        let before: String = self.value.chars().take(self.cursor).collect();
        let at = self.value.chars().nth(self.cursor).unwrap_or(' ');
        let after: String = self.value.chars().skip(self.cursor + 1).collect();

        Line::from(vec![
            Span::styled(before, input_style),
            Span::styled(at.to_string(), cursor_style),
            Span::styled(after, input_style),
        ])
    }
}

impl Component for TextField {
    type Output = TextFieldEvent;

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<Self::Output>> {
        Ok(match (key.code, key.modifiers) {
            (KeyCode::Backspace, KeyModifiers::ALT) | (KeyCode::Char('w'), KeyModifiers::CONTROL) => {
                let changed = self.delete_word_before_cursor();
                self.edited(changed)
            }
            (KeyCode::Backspace, _) => {
                let changed = self.delete_char_before_cursor();
                self.edited(changed)
            }
            (KeyCode::Delete, _) => {
                let changed = self.delete_char_at_cursor();
                self.edited(changed)
            }
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                let changed = self.clear();
                self.edited(changed)
            }

            (KeyCode::Left, _) => {
                self.cursor = self.cursor.saturating_sub(1);
                EventResult::Consumed
            }
            (KeyCode::Right, _) => {
                self.cursor = (self.cursor + 1).min(self.len());
                EventResult::Consumed
            }
            (KeyCode::Home, _) | (KeyCode::Char('a'), KeyModifiers::CONTROL) => {
                self.cursor = 0;
                EventResult::Consumed
            }
            (KeyCode::End, _) | (KeyCode::Char('e'), KeyModifiers::CONTROL) => {
                self.cursor = self.len();
                EventResult::Consumed
            }

            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                self.insert_char(c);
                self.changed().into()
            }

            _ => EventResult::Ignored,
        })
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let [input_area, message_area] =
            Layout::vertical([Constraint::Length(3), Constraint::Length(1)]).areas(area);

        let (border_color, title_color) = if !self.error.is_empty() {
            (theme.error, theme.error)
        } else if self.focused {
            (theme.border_focused, theme.accent)
        } else {
            (theme.border, theme.muted)
        };

        let block = Block::default()
            .title(format!(" {} ", self.label))
            .title_style(Style::default().fg(title_color).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(border_color));

        frame.render_widget(Paragraph::new(self.input_line(theme)).block(block), input_area);

        let message = if self.error.is_empty() {
            Span::styled(self.hint.clone(), Style::default().fg(theme.muted))
        } else {
            Span::styled(self.error.clone(), Style::default().fg(theme.error))
        };
        frame.render_widget(Paragraph::new(Line::from(message)), message_area);
    }
}
