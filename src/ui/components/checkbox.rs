use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::Theme;
use crate::ui::Component;

/// A labelled consent box. Toggling is left to the owner.
pub struct Checkbox {
    label: String,
    checked: bool,
    focused: bool,
    error: String,
}

impl Checkbox {
    pub const HEIGHT: u16 = 2;

    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            checked: false,
            focused: false,
            error: String::new(),
        }
    }

    pub const fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }

    pub const fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error = error.into();
    }
}

impl Component for Checkbox {
    type Output = ();

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let [box_area, message_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(area);

        let mark = if self.checked { "[x]" } else { "[ ]" };
        let mark_color = if self.checked { theme.success } else { theme.muted };
        let mut label_style = Style::default().fg(theme.text);
        if self.focused {
            label_style = label_style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        }

        let line = Line::from(vec![
            Span::styled(mark, Style::default().fg(mark_color).add_modifier(Modifier::BOLD)),
            Span::raw(" "),
            Span::styled(self.label.clone(), label_style),
        ]);
        frame.render_widget(Paragraph::new(line), box_area);

        if !self.error.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled(self.error.clone(), Style::default().fg(theme.error))),
                message_area,
            );
        }
    }
}
