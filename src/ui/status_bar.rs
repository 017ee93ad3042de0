use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::Theme;
use crate::i18n::Locale;
use crate::ui::Keybinding;

const BRAND: &str = " ✦ Asterium ";

/// Bottom bar: brand and locale on the left, active keys on the right.
pub struct StatusBar {
    locale: Locale,
}

impl StatusBar {
    pub const HEIGHT: u16 = 3;

    pub const fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme, keybindings: &[Keybinding]) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.border));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [brand_area, keys_area] =
            Layout::horizontal([Constraint::Length(20), Constraint::Fill(1)]).areas(inner);

        let brand = Line::from(vec![
            Span::styled(BRAND, Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)),
            Span::styled(
                format!("[{}]", self.locale.code()),
                Style::default().fg(theme.muted),
            ),
        ]);
        frame.render_widget(Paragraph::new(brand), brand_area);

        frame.render_widget(Paragraph::new(keys_line(keybindings, theme)), keys_area);
    }
}

fn keys_line(keybindings: &[Keybinding], theme: &Theme) -> Line<'static> {
    let key_style = Style::default().fg(theme.highlight).add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(theme.muted);

    let mut spans = Vec::with_capacity(keybindings.len() * 3);
    for (i, binding) in keybindings.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ·  ", Style::default().fg(theme.border)));
        }
        spans.push(Span::styled(binding.key.clone(), key_style));
        spans.push(Span::styled(format!(" {}", binding.description), desc_style));
    }
    Line::from(spans)
}
