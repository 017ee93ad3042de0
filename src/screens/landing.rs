use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};

use crate::Theme;
use crate::config::{GlobalAction, KeyResolver};
use crate::i18n::Translator;
use crate::message::AppMessage;
use crate::prizes::{PRIZES, Prize};
use crate::ui::{EventResult, Keybinding, Result, Screen};

/// Hero text, prize tiers and the call to action.
pub struct LandingScreen {
    translator: Arc<dyn Translator>,
    resolver: Arc<KeyResolver>,
}

impl LandingScreen {
    pub fn new(translator: Arc<dyn Translator>, resolver: Arc<KeyResolver>) -> Self {
        Self {
            translator,
            resolver,
        }
    }

    fn prize_lines(&self, prize: &Prize, theme: &Theme) -> Vec<Line<'static>> {
        let mut lines = vec![Line::from(vec![
            Span::styled(
                format!("{:>5}  ", prize.place),
                Style::default().fg(theme.highlight).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                self.translator.translate(prize.title),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            ),
        ])];
        if let Some(description) = prize.description {
            lines.push(Line::from(Span::styled(
                format!("       {}", self.translator.translate(description)),
                Style::default().fg(theme.muted),
            )));
        }
        lines
    }
}

impl Screen for LandingScreen {
    type Output = AppMessage;

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<Self::Output>> {
        if key.code == KeyCode::Enter {
            return Ok(AppMessage::OpenParticipate.into());
        }
        if self.resolver.matches_global(&key, GlobalAction::Winners) {
            return Ok(AppMessage::ShowWinners.into());
        }
        Ok(EventResult::Ignored)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let t = |key: &str| self.translator.translate(key);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.border))
            .padding(Padding::new(2, 2, 1, 1));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let prize_height = PRIZES
            .iter()
            .map(|p| 1 + u16::from(p.description.is_some()))
            .sum::<u16>()
            + 2;
        let [hero_area, prizes_area, cta_area] = Layout::vertical([
            Constraint::Length(4),
            Constraint::Length(prize_height),
            Constraint::Length(1),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(inner);

        let hero = Paragraph::new(vec![
            Line::from(Span::styled(
                t("landing.title"),
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            Line::from(Span::styled(t("landing.subtitle"), Style::default().fg(theme.text))),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
        frame.render_widget(hero, hero_area);

        let prizes_block = Block::default()
            .title(format!(" {} ", t("landing.prizes")))
            .title_style(Style::default().fg(theme.header).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.border))
            .style(Style::default().bg(theme.surface));
        let lines: Vec<Line> = PRIZES.iter().flat_map(|p| self.prize_lines(p, theme)).collect();
        let [prizes_area] = Layout::horizontal([Constraint::Max(64)])
            .flex(Flex::Center)
            .areas(prizes_area);
        frame.render_widget(Paragraph::new(lines).block(prizes_block), prizes_area);

        let key_style = Style::default().fg(theme.highlight).add_modifier(Modifier::BOLD);
        let cta = Line::from(vec![
            Span::styled("[Enter] ", key_style),
            Span::styled(t("landing.participate"), Style::default().fg(theme.accent)),
            Span::raw("    "),
            Span::styled(format!("[{}] ", self.resolver.display_global(GlobalAction::Winners)), key_style),
            Span::styled(t("landing.winners"), Style::default().fg(theme.text)),
        ]);
        frame.render_widget(Paragraph::new(cta).alignment(Alignment::Center), cta_area);
    }

    fn keybindings(&self) -> Vec<Keybinding> {
        let t = |key: &str| self.translator.translate(key);
        vec![
            Keybinding::new(self.resolver.display_global(GlobalAction::Participate), t("keys.participate")),
            Keybinding::new(self.resolver.display_global(GlobalAction::Winners), t("keys.winners")),
            Keybinding::new(self.resolver.display_global(GlobalAction::Quit), t("keys.quit")),
        ]
    }
}
