use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Cell;

use crate::Theme;
use crate::config::{GlobalAction, KeyResolver, SearchAction};
use crate::i18n::Translator;
use crate::message::AppMessage;
use crate::search::Matcher;
use crate::ui::{ColumnDef, Component, EventResult, Keybinding, Result, Screen, Table, TableRow};
use crate::winners::{LEADERBOARD_SIZE, Winner, top};

impl TableRow for Winner {
    fn columns() -> &'static [ColumnDef] {
        static COLUMNS: &[ColumnDef] = &[
            ColumnDef::new("winners.rank", Constraint::Length(4)),
            ColumnDef::new("winners.wallet", Constraint::Length(18)),
            ColumnDef::new("winners.points", Constraint::Length(8)),
            ColumnDef::new("winners.prize", Constraint::Min(20)),
        ];
        COLUMNS
    }

    fn render_cells(&self, theme: &Theme) -> Vec<Cell<'static>> {
        let rank_style = if self.rank <= 3 {
            Style::default().fg(theme.highlight).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.muted)
        };
        vec![
            Cell::from(self.rank.to_string()).style(rank_style),
            Cell::from(self.wallet.clone()),
            Cell::from(self.points.map_or_else(|| "-".to_string(), |p| p.to_string())),
            Cell::from(self.prize.clone().unwrap_or_default()),
        ]
    }

    fn matches(&self, matcher: &Matcher, query: &str) -> bool {
        matcher.matches_any([self.wallet.as_str(), self.prize.as_deref().unwrap_or_default()], query)
    }
}

/// Leaderboard of the top winners with a fuzzy filter.
pub struct WinnersScreen {
    table: Table<Winner>,
    translator: Arc<dyn Translator>,
    resolver: Arc<KeyResolver>,
}

impl WinnersScreen {
    pub fn new(winners: &[Winner], translator: Arc<dyn Translator>, resolver: Arc<KeyResolver>) -> Self {
        let title = format!(" {} ", translator.translate("winners.title"));
        let table = Table::new(top(winners, LEADERBOARD_SIZE).to_vec(), resolver.clone(), translator.as_ref())
            .with_title(title);
        Self {
            table,
            translator,
            resolver,
        }
    }
}

impl Screen for WinnersScreen {
    type Output = AppMessage;

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<Self::Output>> {
        // The table owns the keys while searching.
        if self.table.handle_key(key)?.is_consumed() {
            return Ok(EventResult::Consumed);
        }
        if self.resolver.matches_global(&key, GlobalAction::Back) {
            return Ok(AppMessage::ShowLanding.into());
        }
        Ok(EventResult::Ignored)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        self.table.render(frame, area, theme);
    }

    fn keybindings(&self) -> Vec<Keybinding> {
        let t = |key: &str| self.translator.translate(key);
        if self.table.is_searching() {
            return vec![Keybinding::new(
                self.resolver.display_search(SearchAction::Exit),
                t("keys.back"),
            )];
        }
        vec![
            Keybinding::new(self.resolver.display_search(SearchAction::Toggle), t("keys.search")),
            Keybinding::new(self.resolver.display_global(GlobalAction::Participate), t("keys.participate")),
            Keybinding::new(self.resolver.display_global(GlobalAction::Back), t("keys.back")),
            Keybinding::new(self.resolver.display_global(GlobalAction::Quit), t("keys.quit")),
        ]
    }
}
