use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table as RatatuiTable, TableState};

use crate::Theme;
use crate::config::{KeyResolver, NavAction, SearchAction};
use crate::i18n::Translator;
use crate::search::Matcher;
use crate::ui::{Component, EventResult, Result};

const PAGE_STEP: usize = 10;

pub enum TableEvent<T> {
    /// The highlighted row changed.
    Changed(T),
}

/// Column definition. The header is a translation key.
pub struct ColumnDef {
    pub header: &'static str,
    pub constraint: Constraint,
}

impl ColumnDef {
    pub const fn new(header: &'static str, constraint: Constraint) -> Self {
        Self { header, constraint }
    }
}

pub trait TableRow {
    fn columns() -> &'static [ColumnDef];

    fn render_cells(&self, theme: &Theme) -> Vec<Cell<'static>>;

    /// Whether the row survives the search filter.
    fn matches(&self, matcher: &Matcher, query: &str) -> bool;
}

/// Selectable table with an inline fuzzy search.
pub struct Table<T: TableRow + Clone> {
    items: Vec<T>,
    /// Indices into `items` that pass the current query.
    visible: Vec<usize>,
    state: TableState,
    headers: Vec<String>,
    title: Option<String>,
    search_label: String,
    query: String,
    searching: bool,
    matcher: Matcher,
    resolver: Arc<KeyResolver>,
}

impl<T: TableRow + Clone> Table<T> {
    pub fn new(items: Vec<T>, resolver: Arc<KeyResolver>, translator: &dyn Translator) -> Self {
        let headers = T::columns()
            .iter()
            .map(|column| translator.translate(column.header))
            .collect();
        let mut table = Self {
            visible: (0..items.len()).collect(),
            items,
            state: TableState::default(),
            headers,
            title: None,
            search_label: translator.translate("winners.search"),
            query: String::new(),
            searching: false,
            matcher: Matcher::new(),
            resolver,
        };
        table.reset_selection();
        table
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn selected(&self) -> Option<&T> {
        self.state
            .selected()
            .and_then(|i| self.visible.get(i))
            .map(|&index| &self.items[index])
    }

    #[allow(dead_code)]
    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    pub const fn is_searching(&self) -> bool {
        self.searching
    }

    fn apply_filter(&mut self) {
        let query = self.query.trim();
        self.visible = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| query.is_empty() || item.matches(&self.matcher, query))
            .map(|(index, _)| index)
            .collect();
        self.reset_selection();
    }

    fn reset_selection(&mut self) {
        self.state
            .select(if self.visible.is_empty() { None } else { Some(0) });
    }

    fn select(&mut self, index: usize) {
        if !self.visible.is_empty() {
            self.state.select(Some(index.min(self.visible.len() - 1)));
        }
    }

    fn change_event(&self, before: Option<usize>) -> EventResult<TableEvent<T>> {
        if self.state.selected() != before
            && let Some(item) = self.selected()
        {
            return TableEvent::Changed(item.clone()).into();
        }
        EventResult::Consumed
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> EventResult<TableEvent<T>> {
        if self.resolver.matches_search(&key, SearchAction::Exit) {
            self.searching = false;
            self.query.clear();
            self.apply_filter();
            return EventResult::Consumed;
        }
        match (key.code, key.modifiers) {
            (KeyCode::Enter, _) => self.searching = false,
            (KeyCode::Backspace, _) => {
                self.query.pop();
                self.apply_filter();
            }
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                self.query.push(c);
                self.apply_filter();
            }
            _ => {}
        }
        EventResult::Consumed
    }
}

impl<T: TableRow + Clone> Component for Table<T> {
    type Output = TableEvent<T>;

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<Self::Output>> {
        if self.searching {
            return Ok(self.handle_search_key(key));
        }
        if self.resolver.matches_search(&key, SearchAction::Toggle) {
            self.searching = true;
            return Ok(EventResult::Consumed);
        }

        let before = self.state.selected();
        let current = before.unwrap_or(0);
        let last = self.visible.len().saturating_sub(1);

        let target = if self.resolver.matches_nav(&key, NavAction::Down) {
            current + 1
        } else if self.resolver.matches_nav(&key, NavAction::Up) {
            current.saturating_sub(1)
        } else if self.resolver.matches_nav(&key, NavAction::PageDown) {
            current + PAGE_STEP
        } else if self.resolver.matches_nav(&key, NavAction::PageUp) {
            current.saturating_sub(PAGE_STEP)
        } else if self.resolver.matches_nav(&key, NavAction::Home) {
            0
        } else if self.resolver.matches_nav(&key, NavAction::End) {
            last
        } else {
            return Ok(EventResult::Ignored);
        };

        self.select(target);
        Ok(self.change_event(before))
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let show_search = self.searching || !self.query.is_empty();
        let [table_area, search_area] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(u16::from(show_search)),
        ])
        .areas(area);

        let header = Row::new(self.headers.iter().map(|h| {
            Cell::from(h.clone()).style(Style::default().fg(theme.header).add_modifier(Modifier::BOLD))
        }))
        .style(Style::default().bg(theme.surface));

        let rows: Vec<Row> = self
            .visible
            .iter()
            .map(|&index| {
                Row::new(self.items[index].render_cells(theme)).style(Style::default().fg(theme.text))
            })
            .collect();

        let widths = T::columns().iter().map(|c| c.constraint);

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.border));
        if let Some(title) = &self.title {
            block = block
                .title(title.as_str())
                .title_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD));
        }

        let table = RatatuiTable::new(rows, widths)
            .header(header)
            .block(block)
            .row_highlight_style(
                Style::default()
                    .bg(theme.selection_bg)
                    .fg(theme.border_focused)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        frame.render_stateful_widget(table, table_area, &mut self.state);

        if show_search {
            let cursor = if self.searching { "█" } else { "" };
            let line = Line::from(vec![
                Span::styled(format!(" {}: ", self.search_label), Style::default().fg(theme.highlight)),
                Span::styled(format!("{}{cursor}", self.query), Style::default().fg(theme.text)),
            ]);
            frame.render_widget(Paragraph::new(line), search_area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Fruit(&'static str);

    impl TableRow for Fruit {
        fn columns() -> &'static [ColumnDef] {
            static COLUMNS: &[ColumnDef] = &[ColumnDef::new("fruit.name", Constraint::Min(10))];
            COLUMNS
        }

        fn render_cells(&self, _theme: &Theme) -> Vec<Cell<'static>> {
            vec![Cell::from(self.0)]
        }

        fn matches(&self, matcher: &Matcher, query: &str) -> bool {
            matcher.matches(self.0, query)
        }
    }

    struct Keys;

    impl Translator for Keys {
        fn translate(&self, key: &str) -> String {
            key.to_string()
        }
    }

    fn table() -> Table<Fruit> {
        Table::new(
            vec![Fruit("apple"), Fruit("banana"), Fruit("cherry")],
            Arc::new(KeyResolver::default()),
            &Keys,
        )
    }

    fn press(table: &mut Table<Fruit>, code: KeyCode) -> EventResult<TableEvent<Fruit>> {
        table.handle_key(KeyEvent::new(code, KeyModifiers::NONE)).unwrap()
    }

    #[test]
    fn test_navigation_is_clamped() {
        let mut table = table();
        assert_eq!(table.selected(), Some(&Fruit("apple")));

        assert!(matches!(
            press(&mut table, KeyCode::Down),
            EventResult::Event(TableEvent::Changed(Fruit("banana")))
        ));
        press(&mut table, KeyCode::End);
        assert_eq!(table.selected(), Some(&Fruit("cherry")));
        assert!(matches!(press(&mut table, KeyCode::Down), EventResult::Consumed));
        press(&mut table, KeyCode::PageUp);
        assert_eq!(table.selected(), Some(&Fruit("apple")));
        assert!(matches!(press(&mut table, KeyCode::Enter), EventResult::Ignored));
    }

    #[test]
    fn test_search_filters_rows() {
        let mut table = table();
        press(&mut table, KeyCode::Char('/'));
        assert!(table.is_searching());

        press(&mut table, KeyCode::Char('c'));
        press(&mut table, KeyCode::Char('h'));
        assert_eq!(table.visible_len(), 1);
        assert_eq!(table.selected(), Some(&Fruit("cherry")));

        press(&mut table, KeyCode::Enter);
        assert!(!table.is_searching());
        assert_eq!(table.visible_len(), 1);

        press(&mut table, KeyCode::Char('/'));
        press(&mut table, KeyCode::Esc);
        assert_eq!(table.visible_len(), 3);
    }
}
