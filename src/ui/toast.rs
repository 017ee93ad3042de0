use std::collections::VecDeque;
use std::time::{Duration, Instant};

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use super::Component;
use crate::Theme;

const TOAST_DURATION: Duration = Duration::from_secs(4);
const MAX_VISIBLE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastType {
    Success,
    Error,
}

pub struct Toast {
    message: String,
    toast_type: ToastType,
    created_at: Instant,
}

impl Toast {
    pub fn new(message: impl Into<String>, toast_type: ToastType) -> Self {
        Self {
            message: message.into(),
            toast_type,
            created_at: Instant::now(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, ToastType::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, ToastType::Error)
    }

    fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= TOAST_DURATION
    }
}

/// Short-lived notifications stacked in the bottom-right corner.
#[derive(Default)]
pub struct ToastManager {
    toasts: VecDeque<Toast>,
}

impl ToastManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, toast: Toast) {
        self.toasts.push_back(toast);
        while self.toasts.len() > MAX_VISIBLE {
            self.toasts.pop_front();
        }
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

impl Component for ToastManager {
    type Output = ();

    fn handle_tick(&mut self) {
        self.toasts.retain(|t| !t.is_expired());
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let height = 3u16;
        let width = 48u16.min(area.width.saturating_sub(4));

        // Newest at the bottom.
        for (i, toast) in self.toasts.iter().rev().enumerate() {
            let offset = u16::try_from(i).unwrap_or(u16::MAX).saturating_mul(height + 1);
            let Some(y) = area
                .bottom()
                .checked_sub(height + 1)
                .and_then(|y| y.checked_sub(offset))
                .filter(|y| *y >= area.y)
            else {
                break;
            };
            let x = area.right().saturating_sub(width + 2);
            let toast_area = Rect::new(x, y, width, height);

            let (border_color, icon) = match toast.toast_type {
                ToastType::Success => (theme.success, "✓"),
                ToastType::Error => (theme.error, "✗"),
            };

            frame.render_widget(Clear, toast_area);
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(Style::default().fg(border_color))
                .style(Style::default().bg(theme.surface));

            let paragraph = Paragraph::new(format!("{icon} {}", toast.message))
                .block(block)
                .style(Style::default().fg(theme.text).add_modifier(Modifier::BOLD))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
            frame.render_widget(paragraph, toast_area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_latest_toasts() {
        let mut manager = ToastManager::new();
        for i in 0..5 {
            manager.show(Toast::success(format!("toast {i}")));
        }
        assert_eq!(manager.len(), MAX_VISIBLE);
        assert_eq!(manager.toasts.front().map(|t| t.message.as_str()), Some("toast 2"));

        manager.handle_tick();
        assert_eq!(manager.len(), MAX_VISIBLE);
    }
}
