//! UI building blocks for the promo screens.
//!
//! - [`Component`] - reusable, interactive widgets that know nothing about the giveaway
//! - [`Screen`] - full-page views that translate component events into app messages
//! - [`EventResult`] - outcome of handling a key

pub mod components;
pub mod widgets;

mod participate_dialog;
mod status_bar;
mod toast;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;

pub use color_eyre::Result;

use crate::Theme;

pub use components::{Checkbox, ColumnDef, Table, TableEvent, TableRow, TextField, TextFieldEvent};
pub use participate_dialog::{ParticipateDialog, ParticipateEvent};
pub use status_bar::StatusBar;
pub use toast::{Toast, ToastManager};
pub use widgets::Spinner;

/// Result of handling an input event.
///
/// - `Ignored` - the handler did not recognize the input
/// - `Consumed` - the input was handled, nothing for the parent to do
/// - `Event(E)` - the input was handled and produced an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult<E> {
    /// Input was not handled, parent should process it.
    Ignored,
    /// Input was consumed but produced no event.
    Consumed,
    /// Input was consumed and produced an event.
    Event(E),
}

impl<E> EventResult<E> {
    /// Returns true if the input was consumed (either with or without an event).
    pub const fn is_consumed(&self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

impl<E> From<E> for EventResult<E> {
    fn from(event: E) -> Self {
        Self::Event(event)
    }
}

/// Interactive UI building block.
///
/// Components handle key events and emit generic outputs, e.g. a
/// [`TextField`] reports its new value, a [`Table`] reports the selected row.
pub trait Component {
    /// The output type produced by this component.
    type Output;

    /// Handle a key event.
    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<Self::Output>> {
        _ = key;
        Ok(EventResult::Ignored)
    }

    /// Called on each tick for animations and time-based updates.
    fn handle_tick(&mut self) {}

    /// Render the component to the frame.
    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme);
}

/// Full-page view.
///
/// Screens connect component events to the app, e.g. the landing screen
/// turns a key press into "open the participate modal".
pub trait Screen {
    /// The message type produced by this screen.
    type Output;

    /// Handle a key event.
    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<Self::Output>>;

    /// Render the screen to the frame.
    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme);

    /// Called on each tick for animations and time-based updates.
    fn handle_tick(&mut self) {}

    /// Keys shown in the status bar while this screen is active.
    fn keybindings(&self) -> Vec<Keybinding> {
        vec![]
    }
}

/// A key and what it does, for the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keybinding {
    pub key: String,
    pub description: String,
}

impl Keybinding {
    pub fn new(key: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            description: description.into(),
        }
    }
}
