//! Modal form for entering the giveaway.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::Theme;
use crate::config::{DialogAction, FormAction, KeyResolver};
use crate::i18n::Translator;
use crate::participate::{FormField, ModalPhase, ParticipateController};
use crate::ui::{
    Checkbox, Component, EventResult, Keybinding, Result, Spinner, TextField, TextFieldEvent,
};

pub enum ParticipateEvent {
    /// The user asked to submit. The app runs the submission.
    Submit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Field(FormField),
    SubmitButton,
}

const FOCUS_ORDER: [Focus; 5] = [
    Focus::Field(FormField::Name),
    Focus::Field(FormField::Email),
    Focus::Field(FormField::Phone),
    Focus::Field(FormField::Agree),
    Focus::SubmitButton,
];

const DIALOG_HEIGHT: u16 = 3 * TextField::HEIGHT + Checkbox::HEIGHT + 2 + 4;

/// Renders a [`ParticipateController`] and turns keys into form edits.
///
/// The controller stays the single owner of the form values. The inputs are
/// re-synced from it before every key, paste and frame.
pub struct ParticipateDialog {
    controller: ParticipateController,
    translator: Arc<dyn Translator>,
    resolver: Arc<KeyResolver>,
    name: TextField,
    email: TextField,
    phone: TextField,
    agree: Checkbox,
    spinner: Spinner,
    focus: Option<Focus>,
    /// Input that receives focus when the modal opens, if any.
    first_input: Option<FormField>,
}

impl ParticipateDialog {
    pub fn new(
        controller: ParticipateController,
        translator: Arc<dyn Translator>,
        resolver: Arc<KeyResolver>,
    ) -> Self {
        let t = |key: &str| translator.translate(key);
        let name = TextField::new(t("participate.name"));
        let email = TextField::new(t("participate.email")).with_placeholder("name@example.com");
        let phone = TextField::new(t("participate.phone")).with_placeholder("+998 90 123 45 67");
        let agree = Checkbox::new(t("participate.agree"));
        let spinner = Spinner::new().with_label(t("participate.submitting"));

        Self {
            controller,
            translator,
            resolver,
            name,
            email,
            phone,
            agree,
            spinner,
            focus: None,
            first_input: Some(FormField::Name),
        }
    }

    #[allow(dead_code)]
    #[must_use]
    pub const fn with_first_input(mut self, field: Option<FormField>) -> Self {
        self.first_input = field;
        self
    }

    pub const fn controller(&self) -> &ParticipateController {
        &self.controller
    }

    /// Text pasted into the focused input.
    pub fn handle_paste(&mut self, text: &str) {
        self.sync_from_controller();
        let Some(Focus::Field(field)) = self.focus else {
            return;
        };
        if let Some(input) = self.text_field_mut(field) {
            let TextFieldEvent::Changed(value) = input.insert_str(text);
            self.store(field, value);
        }
    }

    pub fn keybindings(&self) -> Vec<Keybinding> {
        let t = |key: &str| self.translator.translate(key);
        vec![
            Keybinding::new(self.resolver.display_form(FormAction::NextField), t("keys.next_field")),
            Keybinding::new(self.resolver.display_form(FormAction::PrevField), t("keys.prev_field")),
            Keybinding::new(self.resolver.display_form(FormAction::Toggle), t("keys.toggle")),
            Keybinding::new(self.resolver.display_form(FormAction::Submit), t("keys.submit")),
            Keybinding::new(self.resolver.display_form(FormAction::Clear), t("keys.clear")),
            Keybinding::new(self.resolver.display_dialog(DialogAction::Cancel), t("keys.cancel")),
        ]
    }

    fn text_field_mut(&mut self, field: FormField) -> Option<&mut TextField> {
        match field {
            FormField::Name => Some(&mut self.name),
            FormField::Email => Some(&mut self.email),
            FormField::Phone => Some(&mut self.phone),
            FormField::Agree => None,
        }
    }

    fn store(&self, field: FormField, value: String) {
        match field {
            FormField::Name => self.controller.set_name(value),
            FormField::Email => self.controller.set_email(value),
            FormField::Phone => self.controller.set_phone(value),
            FormField::Agree => {}
        }
    }

    /// Moves focus, marking the field being left as touched.
    fn set_focus(&mut self, focus: Option<Focus>) {
        if let Some(Focus::Field(previous)) = self.focus
            && self.focus != focus
        {
            self.controller.mark_touched(previous);
        }
        self.focus = focus;

        let is = |field| focus == Some(Focus::Field(field));
        self.name.set_focused(is(FormField::Name));
        self.email.set_focused(is(FormField::Email));
        self.phone.set_focused(is(FormField::Phone));
        self.agree.set_focused(is(FormField::Agree));
    }

    fn move_focus(&mut self, forward: bool) {
        let len = FOCUS_ORDER.len();
        let next = match self.focus.and_then(|f| FOCUS_ORDER.iter().position(|o| *o == f)) {
            Some(i) if forward => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
            None if forward => 0,
            None => len - 1,
        };
        self.set_focus(Some(FOCUS_ORDER[next]));
    }

    /// Pulls the current state out of the controller.
    ///
    /// The form may have been reset or the modal reopened since the last
    /// call, so stale input values must never be written back.
    fn sync_from_controller(&mut self) {
        if self.controller.take_focus_request()
            && let Some(field) = self.first_input
        {
            self.focus = None;
            self.set_focus(Some(Focus::Field(field)));
        }

        let form = self.controller.form();
        let translator = self.translator.as_ref();

        self.name.sync(&form.name);
        self.email.sync(&form.email);
        self.phone.sync(&form.phone);
        self.agree.set_checked(form.agree);

        self.name.set_error(self.controller.error_text(FormField::Name, translator));
        self.email.set_error(self.controller.error_text(FormField::Email, translator));
        self.phone.set_error(self.controller.error_text(FormField::Phone, translator));
        self.agree.set_error(self.controller.error_text(FormField::Agree, translator));

        let hint = if form.phone.is_empty() {
            String::new()
        } else if self.controller.is_uzbek() {
            translator.translate("participate.hint_uz")
        } else {
            translator.translate("participate.hint_intl")
        };
        self.phone.set_hint(hint);
    }

    fn render_button(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        if self.controller.phase() == ModalPhase::OpenSubmitting {
            self.spinner.render(frame, area, theme);
            return;
        }

        let color = if self.controller.can_submit() {
            theme.accent
        } else {
            theme.muted
        };
        let mut style = Style::default().fg(color).add_modifier(Modifier::BOLD);
        if self.focus == Some(Focus::SubmitButton) {
            style = style.fg(theme.background).bg(color);
        }

        let label = format!("[ {} ]", self.translator.translate("participate.submit"));
        let button = Paragraph::new(Line::from(Span::styled(label, style))).alignment(Alignment::Center);
        frame.render_widget(button, area);
    }
}

impl Component for ParticipateDialog {
    type Output = ParticipateEvent;

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<Self::Output>> {
        self.sync_from_controller();

        if self.resolver.matches_form(&key, FormAction::Submit) {
            return Ok(ParticipateEvent::Submit.into());
        }
        if self.resolver.matches_form(&key, FormAction::Clear) {
            self.controller.reset_form();
            self.sync_from_controller();
            return Ok(EventResult::Consumed);
        }
        if self.resolver.matches_form(&key, FormAction::NextField) {
            self.move_focus(true);
            return Ok(EventResult::Consumed);
        }
        if self.resolver.matches_form(&key, FormAction::PrevField) {
            self.move_focus(false);
            return Ok(EventResult::Consumed);
        }

        let activated =
            key.code == KeyCode::Enter || self.resolver.matches_form(&key, FormAction::Toggle);

        match self.focus {
            Some(Focus::SubmitButton) if activated => return Ok(ParticipateEvent::Submit.into()),
            Some(Focus::Field(FormField::Agree)) if activated => self.controller.toggle_agree(),
            Some(Focus::Field(_)) if key.code == KeyCode::Enter => self.move_focus(true),
            Some(Focus::Field(field)) => {
                if let Some(input) = self.text_field_mut(field)
                    && let EventResult::Event(TextFieldEvent::Changed(value)) = input.handle_key(key)?
                {
                    self.store(field, value);
                }
            }
            _ => {}
        }

        // The modal swallows everything else.
        Ok(EventResult::Consumed)
    }

    fn handle_tick(&mut self) {
        if self.controller.is_submitting() {
            self.spinner.handle_tick();
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        self.sync_from_controller();

        let popup_area = area.centered(Constraint::Percentage(60), Constraint::Length(DIALOG_HEIGHT));
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(format!(" {} ", self.translator.translate("participate.title")))
            .title_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.border_focused))
            .padding(Padding::new(2, 2, 1, 0))
            .style(Style::default().bg(theme.background));
        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let [name_area, email_area, phone_area, agree_area, _, button_area] = Layout::vertical([
            Constraint::Length(TextField::HEIGHT),
            Constraint::Length(TextField::HEIGHT),
            Constraint::Length(TextField::HEIGHT),
            Constraint::Length(Checkbox::HEIGHT),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        self.name.render(frame, name_area, theme);
        self.email.render(frame, email_area, theme);
        self.phone.render(frame, phone_area, theme);
        self.agree.render(frame, agree_area, theme);
        self.render_button(frame, button_area, theme);
    }
}
