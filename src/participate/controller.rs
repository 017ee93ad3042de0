use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crossterm::event::KeyEvent;
use tracing::{debug, info, warn};

use super::{FieldErrors, FormData, FormField, SubmitHandler, TouchedFlags};
use crate::config::key::KeyBinding;
use crate::i18n::Translator;
use crate::keyboard::{KeyListeners, ListenerHandle};

/// Construction options of a [`ParticipateController`].
#[derive(Clone)]
pub struct ParticipateOptions {
    /// Clear the form after a submission completes.
    pub reset_on_submit: bool,
    pub on_submit: Option<Arc<dyn SubmitHandler>>,
}

impl Default for ParticipateOptions {
    fn default() -> Self {
        Self {
            reset_on_submit: true,
            on_submit: None,
        }
    }
}

impl ParticipateOptions {
    #[must_use]
    pub const fn reset_on_submit(mut self, reset: bool) -> Self {
        self.reset_on_submit = reset;
        self
    }

    #[must_use]
    pub fn with_handler(mut self, handler: Arc<dyn SubmitHandler>) -> Self {
        self.on_submit = Some(handler);
        self
    }
}

/// What a call to [`ParticipateController::submit`] ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The form did not validate. All errors are now visible.
    Invalid,
    /// Another submission is still waiting for the handler.
    Busy,
    /// The handler completed successfully.
    Submitted,
    /// The handler returned an error. The modal was closed regardless.
    HandlerFailed,
}

/// Lifecycle of the modal as seen by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalPhase {
    Closed,
    OpenIdle,
    OpenSubmitting,
}

#[derive(Debug, Default)]
struct FormState {
    form: FormData,
    touched: TouchedFlags,
    open: bool,
    submitting: bool,
    focus_requested: bool,
}

impl FormState {
    fn reset(&mut self) {
        self.form = FormData::default();
        self.touched = TouchedFlags::default();
    }

    fn set_open(&mut self, open: bool) {
        if open && !self.open {
            self.focus_requested = true;
        }
        self.open = open;
    }
}

/// State and lifecycle of one participate modal.
///
/// Clones share the same state, which lets a submission run on its own task
/// while the UI keeps editing and rendering. The lock is never held across
/// an await point.
#[derive(Clone)]
pub struct ParticipateController {
    state: Arc<Mutex<FormState>>,
    options: Arc<ParticipateOptions>,
}

impl ParticipateController {
    pub fn new(options: ParticipateOptions) -> Self {
        Self {
            state: Arc::new(Mutex::new(FormState::default())),
            options: Arc::new(options),
        }
    }

    fn state(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers the cancel-key listener for as long as the returned guard lives.
    pub fn mount(&self, listeners: &KeyListeners, cancel: KeyBinding) -> Mounted {
        let controller = self.clone();
        let handle = listeners.register(move |key: &KeyEvent| {
            if cancel.matches(key) && controller.is_open() {
                controller.close_modal();
                return true;
            }
            false
        });
        debug!("Participate modal mounted");
        Mounted { _listener: handle }
    }

    // Form data

    pub fn form(&self) -> FormData {
        self.state().form.clone()
    }

    /// Applies an edit to the form data.
    pub fn update(&self, edit: impl FnOnce(&mut FormData)) {
        edit(&mut self.state().form);
    }

    pub fn set_name(&self, name: impl Into<String>) {
        self.state().form.name = name.into();
    }

    pub fn set_email(&self, email: impl Into<String>) {
        self.state().form.email = email.into();
    }

    pub fn set_phone(&self, phone: impl Into<String>) {
        self.state().form.phone = phone.into();
    }

    #[allow(dead_code)]
    pub fn set_agree(&self, agree: bool) {
        self.state().form.agree = agree;
    }

    pub fn toggle_agree(&self) {
        let mut state = self.state();
        state.form.agree = !state.form.agree;
    }

    /// Marks a field as visited so its error becomes visible.
    pub fn mark_touched(&self, field: FormField) {
        self.state().touched.set(field);
    }

    pub fn touched(&self) -> TouchedFlags {
        self.state().touched
    }

    pub fn reset_form(&self) {
        self.state().reset();
    }

    // Validation

    pub fn errors(&self) -> FieldErrors {
        let state = self.state();
        state.form.errors(state.touched)
    }

    pub fn error_text(&self, field: FormField, translator: &dyn Translator) -> String {
        self.errors().text(field, translator)
    }

    /// Whether every field validates. Touched flags play no part here.
    pub fn can_submit(&self) -> bool {
        self.state().form.is_valid()
    }

    pub fn is_uzbek(&self) -> bool {
        super::is_uzbek(&self.state().form.phone)
    }

    #[allow(dead_code)]
    pub fn clean_phone(&self) -> String {
        super::clean_phone(&self.state().form.phone)
    }

    // Modal

    pub fn set_open(&self, open: bool) {
        self.state().set_open(open);
    }

    pub fn open_modal(&self) {
        self.set_open(true);
    }

    pub fn close_modal(&self) {
        self.set_open(false);
    }

    pub fn is_open(&self) -> bool {
        self.state().open
    }

    pub fn is_submitting(&self) -> bool {
        self.state().submitting
    }

    pub fn phase(&self) -> ModalPhase {
        let state = self.state();
        match (state.open, state.submitting) {
            (false, _) => ModalPhase::Closed,
            (true, false) => ModalPhase::OpenIdle,
            (true, true) => ModalPhase::OpenSubmitting,
        }
    }

    /// Consumes the focus request raised by opening the modal.
    ///
    /// The dialog takes it on its next key, paste or frame, once the inputs
    /// exist.
    pub fn take_focus_request(&self) -> bool {
        std::mem::take(&mut self.state().focus_requested)
    }

    /// Validates and hands a copy of the form to the submit handler.
    ///
    /// Touches every field first, so a rejected submission leaves all
    /// outstanding errors visible. Nothing else happens when the form is
    /// invalid or a submission is already running. Once the handler
    /// completes, successfully or not, the modal closes and the form is reset
    /// when configured. The submitting flag is cleared on every exit path,
    /// including when this future is dropped early.
    pub async fn submit(&self) -> SubmitOutcome {
        let snapshot = {
            let mut state = self.state();
            state.touched = TouchedFlags::all();
            if !state.form.is_valid() {
                debug!("Submission blocked by validation errors");
                return SubmitOutcome::Invalid;
            }
            if state.submitting {
                debug!("Submission already in flight");
                return SubmitOutcome::Busy;
            }
            state.submitting = true;
            state.form.clone()
        };
        let _guard = SubmittingGuard(&self.state);

        let result = match &self.options.on_submit {
            Some(handler) => handler.submit(snapshot).await,
            None => Ok(()),
        };

        {
            let mut state = self.state();
            state.set_open(false);
            if self.options.reset_on_submit {
                state.reset();
            }
        }

        match result {
            Ok(()) => {
                info!("Participation submitted");
                SubmitOutcome::Submitted
            }
            Err(error) => {
                warn!(%error, "Submit handler failed");
                SubmitOutcome::HandlerFailed
            }
        }
    }
}

struct SubmittingGuard<'a>(&'a Mutex<FormState>);

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).submitting = false;
    }
}

/// Keeps the modal's key listener registered. Dropping it unmounts.
pub struct Mounted {
    _listener: ListenerHandle,
}

impl Drop for Mounted {
    fn drop(&mut self) {
        debug!("Participate modal unmounted");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use color_eyre::eyre::eyre;
    use crossterm::event::{KeyCode, KeyModifiers};
    use tokio::sync::Notify;

    use super::*;
    use crate::config::key::Key;

    /// Counts calls and blocks until released.
    #[derive(Default)]
    struct GatedHandler {
        calls: AtomicUsize,
        received: Mutex<Option<FormData>>,
        gate: Notify,
    }

    #[async_trait]
    impl SubmitHandler for GatedHandler {
        async fn submit(&self, form: FormData) -> color_eyre::Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.received.lock().unwrap() = Some(form);
            self.gate.notified().await;
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingHandler {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl SubmitHandler for RecordingHandler {
        async fn submit(&self, _form: FormData) -> color_eyre::Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct FailingHandler;

    #[async_trait]
    impl SubmitHandler for FailingHandler {
        async fn submit(&self, _form: FormData) -> color_eyre::Result<()> {
            Err(eyre!("network unreachable"))
        }
    }

    fn fill_valid(controller: &ParticipateController) {
        controller.set_name("Aziz");
        controller.set_email("aziz@example.uz");
        controller.set_phone("+998 90 123 45 67");
        controller.set_agree(true);
    }

    async fn wait_for_call(handler: &GatedHandler) {
        while handler.calls.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }
    }

    #[test]
    fn test_mark_touched_is_idempotent() {
        let controller = ParticipateController::new(ParticipateOptions::default());
        controller.mark_touched(FormField::Email);
        controller.mark_touched(FormField::Email);

        let touched = controller.touched();
        assert!(touched.email);
        assert!(!touched.name && !touched.phone && !touched.agree);
        assert_eq!(controller.errors().code(FormField::Email), "invalid_email");
        assert_eq!(controller.errors().code(FormField::Name), "");
    }

    #[test]
    fn test_can_submit_ignores_touched() {
        let controller = ParticipateController::new(ParticipateOptions::default());
        assert!(!controller.can_submit());

        fill_valid(&controller);
        assert_eq!(controller.touched(), TouchedFlags::default());
        assert!(controller.can_submit());
    }

    #[test]
    fn test_reset_keeps_modal_open() {
        let controller = ParticipateController::new(ParticipateOptions::default());
        controller.open_modal();
        fill_valid(&controller);
        controller.mark_touched(FormField::Name);

        controller.reset_form();
        assert_eq!(controller.form(), FormData::default());
        assert_eq!(controller.touched(), TouchedFlags::default());
        assert!(controller.is_open());
    }

    #[test]
    fn test_open_requests_focus_once() {
        let controller = ParticipateController::new(ParticipateOptions::default());
        assert!(!controller.take_focus_request());

        controller.open_modal();
        assert_eq!(controller.phase(), ModalPhase::OpenIdle);
        assert!(controller.take_focus_request());
        assert!(!controller.take_focus_request());

        // Already open, no new request.
        controller.set_open(true);
        assert!(!controller.take_focus_request());

        controller.close_modal();
        controller.open_modal();
        assert!(controller.take_focus_request());
    }

    #[test]
    fn test_phone_helpers() {
        let controller = ParticipateController::new(ParticipateOptions::default());
        controller.set_phone("+998 (90) 123");
        assert!(controller.is_uzbek());
        assert_eq!(controller.clean_phone(), "+99890123");

        controller.update(|form| form.phone = "+1 415".to_string());
        assert!(!controller.is_uzbek());
    }

    #[test]
    fn test_error_text_only_for_touched_fields() {
        struct Keys;

        impl Translator for Keys {
            fn translate(&self, key: &str) -> String {
                key.to_string()
            }
        }

        let controller = ParticipateController::new(ParticipateOptions::default());
        controller.set_phone("+998 90");
        assert_eq!(controller.error_text(FormField::Phone, &Keys), "");

        controller.mark_touched(FormField::Phone);
        assert_eq!(
            controller.error_text(FormField::Phone, &Keys),
            "participate.errors.invalid_phone_uz"
        );
        assert_eq!(controller.error_text(FormField::Name, &Keys), "");
    }

    #[test]
    fn test_cancel_key_listener_released_on_unmount() {
        let listeners = KeyListeners::new();
        let controller = ParticipateController::new(ParticipateOptions::default());
        let escape = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        let cancel = KeyBinding::single(Key::new(KeyCode::Esc));

        let mounted = controller.mount(&listeners, cancel);
        controller.open_modal();
        assert!(listeners.dispatch(&escape));
        assert!(!controller.is_open());

        // Closed modal leaves the key to others.
        assert!(!listeners.dispatch(&escape));

        drop(mounted);
        controller.open_modal();
        assert!(!listeners.dispatch(&escape));
        assert!(controller.is_open());
        assert!(listeners.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_submit_touches_everything_and_skips_handler() {
        let handler = Arc::new(RecordingHandler::default());
        let controller =
            ParticipateController::new(ParticipateOptions::default().with_handler(handler.clone()));
        controller.open_modal();
        controller.set_name("Aziz");

        assert_eq!(controller.submit().await, SubmitOutcome::Invalid);
        assert_eq!(controller.touched(), TouchedFlags::all());
        assert_eq!(controller.errors().code(FormField::Name), "");
        assert_eq!(controller.errors().code(FormField::Email), "invalid_email");
        assert_eq!(controller.errors().code(FormField::Phone), "invalid_phone_intl");
        assert_eq!(controller.errors().code(FormField::Agree), "must_agree");
        assert!(controller.is_open());
        assert!(!controller.is_submitting());
        assert_eq!(handler.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_successful_submit_resets_and_closes() {
        let handler = Arc::new(GatedHandler::default());
        let controller =
            ParticipateController::new(ParticipateOptions::default().with_handler(handler.clone()));
        controller.open_modal();
        fill_valid(&controller);
        let expected = controller.form();

        handler.gate.notify_one();
        assert_eq!(controller.submit().await, SubmitOutcome::Submitted);

        assert_eq!(handler.received.lock().unwrap().as_ref(), Some(&expected));
        assert_eq!(controller.form(), FormData::default());
        assert_eq!(controller.touched(), TouchedFlags::default());
        assert!(!controller.is_open());
        assert!(!controller.is_submitting());
    }

    #[tokio::test]
    async fn test_submit_without_reset_keeps_values() {
        let controller =
            ParticipateController::new(ParticipateOptions::default().reset_on_submit(false));
        controller.open_modal();
        fill_valid(&controller);
        let before = controller.form();

        assert_eq!(controller.submit().await, SubmitOutcome::Submitted);
        assert_eq!(controller.form(), before);
        assert_eq!(controller.touched(), TouchedFlags::all());
        assert!(!controller.is_open());
    }

    #[tokio::test]
    async fn test_concurrent_submit_invokes_handler_once() {
        let handler = Arc::new(GatedHandler::default());
        let controller =
            ParticipateController::new(ParticipateOptions::default().with_handler(handler.clone()));
        controller.open_modal();
        fill_valid(&controller);

        let first = tokio::spawn({
            let controller = controller.clone();
            async move { controller.submit().await }
        });
        wait_for_call(&handler).await;

        assert_eq!(controller.phase(), ModalPhase::OpenSubmitting);
        assert_eq!(controller.submit().await, SubmitOutcome::Busy);

        // Edits are still accepted while the handler runs.
        controller.set_name("Someone else");
        assert_eq!(handler.received.lock().unwrap().as_ref().map(|f| f.name.as_str()), Some("Aziz"));

        handler.gate.notify_one();
        assert_eq!(first.await.unwrap(), SubmitOutcome::Submitted);
        assert_eq!(handler.calls.load(Ordering::SeqCst), 1);
        assert_eq!(controller.phase(), ModalPhase::Closed);
    }

    #[tokio::test]
    async fn test_failed_handler_still_closes_and_clears_flag() {
        let controller = ParticipateController::new(
            ParticipateOptions::default().with_handler(Arc::new(FailingHandler)),
        );
        controller.open_modal();
        fill_valid(&controller);

        assert_eq!(controller.submit().await, SubmitOutcome::HandlerFailed);
        assert!(!controller.is_submitting());
        assert!(!controller.is_open());
        assert_eq!(controller.form(), FormData::default());
    }

    #[tokio::test]
    async fn test_dropped_submit_clears_flag() {
        let handler = Arc::new(GatedHandler::default());
        let controller =
            ParticipateController::new(ParticipateOptions::default().with_handler(handler.clone()));
        controller.open_modal();
        fill_valid(&controller);

        let result = tokio::time::timeout(Duration::from_millis(20), controller.submit()).await;
        assert!(result.is_err());
        assert_eq!(handler.calls.load(Ordering::SeqCst), 1);
        assert!(!controller.is_submitting());
        assert!(controller.is_open());
    }
}
