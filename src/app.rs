use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::Block;
use tokio::sync::mpsc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use crate::Theme;
use crate::cli::Args;
use crate::config::{AppConfig, DialogAction, GlobalAction, KeyResolver};
use crate::i18n::{Locale, Translator};
use crate::keyboard::KeyListeners;
use crate::message::AppMessage;
use crate::participate::{
    LogSubmitHandler, Mounted, ParticipateController, ParticipateOptions, SubmitOutcome,
};
use crate::screens::{LandingScreen, WinnersScreen};
use crate::tui::{Event, Tui};
use crate::ui::{
    Component, EventResult, Keybinding, ParticipateDialog, ParticipateEvent, Result, Screen,
    StatusBar, Toast, ToastManager,
};
use crate::winners::mock_winners;

const FRAME_RATE: f64 = 60.0;
const TICK_RATE: f64 = 4.0;

enum Route {
    Landing(LandingScreen),
    Winners(WinnersScreen),
}

impl Route {
    fn screen(&mut self) -> &mut dyn Screen<Output = AppMessage> {
        match self {
            Self::Landing(screen) => screen,
            Self::Winners(screen) => screen,
        }
    }
}

pub struct App {
    route: Route,
    controller: ParticipateController,
    dialog: ParticipateDialog,
    listeners: KeyListeners,
    /// Keeps the modal's Escape listener alive for the lifetime of the app.
    _mounted: Mounted,
    translator: Arc<dyn Translator>,
    resolver: Arc<KeyResolver>,
    theme: Theme,
    status_bar: StatusBar,
    toasts: ToastManager,
    should_quit: bool,
    should_suspend: bool,
    message_tx: UnboundedSender<AppMessage>,
    message_rx: UnboundedReceiver<AppMessage>,
}

impl App {
    pub fn new(
        config: &AppConfig,
        locale: Locale,
        translator: Arc<dyn Translator>,
        resolver: Arc<KeyResolver>,
        theme: Theme,
    ) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();

        let options = ParticipateOptions::default()
            .reset_on_submit(config.participate.reset_on_submit)
            .with_handler(Arc::new(LogSubmitHandler));
        let controller = ParticipateController::new(options);

        let listeners = KeyListeners::new();
        let mounted = controller.mount(&listeners, resolver.dialog_binding(DialogAction::Cancel));
        let dialog = ParticipateDialog::new(controller.clone(), translator.clone(), resolver.clone());

        Self {
            route: Route::Landing(LandingScreen::new(translator.clone(), resolver.clone())),
            controller,
            dialog,
            listeners,
            _mounted: mounted,
            translator,
            resolver,
            theme,
            status_bar: StatusBar::new(locale),
            toasts: ToastManager::new(),
            should_quit: false,
            should_suspend: false,
            message_tx,
            message_rx,
        }
    }

    pub fn apply_cli_args(&mut self, args: &Args) {
        if args.winners {
            self.update(AppMessage::ShowWinners);
        }
        if args.participate {
            self.update(AppMessage::OpenParticipate);
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new(FRAME_RATE, TICK_RATE)?;
        tui.enter()?;

        loop {
            self.handle_events(&mut tui).await?;
            self.handle_messages(&mut tui)?;
            if self.should_suspend {
                tui.suspend()?;
                self.should_suspend = false;
                tui.enter()?;
                tui.clear()?;
            } else if self.should_quit {
                break;
            }
        }

        tui.exit()?;
        Ok(())
    }

    async fn handle_events(&mut self, tui: &mut Tui) -> Result<()> {
        let Some(event) = tui.next_event().await else {
            return Ok(());
        };

        match event {
            Event::Quit => self.message_tx.send(AppMessage::Quit)?,
            Event::Suspend => self.message_tx.send(AppMessage::Suspend)?,
            Event::Tick => self.message_tx.send(AppMessage::Tick)?,
            Event::Render => self.message_tx.send(AppMessage::Render)?,
            Event::Resize(width, height) => self.message_tx.send(AppMessage::Resize(width, height))?,
            Event::Key(key) => self.handle_key(key)?,
            Event::Paste(text) => {
                if self.controller.is_open() {
                    self.dialog.handle_paste(&text);
                }
            }
            Event::Error(e) => warn!("Terminal event error: {e}"),
            Event::Init => {}
        }
        Ok(())
    }

    /// Routes a key: global listeners, then the modal, then the screen,
    /// then app-wide shortcuts.
    fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.listeners.dispatch(&key) {
            return Ok(());
        }

        if self.controller.is_open() {
            if let EventResult::Event(ParticipateEvent::Submit) = self.dialog.handle_key(key)? {
                self.message_tx.send(AppMessage::Submit)?;
            }
            return Ok(());
        }

        match self.route.screen().handle_key(key)? {
            EventResult::Event(message) => {
                self.message_tx.send(message)?;
                return Ok(());
            }
            EventResult::Consumed => return Ok(()),
            EventResult::Ignored => {}
        }

        if self.resolver.matches_global(&key, GlobalAction::Quit) {
            self.message_tx.send(AppMessage::Quit)?;
        } else if self.resolver.matches_global(&key, GlobalAction::Participate) {
            self.message_tx.send(AppMessage::OpenParticipate)?;
        } else if self.resolver.matches_global(&key, GlobalAction::Winners) {
            self.message_tx.send(AppMessage::ShowWinners)?;
        }
        Ok(())
    }

    fn handle_messages(&mut self, tui: &mut Tui) -> Result<()> {
        while let Ok(message) = self.message_rx.try_recv() {
            match message {
                AppMessage::Render => self.render(tui)?,
                AppMessage::Resize(width, height) => {
                    tui.resize(Rect::new(0, 0, width, height))?;
                    self.render(tui)?;
                }
                other => self.update(other),
            }
        }
        Ok(())
    }

    fn update(&mut self, message: AppMessage) {
        if !matches!(message, AppMessage::Tick) {
            debug!("Handling message: {message:?}");
        }

        match message {
            AppMessage::Tick => {
                self.toasts.handle_tick();
                self.dialog.handle_tick();
                self.route.screen().handle_tick();
            }
            AppMessage::Quit => self.should_quit = true,
            AppMessage::Suspend => self.should_suspend = true,
            AppMessage::ShowLanding => {
                info!("Showing landing page");
                self.route = Route::Landing(LandingScreen::new(
                    self.translator.clone(),
                    self.resolver.clone(),
                ));
            }
            AppMessage::ShowWinners => {
                info!("Showing winners");
                self.route = Route::Winners(WinnersScreen::new(
                    &mock_winners(),
                    self.translator.clone(),
                    self.resolver.clone(),
                ));
            }
            AppMessage::OpenParticipate => self.controller.open_modal(),
            AppMessage::Submit => self.spawn_submit(),
            AppMessage::SubmitFinished(outcome) => self.handle_submit_outcome(outcome),
            AppMessage::Render | AppMessage::Resize(..) => {}
        }
    }

    fn spawn_submit(&self) {
        let controller = self.controller.clone();
        let message_tx = self.message_tx.clone();
        tokio::spawn(async move {
            let outcome = controller.submit().await;
            if message_tx.send(AppMessage::SubmitFinished(outcome)).is_err() {
                debug!(?outcome, "Submission finished after the app loop closed");
            }
        });
    }

    fn handle_submit_outcome(&mut self, outcome: SubmitOutcome) {
        match outcome {
            SubmitOutcome::Submitted => {
                let message = self.translator.translate("participate.toast.success");
                self.toasts.show(Toast::success(message));
            }
            SubmitOutcome::HandlerFailed => {
                let message = self.translator.translate("participate.toast.failure");
                self.toasts.show(Toast::error(message));
            }
            SubmitOutcome::Invalid | SubmitOutcome::Busy => {}
        }
    }

    fn keybindings(&mut self) -> Vec<Keybinding> {
        if self.controller.is_open() {
            self.dialog.keybindings()
        } else {
            self.route.screen().keybindings()
        }
    }

    fn render(&mut self, tui: &mut Tui) -> Result<()> {
        let keybindings = self.keybindings();
        let theme = &self.theme;
        let route = &mut self.route;
        let dialog = &mut self.dialog;
        let modal_open = self.controller.is_open();
        let status_bar = &self.status_bar;
        let toasts = &mut self.toasts;

        tui.draw(|frame| {
            let area = frame.area();
            frame.render_widget(Block::default().style(Style::default().bg(theme.background)), area);

            let [main_area, status_area] =
                Layout::vertical([Constraint::Fill(1), Constraint::Length(StatusBar::HEIGHT)]).areas(area);

            route.screen().render(frame, main_area, theme);
            if modal_open {
                dialog.render(frame, main_area, theme);
            }
            status_bar.render(frame, status_area, theme, &keybindings);
            toasts.render(frame, main_area, theme);
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};

    use super::*;
    use crate::i18n::Catalog;
    use crate::participate::FormField;

    fn app() -> App {
        let catalog = Catalog::new(Locale::En).unwrap();
        App::new(
            &AppConfig::default(),
            Locale::En,
            Arc::new(catalog),
            Arc::new(KeyResolver::default()),
            Theme::default(),
        )
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE)).unwrap();
    }

    fn drain(app: &mut App) -> Vec<AppMessage> {
        let mut messages = Vec::new();
        while let Ok(message) = app.message_rx.try_recv() {
            messages.push(message.clone());
            app.update(message);
        }
        messages
    }

    #[tokio::test]
    async fn test_escape_closes_modal_before_screen_sees_it() {
        let mut app = app();
        app.update(AppMessage::ShowWinners);
        app.update(AppMessage::OpenParticipate);
        assert!(app.controller.is_open());

        press(&mut app, KeyCode::Esc);
        assert!(!app.controller.is_open());
        assert!(drain(&mut app).is_empty());
        assert!(matches!(app.route, Route::Winners(_)));

        press(&mut app, KeyCode::Esc);
        assert_eq!(drain(&mut app), vec![AppMessage::ShowLanding]);
        assert!(matches!(app.route, Route::Landing(_)));
    }

    #[tokio::test]
    async fn test_modal_captures_global_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('p'));
        assert_eq!(drain(&mut app), vec![AppMessage::OpenParticipate]);
        assert!(app.controller.is_open());

        press(&mut app, KeyCode::Char('q'));
        assert!(drain(&mut app).is_empty());
        assert!(!app.should_quit);

        app.controller.close_modal();
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(drain(&mut app), vec![AppMessage::Quit]);
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_submit_shows_toast_and_resets() {
        let mut app = app();
        app.update(AppMessage::OpenParticipate);
        app.controller.update(|form| {
            form.name = "Aziz".to_string();
            form.email = "aziz@example.uz".to_string();
            form.phone = "+998901234567".to_string();
            form.agree = true;
        });

        app.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL))
            .unwrap();
        assert_eq!(drain(&mut app), vec![AppMessage::Submit]);

        let finished = app.message_rx.recv().await;
        assert_eq!(finished, Some(AppMessage::SubmitFinished(SubmitOutcome::Submitted)));
        app.update(AppMessage::SubmitFinished(SubmitOutcome::Submitted));

        assert_eq!(app.toasts.len(), 1);
        assert!(!app.controller.is_open());
        assert_eq!(app.controller.form().name, "");
    }

    #[tokio::test]
    async fn test_invalid_submit_keeps_modal_open() {
        let mut app = app();
        app.update(AppMessage::OpenParticipate);
        app.update(AppMessage::Submit);

        let finished = app.message_rx.recv().await;
        assert_eq!(finished, Some(AppMessage::SubmitFinished(SubmitOutcome::Invalid)));
        assert!(app.controller.is_open());
        assert_eq!(app.controller.errors().code(FormField::Agree), "must_agree");
        assert!(app.toasts.is_empty());
    }

    #[tokio::test]
    async fn test_submit_completes_after_app_loop_closes() {
        let mut app = app();
        app.update(AppMessage::OpenParticipate);
        app.controller.update(|form| {
            form.name = "Aziz".to_string();
            form.email = "aziz@example.uz".to_string();
            form.phone = "+998901234567".to_string();
            form.agree = true;
        });
        let controller = app.controller.clone();

        app.update(AppMessage::Submit);
        drop(app);

        tokio::time::timeout(std::time::Duration::from_secs(1), async {
            while controller.is_open() || controller.is_submitting() {
                tokio::task::yield_now().await;
            }
        })
        .await
        .unwrap();
        assert_eq!(controller.form().name, "");
    }

    #[tokio::test]
    async fn test_cli_args_open_form() {
        let mut app = app();
        let args = Args {
            locale: None,
            participate: true,
            winners: false,
        };
        app.apply_cli_args(&args);
        assert!(app.controller.is_open());
        assert!(app.controller.take_focus_request());
    }
}
