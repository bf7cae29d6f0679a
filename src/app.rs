//! Application state and core logic

use crate::config::InquiryConfig;
use crate::events::{AppEvent, BookingTrigger};
use crate::relay::{RelayTransport, SubmissionOutcome, Submitter};
use crate::state::{AppState, FormKind, SubmitBlocked, View};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Shared relay submitter
    submitter: Submitter,
    /// Event channel feeding the main loop
    events_tx: UnboundedSender<AppEvent>,
    events_rx: UnboundedReceiver<AppEvent>,
    booking: BookingTrigger,
    /// Whether the app should quit
    quit: bool,
    /// Transient status bar message
    pub status_message: Option<String>,
}

impl App {
    /// Create a new App instance
    pub fn new(config: &InquiryConfig, transport: Arc<dyn RelayTransport>) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let state = AppState::new(config);

        if !state.relay_configured {
            tracing::warn!("No relay access key configured; submissions will be refused");
        }

        Self {
            state,
            submitter: Submitter::new(transport, config.relay_settings()),
            booking: BookingTrigger::new(events_tx.clone()),
            events_tx,
            events_rx,
            quit: false,
            status_message: None,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Handle for opening the booking form from anywhere
    pub fn booking_trigger(&self) -> BookingTrigger {
        self.booking.clone()
    }

    /// Navigate to a new view
    pub fn navigate(&mut self, view: View) {
        if self.state.current_view != view {
            self.state.view_history.push(self.state.current_view);
            self.state.current_view = view;
        }
    }

    /// Go back to previous view
    pub fn go_back(&mut self) {
        self.state.current_view = self.state.view_history.pop().unwrap_or_default();
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        self.status_message = None;

        // Booking shortcut works from every view
        if key.code == KeyCode::Char('b') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.booking.open();
            return Ok(());
        }

        match self.state.current_view {
            View::Home => self.handle_home_key(key),
            View::Form(kind) => self.handle_form_key(kind, key),
        }
        Ok(())
    }

    fn handle_home_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.state.move_selection_up(),
            KeyCode::Down | KeyCode::Char('j') => {
                self.state.move_selection_down(FormKind::ALL.len())
            }
            KeyCode::Enter => {
                let kind = self.state.selected_form();
                self.navigate(View::Form(kind));
            }
            KeyCode::Char('b') => self.booking.open(),
            KeyCode::Char('q') => self.quit = true,
            _ => {}
        }
    }

    fn handle_form_key(&mut self, kind: FormKind, key: KeyEvent) {
        let today = today();
        let Some(controller) = self.state.controller_mut(kind) else {
            return;
        };

        let on_select = controller
            .form()
            .fields
            .get(controller.form().active_field_index)
            .is_some_and(|f| f.is_select());
        let on_multiline = controller
            .form()
            .fields
            .get(controller.form().active_field_index)
            .is_some_and(|f| f.is_multiline());

        match key.code {
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.start_submit(kind, today)
            }
            KeyCode::Enter if key.modifiers.contains(KeyModifiers::ALT) => {
                self.start_submit(kind, today)
            }
            KeyCode::Enter if on_multiline => controller.input_char('\n', today),
            KeyCode::Enter => self.start_submit(kind, today),
            KeyCode::Esc => {
                if controller.banner().is_some() {
                    controller.dismiss();
                } else {
                    self.go_back();
                }
            }
            KeyCode::Tab | KeyCode::Down => controller.next_field(),
            KeyCode::BackTab | KeyCode::Up => controller.prev_field(),
            KeyCode::Right if on_select => controller.cycle_option(true, today),
            KeyCode::Left if on_select => controller.cycle_option(false, today),
            KeyCode::Backspace => controller.backspace(today),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                controller.input_char(c, today)
            }
            _ => {}
        }
    }

    /// Validate and, when clean, send the form on a background task
    fn start_submit(&mut self, kind: FormKind, today: NaiveDate) {
        let Some(controller) = self.state.controller_mut(kind) else {
            return;
        };

        let snapshot = match controller.begin_submit(today) {
            Ok(snapshot) => snapshot,
            Err(SubmitBlocked::InFlight) => {
                self.status_message = Some("Submission already in progress".to_string());
                return;
            }
            Err(SubmitBlocked::Invalid(errors)) => {
                self.status_message = Some(format!("Please fix {} field(s)", errors.len()));
                return;
            }
        };

        let submitter = self.submitter.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let outcome = submitter.submit(&snapshot).await;
            report_outcome(&tx, kind, outcome);
        });
    }

    /// Apply every queued event without blocking
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_event(event);
        }
    }

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::OpenBooking => self.navigate(View::Form(FormKind::Booking)),
            AppEvent::SubmissionFinished { form, outcome } => {
                if let Some(controller) = self.state.controller_mut(form) {
                    controller.complete_submit(&outcome, Instant::now());
                }
            }
        }
    }

    /// Advance timers (success panel auto-close)
    pub fn tick(&mut self, now: Instant) {
        for controller in self.state.controllers.values_mut() {
            controller.tick(now);
        }
    }

    /// Wait for the next event and apply it
    #[cfg(test)]
    async fn process_next_event(&mut self) {
        if let Some(event) = self.events_rx.recv().await {
            self.handle_event(event);
        }
    }
}

/// Hand a finished submission back to the event loop
fn report_outcome(tx: &UnboundedSender<AppEvent>, form: FormKind, outcome: SubmissionOutcome) {
    let kind = outcome.kind();
    if tx.send(AppEvent::SubmissionFinished { form, outcome }).is_err() {
        tracing::debug!(
            "{} outcome ({kind}) arrived after the event loop closed",
            form.routing().form_type
        );
    }
}

/// Local calendar date used by the date rules
fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relay::{MockRelayTransport, RelayResponse};
    use crate::state::FormStatus;
    use chrono::Days;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c))).unwrap();
        }
    }

    fn configured() -> InquiryConfig {
        InquiryConfig {
            access_key: Some("test-key".to_string()),
            ..Default::default()
        }
    }

    fn app_with(mock: MockRelayTransport) -> App {
        App::new(&configured(), Arc::new(mock))
    }

    #[test]
    fn test_home_navigation_and_quit() {
        let mut app = app_with(MockRelayTransport::new());
        app.handle_key(key(KeyCode::Down)).unwrap();
        app.handle_key(key(KeyCode::Enter)).unwrap();
        assert_eq!(app.state.current_view, View::Form(FormKind::PreschoolContact));

        app.handle_key(key(KeyCode::Esc)).unwrap();
        assert_eq!(app.state.current_view, View::Home);

        app.handle_key(key(KeyCode::Char('q'))).unwrap();
        assert!(app.should_quit());
    }

    #[test]
    fn test_booking_trigger_opens_booking_form() {
        let mut app = app_with(MockRelayTransport::new());
        app.booking_trigger().open();
        assert_eq!(app.state.current_view, View::Home);

        app.drain_events();

        assert_eq!(app.state.current_view, View::Form(FormKind::Booking));
    }

    #[test]
    fn test_report_outcome_delivers_to_open_loop() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        report_outcome(&tx, FormKind::PucContact, SubmissionOutcome::Timeout);
        assert_eq!(
            rx.try_recv().unwrap(),
            AppEvent::SubmissionFinished {
                form: FormKind::PucContact,
                outcome: SubmissionOutcome::Timeout,
            }
        );
    }

    #[test]
    fn test_report_outcome_after_loop_closed_is_ignored() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        report_outcome(&tx, FormKind::Booking, SubmissionOutcome::Timeout);
        assert!(tx.is_closed());
    }

    #[test]
    fn test_ctrl_b_from_another_form() {
        let mut app = app_with(MockRelayTransport::new());
        app.navigate(View::Form(FormKind::PucContact));
        app.handle_key(ctrl('b')).unwrap();
        app.drain_events();
        assert_eq!(app.state.current_view, View::Form(FormKind::Booking));
        app.go_back();
        assert_eq!(app.state.current_view, View::Form(FormKind::PucContact));
    }

    #[test]
    fn test_typing_in_form_updates_controller() {
        let mut app = app_with(MockRelayTransport::new());
        app.navigate(View::Form(FormKind::GeneralContact));
        type_text(&mut app, "Ravi");
        app.handle_key(key(KeyCode::Backspace)).unwrap();
        app.handle_key(key(KeyCode::Tab)).unwrap();

        let controller = app.state.active_controller().unwrap();
        assert_eq!(controller.form().field("name").unwrap().as_text(), "Rav");
        assert_eq!(controller.form().active_field_index, 1);
        assert!(controller.error_for("name").is_some());
    }

    #[test]
    fn test_invalid_submit_reports_in_status_bar() {
        let mut mock = MockRelayTransport::new();
        mock.expect_post_json().times(0);
        let mut app = app_with(mock);
        app.navigate(View::Form(FormKind::GeneralContact));

        app.handle_key(ctrl('s')).unwrap();

        assert_eq!(
            app.status_message.as_deref(),
            Some("Please fix 5 field(s)")
        );
        assert_eq!(
            app.state.active_controller().unwrap().status(),
            FormStatus::Idle
        );
    }

    #[tokio::test]
    async fn test_booking_submission_round_trip() {
        let mut mock = MockRelayTransport::new();
        mock.expect_post_json()
            .times(1)
            .withf(|_, body| body["form_type"] == "booking" && body["child_name"] == "Bob Smith")
            .returning(|_, _| {
                Ok(RelayResponse {
                    success: true,
                    message: None,
                })
            });
        let mut app = app_with(mock);
        app.booking_trigger().open();
        app.drain_events();

        let date = (today() + Days::new(1)).format("%Y-%m-%d").to_string();
        for value in [
            "Alice Smith",
            "Bob Smith",
            "alice@gmail.com",
            "9123456789",
        ] {
            type_text(&mut app, value);
            app.handle_key(key(KeyCode::Tab)).unwrap();
        }
        // Skip the optional program select
        app.handle_key(key(KeyCode::Tab)).unwrap();
        type_text(&mut app, &date);

        app.handle_key(ctrl('s')).unwrap();
        assert!(app.state.active_controller().unwrap().is_submitting());

        app.process_next_event().await;

        let controller = app.state.active_controller().unwrap();
        assert!(matches!(
            controller.status(),
            FormStatus::SuccessDisplayed { .. }
        ));
        assert!(controller.form().is_empty());
    }

    #[test]
    fn test_enter_in_message_adds_newline() {
        let mut app = app_with(MockRelayTransport::new());
        app.navigate(View::Form(FormKind::GeneralContact));
        for _ in 0..4 {
            app.handle_key(key(KeyCode::Tab)).unwrap();
        }
        type_text(&mut app, "Hi");
        app.handle_key(key(KeyCode::Enter)).unwrap();
        type_text(&mut app, "there");

        let controller = app.state.active_controller().unwrap();
        assert_eq!(
            controller.form().field("message").unwrap().as_text(),
            "Hi\nthere"
        );
    }

    #[test]
    fn test_tick_clears_success_panel() {
        let mut app = app_with(MockRelayTransport::new());
        let start = Instant::now();
        app.handle_event(AppEvent::SubmissionFinished {
            form: FormKind::PucContact,
            outcome: crate::relay::SubmissionOutcome::Success { message: None },
        });
        app.tick(start + std::time::Duration::from_secs(60));
        assert_eq!(
            app.state.controller(FormKind::PucContact).unwrap().status(),
            FormStatus::Idle
        );
    }
}
