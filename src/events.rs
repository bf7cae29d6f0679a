//! Application-level events
//!
//! Views never reach into the app to open the booking form or to report a
//! finished submission; they send an [`AppEvent`] and the main loop applies it.

use crate::relay::SubmissionOutcome;
use crate::state::FormKind;
use tokio::sync::mpsc::UnboundedSender;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    OpenBooking,
    SubmissionFinished {
        form: FormKind,
        outcome: SubmissionOutcome,
    },
}

/// Handle any part of the UI can hold to open the booking form
#[derive(Debug, Clone)]
pub struct BookingTrigger {
    tx: UnboundedSender<AppEvent>,
}

impl BookingTrigger {
    pub fn new(tx: UnboundedSender<AppEvent>) -> Self {
        Self { tx }
    }

    /// Ask the app to show the booking form
    pub fn open(&self) {
        if self.tx.send(AppEvent::OpenBooking).is_err() {
            tracing::debug!("Booking trigger fired after the event loop closed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[test]
    fn test_open_sends_event() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let trigger = BookingTrigger::new(tx);
        trigger.clone().open();
        assert_eq!(rx.try_recv().unwrap(), AppEvent::OpenBooking);
    }

    #[test]
    fn test_open_after_receiver_dropped_does_not_panic() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        BookingTrigger::new(tx).open();
    }
}
