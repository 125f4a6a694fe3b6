//! Alert sink interface

use alerting::AlertEvent;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Receiver of alerts raised by the monitor. Delivery is fire-and-forget.
pub trait AlertSink: Send + 'static {
    fn deliver(&self, event: AlertEvent);
}

impl<F> AlertSink for F
where
    F: Fn(AlertEvent) + Send + 'static,
{
    fn deliver(&self, event: AlertEvent) {
        self(event)
    }
}

/// Bounded channel sink; alerts are dropped when the channel is full
impl AlertSink for mpsc::Sender<AlertEvent> {
    fn deliver(&self, event: AlertEvent) {
        match self.try_send(event) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(event)) => {
                warn!("Alert channel full, dropped {} alert", event.kind);
            }
            Err(mpsc::error::TrySendError::Closed(event)) => {
                debug!("Alert channel closed, dropped {} alert", event.kind);
            }
        }
    }
}

impl AlertSink for mpsc::UnboundedSender<AlertEvent> {
    fn deliver(&self, event: AlertEvent) {
        if self.send(event).is_err() {
            debug!("Alert channel closed, dropped {} alert", event.kind);
        }
    }
}
