//! Debounce state machine for inattention episodes

use gaze::AttentionVerdict;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::event::AlertEvent;

/// Looking-away time required before an alert (milliseconds)
pub const DEFAULT_DEBOUNCE_MS: u64 = 2000;

/// Alert episode state.
///
/// `Idle` has no timer armed and no alert sent, `Timing` has the timer
/// armed, `Alerted` has fired for the current streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EpisodeState {
    #[default]
    Idle,
    /// Continuous looking-away streak being timed
    Timing { started: Instant, deadline: Instant },
    /// Alert already sent for the streak that began at `started`
    Alerted { started: Instant },
}

impl EpisodeState {
    /// Apply one polled verdict.
    ///
    /// A timer already due at `now` completes first, so a streak that
    /// outlasted the debounce period alerts even when the verdict that
    /// ends it arrives late.
    pub fn on_verdict(
        self,
        verdict: AttentionVerdict,
        now: Instant,
        debounce: Duration,
    ) -> (Self, Option<AlertEvent>) {
        let (state, event) = self.on_timer(now);

        let next = if !verdict.is_looking_away() {
            EpisodeState::Idle
        } else if state == EpisodeState::Idle {
            EpisodeState::Timing {
                started: now,
                deadline: now + debounce,
            }
        } else {
            state
        };

        (next, event)
    }

    /// Observe the debounce timer at `now`
    pub fn on_timer(self, now: Instant) -> (Self, Option<AlertEvent>) {
        match self {
            EpisodeState::Timing { started, deadline } if now >= deadline => (
                EpisodeState::Alerted { started },
                Some(AlertEvent::distracted()),
            ),
            other => (other, None),
        }
    }

    /// Pending timer deadline, if armed and not yet fired
    pub fn deadline(&self) -> Option<Instant> {
        match self {
            EpisodeState::Timing { deadline, .. } => Some(*deadline),
            _ => None,
        }
    }

    pub fn timer_armed(&self) -> bool {
        !matches!(self, EpisodeState::Idle)
    }

    pub fn alert_sent(&self) -> bool {
        matches!(self, EpisodeState::Alerted { .. })
    }
}

/// Owns the episode state for a running monitor
#[derive(Debug)]
pub struct DebounceTracker {
    /// Required continuous looking-away time
    debounce: Duration,
    /// Current episode state
    state: EpisodeState,
    /// Alerts fired since creation
    alerts_fired: u64,
}

impl DebounceTracker {
    /// Create a tracker in the idle state
    pub fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            state: EpisodeState::Idle,
            alerts_fired: 0,
        }
    }

    /// Feed one verdict, returning an alert if this verdict completed
    /// the debounce period
    pub fn observe(&mut self, verdict: AttentionVerdict, now: Instant) -> Option<AlertEvent> {
        let previous = self.state;
        let (next, event) = previous.on_verdict(verdict, now, self.debounce);

        match (previous, next) {
            (EpisodeState::Idle, EpisodeState::Timing { .. }) => {
                debug!("Looking away, debounce timer armed ({:?})", self.debounce);
            }
            (EpisodeState::Timing { started, .. }, EpisodeState::Idle) if event.is_none() => {
                debug!(
                    "Attention returned after {:?}, timer cancelled",
                    now.saturating_duration_since(started)
                );
            }
            (_, EpisodeState::Idle) if previous != EpisodeState::Idle => {
                debug!("Attention returned, episode closed");
            }
            _ => {}
        }

        self.commit(next, event)
    }

    /// Observe the timer firing at `now`
    pub fn timer_elapsed(&mut self, now: Instant) -> Option<AlertEvent> {
        let (next, event) = self.state.on_timer(now);
        self.commit(next, event)
    }

    fn commit(&mut self, next: EpisodeState, event: Option<AlertEvent>) -> Option<AlertEvent> {
        self.state = next;
        if let Some(event) = &event {
            self.alerts_fired += 1;
            info!("Alert raised: {} (total: {})", event.kind, self.alerts_fired);
        }
        event
    }

    /// Pending timer deadline
    pub fn deadline(&self) -> Option<Instant> {
        self.state.deadline()
    }

    pub fn state(&self) -> EpisodeState {
        self.state
    }

    pub fn alerts_fired(&self) -> u64 {
        self.alerts_fired
    }
}

impl Default for DebounceTracker {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_DEBOUNCE_MS))
    }
}
