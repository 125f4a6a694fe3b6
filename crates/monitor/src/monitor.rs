//! Attention monitor poll loop

use alerting::{AlertEvent, DebounceTracker};
use metrics::counter;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info, warn};

use crate::{
    AlertSink, IntervalTicks, LandmarkSource, MonitorConfig, MonitorError, SourceError, TickSource,
};

/// Handle to a spawned poll loop
struct RunningMonitor {
    stop_tx: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

/// Attention monitor.
///
/// Owns one poll loop at a time. The loop runs on a Tokio task and is
/// the only owner of the alert episode state; ticks are processed one
/// after another and a tick that comes due while a landmark request is
/// still in flight is skipped.
#[derive(Default)]
pub struct AttentionMonitor {
    running: Option<RunningMonitor>,
}

impl AttentionMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start polling `source` every `config.tick_interval_ms`.
    ///
    /// Must be called from within a Tokio runtime. Fails with
    /// `AlreadyRunning` unless the previous run was stopped.
    pub fn start<S, K>(&mut self, source: S, sink: K, config: MonitorConfig) -> Result<(), MonitorError>
    where
        S: LandmarkSource + 'static,
        K: AlertSink,
    {
        self.ensure_stopped()?;
        config.validate()?;
        let ticks = IntervalTicks::new(config.tick_interval());
        self.spawn(source, sink, ticks, config.debounce());
        Ok(())
    }

    /// Start with an explicit tick source instead of the configured
    /// interval. The loop ends on its own when the tick source does.
    pub fn start_with_ticks<S, K, T>(
        &mut self,
        source: S,
        sink: K,
        ticks: T,
        config: MonitorConfig,
    ) -> Result<(), MonitorError>
    where
        S: LandmarkSource + 'static,
        K: AlertSink,
        T: TickSource + 'static,
    {
        self.ensure_stopped()?;
        config.validate()?;
        self.spawn(source, sink, ticks, config.debounce());
        Ok(())
    }

    /// Stop polling and drop any pending debounce timer.
    ///
    /// No alert reaches the sink once this returns. Safe to call on a
    /// monitor that is not running.
    pub async fn stop(&mut self) {
        let Some(running) = self.running.take() else {
            return;
        };

        info!("Stopping attention monitor");
        // The receiver is gone if the loop already ended on its own
        let _ = running.stop_tx.send(());
        if let Err(e) = running.task.await {
            warn!("Attention monitor task ended abnormally: {}", e);
        }
    }

    /// Check if the poll loop is still running
    pub fn is_running(&self) -> bool {
        self.running
            .as_ref()
            .map_or(false, |running| !running.task.is_finished())
    }

    fn ensure_stopped(&mut self) -> Result<(), MonitorError> {
        if self.is_running() {
            return Err(MonitorError::AlreadyRunning);
        }
        self.running = None;
        Ok(())
    }

    fn spawn<S, K, T>(&mut self, source: S, sink: K, ticks: T, debounce: Duration)
    where
        S: LandmarkSource + 'static,
        K: AlertSink,
        T: TickSource + 'static,
    {
        let (stop_tx, stop_rx) = oneshot::channel();
        let task = tokio::spawn(poll_loop(source, sink, ticks, debounce, stop_rx));
        self.running = Some(RunningMonitor { stop_tx, task });
    }
}

/// Resolves at the debounce deadline, or never if no timer is armed
async fn debounce_timer(deadline: Option<std::time::Instant>) {
    match deadline {
        Some(deadline) => sleep_until(Instant::from_std(deadline)).await,
        None => std::future::pending().await,
    }
}

fn raise<K: AlertSink>(sink: &K, event: AlertEvent) {
    counter!("attention_alerts_total").increment(1);
    sink.deliver(event);
}

fn fire_due_timer<K: AlertSink>(tracker: &mut DebounceTracker, sink: &K) {
    if let Some(event) = tracker.timer_elapsed(Instant::now().into_std()) {
        raise(sink, event);
    }
}

async fn poll_loop<S, K, T>(
    mut source: S,
    sink: K,
    mut ticks: T,
    debounce: Duration,
    mut stop_rx: oneshot::Receiver<()>,
) where
    S: LandmarkSource,
    K: AlertSink,
    T: TickSource,
{
    let mut tracker = DebounceTracker::new(debounce);
    info!("Attention monitor started (debounce {:?})", debounce);

    'poll: loop {
        let deadline = tracker.deadline();

        // Stop wins over the timer, the timer wins over a new tick
        tokio::select! {
            biased;

            _ = &mut stop_rx => break,

            _ = debounce_timer(deadline) => fire_due_timer(&mut tracker, &sink),

            more = ticks.tick() => {
                if !more {
                    info!("Tick source exhausted");
                    break;
                }
                counter!("attention_ticks_total").increment(1);

                // The debounce timer keeps running while the estimator works
                let mut pending = source.estimate();
                let estimate = loop {
                    let deadline = tracker.deadline();
                    tokio::select! {
                        biased;
                        _ = &mut stop_rx => break 'poll,
                        _ = debounce_timer(deadline) => fire_due_timer(&mut tracker, &sink),
                        estimate = &mut pending => break estimate,
                    }
                };

                let frame = match estimate {
                    Ok(Some(frame)) => frame,
                    Ok(None) => {
                        debug!("Estimator returned no landmarks, tick skipped");
                        counter!("attention_ticks_skipped_total").increment(1);
                        continue;
                    }
                    Err(SourceError::NotReady) => {
                        debug!("Estimator not ready, tick skipped");
                        counter!("attention_ticks_skipped_total").increment(1);
                        continue;
                    }
                    Err(e) => {
                        warn!("Tick skipped: {}", e);
                        counter!("attention_ticks_skipped_total").increment(1);
                        continue;
                    }
                };

                let analysis = gaze::analyze(&frame);
                if let Some(loss) = analysis.tracking_loss {
                    debug!("Tracking lost ({:?}), counting as looking away", loss);
                }

                if let Some(event) = tracker.observe(analysis.verdict, Instant::now().into_std()) {
                    raise(&sink, event);
                }
            }
        }
    }

    info!(
        "Attention monitor stopped ({} alerts raised)",
        tracker.alerts_fired()
    );
}
