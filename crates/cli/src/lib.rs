//! Attention Monitor Trace Replay
//!
//! Stands in for the camera and landmark model: replays a recorded
//! landmark trace through the attention monitor at the configured
//! cadence and prints the resulting notifications.

use alerting::AlertEvent;
use anyhow::Context;
use async_trait::async_trait;
use landmarks::LandmarkFrame;
use monitor::{AlertSink, AttentionMonitor, LandmarkSource, MonitorConfig, SourceError};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Environment variable prefix for settings overrides
pub const ENV_PREFIX: &str = "ATTENTION";

/// Named monitor presets selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Preset {
    Default,
    Strict,
    Lenient,
}

impl Preset {
    pub fn config(self) -> MonitorConfig {
        match self {
            Preset::Default => MonitorConfig::default(),
            Preset::Strict => MonitorConfig::strict(),
            Preset::Lenient => MonitorConfig::lenient(),
        }
    }
}

/// Application settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub monitor: MonitorConfig,
}

/// Load settings from defaults, an optional file, then the environment
/// (e.g. `ATTENTION_MONITOR__DEBOUNCE_MS=3000`)
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    let mut builder = config::Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(config::File::from(path));
    }
    let settings = builder
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .context("Failed to load settings")?
        .try_deserialize::<Settings>()
        .context("Invalid settings")?;

    info!("Loaded settings: {:?}", settings);
    Ok(settings)
}

/// Read a JSON Lines landmark trace
pub fn load_trace(path: &Path) -> anyhow::Result<Vec<Option<LandmarkFrame>>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open trace {}", path.display()))?;
    let frames = landmarks::parse_trace(BufReader::new(file))
        .with_context(|| format!("Failed to read trace {}", path.display()))?;
    info!("Loaded {} trace entries from {}", frames.len(), path.display());
    Ok(frames)
}

/// Initialize logging. `RUST_LOG` overrides the default `info` level.
pub fn init_logging(json: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true);

    let result = if json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };
    result.context("Failed to set tracing subscriber")
}

/// Sink that prints the notification for each alert
pub fn stdout_sink() -> impl AlertSink {
    |event: AlertEvent| {
        println!("[{}] {}", event.kind, event.kind.notification());
    }
}

/// Landmark source replaying a recorded trace, one entry per tick.
///
/// Once the trace runs out every estimate is empty and `finished` is
/// notified.
pub struct ReplaySource {
    frames: VecDeque<Option<LandmarkFrame>>,
    finished: Arc<Notify>,
}

impl ReplaySource {
    pub fn new(frames: Vec<Option<LandmarkFrame>>) -> Self {
        Self {
            frames: frames.into(),
            finished: Arc::new(Notify::new()),
        }
    }

    /// Notified when the last trace entry has been handed out
    pub fn finished(&self) -> Arc<Notify> {
        self.finished.clone()
    }
}

#[async_trait]
impl LandmarkSource for ReplaySource {
    async fn estimate(&mut self) -> Result<Option<LandmarkFrame>, SourceError> {
        match self.frames.pop_front() {
            Some(entry) => Ok(entry),
            None => {
                self.finished.notify_one();
                Ok(None)
            }
        }
    }
}

/// Forwards alerts while counting them
struct CountingSink<K> {
    inner: K,
    count: Arc<AtomicU64>,
}

impl<K: AlertSink> AlertSink for CountingSink<K> {
    fn deliver(&self, event: AlertEvent) {
        self.count.fetch_add(1, Ordering::Relaxed);
        self.inner.deliver(event);
    }
}

/// Replay `frames` through a fresh monitor until the trace is exhausted
/// or Ctrl-C is received. Returns the number of alerts raised.
///
/// After the last entry the monitor keeps running for one more debounce
/// period with empty estimates, so a looking-away streak still pending
/// at the end of the trace can complete.
pub async fn run_replay<K: AlertSink>(
    frames: Vec<Option<LandmarkFrame>>,
    config: MonitorConfig,
    sink: K,
) -> anyhow::Result<u64> {
    let source = ReplaySource::new(frames);
    let finished = source.finished();
    let count = Arc::new(AtomicU64::new(0));
    let sink = CountingSink {
        inner: sink,
        count: count.clone(),
    };

    let linger = config.debounce();
    let mut monitor = AttentionMonitor::new();
    monitor.start(source, sink, config)?;

    let drain_trace = async {
        finished.notified().await;
        info!("Trace exhausted, waiting {:?} for pending alerts", linger);
        tokio::time::sleep(linger).await;
    };

    tokio::select! {
        _ = drain_trace => info!("Replay complete"),
        result = tokio::signal::ctrl_c() => match result {
            Ok(()) => info!("Interrupted"),
            Err(e) => warn!("Failed to listen for Ctrl-C: {}", e),
        },
    }

    monitor.stop().await;
    Ok(count.load(Ordering::Relaxed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use landmarks::LandmarkPoint;
    use tokio::sync::mpsc;

    fn attentive() -> Option<LandmarkFrame> {
        let eye: Vec<_> = (0..9).map(|i| LandmarkPoint::new(i as f32 * 10.0, 0.0)).collect();
        let iris: Vec<_> = (0..5).map(|_| LandmarkPoint::new(40.0, 0.0)).collect();
        Some(LandmarkFrame {
            face_detected: true,
            left_eye_contour: eye.clone(),
            right_eye_contour: eye,
            left_iris: iris.clone(),
            right_iris: iris,
        })
    }

    fn away() -> Option<LandmarkFrame> {
        Some(LandmarkFrame::no_face())
    }

    #[test]
    fn test_default_settings() {
        let settings = load_settings(None).unwrap();
        assert_eq!(settings.monitor, MonitorConfig::default());
    }

    #[test]
    fn test_presets() {
        assert_eq!(Preset::Default.config(), MonitorConfig::default());
        assert_eq!(Preset::Strict.config(), MonitorConfig::strict());
        assert_eq!(Preset::Lenient.config().debounce_ms, 4000);
    }

    #[tokio::test(start_paused = true)]
    async fn test_replay_streak_pending_at_end_of_trace_alerts() {
        // 1000 ms of looking away, then the trace ends
        let frames = vec![away(); 5];
        let (tx, mut rx) = mpsc::unbounded_channel::<AlertEvent>();

        let alerts = run_replay(frames, MonitorConfig::default(), tx).await.unwrap();
        assert_eq!(alerts, 1);
        assert_eq!(rx.recv().await, Some(AlertEvent::distracted()));
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_replay_strict_preset_alerts_sooner() {
        // 1400 ms of looking away is enough for the strict debounce only
        let mut frames = vec![away(); 8];
        frames.push(attentive());

        let strict = run_replay(frames.clone(), MonitorConfig::strict(), |_: AlertEvent| {})
            .await
            .unwrap();
        let default = run_replay(frames, MonitorConfig::default(), |_: AlertEvent| {})
            .await
            .unwrap();
        assert_eq!(strict, 1);
        assert_eq!(default, 0);
    }

    #[tokio::test]
    async fn test_replay_source_signals_exhaustion() {
        let mut source = ReplaySource::new(vec![None, away()]);
        let finished = source.finished();

        assert_eq!(source.estimate().await, Ok(None));
        assert_eq!(source.estimate().await, Ok(away()));
        assert_eq!(source.estimate().await, Ok(None));

        // The stored permit completes immediately
        finished.notified().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_replay_sustained_distraction() {
        let mut frames = vec![attentive(); 3];
        frames.extend(vec![away(); 15]);
        frames.push(attentive());

        let (tx, mut rx) = mpsc::unbounded_channel();
        let sink = move |event: AlertEvent| {
            let _ = tx.send(event);
        };

        let alerts = run_replay(frames, MonitorConfig::default(), sink).await.unwrap();
        assert_eq!(alerts, 1);
        assert_eq!(rx.recv().await, Some(AlertEvent::distracted()));
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_replay_with_gaps_does_not_alert() {
        // Missing estimates neither extend nor cancel a streak
        let frames = vec![away(), away(), None, None, attentive(), away(), attentive()];
        let alerts = run_replay(frames, MonitorConfig::default(), |_: AlertEvent| {})
            .await
            .unwrap();
        assert_eq!(alerts, 0);
    }
}
