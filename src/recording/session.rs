use serde::Serialize;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};

use super::library::{Library, VoiceArtifact};
use crate::config::RecordingConfig;
use crate::timer::{Clock, StopOutcome, TickEvent, TickPolicy, TickState, TickingSession};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordingStatus {
    Idle,
    Recording,
    Stopped,
}

impl From<TickState> for RecordingStatus {
    fn from(state: TickState) -> Self {
        match state {
            TickState::Idle => RecordingStatus::Idle,
            TickState::Running => RecordingStatus::Recording,
            TickState::Stopped => RecordingStatus::Stopped,
        }
    }
}

/// A finished take waiting to be saved or discarded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtifactCandidate {
    pub duration_secs: u32,
}

/// Voice clone recording: `Idle -> Recording -> Stopped -> Idle`
pub struct RecordingSession {
    ticks: TickingSession,
    library: Library,
    default_name: String,
}

impl RecordingSession {
    /// Returns the session and its tick events. A `CeilingReached` event means
    /// the take stopped itself and is ready to save.
    pub fn new(
        config: &RecordingConfig,
        library: Library,
        clock: Arc<dyn Clock>,
    ) -> (Self, mpsc::UnboundedReceiver<TickEvent>) {
        let policy = TickPolicy::bounded(config.ceiling_secs, config.min_keep_secs);
        let (ticks, events) = TickingSession::new("recording", policy, config.tick_period(), clock);

        let session = Self {
            ticks,
            library,
            default_name: config.default_name.clone(),
        };

        (session, events)
    }

    pub async fn start(&self) -> bool {
        self.ticks.start().await
    }

    /// Stop a running take. Returns a candidate if it was long enough to keep.
    pub async fn stop(&self) -> Option<ArtifactCandidate> {
        match self.ticks.stop().await {
            StopOutcome::Kept(duration_secs) => Some(ArtifactCandidate { duration_secs }),
            StopOutcome::Discarded(secs) => {
                debug!("Recording of {}s too short, dropped", secs);
                None
            }
            StopOutcome::Ignored => None,
        }
    }

    /// Save the stopped take under `name`, or the default name if empty.
    pub async fn save(&self, name: &str) -> Option<VoiceArtifact> {
        let Some(duration_secs) = self.ticks.reset().await else {
            debug!("save ignored, no stopped take");
            return None;
        };

        let name = if name.is_empty() {
            self.default_name.clone()
        } else {
            name.to_string()
        };

        Some(self.library.append(name, duration_secs).await)
    }

    /// Throw away the stopped take
    pub async fn discard(&self) -> bool {
        match self.ticks.reset().await {
            Some(secs) => {
                info!("Discarded {}s take", secs);
                true
            }
            None => false,
        }
    }

    pub async fn status(&self) -> RecordingStatus {
        self.ticks.state().await.into()
    }

    pub async fn elapsed_secs(&self) -> u32 {
        self.ticks.elapsed().await
    }

    pub async fn timer_running(&self) -> bool {
        self.ticks.timer_running().await
    }

    pub fn library(&self) -> &Library {
        &self.library
    }
}
