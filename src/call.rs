use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info};

use crate::catalog::Contact;
use crate::config::CallConfig;
use crate::timer::{Clock, StopOutcome, TickEvent, TickPolicy, TickState, TickingSession};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CallStatus {
    Idle,
    Active,
    Ended,
}

impl From<TickState> for CallStatus {
    fn from(state: TickState) -> Self {
        match state {
            TickState::Idle => CallStatus::Idle,
            TickState::Running => CallStatus::Active,
            TickState::Stopped => CallStatus::Ended,
        }
    }
}

#[derive(Debug, Default)]
struct CallControls {
    muted: bool,
    voice_effect: Option<String>,
}

/// A single prank call: `Idle -> Active -> Ended`.
///
/// The duration timer has no ceiling. Ending the call, or dropping the
/// session, cancels it.
pub struct CallSession {
    ticks: TickingSession,
    contact: Option<Contact>,
    controls: Mutex<CallControls>,
}

impl CallSession {
    pub fn new(
        config: &CallConfig,
        contact: Option<Contact>,
        clock: Arc<dyn Clock>,
    ) -> (Self, mpsc::UnboundedReceiver<TickEvent>) {
        let (ticks, events) =
            TickingSession::new("call", TickPolicy::unbounded(), config.tick_period(), clock);

        let session = Self {
            ticks,
            contact,
            controls: Mutex::new(CallControls::default()),
        };

        (session, events)
    }

    pub async fn start(&self) -> bool {
        let started = self.ticks.start().await;
        if started {
            let controls = self.controls.lock().await;
            info!(
                "Calling {} (voice: {})",
                self.contact.as_ref().map_or("unknown", |c| c.name.as_str()),
                controls.voice_effect.as_deref().unwrap_or("none")
            );
        }
        started
    }

    /// Hang up. Returns the final duration, or None if the call wasn't active.
    pub async fn end(&self) -> Option<u32> {
        match self.ticks.stop().await {
            StopOutcome::Kept(secs) | StopOutcome::Discarded(secs) => {
                info!("Call ended after {}", format_duration(secs));
                Some(secs)
            }
            StopOutcome::Ignored => None,
        }
    }

    /// Flip local mute. Has no effect once the call has ended.
    pub async fn toggle_mute(&self) -> bool {
        let mut controls = self.controls.lock().await;
        if self.ticks.state().await == TickState::Stopped {
            debug!("mute ignored, call ended");
            return controls.muted;
        }
        controls.muted = !controls.muted;
        controls.muted
    }

    /// Apply a voice effect label to the call
    pub async fn select_voice(&self, label: impl Into<String>) {
        let label = label.into();
        debug!("call voice set to {}", label);
        self.controls.lock().await.voice_effect = Some(label);
    }

    pub async fn is_muted(&self) -> bool {
        self.controls.lock().await.muted
    }

    pub async fn voice_effect(&self) -> Option<String> {
        self.controls.lock().await.voice_effect.clone()
    }

    pub async fn status(&self) -> CallStatus {
        self.ticks.state().await.into()
    }

    pub async fn elapsed_secs(&self) -> u32 {
        self.ticks.elapsed().await
    }

    pub async fn timer_running(&self) -> bool {
        self.ticks.timer_running().await
    }

    pub fn contact(&self) -> Option<&Contact> {
        self.contact.as_ref()
    }
}

/// `MM:SS`, minutes are not wrapped into hours
pub fn format_duration(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "00:00");
        assert_eq!(format_duration(5), "00:05");
        assert_eq!(format_duration(65), "01:05");
        assert_eq!(format_duration(6000), "100:00");
    }
}
