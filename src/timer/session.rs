use super::clock::{Clock, TickSource};
use super::counter::{StopOutcome, TickCounter, TickOutcome, TickPolicy, TickState};
use super::guard::TimerGuard;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info};

/// Emitted by the tick task, in tick order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    Tick(u32),
    /// Final tick; the session stopped itself
    CeilingReached(u32),
}

/// A `TickCounter` driven by a clock, with one timer task per run
pub struct TickingSession {
    /// Label used in logs ("recording", "call")
    label: &'static str,

    counter: Arc<Mutex<TickCounter>>,

    clock: Arc<dyn Clock>,

    period: Duration,

    events: mpsc::UnboundedSender<TickEvent>,

    /// Timer task for the current run. Dropping the session drops the guard.
    timer: Mutex<Option<TimerGuard>>,
}

impl TickingSession {
    pub fn new(
        label: &'static str,
        policy: TickPolicy,
        period: Duration,
        clock: Arc<dyn Clock>,
    ) -> (Self, mpsc::UnboundedReceiver<TickEvent>) {
        let (events, events_rx) = mpsc::unbounded_channel();

        let session = Self {
            label,
            counter: Arc::new(Mutex::new(TickCounter::new(policy))),
            clock,
            period,
            events,
            timer: Mutex::new(None),
        };

        (session, events_rx)
    }

    /// Start a run and its timer. No-op unless Idle.
    pub async fn start(&self) -> bool {
        let mut counter = self.counter.lock().await;
        if !counter.start() {
            return false;
        }

        let source = self.clock.ticks(self.period);
        let guard = TimerGuard::spawn(Self::run(
            self.label,
            source,
            Arc::clone(&self.counter),
            self.events.clone(),
        ));

        // Replacing a finished guard from a previous run is harmless
        *self.timer.lock().await = Some(guard);

        info!("{} started ({:?} per tick)", self.label, self.period);
        true
    }

    /// Manual stop. Cancels the timer whenever the counter leaves Running.
    pub async fn stop(&self) -> StopOutcome {
        // Counter lock is held until the timer is gone so a concurrent
        // start() cannot install a new timer that we would then cancel.
        let mut counter = self.counter.lock().await;
        let outcome = counter.stop();

        if outcome != StopOutcome::Ignored {
            self.timer.lock().await.take();
            info!("{} stopped: {:?}", self.label, outcome);
        }

        outcome
    }

    /// Stopped -> Idle. Returns the elapsed value the run finished with.
    pub async fn reset(&self) -> Option<u32> {
        let mut counter = self.counter.lock().await;
        let elapsed = counter.elapsed();
        if !counter.reset() {
            return None;
        }
        self.timer.lock().await.take();
        Some(elapsed)
    }

    pub async fn elapsed(&self) -> u32 {
        self.counter.lock().await.elapsed()
    }

    pub async fn state(&self) -> TickState {
        self.counter.lock().await.state()
    }

    /// Whether a timer task is currently alive
    pub async fn timer_running(&self) -> bool {
        self.timer
            .lock()
            .await
            .as_ref()
            .is_some_and(|guard| !guard.is_finished())
    }

    async fn run(
        label: &'static str,
        mut source: Box<dyn TickSource>,
        counter: Arc<Mutex<TickCounter>>,
        events: mpsc::UnboundedSender<TickEvent>,
    ) {
        while source.next_tick().await {
            let outcome = counter.lock().await.tick();

            match outcome {
                TickOutcome::Advanced(elapsed) => {
                    let _ = events.send(TickEvent::Tick(elapsed));
                }
                TickOutcome::ReachedCeiling(elapsed) => {
                    info!("{} reached ceiling at {}", label, elapsed);
                    let _ = events.send(TickEvent::CeilingReached(elapsed));
                    break;
                }
                TickOutcome::Ignored => {
                    debug!("{} tick after stop ignored", label);
                    break;
                }
            }
        }
    }
}
