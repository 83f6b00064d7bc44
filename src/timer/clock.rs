use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

/// A stream of ticks consumed by one running session
#[async_trait]
pub trait TickSource: Send {
    /// Wait for the next tick. Returns false once the source is exhausted.
    async fn next_tick(&mut self) -> bool;
}

/// Factory for tick sources, injected so tests can drive time by hand
pub trait Clock: Send + Sync {
    /// A fresh source firing every `period`, first tick one period from now
    fn ticks(&self, period: Duration) -> Box<dyn TickSource>;
}

/// Ticks backed by `tokio::time::Interval`
pub struct IntervalSource {
    interval: Interval,
}

impl IntervalSource {
    pub fn new(period: Duration) -> Self {
        let mut interval = interval_at(Instant::now() + period, period);
        // Late ticks are delivered back to back so elapsed time catches up
        interval.set_missed_tick_behavior(MissedTickBehavior::Burst);
        Self { interval }
    }
}

#[async_trait]
impl TickSource for IntervalSource {
    async fn next_tick(&mut self) -> bool {
        self.interval.tick().await;
        true
    }
}

/// Production clock
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn ticks(&self, period: Duration) -> Box<dyn TickSource> {
        Box::new(IntervalSource::new(period))
    }
}

/// Tick source fed by a `ManualClock`
pub struct ManualSource {
    rx: mpsc::UnboundedReceiver<()>,
}

#[async_trait]
impl TickSource for ManualSource {
    async fn next_tick(&mut self) -> bool {
        self.rx.recv().await.is_some()
    }
}

/// Deterministic clock: nothing fires until `advance` is called.
///
/// Periods are ignored. Each advanced unit is one tick delivered to every
/// source still being consumed, so one clock can drive several sessions.
#[derive(Clone, Default)]
pub struct ManualClock {
    sources: Arc<Mutex<Vec<mpsc::UnboundedSender<()>>>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire `ticks` ticks. Returns the most any live source accepted; a source
    /// whose session already stopped accepts none.
    pub fn advance(&self, ticks: u32) -> u32 {
        let mut sources = self.sources.lock().unwrap_or_else(|e| e.into_inner());
        sources.retain(|tx| !tx.is_closed());

        let mut most = 0;
        for tx in sources.iter() {
            let delivered = (0..ticks).take_while(|_| tx.send(()).is_ok()).count() as u32;
            most = most.max(delivered);
        }
        most
    }

    /// Whether any issued source is still being consumed
    pub fn is_live(&self) -> bool {
        let sources = self.sources.lock().unwrap_or_else(|e| e.into_inner());
        sources.iter().any(|tx| !tx.is_closed())
    }
}

impl Clock for ManualClock {
    fn ticks(&self, _period: Duration) -> Box<dyn TickSource> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut sources = self.sources.lock().unwrap_or_else(|e| e.into_inner());
        sources.retain(|tx| !tx.is_closed());
        sources.push(tx);
        Box::new(ManualSource { rx })
    }
}
