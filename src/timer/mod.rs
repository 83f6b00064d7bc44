//! Tick-driven session timing
//!
//! Recording and call screens share one pattern: start, tick once per
//! period, stop either manually or at a ceiling, then report the result.
//! This module provides that pattern once:
//! - `TickCounter`: the pure state machine, no timers
//! - `Clock` / `TickSource`: where ticks come from (tokio time or manual)
//! - `TimerGuard`: owns a spawned timer task and aborts it on drop
//! - `TickingSession`: counter + clock + guard, emitting `TickEvent`s

mod clock;
mod counter;
mod guard;
mod session;

pub use clock::{Clock, IntervalSource, ManualClock, ManualSource, TickSource, TokioClock};
pub use counter::{StopOutcome, TickCounter, TickOutcome, TickPolicy, TickState};
pub use guard::TimerGuard;
pub use session::{TickEvent, TickingSession};
