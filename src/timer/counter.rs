use serde::Serialize;
use tracing::debug;

/// Limits applied to a ticking session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickPolicy {
    /// Elapsed value at which the session stops by itself (None = unbounded)
    pub ceiling: Option<u32>,

    /// Manual stops below this elapsed value are discarded
    pub min_keep: u32,
}

impl TickPolicy {
    pub fn bounded(ceiling: u32, min_keep: u32) -> Self {
        Self {
            ceiling: Some(ceiling),
            min_keep,
        }
    }

    pub fn unbounded() -> Self {
        Self {
            ceiling: None,
            min_keep: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TickState {
    Idle,
    Running,
    Stopped,
}

/// Result of feeding one tick into the counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Advanced(u32),
    /// The tick landed on the ceiling; the counter is now Stopped
    ReachedCeiling(u32),
    /// Counter was not running, nothing changed
    Ignored,
}

/// Result of a manual stop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    /// Long enough to keep; counter is Stopped
    Kept(u32),
    /// Below `min_keep`; counter went back to Idle with elapsed cleared
    Discarded(u32),
    Ignored,
}

/// Pure elapsed-time state machine: `Idle -> Running -> Stopped -> Idle`
#[derive(Debug, Clone)]
pub struct TickCounter {
    policy: TickPolicy,
    elapsed: u32,
    state: TickState,
}

impl TickCounter {
    pub fn new(policy: TickPolicy) -> Self {
        Self {
            policy,
            elapsed: 0,
            state: TickState::Idle,
        }
    }

    pub fn policy(&self) -> TickPolicy {
        self.policy
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    pub fn state(&self) -> TickState {
        self.state
    }

    /// Begin counting from zero. Only valid from Idle.
    pub fn start(&mut self) -> bool {
        if self.state != TickState::Idle {
            debug!("start ignored in state {:?}", self.state);
            return false;
        }
        self.elapsed = 0;
        self.state = TickState::Running;
        true
    }

    pub fn tick(&mut self) -> TickOutcome {
        if self.state != TickState::Running {
            return TickOutcome::Ignored;
        }

        self.elapsed += 1;

        match self.policy.ceiling {
            Some(ceiling) if self.elapsed >= ceiling => {
                self.elapsed = ceiling;
                self.state = TickState::Stopped;
                TickOutcome::ReachedCeiling(ceiling)
            }
            _ => TickOutcome::Advanced(self.elapsed),
        }
    }

    pub fn stop(&mut self) -> StopOutcome {
        if self.state != TickState::Running {
            debug!("stop ignored in state {:?}", self.state);
            return StopOutcome::Ignored;
        }

        if self.elapsed >= self.policy.min_keep {
            self.state = TickState::Stopped;
            StopOutcome::Kept(self.elapsed)
        } else {
            let dropped = self.elapsed;
            self.elapsed = 0;
            self.state = TickState::Idle;
            StopOutcome::Discarded(dropped)
        }
    }

    /// Return a Stopped counter to Idle, clearing elapsed time
    pub fn reset(&mut self) -> bool {
        if self.state != TickState::Stopped {
            debug!("reset ignored in state {:?}", self.state);
            return false;
        }
        self.elapsed = 0;
        self.state = TickState::Idle;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ceiling_is_hard_stop() {
        let mut counter = TickCounter::new(TickPolicy::bounded(30, 3));
        assert!(counter.start());

        for expected in 1..30 {
            assert_eq!(counter.tick(), TickOutcome::Advanced(expected));
        }
        assert_eq!(counter.tick(), TickOutcome::ReachedCeiling(30));
        assert_eq!(counter.state(), TickState::Stopped);

        // Further ticks change nothing
        for _ in 0..5 {
            assert_eq!(counter.tick(), TickOutcome::Ignored);
        }
        assert_eq!(counter.elapsed(), 30);
    }

    #[test]
    fn test_short_stop_discards() {
        let mut counter = TickCounter::new(TickPolicy::bounded(30, 3));
        counter.start();
        counter.tick();
        counter.tick();

        assert_eq!(counter.stop(), StopOutcome::Discarded(2));
        assert_eq!(counter.state(), TickState::Idle);
        assert_eq!(counter.elapsed(), 0);
    }

    #[test]
    fn test_stop_at_threshold_keeps() {
        let mut counter = TickCounter::new(TickPolicy::bounded(30, 3));
        counter.start();
        for _ in 0..3 {
            counter.tick();
        }

        assert_eq!(counter.stop(), StopOutcome::Kept(3));
        assert_eq!(counter.state(), TickState::Stopped);
        assert_eq!(counter.elapsed(), 3);
    }

    #[test]
    fn test_disallowed_transitions_are_noops() {
        let mut counter = TickCounter::new(TickPolicy::bounded(30, 3));

        assert_eq!(counter.stop(), StopOutcome::Ignored);
        assert!(!counter.reset());
        assert_eq!(counter.tick(), TickOutcome::Ignored);

        counter.start();
        assert!(!counter.start());
        assert!(!counter.reset());
        assert_eq!(counter.state(), TickState::Running);
    }

    #[test]
    fn test_reset_loops_back_to_idle() {
        let mut counter = TickCounter::new(TickPolicy::bounded(5, 0));
        counter.start();
        for _ in 0..5 {
            counter.tick();
        }
        assert_eq!(counter.state(), TickState::Stopped);

        assert!(counter.reset());
        assert_eq!(counter.state(), TickState::Idle);
        assert_eq!(counter.elapsed(), 0);
        assert!(counter.start());
    }

    #[test]
    fn test_unbounded_keeps_counting() {
        let mut counter = TickCounter::new(TickPolicy::unbounded());
        counter.start();
        for _ in 0..1000 {
            counter.tick();
        }
        assert_eq!(counter.elapsed(), 1000);
        assert_eq!(counter.stop(), StopOutcome::Kept(1000));
    }
}
