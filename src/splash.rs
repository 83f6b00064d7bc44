use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::SplashConfig;
use crate::timer::{Clock, TickSource, TimerGuard};

/// Timed splash screen.
///
/// Visible from `start` until `visible_ms` elapses, then hidden; after a
/// further `exit_ms` the completion callback runs exactly once. Dropping the
/// sequencer before that point cancels the callback. A zero-length phase
/// passes without waiting for a tick.
pub struct SplashSequencer {
    visible: Arc<AtomicBool>,
    completed: Arc<AtomicBool>,
    _timer: TimerGuard,
}

impl SplashSequencer {
    pub fn start<F>(config: &SplashConfig, clock: Arc<dyn Clock>, on_complete: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let visible = Arc::new(AtomicBool::new(true));
        let completed = Arc::new(AtomicBool::new(false));

        // First source is issued now so the countdown starts at construction
        let shown = phase(clock.as_ref(), config.visible());
        let exit = config.exit();

        let task_visible = Arc::clone(&visible);
        let task_completed = Arc::clone(&completed);

        let timer = TimerGuard::spawn(async move {
            if !elapse(shown).await {
                return;
            }
            task_visible.store(false, Ordering::SeqCst);
            debug!("splash hidden, waiting {:?} for exit", exit);

            if !elapse(phase(clock.as_ref(), exit)).await {
                return;
            }
            task_completed.store(true, Ordering::SeqCst);
            info!("splash complete");
            on_complete();
        });

        Self {
            visible,
            completed,
            _timer: timer,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }

    pub fn is_complete(&self) -> bool {
        self.completed.load(Ordering::SeqCst)
    }
}

/// Source for one phase; `None` when the phase has no length
fn phase(clock: &dyn Clock, length: Duration) -> Option<Box<dyn TickSource>> {
    (!length.is_zero()).then(|| clock.ticks(length))
}

async fn elapse(source: Option<Box<dyn TickSource>>) -> bool {
    match source {
        Some(mut source) => source.next_tick().await,
        None => true,
    }
}
