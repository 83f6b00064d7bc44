// Integration tests for the splash sequencer, run on a paused tokio clock

use echome::config::SplashConfig;
use echome::timer::TokioClock;
use echome::SplashSequencer;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep, Instant};

fn counting_splash(config: &SplashConfig) -> (SplashSequencer, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let splash = SplashSequencer::start(config, Arc::new(TokioClock), move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    (splash, calls)
}

#[tokio::test(start_paused = true)]
async fn test_completion_fires_once_after_visible_and_exit() {
    let configs = [(2000, 500), (2500, 600), (2700, 700), (3000, 700)];

    for (visible_ms, exit_ms) in configs {
        let config = SplashConfig { visible_ms, exit_ms };
        let started = Instant::now();
        let (splash, calls) = counting_splash(&config);

        sleep(Duration::from_millis(visible_ms - 50)).await;
        assert!(splash.is_visible());
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        sleep(Duration::from_millis(100)).await;
        assert!(!splash.is_visible(), "hidden after {}ms", visible_ms);
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        sleep(Duration::from_millis(exit_ms)).await;
        assert!(splash.is_complete());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(started.elapsed() >= Duration::from_millis(visible_ms + exit_ms));

        sleep(Duration::from_secs(10)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}

#[tokio::test(start_paused = true)]
async fn test_drop_while_visible_cancels_completion() {
    let (splash, calls) = counting_splash(&SplashConfig::default());

    sleep(Duration::from_secs(1)).await;
    drop(splash);

    sleep(Duration::from_secs(10)).await;
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn test_drop_during_exit_animation_cancels_completion() {
    let (splash, calls) = counting_splash(&SplashConfig::default());

    sleep(Duration::from_millis(3000)).await;
    assert!(!splash.is_visible());
    drop(splash);

    sleep(Duration::from_secs(10)).await;
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}
