#[cfg(test)]
use std::sync::Mutex;
use std::time::{Duration, Instant};
use async_trait::async_trait;

/// Time source for the send loop
#[async_trait]
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;

    async fn sleep(&self, duration: Duration);
}

/// Wall clock backed by tokio's timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Virtual clock: sleeping advances time instantly, and every reading
/// advances it by a fixed tick so a busy loop still makes progress.
#[cfg(test)]
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<Instant>,
    tick: Duration,
}

#[cfg(test)]
impl ManualClock {
    pub fn new(tick: Duration) -> Self {
        ManualClock {
            now: Mutex::new(Instant::now()),
            tick,
        }
    }

    pub fn advance(&self, duration: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += duration;
    }
}

#[cfg(test)]
#[async_trait]
impl Clock for ManualClock {
    fn now(&self) -> Instant {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += self.tick;
        *now
    }

    async fn sleep(&self, duration: Duration) {
        self.advance(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_manual_clock_advances() {
        let clock = ManualClock::new(Duration::from_millis(1));
        let t0 = clock.now();
        let t1 = clock.now();
        assert_eq!(t1 - t0, Duration::from_millis(1));

        clock.sleep(Duration::from_secs(2)).await;
        let t2 = clock.now();
        assert_eq!(t2 - t1, Duration::from_millis(2001));
    }

    #[tokio::test]
    async fn test_tokio_clock_sleeps() {
        let clock = TokioClock;
        let t0 = clock.now();
        clock.sleep(Duration::from_millis(20)).await;
        assert!(clock.now() - t0 >= Duration::from_millis(20));
    }
}
