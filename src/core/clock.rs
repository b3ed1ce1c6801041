use std::time::{Duration, Instant};

use spin_sleep::SpinSleeper;
use tracing::warn;

/// Target tick rate of the frame loop.
pub const FRAME_RATE: u32 = 60;

/// Best-effort periodic trigger for the frame loop.
///
/// `wait` blocks until the next deadline. There is deliberately no drift or
/// catch-up compensation: when a tick overruns its period the next deadline
/// is rescheduled from the present, so a slow frame means one longer gap,
/// never a burst of backlogged ticks. Overruns are logged so jitter stays
/// diagnosable.
pub struct FrameClock {
    period: Duration,
    sleeper: SpinSleeper,
    deadline: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::with_period(Duration::from_secs(1) / FRAME_RATE)
    }

    pub fn with_period(period: Duration) -> Self {
        FrameClock {
            period,
            sleeper: SpinSleeper::default(),
            deadline: Instant::now() + period,
        }
    }

    /// Block until the next tick is due.
    pub fn wait(&mut self) {
        let now = Instant::now();
        if now < self.deadline {
            self.sleeper.sleep(self.deadline - now);
            self.deadline += self.period;
        } else {
            warn!("tick overran its period by {:?}", now - self.deadline);
            self.deadline = now + self.period;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn waits_out_the_period() {
        let period = Duration::from_millis(5);
        let mut clock = FrameClock::with_period(period);

        let start = Instant::now();
        clock.wait();
        clock.wait();

        assert!(start.elapsed() >= Duration::from_millis(9));
    }

    #[test]
    fn overrun_does_not_replay_backlog() {
        let period = Duration::from_millis(10);
        let mut clock = FrameClock::with_period(period);

        // Miss several deadlines' worth of time.
        thread::sleep(Duration::from_millis(50));

        let start = Instant::now();
        clock.wait();
        assert!(start.elapsed() < period);

        // The next wait is a full period out from "now", not from the
        // missed schedule.
        let start = Instant::now();
        clock.wait();
        assert!(start.elapsed() >= Duration::from_millis(9));
    }
}
