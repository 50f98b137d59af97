//! Cancellable periodic timer with a replaceable period.
//!
//! A [`Ticker`] holds at most one schedule. Starting it again replaces the
//! schedule instead of adding a second one, so there is never more than one
//! live timer. The first deadline of a schedule is fixed the first time
//! [`Ticker::tick`] is polled, which lets the ticker be configured outside a
//! tokio runtime.

use std::time::Duration;
use tokio::time::{Instant, sleep_until};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Schedule {
    period: Duration,
    deadline: Option<Instant>,
}

#[derive(Debug, Default)]
pub struct Ticker {
    schedule: Option<Schedule>,
}

impl Ticker {
    pub fn new() -> Self {
        Self { schedule: None }
    }

    /// Start ticking every `period`, replacing any running schedule.
    /// The first tick fires one full period after the next poll.
    pub fn start(&mut self, period: Duration) {
        self.schedule = Some(Schedule {
            period,
            deadline: None,
        });
    }

    /// Swap the period of a running ticker. A stopped ticker stays stopped.
    pub fn restart(&mut self, period: Duration) {
        if self.is_active() {
            self.start(period);
        }
    }

    pub fn stop(&mut self) {
        self.schedule = None;
    }

    pub fn is_active(&self) -> bool {
        self.schedule.is_some()
    }

    pub fn period(&self) -> Option<Duration> {
        self.schedule.map(|schedule| schedule.period)
    }

    /// Wait for the next tick. Never completes while stopped.
    ///
    /// Cancel-safe: dropping the future keeps the pending deadline, so a
    /// `select!` branch that loses the race does not shift the schedule.
    pub async fn tick(&mut self) {
        let Some(schedule) = self.schedule.as_mut() else {
            return std::future::pending().await;
        };

        let period = schedule.period;
        let deadline = *schedule
            .deadline
            .get_or_insert_with(|| Instant::now() + period);
        sleep_until(deadline).await;

        // `start`/`stop` need `&mut self`, so the schedule is unchanged here
        if let Some(schedule) = self.schedule.as_mut() {
            schedule.deadline = Some(deadline + schedule.period);
        }
    }
}
