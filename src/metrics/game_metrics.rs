use std::time::{Duration, Instant};

use crate::session::LoopPhase;

/// Play-time clock and game counter for the header.
///
/// The clock only runs while the loop is `Running`: pausing freezes it and a
/// reset zeroes it.
pub struct GameMetrics {
    running_since: Option<Instant>,
    banked: Duration,
    last_phase: LoopPhase,
    pub games_played: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            running_since: None,
            banked: Duration::ZERO,
            last_phase: LoopPhase::Idle,
            games_played: 0,
        }
    }

    /// Follow the loop's phase; call after anything that may change it
    pub fn observe(&mut self, phase: LoopPhase) {
        if phase == self.last_phase {
            return;
        }

        match phase {
            LoopPhase::Running => {
                self.running_since = Some(Instant::now());
            }
            LoopPhase::Paused => self.bank(),
            LoopPhase::GameOver => {
                self.bank();
                self.games_played += 1;
            }
            LoopPhase::Idle => {
                self.running_since = None;
                self.banked = Duration::ZERO;
            }
        }

        self.last_phase = phase;
    }

    pub fn elapsed(&self) -> Duration {
        self.banked
            + self
                .running_since
                .map_or(Duration::ZERO, |since| since.elapsed())
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed().as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }

    fn bank(&mut self) {
        if let Some(since) = self.running_since.take() {
            self.banked += since.elapsed();
        }
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_formatting() {
        let mut metrics = GameMetrics::new();
        metrics.banked = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.banked = Duration::from_secs(0);
        assert_eq!(metrics.format_time(), "00:00");

        metrics.banked = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_clock_stopped_until_running() {
        let mut metrics = GameMetrics::new();
        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(metrics.elapsed(), Duration::ZERO);

        metrics.observe(LoopPhase::Running);
        std::thread::sleep(Duration::from_millis(20));
        assert!(metrics.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_pause_freezes_clock() {
        let mut metrics = GameMetrics::new();
        metrics.observe(LoopPhase::Running);
        std::thread::sleep(Duration::from_millis(20));
        metrics.observe(LoopPhase::Paused);

        let frozen = metrics.elapsed();
        std::thread::sleep(Duration::from_millis(30));
        assert_eq!(metrics.elapsed(), frozen);

        metrics.observe(LoopPhase::Running);
        std::thread::sleep(Duration::from_millis(10));
        assert!(metrics.elapsed() >= frozen + Duration::from_millis(10));
    }

    #[test]
    fn test_game_over_counts_and_reset_clears() {
        let mut metrics = GameMetrics::new();
        metrics.observe(LoopPhase::Running);
        metrics.observe(LoopPhase::GameOver);
        // Repeated observation of the same phase is not a new game
        metrics.observe(LoopPhase::GameOver);
        assert_eq!(metrics.games_played, 1);

        metrics.observe(LoopPhase::Idle);
        assert_eq!(metrics.elapsed(), Duration::ZERO);
        assert_eq!(metrics.games_played, 1);
    }
}
