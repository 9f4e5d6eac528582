//! Solo-mode round clock.
//!
//! The clock only counts; something else decides when a second has passed
//! (the session actor's interval in production, the test itself in unit
//! tests).

use serde::{Deserialize, Serialize};

use super::entities::Seconds;

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct SoloTimer {
    elapsed_seconds: Seconds,
    running: bool,
}

impl SoloTimer {
    /// Resets to zero and starts counting.
    pub fn start(&mut self) {
        self.elapsed_seconds = 0;
        self.running = true;
    }

    /// Counts one second. Returns false when the clock isn't running.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.elapsed_seconds = self.elapsed_seconds.saturating_add(1);
        true
    }

    /// Freezes the elapsed time. A stopped clock only runs again after
    /// another [`SoloTimer::start`].
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn elapsed_seconds(&self) -> Seconds {
        self.elapsed_seconds
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_timer_ignores_ticks() {
        let mut timer = SoloTimer::default();
        assert!(!timer.tick());
        assert_eq!(timer.elapsed_seconds(), 0);
    }

    #[test]
    fn test_start_resets_elapsed() {
        let mut timer = SoloTimer::default();
        timer.start();
        timer.tick();
        timer.tick();
        assert_eq!(timer.elapsed_seconds(), 2);

        timer.start();
        assert_eq!(timer.elapsed_seconds(), 0);
        assert!(timer.is_running());
    }

    #[test]
    fn test_stopped_timer_stays_frozen() {
        let mut timer = SoloTimer::default();
        timer.start();
        timer.tick();
        timer.stop();
        assert!(!timer.tick());
        assert_eq!(timer.elapsed_seconds(), 1);
    }
}
