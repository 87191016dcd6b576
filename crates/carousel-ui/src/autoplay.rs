//! Autoplay timer.
//!
//! Works like a blink timer: the scheduler only records when the next tick
//! is due and the host calls [`AutoplayScheduler::tick`] from its event loop
//! (or sleeps until [`AutoplayScheduler::next_tick_time`]). No redraws are
//! requested between ticks.

use web_time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct AutoplayScheduler {
    interval: Duration,
    next_tick: Option<Instant>,
    running: bool,
    paused: bool,
}

impl AutoplayScheduler {
    /// Creates an idle scheduler; call [`start`](Self::start) to arm it.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_tick: None,
            running: false,
            paused: false,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Arms the timer one interval from `now`. Restarting resets the countdown.
    pub fn start(&mut self, now: Instant) {
        self.running = true;
        self.next_tick = (!self.paused).then(|| now + self.interval);
    }

    /// Disarms the timer entirely.
    pub fn stop(&mut self) {
        self.running = false;
        self.paused = false;
        self.next_tick = None;
    }

    /// Suspends ticking without forgetting that autoplay is on.
    pub fn pause(&mut self) {
        self.paused = true;
        self.next_tick = None;
    }

    /// Resumes with a fresh interval; time spent paused is not caught up.
    pub fn resume(&mut self, now: Instant) {
        if !self.paused {
            return;
        }
        self.paused = false;
        if self.running {
            self.next_tick = Some(now + self.interval);
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// `true` when a tick is scheduled.
    pub fn is_active(&self) -> bool {
        self.next_tick.is_some()
    }

    /// Returns `true` once per elapsed interval. A late call fires a single
    /// tick and schedules the next one a full interval after `now`.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.next_tick {
            Some(due) if now >= due => {
                self.next_tick = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }

    /// When the host should wake up for the next tick.
    pub fn next_tick_time(&self) -> Option<Instant> {
        self.next_tick
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(3000);

    #[test]
    fn new_scheduler_is_idle() {
        let scheduler = AutoplayScheduler::new(DELAY);
        assert!(!scheduler.is_running());
        assert!(!scheduler.is_active());
        assert_eq!(scheduler.next_tick_time(), None);
    }

    #[test]
    fn ticks_once_per_interval() {
        let start = Instant::now();
        let mut scheduler = AutoplayScheduler::new(DELAY);
        scheduler.start(start);

        assert!(!scheduler.tick(start + Duration::from_millis(2999)));
        assert!(scheduler.tick(start + DELAY));
        assert!(!scheduler.tick(start + DELAY + Duration::from_millis(1)));
        assert_eq!(scheduler.next_tick_time(), Some(start + DELAY * 2));
    }

    #[test]
    fn late_tick_does_not_catch_up() {
        let start = Instant::now();
        let mut scheduler = AutoplayScheduler::new(DELAY);
        scheduler.start(start);

        let late = start + DELAY * 5;
        assert!(scheduler.tick(late));
        assert!(!scheduler.tick(late));
        assert_eq!(scheduler.next_tick_time(), Some(late + DELAY));
    }

    #[test]
    fn pause_suspends_and_resume_starts_fresh_interval() {
        let start = Instant::now();
        let mut scheduler = AutoplayScheduler::new(DELAY);
        scheduler.start(start);

        scheduler.pause();
        assert!(scheduler.is_paused());
        assert!(scheduler.is_running());
        assert!(!scheduler.tick(start + DELAY * 2));

        let resumed_at = start + DELAY * 2;
        scheduler.resume(resumed_at);
        assert!(!scheduler.tick(resumed_at + Duration::from_millis(10)));
        assert!(scheduler.tick(resumed_at + DELAY));
    }

    #[test]
    fn start_while_paused_waits_for_resume() {
        let start = Instant::now();
        let mut scheduler = AutoplayScheduler::new(DELAY);
        scheduler.pause();
        scheduler.start(start);
        assert!(!scheduler.is_active());

        scheduler.resume(start);
        assert_eq!(scheduler.next_tick_time(), Some(start + DELAY));
    }

    #[test]
    fn stop_clears_everything() {
        let start = Instant::now();
        let mut scheduler = AutoplayScheduler::new(DELAY);
        scheduler.start(start);
        scheduler.pause();
        scheduler.stop();
        scheduler.resume(start);
        assert!(!scheduler.is_running());
        assert!(!scheduler.is_active());
    }
}
