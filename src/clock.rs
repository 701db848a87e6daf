//! Ping-pong animation of the curve parameter `t`.
//!
//! The clock holds an integer phase in `0..=sweep_steps` and reports
//! `t = phase / sweep_steps`.  Each [`advance`](AnimationClock::advance)
//! moves the phase one step in the current direction; hitting either bound
//! reverses the direction, so `t` sweeps `0 → 1 → 0 → …` instead of
//! wrapping around.

use std::time::Duration;

/// Ticks per `0 → 1` sweep; a step of `0.01` in `t`.
pub const DEFAULT_SWEEP_STEPS: u32 = 100;
/// Frame rate used when nothing else is configured.
pub const DEFAULT_FPS: u32 = 30;
/// Frame rate change per speed button press.
pub const FPS_STEP: u32 = 10;
/// Lowest frame rate reachable through [`AnimationClock::speed_down`].
pub const MIN_FPS: u32 = 10;

/// Direction of travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sweep {
    Forward,
    Backward,
}

/// Animation parameter state.
#[derive(Debug, Clone)]
pub struct AnimationClock {
    phase: u32,
    sweep_steps: u32,
    sweep: Sweep,
    running: bool,
    fps: u32,
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::new(DEFAULT_FPS, DEFAULT_SWEEP_STEPS)
    }
}

impl AnimationClock {
    /// A running clock at `t = 0` moving forward.
    ///
    /// `fps` is raised to [`MIN_FPS`] and `sweep_steps` of zero to one.
    pub fn new(fps: u32, sweep_steps: u32) -> Self {
        Self {
            phase: 0,
            sweep_steps: sweep_steps.max(1),
            sweep: Sweep::Forward,
            running: true,
            fps: fps.max(MIN_FPS),
        }
    }

    /// Current curve parameter in `[0, 1]`.
    pub fn t(&self) -> f64 {
        f64::from(self.phase) / f64::from(self.sweep_steps)
    }

    /// Size of one advance in `t`.
    pub fn step(&self) -> f64 {
        1.0 / f64::from(self.sweep_steps)
    }

    pub fn sweep(&self) -> Sweep {
        self.sweep
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn play(&mut self) {
        self.running = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Move `t` one step, reversing at either bound.
    ///
    /// Does nothing while paused.
    pub fn advance(&mut self) {
        if !self.running {
            return;
        }
        match self.sweep {
            Sweep::Forward => {
                self.phase = (self.phase + 1).min(self.sweep_steps);
                if self.phase == self.sweep_steps {
                    self.sweep = Sweep::Backward;
                }
            }
            Sweep::Backward => {
                self.phase = self.phase.saturating_sub(1);
                if self.phase == 0 {
                    self.sweep = Sweep::Forward;
                }
            }
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Time budget of one frame at the current rate.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_micros(1_000_000 / u64::from(self.fps))
    }

    /// Raise the frame rate by [`FPS_STEP`].  There is no upper bound.
    pub fn speed_up(&mut self) -> u32 {
        self.fps = self.fps.saturating_add(FPS_STEP);
        self.fps
    }

    /// Lower the frame rate by [`FPS_STEP`], never below [`MIN_FPS`].
    pub fn speed_down(&mut self) -> u32 {
        self.fps = self.fps.saturating_sub(FPS_STEP).max(MIN_FPS);
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_running_at_zero() {
        let clock = AnimationClock::default();
        assert!(clock.is_running());
        assert_eq!(clock.t(), 0.0);
        assert_eq!(clock.sweep(), Sweep::Forward);
        assert_eq!(clock.step(), 0.01);
    }

    #[test]
    fn reaches_one_after_full_sweep_then_reverses() {
        let mut clock = AnimationClock::default();
        for i in 1..=100 {
            clock.advance();
            assert!((0.0..=1.0).contains(&clock.t()), "t out of range at {}", i);
            if i < 100 {
                assert_eq!(clock.sweep(), Sweep::Forward);
            }
        }
        assert_eq!(clock.t(), 1.0);
        assert_eq!(clock.sweep(), Sweep::Backward);

        clock.advance();
        assert_eq!(clock.t(), 0.99);
        assert_eq!(clock.sweep(), Sweep::Backward);
    }

    #[test]
    fn ping_pongs_without_leaving_unit_interval() {
        let mut clock = AnimationClock::default();
        let mut prev = clock.t();
        for _ in 0..450 {
            clock.advance();
            let t = clock.t();
            assert!((0.0..=1.0).contains(&t));
            assert!((t - prev).abs() <= clock.step() + 1e-12);
            prev = t;
        }
        // 450 = 4 full sweeps + 50: forward again and halfway up.
        assert_eq!(clock.t(), 0.5);
        assert_eq!(clock.sweep(), Sweep::Forward);
    }

    #[test]
    fn returns_to_zero_and_flips_forward() {
        let mut clock = AnimationClock::default();
        for _ in 0..200 {
            clock.advance();
        }
        assert_eq!(clock.t(), 0.0);
        assert_eq!(clock.sweep(), Sweep::Forward);
    }

    #[test]
    fn paused_clock_is_frozen() {
        let mut clock = AnimationClock::default();
        clock.advance();
        clock.pause();
        for _ in 0..10 {
            clock.advance();
        }
        assert_eq!(clock.t(), 0.01);
        clock.play();
        clock.advance();
        assert_eq!(clock.t(), 0.02);
    }

    #[test]
    fn speed_down_floors_at_min() {
        let mut clock = AnimationClock::new(30, DEFAULT_SWEEP_STEPS);
        assert_eq!(clock.speed_down(), 20);
        assert_eq!(clock.speed_down(), 10);
        assert_eq!(clock.speed_down(), 10);
        let mut slow = AnimationClock::new(15, DEFAULT_SWEEP_STEPS);
        assert_eq!(slow.speed_down(), 10);
    }

    #[test]
    fn starts_no_slower_than_min_fps() {
        let mut clock = AnimationClock::new(5, DEFAULT_SWEEP_STEPS);
        assert_eq!(clock.fps(), MIN_FPS);
        assert_eq!(clock.speed_down(), MIN_FPS);
        assert_eq!(AnimationClock::new(0, DEFAULT_SWEEP_STEPS).fps(), MIN_FPS);
    }

    #[test]
    fn speed_up_is_unbounded() {
        let mut clock = AnimationClock::new(30, DEFAULT_SWEEP_STEPS);
        for _ in 0..20 {
            clock.speed_up();
        }
        assert_eq!(clock.fps(), 230);
    }

    #[test]
    fn frame_interval_follows_fps() {
        let clock = AnimationClock::new(20, DEFAULT_SWEEP_STEPS);
        assert_eq!(clock.frame_interval(), Duration::from_millis(50));
    }
}
