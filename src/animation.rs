use std::collections::VecDeque;
use std::f64::consts::PI;
use tracing::{debug, info};
use crate::constants::*;

/// A single eased move of the divider, in percent over milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animation {
    pub start: f32,
    pub end: f32,
    pub duration: f64,
}

pub const DEMONSTRATION_SEQUENCE: [Animation; 3] = [
    Animation { start: START_POSITION, end: END_POSITION_1, duration: DEFAULT_DURATION },
    // Hold, expressed as a move that goes nowhere
    Animation { start: END_POSITION_1, end: END_POSITION_1, duration: PAUSE_DURATION },
    Animation { start: END_POSITION_1, end: END_POSITION_2, duration: DEFAULT_DURATION },
];

/// Cosine ease-in-out: maps a time fraction in [0, 1] onto a distance fraction.
pub fn ease(x: f64) -> f64 {
    ((x * PI - PI / 2.0).sin() + 1.0) / 2.0
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum DemonstrationState {
    Idle,                     // Nothing queued
    Waiting { fire_at: f64 }, // Delay before the first frame
    Running,                  // Stepping once per frame
}

/// Plays a queue of animations, one frame at a time.
#[derive(Debug)]
pub struct Demonstration {
    state: DemonstrationState,
    queue: VecDeque<Animation>,
    current: Option<Animation>,
    started_at: Option<f64>,
}

impl Default for Demonstration {
    fn default() -> Self {
        Self::new()
    }
}

impl Demonstration {
    pub fn new() -> Self {
        Self {
            state: DemonstrationState::Idle,
            queue: VecDeque::new(),
            current: None,
            started_at: None,
        }
    }

    pub fn state(&self) -> DemonstrationState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state != DemonstrationState::Idle
    }

    /// Queues the demonstration sequence to start `DEMONSTRATION_DELAY` ms after `now`.
    pub fn schedule(&mut self, now: f64) {
        self.queue = DEMONSTRATION_SEQUENCE.into_iter().collect();
        if self.state == DemonstrationState::Idle {
            self.state = DemonstrationState::Waiting { fire_at: now + DEMONSTRATION_DELAY };
        }
        info!(start_in_ms = DEMONSTRATION_DELAY, "demonstration scheduled");
    }

    /// Advances timers and runs one frame. Returns the new position when a frame ran.
    pub fn tick(&mut self, timestamp: f64) -> Option<f32> {
        match self.state {
            DemonstrationState::Idle => None,
            DemonstrationState::Waiting { fire_at } if timestamp < fire_at => None,
            DemonstrationState::Waiting { .. } => {
                self.state = DemonstrationState::Running;
                self.step(timestamp)
            }
            DemonstrationState::Running => self.step(timestamp),
        }
    }

    fn step(&mut self, timestamp: f64) -> Option<f32> {
        let phase = match self.current {
            Some(phase) => phase,
            None => {
                let Some(next) = self.queue.pop_front() else {
                    self.state = DemonstrationState::Idle;
                    return None;
                };
                debug!(start = next.start, end = next.end, duration = next.duration, "animation phase started");
                self.current = Some(next);
                next
            }
        };

        let started_at = *self.started_at.get_or_insert(timestamp);
        let elapsed = timestamp - started_at;

        if elapsed >= phase.duration {
            self.current = None;
            self.started_at = None;
            if self.queue.is_empty() {
                self.state = DemonstrationState::Idle;
                info!("demonstration finished");
            }
            return Some(phase.end);
        }

        let progress = ease(elapsed / phase.duration) as f32;
        Some(phase.start + (phase.end - phase.start) * progress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const FRAME: f64 = 16.0;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn ease_boundaries() {
        assert!(ease(0.0).abs() < 1e-12);
        assert!((ease(0.5) - 0.5).abs() < 1e-12);
        assert!((ease(1.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn waits_for_delay() {
        let mut demo = Demonstration::new();
        demo.schedule(0.0);
        assert_eq!(demo.tick(100.0), None);
        assert_eq!(demo.tick(499.0), None);
        assert_eq!(demo.state(), DemonstrationState::Waiting { fire_at: 500.0 });
        assert_eq!(demo.tick(500.0), Some(START_POSITION));
        assert_eq!(demo.state(), DemonstrationState::Running);
    }

    #[test]
    fn samples_of_demonstration() {
        let mut demo = Demonstration::new();
        demo.schedule(0.0);
        demo.tick(500.0);

        assert!(close(demo.tick(900.0).unwrap_or(f32::NAN), 45.0));
        assert_eq!(demo.tick(1300.0), Some(END_POSITION_1));

        // The hold keeps the divider still for its full duration
        assert_eq!(demo.tick(1300.0 + FRAME), Some(END_POSITION_1));
        assert_eq!(demo.tick(1310.0 + FRAME), Some(END_POSITION_1));
        assert_eq!(demo.tick(1300.0 + FRAME + PAUSE_DURATION), Some(END_POSITION_1));

        let third_start = 1300.0 + 2.0 * FRAME + PAUSE_DURATION;
        assert_eq!(demo.tick(third_start), Some(END_POSITION_1));
        let midway = demo.tick(third_start + 400.0).unwrap_or(f32::NAN);
        assert!(close(midway, 57.5));
        assert_eq!(demo.tick(third_start + 800.0), Some(END_POSITION_2));
        assert!(!demo.is_running());
        assert_eq!(demo.tick(third_start + 1000.0), None);
    }

    #[test]
    fn frame_by_frame_run_ends_at_last_position() {
        let mut demo = Demonstration::new();
        demo.schedule(0.0);
        let mut t = 0.0;
        let mut last = None;
        while t < 5_000.0 {
            if let Some(p) = demo.tick(t) {
                assert!((END_POSITION_1..=END_POSITION_2).contains(&p) || close(p, START_POSITION));
                last = Some(p);
            }
            t += FRAME;
        }
        assert_eq!(last, Some(END_POSITION_2));
        assert_eq!(demo.state(), DemonstrationState::Idle);
    }

    #[test]
    fn schedule_while_running_restarts_queue() {
        let mut demo = Demonstration::new();
        demo.schedule(0.0);
        demo.tick(500.0);
        demo.tick(1300.0);
        demo.schedule(1300.0);
        // Already running: the new queue is consumed on the next frame
        assert_eq!(demo.tick(1310.0), Some(START_POSITION));
    }

    proptest! {
        #[test]
        fn ease_is_monotonic_and_bounded(a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(ease(lo) <= ease(hi) + 1e-12);
            prop_assert!((-1e-12..=1.0 + 1e-12).contains(&ease(lo)));
        }
    }
}
