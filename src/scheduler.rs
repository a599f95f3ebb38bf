//! Frame scheduling
//!
//! [`FrameLoop`] invokes a [`Tickable`] once per frame, either paced against
//! the wall clock or on a simulated clock that advances by exactly one frame
//! interval per tick.

use std::time::{Duration, Instant};

use anyhow::Result;

use crate::monitor::Tickable;

/// How frame timestamps are produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    /// Sleep between frames and tick with `Instant::now()`
    Realtime,
    /// Tick back to back with timestamps one frame interval apart
    Simulated,
}

#[derive(Debug, Clone)]
pub struct FrameLoop {
    frame_interval: Duration,
    pacing: Pacing,
    frame_limit: Option<u64>,
}

impl FrameLoop {
    pub fn new(frames_per_second: u32, pacing: Pacing) -> Self {
        Self {
            frame_interval: Duration::from_secs(1) / frames_per_second.max(1),
            pacing,
            frame_limit: None,
        }
    }

    /// Stop after `frames` ticks instead of running until interrupted
    pub fn with_frame_limit(mut self, frames: u64) -> Self {
        self.frame_limit = Some(frames);
        self
    }

    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    /// Drive `target` starting from `start`, calling `after_tick` with the
    /// frame number (from 1) once each tick has completed
    ///
    /// Returns the number of frames run. An error from `after_tick` stops the
    /// loop.
    pub fn run<T, F>(&self, target: &mut T, start: Instant, mut after_tick: F) -> Result<u64>
    where
        T: Tickable,
        F: FnMut(&mut T, u64) -> Result<()>,
    {
        let mut frame = 0u64;
        let mut next_deadline = start + self.frame_interval;

        while self.frame_limit.is_none_or(|limit| frame < limit) {
            frame += 1;

            let now = match self.pacing {
                Pacing::Simulated => next_deadline,
                Pacing::Realtime => {
                    let now = Instant::now();
                    if let Some(wait) = next_deadline.checked_duration_since(now) {
                        std::thread::sleep(wait);
                    }
                    Instant::now()
                }
            };
            next_deadline += self.frame_interval;

            target.on_tick(now);
            after_tick(target, frame)?;
        }

        log::debug!("Frame loop finished after {} frames", frame);
        Ok(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        ticks: Vec<Instant>,
    }

    impl Tickable for Recorder {
        fn on_tick(&mut self, now: Instant) {
            self.ticks.push(now);
        }
    }

    #[test]
    fn test_frame_interval() {
        let frame_loop = FrameLoop::new(50, Pacing::Simulated);
        assert_eq!(frame_loop.frame_interval(), Duration::from_millis(20));
        let frame_loop = FrameLoop::new(0, Pacing::Simulated);
        assert_eq!(frame_loop.frame_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_simulated_ticks_are_evenly_spaced() {
        let start = Instant::now();
        let mut recorder = Recorder::default();
        let frames = FrameLoop::new(50, Pacing::Simulated)
            .with_frame_limit(4)
            .run(&mut recorder, start, |_, _| Ok(()))
            .unwrap();

        assert_eq!(frames, 4);
        let expected: Vec<Instant> = (1..=4)
            .map(|i| start + Duration::from_millis(20 * i))
            .collect();
        assert_eq!(recorder.ticks, expected);
    }

    #[test]
    fn test_realtime_ticks_move_forward() {
        let start = Instant::now();
        let mut recorder = Recorder::default();
        FrameLoop::new(500, Pacing::Realtime)
            .with_frame_limit(3)
            .run(&mut recorder, start, |_, _| Ok(()))
            .unwrap();

        assert_eq!(recorder.ticks.len(), 3);
        assert!(recorder.ticks.windows(2).all(|w| w[0] <= w[1]));
        assert!(recorder.ticks[0] >= start + Duration::from_millis(2));
    }

    #[test]
    fn test_hook_error_stops_loop() {
        let mut recorder = Recorder::default();
        let result = FrameLoop::new(60, Pacing::Simulated)
            .with_frame_limit(10)
            .run(&mut recorder, Instant::now(), |_, frame| {
                if frame == 2 {
                    anyhow::bail!("stop");
                }
                Ok(())
            });

        assert!(result.is_err());
        assert_eq!(recorder.ticks.len(), 2);
    }
}
