//! Beat scheduling state machine
//!
//! A beat is either idle or draining a queued pulse into the scroll buffer.
//! The end of a beat, not its start, is the reference point for the next one.

use std::collections::VecDeque;
use std::time::Instant;

use crate::timing::TimingConfig;

/// Phase of the beat state machine
#[derive(Debug, Clone, PartialEq)]
enum Phase {
    /// No pulse pending
    Idle,
    /// A pulse is being appended to the buffer across frames
    Draining { remaining: VecDeque<f32> },
}

#[derive(Debug)]
pub struct BeatState {
    phase: Phase,
    last_beat_at: Instant,
}

impl BeatState {
    pub fn new(now: Instant) -> Self {
        Self {
            phase: Phase::Idle,
            last_beat_at: now,
        }
    }

    pub fn is_draining(&self) -> bool {
        matches!(self.phase, Phase::Draining { .. })
    }

    pub fn last_beat_at(&self) -> Instant {
        self.last_beat_at
    }

    /// Samples still queued for the pulse in flight
    pub fn remaining(&self) -> usize {
        match &self.phase {
            Phase::Idle => 0,
            Phase::Draining { remaining } => remaining.len(),
        }
    }

    /// Is a new beat due at `now`? Never while a pulse is still draining.
    pub fn needs_beat(&self, now: Instant, timing: &TimingConfig) -> bool {
        !self.is_draining() && timing.beat_due(self.last_beat_at, now)
    }

    /// Queue a freshly synthesized pulse for draining
    pub fn start(&mut self, pulse: Vec<f32>) {
        log::debug!("Beat started with {} pulse samples", pulse.len());
        self.phase = Phase::Draining {
            remaining: pulse.into(),
        };
    }

    /// Take up to `count` samples off the front of the queued pulse
    ///
    /// Any pull that yields fewer samples than requested ends the beat, even
    /// if it happened before the pulse was visually complete. The beat clock
    /// then restarts at `now`.
    pub fn pull(&mut self, count: usize, now: Instant) -> Vec<f32> {
        let Phase::Draining { remaining } = &mut self.phase else {
            return Vec::new();
        };

        let take = count.min(remaining.len());
        let pulled: Vec<f32> = remaining.drain(..take).collect();

        if pulled.len() < count {
            log::debug!(
                "Beat finished ({} of {} requested samples on final pull)",
                pulled.len(),
                count
            );
            self.phase = Phase::Idle;
            self.last_beat_at = now;
        }

        pulled
    }
}
