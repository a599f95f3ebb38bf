//! Rolling sample buffer behind the trace
//!
//! The buffer holds one vertical offset per pixel column. Each frame it
//! takes pulse samples from the beat in flight (or starts a new beat), drops
//! the oldest columns off the front and pads the back with the baseline, so
//! it ends every frame exactly one surface wide.

use std::collections::VecDeque;
use std::time::Instant;

use crate::beat::BeatState;
use crate::pulse::{self, PulseProfile};
use crate::timing::TimingConfig;

#[derive(Debug)]
pub struct ScrollBuffer {
    samples: VecDeque<f32>,
    width: usize,
    profile: PulseProfile,
    beat: BeatState,
}

impl ScrollBuffer {
    /// Buffer `width` columns wide, flat at the profile baseline
    pub fn new(width: usize, profile: PulseProfile, now: Instant) -> Self {
        Self {
            samples: std::iter::repeat_n(profile.baseline, width).collect(),
            width,
            profile,
            beat: BeatState::new(now),
        }
    }

    pub fn samples(&self) -> &VecDeque<f32> {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn profile(&self) -> &PulseProfile {
        &self.profile
    }

    pub fn beat(&self) -> &BeatState {
        &self.beat
    }

    /// Advance the buffer by `handled` columns at `now`
    pub fn advance(&mut self, handled: usize, now: Instant, timing: &TimingConfig) {
        if self.beat.is_draining() {
            let pulled = self.beat.pull(handled, now);
            self.samples.extend(pulled);
        } else if self.beat.needs_beat(now, timing) {
            let samples = timing.pulse_width_in_samples(self.width);
            self.beat.start(pulse::synthesize(samples, &self.profile));
        }

        self.trim_front(handled);
        self.fill_to_width();
    }

    /// Drop `handled` columns off the front once the buffer has grown past
    /// the surface width
    pub fn trim_front(&mut self, handled: usize) {
        if self.samples.len() <= self.width {
            return;
        }
        let excess = self.samples.len() - self.width;
        let count = handled.max(excess).min(self.samples.len());
        self.samples.drain(..count);
    }

    /// Pad the back with the baseline until the buffer is one surface wide
    pub fn fill_to_width(&mut self) {
        let missing = self.width.saturating_sub(self.samples.len());
        self.samples
            .extend(std::iter::repeat_n(self.profile.baseline, missing));
    }
}
