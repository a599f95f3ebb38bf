//! Timing parameters for the trace and the quantities derived from them
//!
//! Everything here is recomputed on every access, so changing a field between
//! two ticks takes effect on the next beat decision without any restart.

use std::time::{Duration, Instant};

/// Rate and visible window of the heartbeat trace
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingConfig {
    /// Heartbeats per minute
    pub beats_per_minute: f64,
    /// Seconds of trace visible across the full surface width
    pub visible_window_seconds: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            beats_per_minute: 60.0,
            visible_window_seconds: 10.0,
        }
    }
}

impl TimingConfig {
    pub fn new(beats_per_minute: f64, visible_window_seconds: f64) -> Self {
        Self {
            beats_per_minute,
            visible_window_seconds,
        }
    }

    /// Seconds between two beats, or `None` when the rate cannot produce a beat
    pub fn beat_interval_secs(&self) -> Option<f64> {
        let interval = 60.0 / self.beats_per_minute;
        (interval.is_finite() && interval > 0.0).then_some(interval)
    }

    /// Pixel width one heartbeat cycle occupies on a surface `surface_width` wide
    pub fn frame_in_pixels(&self, surface_width: usize) -> f64 {
        surface_width as f64 / ((self.visible_window_seconds * 60.0) / self.beats_per_minute)
    }

    /// Number of samples requested from the pulse synthesizer for one beat
    ///
    /// Grows with the rate and is capped at the surface width.
    pub fn pulse_width_in_samples(&self, surface_width: usize) -> usize {
        let frame = self.frame_in_pixels(surface_width).round();
        if frame.is_nan() || frame <= 0.0 {
            return 0;
        }
        if frame >= surface_width as f64 {
            return surface_width;
        }
        frame as usize
    }

    /// Buffer cells advanced in a frame that took `elapsed_ms`
    ///
    /// Returns `None` for a zero, negative or non-finite elapsed time so the
    /// caller can skip the advance instead of dividing by zero.
    pub fn handled_element_count(&self, elapsed_ms: f64) -> Option<usize> {
        if !elapsed_ms.is_finite() || elapsed_ms <= 0.0 {
            return None;
        }

        let count = ((self.visible_window_seconds * 1000.0) / elapsed_ms / 100.0).round();
        if count.is_finite() && count >= 0.0 {
            Some(count as usize)
        } else {
            None
        }
    }

    /// Has more than one beat interval passed between `since` and `now`?
    pub fn beat_due(&self, since: Instant, now: Instant) -> bool {
        let Some(interval) = self.beat_interval_secs() else {
            return false;
        };
        now.saturating_duration_since(since).as_secs_f64() > interval
    }
}

/// Milliseconds in a duration, as used by the per-frame arithmetic
pub fn as_millis_f64(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timing() {
        let timing = TimingConfig::default();
        assert_eq!(timing.beats_per_minute, 60.0);
        assert_eq!(timing.visible_window_seconds, 10.0);
        assert_eq!(timing.beat_interval_secs(), Some(1.0));
    }

    #[test]
    fn test_frame_in_pixels_tracks_rate() {
        let mut timing = TimingConfig::new(60.0, 10.0);
        assert_eq!(timing.frame_in_pixels(800), 80.0);
        assert_eq!(timing.pulse_width_in_samples(800), 80);

        // Twice the rate packs twice the pixels into each beat
        timing.beats_per_minute = 120.0;
        assert_eq!(timing.frame_in_pixels(800), 160.0);
        assert_eq!(timing.pulse_width_in_samples(800), 160);
    }

    #[test]
    fn test_pulse_width_capped_at_surface_width() {
        let timing = TimingConfig::new(1.0e12, 10.0);
        assert_eq!(timing.pulse_width_in_samples(800), 800);

        let timing = TimingConfig::new(60.0, 1.0e-9);
        assert_eq!(timing.pulse_width_in_samples(320), 320);

        let timing = TimingConfig::new(f64::INFINITY, 10.0);
        assert_eq!(timing.pulse_width_in_samples(640), 640);
    }

    #[test]
    fn test_handled_element_count_at_60fps() {
        let timing = TimingConfig::new(60.0, 10.0);
        // 10000 / 16 / 100 = 6.25
        assert_eq!(timing.handled_element_count(16.0), Some(6));
        // 10000 / 33 / 100 = 3.03
        assert_eq!(timing.handled_element_count(33.0), Some(3));
    }

    #[test]
    fn test_handled_element_count_rejects_degenerate_elapsed() {
        let timing = TimingConfig::default();
        assert_eq!(timing.handled_element_count(0.0), None);
        assert_eq!(timing.handled_element_count(-5.0), None);
        assert_eq!(timing.handled_element_count(f64::NAN), None);
    }

    #[test]
    fn test_zero_rate_never_beats() {
        let timing = TimingConfig::new(0.0, 10.0);
        let start = Instant::now();
        assert_eq!(timing.beat_interval_secs(), None);
        assert!(!timing.beat_due(start, start + Duration::from_secs(3600)));
        assert_eq!(timing.pulse_width_in_samples(800), 0);
    }

    #[test]
    fn test_beat_due_is_strictly_after_interval() {
        let timing = TimingConfig::new(60.0, 10.0);
        let start = Instant::now();
        assert!(!timing.beat_due(start, start + Duration::from_millis(1000)));
        assert!(timing.beat_due(start, start + Duration::from_millis(1001)));
    }
}
