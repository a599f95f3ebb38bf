//! Diagnostic overlay drawn over the trace
//!
//! Purely observational: nothing here feeds back into the buffer or the
//! beat state.

use std::time::{Duration, Instant};

/// Left edge of the overlay text
pub const MARGIN_X: f32 = 5.0;
/// Top of the first overlay line
pub const FIRST_LINE_Y: f32 = 15.0;
/// Vertical distance between overlay lines
pub const LINE_PITCH: f32 = 15.0;

/// Frames counted over roughly one second windows
#[derive(Debug)]
pub struct FpsCounter {
    count: u32,
    last_reset: Instant,
    last_fps: u32,
}

impl FpsCounter {
    pub fn new(now: Instant) -> Self {
        Self {
            count: 0,
            last_reset: now,
            last_fps: 0,
        }
    }

    /// Count one frame rendered at `now`
    pub fn increment(&mut self, now: Instant) {
        if now.saturating_duration_since(self.last_reset) > Duration::from_secs(1) {
            self.last_fps = self.count;
            self.count = 0;
            self.last_reset = now;
        }
        self.count += 1;
    }

    /// Frames counted in the last completed window
    pub fn fps(&self) -> u32 {
        self.last_fps
    }
}

/// Snapshot of everything the overlay reports for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostics {
    pub fps: u32,
    pub elapsed: Duration,
    pub beats_per_minute: f64,
    pub visible_window_seconds: f64,
    pub frame_in_pixels: f64,
    pub frame_padding: usize,
    pub since_last_beat: Duration,
    pub needs_beat: bool,
    pub draining: bool,
    pub buffer_len: usize,
}

impl Diagnostics {
    pub fn lines(&self) -> Vec<String> {
        let unit = if self.visible_window_seconds == 1.0 {
            "second"
        } else {
            "seconds"
        };

        vec![
            format!("FPS: {}", self.fps),
            format!("Diff: {:.3}", self.elapsed.as_secs_f64()),
            format!("BPM: {}", self.beats_per_minute),
            format!("Time interval: {} {}", self.visible_window_seconds, unit),
            format!("Frame in pixels: {:.1}", self.frame_in_pixels),
            format!("Frame padding in pixels: {}", self.frame_padding),
            format!(
                "Last heartbeat diff: {:.3} seconds",
                self.since_last_beat.as_secs_f64()
            ),
            format!("Heartbeat every: {:.3} seconds", 60.0 / self.beats_per_minute),
            format!("Need beat: {} draining: {}", self.needs_beat, self.draining),
            format!("Buffer: {}", self.buffer_len),
        ]
    }
}

/// Top edge of overlay line `index`
pub fn line_y(index: usize) -> f32 {
    FIRST_LINE_Y + index as f32 * LINE_PITCH
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diagnostics() -> Diagnostics {
        Diagnostics {
            fps: 60,
            elapsed: Duration::from_millis(16),
            beats_per_minute: 60.0,
            visible_window_seconds: 10.0,
            frame_in_pixels: 80.0,
            frame_padding: 8,
            since_last_beat: Duration::from_millis(500),
            needs_beat: false,
            draining: true,
            buffer_len: 800,
        }
    }

    #[test]
    fn test_fps_publishes_after_one_second() {
        let start = Instant::now();
        let mut counter = FpsCounter::new(start);

        for i in 0..60 {
            counter.increment(start + Duration::from_millis(i * 16));
        }
        assert_eq!(counter.fps(), 0);

        counter.increment(start + Duration::from_millis(1001));
        assert_eq!(counter.fps(), 60);
    }

    #[test]
    fn test_overlay_lines() {
        let lines = diagnostics().lines();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], "FPS: 60");
        assert_eq!(lines[1], "Diff: 0.016");
        assert_eq!(lines[2], "BPM: 60");
        assert_eq!(lines[3], "Time interval: 10 seconds");
        assert_eq!(lines[4], "Frame in pixels: 80.0");
        assert_eq!(lines[7], "Heartbeat every: 1.000 seconds");
        assert_eq!(lines[8], "Need beat: false draining: true");
        assert_eq!(lines[9], "Buffer: 800");
    }

    #[test]
    fn test_singular_second() {
        let mut diagnostics = diagnostics();
        diagnostics.visible_window_seconds = 1.0;
        assert_eq!(diagnostics.lines()[3], "Time interval: 1 second");
    }

    #[test]
    fn test_line_positions() {
        assert_eq!(line_y(0), 15.0);
        assert_eq!(line_y(2), 45.0);
    }
}
