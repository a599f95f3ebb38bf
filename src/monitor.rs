//! Frame driver for the heartbeat trace
//!
//! [`Monitor`] owns the surface, the scroll buffer and the timing
//! parameters. Each tick measures the time since the previous one, advances
//! the buffer by a matching number of columns, redraws the trace and
//! optionally the diagnostic overlay. Scheduling the next tick belongs to
//! whoever drives the [`Tickable`].

use std::time::{Duration, Instant};

use crate::colors;
use crate::overlay::{self, Diagnostics, FpsCounter};
use crate::pulse::{self, PulseProfile};
use crate::scroll::ScrollBuffer;
use crate::surface::{Surface, SurfaceError};
use crate::timing::{self, TimingConfig};

/// Radius of the marker drawn on the newest sample
const CURSOR_RADIUS: f32 = 3.0;

/// Something a frame scheduler can drive once per animation tick
pub trait Tickable {
    fn on_tick(&mut self, now: Instant);
}

/// Rendering switches that don't affect the trace itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorOptions {
    pub show_overlay: bool,
    pub show_cursor: bool,
}

impl Default for MonitorOptions {
    fn default() -> Self {
        Self {
            show_overlay: true,
            show_cursor: true,
        }
    }
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    pub elapsed: Duration,
    /// Columns advanced, `None` when the tick was skipped
    pub handled: Option<usize>,
    pub draining: bool,
    /// Pulse samples still queued after this tick
    pub remaining: usize,
    pub buffer_len: usize,
}

pub struct Monitor<S: Surface> {
    surface: S,
    buffer: ScrollBuffer,
    /// Rate and window, read fresh on every tick
    pub timing: TimingConfig,
    options: MonitorOptions,
    fps: FpsCounter,
    previous_tick: Instant,
    frames: u64,
}

impl<S: Surface> Monitor<S> {
    /// Build a monitor drawing onto `target`
    ///
    /// Fails when no target is given or the target has no area; nothing is
    /// ticked in that case.
    pub fn bootstrap(
        target: Option<S>,
        timing: TimingConfig,
        options: MonitorOptions,
        now: Instant,
    ) -> Result<Self, SurfaceError> {
        let surface = target.ok_or(SurfaceError::MissingTarget)?;
        let (width, height) = (surface.width(), surface.height());
        if width == 0 || height == 0 {
            return Err(SurfaceError::Empty { width, height });
        }

        let profile = PulseProfile::NOMINAL.for_height(height as f32);
        let buffer = ScrollBuffer::new(width as usize, profile, now);
        log::debug!(
            "Monitor on {}x{} surface, baseline {}, {} bpm over {}s",
            width,
            height,
            buffer.profile().baseline,
            timing.beats_per_minute,
            timing.visible_window_seconds
        );

        Ok(Self {
            buffer,
            surface,
            timing,
            options,
            fps: FpsCounter::new(now),
            previous_tick: now,
            frames: 0,
        })
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn buffer(&self) -> &ScrollBuffer {
        &self.buffer
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Render one frame at `now`
    pub fn tick(&mut self, now: Instant) -> FrameReport {
        let elapsed = now.saturating_duration_since(self.previous_tick);
        self.previous_tick = now;
        self.frames += 1;
        self.fps.increment(now);

        let handled = self.timing.handled_element_count(timing::as_millis_f64(elapsed));
        log::trace!("Handled elements: {:?} after {:?}", handled, elapsed);

        self.surface.clear();

        match handled {
            Some(count) => self.buffer.advance(count, now, &self.timing),
            None => log::debug!("Skipping advance for degenerate elapsed time {:?}", elapsed),
        }

        self.draw_trace();

        if self.options.show_overlay {
            self.draw_overlay(elapsed, now);
        }

        FrameReport {
            elapsed,
            handled,
            draining: self.buffer.beat().is_draining(),
            remaining: self.buffer.beat().remaining(),
            buffer_len: self.buffer.len(),
        }
    }

    fn draw_trace(&mut self) {
        let color = colors::lime_green();
        let samples = self.buffer.samples();

        for (i, (&previous, &current)) in samples.iter().zip(samples.iter().skip(1)).enumerate() {
            let x = i as f32;
            self.surface.draw_line(x, previous, x + 1.0, current, color);
        }

        if self.options.show_cursor {
            if let Some(&head) = samples.back() {
                let x = (samples.len() - 1) as f32;
                self.surface.draw_circle(x, head, CURSOR_RADIUS, color);
            }
        }
    }

    pub fn diagnostics(&self, elapsed: Duration, now: Instant) -> Diagnostics {
        let beat = self.buffer.beat();
        let pulse_width = self.timing.pulse_width_in_samples(self.buffer.width());

        Diagnostics {
            fps: self.fps.fps(),
            elapsed,
            beats_per_minute: self.timing.beats_per_minute,
            visible_window_seconds: self.timing.visible_window_seconds,
            frame_in_pixels: self.timing.frame_in_pixels(self.buffer.width()),
            frame_padding: pulse::padding_for(pulse_width),
            since_last_beat: now.saturating_duration_since(beat.last_beat_at()),
            needs_beat: beat.needs_beat(now, &self.timing),
            draining: beat.is_draining(),
            buffer_len: self.buffer.len(),
        }
    }

    fn draw_overlay(&mut self, elapsed: Duration, now: Instant) {
        let color = colors::red();
        for (i, line) in self.diagnostics(elapsed, now).lines().iter().enumerate() {
            self.surface
                .draw_text(overlay::MARGIN_X, overlay::line_y(i), line, color);
        }
    }
}

impl<S: Surface> Tickable for Monitor<S> {
    fn on_tick(&mut self, now: Instant) {
        let report = self.tick(now);
        log::trace!(
            "Frame #{}: {:?} columns after {:?}, draining {} ({} queued), buffer {}",
            self.frames,
            report.handled,
            report.elapsed,
            report.draining,
            report.remaining,
            report.buffer_len
        );
    }
}
