//! Drawing surfaces the trace renders onto
//!
//! A surface is a raster target addressed in device pixels with the origin
//! at the top-left corner. The trace only needs lines, circles and text.

mod font;
mod pixmap;
#[cfg(test)]
pub mod recording;

use thiserror::Error;
use tiny_skia::Color;

pub use pixmap::PixmapSurface;

/// Surface construction errors
#[derive(Error, Debug)]
pub enum SurfaceError {
    #[error("No drawing target was provided")]
    MissingTarget,
    #[error("Drawing target has no area ({width}x{height})")]
    Empty { width: u32, height: u32 },
    #[error("Could not acquire a {width}x{height} raster context")]
    ContextUnavailable { width: u32, height: u32 },
}

/// 2D drawing primitives over a raster target
pub trait Surface {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Erase the whole surface
    fn clear(&mut self);

    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: Color);

    fn draw_circle(&mut self, x: f32, y: f32, radius: f32, color: Color);

    /// Draw `text` with its top-left corner at `(x, y)`
    fn draw_text(&mut self, x: f32, y: f32, text: &str, color: Color);
}
