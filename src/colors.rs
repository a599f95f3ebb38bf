//! Colors used by the trace and the overlay

use tiny_skia::Color;

/// Trace line (#32cd32)
pub fn lime_green() -> Color {
    Color::from_rgba8(50, 205, 50, 255)
}

/// Diagnostic overlay text
pub fn red() -> Color {
    Color::from_rgba8(255, 0, 0, 255)
}

pub fn black() -> Color {
    Color::BLACK
}
