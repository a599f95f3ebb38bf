//! Surface that records draw calls instead of rasterising them

use tiny_skia::Color;

use super::Surface;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear,
    Line { x1: f32, y1: f32, x2: f32, y2: f32 },
    Circle { x: f32, y: f32, radius: f32 },
    Text { x: f32, y: f32, text: String },
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub width: u32,
    pub height: u32,
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            calls: Vec::new(),
        }
    }

    /// Calls made since the last `clear`
    pub fn frame(&self) -> &[DrawCall] {
        let start = self
            .calls
            .iter()
            .rposition(|call| *call == DrawCall::Clear)
            .map_or(0, |i| i + 1);
        &self.calls[start..]
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCall> {
        self.frame()
            .iter()
            .filter(|call| matches!(call, DrawCall::Line { .. }))
    }

    pub fn texts(&self) -> Vec<&str> {
        self.frame()
            .iter()
            .filter_map(|call| match call {
                DrawCall::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self) {
        self.calls.push(DrawCall::Clear);
    }

    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, _color: Color) {
        self.calls.push(DrawCall::Line { x1, y1, x2, y2 });
    }

    fn draw_circle(&mut self, x: f32, y: f32, radius: f32, _color: Color) {
        self.calls.push(DrawCall::Circle { x, y, radius });
    }

    fn draw_text(&mut self, x: f32, y: f32, text: &str, _color: Color) {
        self.calls.push(DrawCall::Text {
            x,
            y,
            text: text.to_string(),
        });
    }
}
