//! tiny-skia raster surface

use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Rect, Stroke, Transform};

use super::font;
use super::{Surface, SurfaceError};

/// Side of one font pixel in device pixels
const TEXT_SCALE: f32 = 1.0;

/// Surface backed by an owned tiny-skia pixmap
pub struct PixmapSurface {
    pixmap: Pixmap,
    background: Color,
}

impl PixmapSurface {
    /// Acquire a raster context of `width` x `height` pixels
    pub fn new(width: u32, height: u32) -> Result<Self, SurfaceError> {
        if width == 0 || height == 0 {
            return Err(SurfaceError::Empty { width, height });
        }

        let pixmap =
            Pixmap::new(width, height).ok_or(SurfaceError::ContextUnavailable { width, height })?;

        Ok(Self {
            pixmap,
            background: Color::TRANSPARENT,
        })
    }

    /// Color `clear` erases to
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    fn paint(color: Color, anti_alias: bool) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color(color);
        paint.anti_alias = anti_alias;
        paint
    }
}

impl std::fmt::Debug for PixmapSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixmapSurface")
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .finish()
    }
}

impl Surface for PixmapSurface {
    fn width(&self) -> u32 {
        self.pixmap.width()
    }

    fn height(&self) -> u32 {
        self.pixmap.height()
    }

    fn clear(&mut self) {
        self.pixmap.fill(self.background);
    }

    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: Color) {
        let mut pb = PathBuilder::new();
        pb.move_to(x1, y1);
        pb.line_to(x2, y2);
        let Some(path) = pb.finish() else {
            return;
        };

        let stroke = Stroke {
            width: 1.0,
            ..Stroke::default()
        };
        self.pixmap.stroke_path(
            &path,
            &Self::paint(color, true),
            &stroke,
            Transform::identity(),
            None,
        );
    }

    fn draw_circle(&mut self, x: f32, y: f32, radius: f32, color: Color) {
        let Some(circle) = PathBuilder::from_circle(x, y, radius) else {
            return;
        };

        self.pixmap.stroke_path(
            &circle,
            &Self::paint(color, true),
            &Stroke::default(),
            Transform::identity(),
            None,
        );
    }

    fn draw_text(&mut self, x: f32, y: f32, text: &str, color: Color) {
        // Sharp pixels for text
        let paint = Self::paint(color, false);
        let size = TEXT_SCALE;
        let advance = font::ADVANCE as f32 * size;

        for (i, ch) in text.chars().enumerate() {
            let char_x = x + i as f32 * advance;
            for (col, row) in font::cells(font::glyph(ch)) {
                let px = char_x + col as f32 * size;
                let py = y + row as f32 * size;
                let Some(rect) = Rect::from_xywh(px, py, size, size) else {
                    continue;
                };
                let path = PathBuilder::from_rect(rect);
                self.pixmap.fill_path(
                    &path,
                    &paint,
                    FillRule::Winding,
                    Transform::identity(),
                    None,
                );
            }
        }
    }
}
