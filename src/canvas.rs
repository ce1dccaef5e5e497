//! Drawing surface abstraction consumed by the orchestrator.
//!
//! The core only needs three operations from its host surface: clear the
//! whole surface, set a single unit-area mark, and stroke an unfilled
//! circle outline (used for endpoint markers). [`PixelCanvas`] is the
//! default implementation, backed by [`Framebuffer`]; hosts with their own
//! 2D surface implement [`Canvas`] directly.

use crate::color::Rgba;
use crate::error::Result;
use crate::framebuffer::Framebuffer;

/// Abstract 2D drawing surface.
///
/// Implementations silently clip out-of-bounds coordinates; the core never
/// checks bounds itself.
pub trait Canvas {
    /// Clear the entire surface.
    fn clear(&mut self);

    /// Set a single unit-area mark at the given pixel coordinate.
    fn plot(&mut self, x: i32, y: i32);

    /// Draw an unfilled circular outline centered at (`cx`, `cy`).
    fn stroke_circle_outline(&mut self, cx: i32, cy: i32, radius: i32);
}

/// Framebuffer-backed canvas with configurable ink and background colors.
#[derive(Debug, Clone)]
pub struct PixelCanvas {
    fb: Framebuffer,
    ink: Rgba,
    background: Rgba,
}

impl PixelCanvas {
    /// Create a canvas with the given dimensions (black ink on white).
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is zero.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let mut fb = Framebuffer::new(width, height)?;
        fb.clear(Rgba::WHITE);
        Ok(Self {
            fb,
            ink: Rgba::BLACK,
            background: Rgba::WHITE,
        })
    }

    /// Set the ink color used by `plot` and circle outlines.
    #[must_use]
    pub fn ink(mut self, color: Rgba) -> Self {
        self.ink = color;
        self
    }

    /// Set the background color used by `clear`.
    #[must_use]
    pub fn background(mut self, color: Rgba) -> Self {
        self.background = color;
        self
    }

    /// Get the canvas width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.fb.width()
    }

    /// Get the canvas height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.fb.height()
    }

    /// Access the backing framebuffer (for inspection or encoding).
    #[must_use]
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.fb
    }

    #[inline]
    fn plot_clipped(&mut self, x: i32, y: i32) {
        if x >= 0 && y >= 0 {
            self.fb.set_pixel(x as u32, y as u32, self.ink);
        }
    }
}

impl Canvas for PixelCanvas {
    fn clear(&mut self) {
        self.fb.clear(self.background);
    }

    fn plot(&mut self, x: i32, y: i32) {
        self.plot_clipped(x, y);
    }

    /// Midpoint circle algorithm, outline only.
    fn stroke_circle_outline(&mut self, cx: i32, cy: i32, radius: i32) {
        if radius <= 0 {
            if radius == 0 {
                self.plot_clipped(cx, cy);
            }
            return;
        }

        let mut x = radius;
        let mut y = 0;
        let mut err = 1 - radius;

        while x >= y {
            // Plot 8 octant points
            self.plot_clipped(cx + x, cy + y);
            self.plot_clipped(cx - x, cy + y);
            self.plot_clipped(cx + x, cy - y);
            self.plot_clipped(cx - x, cy - y);
            self.plot_clipped(cx + y, cy + x);
            self.plot_clipped(cx - y, cy + x);
            self.plot_clipped(cx + y, cy - x);
            self.plot_clipped(cx - y, cy - x);

            y += 1;
            if err < 0 {
                err += 2 * y + 1;
            } else {
                x -= 1;
                err += 2 * (y - x) + 1;
            }
        }
    }
}

/// Canvas that records operations instead of rasterizing them.
///
/// Used by [`crate::strategies::Chunked`] to capture a strategy's output
/// for batched replay, and by tests that assert on exact plot sequences.
#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    points: Vec<(i32, i32)>,
    circles: Vec<(i32, i32, i32)>,
    clears: u32,
    total_plots: u64,
}

impl RecordingCanvas {
    /// Create an empty recording canvas.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Points plotted since the last clear, in call order.
    #[must_use]
    pub fn points(&self) -> &[(i32, i32)] {
        &self.points
    }

    /// Take ownership of the recorded points, leaving the canvas empty.
    pub fn take_points(&mut self) -> Vec<(i32, i32)> {
        std::mem::take(&mut self.points)
    }

    /// Circle outlines recorded since construction (center x, center y, radius).
    #[must_use]
    pub fn circles(&self) -> &[(i32, i32, i32)] {
        &self.circles
    }

    /// Number of `clear` calls since construction.
    #[must_use]
    pub fn clears(&self) -> u32 {
        self.clears
    }

    /// Number of `plot` calls since construction (survives clears).
    #[must_use]
    pub fn total_plots(&self) -> u64 {
        self.total_plots
    }
}

impl Canvas for RecordingCanvas {
    fn clear(&mut self) {
        self.clears += 1;
        self.points.clear();
    }

    fn plot(&mut self, x: i32, y: i32) {
        self.points.push((x, y));
        self.total_plots += 1;
    }

    fn stroke_circle_outline(&mut self, cx: i32, cy: i32, radius: i32) {
        self.circles.push((cx, cy, radius));
    }
}
