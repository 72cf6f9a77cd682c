/*
 *  display/drivers/mock.rs
 *
 *  HeapLogViewer - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  Mock drawing surface for testing without a framebuffer
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use embedded_graphics::geometry::Size;
use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use embedded_graphics::primitives::Rectangle;

use crate::display::traits::{Context2d, Surface};

/// One recorded context call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasOp {
    SetFillStyle(Rgb888),
    SetStrokeStyle(Rgb888),
    /// Filled rectangle, with the fill style in effect at the time
    FillRect { area: Rectangle, color: Rgb888 },
    /// Outlined rectangle, with the stroke style in effect at the time
    StrokeRect { area: Rectangle, color: Rgb888 },
}

/// Context that records every call instead of drawing
#[derive(Debug, Clone)]
pub struct RecordingContext {
    fill_style: Rgb888,
    stroke_style: Rgb888,
    ops: Vec<CanvasOp>,
}

impl Default for RecordingContext {
    fn default() -> Self {
        Self {
            fill_style: Rgb888::BLACK,
            stroke_style: Rgb888::BLACK,
            ops: Vec::new(),
        }
    }
}

impl Context2d for RecordingContext {
    fn fill_style(&self) -> Rgb888 {
        self.fill_style
    }

    fn set_fill_style(&mut self, color: Rgb888) {
        self.fill_style = color;
        self.ops.push(CanvasOp::SetFillStyle(color));
    }

    fn stroke_style(&self) -> Rgb888 {
        self.stroke_style
    }

    fn set_stroke_style(&mut self, color: Rgb888) {
        self.stroke_style = color;
        self.ops.push(CanvasOp::SetStrokeStyle(color));
    }

    fn fill_rect(&mut self, area: Rectangle) {
        self.ops.push(CanvasOp::FillRect { area, color: self.fill_style });
    }

    fn stroke_rect(&mut self, area: Rectangle) {
        self.ops.push(CanvasOp::StrokeRect { area, color: self.stroke_style });
    }
}

/// Mock surface for testing
///
/// Records all context calls for verification. A detached mock has no 2D
/// context at all, standing in for a surface that cannot be drawn on.
#[derive(Debug, Clone)]
pub struct MockSurface {
    size: Size,
    context: Option<RecordingContext>,
}

impl MockSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: Size::new(width, height),
            context: Some(RecordingContext::default()),
        }
    }

    /// Surface without a 2D context
    pub fn detached(width: u32, height: u32) -> Self {
        Self {
            size: Size::new(width, height),
            context: None,
        }
    }

    /// Every recorded call, oldest first
    pub fn ops(&self) -> &[CanvasOp] {
        self.context.as_ref().map(|c| c.ops.as_slice()).unwrap_or(&[])
    }

    /// Areas passed to fill_rect
    pub fn fills(&self) -> Vec<Rectangle> {
        self.ops()
            .iter()
            .filter_map(|op| match op {
                CanvasOp::FillRect { area, .. } => Some(*area),
                _ => None,
            })
            .collect()
    }

    /// Areas passed to stroke_rect
    pub fn strokes(&self) -> Vec<Rectangle> {
        self.ops()
            .iter()
            .filter_map(|op| match op {
                CanvasOp::StrokeRect { area, .. } => Some(*area),
                _ => None,
            })
            .collect()
    }

    /// Forget recorded calls, keep current styles
    pub fn reset(&mut self) {
        if let Some(ctx) = self.context.as_mut() {
            ctx.ops.clear();
        }
    }
}

impl Surface for MockSurface {
    fn context_2d(&mut self) -> Option<&mut dyn Context2d> {
        self.context.as_mut().map(|c| c as &mut dyn Context2d)
    }

    fn dimensions(&self) -> Size {
        self.size
    }
}
