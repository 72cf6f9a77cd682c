/*
 *  display/canvas.rs
 *
 *  HeapLogViewer - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  2D context over any embedded-graphics DrawTarget
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

use core::fmt::Debug;
use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, StrokeAlignment};
use log::warn;

use crate::display::traits::{Context2d, Surface};
use crate::vframebuf::VarFrameBuf;

/// A [`Context2d`] drawing into an embedded-graphics `DrawTarget`.
///
/// Styles start out the way a fresh canvas context does: black fill, black
/// 1px stroke. Outlines are drawn inside the rectangle so a stroke at
/// `(0, 0, w, h)` stays fully visible.
#[derive(Debug, Clone)]
pub struct Canvas2d<D> {
    target: D,
    fill_style: Rgb888,
    stroke_style: Rgb888,
    line_width: u32,
}

/// Canvas backed by an in-memory framebuffer
pub type FrameCanvas = Canvas2d<VarFrameBuf<Rgb888>>;

impl<D> Canvas2d<D> {
    pub fn new(target: D) -> Self {
        Self {
            target,
            fill_style: Rgb888::BLACK,
            stroke_style: Rgb888::BLACK,
            line_width: 1,
        }
    }

    pub fn target(&self) -> &D {
        &self.target
    }

    pub fn line_width(&self) -> u32 {
        self.line_width
    }
}

impl FrameCanvas {
    /// Framebuffer canvas of `width` x `height` filled with `background`
    pub fn with_size(width: u32, height: u32, background: Rgb888) -> Self {
        Self::new(VarFrameBuf::new(width, height, background))
    }
}

impl<D> Context2d for Canvas2d<D>
where
    D: DrawTarget<Color = Rgb888>,
    D::Error: Debug,
{
    fn fill_style(&self) -> Rgb888 {
        self.fill_style
    }

    fn set_fill_style(&mut self, color: Rgb888) {
        self.fill_style = color;
    }

    fn stroke_style(&self) -> Rgb888 {
        self.stroke_style
    }

    fn set_stroke_style(&mut self, color: Rgb888) {
        self.stroke_style = color;
    }

    fn fill_rect(&mut self, area: Rectangle) {
        let style = PrimitiveStyle::with_fill(self.fill_style);
        if let Err(e) = area.into_styled(style).draw(&mut self.target) {
            warn!("fill_rect {:?} failed: {:?}", area, e);
        }
    }

    fn stroke_rect(&mut self, area: Rectangle) {
        let style = PrimitiveStyleBuilder::new()
            .stroke_color(self.stroke_style)
            .stroke_width(self.line_width)
            .stroke_alignment(StrokeAlignment::Inside)
            .build();
        if let Err(e) = area.into_styled(style).draw(&mut self.target) {
            warn!("stroke_rect {:?} failed: {:?}", area, e);
        }
    }
}

impl<D> Surface for Canvas2d<D>
where
    D: DrawTarget<Color = Rgb888>,
    D::Error: Debug,
{
    fn context_2d(&mut self) -> Option<&mut dyn Context2d> {
        Some(self)
    }

    fn dimensions(&self) -> Size {
        self.target.bounding_box().size
    }
}
