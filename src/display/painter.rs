/*
 *  display/painter.rs
 *
 *  HeapLogViewer - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  Canvas painting primitives for the heap grid
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

//! Both primitives are silent no-ops when the surface is missing or has no
//! 2D context: nothing is drawn, nothing is returned, nothing is logged.

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::display::registry::SurfaceRegistry;
use crate::display::traits::{Context2d, Surface};

/// Fill style left on the context by [`draw_clear_canvas`], #F9DC5C
pub const CLEAR_FILL_STYLE: Rgb888 = Rgb888::new(0xF9, 0xDC, 0x5C);

/// One colored box of the heap grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeapBox {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub color: Rgb888,
}

impl HeapBox {
    pub fn new(x: i32, y: i32, width: u32, height: u32, color: Rgb888) -> Self {
        Self { x, y, width, height, color }
    }

    pub fn area(&self) -> Rectangle {
        Rectangle::new(Point::new(self.x, self.y), Size::new(self.width, self.height))
    }
}

/// Outline the whole canvas.
///
/// The fill style is switched to [`CLEAR_FILL_STYLE`] but nothing is filled
/// with it; only the `(0, 0, width, height)` outline is stroked.
pub fn draw_clear_canvas<S: Surface + ?Sized>(surface: &mut S, width: u32, height: u32) {
    let Some(ctx) = surface.context_2d() else {
        return;
    };
    ctx.set_fill_style(CLEAR_FILL_STYLE);
    ctx.stroke_rect(Rectangle::new(Point::zero(), Size::new(width, height)));
}

/// Fill then outline `heap_box` on the surface named `surface_id`.
pub fn draw_box<S: Surface>(surfaces: &mut SurfaceRegistry<S>, surface_id: &str, heap_box: &HeapBox) {
    if let Some(ctx) = surfaces.context_2d(surface_id) {
        paint_box(ctx, heap_box);
    }
}

/// Fill then outline `heap_box` on an already selected context
pub fn paint_box(ctx: &mut dyn Context2d, heap_box: &HeapBox) {
    let area = heap_box.area();
    ctx.set_fill_style(heap_box.color);
    ctx.fill_rect(area);
    ctx.stroke_rect(area);
}
