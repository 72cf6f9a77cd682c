/*
 *  display/traits.rs
 *
 *  HeapLogViewer - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  Core trait definitions for drawing surface abstraction
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
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::primitives::Rectangle;

/// Retained-state 2D drawing context
///
/// Mirrors the small slice of a canvas context the heap viewer needs: a
/// current fill style and stroke style, plus filled and outlined rectangles.
/// Styles persist between calls until changed.
///
/// This trait is dyn compatible so a [`Surface`] can hand out its context
/// without exposing the concrete `DrawTarget` behind it.
pub trait Context2d {
    /// Current fill color
    fn fill_style(&self) -> Rgb888;

    /// Set the color used by subsequent [`fill_rect`](Context2d::fill_rect) calls
    fn set_fill_style(&mut self, color: Rgb888);

    /// Current outline color
    fn stroke_style(&self) -> Rgb888;

    /// Set the color used by subsequent [`stroke_rect`](Context2d::stroke_rect) calls
    fn set_stroke_style(&mut self, color: Rgb888);

    /// Fill `area` with the current fill style
    fn fill_rect(&mut self, area: Rectangle);

    /// Outline `area` with the current stroke style
    fn stroke_rect(&mut self, area: Rectangle);
}

/// Something that may be drawn on.
pub trait Surface {
    /// The 2D context, or None when this surface cannot be drawn on
    fn context_2d(&mut self) -> Option<&mut dyn Context2d>;

    /// Surface size in pixels
    fn dimensions(&self) -> Size;
}
