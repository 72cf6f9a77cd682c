/*
 *  display/mod.rs
 *
 *  HeapLogViewer - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  Display subsystem - drawing surfaces, painting, and image export
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

// Core trait definitions
pub mod traits;
pub mod error;
pub mod color;

// Surfaces
pub mod canvas;
pub mod drivers;
pub mod registry;

pub mod painter;
pub mod export;

// Re-exports for convenience
pub use traits::{Context2d, Surface};
pub use error::DisplayError;
pub use color::{Palette, parse_hex_color, to_hex};
pub use canvas::{Canvas2d, FrameCanvas};
pub use registry::{SurfaceRegistry, DEFAULT_SURFACE_ID};
pub use painter::{draw_box, draw_clear_canvas, paint_box, HeapBox, CLEAR_FILL_STYLE};
