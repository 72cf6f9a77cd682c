/*
 *  viewer.rs
 *
 *  HeapLogViewer - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  Renders a replayed heap onto a named surface
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

use embedded_graphics::pixelcolor::Rgb888;
use log::debug;

use crate::config::{Config, ConfigError};
use crate::display::{draw_box, draw_clear_canvas, FrameCanvas, Palette, Surface, SurfaceRegistry};
use crate::heap::HeapState;
use crate::layout::HeapLayout;
use crate::scale::{legacy_scale_for_max_value, scale_for_max_value};

/// What a render pass produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderSummary {
    /// Bytes per pixel
    pub scale: u64,
    /// Live blocks drawn
    pub blocks: usize,
    /// Boxes painted, a block wrapping rows paints several
    pub boxes: usize,
    /// Blocks that did not fit on the grid, fully or in part
    pub clipped: usize,
}

/// Heap grid renderer
#[derive(Debug, Clone, Default)]
pub struct HeapViewer {
    layout: HeapLayout,
    palette: Palette,
    legacy_scale: bool,
}

impl HeapViewer {
    pub fn new(layout: HeapLayout, palette: Palette) -> Self {
        Self { layout, palette, legacy_scale: false }
    }

    pub fn from_config(cfg: &Config) -> Result<Self, ConfigError> {
        Ok(Self::new(cfg.layout(), cfg.palette()?).with_legacy_scale(cfg.legacy_scale()))
    }

    /// Pick scales from the superseded table
    pub fn with_legacy_scale(mut self, legacy: bool) -> Self {
        self.legacy_scale = legacy;
        self
    }

    pub fn layout(&self) -> &HeapLayout {
        &self.layout
    }

    /// Framebuffer canvas sized for the grid
    pub fn frame_canvas(&self, background: Rgb888) -> FrameCanvas {
        let size = self.layout.canvas_size();
        FrameCanvas::with_size(size.width, size.height, background)
    }

    /// Bytes per pixel for `heap`
    pub fn scale_for(&self, heap: &HeapState) -> u64 {
        if self.legacy_scale {
            legacy_scale_for_max_value(heap.max_value())
        } else {
            scale_for_max_value(heap.max_value())
        }
    }

    /// Outline the canvas, then paint every live block of `heap` on the
    /// surface named `surface_id`.
    ///
    /// A missing or undrawable surface paints nothing; the summary still
    /// reports what would have been drawn.
    pub fn render<S: Surface>(
        &self,
        surfaces: &mut SurfaceRegistry<S>,
        surface_id: &str,
        heap: &HeapState,
    ) -> RenderSummary {
        let size = self.layout.canvas_size();
        if let Some(surface) = surfaces.get_mut(surface_id) {
            draw_clear_canvas(surface, size.width, size.height);
        }

        let scale = self.scale_for(heap);
        let base = heap.base_address();
        let mut summary = RenderSummary { scale, ..Default::default() };

        for block in heap.blocks() {
            let color = self.palette.for_allocator(block.allocator);
            let placement = self.layout.boxes_for_block(block.address - base, block.size, scale, color);
            for heap_box in &placement.boxes {
                draw_box(surfaces, surface_id, heap_box);
            }
            summary.blocks += 1;
            summary.boxes += placement.boxes.len();
            if placement.clipped {
                debug!("block {:#x} ({} bytes) clipped at the last row", block.address, block.size);
                summary.clipped += 1;
            }
        }

        debug!("render {:?} on '{}'", summary, surface_id);
        summary
    }
}
