/*
 *  layout.rs
 *
 *  HeapLogViewer - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  Heap grid geometry - byte ranges to boxes
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

use crate::display::HeapBox;

/// Pixels per row
pub const DEFAULT_COLUMNS: u32 = 1024;
/// Rows in the grid
pub const DEFAULT_ROWS: u32 = 32;
/// Row height in pixels, 32 rows make a 320px canvas
pub const DEFAULT_ROW_HEIGHT: u32 = 10;
/// Largest canvas we agree to allocate, 64M pixels
pub const MAX_CANVAS_PIXELS: u64 = 1 << 26;

/// Grid the heap is laid out on: `rows` rows of `columns` pixels.
///
/// Every pixel along a row covers `scale` bytes; a range that runs off the
/// end of a row carries on at the start of the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeapLayout {
    pub columns: u32,
    pub rows: u32,
    pub row_height: u32,
}

impl Default for HeapLayout {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            rows: DEFAULT_ROWS,
            row_height: DEFAULT_ROW_HEIGHT,
        }
    }
}

/// Boxes for one byte range
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placement {
    pub boxes: Vec<HeapBox>,
    /// Part of the range fell past the last row
    pub clipped: bool,
}

impl HeapLayout {
    /// Canvas size covering the whole grid
    pub fn canvas_size(&self) -> Size {
        Size::new(self.columns, self.rows.saturating_mul(self.row_height))
    }

    /// Canvas fits in i32 coordinates and under [`MAX_CANVAS_PIXELS`]
    pub fn is_drawable(&self) -> bool {
        let height = self.rows as u64 * self.row_height as u64;
        self.columns as u64 <= i32::MAX as u64
            && height <= i32::MAX as u64
            && self.columns as u64 * height <= MAX_CANVAS_PIXELS
    }

    /// Pixels available along all rows
    pub fn capacity(&self) -> u64 {
        self.columns as u64 * self.rows as u64
    }

    /// Lay out `size` bytes starting `offset` bytes into the heap.
    ///
    /// A range always covers at least one pixel so tiny blocks stay visible.
    pub fn boxes_for_block(&self, offset: u64, size: u64, scale: u64, color: Rgb888) -> Placement {
        let scale = scale.max(1);
        let columns = self.columns as u64;
        let capacity = self.capacity();

        let first = offset / scale;
        let end = offset.saturating_add(size).div_ceil(scale).max(first + 1);
        if columns == 0 || first >= capacity {
            return Placement { boxes: Vec::new(), clipped: true };
        }
        let last = end.min(capacity);

        let mut boxes = Vec::new();
        let mut pos = first;
        while pos < last {
            let row = pos / columns;
            let col = pos % columns;
            let len = (last - pos).min(columns - col);
            boxes.push(HeapBox::new(
                col as i32,
                i32::try_from(row * self.row_height as u64).unwrap_or(i32::MAX),
                len as u32,
                self.row_height,
                color,
            ));
            pos += len;
        }
        Placement { boxes, clipped: end > capacity }
    }
}
