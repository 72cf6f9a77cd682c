/*
 *  display/error.rs
 *
 *  HeapLogViewer - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  Error types for the display subsystem
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

use thiserror::Error;

/// Errors raised when turning a rendered surface into an image file.
///
/// Painting itself never fails, see [`crate::display::painter`].
#[derive(Debug, Error)]
pub enum DisplayError {
    /// Pixmap could not be allocated for the framebuffer size
    #[error("Pixmap creation error: cannot allocate {width}x{height}")]
    PixmapCreation { width: u32, height: u32 },

    /// PNG encoder rejected the image
    #[error("PNG encoding error: {0}")]
    PngEncoding(String),

    /// Writing the output file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
