/*
 *  display/export.rs
 *
 *  HeapLogViewer - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  Framebuffer to PNG via tiny-skia
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

use std::fs;
use std::path::Path;

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use log::debug;
use tiny_skia::Pixmap;

use crate::display::error::DisplayError;
use crate::vframebuf::VarFrameBuf;

/// Copy the framebuffer into an opaque RGBA pixmap
pub fn to_pixmap(framebuf: &VarFrameBuf<Rgb888>) -> Result<Pixmap, DisplayError> {
    let (width, height) = (framebuf.width() as u32, framebuf.height() as u32);
    let mut pixmap = Pixmap::new(width, height)
        .ok_or(DisplayError::PixmapCreation { width, height })?;

    // alpha is always 255 so premultiplied and straight RGBA agree
    for (rgba, color) in pixmap.data_mut().chunks_exact_mut(4).zip(framebuf.as_slice()) {
        rgba.copy_from_slice(&[color.r(), color.g(), color.b(), 0xFF]);
    }
    Ok(pixmap)
}

/// Encode the framebuffer as PNG bytes
pub fn encode_png(framebuf: &VarFrameBuf<Rgb888>) -> Result<Vec<u8>, DisplayError> {
    to_pixmap(framebuf)?
        .encode_png()
        .map_err(|e| DisplayError::PngEncoding(e.to_string()))
}

/// Write the framebuffer to `path` as PNG
pub fn save_png(framebuf: &VarFrameBuf<Rgb888>, path: &Path) -> Result<(), DisplayError> {
    let bytes = encode_png(framebuf)?;
    fs::write(path, &bytes)?;
    debug!("wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}
