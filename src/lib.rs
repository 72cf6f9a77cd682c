/*
 *  lib.rs
 *
 *  HeapLogViewer - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
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

pub mod config;
pub mod deutils;
pub mod display;
pub mod heap;
pub mod heaplog;
pub mod layout;
pub mod pow2;
pub mod scale;
pub mod vframebuf;
pub mod viewer;

pub use heap::{Block, HeapState, HeapStats};
pub use heaplog::{AllocEvent, HeapLog, HeapLogError, LogMessage, LogRecord, MemAction, MessageLevel};
pub use layout::{HeapLayout, Placement};
pub use pow2::nearest_highest_power_of_2;
pub use scale::{legacy_scale_for_max_value, scale_for_max_value, ScaleTable};
pub use viewer::{HeapViewer, RenderSummary};
