/*
 *  display/registry.rs
 *
 *  HeapLogViewer - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  Named drawing surfaces
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

use std::collections::HashMap;

use crate::display::traits::{Context2d, Surface};

/// Surface id used by the viewer when none is configured
pub const DEFAULT_SURFACE_ID: &str = "canvas";

/// Surfaces looked up by name.
///
/// Owned by the caller and passed into the painter explicitly.
#[derive(Debug)]
pub struct SurfaceRegistry<S> {
    surfaces: HashMap<String, S>,
}

impl<S> Default for SurfaceRegistry<S> {
    fn default() -> Self {
        Self { surfaces: HashMap::new() }
    }
}

impl<S> SurfaceRegistry<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `surface` under `id`, returning any surface it replaces
    pub fn insert(&mut self, id: impl Into<String>, surface: S) -> Option<S> {
        self.surfaces.insert(id.into(), surface)
    }

    pub fn get(&self, id: &str) -> Option<&S> {
        self.surfaces.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut S> {
        self.surfaces.get_mut(id)
    }

    pub fn remove(&mut self, id: &str) -> Option<S> {
        self.surfaces.remove(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.surfaces.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }
}

impl<S: Surface> SurfaceRegistry<S> {
    /// 2D context of the surface named `id`.
    ///
    /// None when no such surface exists or it cannot be drawn on.
    pub fn context_2d(&mut self, id: &str) -> Option<&mut dyn Context2d> {
        self.surfaces.get_mut(id)?.context_2d()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::drivers::MockSurface;
    use embedded_graphics::geometry::Size;

    #[test]
    fn test_lookup_by_id() {
        let mut surfaces = SurfaceRegistry::new();
        assert!(surfaces.is_empty());
        assert!(surfaces.insert("canvas", MockSurface::new(8, 8)).is_none());
        assert!(surfaces.insert("canvas", MockSurface::new(16, 16)).is_some());
        surfaces.insert("detached", MockSurface::detached(8, 8));

        assert_eq!(surfaces.len(), 2);
        assert!(surfaces.contains("canvas"));
        assert!(surfaces.context_2d("canvas").is_some());
        assert!(surfaces.context_2d("detached").is_none());
        assert!(surfaces.context_2d("missing").is_none());

        assert_eq!(surfaces.get("canvas").unwrap().dimensions(), Size::new(16, 16));

        assert!(surfaces.remove("canvas").is_some());
        assert!(!surfaces.contains("canvas"));
    }
}
