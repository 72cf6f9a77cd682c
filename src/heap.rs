/*
 *  heap.rs
 *
 *  HeapLogViewer - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  Replays allocator events into the set of live blocks
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

use std::collections::BTreeMap;

use log::{debug, warn};

use crate::heaplog::{AllocEvent, MemAction};

/// A live allocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub allocator: u32,
    pub address: u64,
    pub size: u64,
}

/// Event counters collected during replay
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeapStats {
    pub adds: usize,
    pub frees: usize,
    pub clears: usize,
    /// del/rem for a block that was never added (or already freed)
    pub stray_frees: usize,
    pub errors: usize,
}

/// Live blocks after replaying a heap log.
#[derive(Debug, Clone, Default)]
pub struct HeapState {
    // keyed by (address, allocator) so iteration is in address order
    live: BTreeMap<(u64, u32), u64>,
    min_address: Option<u64>,
    max_end: u64,
    stats: HeapStats,
}

impl HeapState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `events` in order to an empty heap
    pub fn replay<'a, I>(events: I) -> Self
    where
        I: IntoIterator<Item = &'a AllocEvent>,
    {
        let mut heap = Self::new();
        for ev in events {
            heap.apply(ev);
        }
        heap
    }

    pub fn apply(&mut self, ev: &AllocEvent) {
        match ev.action {
            MemAction::Add => {
                if let Some(old) = self.live.insert((ev.address, ev.allocator), ev.size) {
                    debug!(
                        "record {}: allocator {} re-added {:#x} ({} -> {} bytes)",
                        ev.index, ev.allocator, ev.address, old, ev.size
                    );
                }
                self.min_address = Some(self.min_address.map_or(ev.address, |m| m.min(ev.address)));
                self.max_end = self.max_end.max(ev.address.saturating_add(ev.size));
                self.stats.adds += 1;
            }
            MemAction::Del | MemAction::Rem => {
                if self.live.remove(&(ev.address, ev.allocator)).is_some() {
                    self.stats.frees += 1;
                } else {
                    warn!(
                        "record {}: allocator {} freed unknown block {:#x}",
                        ev.index, ev.allocator, ev.address
                    );
                    self.stats.stray_frees += 1;
                }
            }
            MemAction::Clr => {
                let before = self.live.len();
                self.live.retain(|&(_, allocator), _| allocator != ev.allocator);
                debug!(
                    "record {}: allocator {} cleared {} blocks",
                    ev.index, ev.allocator, before - self.live.len()
                );
                self.stats.clears += 1;
            }
            MemAction::Err => {
                warn!(
                    "record {}: allocator {} reported an error at {:#x} ({} bytes)",
                    ev.index, ev.allocator, ev.address, ev.size
                );
                self.stats.errors += 1;
            }
        }
    }

    /// Live blocks in address order
    pub fn blocks(&self) -> impl Iterator<Item = Block> + '_ {
        self.live
            .iter()
            .map(|(&(address, allocator), &size)| Block { allocator, address, size })
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn live_bytes(&self) -> u64 {
        self.live.values().sum()
    }

    /// Lowest address ever allocated, 0 before the first add
    pub fn base_address(&self) -> u64 {
        self.min_address.unwrap_or(0)
    }

    /// Span from the base address to the highest end ever allocated
    pub fn max_value(&self) -> u64 {
        self.max_end.saturating_sub(self.base_address())
    }

    pub fn stats(&self) -> &HeapStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ev(index: usize, allocator: u32, action: MemAction, address: u64, size: u64) -> AllocEvent {
        AllocEvent { index, frame: None, allocator, action, address, size }
    }

    #[test]
    fn test_replay_add_and_free() {
        // same sequence the engine's hello world sample logs
        let events = [
            ev(0, 0, MemAction::Add, 1000, 100),
            ev(1, 0, MemAction::Add, 1200, 100),
            ev(2, 1, MemAction::Add, 1000, 100),
            ev(3, 1, MemAction::Add, 1100, 100),
            ev(4, 0, MemAction::Del, 1000, 100),
            ev(5, 1, MemAction::Del, 1100, 100),
        ];
        let heap = HeapState::replay(&events);

        let blocks: Vec<_> = heap.blocks().collect();
        assert_eq!(
            blocks,
            vec![
                Block { allocator: 1, address: 1000, size: 100 },
                Block { allocator: 0, address: 1200, size: 100 },
            ]
        );
        assert_eq!(heap.live_bytes(), 200);
        assert_eq!(heap.base_address(), 1000);
        assert_eq!(heap.max_value(), 300);
        assert_eq!(heap.stats().adds, 4);
        assert_eq!(heap.stats().frees, 2);
        assert_eq!(heap.stats().stray_frees, 0);
    }

    #[test]
    fn test_stray_free_and_error() {
        let events = [
            ev(0, 0, MemAction::Rem, 64, 8),
            ev(1, 0, MemAction::Err, 0, 0),
            ev(2, 0, MemAction::Add, 64, 8),
            ev(3, 1, MemAction::Rem, 64, 8),
        ];
        let heap = HeapState::replay(&events);
        assert_eq!(heap.live_count(), 1);
        assert_eq!(heap.stats().stray_frees, 2);
        assert_eq!(heap.stats().errors, 1);
    }

    #[test]
    fn test_clear_only_touches_one_allocator() {
        let events = [
            ev(0, 0, MemAction::Add, 0, 10),
            ev(1, 0, MemAction::Add, 10, 10),
            ev(2, 1, MemAction::Add, 20, 10),
            ev(3, 0, MemAction::Clr, 0, 0),
        ];
        let heap = HeapState::replay(&events);
        assert_eq!(heap.blocks().collect::<Vec<_>>(), vec![Block { allocator: 1, address: 20, size: 10 }]);
        assert_eq!(heap.stats().clears, 1);
        // the span remembers freed blocks
        assert_eq!(heap.max_value(), 30);
    }

    #[test]
    fn test_empty_heap() {
        let heap = HeapState::new();
        assert_eq!(heap.base_address(), 0);
        assert_eq!(heap.max_value(), 0);
        assert_eq!(heap.blocks().count(), 0);
    }
}
