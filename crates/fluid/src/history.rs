//! Rolling history of grid snapshots ("slices").
//!
//! The renderer stacks these visually to fake a third (time) axis. The
//! buffer is constructed full — `depth` copies of the initial grid — so a
//! consumer can always draw `depth` layers, and each tick replaces the
//! oldest slice with a fresh copy of the live grid.

use crate::grid::{Grid, Snapshot};
use std::collections::VecDeque;

/// Fixed-capacity FIFO of grid [`Snapshot`]s, oldest first.
#[derive(Debug)]
pub struct HistoryBuffer {
    depth: usize,
    slices: VecDeque<Snapshot>,
}

impl HistoryBuffer {
    /// Creates a buffer holding `depth` copies of the given grid.
    pub fn new(depth: usize, grid: &Grid) -> Self {
        let mut buf = Self {
            depth,
            slices: VecDeque::with_capacity(depth + 1),
        };
        buf.rebuild(grid);
        buf
    }

    /// Configured capacity.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Number of snapshots currently held (equals `depth` outside of a
    /// mid-resize instant).
    pub fn len(&self) -> usize {
        self.slices.len()
    }

    /// True when no snapshots are held (only possible at `depth == 0`).
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// Appends a snapshot of `grid`, evicting the oldest past `depth`.
    pub fn append(&mut self, grid: &Grid) {
        self.slices.push_back(grid.snapshot());
        while self.slices.len() > self.depth {
            self.slices.pop_front();
        }
    }

    /// Changes the capacity at runtime.
    ///
    /// Shrinking evicts from the front immediately; growing appends fresh
    /// copies of the current grid until the buffer holds `depth`.
    pub fn set_depth(&mut self, depth: usize, grid: &Grid) {
        self.depth = depth;
        while self.slices.len() > depth {
            self.slices.pop_front();
        }
        while self.slices.len() < depth {
            self.slices.push_back(grid.snapshot());
        }
    }

    /// Discards all slices and refills with copies of `grid`.
    pub fn rebuild(&mut self, grid: &Grid) {
        self.slices.clear();
        for _ in 0..self.depth {
            self.slices.push_back(grid.snapshot());
        }
    }

    /// Iterates oldest to newest; reverse for newest to oldest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Snapshot> {
        self.slices.iter()
    }

    /// The most recent snapshot, if any.
    pub fn latest(&self) -> Option<&Snapshot> {
        self.slices.back()
    }
}
