//! Undo/redo history of full canvas snapshots.

use super::error::DrawError;
use super::raster::Raster;
use std::collections::VecDeque;

/// Default number of undo snapshots kept in memory.
pub const DEFAULT_HISTORY_LIMIT: usize = 20;

/// Bounded undo stack plus unbounded redo stack.
///
/// Each snapshot is owned by exactly one stack. Undo and redo move the live
/// canvas onto the opposite stack instead of copying it, so a round trip is
/// always bit-identical.
#[derive(Debug)]
pub struct CanvasHistory {
    undo: VecDeque<Raster>,
    redo: Vec<Raster>,
    limit: usize,
}

impl Default for CanvasHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl CanvasHistory {
    /// Creates an empty history keeping at most `limit` undo snapshots (min 1).
    pub fn new(limit: usize) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Records the current canvas before a mutation.
    ///
    /// Evicts the oldest snapshot past the limit and invalidates redo.
    pub fn snapshot(&mut self, canvas: &Raster) -> Result<(), DrawError> {
        self.undo.push_back(canvas.try_clone()?);
        while self.undo.len() > self.limit {
            self.undo.pop_front();
            log::debug!("Undo history full, dropped oldest snapshot");
        }
        self.redo.clear();
        Ok(())
    }

    /// Restores the most recent snapshot into `canvas`.
    ///
    /// Returns `false` (leaving `canvas` untouched) when there is nothing to undo.
    pub fn undo(&mut self, canvas: &mut Raster) -> bool {
        let Some(previous) = self.undo.pop_back() else {
            return false;
        };
        let current = std::mem::replace(canvas, previous);
        self.redo.push(current);
        true
    }

    /// Re-applies the most recently undone state into `canvas`.
    ///
    /// Returns `false` (leaving `canvas` untouched) when there is nothing to redo.
    pub fn redo(&mut self, canvas: &mut Raster) -> bool {
        let Some(next) = self.redo.pop() else {
            return false;
        };
        let current = std::mem::replace(canvas, next);
        self.undo.push_back(current);
        while self.undo.len() > self.limit {
            self.undo.pop_front();
        }
        true
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Drops every snapshot on both stacks.
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}
