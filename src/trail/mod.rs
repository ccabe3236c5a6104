// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Trail-based backtracking for the combination search.
//!
//! The row under construction is a slice of cells, one per column, each
//! holding the index of the chosen value or `None`. Every write goes through
//! [`Trail::set`], which records the old content. Rewinding to a checkpoint
//! replays the records backwards and restores the cells exactly.

/// A row cell: the chosen value index of one column, if any.
pub type Cell = Option<usize>;

/// One recorded write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TrailEntry {
    /// Column whose cell was written.
    slot: usize,
    /// Cell content before the write.
    old_value: Cell,
}

/// The undo log.
///
/// Checkpoints are plain trail lengths, so the engine can keep one per stack
/// entry without the trail knowing about it.
#[derive(Debug)]
pub struct Trail {
    entries: Vec<TrailEntry>,
}

impl Trail {
    /// A row has at most one write per column per choice, so this is generous.
    const MAX_SIZE: usize = 16384;

    pub fn new() -> Self {
        Self {
            entries: Vec::with_capacity(64),
        }
    }

    /// The current position, to be passed to [`rewind_to`](Self::rewind_to).
    pub fn checkpoint(&self) -> usize {
        self.entries.len()
    }

    /// Write `value` into `cells[slot]`, recording the previous content.
    ///
    /// # Panics
    ///
    /// Panics if the trail exceeds its maximum size, which indicates a search bug.
    pub fn set(&mut self, cells: &mut [Cell], slot: usize, value: Cell) {
        if self.entries.len() >= Self::MAX_SIZE {
            panic!("Trail overflow: exceeded {} entries", Self::MAX_SIZE);
        }
        self.entries.push(TrailEntry {
            slot,
            old_value: cells[slot],
        });
        cells[slot] = value;
    }

    /// Undo every write made since `checkpoint`, newest first.
    pub fn rewind_to(&mut self, checkpoint: usize, cells: &mut [Cell]) {
        while self.entries.len() > checkpoint {
            if let Some(entry) = self.entries.pop() {
                cells[entry.slot] = entry.old_value;
            }
        }
    }

    /// Forget all records without touching any cell.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Trail {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trail_new() {
        let trail = Trail::new();
        assert_eq!(trail.len(), 0);
        assert!(trail.is_empty());
    }

    #[test]
    fn test_set_and_rewind() {
        let mut trail = Trail::new();
        let mut cells = vec![None; 3];

        trail.set(&mut cells, 0, Some(4));
        let checkpoint = trail.checkpoint();
        trail.set(&mut cells, 1, Some(2));
        trail.set(&mut cells, 0, Some(5));
        assert_eq!(cells, vec![Some(5), Some(2), None]);

        trail.rewind_to(checkpoint, &mut cells);
        assert_eq!(cells, vec![Some(4), None, None]);
        assert_eq!(trail.len(), 1);

        trail.rewind_to(0, &mut cells);
        assert_eq!(cells, vec![None, None, None]);
        assert!(trail.is_empty());
    }

    #[test]
    fn test_nested_checkpoints() {
        let mut trail = Trail::new();
        let mut cells = vec![None; 2];

        let outer = trail.checkpoint();
        trail.set(&mut cells, 0, Some(1));
        let inner = trail.checkpoint();
        trail.set(&mut cells, 1, Some(1));
        trail.set(&mut cells, 1, Some(2));

        trail.rewind_to(inner, &mut cells);
        assert_eq!(cells, vec![Some(1), None]);
        trail.rewind_to(outer, &mut cells);
        assert_eq!(cells, vec![None, None]);
    }

    #[test]
    fn test_rewind_past_end_is_noop() {
        let mut trail = Trail::new();
        let mut cells = vec![Some(3)];
        trail.rewind_to(10, &mut cells);
        assert_eq!(cells, vec![Some(3)]);
    }

    #[test]
    #[should_panic(expected = "Trail overflow")]
    fn test_trail_overflow() {
        let mut trail = Trail::new();
        let mut cells = vec![None; 1];
        for i in 0..Trail::MAX_SIZE + 1 {
            trail.set(&mut cells, 0, Some(i));
        }
    }
}
