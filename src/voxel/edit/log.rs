//! In-memory history of voxel removals.

use crate::core::types::{IVec3, Result};
use crate::voxel::grid::VoxelGrid;

/// A single recorded removal
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EditRecord {
    /// Unique, increasing identifier
    pub id: u64,
    /// Frame in which the removal was applied
    pub frame: u64,
    /// Removed cell
    pub coord: IVec3,
}

/// Append-only log of removals supporting undo.
#[derive(Debug)]
pub struct EditLog {
    records: Vec<EditRecord>,
    next_id: u64,
}

impl EditLog {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
        }
    }

    /// Record a removal and return its id
    pub fn record(&mut self, frame: u64, coord: IVec3) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.records.push(EditRecord { id, frame, coord });
        id
    }

    /// Restore the most recent removal.
    ///
    /// Returns the reverted record, or `None` if the log is empty.
    pub fn undo_last(&mut self, grid: &mut VoxelGrid) -> Result<Option<EditRecord>> {
        let Some(record) = self.records.last().copied() else {
            return Ok(None);
        };
        grid.set_solid_at(record.coord, true)?;
        self.records.pop();
        log::debug!("Undid edit {} at {}", record.id, record.coord);
        Ok(Some(record))
    }

    /// All records, oldest first
    pub fn records(&self) -> &[EditRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for EditLog {
    fn default() -> Self {
        Self::new()
    }
}
