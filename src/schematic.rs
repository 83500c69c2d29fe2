/// Sparse voxel structure with support queries
use std::collections::BTreeMap;

use thiserror::Error;

use crate::constants::SUPPORT_CHECK_OFFSET;

/// Target-space coordinate (x, y, z).
pub type Position = (i32, i32, i32);

/// What occupies a queried coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occupancy<'a> {
    Filled(&'a str),
    Void,
}

/// The coordinate below the queried one is not representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no coordinate exists below ({x}, {y}, {z})")]
pub struct SupportQueryError {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

/// Sparse structure being assembled, keyed by coordinate.
/// Iteration over placements is coordinate-ordered and deterministic.
#[derive(Debug, Default, Clone)]
pub struct Schematic {
    blocks: BTreeMap<Position, String>,
}

impl Schematic {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a block, overwriting any prior occupant.
    /// Returns the displaced block so callers can keep net counts.
    pub fn set_block(&mut self, position: Position, id: &str) -> Option<String> {
        self.blocks.insert(position, id.to_string())
    }

    pub fn block_at(&self, position: Position) -> Option<&str> {
        self.blocks.get(&position).map(String::as_str)
    }

    /// What occupies the coordinate directly below `position`.
    /// Fails when no such coordinate exists (y underflow).
    pub fn occupant_below(
        &self,
        (x, y, z): Position,
    ) -> Result<Occupancy<'_>, SupportQueryError> {
        let below = y
            .checked_add(SUPPORT_CHECK_OFFSET)
            .ok_or(SupportQueryError { x, y, z })?;

        Ok(match self.blocks.get(&(x, below, z)) {
            Some(id) => Occupancy::Filled(id),
            None => Occupancy::Void,
        })
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Placements in coordinate order.
    pub fn placements(&self) -> impl Iterator<Item = (Position, &str)> {
        self.blocks.iter().map(|(pos, id)| (*pos, id.as_str()))
    }
}
