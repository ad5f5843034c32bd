#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::ops::Index;
use hashbrown::HashMap;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use score::*;
pub use session::*;
pub use types::*;

mod cell;
mod engine;
mod error;
mod generator;
mod score;
mod session;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub rows: Coord,
    pub cols: Coord,
    pub mismatch_delay_ms: u32,
}

impl GameConfig {
    pub const DEFAULT_ROWS: Coord = 6;
    pub const DEFAULT_COLS: Coord = 5;
    pub const DEFAULT_MISMATCH_DELAY_MS: u32 = 1500;

    pub fn new(rows: Coord, cols: Coord) -> Result<Self> {
        Self {
            rows,
            cols,
            mismatch_delay_ms: Self::DEFAULT_MISMATCH_DELAY_MS,
        }
        .validate()
    }

    pub const fn with_mismatch_delay_ms(self, mismatch_delay_ms: u32) -> Self {
        Self {
            mismatch_delay_ms,
            ..self
        }
    }

    /// Checks the board can be split into pairs, useful after deserializing.
    pub fn validate(self) -> Result<Self> {
        if self.rows == 0 || self.cols == 0 {
            return Err(GameError::EmptyBoard);
        }
        let total_cells = self.total_cells();
        if total_cells % 2 != 0 {
            return Err(GameError::OddCellCount(total_cells));
        }
        Ok(self)
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }

    pub const fn pair_count(&self) -> CellCount {
        self.total_cells() / 2
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: Self::DEFAULT_ROWS,
            cols: Self::DEFAULT_COLS,
            mismatch_delay_ms: Self::DEFAULT_MISMATCH_DELAY_MS,
        }
    }
}

/// Assignment of pair ids to every board position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PairLayout {
    pair_ids: Array2<PairId>,
}

impl PairLayout {
    /// Builds a layout from row-major pair ids, checking each id occurs exactly twice.
    pub fn from_pair_ids(size: Coord2, pair_ids: &[PairId]) -> Result<Self> {
        let config = GameConfig::new(size.0, size.1)?;
        if pair_ids.len() != usize::from(config.total_cells()) {
            return Err(GameError::InvalidLayout);
        }

        let mut occurrences: HashMap<PairId, u8> = HashMap::new();
        for &pair_id in pair_ids {
            let count = occurrences.entry(pair_id).or_default();
            if *count == 2 {
                return Err(GameError::InvalidLayout);
            }
            *count += 1;
        }
        if occurrences.values().any(|&count| count != 2) {
            return Err(GameError::InvalidLayout);
        }

        Self::from_shuffled(size, pair_ids.to_vec())
    }

    pub(crate) fn from_shuffled(size: Coord2, pair_ids: Vec<PairId>) -> Result<Self> {
        let pair_ids = Array2::from_shape_vec(size.to_nd_index(), pair_ids)
            .map_err(|_| GameError::InvalidLayout)?;
        Ok(Self { pair_ids })
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.pair_ids.dim();
        // both dimensions come from a `Coord2`
        (rows as Coord, cols as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        self.pair_ids.len() as CellCount
    }

    pub fn pair_count(&self) -> CellCount {
        self.total_cells() / 2
    }

    pub fn pair_at(&self, coords: Coord2) -> PairId {
        self[coords]
    }

    /// Pair ids in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = PairId> + '_ {
        self.pair_ids.iter().copied()
    }
}

impl Index<Coord2> for PairLayout {
    type Output = PairId;

    fn index(&self, (row, col): Coord2) -> &Self::Output {
        &self.pair_ids[(row as usize, col as usize)]
    }
}

/// Notifications the match engine hands to whoever owns scoring and turns.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchEvent {
    SuccessfulMatch,
    FailedMatch,
    AllMatched,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PickOutcome {
    /// The pick was ignored.
    NoChange,
    /// The cell was flipped into one of the selection slots.
    Selected,
    /// Both picks share a pair id.
    Matched,
    /// Both picks share a pair id and it was the last pair on the board.
    AllMatched,
    /// Both picks differ, the input gate is closed until the reset runs.
    Mismatched,
    /// A pending mismatch has been flipped back.
    Reverted,
}

impl PickOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }

    pub fn events(self) -> SmallVec<[MatchEvent; 2]> {
        use MatchEvent::*;
        match self {
            Self::NoChange | Self::Selected | Self::Mismatched => SmallVec::new(),
            Self::Matched => smallvec::smallvec![SuccessfulMatch],
            Self::AllMatched => smallvec::smallvec![SuccessfulMatch, AllMatched],
            Self::Reverted => smallvec::smallvec![FailedMatch],
        }
    }
}
