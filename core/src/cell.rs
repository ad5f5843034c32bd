use serde::{Deserialize, Serialize};

use crate::PairId;

/// Mutable per-position state owned by the match engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pair_id: PairId,
    pub(crate) is_flipped: bool,
    pub(crate) is_matched: bool,
    pub(crate) can_flip: bool,
}

impl Cell {
    pub const fn new(pair_id: PairId) -> Self {
        Self {
            pair_id,
            is_flipped: false,
            is_matched: false,
            can_flip: true,
        }
    }

    pub const fn pair_id(self) -> PairId {
        self.pair_id
    }

    pub const fn is_flipped(self) -> bool {
        self.is_flipped
    }

    pub const fn is_matched(self) -> bool {
        self.is_matched
    }

    pub const fn can_flip(self) -> bool {
        self.can_flip
    }

    pub const fn state(self) -> CellState {
        if self.is_matched {
            CellState::Matched
        } else if self.is_flipped {
            CellState::Selected
        } else {
            CellState::Hidden
        }
    }

    pub const fn view(self) -> CellView {
        CellView {
            is_flipped: self.is_flipped,
            can_flip: self.can_flip,
            image_id: self.pair_id,
        }
    }

    pub(crate) fn select(&mut self) {
        self.is_flipped = true;
        self.can_flip = false;
    }

    pub(crate) fn mark_matched(&mut self) {
        self.is_flipped = true;
        self.is_matched = true;
        self.can_flip = false;
    }

    pub(crate) fn hide(&mut self) {
        debug_assert!(!self.is_matched, "matched cells never flip back");
        self.is_flipped = false;
        self.can_flip = true;
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    Hidden,
    Selected,
    Matched,
}

/// Read-only projection handed to renderers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub is_flipped: bool,
    pub can_flip: bool,
    pub image_id: PairId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_follows_hidden_selected_matched() {
        let mut cell = Cell::new(3);
        assert_eq!(cell.state(), CellState::Hidden);
        assert!(cell.can_flip());

        cell.select();
        assert_eq!(cell.state(), CellState::Selected);
        assert!(!cell.can_flip());

        cell.hide();
        assert_eq!(cell.state(), CellState::Hidden);

        cell.select();
        cell.mark_matched();
        assert_eq!(cell.state(), CellState::Matched);
        assert_eq!(
            cell.view(),
            CellView {
                is_flipped: true,
                can_flip: false,
                image_id: 3,
            }
        );
    }
}
