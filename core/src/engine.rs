use ndarray::Array2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Valid transitions:
/// - AwaitingFirstPick -> AwaitingSecondPick
/// - AwaitingSecondPick -> AwaitingFirstPick (match)
/// - AwaitingSecondPick -> AllMatched (last match)
/// - AwaitingSecondPick -> Resolving (mismatch)
/// - Resolving -> AwaitingFirstPick
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    AwaitingFirstPick,
    AwaitingSecondPick,
    /// Showing a mismatched pair, input gate closed.
    Resolving,
    AllMatched,
}

impl EngineState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::AllMatched)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::AwaitingFirstPick
    }
}

/// Flip/match state machine for one board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchEngine {
    board: Array2<Cell>,
    selection: [Option<Coord2>; 2],
    input_enabled: bool,
    matched_count: CellCount,
    state: EngineState,
}

impl MatchEngine {
    pub fn new(layout: PairLayout) -> Self {
        let size = layout.size();
        let board = Array2::from_shape_fn(size.to_nd_index(), |(row, col)| {
            Cell::new(layout[(row as Coord, col as Coord)])
        });
        Self {
            board,
            selection: [None; 2],
            input_enabled: true,
            matched_count: 0,
            state: Default::default(),
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn is_input_enabled(&self) -> bool {
        self.input_enabled
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.board.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        self.board.len() as CellCount
    }

    pub fn matched_count(&self) -> CellCount {
        self.matched_count
    }

    /// Positions currently picked but not yet resolved, in pick order.
    pub fn selection(&self) -> SmallVec<[Coord2; 2]> {
        self.selection.iter().flatten().copied().collect()
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.board[coords.to_nd_index()]
    }

    pub fn view_at(&self, coords: Coord2) -> CellView {
        self.cell_at(coords).view()
    }

    fn contains(&self, (row, col): Coord2) -> bool {
        let (rows, cols) = self.size();
        row < rows && col < cols
    }

    pub fn can_pick_at(&self, coords: Coord2) -> bool {
        self.input_enabled
            && self.selection[1].is_none()
            && self.contains(coords)
            && self.cell_at(coords).can_flip()
    }

    pub fn pick(&mut self, coords: Coord2) -> PickOutcome {
        if !self.can_pick_at(coords) {
            log::trace!("ignored pick at {:?} in {:?}", coords, self.state);
            return PickOutcome::NoChange;
        }

        self.board[coords.to_nd_index()].select();

        match self.selection {
            [None, _] => {
                self.selection[0] = Some(coords);
                self.state = EngineState::AwaitingSecondPick;
                log::trace!("first pick at {:?}", coords);
                PickOutcome::Selected
            }
            [Some(first), None] => {
                self.selection[1] = Some(coords);
                log::trace!("second pick at {:?}", coords);
                self.resolve(first, coords)
            }
            [Some(_), Some(_)] => unreachable!("checked by can_pick_at"),
        }
    }

    fn resolve(&mut self, first: Coord2, second: Coord2) -> PickOutcome {
        if self.cell_at(first).pair_id() != self.cell_at(second).pair_id() {
            self.input_enabled = false;
            self.state = EngineState::Resolving;
            log::trace!("mismatch between {:?} and {:?}", first, second);
            return PickOutcome::Mismatched;
        }

        self.board[first.to_nd_index()].mark_matched();
        self.board[second.to_nd_index()].mark_matched();
        self.matched_count += 2;
        self.selection = [None; 2];
        log::trace!("match between {:?} and {:?}", first, second);

        if self.check_all_matched() {
            PickOutcome::AllMatched
        } else {
            self.state = EngineState::AwaitingFirstPick;
            PickOutcome::Matched
        }
    }

    /// Flips a mismatched pair back face-down and reopens the input gate.
    pub fn complete_mismatch(&mut self) -> PickOutcome {
        let [Some(first), Some(second)] = self.selection else {
            log::warn!("no mismatch to complete in {:?}", self.state);
            return PickOutcome::NoChange;
        };
        if !matches!(self.state, EngineState::Resolving) {
            log::warn!("no mismatch to complete in {:?}", self.state);
            return PickOutcome::NoChange;
        }

        self.board[first.to_nd_index()].hide();
        self.board[second.to_nd_index()].hide();
        self.selection = [None; 2];
        self.input_enabled = true;
        self.state = EngineState::AwaitingFirstPick;
        log::trace!("reverted {:?} and {:?}", first, second);
        PickOutcome::Reverted
    }

    /// Moves to the terminal state the first time every cell is matched.
    fn check_all_matched(&mut self) -> bool {
        if self.state.is_finished() || self.matched_count != self.total_cells() {
            return false;
        }
        self.state = EngineState::AllMatched;
        log::debug!("all {} cells matched", self.matched_count);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(size: Coord2, pair_ids: &[PairId]) -> MatchEngine {
        MatchEngine::new(PairLayout::from_pair_ids(size, pair_ids).unwrap())
    }

    fn two_by_two() -> MatchEngine {
        engine((2, 2), &[0, 1, 0, 1])
    }

    #[test]
    fn matching_pair_stays_face_up_without_closing_the_gate() {
        let mut engine = two_by_two();

        assert_eq!(engine.pick((0, 0)), PickOutcome::Selected);
        assert_eq!(engine.state(), EngineState::AwaitingSecondPick);
        assert_eq!(engine.pick((1, 0)), PickOutcome::Matched);

        assert_eq!(engine.cell_at((0, 0)).state(), CellState::Matched);
        assert_eq!(engine.cell_at((1, 0)).state(), CellState::Matched);
        assert!(engine.is_input_enabled());
        assert!(engine.selection().is_empty());
        assert_eq!(engine.state(), EngineState::AwaitingFirstPick);
        assert_eq!(engine.matched_count(), 2);
    }

    #[test]
    fn clearing_the_board_reports_all_matched_once() {
        let mut engine = two_by_two();

        engine.pick((0, 0));
        engine.pick((1, 0));
        engine.pick((0, 1));
        assert_eq!(engine.pick((1, 1)), PickOutcome::AllMatched);
        assert!(engine.is_finished());
        assert_eq!(engine.matched_count(), engine.total_cells());

        assert_eq!(engine.pick((1, 1)), PickOutcome::NoChange);
        assert_eq!(engine.complete_mismatch(), PickOutcome::NoChange);
        assert_eq!(engine.state(), EngineState::AllMatched);
    }

    #[test]
    fn mismatch_closes_gate_until_completed() {
        let mut engine = two_by_two();

        engine.pick((0, 0));
        assert_eq!(engine.pick((0, 1)), PickOutcome::Mismatched);
        assert!(!engine.is_input_enabled());
        assert_eq!(engine.state(), EngineState::Resolving);
        assert_eq!(engine.cell_at((0, 0)).state(), CellState::Selected);
        assert_eq!(engine.cell_at((0, 1)).state(), CellState::Selected);
        assert_eq!(engine.selection().as_slice(), &[(0, 0), (0, 1)]);

        let before = engine.clone();
        assert_eq!(engine.pick((1, 0)), PickOutcome::NoChange);
        assert_eq!(engine.pick((1, 1)), PickOutcome::NoChange);
        assert_eq!(engine, before);

        assert_eq!(engine.complete_mismatch(), PickOutcome::Reverted);
        assert!(engine.is_input_enabled());
        assert_eq!(engine.cell_at((0, 0)).state(), CellState::Hidden);
        assert_eq!(engine.cell_at((0, 1)).state(), CellState::Hidden);
        assert!(engine.cell_at((0, 0)).can_flip());
        assert!(engine.selection().is_empty());
        assert_eq!(engine.state(), EngineState::AwaitingFirstPick);
    }

    #[test]
    fn unflippable_cells_ignore_picks() {
        let mut engine = two_by_two();

        engine.pick((0, 0));
        let before = engine.clone();
        assert_eq!(engine.pick((0, 0)), PickOutcome::NoChange);
        assert_eq!(engine, before);

        engine.pick((1, 0));
        let before = engine.clone();
        assert_eq!(engine.pick((1, 0)), PickOutcome::NoChange);
        assert_eq!(engine, before);
    }

    #[test]
    fn out_of_bounds_pick_is_ignored() {
        let mut engine = two_by_two();
        assert_eq!(engine.pick((2, 0)), PickOutcome::NoChange);
        assert_eq!(engine.pick((0, 7)), PickOutcome::NoChange);
        assert_eq!(engine.state(), EngineState::AwaitingFirstPick);
    }

    #[test]
    fn complete_mismatch_without_resolution_is_ignored() {
        let mut engine = two_by_two();
        assert_eq!(engine.complete_mismatch(), PickOutcome::NoChange);

        engine.pick((0, 0));
        assert_eq!(engine.complete_mismatch(), PickOutcome::NoChange);
        assert_eq!(engine.cell_at((0, 0)).state(), CellState::Selected);
    }

    #[test]
    fn view_exposes_flip_state_and_image() {
        let mut engine = engine((1, 2), &[4, 4]);
        assert_eq!(
            engine.view_at((0, 1)),
            CellView {
                is_flipped: false,
                can_flip: true,
                image_id: 4,
            }
        );
        engine.pick((0, 1));
        assert!(engine.view_at((0, 1)).is_flipped);
        assert!(!engine.view_at((0, 1)).can_flip);
    }
}
