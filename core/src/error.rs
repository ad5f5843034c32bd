use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board must have at least one row and one column")]
    EmptyBoard,
    #[error("Board must have an even number of cells, got {0}")]
    OddCellCount(crate::CellCount),
    #[error("Every pair id must appear exactly twice on the board")]
    InvalidLayout,
}

pub type Result<T> = core::result::Result<T, GameError>;
