use alloc::format;
use alloc::string::String;
use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Team {
    Red,
    Blue,
}

impl Team {
    pub const fn other(self) -> Self {
        match self {
            Self::Red => Self::Blue,
            Self::Blue => Self::Red,
        }
    }

    /// Coin flip for which team opens the game.
    pub fn random(seed: u64) -> Self {
        use rand::prelude::*;
        use rand::rngs::SmallRng;

        if SmallRng::seed_from_u64(seed).random_bool(0.5) {
            Self::Red
        } else {
            Self::Blue
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Red => "Red",
            Self::Blue => "Blue",
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    Team(Team),
    Tie,
}

/// Turn and score keeping for two alternating teams, driven only by match events.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    red: u32,
    blue: u32,
    current: Team,
    winner: Option<Winner>,
}

impl Scoreboard {
    pub const POINTS_PER_MATCH: u32 = 10;

    pub const fn new(first: Team) -> Self {
        Self {
            red: 0,
            blue: 0,
            current: first,
            winner: None,
        }
    }

    pub fn reset(&mut self, first: Team) {
        *self = Self::new(first);
    }

    pub const fn score(&self, team: Team) -> u32 {
        match team {
            Team::Red => self.red,
            Team::Blue => self.blue,
        }
    }

    pub const fn current(&self) -> Team {
        self.current
    }

    pub const fn winner(&self) -> Option<Winner> {
        self.winner
    }

    /// Header text: whose turn it is, or the final result.
    pub fn status_line(&self) -> String {
        match self.winner {
            None => format!("{}'s turn", self.current),
            Some(Winner::Team(team)) => format!("Winner: {}", team),
            Some(Winner::Tie) => String::from("It's a tie"),
        }
    }

    pub fn score_line(&self) -> String {
        format!("Score - Red: {}, Blue: {}", self.red, self.blue)
    }

    fn score_mut(&mut self, team: Team) -> &mut u32 {
        match team {
            Team::Red => &mut self.red,
            Team::Blue => &mut self.blue,
        }
    }
}

impl MatchListener for Scoreboard {
    fn on_successful_match(&mut self) {
        let team = self.current;
        let score = self.score_mut(team);
        *score = score.saturating_add(Self::POINTS_PER_MATCH);
    }

    fn on_failed_match(&mut self) {
        self.current = self.current.other();
    }

    fn on_all_matched(&mut self) {
        if self.winner.is_some() {
            return;
        }
        let winner = match self.red.cmp(&self.blue) {
            core::cmp::Ordering::Greater => Winner::Team(Team::Red),
            core::cmp::Ordering::Less => Winner::Team(Team::Blue),
            core::cmp::Ordering::Equal => Winner::Tie,
        };
        log::debug!("game over: {:?}", winner);
        self.winner = Some(winner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn successful_match_scores_for_current_team_and_keeps_turn() {
        let mut board = Scoreboard::new(Team::Red);
        board.on_successful_match();

        assert_eq!(board.score(Team::Red), 10);
        assert_eq!(board.score(Team::Blue), 0);
        assert_eq!(board.current(), Team::Red);
    }

    #[test]
    fn failed_match_passes_the_turn() {
        let mut board = Scoreboard::new(Team::Red);
        board.on_failed_match();
        assert_eq!(board.current(), Team::Blue);
        assert_eq!(board.status_line(), "Blue's turn");
        board.on_failed_match();
        assert_eq!(board.current(), Team::Red);
    }

    #[test]
    fn final_match_counts_towards_the_winner() {
        let mut board = Scoreboard::new(Team::Red);
        board.on_successful_match();
        board.on_failed_match();
        board.on_successful_match();
        board.on_successful_match();
        board.on_all_matched();

        assert_eq!(board.winner(), Some(Winner::Team(Team::Blue)));
        assert_eq!(board.status_line(), "Winner: Blue");
        assert_eq!(board.score_line(), "Score - Red: 10, Blue: 20");
    }

    #[test]
    fn equal_scores_tie() {
        let mut board = Scoreboard::new(Team::Blue);
        board.on_successful_match();
        board.on_failed_match();
        board.on_successful_match();
        board.on_all_matched();

        assert_eq!(board.winner(), Some(Winner::Tie));
        assert_eq!(board.status_line(), "It's a tie");
    }

    #[test]
    fn reset_clears_scores_and_winner() {
        let mut board = Scoreboard::new(Team::Red);
        board.on_successful_match();
        board.on_all_matched();
        board.reset(Team::Blue);
        assert_eq!(board, Scoreboard::new(Team::Blue));
    }

    #[test]
    fn random_first_team_is_deterministic_per_seed() {
        assert_eq!(Team::random(3), Team::random(3));
        assert_eq!(Team::Red.other(), Team::Blue);
    }

    #[test]
    fn session_events_drive_the_scoreboard() {
        use alloc::vec::Vec;

        struct Immediate;
        impl Scheduler for Immediate {
            type Task = ();
            fn schedule(&mut self, _delay_ms: u32) {}
        }

        let layout = PairLayout::from_pair_ids((2, 2), &[0, 1, 0, 1]).unwrap();
        let mut session = MatchSession::new(MatchEngine::new(layout), 0, Immediate);
        let mut board = Scoreboard::new(Team::Red);

        session.pick((0, 0), &mut board);
        session.pick((0, 1), &mut board);
        session.fire_pending(&mut board);
        assert_eq!(board.current(), Team::Blue);

        let picks: Vec<Coord2> = alloc::vec![(0, 0), (1, 0), (0, 1), (1, 1)];
        for coords in picks {
            session.pick(coords, &mut board);
        }
        assert_eq!(board.score(Team::Blue), 20);
        assert_eq!(board.winner(), Some(Winner::Team(Team::Blue)));
    }
}
