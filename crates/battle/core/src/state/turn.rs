use std::collections::VecDeque;

use crate::hero::HeroId;
use crate::team::TeamId;

/// Round-based turn bookkeeping.
///
/// Each round every living hero acts once, fastest first. Extra turns are
/// pushed to the front of the queue.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    /// Set by `start_battle`, cleared by `finish_battle`.
    pub started: bool,

    /// Current round, starting at 1 once the first turn is prepared.
    pub round: u32,

    /// The hero currently taking its turn.
    pub whose_turn: Option<HeroId>,

    /// Heroes still waiting to act this round, next first.
    pub queue: VecDeque<HeroId>,

    /// Set once one team has no living members.
    pub winner: Option<TeamId>,
}

impl TurnState {
    pub fn new() -> Self {
        Self {
            started: false,
            round: 0,
            whose_turn: None,
            queue: VecDeque::new(),
            winner: None,
        }
    }
}

impl Default for TurnState {
    fn default() -> Self {
        Self::new()
    }
}
