//! Phase definitions for the pairs FSM.
//!
//! Each state represents one screen of the game lifecycle.

use crate::game::entities::GamePhase;
use crate::game::state_machine::{Phase, RoundOutcome, RoundState};

/// Title screen
#[derive(Debug, Default)]
pub struct Start {}

/// Choosing between solo and duo
#[derive(Debug, Default)]
pub struct ModeSelect {}

/// A round in progress
#[derive(Debug)]
pub struct Playing {
    pub round: RoundState,
}

/// All pairs found; waiting for a restart
#[derive(Debug)]
pub struct Finished {
    pub round: RoundState,
    pub outcome: RoundOutcome,
}

impl Phase for Start {
    const PHASE: GamePhase = GamePhase::Start;
}

impl Phase for ModeSelect {
    const PHASE: GamePhase = GamePhase::ModeSelect;
}

impl Phase for Playing {
    const PHASE: GamePhase = GamePhase::Playing;

    fn round(&self) -> Option<&RoundState> {
        Some(&self.round)
    }
}

impl Phase for Finished {
    const PHASE: GamePhase = GamePhase::Finished;

    fn round(&self) -> Option<&RoundState> {
        Some(&self.round)
    }
}
