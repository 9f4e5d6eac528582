//! Pairs game engine - core FSM and round logic.
//!
//! This module provides:
//! - Deck building and the card/player entities
//! - A typed state machine over the four game phases
//! - The round engine (reveal, match, mismatch, turn rotation)
//! - Events and views for whoever drives the machine

// Submodules
pub mod constants;
pub mod entities;
pub mod errors;
pub mod state_machine;
pub mod states;
pub mod timer;

mod implementation;

pub use implementation::PairState;
pub use state_machine::{
    Epoch, Game, GameData, GameEvent, GameStateManagement, IgnoreReason, RoundOutcome,
    RoundState, SelectOutcome,
};
