//! # PAIR-A-DOX
//!
//! A memory-matching "pairs" game engine using a type-safe finite state
//! machine (FSM) design.
//!
//! Cards are dealt face down in pairs. Players turn two over per turn: a
//! match stays up and the same player goes again, a mismatch is shown
//! briefly, hidden, and the turn passes. Solo rounds are timed and the best
//! time is kept by a remote store.
//!
//! ## Architecture
//!
//! The game moves through four phases:
//!
//! - **Start**: Title screen
//! - **ModeSelect**: Choosing solo or duo
//! - **Playing**: A round in progress
//! - **Finished**: All pairs found, result shown
//!
//! ## Core Modules
//!
//! - [`game`]: Game state machine, entities, deck building and round logic
//! - [`gateway`]: Best-time store interface with HTTP and in-memory adapters
//! - [`session`]: Async actor that drives one game, its timers and gateway calls
//!
//! ## Example
//!
//! ```
//! use pair_a_dox::{GameStateManagement, PairState};
//! use pair_a_dox::game::entities::{GameMode, GamePhase};
//!
//! let mut game = PairState::new();
//! game.advance();
//! game.choose_mode(GameMode::Solo);
//! assert_eq!(game.phase(), GamePhase::Playing);
//! ```

/// Core game logic, entities, and state machine.
pub mod game;
pub use game::{
    GameData, GameEvent, GameStateManagement, PairState, SelectOutcome,
    constants::{self, DEFAULT_FACE_IDS},
    entities::{self, CardView, FaceId, GameMode, GamePhase, GameView},
    errors::{ConfigError, ConfigResult},
};

/// Best-time store.
pub mod gateway;
pub use gateway::{BestTime, BestTimeGateway, GatewayError, SubmitOutcome};

/// Async session actor.
pub mod session;
pub use session::{GameActor, GameHandle, SessionConfig, SessionError};
