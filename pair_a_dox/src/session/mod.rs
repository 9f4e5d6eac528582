//! Session module driving one game with an async actor.
//!
//! This module implements:
//! - GameActor: async actor owning a single `PairState`
//! - GameHandle: cloneable handle the presentation layer talks to
//! - Deferred work (mismatch hide, solo clock, best-time calls) fed back
//!   through the actor's inbox
//!
//! ## Architecture
//!
//! Each session runs in its own Tokio task with an mpsc message inbox.
//! Every mutation of the game happens inside that task, one message at a
//! time. Timers and gateway calls run in spawned tasks and report back as
//! messages stamped with the round epoch, so answers meant for an older
//! round are dropped by the engine.
//!
//! ## Example
//!
//! ```no_run
//! use pair_a_dox::session::{GameActor, SessionConfig};
//! use pair_a_dox::game::entities::GameMode;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, handle) = GameActor::with_http_gateway(SessionConfig::default())?;
//!     tokio::spawn(actor.run());
//!
//!     handle.advance().await?;
//!     let view = handle.choose_mode(GameMode::Solo).await?;
//!     println!("{} pairs to find", view.total_pairs);
//!     Ok(())
//! }
//! ```

pub mod actor;
pub mod config;
pub mod errors;
pub mod messages;

pub use actor::{GameActor, GameHandle};
pub use config::SessionConfig;
pub use errors::{SessionError, SessionResult};
pub use messages::{SessionMessage, StateChangeNotification};
