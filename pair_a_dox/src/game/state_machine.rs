//! Pairs game state machine data.
//!
//! Holds the data shared by every phase, the per-round aggregate, the events
//! queued for whoever drives the machine, and the phase-independent trait.

use enum_dispatch::enum_dispatch;
use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use std::{collections::VecDeque, fmt};

use super::constants::DEFAULT_FACE_IDS;
use super::entities::{
    CardId, CardView, Deck, FaceId, GameMode, GamePhase, GameView, Player, Seconds,
    validate_faces,
};
use super::errors::ConfigResult;
use super::timer::SoloTimer;

/// Round generation. Bumped every time a round starts or the game restarts
/// so late continuations from an older round can be recognised.
pub type Epoch = u64;

/// Events that occur during gameplay
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum GameEvent {
    ModeChosen { epoch: Epoch, mode: GameMode },
    CardRevealed(CardId),
    PairMatched { player: u8, face: FaceId },
    /// Two different faces are up. The board stays locked until
    /// `hide_mismatch` is called with the same epoch.
    MismatchPending { epoch: Epoch, cards: [CardId; 2] },
    MismatchHidden { cards: [CardId; 2], next_player: usize },
    TimerStarted { epoch: Epoch },
    TimerStopped { epoch: Epoch, elapsed_seconds: Seconds },
    RoundCompleted {
        epoch: Epoch,
        mode: GameMode,
        elapsed_seconds: Seconds,
    },
    BestTimeUpdated(Seconds),
    Restarted { epoch: Epoch },
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::ModeChosen { mode, .. } => format!("{mode} round started"),
            Self::CardRevealed(id) => format!("card {id} revealed"),
            Self::PairMatched { player, face } => format!("player {player} matched {face}"),
            Self::MismatchPending { cards, .. } => {
                format!("cards {} and {} don't match", cards[0], cards[1])
            }
            Self::MismatchHidden { next_player, .. } => {
                format!("cards hidden, player {} to move", next_player + 1)
            }
            Self::TimerStarted { .. } => "timer started".to_string(),
            Self::TimerStopped {
                elapsed_seconds, ..
            } => format!("timer stopped at {elapsed_seconds}s"),
            Self::RoundCompleted {
                mode,
                elapsed_seconds,
                ..
            } => format!("{mode} round completed in {elapsed_seconds}s"),
            Self::BestTimeUpdated(time) => format!("best time is now {time}s"),
            Self::Restarted { .. } => "game restarted".to_string(),
        };
        write!(f, "{repr}")
    }
}

/// Why a card selection didn't do anything.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum IgnoreReason {
    NotPlaying,
    InputLocked,
    UnknownCard,
    AlreadyRevealed,
    AlreadyMatched,
}

/// Result of a single card selection.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SelectOutcome {
    Ignored(IgnoreReason),
    /// First card of a pair is up.
    Revealed,
    Matched { round_complete: bool },
    /// Second card didn't match; waiting on the hide step.
    Mismatched,
}

impl SelectOutcome {
    pub fn is_ignored(&self) -> bool {
        matches!(self, Self::Ignored(_))
    }

    pub fn completes_round(&self) -> bool {
        matches!(
            self,
            Self::Matched {
                round_complete: true
            }
        )
    }
}

/// Mutable game data shared across all phases
#[derive(Debug)]
pub struct GameData {
    /// Faces dealt at the start of every round. Validated once here so
    /// dealing can't fail later.
    pub(super) faces: Vec<FaceId>,
    pub(super) rng: StdRng,
    pub best_time: Option<Seconds>,
    pub(super) epoch: Epoch,
    /// Result line shown on the finished screen.
    pub message: Option<String>,
    pub(super) events: VecDeque<GameEvent>,
}

impl Default for GameData {
    fn default() -> Self {
        Self::from_parts(
            DEFAULT_FACE_IDS.iter().map(|f| FaceId::new(f)).collect(),
            StdRng::from_os_rng(),
        )
    }
}

impl GameData {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_faces(faces: Vec<FaceId>) -> ConfigResult<Self> {
        validate_faces(&faces)?;
        Ok(Self::from_parts(faces, StdRng::from_os_rng()))
    }

    /// Deterministic deals, mostly for tests and benches.
    pub fn with_seed(faces: Vec<FaceId>, seed: u64) -> ConfigResult<Self> {
        validate_faces(&faces)?;
        Ok(Self::from_parts(faces, StdRng::seed_from_u64(seed)))
    }

    /// Stand-in left in place while a transition owns the real data. No
    /// faces and a fixed seed, so it never touches OS entropy.
    pub(super) fn placeholder() -> Self {
        Self::from_parts(Vec::new(), StdRng::seed_from_u64(0))
    }

    fn from_parts(faces: Vec<FaceId>, rng: StdRng) -> Self {
        Self {
            faces,
            rng,
            best_time: None,
            epoch: 0,
            message: None,
            events: VecDeque::new(),
        }
    }

    pub fn faces(&self) -> &[FaceId] {
        &self.faces
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub(super) fn bump_epoch(&mut self) -> Epoch {
        self.epoch += 1;
        self.epoch
    }
}

/// Everything that belongs to one round and is thrown away afterwards.
#[derive(Clone, Debug)]
pub struct RoundState {
    pub mode: GameMode,
    pub deck: Deck,
    pub players: Vec<Player>,
    pub active_player_idx: usize,
    /// Face-up cards awaiting evaluation; never more than two.
    pub selection: Vec<CardId>,
    pub input_locked: bool,
    pub pairs_found: u32,
    pub timer: SoloTimer,
    /// Mismatched pair waiting to be turned back over.
    pub pending_hide: Option<[CardId; 2]>,
}

impl RoundState {
    pub fn new(mode: GameMode, deck: Deck) -> Self {
        let players = (1..=mode.player_count() as u8).map(Player::new).collect();
        Self {
            mode,
            deck,
            players,
            active_player_idx: 0,
            selection: Vec::with_capacity(2),
            input_locked: false,
            pairs_found: 0,
            timer: SoloTimer::default(),
            pending_hide: None,
        }
    }

    pub fn total_pairs(&self) -> u32 {
        self.deck.total_pairs()
    }

    pub fn is_complete(&self) -> bool {
        self.pairs_found == self.total_pairs()
    }

    pub fn active_player_mut(&mut self) -> &mut Player {
        &mut self.players[self.active_player_idx]
    }
}

/// How a finished round ended.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum RoundOutcome {
    Solo { pairs: u32, elapsed_seconds: Seconds },
    DuoWinner(Player),
    DuoTie { matches_each: u32 },
}

impl RoundOutcome {
    pub fn from_round(round: &RoundState) -> Self {
        match round.mode {
            GameMode::Solo => Self::Solo {
                pairs: round.pairs_found,
                elapsed_seconds: round.timer.elapsed_seconds(),
            },
            GameMode::Duo => {
                let (p1, p2) = (&round.players[0], &round.players[1]);
                if p1.matches_found > p2.matches_found {
                    Self::DuoWinner(p1.clone())
                } else if p2.matches_found > p1.matches_found {
                    Self::DuoWinner(p2.clone())
                } else {
                    Self::DuoTie {
                        matches_each: p1.matches_found,
                    }
                }
            }
        }
    }
}

impl fmt::Display for RoundOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Solo {
                pairs,
                elapsed_seconds,
            } => write!(f, "YOU WON! Found all {pairs} pairs in {elapsed_seconds}s."),
            Self::DuoWinner(player) => {
                write!(f, "{} WINS with {} matches!", player.name, player.matches_found)
            }
            Self::DuoTie { .. } => write!(f, "IT'S A TIE! What a close game."),
        }
    }
}

/// Trait for state that doesn't depend on the phase (views, events)
#[enum_dispatch]
pub trait GameStateManagement {
    fn drain_events(&mut self) -> VecDeque<GameEvent>;

    /// Snapshot for the presentation layer
    #[must_use]
    fn get_view(&self) -> GameView;

    fn phase(&self) -> GamePhase;

    fn epoch(&self) -> Epoch;

    fn best_time(&self) -> Option<Seconds>;
}

/// Implemented by every phase marker so views can be built generically.
pub trait Phase {
    const PHASE: GamePhase;

    fn round(&self) -> Option<&RoundState> {
        None
    }
}

/// A pairs game in phase `T`.
#[derive(Debug)]
pub struct Game<T> {
    pub data: GameData,
    pub state: T,
}

impl<T: Phase> GameStateManagement for Game<T> {
    fn drain_events(&mut self) -> VecDeque<GameEvent> {
        std::mem::take(&mut self.data.events)
    }

    fn get_view(&self) -> GameView {
        let round = self.state.round();
        GameView {
            phase: T::PHASE,
            mode: round.map(|r| r.mode),
            cards: round
                .map(|r| r.deck.iter().map(CardView::from).collect())
                .unwrap_or_default(),
            players: round.map(|r| r.players.clone()).unwrap_or_default(),
            active_player_idx: round.map_or(0, |r| r.active_player_idx),
            input_locked: round.is_some_and(|r| r.input_locked),
            pairs_found: round.map_or(0, |r| r.pairs_found),
            total_pairs: round.map_or(self.data.faces.len() as u32, RoundState::total_pairs),
            elapsed_seconds: round.map_or(0, |r| r.timer.elapsed_seconds()),
            best_time: self.data.best_time,
            message: self.data.message.clone(),
        }
    }

    fn phase(&self) -> GamePhase {
        T::PHASE
    }

    fn epoch(&self) -> Epoch {
        self.data.epoch
    }

    fn best_time(&self) -> Option<Seconds> {
        self.data.best_time
    }
}
