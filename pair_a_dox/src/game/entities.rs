use rand::Rng;
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fmt};

use super::{
    constants::{CARDS_PER_FACE, DUO_PLAYERS, SOLO_PLAYERS},
    errors::{ConfigError, ConfigResult},
};

/// Identifier deciding whether two cards match.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FaceId(String);

impl FaceId {
    pub fn new(s: &str) -> Self {
        Self(s.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for FaceId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for FaceId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Position of a card in the dealt deck.
pub type CardId = u32;

/// Whole seconds on the solo clock.
pub type Seconds = u32;

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Card {
    pub id: CardId,
    pub face: FaceId,
    pub revealed: bool,
    pub matched: bool,
}

impl Card {
    /// Whether a player may still turn this card over.
    pub fn is_selectable(&self) -> bool {
        !self.revealed && !self.matched
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.matched {
            write!(f, "[{}]", self.face)
        } else if self.revealed {
            write!(f, "{}", self.face)
        } else {
            write!(f, "#{}", self.id)
        }
    }
}

/// A dealt board: every face exactly twice, in shuffled order.
#[derive(Clone, Debug)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Duplicates each face, shuffles the lot with Fisher-Yates and numbers
    /// the cards in their final order.
    pub fn build<R: Rng + ?Sized>(faces: &[FaceId], rng: &mut R) -> ConfigResult<Self> {
        validate_faces(faces)?;

        let mut shuffled: Vec<FaceId> = faces
            .iter()
            .flat_map(|face| std::iter::repeat_n(face.clone(), CARDS_PER_FACE))
            .collect();
        for i in (1..shuffled.len()).rev() {
            let j = rng.random_range(0..=i);
            shuffled.swap(i, j);
        }

        let cards = shuffled
            .into_iter()
            .enumerate()
            .map(|(idx, face)| Card {
                id: idx as CardId,
                face,
                revealed: false,
                matched: false,
            })
            .collect();
        Ok(Self { cards })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn total_pairs(&self) -> u32 {
        (self.cards.len() / CARDS_PER_FACE) as u32
    }

    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id as usize)
    }

    pub fn get_mut(&mut self, id: CardId) -> Option<&mut Card> {
        self.cards.get_mut(id as usize)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Pairs whose cards are both marked matched.
    pub fn matched_pairs(&self) -> u32 {
        (self.cards.iter().filter(|c| c.matched).count() / CARDS_PER_FACE) as u32
    }

    /// Card ids sharing `face`, in deck order.
    pub fn positions_of(&self, face: &FaceId) -> Vec<CardId> {
        self.cards
            .iter()
            .filter(|c| &c.face == face)
            .map(|c| c.id)
            .collect()
    }
}

/// Checks a face list before it is dealt.
pub fn validate_faces(faces: &[FaceId]) -> ConfigResult<()> {
    if faces.is_empty() {
        return Err(ConfigError::NoFaces);
    }
    let mut seen = HashSet::with_capacity(faces.len());
    for (idx, face) in faces.iter().enumerate() {
        if face.as_str().trim().is_empty() {
            return Err(ConfigError::BlankFace(idx));
        }
        if !seen.insert(face) {
            return Err(ConfigError::DuplicateFace(face.to_string()));
        }
    }
    Ok(())
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    Solo,
    Duo,
}

impl GameMode {
    pub const fn player_count(self) -> usize {
        match self {
            Self::Solo => SOLO_PLAYERS,
            Self::Duo => DUO_PLAYERS,
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Solo => write!(f, "solo"),
            Self::Duo => write!(f, "duo"),
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    Start,
    ModeSelect,
    Playing,
    Finished,
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Start => "start",
            Self::ModeSelect => "mode select",
            Self::Playing => "playing",
            Self::Finished => "finished",
        };
        write!(f, "{repr}")
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Player {
    /// 1 or 2
    pub id: u8,
    pub name: String,
    pub matches_found: u32,
}

impl Player {
    pub fn new(id: u8) -> Self {
        Self {
            id,
            name: format!("Player {id}"),
            matches_found: 0,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.matches_found)
    }
}

/// Card as shown to the presentation layer. Face-down cards don't leak
/// their face.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct CardView {
    pub id: CardId,
    pub face: Option<FaceId>,
    pub revealed: bool,
    pub matched: bool,
}

impl From<&Card> for CardView {
    fn from(card: &Card) -> Self {
        Self {
            id: card.id,
            face: (card.revealed || card.matched).then(|| card.face.clone()),
            revealed: card.revealed,
            matched: card.matched,
        }
    }
}

/// Snapshot handed to whatever draws the board.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct GameView {
    pub phase: GamePhase,
    pub mode: Option<GameMode>,
    pub cards: Vec<CardView>,
    pub players: Vec<Player>,
    pub active_player_idx: usize,
    pub input_locked: bool,
    pub pairs_found: u32,
    pub total_pairs: u32,
    pub elapsed_seconds: Seconds,
    pub best_time: Option<Seconds>,
    pub message: Option<String>,
}

impl GameView {
    pub fn active_player(&self) -> Option<&Player> {
        self.players.get(self.active_player_idx)
    }
}
