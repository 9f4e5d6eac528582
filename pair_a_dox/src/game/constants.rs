use std::time::Duration;

/// Face identifiers used for a standard 36-card board.
pub const DEFAULT_FACE_IDS: [&str; 18] = [
    "ghost", "pumpkin", "bat", "cauldron", "skull", "spider", "moon", "candle", "broom",
    "potion", "owl", "crow", "cat", "mummy", "zombie", "web", "lantern", "tombstone",
];

/// Smaller face set from the first version of the board.
pub const EMOJI_FACE_IDS: [&str; 8] = ["🍎", "🍌", "🍇", "🍓", "🍍", "🥝", "🍑", "🍒"];

/// How long a mismatched pair stays face-up before it is hidden again.
pub const DEFAULT_REVEAL_DELAY: Duration = Duration::from_millis(1000);

/// Period of the solo timer.
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_secs(1);

pub const SOLO_PLAYERS: usize = 1;
pub const DUO_PLAYERS: usize = 2;

/// Cards per face. Changing this breaks pair evaluation.
pub const CARDS_PER_FACE: usize = 2;
