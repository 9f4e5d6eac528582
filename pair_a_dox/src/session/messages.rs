//! Session actor message types.

use tokio::sync::{mpsc, oneshot};
use uuid::Uuid;

use crate::game::{
    Epoch,
    entities::{CardId, GameMode, GameView},
};
use crate::gateway::{BestTime, GatewayResult, SubmitOutcome};

/// Messages that can be sent to a GameActor
#[derive(Debug)]
pub enum SessionMessage {
    /// Leave the title screen
    Advance {
        response: oneshot::Sender<GameView>,
    },

    /// Deal a round in the given mode
    ChooseMode {
        mode: GameMode,
        response: oneshot::Sender<GameView>,
    },

    /// Turn a card over
    SelectCard {
        card_id: CardId,
        response: oneshot::Sender<GameView>,
    },

    /// Back to the title screen from anywhere
    Restart {
        response: oneshot::Sender<GameView>,
    },

    /// Get current game view
    GetView {
        response: oneshot::Sender<GameView>,
    },

    /// Subscribe to state change notifications
    Subscribe {
        subscriber_id: Uuid,
        sender: mpsc::Sender<StateChangeNotification>,
    },

    /// Unsubscribe from state change notifications
    Unsubscribe { subscriber_id: Uuid },

    /// Stop the session
    Close { response: oneshot::Sender<()> },

    /// Internal: reveal delay for a mismatch elapsed
    HideMismatch { epoch: Epoch },

    /// Internal: answer to the best-time lookup
    BestTimeFetched(GatewayResult<Option<BestTime>>),

    /// Internal: answer to a submitted solo time
    BestTimeSubmitted {
        epoch: Epoch,
        result: GatewayResult<SubmitOutcome>,
    },
}

/// Notification sent when the session's view changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateChangeNotification {
    /// Board, phase or message changed
    StateChanged,
    /// Solo clock advanced
    TimerTicked,
    /// Best time changed
    BestTimeChanged,
}
