//! Phase transitions and the round engine.

use enum_dispatch::enum_dispatch;
use log::{debug, error, info};
use std::collections::VecDeque;

use super::entities::{CardId, Deck, GameMode, GamePhase, GameView, Seconds};
use super::errors::ConfigResult;
use super::state_machine::{
    Epoch, Game, GameData, GameEvent, GameStateManagement, IgnoreReason, RoundOutcome,
    RoundState, SelectOutcome,
};
use super::states::{Finished, ModeSelect, Playing, Start};
use crate::gateway::SubmitOutcome;

const COMPLETED_MESSAGE: &str = "You completed all the pairs!";

impl From<GameData> for Game<Start> {
    fn from(data: GameData) -> Self {
        Self {
            data,
            state: Start {},
        }
    }
}

impl From<Game<Start>> for Game<ModeSelect> {
    fn from(value: Game<Start>) -> Self {
        Self {
            data: value.data,
            state: ModeSelect {},
        }
    }
}

impl Game<ModeSelect> {
    fn deal(&mut self) -> ConfigResult<Deck> {
        Deck::build(&self.data.faces, &mut self.data.rng)
    }

    fn start_round(mut self, mode: GameMode, deck: Deck) -> Game<Playing> {
        let epoch = self.data.bump_epoch();
        self.data.message = None;

        let mut round = RoundState::new(mode, deck);
        self.data.events.push_back(GameEvent::ModeChosen { epoch, mode });
        if mode == GameMode::Solo {
            round.timer.start();
            self.data.events.push_back(GameEvent::TimerStarted { epoch });
        }

        info!(
            "Round {epoch} started in {mode} mode with {} cards",
            round.deck.len()
        );
        Game {
            data: self.data,
            state: Playing { round },
        }
    }
}

impl Game<Playing> {
    /// Turns a card over and evaluates the pair once two are up.
    pub fn select_card(&mut self, card_id: CardId) -> SelectOutcome {
        let round = &mut self.state.round;
        if round.input_locked {
            return SelectOutcome::Ignored(IgnoreReason::InputLocked);
        }

        let Some(card) = round.deck.get_mut(card_id) else {
            return SelectOutcome::Ignored(IgnoreReason::UnknownCard);
        };
        if card.matched {
            return SelectOutcome::Ignored(IgnoreReason::AlreadyMatched);
        }
        if card.revealed {
            return SelectOutcome::Ignored(IgnoreReason::AlreadyRevealed);
        }

        card.revealed = true;
        round.selection.push(card_id);
        self.data.events.push_back(GameEvent::CardRevealed(card_id));

        if round.selection.len() < 2 {
            return SelectOutcome::Revealed;
        }
        self.evaluate()
    }

    fn evaluate(&mut self) -> SelectOutcome {
        let round = &mut self.state.round;
        round.input_locked = true;

        let cards = [round.selection[0], round.selection[1]];
        let faces = (round.deck.get(cards[0]), round.deck.get(cards[1]));
        let matched_face = match faces {
            (Some(a), Some(b)) if a.face == b.face => Some(a.face.clone()),
            _ => None,
        };

        let Some(face) = matched_face else {
            round.pending_hide = Some(cards);
            self.data.events.push_back(GameEvent::MismatchPending {
                epoch: self.data.epoch,
                cards,
            });
            return SelectOutcome::Mismatched;
        };

        for id in cards {
            if let Some(card) = round.deck.get_mut(id) {
                card.matched = true;
                card.revealed = true;
            }
        }
        let player = round.active_player_mut();
        player.matches_found += 1;
        let player_id = player.id;
        round.pairs_found += 1;
        round.selection.clear();
        round.input_locked = false;

        self.data.events.push_back(GameEvent::PairMatched {
            player: player_id,
            face,
        });
        SelectOutcome::Matched {
            round_complete: round.is_complete(),
        }
    }

    /// Second half of a mismatch: hides the pair, passes the turn in duo
    /// mode and unlocks the board. Returns false for a stale or spurious
    /// call.
    pub fn hide_mismatch(&mut self, epoch: Epoch) -> bool {
        if epoch != self.data.epoch {
            debug!("Ignoring hide for round {epoch}, current is {}", self.data.epoch);
            return false;
        }

        let round = &mut self.state.round;
        let Some(cards) = round.pending_hide.take() else {
            return false;
        };

        for id in cards {
            if let Some(card) = round.deck.get_mut(id) {
                card.revealed = false;
            }
        }
        round.selection.clear();
        if round.mode == GameMode::Duo {
            round.active_player_idx = (round.active_player_idx + 1) % round.players.len();
        }
        round.input_locked = false;

        self.data.events.push_back(GameEvent::MismatchHidden {
            cards,
            next_player: round.active_player_idx,
        });
        true
    }

    pub fn tick(&mut self) -> bool {
        self.state.round.timer.tick()
    }

    fn stop_timer(&mut self) {
        let timer = &mut self.state.round.timer;
        if timer.is_running() {
            timer.stop();
            self.data.events.push_back(GameEvent::TimerStopped {
                epoch: self.data.epoch,
                elapsed_seconds: timer.elapsed_seconds(),
            });
        }
    }

    /// Drops the round mid-play.
    fn abandon(mut self) -> Game<Start> {
        self.stop_timer();
        self.data.into()
    }
}

impl From<Game<Playing>> for Game<Finished> {
    fn from(mut value: Game<Playing>) -> Self {
        value.stop_timer();

        let round = value.state.round;
        let outcome = RoundOutcome::from_round(&round);
        let epoch = value.data.epoch;

        value.data.message = Some(outcome.to_string());
        value.data.events.push_back(GameEvent::RoundCompleted {
            epoch,
            mode: round.mode,
            elapsed_seconds: round.timer.elapsed_seconds(),
        });
        info!("Round {epoch} finished: {outcome}");

        Self {
            data: value.data,
            state: Finished { round, outcome },
        }
    }
}

impl From<Game<Finished>> for Game<Start> {
    fn from(value: Game<Finished>) -> Self {
        value.data.into()
    }
}

impl From<Game<ModeSelect>> for Game<Start> {
    fn from(value: Game<ModeSelect>) -> Self {
        value.data.into()
    }
}

/// The whole game: one value per session, owned by whoever drives it.
#[enum_dispatch(GameStateManagement)]
#[derive(Debug)]
pub enum PairState {
    Start(Game<Start>),
    ModeSelect(Game<ModeSelect>),
    Playing(Game<Playing>),
    Finished(Game<Finished>),
}

impl Default for PairState {
    fn default() -> Self {
        Self::new()
    }
}

impl From<GameData> for PairState {
    fn from(value: GameData) -> Self {
        Self::Start(value.into())
    }
}

impl PairState {
    #[must_use]
    pub fn new() -> Self {
        GameData::default().into()
    }

    fn transition(&mut self, f: impl FnOnce(Self) -> Self) {
        let state = std::mem::replace(self, GameData::placeholder().into());
        *self = f(state);
    }

    fn data(&self) -> &GameData {
        match self {
            Self::Start(game) => &game.data,
            Self::ModeSelect(game) => &game.data,
            Self::Playing(game) => &game.data,
            Self::Finished(game) => &game.data,
        }
    }

    fn data_mut(&mut self) -> &mut GameData {
        match self {
            Self::Start(game) => &mut game.data,
            Self::ModeSelect(game) => &mut game.data,
            Self::Playing(game) => &mut game.data,
            Self::Finished(game) => &mut game.data,
        }
    }

    /// Round in progress or just finished.
    pub fn round(&self) -> Option<&RoundState> {
        match self {
            Self::Playing(game) => Some(&game.state.round),
            Self::Finished(game) => Some(&game.state.round),
            _ => None,
        }
    }

    pub fn outcome(&self) -> Option<&RoundOutcome> {
        match self {
            Self::Finished(game) => Some(&game.state.outcome),
            _ => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.data().message.as_deref()
    }

    pub fn timer_running(&self) -> bool {
        match self {
            Self::Playing(game) => game.state.round.timer.is_running(),
            _ => false,
        }
    }

    /// Title screen to mode selection.
    pub fn advance(&mut self) {
        self.transition(|state| match state {
            Self::Start(game) => Self::ModeSelect(game.into()),
            other => {
                debug!("Ignoring advance in {} phase", other.phase());
                other
            }
        });
    }

    /// Deals a fresh round. Only valid while choosing a mode.
    pub fn choose_mode(&mut self, mode: GameMode) {
        self.transition(|state| match state {
            Self::ModeSelect(mut game) => match game.deal() {
                Ok(deck) => Self::Playing(game.start_round(mode, deck)),
                Err(e) => {
                    error!("Failed to deal a {mode} round: {e}");
                    Self::ModeSelect(game)
                }
            },
            other => {
                debug!("Ignoring {mode} mode choice in {} phase", other.phase());
                other
            }
        });
    }

    /// The only play-time intent. Ineligible selections change nothing.
    pub fn select_card(&mut self, card_id: CardId) -> SelectOutcome {
        let Self::Playing(game) = self else {
            return SelectOutcome::Ignored(IgnoreReason::NotPlaying);
        };

        let outcome = game.select_card(card_id);
        if let SelectOutcome::Ignored(reason) = outcome {
            debug!("Ignoring selection of card {card_id}: {reason:?}");
        }
        if outcome.completes_round() {
            self.transition(|state| match state {
                Self::Playing(game) => Self::Finished(game.into()),
                other => other,
            });
        }
        outcome
    }

    /// Scheduled continuation of a mismatch. `epoch` is the one carried by
    /// [`GameEvent::MismatchPending`].
    pub fn hide_mismatch(&mut self, epoch: Epoch) -> bool {
        match self {
            Self::Playing(game) => game.hide_mismatch(epoch),
            _ => false,
        }
    }

    /// One second of solo play.
    pub fn tick(&mut self) -> bool {
        match self {
            Self::Playing(game) => game.tick(),
            _ => false,
        }
    }

    /// Full reset back to the title screen. Anything still in flight for the
    /// previous round is invalidated.
    pub fn restart(&mut self) {
        self.transition(|state| match state {
            Self::Start(game) => Self::Start(game),
            Self::ModeSelect(game) => Self::Start(game.into()),
            Self::Playing(game) => Self::Start(game.abandon()),
            Self::Finished(game) => Self::Start(game.into()),
        });

        let data = self.data_mut();
        let epoch = data.bump_epoch();
        data.message = None;
        data.events.push_back(GameEvent::Restarted { epoch });
        info!("Game restarted (round {epoch})");
    }

    /// Applies a record read from the store. Lower times win, so a slow
    /// answer can't undo a newer record.
    pub fn apply_fetched_best_time(&mut self, fetched: Option<Seconds>) {
        let Some(time) = fetched else {
            return;
        };
        let data = self.data_mut();
        if data.best_time.is_none_or(|best| time < best) {
            data.best_time = Some(time);
            data.events.push_back(GameEvent::BestTimeUpdated(time));
        }
    }

    /// Applies the store's answer to a submitted time. Answers for an older
    /// round are dropped.
    pub fn apply_submit_outcome(&mut self, epoch: Epoch, outcome: &SubmitOutcome) -> bool {
        if epoch != self.data().epoch {
            debug!(
                "Ignoring best-time answer for round {epoch}, current is {}",
                self.data().epoch
            );
            return false;
        }

        let finished = matches!(self, Self::Finished(_));
        let data = self.data_mut();
        if outcome.new_record {
            let time = outcome.highscore.time;
            data.best_time = Some(time);
            data.events.push_back(GameEvent::BestTimeUpdated(time));
            if finished {
                data.message = Some(format!("{COMPLETED_MESSAGE}\nNEW PERSONAL BEST: {time}s"));
            }
        } else if finished {
            data.message = Some(COMPLETED_MESSAGE.to_string());
        }
        true
    }

    pub fn view(&self) -> GameView {
        self.get_view()
    }

    pub fn take_events(&mut self) -> VecDeque<GameEvent> {
        self.drain_events()
    }
}
