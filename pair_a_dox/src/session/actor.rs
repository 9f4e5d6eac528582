//! Session actor implementation with async message handling.

use super::{
    config::SessionConfig,
    errors::{SessionError, SessionResult},
    messages::{SessionMessage, StateChangeNotification},
};
use crate::{
    game::{
        Epoch, GameData, GameEvent, PairState,
        entities::{CardId, GameMode, GameView, Seconds},
    },
    gateway::{BestTimeGateway, HttpBestTimeGateway},
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::{
    sync::{mpsc, oneshot},
    time::{Instant, Interval, interval_at, sleep},
};
use uuid::Uuid;

const INBOX_CAPACITY: usize = 100;
const SUBSCRIBER_CAPACITY: usize = 32;

/// Game session handle for sending messages
#[derive(Clone, Debug)]
pub struct GameHandle {
    sender: mpsc::Sender<SessionMessage>,
    session_id: Uuid,
}

impl GameHandle {
    /// Create a new session handle
    pub fn new(sender: mpsc::Sender<SessionMessage>, session_id: Uuid) -> Self {
        Self { sender, session_id }
    }

    /// Get session ID
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Send a message to the session
    pub async fn send(&self, message: SessionMessage) -> SessionResult<()> {
        self.sender
            .send(message)
            .await
            .map_err(|_| SessionError::Closed)
    }

    async fn request<T>(
        &self,
        message: impl FnOnce(oneshot::Sender<T>) -> SessionMessage,
    ) -> SessionResult<T> {
        let (response, reply) = oneshot::channel();
        self.send(message(response)).await?;
        reply.await.map_err(|_| SessionError::Closed)
    }

    pub async fn advance(&self) -> SessionResult<GameView> {
        self.request(|response| SessionMessage::Advance { response })
            .await
    }

    pub async fn choose_mode(&self, mode: GameMode) -> SessionResult<GameView> {
        self.request(|response| SessionMessage::ChooseMode { mode, response })
            .await
    }

    pub async fn select_card(&self, card_id: CardId) -> SessionResult<GameView> {
        self.request(|response| SessionMessage::SelectCard { card_id, response })
            .await
    }

    pub async fn restart(&self) -> SessionResult<GameView> {
        self.request(|response| SessionMessage::Restart { response })
            .await
    }

    pub async fn view(&self) -> SessionResult<GameView> {
        self.request(|response| SessionMessage::GetView { response })
            .await
    }

    /// Register for change notifications. Dropping the receiver is enough to
    /// unsubscribe.
    pub async fn subscribe(
        &self,
    ) -> SessionResult<(Uuid, mpsc::Receiver<StateChangeNotification>)> {
        let (sender, receiver) = mpsc::channel(SUBSCRIBER_CAPACITY);
        let subscriber_id = Uuid::new_v4();
        self.send(SessionMessage::Subscribe {
            subscriber_id,
            sender,
        })
        .await?;
        Ok((subscriber_id, receiver))
    }

    pub async fn unsubscribe(&self, subscriber_id: Uuid) -> SessionResult<()> {
        self.send(SessionMessage::Unsubscribe { subscriber_id })
            .await
    }

    /// Stop the session. Later calls on any clone fail with
    /// [`SessionError::Closed`].
    pub async fn close(&self) -> SessionResult<()> {
        self.request(|response| SessionMessage::Close { response })
            .await
    }
}

/// Actor owning a single game session
pub struct GameActor {
    /// Session ID
    id: Uuid,

    /// Session configuration
    config: SessionConfig,

    /// Pairs game state (FSM)
    state: PairState,

    /// Message inbox
    inbox: mpsc::Receiver<SessionMessage>,

    /// Route back into the inbox for deferred work. Weak so the session
    /// ends once every handle is gone.
    outbox: mpsc::WeakSender<SessionMessage>,

    /// Best-time store
    gateway: Arc<dyn BestTimeGateway>,

    /// Solo clock, armed only while a solo round is running
    ticker: Option<Interval>,

    /// State change subscribers
    subscribers: HashMap<Uuid, mpsc::Sender<StateChangeNotification>>,

    /// Is session closed
    is_closed: bool,
}

impl GameActor {
    /// Create a new session actor
    ///
    /// # Arguments
    ///
    /// * `config` - Session configuration
    /// * `gateway` - Best-time store
    ///
    /// # Returns
    ///
    /// * `(GameActor, GameHandle)` - Actor and handle for sending messages
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Config` if the configuration is invalid.
    pub fn new(
        config: SessionConfig,
        gateway: Arc<dyn BestTimeGateway>,
    ) -> SessionResult<(Self, GameHandle)> {
        config.validate()?;

        let data = match config.seed {
            Some(seed) => GameData::with_seed(config.face_ids.clone(), seed)?,
            None => GameData::with_faces(config.face_ids.clone())?,
        };

        let (sender, inbox) = mpsc::channel(INBOX_CAPACITY);
        let id = Uuid::new_v4();

        let actor = Self {
            id,
            config,
            state: data.into(),
            inbox,
            outbox: sender.downgrade(),
            gateway,
            ticker: None,
            subscribers: HashMap::new(),
            is_closed: false,
        };

        let handle = GameHandle::new(sender, id);

        Ok((actor, handle))
    }

    /// Create a session talking to the best-time server at
    /// `config.gateway_url`.
    pub fn with_http_gateway(config: SessionConfig) -> SessionResult<(Self, GameHandle)> {
        let gateway =
            HttpBestTimeGateway::with_timeout(config.gateway_url.clone(), config.request_timeout())?;
        Self::new(config, Arc::new(gateway))
    }

    /// Build the actor, spawn it on the current runtime and return its handle
    pub fn spawn(
        config: SessionConfig,
        gateway: Arc<dyn BestTimeGateway>,
    ) -> SessionResult<GameHandle> {
        let (actor, handle) = Self::new(config, gateway)?;
        tokio::spawn(actor.run());
        Ok(handle)
    }

    /// Run the session actor event loop
    pub async fn run(mut self) {
        log::info!(
            "Session {} starting with {} faces",
            self.id,
            self.config.face_ids.len()
        );

        self.spawn_fetch();

        loop {
            tokio::select! {
                // Handle incoming messages
                message = self.inbox.recv() => {
                    let Some(message) = message else {
                        break;
                    };
                    self.handle_message(message);

                    if self.is_closed {
                        break;
                    }
                }

                // Solo clock
                _ = next_tick(&mut self.ticker), if self.ticker.is_some() => {
                    self.tick();
                }
            }
        }

        log::info!("Session {} closed", self.id);
    }

    /// Handle a message
    fn handle_message(&mut self, message: SessionMessage) {
        match message {
            SessionMessage::Advance { response } => {
                self.state.advance();
                self.respond(response);
            }

            SessionMessage::ChooseMode { mode, response } => {
                self.state.choose_mode(mode);
                self.respond(response);
            }

            SessionMessage::SelectCard { card_id, response } => {
                let outcome = self.state.select_card(card_id);
                log::debug!("Session {}: card {} -> {:?}", self.id, card_id, outcome);
                self.respond(response);
            }

            SessionMessage::Restart { response } => {
                self.state.restart();
                self.respond(response);
            }

            SessionMessage::GetView { response } => {
                let _ = response.send(self.state.view());
            }

            SessionMessage::Subscribe {
                subscriber_id,
                sender,
            } => {
                self.subscribers.insert(subscriber_id, sender);
                log::debug!(
                    "Subscriber {} subscribed to session {}",
                    subscriber_id,
                    self.id
                );
            }

            SessionMessage::Unsubscribe { subscriber_id } => {
                self.subscribers.remove(&subscriber_id);
                log::debug!(
                    "Subscriber {} unsubscribed from session {}",
                    subscriber_id,
                    self.id
                );
            }

            SessionMessage::Close { response } => {
                self.is_closed = true;
                self.ticker = None;
                let _ = response.send(());
            }

            SessionMessage::HideMismatch { epoch } => {
                if self.state.hide_mismatch(epoch) {
                    self.process_events();
                    self.notify_state_change(StateChangeNotification::StateChanged);
                }
            }

            SessionMessage::BestTimeFetched(result) => match result {
                Ok(best) => {
                    self.state.apply_fetched_best_time(best.map(|b| b.time));
                    self.process_events();
                }
                Err(e) => {
                    log::warn!("Session {}: failed to fetch best time: {}", self.id, e);
                }
            },

            SessionMessage::BestTimeSubmitted { epoch, result } => match result {
                Ok(outcome) => {
                    if self.state.apply_submit_outcome(epoch, &outcome) {
                        if outcome.new_record {
                            log::info!(
                                "Session {}: new personal best {}s",
                                self.id,
                                outcome.highscore.time
                            );
                        }
                        self.process_events();
                        self.notify_state_change(StateChangeNotification::StateChanged);
                    }
                }
                Err(e) => {
                    log::warn!("Session {}: failed to submit time: {}", self.id, e);
                }
            },
        }
    }

    fn respond(&mut self, response: oneshot::Sender<GameView>) {
        self.process_events();
        self.notify_state_change(StateChangeNotification::StateChanged);
        let _ = response.send(self.state.view());
    }

    /// Turn queued game events into timers and gateway calls
    fn process_events(&mut self) {
        let events = self.state.take_events();
        if events.is_empty() {
            return;
        }
        log::debug!("Session {} generated {} events", self.id, events.len());

        let mut best_time_changed = false;
        for event in events {
            log::debug!("Session {}: {}", self.id, event);
            match event {
                GameEvent::MismatchPending { epoch, .. } => self.schedule_hide(epoch),
                GameEvent::TimerStarted { .. } => self.arm_ticker(),
                GameEvent::TimerStopped { .. } => self.ticker = None,
                GameEvent::RoundCompleted {
                    epoch,
                    mode,
                    elapsed_seconds,
                } => {
                    log::info!(
                        "Session {}: {} round {} completed in {}s",
                        self.id,
                        mode,
                        epoch,
                        elapsed_seconds
                    );
                    if mode == GameMode::Solo {
                        self.spawn_submit(epoch, elapsed_seconds);
                    }
                }
                GameEvent::Restarted { .. } => {
                    self.ticker = None;
                    self.spawn_fetch();
                }
                GameEvent::BestTimeUpdated(_) => best_time_changed = true,
                _ => {}
            }
        }

        if best_time_changed {
            self.notify_state_change(StateChangeNotification::BestTimeChanged);
        }
    }

    /// One period of the solo clock
    fn tick(&mut self) {
        if self.state.tick() {
            self.notify_state_change(StateChangeNotification::TimerTicked);
        }
    }

    /// First tick lands one full period after the round starts.
    fn arm_ticker(&mut self) {
        let period = self.config.tick_period();
        self.ticker = Some(interval_at(Instant::now() + period, period));
    }

    fn schedule_hide(&self, epoch: Epoch) {
        let delay = self.config.reveal_delay();
        let outbox = self.outbox.clone();
        tokio::spawn(async move {
            sleep(delay).await;
            deliver(&outbox, SessionMessage::HideMismatch { epoch }).await;
        });
    }

    fn spawn_fetch(&self) {
        let gateway = Arc::clone(&self.gateway);
        let outbox = self.outbox.clone();
        tokio::spawn(async move {
            let result = gateway.fetch_best_time().await;
            deliver(&outbox, SessionMessage::BestTimeFetched(result)).await;
        });
    }

    fn spawn_submit(&self, epoch: Epoch, elapsed_seconds: Seconds) {
        let gateway = Arc::clone(&self.gateway);
        let outbox = self.outbox.clone();
        tokio::spawn(async move {
            let result = gateway.submit_time(elapsed_seconds).await;
            deliver(&outbox, SessionMessage::BestTimeSubmitted { epoch, result }).await;
        });
    }

    /// Broadcast state change notification to all subscribers
    fn notify_state_change(&mut self, notification: StateChangeNotification) {
        self.subscribers.retain(|subscriber_id, sender| {
            match sender.try_send(notification) {
                Ok(_) => true,
                Err(mpsc::error::TrySendError::Full(_)) => {
                    log::warn!(
                        "Subscriber {} channel full, dropping notification",
                        subscriber_id
                    );
                    true
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    log::debug!("Subscriber {} disconnected, removing", subscriber_id);
                    false
                }
            }
        });
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending().await,
    }
}

/// Send to the actor if it is still running.
async fn deliver(outbox: &mpsc::WeakSender<SessionMessage>, message: SessionMessage) {
    if let Some(sender) = outbox.upgrade() {
        let _ = sender.send(message).await;
    }
}
