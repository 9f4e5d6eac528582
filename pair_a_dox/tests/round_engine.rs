//! Integration tests for the round engine
//!
//! These tests drive `PairState` directly, with no clock and no actor, and
//! check reveal, match, mismatch and completion rules.

use pair_a_dox::game::{
    GameData, GameEvent, GameStateManagement, IgnoreReason, PairState, SelectOutcome,
    entities::{CardId, FaceId, GameMode, GamePhase},
};
use pair_a_dox::gateway::{BestTime, SubmitOutcome};

fn faces(ids: &[&str]) -> Vec<FaceId> {
    ids.iter().map(|id| FaceId::new(id)).collect()
}

/// Game dealt in `mode` with a fixed seed, events from setup discarded
fn playing(ids: &[&str], mode: GameMode) -> PairState {
    let data = GameData::with_seed(faces(ids), 11).unwrap();
    let mut state = PairState::from(data);
    state.advance();
    state.choose_mode(mode);
    assert_eq!(state.phase(), GamePhase::Playing);
    state.take_events();
    state
}

fn pair_of(state: &PairState, face: &str) -> (CardId, CardId) {
    let positions = state
        .round()
        .unwrap()
        .deck
        .positions_of(&FaceId::new(face));
    assert_eq!(positions.len(), 2);
    (positions[0], positions[1])
}

/// One card of `a` and one of `b`
fn mismatch_of(state: &PairState, a: &str, b: &str) -> (CardId, CardId) {
    (pair_of(state, a).0, pair_of(state, b).0)
}

fn pending_epoch(events: &[GameEvent]) -> u64 {
    events
        .iter()
        .find_map(|e| match e {
            GameEvent::MismatchPending { epoch, .. } => Some(*epoch),
            _ => None,
        })
        .expect("mismatch should be pending")
}

// === Selection Tests ===

#[test]
fn test_first_selection_reveals_card() {
    let mut state = playing(&["a", "b"], GameMode::Solo);
    let (first, _) = pair_of(&state, "a");

    assert_eq!(state.select_card(first), SelectOutcome::Revealed);

    let round = state.round().unwrap();
    assert_eq!(round.selection, vec![first]);
    assert!(round.deck.get(first).unwrap().revealed);
    assert!(!round.input_locked);
}

#[test]
fn test_double_select_does_not_duplicate() {
    let mut state = playing(&["a", "b"], GameMode::Solo);
    let (first, _) = pair_of(&state, "a");

    state.select_card(first);
    let outcome = state.select_card(first);

    assert_eq!(outcome, SelectOutcome::Ignored(IgnoreReason::AlreadyRevealed));
    assert_eq!(state.round().unwrap().selection, vec![first]);
}

#[test]
fn test_unknown_card_is_ignored() {
    let mut state = playing(&["a", "b"], GameMode::Solo);
    assert_eq!(
        state.select_card(99),
        SelectOutcome::Ignored(IgnoreReason::UnknownCard)
    );
    assert!(state.round().unwrap().selection.is_empty());
}

#[test]
fn test_matched_card_never_changes_state() {
    let mut state = playing(&["a", "b", "c"], GameMode::Duo);
    let (a1, a2) = pair_of(&state, "a");
    state.select_card(a1);
    state.select_card(a2);
    let before = state.view();

    assert_eq!(
        state.select_card(a1),
        SelectOutcome::Ignored(IgnoreReason::AlreadyMatched)
    );
    assert_eq!(state.view(), before);
}

#[test]
fn test_locked_board_never_changes_state() {
    let mut state = playing(&["a", "b", "c"], GameMode::Solo);
    let (a, b) = mismatch_of(&state, "a", "b");
    let (c, _) = pair_of(&state, "c");
    state.select_card(a);
    state.select_card(b);
    let before = state.view();

    assert_eq!(
        state.select_card(c),
        SelectOutcome::Ignored(IgnoreReason::InputLocked)
    );
    assert_eq!(state.view(), before);
}

// === Match / Mismatch Tests ===

#[test]
fn test_match_keeps_turn_and_scores() {
    let mut state = playing(&["a", "b", "c"], GameMode::Duo);
    let (a1, a2) = pair_of(&state, "a");

    state.select_card(a1);
    let outcome = state.select_card(a2);
    assert_eq!(
        outcome,
        SelectOutcome::Matched {
            round_complete: false
        }
    );

    let round = state.round().unwrap();
    assert!(round.deck.get(a1).unwrap().matched);
    assert!(round.deck.get(a2).unwrap().matched);
    assert_eq!(round.pairs_found, 1);
    assert_eq!(round.players[0].matches_found, 1);
    assert_eq!(round.active_player_idx, 0);
    assert!(!round.input_locked);
    assert!(round.selection.is_empty());
}

#[test]
fn test_mismatch_locks_until_hidden() {
    let mut state = playing(&["a", "b", "c"], GameMode::Duo);
    let (a, b) = mismatch_of(&state, "a", "b");

    state.select_card(a);
    assert_eq!(state.select_card(b), SelectOutcome::Mismatched);

    let round = state.round().unwrap();
    assert!(round.input_locked);
    assert!(round.deck.get(a).unwrap().revealed);
    assert!(round.deck.get(b).unwrap().revealed);
    assert_eq!(round.active_player_idx, 0);

    let events: Vec<_> = state.take_events().into();
    let epoch = pending_epoch(&events);
    assert!(state.hide_mismatch(epoch));

    let round = state.round().unwrap();
    assert!(!round.input_locked);
    assert!(!round.deck.get(a).unwrap().revealed);
    assert!(!round.deck.get(b).unwrap().revealed);
    assert!(round.selection.is_empty());
    assert_eq!(round.active_player_idx, 1);
}

#[test]
fn test_mismatch_in_solo_keeps_player() {
    let mut state = playing(&["a", "b"], GameMode::Solo);
    let (a, b) = mismatch_of(&state, "a", "b");
    state.select_card(a);
    state.select_card(b);

    let epoch = state.epoch();
    assert!(state.hide_mismatch(epoch));
    assert_eq!(state.round().unwrap().active_player_idx, 0);
}

#[test]
fn test_duo_turn_wraps_around() {
    let mut state = playing(&["a", "b", "c"], GameMode::Duo);
    let epoch = state.epoch();

    for expected in [1, 0] {
        let (a, b) = mismatch_of(&state, "a", "b");
        state.select_card(a);
        state.select_card(b);
        state.hide_mismatch(epoch);
        assert_eq!(state.round().unwrap().active_player_idx, expected);

        let view = state.view();
        let active = view.active_player().unwrap();
        assert_eq!(active.name, format!("Player {}", expected + 1));
    }
}

#[test]
fn test_hide_without_pending_mismatch_is_ignored() {
    let mut state = playing(&["a", "b"], GameMode::Duo);
    let epoch = state.epoch();
    assert!(!state.hide_mismatch(epoch));
    assert_eq!(state.round().unwrap().active_player_idx, 0);
}

#[test]
fn test_stale_hide_after_restart_is_ignored() {
    let mut state = playing(&["a", "b"], GameMode::Duo);
    let (a, b) = mismatch_of(&state, "a", "b");
    state.select_card(a);
    state.select_card(b);
    let stale = state.epoch();

    state.restart();
    state.advance();
    state.choose_mode(GameMode::Duo);
    let (c, d) = mismatch_of(&state, "a", "b");
    state.select_card(c);
    state.select_card(d);

    assert!(!state.hide_mismatch(stale));
    assert!(state.round().unwrap().input_locked);
}

// === Completion Tests ===

#[test]
fn test_single_face_solo_round_wins() {
    let mut state = playing(&["only"], GameMode::Solo);
    state.tick();
    state.tick();

    let outcome = state.select_card(0);
    assert_eq!(outcome, SelectOutcome::Revealed);
    assert_eq!(
        state.select_card(1),
        SelectOutcome::Matched {
            round_complete: true
        }
    );

    assert_eq!(state.phase(), GamePhase::Finished);
    assert!(!state.timer_running());
    let view = state.view();
    assert_eq!(view.pairs_found, 1);
    assert_eq!(view.elapsed_seconds, 2);
    assert_eq!(
        view.message.as_deref(),
        Some("YOU WON! Found all 1 pairs in 2s.")
    );
}

#[test]
fn test_elapsed_frozen_after_completion() {
    let mut state = playing(&["only"], GameMode::Solo);
    state.tick();
    state.select_card(0);
    state.select_card(1);

    assert!(!state.tick());
    assert_eq!(state.view().elapsed_seconds, 1);
}

#[test]
fn test_solo_round_completes_once() {
    let mut state = playing(&["a", "b"], GameMode::Solo);
    let (a1, a2) = pair_of(&state, "a");
    let (b1, b2) = pair_of(&state, "b");

    for card in [a1, a2, b1, b2] {
        state.select_card(card);
    }
    assert_eq!(state.phase(), GamePhase::Finished);

    let events: Vec<_> = state.take_events().into();
    let completions = events
        .iter()
        .filter(|e| matches!(e, GameEvent::RoundCompleted { .. }))
        .count();
    assert_eq!(completions, 1);
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::RoundCompleted {
            mode: GameMode::Solo,
            elapsed_seconds: 0,
            ..
        }
    )));

    // Nothing left to select on the finished board.
    assert_eq!(
        state.select_card(a1),
        SelectOutcome::Ignored(IgnoreReason::NotPlaying)
    );
}

fn score(state: &mut PairState, face: &str) {
    let (p, q) = pair_of(state, face);
    state.select_card(p);
    state.select_card(q);
}

fn miss(state: &mut PairState, a: &str, b: &str) {
    let (x, y) = mismatch_of(state, a, b);
    state.select_card(x);
    state.select_card(y);
    let epoch = state.epoch();
    assert!(state.hide_mismatch(epoch));
}

#[test]
fn test_duo_winner_message() {
    let mut state = playing(&["a", "b", "c", "d"], GameMode::Duo);

    score(&mut state, "a");
    miss(&mut state, "b", "c");
    assert_eq!(state.round().unwrap().active_player_idx, 1);
    score(&mut state, "b");
    miss(&mut state, "c", "d");
    score(&mut state, "c");
    score(&mut state, "d");

    assert_eq!(state.phase(), GamePhase::Finished);
    let players = &state.round().unwrap().players;
    assert_eq!(players[0].matches_found, 3);
    assert_eq!(players[1].matches_found, 1);
    assert_eq!(state.message(), Some("Player 1 WINS with 3 matches!"));
}

#[test]
fn test_duo_second_player_can_win() {
    let mut state = playing(&["a", "b", "c"], GameMode::Duo);

    miss(&mut state, "a", "b");
    score(&mut state, "a");
    score(&mut state, "b");
    score(&mut state, "c");

    assert_eq!(state.message(), Some("Player 2 WINS with 3 matches!"));
}

#[test]
fn test_duo_equal_scores_is_a_tie() {
    let mut state = playing(&["a", "b", "c", "d"], GameMode::Duo);

    score(&mut state, "a");
    score(&mut state, "b");
    miss(&mut state, "c", "d");
    assert_eq!(state.round().unwrap().active_player_idx, 1);
    score(&mut state, "c");
    score(&mut state, "d");

    assert_eq!(state.phase(), GamePhase::Finished);
    let players = &state.round().unwrap().players;
    assert_eq!(players[0].matches_found, 2);
    assert_eq!(players[1].matches_found, 2);
    assert_eq!(state.message(), Some("IT'S A TIE! What a close game."));
}

#[test]
fn test_duo_completion_has_no_timer_events() {
    let mut state = playing(&["a"], GameMode::Duo);
    state.select_card(0);
    state.select_card(1);

    let events: Vec<_> = state.take_events().into();
    assert!(!events.iter().any(|e| matches!(
        e,
        GameEvent::TimerStarted { .. } | GameEvent::TimerStopped { .. }
    )));
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::RoundCompleted {
            mode: GameMode::Duo,
            ..
        }
    )));
}

// === Best Time Tests ===

fn finish_solo(state: &mut PairState) {
    state.select_card(0);
    state.select_card(1);
    assert_eq!(state.phase(), GamePhase::Finished);
}

#[test]
fn test_new_record_updates_message() {
    let mut state = playing(&["only"], GameMode::Solo);
    for _ in 0..7 {
        state.tick();
    }
    finish_solo(&mut state);

    let outcome = SubmitOutcome {
        new_record: true,
        highscore: BestTime { time: 7 },
    };
    assert!(state.apply_submit_outcome(state.epoch(), &outcome));
    assert_eq!(state.best_time(), Some(7));
    assert_eq!(
        state.message(),
        Some("You completed all the pairs!\nNEW PERSONAL BEST: 7s")
    );
}

#[test]
fn test_slower_time_keeps_record() {
    let mut state = playing(&["only"], GameMode::Solo);
    state.apply_fetched_best_time(Some(3));
    finish_solo(&mut state);

    let outcome = SubmitOutcome {
        new_record: false,
        highscore: BestTime { time: 3 },
    };
    assert!(state.apply_submit_outcome(state.epoch(), &outcome));
    assert_eq!(state.best_time(), Some(3));
    assert_eq!(state.message(), Some("You completed all the pairs!"));
}

#[test]
fn test_stale_submit_after_restart_is_ignored() {
    let mut state = playing(&["only"], GameMode::Solo);
    finish_solo(&mut state);
    let stale = state.epoch();
    state.restart();

    let outcome = SubmitOutcome {
        new_record: true,
        highscore: BestTime { time: 1 },
    };
    assert!(!state.apply_submit_outcome(stale, &outcome));
    assert_eq!(state.best_time(), None);
    assert_eq!(state.message(), None);
}

// === Restart Tests ===

#[test]
fn test_restart_returns_to_start_from_anywhere() {
    let mut state = playing(&["a", "b"], GameMode::Solo);
    state.restart();
    assert_eq!(state.phase(), GamePhase::Start);

    state.advance();
    state.restart();
    assert_eq!(state.phase(), GamePhase::Start);

    state.restart();
    assert_eq!(state.phase(), GamePhase::Start);
}

#[test]
fn test_restart_keeps_best_time() {
    let mut state = playing(&["a"], GameMode::Solo);
    state.apply_fetched_best_time(Some(12));
    state.restart();

    assert_eq!(state.best_time(), Some(12));
    let view = state.view();
    assert!(view.cards.is_empty());
    assert_eq!(view.elapsed_seconds, 0);
}

#[test]
fn test_restart_mid_solo_stops_timer() {
    let mut state = playing(&["a", "b"], GameMode::Solo);
    state.restart();

    let events: Vec<_> = state.take_events().into();
    assert!(matches!(events[0], GameEvent::TimerStopped { .. }));
    assert!(matches!(events[1], GameEvent::Restarted { .. }));
    assert!(!state.tick());
}

#[test]
fn test_new_round_reshuffles_with_fresh_state() {
    let mut state = playing(&["a", "b", "c"], GameMode::Duo);
    let (a1, a2) = pair_of(&state, "a");
    state.select_card(a1);
    state.select_card(a2);

    state.restart();
    state.advance();
    state.choose_mode(GameMode::Solo);

    let view = state.view();
    assert_eq!(view.mode, Some(GameMode::Solo));
    assert_eq!(view.players.len(), 1);
    assert_eq!(view.pairs_found, 0);
    assert!(view.cards.iter().all(|c| c.face.is_none()));
    assert!(state.timer_running());
}
