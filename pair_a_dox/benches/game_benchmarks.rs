use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use pair_a_dox::{
    DEFAULT_FACE_IDS, GameData, PairState,
    entities::{Deck, FaceId, GameMode},
    game::GameStateManagement,
};
use rand::{SeedableRng, rngs::StdRng};
use std::hint::black_box;

fn faces(n: usize) -> Vec<FaceId> {
    (0..n).map(|i| FaceId::from(format!("face{i}"))).collect()
}

/// Helper to create a solo game dealt with the default faces
fn setup_solo_game() -> PairState {
    let faces = DEFAULT_FACE_IDS.iter().map(|f| FaceId::new(f)).collect();
    let mut game = PairState::from(GameData::with_seed(faces, 7).unwrap());
    game.advance();
    game.choose_mode(GameMode::Solo);
    game
}

/// Play every pair in deck order, card by card
fn play_out(game: &mut PairState) {
    let pairs: Vec<_> = {
        let round = game.round().unwrap();
        round
            .deck
            .iter()
            .filter(|c| c.id == round.deck.positions_of(&c.face)[0])
            .map(|c| round.deck.positions_of(&c.face))
            .collect()
    };
    for pair in pairs {
        game.select_card(pair[0]);
        game.select_card(pair[1]);
    }
}

/// Benchmark deck building for several board sizes
fn bench_deck_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("deck_build");

    for n_faces in [8, 18, 64] {
        let faces = faces(n_faces);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_faces", n_faces)),
            &faces,
            |b, faces| {
                let mut rng = StdRng::seed_from_u64(1);
                b.iter(|| Deck::build(black_box(faces), &mut rng).unwrap());
            },
        );
    }

    group.finish();
}

/// Benchmark a full solo round from mode choice to completion
fn bench_full_solo_round(c: &mut Criterion) {
    c.bench_function("full_solo_round", |b| {
        b.iter_batched(
            setup_solo_game,
            |mut g| {
                play_out(&mut g);
                g
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

/// Benchmark view generation mid-round
fn bench_view_generation(c: &mut Criterion) {
    let game = setup_solo_game();

    c.bench_function("view_generation", |b| {
        b.iter(|| black_box(game.get_view()));
    });
}

/// Benchmark mismatch then hide
fn bench_mismatch_cycle(c: &mut Criterion) {
    c.bench_function("mismatch_cycle", |b| {
        b.iter_batched(
            setup_solo_game,
            |mut g| {
                let epoch = g.epoch();
                let (first, second) = {
                    let deck = &g.round().unwrap().deck;
                    let first = deck.get(0).unwrap();
                    let second = deck.iter().find(|c| c.face != first.face).unwrap();
                    (first.id, second.id)
                };
                g.select_card(first);
                g.select_card(second);
                g.hide_mismatch(epoch);
                g
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

criterion_group!(deck, bench_deck_build);

criterion_group!(
    round_operations,
    bench_full_solo_round,
    bench_view_generation,
    bench_mismatch_cycle,
);

criterion_main!(deck, round_operations);
