use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tui_memory::core::{build_deck, ContentPools, GameSnapshot, MemoryGame, SimpleRng};
use tui_memory::term::{encode_diff_into, FrameBuffer, GameView, Viewport};
use tui_memory::types::{CardId, DifficultyLevel, Language, TICK_MS};

fn bench_build_deck(c: &mut Criterion) {
    let pools = ContentPools::portfolio();
    let mut rng = SimpleRng::new(12345);

    c.bench_function("build_deck_hard", |b| {
        b.iter(|| build_deck(black_box(DifficultyLevel::Hard), Language::En, &pools, &mut rng))
    });
}

fn bench_playthrough(c: &mut Criterion) {
    c.bench_function("full_playthrough_hard", |b| {
        b.iter(|| {
            let mut game = MemoryGame::new(DifficultyLevel::Hard, Language::En, black_box(7)).unwrap();
            let ids: Vec<CardId> = game.cards().iter().map(|c| c.id).collect();
            for id in ids {
                if game.is_matched(id) {
                    continue;
                }
                if let Some(partner) = game.pair_of(id) {
                    game.select_card(id);
                    game.select_card(partner);
                }
                game.tick(TICK_MS);
            }
            game.moves()
        })
    });
}

fn bench_tick(c: &mut Criterion) {
    let mut game = MemoryGame::new(DifficultyLevel::Medium, Language::En, 12345).unwrap();
    let id = game.cards()[0].id;
    game.select_card(id);

    c.bench_function("game_tick_16ms", |b| {
        b.iter(|| {
            game.tick(black_box(TICK_MS));
        })
    });
}

fn bench_snapshot_into(c: &mut Criterion) {
    let game = MemoryGame::new(DifficultyLevel::Hard, Language::En, 12345).unwrap();
    let mut snap = GameSnapshot::default();

    c.bench_function("snapshot_into", |b| {
        b.iter(|| {
            game.snapshot_into(&mut snap);
            black_box(&snap);
        })
    });
}

fn bench_render_and_diff(c: &mut Criterion) {
    let game = MemoryGame::new(DifficultyLevel::Hard, Language::En, 12345).unwrap();
    let snap = game.snapshot();
    let view = GameView::default();
    let vp = Viewport::new(80, 24);
    let prev = view.render(&snap, Some(0), vp);
    let mut next = FrameBuffer::new(80, 24);
    let mut out = Vec::with_capacity(64 * 1024);

    c.bench_function("render_and_diff_cursor_move", |b| {
        b.iter(|| {
            view.render_into(&snap, Some(1), vp, &mut next);
            out.clear();
            encode_diff_into(&prev, &next, &mut out).unwrap();
            black_box(out.len());
        })
    });
}

criterion_group!(
    benches,
    bench_build_deck,
    bench_playthrough,
    bench_tick,
    bench_snapshot_into,
    bench_render_and_diff
);
criterion_main!(benches);
