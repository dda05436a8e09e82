use tui_memory::core::MemoryGame;
use tui_memory::input::{BoardCursor, Direction};
use tui_memory::term::{encode_diff_into, encode_full_into, strings, GameView, Viewport};
use tui_memory::types::{DifficultyLevel, Language};

#[test]
fn every_level_fits_a_standard_terminal() {
    let view = GameView::default();
    for level in DifficultyLevel::ALL {
        let game = MemoryGame::new(level, Language::En, 1).unwrap();
        let fb = view.render(&game.snapshot(), None, Viewport::new(80, 24));
        let text = fb.text();
        let face_down = text.chars().filter(|&c| c == '?').count();
        assert_eq!(face_down, game.cards().len(), "{level:?}");
    }
}

#[test]
fn cursor_moves_highlight_between_cards() {
    let game = MemoryGame::new(DifficultyLevel::Medium, Language::En, 1).unwrap();
    let snap = game.snapshot();
    let view = GameView::default();
    let vp = Viewport::new(80, 30);

    let mut cursor = BoardCursor::new(snap.grid_cols as usize, snap.cards.len());
    let before = view.render(&snap, Some(cursor.index()), vp);
    cursor.move_dir(Direction::Right);
    cursor.move_dir(Direction::Down);
    assert_eq!(cursor.index(), 5);
    let after = view.render(&snap, Some(cursor.index()), vp);

    assert_ne!(before, after);

    // Only the two affected card borders differ, so the diff is much smaller
    // than a full redraw.
    let mut full = Vec::new();
    encode_full_into(&after, &mut full).unwrap();
    let mut diff = Vec::new();
    encode_diff_into(&before, &after, &mut diff).unwrap();
    assert!(diff.len() < full.len() / 2);
}

#[test]
fn french_session_shows_localized_hobbies() {
    let mut game = MemoryGame::new(DifficultyLevel::Hard, Language::Fr, 3).unwrap();
    let hobby = game
        .cards()
        .iter()
        .find(|c| c.icon.is_some())
        .cloned()
        .unwrap();
    game.select_card(hobby.id);

    let fb = GameView::default().render(&game.snapshot(), None, Viewport::new(90, 30));
    let text = fb.text();
    assert!(text.contains(strings(Language::Fr).title));
    assert!(text.contains(&hobby.content));
    assert!(text.contains("loisir"));
}

#[test]
fn elapsed_time_is_shown_as_minutes_and_seconds() {
    let mut game = MemoryGame::new(DifficultyLevel::Easy, Language::En, 3).unwrap();
    game.select_card(game.cards()[0].id);
    for _ in 0..75 {
        game.tick(1_000);
    }
    let fb = GameView::default().render(&game.snapshot(), None, Viewport::new(80, 24));
    assert!(fb.text().contains("Time: 1:15"));
}
