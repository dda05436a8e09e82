//! Game state module - manages a complete memory game session
//!
//! This module ties together the catalog, the deck builder, the RNG and the
//! timer queue. It handles card selection, pair resolution, win detection,
//! the flip-back delay and elapsed-time tracking.
//!
//! Time only moves through [`MemoryGame::tick`], so the whole engine runs on a
//! virtual clock and is fully deterministic for a given seed.

use arrayvec::ArrayVec;
use tracing::{debug, info, trace};

use crate::catalog::{self, DifficultyConfig};
use crate::content::ContentPools;
use crate::deck::{build_deck, Card, DeckError};
use crate::rng::SimpleRng;
use crate::snapshot::{format_elapsed, CardView, GameSnapshot};
use crate::timer::{TaskKind, TimerQueue};
use crate::types::*;

/// Last notable transition (consumed by observers).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    NewGame { generation: u32 },
    Flipped(CardId),
    Matched(CardId, CardId),
    Mismatched(CardId, CardId),
    FlippedBack,
    Won { moves: u32, elapsed_ms: u64 },
}

/// Memory game controller owning the live session.
#[derive(Debug, Clone)]
pub struct MemoryGame {
    pools: ContentPools<'static>,
    rng: SimpleRng,
    difficulty: DifficultyLevel,
    language: Language,
    /// Board order, fixed once dealt.
    cards: Vec<Card>,
    /// Cards currently face up and not matched. Never more than two.
    flipped: ArrayVec<CardId, 2>,
    /// Matched card ids, in the order they were matched.
    matched: Vec<CardId>,
    /// Completed pair comparisons.
    moves: u32,
    phase: GamePhase,
    /// Session generation (increments on every new session).
    generation: u32,
    /// Virtual clock, advanced only by `tick`.
    now_ms: u64,
    /// Set lazily on the first flip so idle time before play is not counted.
    started_at_ms: Option<u64>,
    elapsed_ms: u64,
    timers: TimerQueue,
    last_event: Option<GameEvent>,
}

impl MemoryGame {
    /// Create a game over the built-in portfolio pools and deal the first board.
    pub fn new(
        difficulty: DifficultyLevel,
        language: Language,
        seed: u32,
    ) -> Result<Self, DeckError> {
        Self::with_pools(ContentPools::portfolio(), difficulty, language, seed)
    }

    /// Create a game over caller-supplied content pools.
    pub fn with_pools(
        pools: ContentPools<'static>,
        difficulty: DifficultyLevel,
        language: Language,
        seed: u32,
    ) -> Result<Self, DeckError> {
        let mut game = Self {
            pools,
            rng: SimpleRng::new(seed),
            difficulty,
            language,
            cards: Vec::new(),
            flipped: ArrayVec::new(),
            matched: Vec::new(),
            moves: 0,
            phase: GamePhase::Playing,
            generation: 0,
            now_ms: 0,
            started_at_ms: None,
            elapsed_ms: 0,
            timers: TimerQueue::new(),
            last_event: None,
        };
        game.start_new_game()?;
        Ok(game)
    }

    pub fn difficulty(&self) -> DifficultyLevel {
        self.difficulty
    }

    pub fn config(&self) -> &'static DifficultyConfig {
        catalog::config(self.difficulty)
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    fn card_mut(&mut self, id: CardId) -> Option<&mut Card> {
        self.cards.iter_mut().find(|c| c.id == id)
    }

    pub fn flipped(&self) -> &[CardId] {
        &self.flipped
    }

    pub fn matched(&self) -> &[CardId] {
        &self.matched
    }

    pub fn is_flipped(&self, id: CardId) -> bool {
        self.flipped.contains(&id)
    }

    pub fn is_matched(&self, id: CardId) -> bool {
        self.matched.contains(&id)
    }

    /// Whether the card's face is visible (flipped or matched).
    pub fn is_face_up(&self, id: CardId) -> bool {
        self.is_flipped(id) || self.is_matched(id)
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn started_at_ms(&self) -> Option<u64> {
        self.started_at_ms
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Elapsed time as `minutes:seconds`.
    pub fn elapsed_label(&self) -> String {
        format_elapsed(self.elapsed_ms)
    }

    /// Whether a mismatched pair is waiting to flip back.
    pub fn resolution_pending(&self) -> bool {
        self.flipped.is_full()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// The id of the other card of `id`'s pair.
    pub fn pair_of(&self, id: CardId) -> Option<CardId> {
        let card = self.card(id)?;
        self.cards
            .iter()
            .find(|c| c.id != id && c.pairs_with(card))
            .map(|c| c.id)
    }

    /// Take and clear the last event.
    pub fn take_last_event(&mut self) -> Option<GameEvent> {
        self.last_event.take()
    }

    /// Throw away the session and deal a fresh board with the active settings.
    pub fn start_new_game(&mut self) -> Result<(), DeckError> {
        self.deal(self.difficulty, self.language)
    }

    /// Acknowledge the win message.
    pub fn play_again(&mut self) -> Result<(), DeckError> {
        self.start_new_game()
    }

    /// Change the difficulty and start a new game on the resized board.
    pub fn set_difficulty(&mut self, difficulty: DifficultyLevel) -> Result<(), DeckError> {
        self.deal(difficulty, self.language)
    }

    /// Change the language and start a new game with re-resolved content.
    pub fn set_language(&mut self, language: Language) -> Result<(), DeckError> {
        self.deal(self.difficulty, language)
    }

    /// Build a deck and, only if that succeeds, replace the session wholesale.
    fn deal(&mut self, difficulty: DifficultyLevel, language: Language) -> Result<(), DeckError> {
        let cards = build_deck(difficulty, language, &self.pools, &mut self.rng)?;

        self.difficulty = difficulty;
        self.language = language;
        self.cards = cards;
        self.generation = self.generation.wrapping_add(1);
        // Pending flip-back and elapsed tasks belong to the old session.
        self.timers.clear();
        self.flipped.clear();
        self.matched.clear();
        self.moves = 0;
        self.phase = GamePhase::Playing;
        self.started_at_ms = None;
        self.elapsed_ms = 0;
        self.last_event = Some(GameEvent::NewGame {
            generation: self.generation,
        });

        info!(
            generation = self.generation,
            difficulty = difficulty.as_str(),
            language = language.as_str(),
            cards = self.cards.len(),
            "new game"
        );
        Ok(())
    }

    /// Flip a card.
    ///
    /// Returns false (and changes nothing) when the game is not being played,
    /// the card is unknown, already face up or matched, or a mismatched pair is
    /// still waiting to flip back.
    pub fn select_card(&mut self, id: CardId) -> bool {
        if self.phase != GamePhase::Playing
            || self.flipped.contains(&id)
            || self.matched.contains(&id)
            || self.flipped.is_full()
            || self.card(id).is_none()
        {
            trace!(card = %id, "selection ignored");
            return false;
        }

        if self.started_at_ms.is_none() {
            self.started_at_ms = Some(self.now_ms);
            self.timers.schedule(
                self.generation,
                self.now_ms + ELAPSED_REFRESH_MS,
                TaskKind::ElapsedRefresh,
            );
        }

        self.flipped.push(id);
        self.last_event = Some(GameEvent::Flipped(id));

        if self.flipped.is_full() {
            self.moves += 1;
            self.resolve_pair();
        }

        true
    }

    fn resolve_pair(&mut self) {
        let (a, b) = (self.flipped[0], self.flipped[1]);
        let is_pair = match (self.card(a), self.card(b)) {
            (Some(x), Some(y)) => x.pairs_with(y),
            _ => false,
        };

        if is_pair {
            self.flipped.clear();
            for id in [a, b] {
                self.matched.push(id);
                if let Some(card) = self.card_mut(id) {
                    card.matched = true;
                }
            }
            self.last_event = Some(GameEvent::Matched(a, b));
            debug!(first = %a, second = %b, moves = self.moves, "pair matched");
            self.check_win();
        } else {
            let delay = catalog::config(self.difficulty).flip_back_delay_ms as u64;
            self.timers
                .schedule(self.generation, self.now_ms + delay, TaskKind::FlipBack);
            self.last_event = Some(GameEvent::Mismatched(a, b));
            debug!(first = %a, second = %b, moves = self.moves, "pair mismatched");
        }
    }

    fn check_win(&mut self) {
        if self.cards.is_empty() || self.matched.len() != self.cards.len() {
            return;
        }

        self.phase = GamePhase::Won;
        // The clock stops with the last refresh; no further recomputation.
        self.timers
            .cancel_kind(self.generation, TaskKind::ElapsedRefresh);
        self.last_event = Some(GameEvent::Won {
            moves: self.moves,
            elapsed_ms: self.elapsed_ms,
        });
        info!(
            generation = self.generation,
            moves = self.moves,
            elapsed = %format_elapsed(self.elapsed_ms),
            "game won"
        );
    }

    /// Advance the virtual clock and run every task that became due.
    ///
    /// Returns true when observable state changed.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        self.now_ms += elapsed_ms as u64;

        let mut changed = false;
        while let Some(task) = self.timers.pop_due(self.now_ms) {
            if task.generation != self.generation {
                trace!(generation = task.generation, "stale task dropped");
                continue;
            }

            match task.kind {
                TaskKind::FlipBack => {
                    if !self.flipped.is_empty() {
                        self.flipped.clear();
                        self.last_event = Some(GameEvent::FlippedBack);
                        changed = true;
                    }
                }
                TaskKind::ElapsedRefresh => {
                    if self.phase != GamePhase::Playing {
                        continue;
                    }
                    let Some(start) = self.started_at_ms else {
                        continue;
                    };
                    let elapsed = self.now_ms - start;
                    if elapsed != self.elapsed_ms {
                        self.elapsed_ms = elapsed;
                        changed = true;
                    }
                    // Interval semantics: the cadence follows the due times.
                    self.timers.schedule(
                        self.generation,
                        task.due_ms + ELAPSED_REFRESH_MS,
                        TaskKind::ElapsedRefresh,
                    );
                }
            }
        }

        changed
    }

    /// Apply a command
    ///
    /// Returns whether the command changed the session. Only deck building
    /// can fail.
    pub fn apply_action(&mut self, action: GameAction) -> Result<bool, DeckError> {
        match action {
            GameAction::SelectCard(id) => Ok(self.select_card(id)),
            GameAction::NewGame => self.start_new_game().map(|_| true),
            GameAction::PlayAgain => self.play_again().map(|_| true),
            GameAction::SetDifficulty(level) => self.set_difficulty(level).map(|_| true),
            GameAction::SetLanguage(language) => self.set_language(language).map(|_| true),
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        let config = self.config();

        out.generation = self.generation;
        out.difficulty = self.difficulty;
        out.language = self.language;
        out.phase = self.phase;
        out.grid_cols = config.grid_cols;
        out.grid_rows = config.grid_rows;
        out.cards.clear();
        out.cards.extend(self.cards.iter().map(|c| CardView {
            id: c.id,
            content: c.content.clone(),
            icon: c.icon.clone(),
            category: c.category,
            face_up: self.is_face_up(c.id),
            matched: c.matched,
        }));
        out.flipped_count = self.flipped.len() as u8;
        out.matched_count = self.matched.len() as u16;
        out.moves = self.moves;
        out.elapsed_ms = self.elapsed_ms;
        out.started = self.started_at_ms.is_some();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
