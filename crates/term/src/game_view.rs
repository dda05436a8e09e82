//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{config, CardView, GameSnapshot, Theme};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::i18n::{strings, UiStrings};
use crate::types::{Category, DifficultyLevel};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdapterStatusView {
    pub client_count: u16,
    pub controller_id: Option<usize>,
}

const BG: Rgb = Rgb::new(0, 0, 0);
const TEXT: Rgb = Rgb::new(220, 220, 220);
const MUTED: Rgb = Rgb::new(120, 120, 130);
const CURSOR: Rgb = Rgb::new(250, 204, 21);
const MATCHED: Rgb = Rgb::new(34, 197, 94);
const EMERALD: Rgb = Rgb::new(16, 185, 129);
const BLUE: Rgb = Rgb::new(59, 130, 246);
const PURPLE: Rgb = Rgb::new(168, 85, 247);
const RED: Rgb = Rgb::new(239, 68, 68);
const FACE_DOWN_BG: Rgb = Rgb::new(40, 40, 55);

const HEADER_ROWS: u16 = 8;

/// A lightweight terminal renderer for the memory board.
pub struct GameView {
    /// Card width in terminal columns, borders included.
    card_w: u16,
    /// Card height in terminal rows, borders included.
    card_h: u16,
    /// Blank columns between neighbouring cards.
    gap: u16,
}

impl Default for GameView {
    fn default() -> Self {
        Self {
            card_w: 18,
            card_h: 3,
            gap: 1,
        }
    }
}

impl GameView {
    /// Render the session into an existing framebuffer.
    ///
    /// `cursor` is the board index to highlight, if any.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        cursor: Option<usize>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        self.render_into_with_adapter(snap, cursor, None, viewport, fb);
    }

    pub fn render_into_with_adapter(
        &self,
        snap: &GameSnapshot,
        cursor: Option<usize>,
        adapter: Option<&AdapterStatusView>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(crate::fb::Cell::default());

        let ui = strings(snap.language);
        let width = viewport.width;
        let title = CellStyle::new(TEXT, BG).bold();
        let muted = CellStyle::new(MUTED, BG);

        fb.put_str_centered(0, 0, width, ui.title, title);
        fb.put_str_centered(0, 1, width, ui.tagline, muted);

        self.draw_difficulty_selector(fb, snap.difficulty, width, 3);
        let active = config(snap.difficulty);
        fb.put_str_centered(
            0,
            4,
            width,
            active.description,
            CellStyle::new(theme_color(active.theme), BG),
        );

        self.draw_stats(fb, snap, ui, adapter, width, 6);

        let grid_w = self.grid_width(snap.grid_cols as u16);
        let grid_x = width.saturating_sub(grid_w) / 2;
        let grid_y = HEADER_ROWS;
        let cols = snap.grid_cols.max(1) as usize;

        for (i, card) in snap.cards.iter().enumerate() {
            let x = grid_x + (i % cols) as u16 * (self.card_w + self.gap);
            let y = grid_y + (i / cols) as u16 * self.card_h;
            self.draw_card(fb, card, active.theme, ui, cursor == Some(i), x, y);
        }

        let grid_h = snap.grid_rows as u16 * self.card_h;
        fb.put_str_centered(0, grid_y + grid_h + 1, width, ui.keys_hint, muted);

        if snap.won() {
            self.draw_win_overlay(fb, snap, ui, width, grid_y, grid_h);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, cursor: Option<usize>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, cursor, viewport, &mut fb);
        fb
    }

    pub fn render_with_adapter(
        &self,
        snap: &GameSnapshot,
        cursor: Option<usize>,
        adapter: Option<&AdapterStatusView>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into_with_adapter(snap, cursor, adapter, viewport, &mut fb);
        fb
    }

    /// Columns needed by a grid of `cols` cards.
    pub fn grid_width(&self, cols: u16) -> u16 {
        cols * self.card_w + cols.saturating_sub(1) * self.gap
    }

    fn draw_difficulty_selector(
        &self,
        fb: &mut FrameBuffer,
        current: DifficultyLevel,
        width: u16,
        y: u16,
    ) {
        let labels: Vec<(DifficultyLevel, String, &'static str)> = DifficultyLevel::ALL
            .iter()
            .map(|&level| {
                let c = config(level);
                let name = format!("{} {}×{}", c.name, c.grid_cols, c.grid_rows);
                (level, name, c.icon)
            })
            .collect();

        // "N " + icon (2 columns) + " " + label, separated by three spaces.
        let total: u16 = labels
            .iter()
            .map(|(_, label, _)| 5 + label.chars().count() as u16)
            .sum::<u16>()
            + 3 * (labels.len() as u16 - 1);
        let mut x = width.saturating_sub(total) / 2;

        for (n, (level, label, icon)) in labels.iter().enumerate() {
            let style = if *level == current {
                CellStyle::new(theme_color(config(*level).theme), BG).bold()
            } else {
                CellStyle::new(MUTED, BG)
            };
            fb.put_u32(x, y, n as u32 + 1, style);
            if let Some(glyph) = icon.chars().next() {
                fb.put_wide(x + 2, y, glyph, style);
            }
            let used = fb.put_str(x + 5, y, label, style);
            x = x.saturating_add(5 + used + 3);
        }
    }

    fn draw_stats(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        ui: &UiStrings,
        adapter: Option<&AdapterStatusView>,
        width: u16,
        y: u16,
    ) {
        let mut line = format!(
            "{}: {}   {}: {}   {}: {}",
            ui.moves,
            snap.moves,
            ui.time,
            snap.elapsed_label(),
            ui.language_label,
            snap.language.as_str().to_uppercase(),
        );
        match adapter {
            Some(st) => {
                line.push_str(&format!("   {}: {} {}", ui.adapter_label, st.client_count, ui.clients));
                if let Some(id) = st.controller_id {
                    line.push_str(&format!(" (ctrl #{id})"));
                }
            }
            None => line.push_str(&format!("   {}: {}", ui.adapter_label, ui.off)),
        }
        fb.put_str_centered(0, y, width, &line, CellStyle::new(TEXT, BG));
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_card(
        &self,
        fb: &mut FrameBuffer,
        card: &CardView,
        theme: Theme,
        ui: &UiStrings,
        selected: bool,
        x: u16,
        y: u16,
    ) {
        let accent = if card.matched {
            MATCHED
        } else if card.face_up {
            card_color(theme, card.category)
        } else {
            MUTED
        };
        let fill_bg = if card.face_up { BG } else { FACE_DOWN_BG };
        let border = if selected {
            CellStyle::new(CURSOR, BG).bold()
        } else {
            CellStyle::new(accent, BG)
        };

        let inner_w = self.card_w - 2;
        fb.fill_rect(x + 1, y + 1, inner_w, self.card_h - 2, ' ', CellStyle::new(TEXT, fill_bg));
        fb.draw_box(x, y, self.card_w, self.card_h, border);

        let mid = y + (self.card_h - 1) / 2;
        if !card.face_up {
            let style = CellStyle::new(TEXT, fill_bg).bold();
            fb.put_char(x + 1 + (inner_w - 1) / 2, mid, '?', style);
            return;
        }

        let content_style = CellStyle::new(accent, fill_bg).bold();
        let glyph = card.icon.as_deref().and_then(|s| s.chars().next());
        let prefix = if glyph.is_some() { 3 } else { 0 };
        let content_w = (card.content.chars().count() as u16).min(inner_w - prefix);
        let mut cx = x + 1 + (inner_w - prefix - content_w) / 2;
        if let Some(g) = glyph {
            fb.put_wide(cx, mid, g, content_style);
            cx += prefix;
        }
        fb.put_str_clipped(cx, mid, &card.content, content_w, content_style);

        // Category tag sits on the bottom border.
        let tag = ui.category(card.category);
        let tag_style = CellStyle::new(accent, BG).dim();
        fb.put_str_clipped(x + 2, y + self.card_h - 1, tag, inner_w.saturating_sub(2), tag_style);
    }

    fn draw_win_overlay(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        ui: &UiStrings,
        width: u16,
        grid_y: u16,
        grid_h: u16,
    ) {
        let summary = ui.win_summary(snap.moves, &snap.elapsed_label());
        let text_w = summary
            .chars()
            .count()
            .max(ui.play_again_hint.chars().count()) as u16;
        let box_w = (text_w + 4).min(width);
        let box_h = 6;
        let box_x = width.saturating_sub(box_w) / 2;
        let box_y = grid_y + grid_h.saturating_sub(box_h) / 2;

        let panel = CellStyle::new(TEXT, Rgb::new(20, 20, 30));
        fb.fill_rect(box_x, box_y, box_w, box_h, ' ', panel);
        fb.draw_box(box_x, box_y, box_w, box_h, CellStyle::new(MATCHED, Rgb::new(20, 20, 30)).bold());

        let inner_x = box_x + 1;
        let inner_w = box_w.saturating_sub(2);
        fb.put_str_centered(
            inner_x,
            box_y + 1,
            inner_w,
            ui.congratulations,
            CellStyle::new(MATCHED, Rgb::new(20, 20, 30)).bold(),
        );
        fb.put_str_centered(inner_x, box_y + 2, inner_w, &summary, panel);
        fb.put_str_centered(inner_x, box_y + 4, inner_w, ui.play_again_hint, panel.dim());
    }
}

fn theme_color(theme: Theme) -> Rgb {
    match theme {
        Theme::Green => MATCHED,
        Theme::Blue => BLUE,
        Theme::Red => RED,
    }
}

/// Face-up card color by difficulty theme and category.
fn card_color(theme: Theme, category: Category) -> Rgb {
    match (theme, category) {
        (Theme::Green, Category::Hobby) => MATCHED,
        (Theme::Green, Category::Technology) => EMERALD,
        (Theme::Red, Category::Hobby) => RED,
        (Theme::Red, Category::Technology) => PURPLE,
        (Theme::Blue, Category::Hobby) => PURPLE,
        (Theme::Blue, Category::Technology) => BLUE,
    }
}
