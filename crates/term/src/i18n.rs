//! UI strings in every supported display language.

use crate::types::{Category, Language};

/// Chrome strings for one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiStrings {
    pub title: &'static str,
    pub tagline: &'static str,
    pub moves: &'static str,
    pub time: &'static str,
    pub hobby: &'static str,
    pub technology: &'static str,
    pub congratulations: &'static str,
    pub play_again_hint: &'static str,
    pub keys_hint: &'static str,
    pub language_label: &'static str,
    pub adapter_label: &'static str,
    pub off: &'static str,
    pub clients: &'static str,
    /// Template with `{moves}` and `{time}` placeholders.
    win_summary: &'static str,
}

impl UiStrings {
    pub fn category(&self, category: Category) -> &'static str {
        match category {
            Category::Hobby => self.hobby,
            Category::Technology => self.technology,
        }
    }

    pub fn win_summary(&self, moves: u32, time: &str) -> String {
        self.win_summary
            .replace("{moves}", &moves.to_string())
            .replace("{time}", time)
    }
}

static EN: UiStrings = UiStrings {
    title: "Memory Game",
    tagline: "Match pairs of my hobbies and technologies!",
    moves: "Moves",
    time: "Time",
    hobby: "hobby",
    technology: "tech",
    congratulations: "Congratulations!",
    play_again_hint: "Press N to play again",
    keys_hint: "arrows move  space flip  n new game  1-3 level  t language  q quit",
    language_label: "Lang",
    adapter_label: "AI",
    off: "off",
    clients: "clients",
    win_summary: "You completed the memory game in {moves} moves and {time}!",
};

static FR: UiStrings = UiStrings {
    title: "Jeu de mémoire",
    tagline: "Associez les paires de mes loisirs et technologies !",
    moves: "Coups",
    time: "Temps",
    hobby: "loisir",
    technology: "tech",
    congratulations: "Félicitations !",
    play_again_hint: "Appuyez sur N pour rejouer",
    keys_hint: "flèches bouger  espace retourner  n nouvelle partie  1-3 niveau  t langue  q quitter",
    language_label: "Langue",
    adapter_label: "IA",
    off: "désactivée",
    clients: "clients",
    win_summary: "Vous avez terminé le jeu de mémoire en {moves} coups et {time} !",
};

pub fn strings(language: Language) -> &'static UiStrings {
    match language {
        Language::En => &EN,
        Language::Fr => &FR,
    }
}
