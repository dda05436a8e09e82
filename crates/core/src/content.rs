//! Content pools - the portfolio items cards are dealt from
//!
//! Two disjoint pools: hobbies (localized name + icon glyph) and technologies
//! (name only, never localized). The engine only samples from them.

use crate::types::Language;

/// A string available in every supported display language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocalizedText {
    pub en: &'static str,
    pub fr: &'static str,
}

impl LocalizedText {
    pub fn resolve(&self, language: Language) -> &'static str {
        match language {
            Language::En => self.en,
            Language::Fr => self.fr,
        }
    }
}

/// Resolve localized content in the given language.
pub fn resolve(content: &LocalizedText, language: Language) -> &'static str {
    content.resolve(language)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hobby {
    /// Stable identity key.
    pub key: &'static str,
    pub name: LocalizedText,
    pub icon: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TechCategory {
    Frontend,
    Backend,
    Database,
    Tools,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Technology {
    /// Display name, also the stable identity key.
    pub name: &'static str,
    pub category: TechCategory,
}

/// Borrowed view over the two content pools.
#[derive(Debug, Clone, Copy)]
pub struct ContentPools<'a> {
    pub hobbies: &'a [Hobby],
    pub technologies: &'a [Technology],
}

impl ContentPools<'static> {
    /// The built-in portfolio data.
    pub fn portfolio() -> Self {
        Self {
            hobbies: HOBBIES,
            technologies: TECHNOLOGIES,
        }
    }
}

impl Default for ContentPools<'static> {
    fn default() -> Self {
        Self::portfolio()
    }
}

const fn hobby(key: &'static str, en: &'static str, fr: &'static str, icon: &'static str) -> Hobby {
    Hobby {
        key,
        name: LocalizedText { en, fr },
        icon,
    }
}

const fn tech(name: &'static str, category: TechCategory) -> Technology {
    Technology { name, category }
}

pub static HOBBIES: &[Hobby] = &[
    hobby("sports", "Sports", "Sports", "⚽"),
    hobby("hiking", "Hiking", "Randonnées", "🥾"),
    hobby("travels", "Travels", "Voyages", "✈️"),
    hobby("guitar", "Guitar", "Guitare", "🎸"),
    hobby("coding", "Coding", "Programmation", "💻"),
    hobby("video-games", "Video games", "Jeux vidéos", "🎮"),
];

pub static TECHNOLOGIES: &[Technology] = &[
    tech("JavaScript", TechCategory::Frontend),
    tech("TypeScript", TechCategory::Frontend),
    tech("React.js", TechCategory::Frontend),
    tech("Next.js", TechCategory::Frontend),
    tech("HTML5", TechCategory::Frontend),
    tech("CSS3", TechCategory::Frontend),
    tech("TailwindCSS", TechCategory::Frontend),
    tech("Apollo", TechCategory::Frontend),
    tech("Node.js", TechCategory::Backend),
    tech("Express", TechCategory::Backend),
    tech("Koa", TechCategory::Backend),
    tech("GraphQL", TechCategory::Backend),
    tech("Prisma", TechCategory::Backend),
    tech("MongoDB", TechCategory::Database),
    tech("SQL", TechCategory::Database),
    tech("Redis", TechCategory::Database),
    tech("Docker", TechCategory::Tools),
    tech("Kubernetes", TechCategory::Tools),
    tech("AWS", TechCategory::Tools),
    tech("Heroku", TechCategory::Tools),
    tech("Git", TechCategory::Tools),
    tech("GitHub", TechCategory::Tools),
    tech("Jenkins", TechCategory::Tools),
    tech("Jest", TechCategory::Tools),
    tech("Cypress", TechCategory::Tools),
    tech("Webpack", TechCategory::Tools),
    tech("Linux", TechCategory::Other),
    tech("macOS", TechCategory::Other),
    tech("Micro services", TechCategory::Other),
    tech("Agile", TechCategory::Other),
    tech("Scrum", TechCategory::Other),
    tech("Jira", TechCategory::Other),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::types::DifficultyLevel;

    #[test]
    fn resolve_picks_language() {
        let hiking = HOBBIES[1].name;
        assert_eq!(resolve(&hiking, Language::En), "Hiking");
        assert_eq!(resolve(&hiking, Language::Fr), "Randonnées");
    }

    #[test]
    fn pools_cover_every_difficulty() {
        let pools = ContentPools::portfolio();
        for level in DifficultyLevel::ALL {
            let c = catalog::config(level);
            assert!(pools.hobbies.len() >= c.hobby_pairs(), "{:?}", level);
            assert!(pools.technologies.len() >= c.technology_pairs(), "{:?}", level);
        }
    }

    #[test]
    fn pool_keys_are_unique() {
        let mut keys: Vec<_> = HOBBIES.iter().map(|h| h.key).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), HOBBIES.len());

        let mut names: Vec<_> = TECHNOLOGIES.iter().map(|t| t.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), TECHNOLOGIES.len());
    }
}
