//! Application configuration: environment first, then command-line flags.

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};

use crate::types::{DifficultyLevel, Language};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppConfig {
    pub difficulty: DifficultyLevel,
    pub language: Language,
    /// Fixed deal seed; `None` seeds from the wall clock.
    pub seed: Option<u32>,
    /// Log file; logging stays off without one.
    pub log_path: Option<PathBuf>,
}

pub const USAGE: &str = "usage: tui-memory [--difficulty easy|medium|hard] [--lang en|fr] [--seed N] [--log PATH]";

impl AppConfig {
    /// Read `MEMORY_DIFFICULTY`, `MEMORY_LANG`, `MEMORY_SEED` and `MEMORY_LOG_PATH`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        let get = |key: &str| get(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(v) = get("MEMORY_DIFFICULTY") {
            config.difficulty = parse_difficulty(&v).context("MEMORY_DIFFICULTY")?;
        }
        if let Some(v) = get("MEMORY_LANG") {
            config.language = parse_language(&v).context("MEMORY_LANG")?;
        }
        if let Some(v) = get("MEMORY_SEED") {
            config.seed = Some(parse_seed(&v).context("MEMORY_SEED")?);
        }
        if let Some(v) = get("MEMORY_LOG_PATH") {
            config.log_path = Some(PathBuf::from(v));
        }
        Ok(config)
    }

    /// Override settings from command-line arguments (program name excluded).
    pub fn apply_args<S: AsRef<str>>(&mut self, args: &[S]) -> Result<()> {
        let mut iter = args.iter().map(AsRef::as_ref);
        while let Some(flag) = iter.next() {
            let (name, inline) = match flag.split_once('=') {
                Some((name, value)) => (name, Some(value)),
                None => (flag, None),
            };
            let mut value = || {
                inline
                    .or_else(|| iter.next())
                    .ok_or_else(|| anyhow!("{name} needs a value\n{USAGE}"))
            };

            match name {
                "--difficulty" | "-d" => self.difficulty = parse_difficulty(value()?)?,
                "--lang" | "-l" => self.language = parse_language(value()?)?,
                "--seed" => self.seed = Some(parse_seed(value()?)?),
                "--log" => self.log_path = Some(PathBuf::from(value()?)),
                other => bail!("unknown argument: {other}\n{USAGE}"),
            }
        }
        Ok(())
    }
}

fn parse_difficulty(s: &str) -> Result<DifficultyLevel> {
    DifficultyLevel::from_str(s).ok_or_else(|| anyhow!("unknown difficulty: {s}"))
}

fn parse_language(s: &str) -> Result<Language> {
    Language::from_str(s).ok_or_else(|| anyhow!("unknown language: {s}"))
}

fn parse_seed(s: &str) -> Result<u32> {
    s.parse().with_context(|| format!("invalid seed: {s}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.difficulty, DifficultyLevel::Medium);
        assert_eq!(config.language, Language::En);
        assert_eq!(config.seed, None);
        assert_eq!(config.log_path, None);
    }

    #[test]
    fn flags_accept_inline_values() {
        let mut config = AppConfig::default();
        config.apply_args(&["--seed=42", "--lang=fr"]).unwrap();
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.language, Language::Fr);
    }

    #[test]
    fn missing_value_is_an_error() {
        let mut config = AppConfig::default();
        let err = config.apply_args(&["--difficulty"]).unwrap_err();
        assert!(err.to_string().contains("needs a value"));
    }
}
