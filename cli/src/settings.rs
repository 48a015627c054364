use std::fs;
use std::path::Path;

use anyhow::Context;
use quintet_core::Timings;
use serde::{Deserialize, Serialize};

/// Everything the `quintet` binary can be configured with.
///
/// Read from a TOML file, every key is optional:
///
/// ```toml
/// seed = 42
///
/// [timings]
/// recall_reveal = 4000
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Fixed seed, a fresh one is drawn per game when missing
    pub seed: Option<u64>,
    pub timings: Timings,
}

impl Settings {
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        toml::from_str(raw).context("invalid settings")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("could not read {}", path.display()))?;
        let settings = Self::from_toml(&raw)
            .with_context(|| format!("could not load {}", path.display()))?;
        log::debug!("settings loaded from {}: {:?}", path.display(), settings);
        Ok(settings)
    }

    /// Settings from `path` if given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }
}

/// Accepts decimal seeds as they are, any other text is hashed into one.
pub fn parse_seed(raw: &str) -> u64 {
    let raw = raw.trim();
    raw.parse().unwrap_or_else(|_| {
        // FNV-1a
        raw.bytes().fold(0xcbf2_9ce4_8422_2325, |hash, byte| {
            (hash ^ u64::from(byte)).wrapping_mul(0x0100_0000_01b3)
        })
    })
}

/// Seed for a game nobody asked to reproduce.
pub fn random_seed() -> u64 {
    use web_time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(Settings::from_toml("").unwrap(), Settings::default());
    }

    #[test]
    fn partial_timings_keep_other_defaults() {
        let settings = Settings::from_toml(
            r#"
            seed = 7

            [timings]
            recall_reveal = 4000
            retry_delay = 1500
            "#,
        )
        .unwrap();

        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.timings.recall_reveal, 4000);
        assert_eq!(settings.timings.retry_delay, 1500);
        assert_eq!(settings.timings.sequence_gap, 600);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Settings::from_toml("sed = 3").is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let path = Path::new("/nonexistent/quintet.toml");

        assert!(Settings::load(path).is_err());
        assert!(Settings::load_or_default(None).is_ok());
    }

    #[test]
    fn numeric_seeds_are_kept_and_words_are_hashed() {
        assert_eq!(parse_seed("1234"), 1234);
        assert_eq!(parse_seed(" 99 "), 99);
        assert_eq!(parse_seed("banana"), 0xb4d3_b6b1_c372_c890);
        assert_eq!(parse_seed(""), 0xcbf2_9ce4_8422_2325);
        assert_ne!(parse_seed("banana"), parse_seed("bananas"));
    }
}
