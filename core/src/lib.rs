//! libviet-core
//!
//! Core composition model, tone placement, text reconstruction and the
//! key-processing engine shared by Vietnamese input method front-ends.
//!
//! A composition is an ordered log of transformations: letters are appended
//! as bare roots, marks and tones are overlaid on them by index. The same log
//! can be produced key by key by `Engine` or rebuilt directly from composed
//! text by `rebuild_composition`, and both render identically.
//!
//! Public API:
//! - `Tone`, `Mark` and the character primitives in `charset`
//! - `Rule`, `Effect`, `EffectType`, `Transformation` - log entries
//! - `Composition`, `Mode` - the log and its rendering
//! - `find_tone_target`, `ToneStyle` - tone placement
//! - `rebuild_composition`, `split_words` - text reconstruction
//! - `InputMethod` - key → rule tables
//! - `Engine` - live typing
//! - `Config` - configuration and feature flags
use serde::{Deserialize, Serialize};

pub mod charset;
pub use charset::{Mark, Tone};

pub mod transformation;
pub use transformation::{Effect, EffectType, Rule, Transformation};

pub mod composition;
pub use composition::{Composition, Mode};

pub mod tone_target;
pub use tone_target::{find_tone_target, Letter, ToneStyle};

pub mod rebuild;
pub use rebuild::{compose_word, decompose_char, rebuild_composition, split_words, DecomposedChar};

pub mod input_method;
pub use input_method::InputMethod;

pub mod engine;
pub use engine::Engine;

/// Generic engine configuration.
///
/// Only language-level behavior lives here. Front-end options (which input
/// method to use, custom layouts) belong in `VietConfig` of the `libviet`
/// crate.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Tone placement for `oa`, `oe`, `uy` at the end of a word.
    pub tone_style: ToneStyle,

    /// Pressing a tone or mark key a second time cancels it and types the
    /// key itself ("ass" → "as").
    pub double_key_undo: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tone_style: ToneStyle::Modern,
            double_key_undo: true,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(
        path: P,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_toml_round_trip() {
        let config = Config {
            tone_style: ToneStyle::Old,
            double_key_undo: false,
        };
        let text = config.to_toml_string().expect("serialize");
        assert!(text.contains("tone_style = \"old\""));
        assert_eq!(Config::from_toml_str(&text).expect("parse"), config);
    }

    #[test]
    fn config_missing_fields_use_defaults() {
        let config = Config::from_toml_str("tone_style = \"old\"").expect("parse");
        assert_eq!(config.tone_style, ToneStyle::Old);
        assert!(config.double_key_undo);
        assert_eq!(Config::from_toml_str("").expect("parse"), Config::default());
    }

    #[test]
    fn config_file_round_trip() {
        let path = std::env::temp_dir().join(format!(
            "libviet_core_config_{}.toml",
            std::process::id()
        ));
        let config = Config::default();
        config.save_toml(&path).expect("save");
        assert_eq!(Config::load_toml(&path).expect("load"), config);
        let _ = std::fs::remove_file(&path);
    }
}
