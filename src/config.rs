//! Trainer configuration (TOML) and the two data-file loaders.
//!
//! `TRAINER_CONFIG_PATH` may point at a TOML file overriding the data
//! locations; any read/parse problem is logged and the defaults win. The
//! word list itself is different: a missing or invalid `words_file` is a
//! fatal configuration error, there is no partial-load recovery. The audio
//! map is optional and degrades to empty.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{error, info, warn};

use crate::domain::{AudioMap, Dictionary};
use crate::error::ConfigError;

#[derive(Clone, Debug, Deserialize)]
pub struct TrainerConfig {
  #[serde(default = "default_words_file")]
  pub words_file: PathBuf,
  #[serde(default = "default_audios_file")]
  pub audios_file: PathBuf,
  /// Directory served under `/audios/...`.
  #[serde(default = "default_audios_dir")]
  pub audios_dir: PathBuf,
}

fn default_words_file() -> PathBuf {
  PathBuf::from("./words.json")
}
fn default_audios_file() -> PathBuf {
  PathBuf::from("./audios.json")
}
fn default_audios_dir() -> PathBuf {
  PathBuf::from("./audios")
}

impl Default for TrainerConfig {
  fn default() -> Self {
    Self {
      words_file: default_words_file(),
      audios_file: default_audios_file(),
      audios_dir: default_audios_dir(),
    }
  }
}

/// Load `TrainerConfig` from TRAINER_CONFIG_PATH. On any read or parse
/// error, log it and fall back to the defaults.
pub fn load_trainer_config_from_env() -> TrainerConfig {
  let Ok(path) = std::env::var("TRAINER_CONFIG_PATH") else {
    return TrainerConfig::default();
  };
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<TrainerConfig>(&s) {
      Ok(cfg) => {
        info!(target: "slovicka_backend", %path, "Loaded trainer config (TOML)");
        cfg
      }
      Err(e) => {
        error!(target: "slovicka_backend", %path, error = %e, "Failed to parse TOML config");
        TrainerConfig::default()
      }
    },
    Err(e) => {
      error!(target: "slovicka_backend", %path, error = %e, "Failed to read TOML config file");
      TrainerConfig::default()
    }
  }
}

/// Parse a word-list document: a JSON object mapping each prompt to its
/// accepted-answer strings.
pub fn parse_dictionary(json: &str) -> Result<Dictionary, serde_json::Error> {
  serde_json::from_str(json)
}

/// Load the word list. Missing, unreadable, or unparseable files are fatal.
pub fn load_dictionary(path: &Path) -> Result<Dictionary, ConfigError> {
  if !path.exists() {
    return Err(ConfigError::WordsMissing(path.to_path_buf()));
  }
  let json = std::fs::read_to_string(path).map_err(|source| ConfigError::WordsUnreadable {
    path: path.to_path_buf(),
    source,
  })?;
  parse_dictionary(&json).map_err(|source| ConfigError::WordsInvalid {
    path: path.to_path_buf(),
    source,
  })
}

/// Load the optional audio map. Absence or a parse failure only suppresses
/// the pronunciation feature.
pub fn load_audio_map(path: &Path) -> AudioMap {
  if !path.exists() {
    info!(target: "slovicka_backend", path = %path.display(), "No audio map; pronunciation disabled");
    return AudioMap::new();
  }
  match std::fs::read_to_string(path) {
    Ok(json) => match serde_json::from_str::<AudioMap>(&json) {
      Ok(map) => map,
      Err(e) => {
        warn!(target: "slovicka_backend", path = %path.display(), error = %e, "Ignoring unparseable audio map");
        AudioMap::new()
      }
    },
    Err(e) => {
      warn!(target: "slovicka_backend", path = %path.display(), error = %e, "Ignoring unreadable audio map");
      AudioMap::new()
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn config_defaults_apply_to_missing_fields() {
    let cfg: TrainerConfig = toml::from_str("").unwrap();
    assert_eq!(cfg.words_file, PathBuf::from("./words.json"));
    assert_eq!(cfg.audios_dir, PathBuf::from("./audios"));

    let cfg: TrainerConfig = toml::from_str("words_file = \"/data/cz.json\"").unwrap();
    assert_eq!(cfg.words_file, PathBuf::from("/data/cz.json"));
    assert_eq!(cfg.audios_file, PathBuf::from("./audios.json"));
  }

  #[test]
  fn dictionary_parses_prompt_to_answer_lists() {
    let dict = parse_dictionary(r#"{"pes": ["dog", "hound"], "kočka": ["cat"]}"#).unwrap();
    assert_eq!(dict.len(), 2);
    assert_eq!(dict["pes"], vec!["dog", "hound"]);
  }

  #[test]
  fn dictionary_rejects_non_object_documents() {
    assert!(parse_dictionary("[]").is_err());
    assert!(parse_dictionary(r#"{"pes": "dog"}"#).is_err());
    assert!(parse_dictionary("not json").is_err());
  }
}
