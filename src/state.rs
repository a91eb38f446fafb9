//! Application state: the immutable word data and the per-variant session
//! stores.
//!
//! This module owns:
//!   - the dictionary (Czech prompt -> accepted English answers)
//!   - the derived inverted index for the reverse direction
//!   - the optional pronunciation map
//!   - three session stores, one per quiz variant
//!
//! Everything data-like is loaded up front in `AppState::new` and never
//! mutated afterwards; only the session maps see writes.

use std::{collections::HashMap, sync::Arc};

use tokio::sync::RwLock;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::config::{load_audio_map, load_dictionary, load_trainer_config_from_env, TrainerConfig};
use crate::domain::{build_inverted_index, AudioMap, Dictionary, InvertedIndex};
use crate::error::ConfigError;
use crate::session::QuizSession;

pub type SessionStore = Arc<RwLock<HashMap<String, QuizSession>>>;

#[derive(Clone)]
pub struct AppState {
    pub config: TrainerConfig,
    pub dict: Arc<Dictionary>,
    pub inverted: Arc<InvertedIndex>,
    pub audio: Arc<AudioMap>,
    pub practice_sessions: SessionStore,
    pub leveled_sessions: SessionStore,
    pub reverse_sessions: SessionStore,
}

impl AppState {
    /// Build state from env: load config and both data files, derive the
    /// inverted index. Fails fast on a bad word list.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Result<Self, ConfigError> {
        let config = load_trainer_config_from_env();
        let dict = load_dictionary(&config.words_file)?;
        let audio = load_audio_map(&config.audios_file);
        Self::from_parts(config, dict, audio)
    }

    /// Assemble state from already-loaded data. Validates the invariants the
    /// request path relies on: a non-empty dictionary and a non-empty
    /// inverted index.
    pub fn from_parts(
        config: TrainerConfig,
        dict: Dictionary,
        audio: AudioMap,
    ) -> Result<Self, ConfigError> {
        if dict.is_empty() {
            return Err(ConfigError::EmptyDictionary(config.words_file.clone()));
        }
        let inverted = build_inverted_index(&dict);
        if inverted.is_empty() {
            return Err(ConfigError::EmptyInvertedIndex(config.words_file.clone()));
        }

        info!(
            target: "slovicka_backend",
            prompts = dict.len(),
            reverse_prompts = inverted.len(),
            audio_entries = audio.len(),
            "Startup word inventory"
        );

        Ok(Self {
            config,
            dict: Arc::new(dict),
            inverted: Arc::new(inverted),
            audio: Arc::new(audio),
            practice_sessions: Arc::new(RwLock::new(HashMap::new())),
            leveled_sessions: Arc::new(RwLock::new(HashMap::new())),
            reverse_sessions: Arc::new(RwLock::new(HashMap::new())),
        })
    }

    /// Mint an id for a freshly created session.
    pub fn new_session_id() -> String {
        Uuid::new_v4().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict(entries: &[(&str, &[&str])]) -> Dictionary {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.iter().map(|s| s.to_string()).collect()))
            .collect()
    }

    #[test]
    fn from_parts_rejects_an_empty_dictionary() {
        let err = AppState::from_parts(TrainerConfig::default(), Dictionary::new(), AudioMap::new());
        assert!(matches!(err, Err(ConfigError::EmptyDictionary(_))));
    }

    #[test]
    fn from_parts_rejects_a_dictionary_with_no_usable_answers() {
        let d = dict(&[("pes", &["?!"])]);
        let err = AppState::from_parts(TrainerConfig::default(), d, AudioMap::new());
        assert!(matches!(err, Err(ConfigError::EmptyInvertedIndex(_))));
    }

    #[test]
    fn from_parts_accepts_a_real_dictionary() {
        let d = dict(&[("pes", &["dog"])]);
        let state = AppState::from_parts(TrainerConfig::default(), d, AudioMap::new()).unwrap();
        assert_eq!(state.dict.len(), 1);
        assert_eq!(state.inverted["dog"], vec!["pes"]);
    }
}
