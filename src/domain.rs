//! Domain data: the word dictionary, the derived inverted index, and the
//! optional pronunciation map.
//!
//! The dictionary maps a Czech prompt to its ordered accepted English
//! answers. `BTreeMap` keeps key iteration deterministic, which the seedable
//! selection in `session` relies on.

use std::collections::{BTreeMap, HashMap};

use crate::normalize::normalize_generic;

/// Prompt term -> ordered accepted-answer strings. Immutable after startup.
pub type Dictionary = BTreeMap<String, Vec<String>>;

/// Normalized English term -> original-form Czech prompts whose answer list
/// contains a string normalizing to that term.
pub type InvertedIndex = BTreeMap<String, Vec<String>>;

/// Term -> audio file name. Optional; empty when no map is configured.
pub type AudioMap = HashMap<String, String>;

/// Scan every (prompt, answer) pair once and build the reverse mapping.
/// Keys that normalize to empty are skipped; each key lists each originating
/// prompt at most once, in dictionary scan order.
pub fn build_inverted_index(dict: &Dictionary) -> InvertedIndex {
  let mut index = InvertedIndex::new();
  for (prompt, answers) in dict {
    for answer in answers {
      let key = normalize_generic(answer);
      if key.is_empty() {
        continue;
      }
      let prompts = index.entry(key).or_insert_with(Vec::new);
      if !prompts.iter().any(|p| p == prompt) {
        prompts.push(prompt.clone());
      }
    }
  }
  index
}

/// Recover a display form for a normalized answer key: the first stored
/// answer string that normalizes to it, original casing intact. Falls back
/// to the key itself.
pub fn display_answer_form(dict: &Dictionary, key: &str) -> String {
  for answers in dict.values() {
    for answer in answers {
      if normalize_generic(answer) == key {
        return answer.clone();
      }
    }
  }
  key.to_string()
}

/// Resolve the playback path for a term, `/audios/<basename>`.
/// `None` when the term has no mapping.
pub fn audio_src(audio: &AudioMap, term: &str) -> Option<String> {
  let file = audio.get(term)?.trim();
  let name = file.rsplit(['/', '\\']).next().unwrap_or(file);
  Some(format!("/audios/{name}"))
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
  fn inverted_index_groups_prompts_by_normalized_answer() {
    let d = dict(&[("kočka", &["cat", "Dog"]), ("pes (m)", &["dog"])]);
    let index = build_inverted_index(&d);
    assert_eq!(index.len(), 2);
    assert_eq!(index["cat"], vec!["kočka"]);
    // "Dog" and "dog" collapse onto one key holding both prompts
    assert_eq!(index["dog"], vec!["kočka", "pes (m)"]);
  }

  #[test]
  fn inverted_index_skips_empty_keys_and_duplicate_prompts() {
    let d = dict(&[("pes", &["dog", "Dog", "?!"])]);
    let index = build_inverted_index(&d);
    assert_eq!(index.len(), 1);
    assert_eq!(index["dog"], vec!["pes"]);
  }

  #[test]
  fn display_form_keeps_original_casing() {
    let d = dict(&[("pes", &["The Dog"])]);
    assert_eq!(display_answer_form(&d, "the dog"), "The Dog");
    assert_eq!(display_answer_form(&d, "missing"), "missing");
  }

  #[test]
  fn audio_src_uses_basename() {
    let mut audio = AudioMap::new();
    audio.insert("pes".into(), " clips/cz/pes.mp3 ".into());
    assert_eq!(audio_src(&audio, "pes").as_deref(), Some("/audios/pes.mp3"));
    assert_eq!(audio_src(&audio, "kočka"), None);
  }
}
