//! Quiz session state machine and progress-set bookkeeping.
//!
//! A `QuizSession` tracks one user's current prompt and answer state. It
//! moves AwaitingAnswer -> Answered on submit and back to AwaitingAnswer on
//! an explicit advance. Selection takes the RNG by argument so tests can
//! inject a seeded generator.
//!
//! Leveled progress (solved / missed key sets) deliberately lives outside
//! the session: callers pass the sets in and carry the updated sets out,
//! deciding themselves how to persist them (here: URL round-trip).

use std::collections::BTreeSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::Dictionary;

/// Per-user ephemeral quiz state. `current == None` means the candidate
/// pool was exhausted (leveled variant only).
#[derive(Clone, Debug, Default)]
pub struct QuizSession {
  pub current: Option<String>,
  pub answered: bool,
  pub is_correct: Option<bool>,
  pub user_answer: String,
  pub matched: Option<String>,
}

impl QuizSession {
  /// Pick uniformly from the whole pool. Repeats across advances are
  /// possible; prior history is not consulted.
  pub fn advance_uniform<R: Rng>(&mut self, pool: &[&String], rng: &mut R) {
    self.current = pool.choose(rng).map(|k| (*k).clone());
    self.reset_answer();
  }

  /// Pick uniformly from the dictionary keys minus the solved set. The
  /// immediately-prior prompt is excluded whenever another candidate
  /// remains. An empty pool parks the session on the exhausted sentinel.
  pub fn advance_remaining<R: Rng>(
    &mut self,
    dict: &Dictionary,
    solved: &BTreeSet<String>,
    rng: &mut R,
  ) {
    let mut candidates: Vec<&String> =
      dict.keys().filter(|k| !solved.contains(k.as_str())).collect();
    if candidates.len() > 1 {
      if let Some(prev) = &self.current {
        candidates.retain(|k| *k != prev);
      }
    }
    self.current = candidates.choose(rng).map(|k| (*k).clone());
    self.reset_answer();
  }

  /// Evaluate a submission against the accepted candidates. First matching
  /// candidate in list order wins and is recorded. Returns false when the
  /// submission was ignored: no current prompt, or the prompt was already
  /// answered (replays must not re-score).
  pub fn submit<F>(&mut self, candidates: &[String], raw: &str, normalize: F) -> bool
  where
    F: Fn(&str) -> String,
  {
    if self.answered || self.current.is_none() {
      return false;
    }
    self.user_answer = raw.to_string();

    let submitted = normalize(raw);
    let matched = if submitted.is_empty() {
      None
    } else {
      candidates.iter().find(|c| normalize(c) == submitted)
    };

    self.matched = matched.cloned();
    self.is_correct = Some(self.matched.is_some());
    self.answered = true;
    true
  }

  fn reset_answer(&mut self) {
    self.answered = false;
    self.is_correct = None;
    self.user_answer.clear();
    self.matched = None;
  }
}

/// Solved / missed prompt keys carried across requests by the caller.
#[derive(Clone, Debug, Default)]
pub struct Progress {
  pub solved: BTreeSet<String>,
  pub missed: BTreeSet<String>,
}

impl Progress {
  /// Rebuild from the JSON-encoded array parameters of the previous
  /// response. Anything malformed counts as an empty set.
  pub fn from_params(solved: Option<&str>, missed: Option<&str>) -> Self {
    Self {
      solved: parse_key_set(solved),
      missed: parse_key_set(missed),
    }
  }

  /// Fold one answered prompt into the sets. A correct answer moves the key
  /// out of `missed`; an incorrect answer revokes any earlier solve.
  pub fn record(&mut self, key: &str, correct: bool) {
    if correct {
      self.solved.insert(key.to_string());
      self.missed.remove(key);
    } else {
      self.missed.insert(key.to_string());
      self.solved.remove(key);
    }
  }
}

fn parse_key_set(param: Option<&str>) -> BTreeSet<String> {
  param
    .and_then(|s| serde_json::from_str::<Vec<String>>(s).ok())
    .map(|keys| keys.into_iter().collect())
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  fn dict(entries: &[(&str, &[&str])]) -> Dictionary {
    entries
      .iter()
      .map(|(k, v)| (k.to_string(), v.iter().map(|s| s.to_string()).collect()))
      .collect()
  }

  fn keys(d: &Dictionary) -> Vec<&String> {
    d.keys().collect()
  }

  #[test]
  fn advance_uniform_picks_from_pool_and_resets_state() {
    let d = dict(&[("pes", &["dog"]), ("kočka", &["cat"])]);
    let mut rng = StdRng::seed_from_u64(1);
    let mut s = QuizSession::default();
    s.answered = true;
    s.is_correct = Some(false);
    s.user_answer = "x".into();

    s.advance_uniform(&keys(&d), &mut rng);
    assert!(d.contains_key(s.current.as_deref().unwrap()));
    assert!(!s.answered);
    assert_eq!(s.is_correct, None);
    assert!(s.user_answer.is_empty());
    assert_eq!(s.matched, None);
  }

  #[test]
  fn submitting_an_accepted_answer_is_correct() {
    let d = dict(&[("pes", &["dog", "hound"])]);
    let mut s = QuizSession {
      current: Some("pes".into()),
      ..Default::default()
    };
    assert!(s.submit(&d["pes"], "Dog", crate::normalize::normalize_english));
    assert_eq!(s.is_correct, Some(true));
    assert_eq!(s.matched.as_deref(), Some("dog"));
    assert_eq!(s.user_answer, "Dog");
  }

  #[test]
  fn leading_article_is_accepted() {
    let d = dict(&[("pes", &["dog"])]);
    let mut s = QuizSession {
      current: Some("pes".into()),
      ..Default::default()
    };
    s.submit(&d["pes"], "The dog.", crate::normalize::normalize_english);
    assert_eq!(s.is_correct, Some(true));
  }

  #[test]
  fn punctuation_only_never_matches_even_an_empty_candidate() {
    let candidates = vec![String::new(), "?!".to_string()];
    let mut s = QuizSession {
      current: Some("pes".into()),
      ..Default::default()
    };
    s.submit(&candidates, "  ?! ", crate::normalize::normalize_english);
    assert_eq!(s.is_correct, Some(false));
    assert_eq!(s.matched, None);
  }

  #[test]
  fn resubmission_is_an_idempotent_no_op() {
    let d = dict(&[("pes", &["dog"])]);
    let mut s = QuizSession {
      current: Some("pes".into()),
      ..Default::default()
    };
    assert!(s.submit(&d["pes"], "dog", crate::normalize::normalize_english));
    let frozen = s.clone();

    assert!(!s.submit(&d["pes"], "wrong", crate::normalize::normalize_english));
    assert_eq!(s.is_correct, frozen.is_correct);
    assert_eq!(s.matched, frozen.matched);
    assert_eq!(s.user_answer, frozen.user_answer);
  }

  #[test]
  fn submit_without_a_current_prompt_is_ignored() {
    let mut s = QuizSession::default();
    assert!(!s.submit(&["dog".into()], "dog", crate::normalize::normalize_english));
    assert!(!s.answered);
  }

  #[test]
  fn czech_direction_matches_through_gender_markers() {
    let candidates = vec!["pes (m)".to_string()];
    for answer in ["pes", "Pes", "pes (M)"] {
      let mut s = QuizSession {
        current: Some("dog".into()),
        ..Default::default()
      };
      s.submit(&candidates, answer, crate::normalize::normalize_czech);
      assert_eq!(s.is_correct, Some(true), "answer: {answer:?}");
      assert_eq!(s.matched.as_deref(), Some("pes (m)"));
    }
  }

  #[test]
  fn advance_remaining_skips_solved_keys() {
    let d = dict(&[("kočka", &["cat"]), ("pes", &["dog"])]);
    let solved: BTreeSet<String> = ["kočka".to_string()].into();
    for seed in 0..32 {
      let mut rng = StdRng::seed_from_u64(seed);
      let mut s = QuizSession::default();
      s.advance_remaining(&d, &solved, &mut rng);
      assert_eq!(s.current.as_deref(), Some("pes"));
    }
  }

  #[test]
  fn advance_remaining_avoids_the_prior_prompt_when_it_can() {
    let d = dict(&[("kočka", &["cat"]), ("pes", &["dog"])]);
    let solved = BTreeSet::new();
    for seed in 0..32 {
      let mut rng = StdRng::seed_from_u64(seed);
      let mut s = QuizSession {
        current: Some("pes".into()),
        ..Default::default()
      };
      s.advance_remaining(&d, &solved, &mut rng);
      assert_eq!(s.current.as_deref(), Some("kočka"));
    }
  }

  #[test]
  fn advance_remaining_re_serves_the_last_unsolved_key() {
    let d = dict(&[("kočka", &["cat"]), ("pes", &["dog"])]);
    let solved: BTreeSet<String> = ["kočka".to_string()].into();
    let mut rng = StdRng::seed_from_u64(9);
    let mut s = QuizSession {
      current: Some("pes".into()),
      ..Default::default()
    };
    s.advance_remaining(&d, &solved, &mut rng);
    assert_eq!(s.current.as_deref(), Some("pes"));
  }

  #[test]
  fn advance_remaining_exhausts_to_none() {
    let d = dict(&[("pes", &["dog"])]);
    let solved: BTreeSet<String> = ["pes".to_string()].into();
    let mut rng = StdRng::seed_from_u64(3);
    let mut s = QuizSession::default();
    s.advance_remaining(&d, &solved, &mut rng);
    assert_eq!(s.current, None);
  }

  #[test]
  fn progress_record_moves_keys_between_sets() {
    let mut p = Progress::default();
    p.record("pes", false);
    assert!(p.missed.contains("pes"));

    p.record("pes", true);
    assert!(p.solved.contains("pes"));
    assert!(!p.missed.contains("pes"));

    // a later incorrect answer revokes the solve
    p.record("pes", false);
    assert!(!p.solved.contains("pes"));
    assert!(p.missed.contains("pes"));
  }

  #[test]
  fn progress_params_tolerate_malformed_input() {
    let p = Progress::from_params(Some("[\"pes\",\"kočka\"]"), Some("not json"));
    assert_eq!(p.solved.len(), 2);
    assert!(p.missed.is_empty());

    let p = Progress::from_params(None, Some("{\"nope\":1}"));
    assert!(p.solved.is_empty());
    assert!(p.missed.is_empty());
  }
}
