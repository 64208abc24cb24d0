use std::collections::BTreeSet;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::normalize::{contains_cue, contains_word, normalize_prompt};

/// A value that can be selected by a cue table and shown as a metadata field.
pub trait CueValue {
    fn label(&self) -> &str;

    /// Extra per-value checks run by catalog validation.
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// One `(cue set -> value)` rule. The value's fields sit next to `cues` in YAML.
///
/// `cues` are stems: they match any word they start ("alley" hits "alleys").
/// `words` only match as whole words, for short cues that prefix unrelated
/// vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CueRule<T> {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cues: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub words: Vec<String>,
    #[serde(flatten)]
    pub value: T,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| (*item).to_owned()).collect()
}

impl<T> CueRule<T> {
    pub fn new(cues: &[&str], value: T) -> Self {
        Self {
            cues: owned(cues),
            words: Vec::new(),
            value,
        }
    }

    pub fn with_words(mut self, words: &[&str]) -> Self {
        self.words = owned(words);
        self
    }

    /// First cue of this rule found in `normalized`, stems before whole words.
    pub fn matched_cue(&self, normalized: &str) -> Option<&str> {
        self.cues
            .iter()
            .map(String::as_str)
            .find(|cue| contains_cue(normalized, cue))
            .or_else(|| {
                self.words
                    .iter()
                    .map(String::as_str)
                    .find(|word| contains_word(normalized, word))
            })
    }

    fn all_cues(&self) -> impl Iterator<Item = &String> {
        self.cues.iter().chain(&self.words)
    }
}

/// Ordered rule list for a single metadata field. Rules are tried in order and
/// the first hit wins; `fallback` is used when nothing matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CueTable<T> {
    pub rules: Vec<CueRule<T>>,
    pub fallback: T,
}

/// Outcome of resolving one table against a prompt.
#[derive(Debug, PartialEq)]
pub struct CueMatch<'a, T> {
    pub value: &'a T,
    /// Cue that fired, `None` when the fallback was used.
    pub cue: Option<&'a str>,
    /// Index of the rule that fired.
    pub rule: Option<usize>,
}

impl<T> Clone for CueMatch<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for CueMatch<'_, T> {}

impl<'a, T> CueMatch<'a, T> {
    pub fn is_fallback(&self) -> bool {
        self.cue.is_none()
    }
}

impl<T: CueValue> CueTable<T> {
    pub fn new(rules: Vec<CueRule<T>>, fallback: T) -> Self {
        Self { rules, fallback }
    }

    pub fn resolve<'a>(&'a self, normalized: &str) -> CueMatch<'a, T> {
        self.rules
            .iter()
            .enumerate()
            .find_map(|(index, rule)| {
                rule.matched_cue(normalized).map(|cue| CueMatch {
                    value: &rule.value,
                    cue: Some(cue),
                    rule: Some(index),
                })
            })
            .unwrap_or(CueMatch {
                value: &self.fallback,
                cue: None,
                rule: None,
            })
    }

    /// Re-normalizes every cue so authored vocabularies match the same way
    /// prompts are normalized.
    pub fn normalize_cues(&mut self) {
        for rule in &mut self.rules {
            for cue in rule.cues.iter_mut().chain(rule.words.iter_mut()) {
                *cue = normalize_prompt(cue);
            }
        }
    }

    pub fn validate(&self, table: &str) -> Result<()> {
        if self.fallback.label().trim().is_empty() {
            bail!("table '{table}' fallback must have a non-empty label");
        }
        self.fallback
            .validate()
            .with_context(|| format!("table '{table}' fallback is invalid"))?;

        let mut seen = BTreeSet::new();
        for (index, rule) in self.rules.iter().enumerate() {
            if rule.value.label().trim().is_empty() {
                bail!("table '{table}' rule {index} must have a non-empty label");
            }
            if rule.cues.is_empty() && rule.words.is_empty() {
                bail!("table '{table}' rule {index} must define at least one cue");
            }
            for cue in rule.all_cues() {
                if cue.trim().is_empty() {
                    bail!("table '{table}' rule {index} has a blank cue");
                }
                if !seen.insert(cue.as_str()) {
                    bail!(
                        "table '{table}' rule {index} repeats cue '{cue}' already claimed by an earlier rule"
                    );
                }
            }
            rule.value
                .validate()
                .with_context(|| format!("table '{table}' rule {index} is invalid"))?;
        }
        Ok(())
    }
}
