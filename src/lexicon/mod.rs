//! Lexicon store — the medical vocabulary every matcher reads from.
//!
//! Built once at startup and shared by reference. Nothing mutates a
//! `Lexicon` after construction; requests only ever borrow it.

mod builtin;

use serde::Serialize;
use std::collections::HashSet;
use std::sync::LazyLock;
use thiserror::Error;

/// One recognised medical term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LexiconEntry {
    pub term: String,
    pub definition: String,
    pub medication: Option<String>,
    pub is_emergency: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LexiconError {
    #[error("Duplicate lexicon term: {0}")]
    DuplicateTerm(String),

    #[error("Lexicon terms must not be empty")]
    EmptyTerm,
}

/// Glossary entries plus the emergency vocabulary, in declaration order.
///
/// The emergency vocabulary is its own list: it may name phrases that have
/// no glossary entry ("severe edema").
#[derive(Debug, Clone)]
pub struct Lexicon {
    entries: Vec<LexiconEntry>,
    emergency_terms: Vec<String>,
}

static BUILTIN: LazyLock<Lexicon> = LazyLock::new(|| {
    let rows = builtin::GLOSSARY.iter().map(|(term, definition, medication)| {
        (
            term.to_string(),
            definition.to_string(),
            medication.map(str::to_string),
        )
    });
    let emergency_terms = builtin::EMERGENCY_TERMS.iter().map(|t| t.to_string()).collect();
    Lexicon::new(rows, emergency_terms).expect("Invalid built-in lexicon")
});

impl Lexicon {
    /// Build a lexicon from `(term, definition, medication)` rows.
    ///
    /// Glossary terms and emergency terms are each unique keys, compared
    /// by their Unicode lowercase form, the same folding the matchers use.
    /// `is_emergency` is derived from membership in `emergency_terms`.
    pub fn new<I>(rows: I, emergency_terms: Vec<String>) -> Result<Self, LexiconError>
    where
        I: IntoIterator<Item = (String, String, Option<String>)>,
    {
        let mut emergency_keys = HashSet::new();
        for term in &emergency_terms {
            if term.trim().is_empty() {
                return Err(LexiconError::EmptyTerm);
            }
            if !emergency_keys.insert(term.to_lowercase()) {
                return Err(LexiconError::DuplicateTerm(term.clone()));
            }
        }

        let mut seen = HashSet::new();
        let mut entries = Vec::new();
        for (term, definition, medication) in rows {
            if term.trim().is_empty() {
                return Err(LexiconError::EmptyTerm);
            }
            let key = term.to_lowercase();
            let is_emergency = emergency_keys.contains(&key);
            if !seen.insert(key) {
                return Err(LexiconError::DuplicateTerm(term));
            }
            entries.push(LexiconEntry {
                term,
                definition,
                medication,
                is_emergency,
            });
        }
        Ok(Self {
            entries,
            emergency_terms,
        })
    }

    /// The neuro-imaging vocabulary shipped with the app.
    pub fn builtin() -> &'static Lexicon {
        &BUILTIN
    }

    pub fn entries(&self) -> &[LexiconEntry] {
        &self.entries
    }

    pub fn emergency_terms(&self) -> &[String] {
        &self.emergency_terms
    }

    #[cfg(test)]
    fn get(&self, term: &str) -> Option<&LexiconEntry> {
        let key = term.to_lowercase();
        self.entries.iter().find(|e| e.term.to_lowercase() == key)
    }
}
