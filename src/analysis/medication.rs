//! Medication advisor.

use super::contains_term;
use crate::lexicon::LexiconEntry;

/// One suggestion per matched term that carries a medication, in lexicon order.
///
/// Suggestions are not deduplicated: each belongs to the term that produced it.
pub fn suggest_medications(text: &str, entries: &[LexiconEntry]) -> Vec<String> {
    let lower_text = text.to_lowercase();
    entries
        .iter()
        .filter(|entry| contains_term(&lower_text, &entry.term))
        .filter_map(|entry| entry.medication.clone())
        .collect()
}
