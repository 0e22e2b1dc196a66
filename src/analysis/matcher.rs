//! Glossary matcher — which lexicon terms appear in a block of text.

use serde::{Deserialize, Serialize};

use super::contains_term;
use crate::lexicon::LexiconEntry;

/// A lexicon term found in the text, with its plain-language definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryHit {
    pub term: String,
    pub definition: String,
}

/// Return every entry whose term occurs in `text`, in lexicon order.
///
/// Terms are unique, so the result behaves as a term → definition mapping.
pub fn find_matches(text: &str, entries: &[LexiconEntry]) -> Vec<GlossaryHit> {
    let lower_text = text.to_lowercase();
    entries
        .iter()
        .filter(|entry| contains_term(&lower_text, &entry.term))
        .map(|entry| GlossaryHit {
            term: entry.term.clone(),
            definition: entry.definition.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::Lexicon;

    fn terms(hits: &[GlossaryHit]) -> Vec<&str> {
        hits.iter().map(|h| h.term.as_str()).collect()
    }

    #[test]
    fn empty_text_matches_nothing() {
        assert!(find_matches("", Lexicon::builtin().entries()).is_empty());
    }

    #[test]
    fn matching_ignores_case() {
        let hits = find_matches("MILD CEREBRAL ATROPHY noted.", Lexicon::builtin().entries());
        assert_eq!(terms(&hits), ["cerebral atrophy"]);
        assert!(hits[0].definition.starts_with("Shrinkage or loss of brain cells"));
    }

    #[test]
    fn multi_word_terms_must_be_contiguous() {
        let hits = find_matches("mass with no effect; midline  shift", Lexicon::builtin().entries());
        assert!(hits.is_empty(), "got {:?}", terms(&hits));
    }

    #[test]
    fn substring_inside_longer_word_still_matches() {
        // "edema" is contained in "lymphedema"
        let hits = find_matches("Lymphedema of the arm", Lexicon::builtin().entries());
        assert_eq!(terms(&hits), ["edema"]);
    }

    #[test]
    fn hits_follow_lexicon_order_not_text_order() {
        let text = "Midline shift secondary to hemorrhage, with a small lesion.";
        let hits = find_matches(text, Lexicon::builtin().entries());
        assert_eq!(terms(&hits), ["lesion", "hemorrhage", "midline shift"]);
    }

    #[test]
    fn membership_matches_containment_for_every_entry() {
        let text = "Calcification and contrast enhancement. Ventricular dilation absent. Infarct old.";
        let lower = text.to_lowercase();
        let hits = find_matches(text, Lexicon::builtin().entries());
        for entry in Lexicon::builtin().entries() {
            let expected = lower.contains(&entry.term.to_lowercase());
            let found = hits.iter().any(|h| h.term == entry.term);
            assert_eq!(found, expected, "term {}", entry.term);
        }
    }
}
