//! Emergency detector.

use super::contains_term;

/// Return the emergency keywords present in `text`, in vocabulary order.
///
/// Annotates only; the caller's text is never modified. See the module
/// docs for the negation limitation.
pub fn detect_emergencies(text: &str, emergency_terms: &[String]) -> Vec<String> {
    let lower_text = text.to_lowercase();
    emergency_terms
        .iter()
        .filter(|term| contains_term(&lower_text, term))
        .cloned()
        .collect()
}
