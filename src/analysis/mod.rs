//! Lexical analysis over report text.
//!
//! All three matchers use the same test: the lowercased term occurs as a
//! contiguous substring of the lowercased text. There is no tokenisation,
//! fuzzy matching or negation handling.
//!
//! Known limitation: containment cannot tell an affirmed finding from a
//! negated one. "No hemorrhage detected" flags `hemorrhage` exactly like
//! "acute hemorrhage" does. Flags are a prompt to read the report, not a
//! diagnosis, and they never alter the analysis text they were derived from.

mod emergency;
mod matcher;
mod medication;

pub use emergency::detect_emergencies;
pub use matcher::{find_matches, GlossaryHit};
pub use medication::suggest_medications;

/// Lowercased-haystack containment test shared by every matcher.
pub(crate) fn contains_term(lower_text: &str, term: &str) -> bool {
    lower_text.contains(&term.to_lowercase())
}
