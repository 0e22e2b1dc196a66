//! Text rendering of a pipeline outcome for the terminal.
//!
//! The recognised text is never printed directly; it only reaches the
//! reader through the glossary section.

use std::fmt;

use crate::pipeline::{PipelineOutcome, PipelineResult};

pub const EMERGENCY_HEADING: &str = "🚨 Emergency Alert Detected!";
pub const HELPLINE_NOTICE: &str = "👉 Please contact an emergency medical service immediately.\n\nHelplines:\n- 108 (Ambulance)\n- 112 (Emergency)";
pub const NO_MEDICATIONS_NOTICE: &str = "No medications suggested based on the findings.";
pub const NO_GLOSSARY_NOTICE: &str = "No complex medical terms found for explanation.";

/// Render the full report, or the failure message.
pub fn render_report(outcome: &PipelineOutcome) -> String {
    Report(outcome).to_string()
}

struct Report<'a>(&'a PipelineOutcome);

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            PipelineOutcome::Done { result } => write_result(f, result),
            PipelineOutcome::Failed { failure, .. } => {
                writeln!(f, "❌ {}", failure.message)?;
                if let Some(diagnostic) = &failure.diagnostic {
                    writeln!(f, "\nDetails: {}", diagnostic)?;
                }
                Ok(())
            }
        }
    }
}

fn write_result(f: &mut fmt::Formatter<'_>, result: &PipelineResult) -> fmt::Result {
    if let Some(warning) = &result.translation_warning {
        writeln!(f, "⚠️ {}\n", warning)?;
    }

    writeln!(f, "### 🧾 Analysis Report\n")?;
    if let Some(text) = &result.translated_text {
        writeln!(f, "{}\n", text.trim_end())?;
    }

    if result.has_emergency() {
        let emergency_terms = result.emergency_terms.as_deref().unwrap_or_default();
        writeln!(f, "{}", EMERGENCY_HEADING)?;
        writeln!(f, "Critical findings: {}", capitalize(&emergency_terms.join(", ")))?;
        writeln!(f, "{}\n", HELPLINE_NOTICE)?;
    }

    let medications = result.medication_suggestions.as_deref().unwrap_or_default();
    if medications.is_empty() {
        writeln!(f, "{}\n", NO_MEDICATIONS_NOTICE)?;
    } else {
        writeln!(f, "### 💊 Suggested Medications")?;
        for medication in medications {
            writeln!(f, "- {}", medication)?;
        }
        writeln!(f)?;
    }

    writeln!(f, "---\n### 🧠 Medical Term Explanations")?;
    let glossary = result.glossary_hits.as_deref().unwrap_or_default();
    if glossary.is_empty() {
        writeln!(f, "{}", NO_GLOSSARY_NOTICE)?;
    } else {
        for hit in glossary {
            writeln!(f, "**{}**: {}", capitalize(&hit.term), hit.definition)?;
        }
    }
    Ok(())
}

/// First character uppercased, the rest lowercased.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::GlossaryHit;
    use crate::pipeline::{Stage, StageFailure};

    fn done(result: PipelineResult) -> PipelineOutcome {
        PipelineOutcome::Done { result }
    }

    #[test]
    fn capitalize_matches_sentence_case() {
        assert_eq!(capitalize("hemorrhage, Midline shift"), "Hemorrhage, midline shift");
        assert_eq!(capitalize("cerebral atrophy"), "Cerebral atrophy");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn emergency_block_lists_terms_and_helplines() {
        let report = render_report(&done(PipelineResult {
            translated_text: Some("Acute hemorrhage with midline shift.".to_string()),
            emergency_terms: Some(vec!["hemorrhage".to_string(), "midline shift".to_string()]),
            ..Default::default()
        }));
        assert!(report.contains(EMERGENCY_HEADING));
        assert!(report.contains("Critical findings: Hemorrhage, midline shift"));
        assert!(report.contains("108 (Ambulance)"));
        assert!(report.contains("112 (Emergency)"));
    }

    #[test]
    fn empty_emergency_list_renders_no_alert_block() {
        let report = render_report(&done(PipelineResult {
            translated_text: Some("Stable findings.".to_string()),
            emergency_terms: Some(Vec::new()),
            medication_suggestions: Some(Vec::new()),
            glossary_hits: Some(Vec::new()),
            ..Default::default()
        }));
        assert!(!report.contains("Critical findings"));
        assert!(!report.contains("108 (Ambulance)"));
        assert!(report.starts_with("### 🧾 Analysis Report\n\nStable findings.\n\n"));
        assert!(report.ends_with(&format!("{}\n", NO_GLOSSARY_NOTICE)));
    }

    #[test]
    fn no_emergency_means_no_alert() {
        let report = render_report(&done(PipelineResult {
            translated_text: Some("Normal study.".to_string()),
            emergency_terms: Some(Vec::new()),
            ..Default::default()
        }));
        assert!(!report.contains(EMERGENCY_HEADING));
        assert!(report.contains(NO_MEDICATIONS_NOTICE));
        assert!(report.contains(NO_GLOSSARY_NOTICE));
    }

    #[test]
    fn medications_and_glossary_are_listed() {
        let report = render_report(&done(PipelineResult {
            translated_text: Some("Findings indicate cerebral atrophy.".to_string()),
            medication_suggestions: Some(vec!["Donepezil, Memantine".to_string()]),
            glossary_hits: Some(vec![GlossaryHit {
                term: "cerebral atrophy".to_string(),
                definition: "Shrinkage of brain cells.".to_string(),
            }]),
            ..Default::default()
        }));
        assert!(report.contains("- Donepezil, Memantine"));
        assert!(report.contains("**Cerebral atrophy**: Shrinkage of brain cells."));
        assert!(!report.contains(NO_MEDICATIONS_NOTICE));
        assert!(!report.contains(NO_GLOSSARY_NOTICE));
    }

    #[test]
    fn recognized_text_is_not_printed() {
        let report = render_report(&done(PipelineResult {
            recognized_text: Some("PATIENT ID 12345".to_string()),
            translated_text: Some("Analysis.".to_string()),
            ..Default::default()
        }));
        assert!(!report.contains("PATIENT ID 12345"));
    }

    #[test]
    fn translation_warning_is_shown() {
        let report = render_report(&done(PipelineResult {
            translated_text: Some("English analysis.".to_string()),
            translation_warning: Some("Translation failed: timeout".to_string()),
            ..Default::default()
        }));
        assert!(report.contains("Translation failed: timeout"));
        assert!(report.contains("English analysis."));
    }

    #[test]
    fn failure_shows_message_and_details() {
        let outcome = PipelineOutcome::Failed {
            failure: StageFailure {
                kind: crate::pipeline::FailureKind::Interpretation,
                stage: Stage::Interpreting,
                message: "Analysis failed due to an unexpected response from the API.".to_string(),
                diagnostic: Some(r#"{"error":"rate limited"}"#.to_string()),
            },
            partial: PipelineResult::default(),
        };
        let report = render_report(&outcome);
        assert!(report.starts_with("❌ Analysis failed"));
        assert!(report.contains(r#"Details: {"error":"rate limited"}"#));
    }
}
