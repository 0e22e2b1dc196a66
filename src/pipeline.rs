//! Scan-to-report pipeline.
//!
//! Idle → Recognizing → Interpreting → Translating → Analyzing → Done,
//! with `Failed` reachable from the first two stages. Each stage feeds the
//! next; nothing runs concurrently and nothing is retried.
//!
//! Every request gets its own `PipelineResult`. The lexicon is the only
//! shared input and is only ever borrowed.

use serde::Serialize;

use crate::analysis::{self, GlossaryHit};
use crate::language::TargetLanguage;
use crate::lexicon::Lexicon;
use crate::llm::{InterpretationError, Interpreter};
use crate::ocr::{RecognitionError, TextRecognizer};
use crate::translate::Translator;
use crate::upload::{EncodedImage, ImageError};

/// Longest recognised text forwarded to the model, in characters.
pub const MAX_RECOGNIZED_CHARS: usize = 3000;

/// Appended to recognised text that was cut at `MAX_RECOGNIZED_CHARS`.
pub const TRUNCATION_MARKER: &str = "\n\n[Text truncated for model input]";

/// Generic message for failures outside the recognition/interpretation stages.
pub const UNEXPECTED_FAILURE_MESSAGE: &str = "Something went wrong while analyzing the image.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Idle,
    Recognizing,
    Interpreting,
    Translating,
    Analyzing,
    Done,
    Failed,
}

/// One user submission. Consumed by a single `Pipeline::run`.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub image_bytes: Vec<u8>,
    pub language: TargetLanguage,
}

impl AnalysisRequest {
    pub fn new(image_bytes: Vec<u8>, language: TargetLanguage) -> Self {
        Self {
            image_bytes,
            language,
        }
    }
}

/// Fields are `None` until the stage that produces them succeeds.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PipelineResult {
    pub recognized_text: Option<String>,
    /// True when `recognized_text` was cut before being sent to the model.
    pub input_truncated: bool,
    pub analysis_text: Option<String>,
    /// Final report text: translated, or the analysis text unchanged.
    pub translated_text: Option<String>,
    /// Set when translation was attempted and fell back.
    pub translation_warning: Option<String>,
    pub emergency_terms: Option<Vec<String>>,
    pub medication_suggestions: Option<Vec<String>>,
    /// Glossary over the recognised (not the generated) text.
    pub glossary_hits: Option<Vec<GlossaryHit>>,
}

impl PipelineResult {
    pub fn has_emergency(&self) -> bool {
        self.emergency_terms
            .as_ref()
            .map(|terms| !terms.is_empty())
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Recognition,
    Interpretation,
    Unexpected,
}

/// Why and where the pipeline stopped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageFailure {
    pub kind: FailureKind,
    pub stage: Stage,
    /// User-facing message.
    pub message: String,
    /// Raw service response or underlying error, for diagnosis.
    pub diagnostic: Option<String>,
}

impl StageFailure {
    fn recognition(err: RecognitionError) -> Self {
        Self {
            kind: FailureKind::Recognition,
            stage: Stage::Recognizing,
            message: err.to_string(),
            diagnostic: None,
        }
    }

    fn interpretation(err: InterpretationError) -> Self {
        Self {
            kind: FailureKind::Interpretation,
            stage: Stage::Interpreting,
            message: err.to_string(),
            diagnostic: err.raw_response().map(str::to_string),
        }
    }

    fn image(err: ImageError) -> Self {
        Self::unexpected(Stage::Recognizing, err.to_string())
    }

    /// A failure that isn't a recognition or interpretation error.
    pub fn unexpected(stage: Stage, detail: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Unexpected,
            stage,
            message: UNEXPECTED_FAILURE_MESSAGE.to_string(),
            diagnostic: Some(detail.into()),
        }
    }
}

/// Terminal state of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PipelineOutcome {
    Done { result: PipelineResult },
    /// `partial` holds what earlier stages captured before the failure.
    Failed {
        failure: StageFailure,
        partial: PipelineResult,
    },
}

impl PipelineOutcome {
    pub fn stage(&self) -> Stage {
        match self {
            PipelineOutcome::Done { .. } => Stage::Done,
            PipelineOutcome::Failed { .. } => Stage::Failed,
        }
    }

    pub fn result(&self) -> &PipelineResult {
        match self {
            PipelineOutcome::Done { result } => result,
            PipelineOutcome::Failed { partial, .. } => partial,
        }
    }

    pub fn failure(&self) -> Option<&StageFailure> {
        match self {
            PipelineOutcome::Done { .. } => None,
            PipelineOutcome::Failed { failure, .. } => Some(failure),
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, PipelineOutcome::Done { .. })
    }
}

/// Cut `text` to `MAX_RECOGNIZED_CHARS` characters plus the marker.
///
/// Returns the text to forward and whether it was cut.
pub fn truncate_for_model(text: &str) -> (String, bool) {
    match text.char_indices().nth(MAX_RECOGNIZED_CHARS) {
        Some((cut, _)) => (format!("{}{}", &text[..cut], TRUNCATION_MARKER), true),
        None => (text.to_string(), false),
    }
}

/// Chains the three service clients and the local matchers.
pub struct Pipeline<'a> {
    lexicon: &'a Lexicon,
    recognizer: &'a dyn TextRecognizer,
    interpreter: &'a dyn Interpreter,
    translator: &'a dyn Translator,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        lexicon: &'a Lexicon,
        recognizer: &'a dyn TextRecognizer,
        interpreter: &'a dyn Interpreter,
        translator: &'a dyn Translator,
    ) -> Self {
        Self {
            lexicon,
            recognizer,
            interpreter,
            translator,
        }
    }

    /// Run one request to completion or failure.
    pub fn run(&self, request: &AnalysisRequest) -> PipelineOutcome {
        let pipeline_start = std::time::Instant::now();
        let mut result = PipelineResult::default();

        let outcome = match self.run_stages(request, &mut result) {
            Ok(()) => PipelineOutcome::Done { result },
            Err(failure) => {
                log::error!(
                    "[PIPELINE] Failed while {:?}: {}",
                    failure.stage,
                    failure.message
                );
                PipelineOutcome::Failed {
                    failure,
                    partial: result,
                }
            }
        };

        log::info!(
            "[PIPELINE] {:?} in {}ms",
            outcome.stage(),
            pipeline_start.elapsed().as_millis()
        );
        outcome
    }

    fn run_stages(
        &self,
        request: &AnalysisRequest,
        result: &mut PipelineResult,
    ) -> Result<(), StageFailure> {
        // Recognizing
        enter(Stage::Idle, Stage::Recognizing);
        let image = EncodedImage::from_bytes(&request.image_bytes).map_err(StageFailure::image)?;
        let ocr_start = std::time::Instant::now();
        let recognized = self
            .recognizer
            .recognize(&image)
            .map_err(StageFailure::recognition)?;
        if recognized.trim().is_empty() {
            return Err(StageFailure::recognition(RecognitionError::NoReadableText));
        }
        log::info!(
            "[OCR] {} chars in {}ms",
            recognized.chars().count(),
            ocr_start.elapsed().as_millis()
        );

        let (model_input, truncated) = truncate_for_model(&recognized);
        if truncated {
            log::warn!(
                "[PIPELINE] Recognized text truncated from {} to {} chars",
                recognized.chars().count(),
                MAX_RECOGNIZED_CHARS
            );
        }
        result.recognized_text = Some(recognized);
        result.input_truncated = truncated;

        // Interpreting
        enter(Stage::Recognizing, Stage::Interpreting);
        let llm_start = std::time::Instant::now();
        let analysis_text = self
            .interpreter
            .interpret(&model_input, request.language)
            .map_err(StageFailure::interpretation)?;
        log::info!(
            "[LLM] {} chars in {}ms: {:?}",
            analysis_text.chars().count(),
            llm_start.elapsed().as_millis(),
            crate::preview(&analysis_text, 80)
        );

        // Translating
        enter(Stage::Interpreting, Stage::Translating);
        let final_text = if request.language.is_primary() {
            analysis_text.clone()
        } else {
            match self.translator.translate(&analysis_text, request.language) {
                Ok(translated) => translated,
                Err(e) => {
                    log::warn!("[TRANSLATE] Failed, keeping untranslated text: {}", e);
                    result.translation_warning = Some(format!("Translation failed: {}", e));
                    analysis_text.clone()
                }
            }
        };
        result.analysis_text = Some(analysis_text);

        // Analyzing
        enter(Stage::Translating, Stage::Analyzing);
        let entries = self.lexicon.entries();
        let emergency_terms = analysis::detect_emergencies(&final_text, self.lexicon.emergency_terms());
        let medications = analysis::suggest_medications(&final_text, entries);
        let glossary = analysis::find_matches(
            result.recognized_text.as_deref().unwrap_or_default(),
            entries,
        );
        log::info!(
            "[ANALYZE] emergency={:?}, medications={}, glossary={}",
            emergency_terms,
            medications.len(),
            glossary.len()
        );

        result.translated_text = Some(final_text);
        result.emergency_terms = Some(emergency_terms);
        result.medication_suggestions = Some(medications);
        result.glossary_hits = Some(glossary);

        enter(Stage::Analyzing, Stage::Done);
        Ok(())
    }
}

fn enter(from: Stage, to: Stage) {
    log::debug!("[PIPELINE] {:?} → {:?}", from, to);
}
