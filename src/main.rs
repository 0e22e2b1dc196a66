//! medscan CLI — analyse one scan-report image.
//!
//! Usage:
//!   medscan <image>                       English report
//!   medscan <image> --lang hindi          Report translated to Hindi
//!   medscan <image> --json                Print the outcome as JSON

use std::path::PathBuf;
use std::process::ExitCode;

use medscan_lib::llm::GroqClient;
use medscan_lib::ocr::OcrSpaceClient;
use medscan_lib::pipeline::{Stage, StageFailure};
use medscan_lib::report::render_report;
use medscan_lib::settings::{self, Settings};
use medscan_lib::translate::GoogleTranslateClient;
use medscan_lib::upload::read_image_file;
use medscan_lib::{AnalysisRequest, Lexicon, Pipeline, PipelineOutcome, TargetLanguage};

struct CliArgs {
    image: PathBuf,
    language: TargetLanguage,
    json: bool,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  medscan <image.png|jpg> [--lang english|hindi] [--json]");
}

fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut image = None;
    let mut language = TargetLanguage::default();
    let mut json = false;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--lang" | "-l" => {
                let value = iter.next().ok_or("--lang needs a value")?;
                language = value.parse()?;
            }
            "--json" => json = true,
            "--help" | "-h" => return Err(String::new()),
            flag if flag.starts_with('-') => return Err(format!("Unknown flag: {}", flag)),
            path => {
                if image.is_some() {
                    return Err("Only one image can be analysed at a time".to_string());
                }
                image = Some(PathBuf::from(path));
            }
        }
    }

    Ok(CliArgs {
        image: image.ok_or("Missing image path")?,
        language,
        json,
    })
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(message) => {
            if !message.is_empty() {
                eprintln!("{}", message);
            }
            print_usage();
            return ExitCode::from(2);
        }
    };

    if let Ok(cwd) = std::env::current_dir() {
        settings::load_env_files(&cwd);
    }
    env_logger::init();

    let outcome = match analyse(&cli) {
        Ok(outcome) => outcome,
        Err(failure) => PipelineOutcome::Failed {
            failure,
            partial: Default::default(),
        },
    };

    if cli.json {
        match serde_json::to_string_pretty(&outcome) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Failed to serialise outcome: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        print!("{}", render_report(&outcome));
    }

    if outcome.is_done() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Everything that can fail before the pipeline starts is reported as an
/// unexpected failure, same as inside the pipeline.
fn analyse(cli: &CliArgs) -> Result<PipelineOutcome, StageFailure> {
    let settings = Settings::load().map_err(|e| startup_failure(e.to_string()))?;
    let http = settings
        .http_client()
        .map_err(|e| startup_failure(e.to_string()))?;

    let image_bytes = read_image_file(&cli.image).map_err(|e| startup_failure(e.to_string()))?;
    log::info!(
        "[STARTUP] {} ({} bytes), language={}",
        cli.image.display(),
        image_bytes.len(),
        cli.language
    );

    let recognizer = OcrSpaceClient::new(http.clone(), &settings.ocr);
    let interpreter = GroqClient::new(http.clone(), &settings.llm);
    let translator = GoogleTranslateClient::new(http, &settings.translate);
    let pipeline = Pipeline::new(Lexicon::builtin(), &recognizer, &interpreter, &translator);

    Ok(pipeline.run(&AnalysisRequest::new(image_bytes, cli.language)))
}

fn startup_failure(detail: String) -> StageFailure {
    log::error!("[STARTUP] {}", detail);
    StageFailure::unexpected(Stage::Idle, detail)
}
