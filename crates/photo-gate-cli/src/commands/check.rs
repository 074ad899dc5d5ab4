//! Check command - score images against the quality gate.

use std::collections::HashMap;
use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};
use photo_gate_adapters::FsImageSource;
use photo_gate_core::{
    AnalysisRecord, AnalyzerConfig, FailurePolicy, FeedbackConfig, ImageSource, ProgressEvent,
    ProgressSink, QualityAnalyzer, ResultOutput, ScoringConfig,
};
use tracing::{debug, info, warn};

use super::ExitCode;
use crate::config::AppConfig;
use crate::output::{JsonLayout, JsonOutput, ProgressBar};

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// JSON Lines (one JSON object per line)
    #[default]
    Jsonl,
    /// Single JSON array
    Json,
}

/// What to report for an image that cannot be analyzed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    /// Neutral passing result
    #[default]
    Open,
    /// Neutral failing result asking for a retake
    Closed,
}

impl PolicyArg {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "open" => Some(Self::Open),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }
}

impl From<PolicyArg> for FailurePolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Open => Self::FailOpen,
            PolicyArg::Closed => Self::FailClosed,
        }
    }
}

/// Parse and validate a 0-100 score threshold.
fn parse_percent(s: &str) -> Result<u8, String> {
    let value: u8 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid score"))?;
    if value <= 100 {
        Ok(value)
    } else {
        Err(format!("{value} is not in 0..=100"))
    }
}

/// Shared arguments for image analysis.
#[derive(Args, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct CheckArgs {
    /// Files or directories to analyze
    pub paths: Vec<PathBuf>,

    /// Recurse into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Minimum quality score that passes (0-100)
    #[arg(long, value_parser = parse_percent)]
    pub pass_threshold: Option<u8>,

    /// Result for images that cannot be analyzed
    #[arg(long, value_enum)]
    pub failure_policy: Option<PolicyArg>,

    /// Include EXIF metadata in output
    #[arg(long)]
    pub exif: bool,

    /// Show progress bar
    #[arg(long)]
    pub progress: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Pretty-print JSON output (only affects --format json)
    #[arg(long)]
    pub pretty: bool,

    /// Merged config (populated by `with_config`, not from CLI).
    #[arg(skip)]
    config: Option<AppConfig>,
}

impl CheckArgs {
    /// Apply configuration file values, respecting CLI precedence.
    ///
    /// Layering priority (lowest to highest):
    /// 1. Hardcoded defaults (in accessor methods)
    /// 2. Config file values (XDG, then project-local)
    /// 3. CLI arguments (already set on self)
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        if !args.recursive {
            args.recursive = config.general.recursive.unwrap_or(false);
        }

        if args.failure_policy.is_none() {
            args.failure_policy = config.policy.failure.as_deref().and_then(PolicyArg::parse);
        }

        if args.format.is_none() {
            args.format = config
                .output
                .format
                .as_ref()
                .and_then(|s| match s.as_str() {
                    "json" => Some(OutputFormat::Json),
                    "jsonl" => Some(OutputFormat::Jsonl),
                    _ => None,
                });
        }

        // Boolean output options: CLI flag wins, then config
        if !args.pretty {
            args.pretty = config.output.pretty.unwrap_or(false);
        }
        if !args.exif {
            args.exif = config.output.exif.unwrap_or(false);
        }
        if !args.progress {
            args.progress = config.output.progress.unwrap_or(false);
        }

        args.config = Some(config.clone());

        args
    }

    /// Get output format with fallback to JSONL.
    fn format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }

    fn layout(&self) -> JsonLayout {
        match self.format() {
            OutputFormat::Jsonl => JsonLayout::Lines,
            OutputFormat::Json => JsonLayout::Array {
                pretty: self.pretty,
            },
        }
    }

    /// Get failure policy with fallback to fail-open.
    fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy.unwrap_or_default().into()
    }

    /// Analyzer settings from config, with the CLI pass threshold on top.
    ///
    /// Each section that fails validation is replaced by its defaults on its
    /// own. The CLI pass threshold drags the neighbouring band thresholds
    /// along so the bands stay ordered.
    fn analyzer_config(&self) -> AnalyzerConfig {
        let file = self
            .config
            .as_ref()
            .map(AppConfig::analyzer_config)
            .unwrap_or_default();

        let scoring = match file.scoring.validate() {
            Ok(()) => file.scoring,
            Err(e) => {
                warn!("Ignoring invalid [scoring] configuration: {e}");
                ScoringConfig::default()
            }
        };

        let with_cli_pass = |feedback: FeedbackConfig| match self.pass_threshold {
            Some(pass) => feedback.with_pass_threshold(pass),
            None => feedback,
        };
        let feedback = with_cli_pass(file.feedback);
        let feedback = match feedback.validate() {
            Ok(()) => feedback,
            Err(e) => {
                warn!("Ignoring invalid [feedback] configuration: {e}");
                with_cli_pass(FeedbackConfig::default())
            }
        };

        AnalyzerConfig { scoring, feedback }
    }
}

/// Result of running the check command.
#[allow(dead_code)] // Fields exposed for programmatic use
pub struct CheckResult {
    /// Number of images processed.
    pub processed: usize,
    /// Number of images skipped.
    pub skipped: usize,
    /// Number of images that failed the gate.
    pub failed: usize,
    /// Exit code.
    pub exit_code: ExitCode,
}

/// Run the check command.
///
/// Expects `args` to have been processed through `with_config()` first
/// to apply configuration file settings.
pub fn run(args: &CheckArgs) -> Result<CheckResult> {
    info!("Running check command on {} paths", args.paths.len());

    if args.paths.is_empty() {
        anyhow::bail!("No paths specified");
    }

    let analyzer = QualityAnalyzer::new(args.analyzer_config())?;
    debug!("Analyzer config: {:?}", analyzer.config());

    let source = FsImageSource::new(args.paths.clone(), args.recursive);
    let total = source.count_hint();

    // Determine if we should show progress
    let show_progress = !args.quiet && (args.progress || std::io::stderr().is_terminal());
    let progress_bar = ProgressBar::new(total.map(|t| t as u64), args.quiet, show_progress);

    let output = JsonOutput::stdout(args.layout());

    process_images(
        &source,
        &analyzer,
        &output,
        &progress_bar,
        args.failure_policy(),
        args.exif,
    )
}

/// Score every image from the source and write one record per image.
fn process_images(
    source: &dyn ImageSource,
    analyzer: &QualityAnalyzer,
    output: &dyn ResultOutput,
    progress: &dyn ProgressSink,
    policy: FailurePolicy,
    with_exif: bool,
) -> Result<CheckResult> {
    let total = source.count_hint();
    let mut processed = 0usize;
    let mut skipped = 0usize;
    let mut failed = 0usize;

    for (index, image_result) in source.images().enumerate() {
        let image = match image_result {
            Ok(img) => img,
            Err(e) => {
                // The error message carries the path via anyhow context
                progress.on_event(ProgressEvent::Skipped {
                    path: format!("image {index}"),
                    reason: format!("{e:#}"),
                });
                skipped += 1;
                continue;
            }
        };

        progress.on_event(ProgressEvent::Started {
            path: image.path.clone(),
            index,
            total,
        });

        let outcome = analyzer.analyze(&image.bytes, policy);

        let exif = if with_exif {
            extract_exif(&image.bytes)
        } else {
            None
        };

        let record = AnalysisRecord {
            path: image.path,
            timestamp: iso_timestamp(),
            dimensions: outcome.dimensions,
            metrics: outcome.metrics,
            error: outcome.error.map(|e| e.to_string()),
            exif,
        };

        if !record.metrics.passed() {
            failed += 1;
        }

        progress.on_event(ProgressEvent::Completed {
            record: record.clone(),
        });

        output.write(&record)?;
        processed += 1;
    }

    output.flush()?;

    progress.on_event(ProgressEvent::Finished { processed, skipped });

    let exit_code = if failed > 0 {
        ExitCode::Failed
    } else {
        ExitCode::Success
    };

    Ok(CheckResult {
        processed,
        skipped,
        failed,
        exit_code,
    })
}

/// Extract EXIF metadata from encoded image bytes.
fn extract_exif(bytes: &[u8]) -> Option<HashMap<String, String>> {
    let mut reader = std::io::Cursor::new(bytes);
    let exif = exif::Reader::new().read_from_container(&mut reader).ok()?;

    let map: HashMap<String, String> = exif
        .fields()
        .map(|field| {
            (
                field.tag.to_string(),
                field.display_value().with_unit(&exif).to_string(),
            )
        })
        .collect();

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

/// Generate ISO 8601 UTC timestamp (RFC 3339 format).
fn iso_timestamp() -> String {
    match time::OffsetDateTime::now_utc().format(&time::format_description::well_known::Rfc3339) {
        Ok(ts) => ts,
        Err(e) => {
            debug!("Timestamp format failed: {e}");
            String::from("1970-01-01T00:00:00Z")
        }
    }
}
