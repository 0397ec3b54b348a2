use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use symmatch::io::{load_gray_image, load_templates_from_dir};
use symmatch::{
    DetectConfig, Detection, DetectionReport, RasterImage, SkippedScale, SuppressionMode,
    SymMatchResult, SymbolDetector, Template,
};
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "SymMatch CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output for performance profiling.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
enum SuppressionConfig {
    #[default]
    Global,
    PerSymbol,
}

impl From<SuppressionConfig> for SuppressionMode {
    fn from(value: SuppressionConfig) -> Self {
        match value {
            SuppressionConfig::Global => SuppressionMode::Global,
            SuppressionConfig::PerSymbol => SuppressionMode::PerSymbol,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct DetectConfigJson {
    min_scale: f32,
    max_scale: f32,
    scale_steps: usize,
    match_threshold: f32,
    iou_threshold: f32,
    suppression: SuppressionConfig,
    parallel: bool,
    min_var_i: f32,
}

impl Default for DetectConfigJson {
    fn default() -> Self {
        let cfg = DetectConfig::default();
        Self {
            min_scale: cfg.min_scale,
            max_scale: cfg.max_scale,
            scale_steps: cfg.scale_steps,
            match_threshold: cfg.match_threshold,
            iou_threshold: cfg.iou_threshold,
            suppression: SuppressionConfig::Global,
            parallel: cfg.parallel,
            min_var_i: cfg.min_var_i,
        }
    }
}

impl From<DetectConfigJson> for DetectConfig {
    fn from(value: DetectConfigJson) -> Self {
        Self {
            min_scale: value.min_scale,
            max_scale: value.max_scale,
            scale_steps: value.scale_steps,
            match_threshold: value.match_threshold,
            iou_threshold: value.iou_threshold,
            suppression: value.suppression.into(),
            parallel: value.parallel,
            min_var_i: value.min_var_i,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct Config {
    target_path: String,
    symbols_dir: String,
    output_path: Option<String>,
    detect: DetectConfigJson,
}

#[derive(Debug, Serialize)]
struct DetectionRecord {
    symbol: String,
    x: usize,
    y: usize,
    width: usize,
    height: usize,
    score: f32,
    scale: f32,
}

impl From<Detection> for DetectionRecord {
    fn from(value: Detection) -> Self {
        Self {
            symbol: value.symbol,
            x: value.x,
            y: value.y,
            width: value.width,
            height: value.height,
            score: value.score,
            scale: value.scale,
        }
    }
}

#[derive(Debug, Serialize)]
struct SkippedRecord {
    symbol: String,
    scale: f32,
    reason: String,
}

impl From<SkippedScale> for SkippedRecord {
    fn from(value: SkippedScale) -> Self {
        Self {
            symbol: value.symbol,
            scale: value.scale,
            reason: value.error.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct Output {
    detections: Vec<DetectionRecord>,
    symbols: Vec<String>,
    skipped: Vec<SkippedRecord>,
}

impl From<DetectionReport> for Output {
    fn from(value: DetectionReport) -> Self {
        Self {
            detections: value.detections.into_iter().map(Into::into).collect(),
            symbols: value.symbols.into_iter().collect(),
            skipped: value.skipped.into_iter().map(Into::into).collect(),
        }
    }
}

/// Runs the detector; an empty template set yields an empty report.
fn run_detection(
    target: &RasterImage,
    templates: Vec<Template>,
    cfg: DetectConfig,
) -> SymMatchResult<Output> {
    let detector = SymbolDetector::new(templates).with_config(cfg);
    Ok(Output::from(detector.detect_report(target.view())?))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("symmatch=info".parse()?))
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.target_path.is_empty() || config.symbols_dir.is_empty() {
        return Err("target_path and symbols_dir must be set in the config".into());
    }

    let target = load_gray_image(&config.target_path)?;
    let (templates, failures) = load_templates_from_dir(&config.symbols_dir)?;
    for failure in &failures {
        eprintln!(
            "skipping symbol {}: {}",
            failure.path.display(),
            failure.error
        );
    }
    tracing::info!(
        templates = templates.len(),
        failed = failures.len(),
        "loaded symbol templates"
    );
    if templates.is_empty() {
        eprintln!("no usable symbol images in {}", config.symbols_dir);
    }

    let output = run_detection(&target, templates, config.detect.into())?;
    let json = serde_json::to_string_pretty(&output)?;

    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
