use clap::Parser;
use screenmatch::io::{load_rgb_image, save_image};
use screenmatch::{
    Algorithm, ChromaKey, MatchParameters, MatchResult, Method, OrderBy, Rect, RecoResult,
    TemplateInput, TemplateMatcher,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "ScreenMatch CLI (JSON config driven)")]
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

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum AlgorithmConfig {
    Sqdiff,
    SqdiffNormed,
    Ccorr,
    CcorrNormed,
    Ccoeff,
    CcoeffNormed,
}

impl From<AlgorithmConfig> for Algorithm {
    fn from(value: AlgorithmConfig) -> Self {
        match value {
            AlgorithmConfig::Sqdiff => Algorithm::SqDiff,
            AlgorithmConfig::SqdiffNormed => Algorithm::SqDiffNormed,
            AlgorithmConfig::Ccorr => Algorithm::CCorr,
            AlgorithmConfig::CcorrNormed => Algorithm::CCorrNormed,
            AlgorithmConfig::Ccoeff => Algorithm::CCoeff,
            AlgorithmConfig::CcoeffNormed => Algorithm::CCoeffNormed,
        }
    }
}

/// Method given by name or by legacy numeric code.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(untagged)]
enum MethodConfig {
    Code(i32),
    Name(AlgorithmConfig),
}

impl MethodConfig {
    fn resolve(self, inverted: bool) -> screenmatch::ScreenMatchResult<Method> {
        let mut method = match self {
            MethodConfig::Code(code) => Method::from_code(code)?,
            MethodConfig::Name(name) => Method::new(name.into()),
        };
        method.inverted |= inverted;
        Ok(method)
    }
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum OrderByConfig {
    Horizontal,
    Vertical,
    Score,
    Area,
    Unordered,
}

impl From<OrderByConfig> for OrderBy {
    fn from(value: OrderByConfig) -> Self {
        match value {
            OrderByConfig::Horizontal => OrderBy::Horizontal,
            OrderByConfig::Vertical => OrderBy::Vertical,
            OrderByConfig::Score => OrderBy::Score,
            OrderByConfig::Area => OrderBy::Area,
            OrderByConfig::Unordered => OrderBy::Unordered,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
struct RectConfig {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

impl From<RectConfig> for Rect {
    fn from(value: RectConfig) -> Self {
        Rect::new(value.x, value.y, value.width, value.height)
    }
}

impl From<Rect> for RectConfig {
    fn from(value: Rect) -> Self {
        Self {
            x: value.x,
            y: value.y,
            width: value.width,
            height: value.height,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Config {
    image_path: String,
    templates: Vec<String>,
    thresholds: Vec<f32>,
    method: MethodConfig,
    inverted: bool,
    green_mask: bool,
    chroma_key: [u8; 3],
    chroma_tolerance: u8,
    order_by: OrderByConfig,
    result_index: isize,
    roi: Option<RectConfig>,
    parallel: bool,
    debug_output_path: Option<String>,
    output_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        let key = ChromaKey::default();
        Self {
            image_path: String::new(),
            templates: Vec::new(),
            thresholds: Vec::new(),
            method: MethodConfig::Name(AlgorithmConfig::CcoeffNormed),
            inverted: false,
            green_mask: false,
            chroma_key: key.color,
            chroma_tolerance: key.tolerance,
            order_by: OrderByConfig::Horizontal,
            result_index: 0,
            roi: None,
            parallel: false,
            debug_output_path: None,
            output_path: None,
        }
    }
}

#[derive(Debug, Serialize)]
struct MatchRecord {
    rect: RectConfig,
    score: f32,
    template_index: usize,
}

impl From<MatchResult> for MatchRecord {
    fn from(value: MatchResult) -> Self {
        Self {
            rect: value.rect.into(),
            score: value.score,
            template_index: value.template_index,
        }
    }
}

#[derive(Debug, Serialize)]
struct FailureRecord {
    index: usize,
    source: String,
    error: String,
}

#[derive(Debug, Serialize)]
struct Output {
    algorithm: &'static str,
    success: bool,
    best: Option<MatchRecord>,
    filtered: Vec<MatchRecord>,
    all: Vec<MatchRecord>,
    load_failures: Vec<FailureRecord>,
    cost_ms: f64,
}

impl From<RecoResult> for Output {
    fn from(value: RecoResult) -> Self {
        Self {
            algorithm: value.algorithm,
            success: value.success(),
            best: value.best_result.map(MatchRecord::from),
            filtered: value
                .filtered_results
                .into_iter()
                .map(MatchRecord::from)
                .collect(),
            all: value.all_results.into_iter().map(MatchRecord::from).collect(),
            load_failures: value
                .load_failures
                .into_iter()
                .map(|failure| FailureRecord {
                    index: failure.index,
                    source: failure.source.to_string(),
                    error: failure.error.to_string(),
                })
                .collect(),
            cost_ms: value.cost_ms,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive("screenmatch=info".parse()?),
            )
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
    if config.image_path.is_empty() || config.templates.is_empty() {
        return Err("image_path and at least one template must be set in the config".into());
    }

    let image = load_rgb_image(&config.image_path)?;
    let params = MatchParameters {
        templates: config
            .templates
            .iter()
            .map(|path| TemplateInput::from(path.as_str()))
            .collect(),
        thresholds: config.thresholds.clone(),
        method: config.method.resolve(config.inverted)?,
        green_mask: config.green_mask,
        chroma_key: ChromaKey {
            color: config.chroma_key,
            tolerance: config.chroma_tolerance,
        },
        order_by: config.order_by.into(),
        result_index: config.result_index,
        parallel: config.parallel,
        debug_draw: config.debug_output_path.is_some(),
    };

    let matcher = TemplateMatcher::new(params);
    let mut result = matcher.analyze(image.view(), config.roi.map(Rect::from))?;
    for failure in &result.load_failures {
        tracing::warn!(
            index = failure.index,
            source = %failure.source,
            error = %failure.error,
            "template skipped"
        );
    }

    if let (Some(path), Some(debug)) = (&config.debug_output_path, result.debug_image.take()) {
        save_image(&debug, path)?;
    }

    let output = Output::from(result);
    let json = serde_json::to_string_pretty(&output)?;

    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
