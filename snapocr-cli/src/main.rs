use clap::Parser;
use serde::{Deserialize, Serialize};
use snapocr::bank::DEFAULT_CHARSET;
use snapocr::image::io::{load_rgba_image, save_glyphs};
use snapocr::kernel::ScoreWeights;
use snapocr::{
    normalize_output, BitmapFont, FontRasterizer, GlyphRasterizer, LibraryConfig, MatchConfig,
    PreprocessConfig, RecognitionOutput, Recognizer, RecognizerConfig, Segment, TemplateLibrary,
};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "snapocr CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output.
    #[arg(long)]
    trace: bool,
    /// Print every segmented glyph as ASCII art to stderr.
    #[arg(long)]
    ascii: bool,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct PreprocessConfigJson {
    upscale: f32,
}

impl Default for PreprocessConfigJson {
    fn default() -> Self {
        Self {
            upscale: PreprocessConfig::default().upscale,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct WeightsJson {
    alignment: f32,
    h_profile: f32,
    v_profile: f32,
    holes: f32,
}

impl Default for WeightsJson {
    fn default() -> Self {
        let w = ScoreWeights::default();
        Self {
            alignment: w.alignment,
            h_profile: w.h_profile,
            v_profile: w.v_profile,
            holes: w.holes,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct MatchConfigJson {
    accept: f32,
    accept_constrained: f32,
    ambiguity_margin: f32,
    density_gate: f32,
    weights: WeightsJson,
}

impl Default for MatchConfigJson {
    fn default() -> Self {
        let cfg = MatchConfig::default();
        Self {
            accept: cfg.accept,
            accept_constrained: cfg.accept_constrained,
            ambiguity_margin: cfg.ambiguity_margin,
            density_gate: cfg.density_gate,
            weights: WeightsJson::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Config {
    image_path: String,
    output_path: Option<String>,
    dump_glyphs: Option<String>,
    candidates: Option<String>,
    use_system_fonts: bool,
    fonts: Vec<String>,
    charset: String,
    test_card: Option<String>,
    preprocess: PreprocessConfigJson,
    #[serde(rename = "match")]
    match_cfg: MatchConfigJson,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            image_path: String::new(),
            output_path: None,
            dump_glyphs: None,
            candidates: None,
            use_system_fonts: true,
            fonts: Vec::new(),
            charset: DEFAULT_CHARSET.to_string(),
            test_card: RecognizerConfig::default().test_card,
            preprocess: PreprocessConfigJson::default(),
            match_cfg: MatchConfigJson::default(),
        }
    }
}

#[derive(Debug, Serialize)]
struct SegmentRecord {
    left: usize,
    right: usize,
    top: usize,
    bottom: usize,
}

impl From<Segment> for SegmentRecord {
    fn from(value: Segment) -> Self {
        Self {
            left: value.left,
            right: value.right,
            top: value.top,
            bottom: value.bottom,
        }
    }
}

#[derive(Debug, Serialize)]
struct Output {
    text: String,
    raw: String,
    normalized: String,
    strategy: &'static str,
    segments: Vec<SegmentRecord>,
}

impl From<RecognitionOutput> for Output {
    fn from(value: RecognitionOutput) -> Self {
        Self {
            normalized: normalize_output(&value.text),
            strategy: value.strategy.as_str(),
            segments: value
                .glyphs
                .iter()
                .map(|g| SegmentRecord::from(g.segment))
                .collect(),
            text: value.text,
            raw: value.raw,
        }
    }
}

fn build_library(config: &Config) -> Result<TemplateLibrary, Box<dyn std::error::Error>> {
    let mut sources: Vec<Box<dyn GlyphRasterizer>> = vec![Box::new(BitmapFont::default())];
    if config.use_system_fonts {
        for font in FontRasterizer::system_fonts() {
            sources.push(Box::new(font));
        }
    }
    for path in &config.fonts {
        sources.push(Box::new(FontRasterizer::from_path(path)?));
    }
    tracing::info!(sources = sources.len(), "building template library");

    let library = TemplateLibrary::build(
        &sources,
        &LibraryConfig {
            charset: config.charset.clone(),
            ..LibraryConfig::default()
        },
    );
    if library.is_empty() {
        return Err("no templates could be built from the configured fonts".into());
    }
    Ok(library)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("snapocr=info".parse()?))
            .with_target(false)
            .init();
    }

    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.image_path.is_empty() {
        return Err("image_path must be set in the config".into());
    }
    if config.charset.is_empty() {
        return Err("charset must not be empty".into());
    }

    let library = Arc::new(build_library(&config)?);
    let m = &config.match_cfg;
    let recognizer = Recognizer::new(library).with_config(RecognizerConfig {
        preprocess: PreprocessConfig {
            upscale: config.preprocess.upscale,
        },
        matching: MatchConfig {
            accept: m.accept,
            accept_constrained: m.accept_constrained,
            ambiguity_margin: m.ambiguity_margin,
            density_gate: m.density_gate,
            weights: ScoreWeights {
                alignment: m.weights.alignment,
                h_profile: m.weights.h_profile,
                v_profile: m.weights.v_profile,
                holes: m.weights.holes,
            },
        },
        test_card: config.test_card.clone(),
    });

    let image = load_rgba_image(&config.image_path)?;
    let result = match config.candidates.as_deref() {
        Some(candidates) => recognizer.try_recognize_constrained(&image, candidates)?,
        None => recognizer.try_recognize(&image)?,
    };

    if cli.ascii {
        for (idx, glyph) in result.glyphs.iter().enumerate() {
            eprintln!("glyph {idx} at x={}:", glyph.segment.left);
            eprintln!("{}", glyph.image.to_ascii());
        }
    }
    if let Some(dir) = &config.dump_glyphs {
        let paths = save_glyphs(dir, &result.glyphs)?;
        tracing::info!(count = paths.len(), dir = dir.as_str(), "dumped glyphs");
    }

    let output = Output::from(result);
    let json = serde_json::to_string_pretty(&output)?;
    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
