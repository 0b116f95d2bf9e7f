use std::path::PathBuf;

use history_chart::api::{ChartCoreConfig, LoadState, bootstrap};
use history_chart::core::{CategoryFilter, PriceScaleMode};
use history_chart::feeds::FeedBundle;
use history_chart::render::NullRenderer;

const USAGE: &str = "usage: frame_snapshot --feeds <dir> [--config <path>] [--brush <px0>,<px1>] [--mode log|linear] [--filter <category|all>] [--lang <code>]";

#[derive(Debug, Default)]
struct CliArgs {
    feeds: Option<PathBuf>,
    config: Option<PathBuf>,
    brush: Option<(f64, f64)>,
    mode: Option<PriceScaleMode>,
    filter: Option<CategoryFilter>,
    language: Option<String>,
}

fn main() {
    let _ = history_chart::telemetry::init_tracing_with_default_filter("warn");
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let feeds_dir = args.feeds.ok_or_else(|| USAGE.to_owned())?;
    let config = match &args.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .map_err(|err| format!("failed to read `{}`: {err}", path.display()))?;
            ChartCoreConfig::from_json_str(&raw).map_err(|err| err.to_string())?
        }
        None => ChartCoreConfig::default(),
    };

    let today = chrono::Utc::now().date_naive();
    let bundle = FeedBundle::load_from_dir(&feeds_dir);
    let loaded = bootstrap(NullRenderer::default(), config, bundle, None, today);
    let (mut core, translations) = match loaded {
        LoadState::Ready {
            core, translations, ..
        } => (core, translations),
        LoadState::Failed { error, .. } => return Err(error.to_string()),
    };

    if let Some(mode) = args.mode {
        core.set_scale_mode(mode).map_err(|err| err.to_string())?;
    }
    if let Some(filter) = args.filter {
        core.set_filter(filter).map_err(|err| err.to_string())?;
    }
    if let Some(language) = args.language {
        if !translations.has_language(&language) {
            eprintln!("warning: no translations for `{language}`, labels fall back to keys");
        }
        core.set_language(language).map_err(|err| err.to_string())?;
    }
    if args.brush.is_some() {
        core.on_brush(args.brush).map_err(|err| err.to_string())?;
    }

    let frame = core
        .last_frame()
        .ok_or_else(|| "no frame was rendered".to_owned())?;
    let json = frame
        .to_json_contract_v1_pretty()
        .map_err(|err| err.to_string())?;
    println!("{json}");
    Ok(())
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    let mut parsed = CliArgs::default();

    while let Some(flag) = args.next() {
        let mut value = |name: &str| {
            args.next()
                .ok_or_else(|| format!("missing value for {name}"))
        };
        match flag.as_str() {
            "--feeds" => parsed.feeds = Some(PathBuf::from(value("--feeds")?)),
            "--config" => parsed.config = Some(PathBuf::from(value("--config")?)),
            "--brush" => parsed.brush = Some(parse_brush(&value("--brush")?)?),
            "--mode" => {
                parsed.mode = Some(match value("--mode")?.as_str() {
                    "log" => PriceScaleMode::Log,
                    "linear" => PriceScaleMode::Linear,
                    other => return Err(format!("unknown mode `{other}` (expected log|linear)")),
                });
            }
            "--filter" => {
                parsed.filter = Some(
                    value("--filter")?
                        .parse()
                        .map_err(|err: history_chart::ChartError| err.to_string())?,
                );
            }
            "--lang" => parsed.language = Some(value("--lang")?),
            "-h" | "--help" => return Err(USAGE.to_owned()),
            other => return Err(format!("unknown flag `{other}`\n{USAGE}")),
        }
    }

    Ok(parsed)
}

fn parse_brush(raw: &str) -> Result<(f64, f64), String> {
    let (start, end) = raw
        .split_once(',')
        .ok_or_else(|| format!("brush must be `<px0>,<px1>`, got `{raw}`"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<f64>()
            .map_err(|err| format!("invalid brush bound `{part}`: {err}"))
    };
    Ok((parse(start)?, parse(end)?))
}
