//! folio - portfolio theme engine
//!
//! Command-line front end for the folio theme engine.

mod services;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::Duration;

use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, error, info, warn};

use folio_core::background::renderer_options;
use folio_core::color::{WcagLevel, check_combination, contrast_ratio, meets_wcag, parse_hex_color};
use folio_core::{BackgroundEffect, CssVariables, EngineConfig, Hsl, ThemeStore, logging, presets};

use crate::services::theme_watcher::{ThemeMessage, ThemeWatcher};

/// How often the watch loop wakes to flush pending history snapshots.
const WATCH_TICK: Duration = Duration::from_millis(100);

/// folio - portfolio theme engine
#[derive(Parser, Debug)]
#[command(name = "folio", version, about, long_about = None)]
struct Args {
    /// Path to the configuration file (uses XDG lookup if not specified)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print example configuration and exit
    #[arg(long)]
    print_example_config: bool,

    /// Validate configuration and exit (returns non-zero on errors)
    #[arg(long)]
    check_config: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a random theme
    Randomize {
        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// List the built-in presets
    Presets,
    /// Apply a preset and print the result
    Preset {
        /// Preset id (see `folio presets`)
        id: String,
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Print the current theme as JSON
    Export,
    /// Import a theme file and print the result
    Import {
        file: PathBuf,
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Css)]
        format: OutputFormat,
    },
    /// Check the contrast of two hex colors
    Contrast {
        /// Text color, e.g. #ffffff
        foreground: String,
        /// Background color, e.g. #1a1a2e
        background: String,
        /// Evaluate against the large-text thresholds
        #[arg(long)]
        large: bool,
    },
    /// List background effects, or show one effect's renderer options
    Effects {
        /// Effect id, e.g. net or gravity-stars
        effect: Option<String>,
    },
    /// Watch a theme file and print CSS whenever it changes
    Watch { file: PathBuf },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Json,
    Css,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging
    logging::init(args.verbose);

    // --print-example-config needs no config at all
    if args.print_example_config {
        print!("{}", folio_core::DEFAULT_CONFIG_TOML);
        return ExitCode::SUCCESS;
    }

    // Load configuration using XDG lookup chain
    // If --config is specified, it must exist and be valid (no fallback)
    let load_result = match EngineConfig::find_and_load(args.config.as_deref()) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Some(ref source) = load_result.source {
        info!("Loaded configuration from {:?}", source);
    } else if load_result.used_defaults {
        debug!("Using default configuration (no config file found)");
    }

    let config = load_result.config;

    // Validate configuration (strict - fail on invalid values)
    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }
    for warning in config.warnings() {
        warn!("{}", warning);
    }

    debug!("Configuration validated successfully");

    // --check-config: just validate and exit
    if args.check_config {
        if let Some(ref source) = load_result.source {
            println!("Configuration valid: {}", source.display());
        } else {
            println!("Configuration valid (using defaults)");
        }
        println!("{}", config.summary());
        return ExitCode::SUCCESS;
    }

    let Some(command) = args.command else {
        eprintln!("Error: no command given (see `folio --help`)");
        return ExitCode::FAILURE;
    };

    match handle_command(command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn handle_command(command: Command, config: &EngineConfig) -> anyhow::Result<()> {
    match command {
        Command::Randomize { seed, format } => {
            let mut store = ThemeStore::new(config, CssVariables::new());
            if let Some(seed) = seed {
                store = store.with_seed(seed);
            }
            store.randomize_all();
            print_theme(&store, format);
            Ok(())
        }
        Command::Presets => {
            for preset in presets::all() {
                println!("{:<10} {:<12} {}", preset.id, preset.name, preset.description);
            }
            Ok(())
        }
        Command::Preset { id, format } => {
            let mut store = ThemeStore::new(config, CssVariables::new());
            if !store.load_preset(&id) {
                let known: Vec<_> = presets::ids().collect();
                return Err(anyhow!("unknown preset '{}' (known: {})", id, known.join(", ")));
            }
            print_theme(&store, format);
            Ok(())
        }
        Command::Export => {
            let store = ThemeStore::new(config, CssVariables::new());
            println!("{}", store.export_theme());
            Ok(())
        }
        Command::Import { file, format } => {
            let json = read_theme_file(&file)?;
            let mut store = ThemeStore::new(config, CssVariables::new());
            store
                .import_theme(&json)
                .with_context(|| format!("cannot import {}", file.display()))?;
            store.flush_history();
            print_theme(&store, format);
            Ok(())
        }
        Command::Contrast {
            foreground,
            background,
            large,
        } => handle_contrast(&foreground, &background, large),
        Command::Effects { effect } => handle_effects(effect.as_deref()),
        Command::Watch { file } => run_watch(&file, config),
    }
}

fn print_theme(store: &ThemeStore<CssVariables>, format: OutputFormat) {
    match format {
        OutputFormat::Json => println!("{}", store.export_theme()),
        OutputFormat::Css => print!("{}", store.target().stylesheet()),
    }
}

fn read_theme_file(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))
}

fn parse_color(input: &str) -> anyhow::Result<Hsl> {
    parse_hex_color(input)
        .map(|rgb| rgb.to_hsl())
        .ok_or_else(|| anyhow!("invalid hex color '{}'", input))
}

fn handle_contrast(foreground: &str, background: &str, large: bool) -> anyhow::Result<()> {
    let fg = parse_color(foreground)?;
    let bg = parse_color(background)?;

    let ratio = contrast_ratio(fg, bg);
    println!("Contrast ratio: {:.2}:1", ratio);
    for level in [WcagLevel::Aa, WcagLevel::Aaa] {
        let verdict = if meets_wcag(ratio, level, large) { "pass" } else { "fail" };
        println!("{:<4} {}", level.as_str(), verdict);
    }

    if let Some(advice) = check_combination(fg, bg, WcagLevel::Aa, large).recommendation {
        println!("{}", advice);
    }
    Ok(())
}

fn handle_effects(effect: Option<&str>) -> anyhow::Result<()> {
    let Some(id) = effect else {
        for effect in BackgroundEffect::ALL {
            println!(
                "{:<14} {:<14} {}",
                effect.as_str(),
                effect.display_name(),
                effect.description()
            );
        }
        return Ok(());
    };

    let effect: BackgroundEffect = id.parse().map_err(|e: String| anyhow!(e))?;
    println!("{} ({})", effect.display_name(), effect.as_str());
    println!("{}", effect.description());
    for url in effect.script_urls() {
        println!("script: {}", url);
    }
    if effect.uses_external_renderer() {
        let options = renderer_options(&effect.defaults());
        println!("{}", serde_json::to_string_pretty(&options)?);
    }
    Ok(())
}

/// Re-import `path` on every change until the watcher goes away.
fn run_watch(path: &Path, config: &EngineConfig) -> anyhow::Result<()> {
    let initial = read_theme_file(path)?;
    let mut store = ThemeStore::new(config, CssVariables::new());
    store
        .import_theme(&initial)
        .with_context(|| format!("cannot import {}", path.display()))?;
    print!("{}", store.target().stylesheet());

    let (sender, receiver) = mpsc::channel();
    let _watcher = ThemeWatcher::start(path, initial.as_bytes(), sender)?;
    info!("Watching {} (Ctrl+C to stop)", path.display());

    loop {
        match receiver.recv_timeout(WATCH_TICK) {
            Ok(ThemeMessage::Changed(json)) => match store.import_theme(&json) {
                Ok(()) => {
                    info!("Theme reloaded from {}", path.display());
                    print!("{}", store.target().stylesheet());
                }
                Err(e) => warn!("Keeping previous theme: {}", e),
            },
            Ok(ThemeMessage::Error(e)) => error!("{}", e),
            Err(RecvTimeoutError::Timeout) => {
                store.tick();
            }
            Err(RecvTimeoutError::Disconnected) => {
                store.flush_history();
                return Err(anyhow!("theme watcher stopped"));
            }
        }
    }
}
