#![deny(unsafe_code)]
//! CLI binary for the mondrian composition generator.
//!
//! Subcommands:
//! - `render`: compose to completion and save a PNG snapshot
//! - `compose`: print the primitive sequence as JSON
//! - `play`: reveal a composition with its delays, driven by stdin triggers
//! - `list`: print available palettes, or the colors of one palette

mod error;
mod trigger;

use clap::{Args, Parser, Subcommand};
use error::CliError;
use mondrian_canvas::{Stage, Surface};
use mondrian_canvas::raster::pixel_size;
use mondrian_core::{ComposerConfig, Palette, Region, Seed, Xorshift64};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};
use trigger::Trigger;

#[derive(Parser)]
#[command(name = "mondrian", about = "Recursive Mondrian-style composition generator")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compose to completion and write a PNG snapshot.
    Render {
        #[command(flatten)]
        recipe: RecipeArgs,

        /// Load the whole recipe from a JSON file instead of flags.
        #[arg(long, conflicts_with_all = ["width", "height", "seed", "palette"])]
        recipe_file: Option<PathBuf>,

        /// Directory for the snapshot (defaults to the pictures folder).
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
    /// Print the primitive sequence of a composition as JSON.
    Compose {
        #[command(flatten)]
        recipe: RecipeArgs,
    },
    /// Reveal a composition with staggered timing.
    ///
    /// Type `r` to restart, `s` to save a snapshot, `q` to quit.
    Play {
        #[command(flatten)]
        recipe: RecipeArgs,

        /// Delay before each primitive is revealed, in milliseconds.
        #[arg(long, default_value_t = mondrian_core::config::PER_PRIMITIVE_DELAY_MS)]
        delay_ms: u64,

        /// Directory for snapshots (defaults to the pictures folder).
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
    /// List palettes, or the colors of one palette.
    List {
        /// Palette whose colors to print.
        palette: Option<String>,
    },
}

#[derive(Args, Debug, Clone)]
struct RecipeArgs {
    /// Canvas width.
    #[arg(short = 'W', long, default_value_t = 1280.0)]
    width: f64,

    /// Canvas height.
    #[arg(short = 'H', long, default_value_t = 720.0)]
    height: f64,

    /// PRNG seed (random when omitted).
    #[arg(long)]
    seed: Option<u64>,

    /// Palette name (named, named-transparent, mondrian, grayscale).
    #[arg(short, long, default_value = mondrian_core::seed::DEFAULT_PALETTE)]
    palette: String,

    /// Regions with a side below this are not subdivided.
    #[arg(long, default_value_t = mondrian_core::MIN_SIDE)]
    min_side: f64,

    /// Regions with a side above this are always split.
    #[arg(long, default_value_t = mondrian_core::OVERSIZE_THRESHOLD)]
    oversize: f64,
}

impl RecipeArgs {
    fn to_seed(&self, delay_ms: u64) -> Seed {
        let mut seed = Seed::new(
            self.width,
            self.height,
            self.seed.unwrap_or_else(Xorshift64::entropy_seed),
        );
        seed.palette = self.palette.clone();
        seed.config = ComposerConfig {
            min_side: self.min_side,
            oversize_threshold: self.oversize,
            delay_ms,
        };
        seed
    }
}

fn read_recipe(path: &Path) -> Result<Seed, CliError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| CliError::Io(format!("cannot read {}: {e}", path.display())))?;
    serde_json::from_str(&text)
        .map_err(|e| CliError::Input(format!("invalid recipe {}: {e}", path.display())))
}

fn stage_for(seed: &Seed, output_dir: Option<PathBuf>) -> Result<Stage<Surface>, CliError> {
    seed.validate()?;
    // Fail before composing if the surface could never be snapshotted.
    pixel_size(seed.width, seed.height)?;
    let mut surface = Surface::new(seed.width, seed.height);
    if let Some(dir) = output_dir {
        surface = surface.with_storage_dir(dir);
    }
    let palette = Palette::from_name(&seed.palette)?;
    Ok(Stage::new(surface, palette, seed.config))
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List { palette: None } => {
            let palettes = Palette::list_names();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&serde_json::json!({ "palettes": palettes }))?);
            } else {
                println!("Palettes:");
                for name in palettes {
                    println!("  {name}");
                }
            }
        }
        Command::List {
            palette: Some(name),
        } => {
            let palette = Palette::from_name(&name)?;
            if cli.json {
                let colors: Vec<_> = palette
                    .entries()
                    .iter()
                    .map(|c| serde_json::json!({ "name": c.name, "color": c.color }))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&colors)?);
            } else {
                for c in palette.entries() {
                    println!("{:<24} {}", c.name, c.color);
                }
            }
        }
        Command::Compose { recipe } => {
            let seed = recipe.to_seed(0);
            let primitives: Vec<_> = seed.composer()?.primitives().collect();
            let out = serde_json::json!({ "recipe": seed, "primitives": primitives });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Command::Render {
            recipe,
            recipe_file,
            output_dir,
        } => {
            let mut seed = match recipe_file {
                Some(path) => read_recipe(&path)?,
                None => recipe.to_seed(0),
            };
            seed.config.delay_ms = 0;

            let mut stage = stage_for(&seed, output_dir)?;
            stage.start_seeded(seed.region(), seed.seed)?;
            let count = stage.finish();
            let path = stage.save()?;

            if cli.json {
                let info = serde_json::json!({
                    "recipe": seed,
                    "primitives": count,
                    "output": path.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {}x{} ({count} primitives, seed {}, palette {})",
                    seed.width, seed.height, seed.seed, seed.palette
                );
                println!("{}", path.display());
            }
        }
        Command::Play {
            recipe,
            delay_ms,
            output_dir,
        } => {
            let seed = recipe.to_seed(delay_ms);
            let stage = stage_for(&seed, output_dir)?;
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            runtime.block_on(play(stage, seed, cli.json))?;
        }
    }

    Ok(())
}

/// Reveals runs until quit, or until stdin closes and the last run is done.
async fn play(mut stage: Stage<Surface>, seed: Seed, json: bool) -> Result<(), CliError> {
    let region = seed.region();
    stage.start_seeded(region, seed.seed)?;
    let input = BufReader::new(tokio::io::stdin());
    drive(&mut stage, region, input, &mut std::io::stdout(), json).await
}

/// Reveals the current run while applying triggers read line by line from `input`.
///
/// Saved paths (or failed saves, in JSON mode) are written to `out`. A failed
/// save is reported and the session carries on.
async fn drive<R, W>(
    stage: &mut Stage<Surface>,
    region: Region,
    input: R,
    out: &mut W,
    json: bool,
) -> Result<(), CliError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    let mut input_open = true;

    while input_open || stage.is_running() {
        tokio::select! {
            line = lines.next_line(), if input_open => {
                let Some(line) = line? else {
                    input_open = false;
                    continue;
                };
                match Trigger::parse(&line) {
                    Some(Trigger::Restart) => {
                        let next = stage.start(region)?;
                        info!(seed = next, "restarted");
                    }
                    Some(Trigger::Save) => report_save(stage, out, json)?,
                    Some(Trigger::Quit) => break,
                    None if line.trim().is_empty() => {}
                    None => warn!(input = %line.trim(), "unknown command (expected r, s, or q)"),
                }
            }
            _ = stage.reveal_next(), if stage.is_running() => {}
        }
    }

    Ok(())
}

fn report_save<W: Write>(stage: &Stage<Surface>, out: &mut W, json: bool) -> Result<(), CliError> {
    match stage.save() {
        Ok(path) if json => {
            let info = serde_json::json!({
                "seed": stage.current_seed(),
                "primitives": stage.sink().len(),
                "output": path.display().to_string(),
            });
            writeln!(out, "{}", serde_json::to_string(&info)?)?;
        }
        Ok(path) => writeln!(out, "{}", path.display())?,
        Err(e) => {
            let e = CliError::from(e);
            error!(error = %e, "snapshot not saved");
            if json {
                let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
                writeln!(out, "{}", serde_json::to_string(&j)?)?;
            }
        }
    }
    Ok(())
}

fn main() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
