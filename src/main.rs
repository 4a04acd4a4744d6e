use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use pitmap::draw::CanvasSurface;
use pitmap::scout::StatusMap;
use pitmap::store::{self, StoredPitMap};
use pitmap::{Config, PitMapCanvas};

#[derive(Parser, Debug)]
#[command(name = "pitmap")]
#[command(
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("PITMAP_GIT_HASH"), ")"),
    about = "Pit map canvas: render, inspect and import competition pit maps"
)]
struct Cli {
    /// Read settings from this file instead of ~/.config/pitmap/config.toml
    #[arg(long, short = 'c', value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a saved map to a PNG image
    Render {
        /// Saved map file
        map: PathBuf,

        /// Output PNG path
        #[arg(long, short = 'o', value_name = "PNG")]
        output: PathBuf,

        #[arg(long, default_value_t = 800)]
        width: i32,

        #[arg(long, default_value_t = 600)]
        height: i32,

        /// Render the scouting view using pit statuses from this JSON file
        #[arg(long, value_name = "JSON")]
        statuses: Option<PathBuf>,
    },
    /// Print a summary of a saved map
    Info {
        /// Saved map file
        map: PathBuf,

        /// Include scouting progress from this JSON status file
        #[arg(long, value_name = "JSON")]
        statuses: Option<PathBuf>,
    },
    /// Import an exported map under a new id
    Import {
        /// Exported map JSON
        input: PathBuf,

        /// Where to save the imported map
        #[arg(long, short = 'o', value_name = "MAP")]
        output: PathBuf,
    },
    /// Export a saved map for sharing
    Export {
        /// Saved map file
        map: PathBuf,

        /// Write to this file instead of stdout
        #[arg(long, short = 'o', value_name = "JSON")]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Render {
            map,
            output,
            width,
            height,
            statuses,
        } => render(&config, &map, &output, width, height, statuses.as_deref()),
        Command::Info { map, statuses } => info(&map, statuses.as_deref()),
        Command::Import { input, output } => import(&input, &output),
        Command::Export { map, output } => export(&map, output.as_deref()),
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load().or_else(|err| {
            log::warn!("Failed to locate config: {err:#}; using defaults");
            Ok(Config::default())
        }),
    }
}

fn load_statuses(path: &Path) -> Result<StatusMap> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read status file {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("failed to parse status file {}", path.display()))
}

fn render(
    config: &Config,
    map_path: &Path,
    output: &Path,
    width: i32,
    height: i32,
    statuses: Option<&Path>,
) -> Result<()> {
    let map = store::load_map(map_path)?;
    let surface = CanvasSurface::new(width, height).context("failed to create canvas surface")?;

    let mut canvas = PitMapCanvas::new(surface, config);
    canvas.load_document(map.canvas_data);
    if let Some(path) = statuses {
        canvas.enter_scout_mode(Some(load_statuses(path)?));
    }

    canvas
        .surface()
        .write_png(output)
        .with_context(|| format!("failed to write {}", output.display()))?;

    log::info!("Rendered '{}' to {}", map.name, output.display());
    println!("Wrote {}", output.display());
    Ok(())
}

fn info(map_path: &Path, statuses: Option<&Path>) -> Result<()> {
    let map = store::load_map(map_path)?;
    print_summary(&map);

    if let Some(path) = statuses {
        let mut seeded = StatusMap::seeded_from(&map.canvas_data);
        seeded.merge_from(&load_statuses(path)?);
        let stats = seeded.stats();
        println!(
            "Scouting: {} of {} done, {} absent, {} not visited",
            stats.done, stats.total, stats.absent, stats.not_visited
        );
    }
    Ok(())
}

fn print_summary(map: &StoredPitMap) {
    let doc = &map.canvas_data;
    let pits = doc.elements.iter().filter(|e| e.is_pit()).count();
    let lines = doc.elements.iter().filter(|e| e.is_line()).count();

    println!("Map: {}", map.name);
    if map.competition_name.is_empty() {
        println!("Competition: {}", map.competition_key);
    } else {
        println!(
            "Competition: {} ({})",
            map.competition_name, map.competition_key
        );
    }
    println!(
        "Elements: {} ({} pits, {} lines, {} text)",
        doc.len(),
        pits,
        lines,
        doc.len() - pits - lines
    );
    println!("Assigned teams: {}", map.team_assignments.len());
    for assignment in &map.team_assignments {
        println!("  {} -> {}", assignment.team_number, assignment.pit_location);
    }
}

fn import(input: &Path, output: &Path) -> Result<()> {
    let json = fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let map = store::import_map(&json)
        .with_context(|| format!("failed to import {}", input.display()))?;
    store::save_map(output, &map)?;

    println!("Imported '{}' as {}", map.name, map.id);
    Ok(())
}

fn export(map_path: &Path, output: Option<&Path>) -> Result<()> {
    let map = store::load_map(map_path)?;
    let json = store::export_map(&map)?;

    match output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
            println!("Exported '{}' to {}", map.name, path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
