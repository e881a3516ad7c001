//! geoqry entry point
//!
//! Reads a .geo file (and optionally a .qry file), runs the simulation and
//! writes the resulting SVG documents.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use geoqry::renderer::{Scene, write_scene};
use geoqry::sim::Session;
use geoqry::{FileData, Settings, geo};

/// Shape loaders, shooters and arena resolution over a .geo ground
#[derive(Parser, Debug)]
#[command(name = "geoqry", version)]
struct Cli {
    /// .geo file describing the initial ground
    #[arg(short = 'f', value_name = "GEO")]
    geo: PathBuf,

    /// .qry file with shooter commands
    #[arg(short = 'q', value_name = "QRY")]
    qry: Option<PathBuf>,

    /// Directory for the generated documents
    #[arg(short = 'o', value_name = "DIR")]
    output: PathBuf,

    /// JSON render settings
    #[arg(short = 'c', value_name = "SETTINGS")]
    settings: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    log::info!("geoqry starting...");

    let settings = Settings::load(cli.settings.as_deref()).context("loading settings")?;
    fs::create_dir_all(&cli.output)
        .with_context(|| format!("creating output directory {}", cli.output.display()))?;

    let geo_file = FileData::read(&cli.geo)?;
    log::info!("geo: {} ({} lines)", geo_file.file_name(), geo_file.line_count());
    let (mut ground, _) = geo::populate(geo_file.lines());

    let geo_svg = cli.output.join(format!("{}.svg", geo_file.base_name()));
    let scene = Scene {
        ground: &ground,
        trajectories: &[],
        view_box: settings.geo_view_box,
    };
    write_scene(&geo_svg, &scene, &settings)?;

    let Some(qry_path) = cli.qry else {
        return Ok(());
    };

    let qry_file = FileData::read(&qry_path)?;
    log::info!("qry: {} ({} lines)", qry_file.file_name(), qry_file.line_count());
    let mut session = Session::new();
    session.run(qry_file.lines(), &mut ground);

    let trajectories = session.trajectories();
    let qry_svg = cli
        .output
        .join(format!("{}-{}.svg", geo_file.base_name(), qry_file.base_name()));
    let scene = Scene {
        ground: &ground,
        trajectories: &trajectories,
        view_box: settings.qry_view_box,
    };
    write_scene(&qry_svg, &scene, &settings)?;

    Ok(())
}
