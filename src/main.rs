mod canvas;
mod config;
mod error;
mod geo;
mod help;
mod interaction;
mod launches;
mod logging;
mod map;
mod projection;
mod render;
mod scene;
mod settings;
mod site;
mod spacex;
mod svg;
mod terminal;
mod tooltip;
mod viewer;
mod world;

use clap::{Parser, Subcommand};
use config::MapConfig;
use error::Result;
use geo::GeographyFeature;
use map::MapView;
use settings::Settings;
use spacex::SpaceX;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use terminal::Terminal;
use viewer::Viewer;

#[derive(Parser)]
#[command(name = "launchmap")]
#[command(author = "Launchmap Developers")]
#[command(version = "0.1.0")]
#[command(about = "launchmap: terminal world map of spacecraft launch sites", long_about = None)]
struct Cli {
    /// API base URL (overrides the settings file)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show launch sites on a world map; hover a site for its details
    Map {
        /// GeoJSON FeatureCollection for the base map (default: built-in outlines)
        #[arg(short, long)]
        geo: Option<PathBuf>,

        /// Read launches from a JSON file instead of the API
        #[arg(long)]
        launches: Option<PathBuf>,

        /// Read launchpads from a JSON file instead of the API
        #[arg(long)]
        launchpads: Option<PathBuf>,

        /// Write the rendered map as SVG
        #[arg(long, value_name = "FILE")]
        svg: Option<PathBuf>,

        /// Print the map to stdout (no interactive display)
        #[arg(short, long)]
        print: bool,

        /// Print mode width in columns
        #[arg(long, default_value = "120")]
        cols: u16,

        /// Print mode height in rows
        #[arg(long, default_value = "40")]
        rows: u16,
    },

    /// List launches, oldest first
    Launches {
        /// Read launches from a JSON file instead of the API
        #[arg(short, long)]
        from: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    let settings = Settings::load();

    if let Err(e) = logging::init(&settings.log) {
        eprintln!("Logging disabled: {}", e);
    }

    if let Err(e) = run(cli, settings) {
        tracing::error!(error = %e, "exiting");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli, settings: Settings) -> Result<()> {
    let base_url = cli.base_url.unwrap_or(settings.api.base_url);
    let client = SpaceX::new(&base_url, Duration::from_secs(settings.api.timeout_secs.max(1)));

    match cli.command {
        Commands::Map {
            geo,
            launches,
            launchpads,
            svg: svg_out,
            print,
            cols,
            rows,
        } => {
            let geography = load_geography(geo.or(settings.map.geography))?;
            let client = client
                .with_launches_file(launches.or(settings.map.launches_file))
                .with_launchpads_file(launchpads.or(settings.map.launchpads_file));
            let dataset = client.fetch_all()?;
            let mut view = MapView::new(&MapConfig::default());

            if svg_out.is_none() && !print {
                let mut viewer = Viewer::new(view, geography, dataset, client);
                let mut term = Terminal::new(true)?;
                viewer.run(&mut term)?;
                return Ok(());
            }

            view.load(&geography, &dataset.launchpads);
            if let Some(path) = svg_out {
                fs::write(&path, svg::to_svg(view.surface(), "Launch sites"))?;
                tracing::info!(path = %path.display(), "wrote svg");
            }
            if print {
                let (cols, rows) = (cols.max(10), rows.max(5));
                let mut term = Terminal::offscreen(cols, rows);
                viewer::draw_map(&mut term, &view, cols, rows);
                print!("{}", term.to_ansi());
            }
        }
        Commands::Launches { from } => {
            let client = client.with_launches_file(from.or(settings.map.launches_file));
            print!("{}", launches::format_list(&client.launches()?));
        }
    }

    Ok(())
}

fn load_geography(path: Option<PathBuf>) -> Result<Vec<GeographyFeature>> {
    match path {
        Some(path) => geo::load_features(&path),
        None => Ok(world::continents()),
    }
}
