use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

use waylog::app::{App, MapView};
use waylog::app_dirs::AppDirs;
use waylog::form::FormInput;
use waylog::persist::{FileBlobStore, WorkoutLog};
use waylog::workout::{Coordinates, Workout, WorkoutDetails, WorkoutKind};

/// map-pinned workout log for runs and rides
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Directory holding the persisted workout list. Defaults to the
    /// platform data directory.
    #[arg(long, value_name = "DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv). Defaults to INFO.
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Decrease log verbosity (-q, -qq). Defaults to INFO.
    #[arg(short = 'q', long, action = ArgAction::Count, global = true)]
    quiet: u8,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Record a workout pinned to a map coordinate
    Add {
        /// Workout kind
        #[arg(value_enum)]
        kind: KindArg,

        /// Latitude of the map pin
        #[arg(allow_hyphen_values = true)]
        lat: f64,

        /// Longitude of the map pin
        #[arg(allow_hyphen_values = true)]
        lng: f64,

        /// Distance in km
        distance: String,

        /// Duration in minutes
        duration: String,

        /// Cadence (spm) for running, elevation gain (m) for cycling
        #[arg(allow_hyphen_values = true)]
        extra: String,
    },
    /// Show recorded workouts in insertion order
    List,
    /// Delete the whole workout log
    Reset,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum KindArg {
    Running,
    Cycling,
}

impl From<KindArg> for WorkoutKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Running => Self::Running,
            KindArg::Cycling => Self::Cycling,
        }
    }
}

/// Stand-in for the map widget: markers and view changes go to the log.
struct LogMap;

impl MapView for LogMap {
    fn add_marker(&mut self, coordinates: Coordinates, popup_content: &str, style_class: &str) {
        tracing::debug!(
            lat = coordinates.lat,
            lng = coordinates.lng,
            style_class,
            "marker: {popup_content}"
        );
    }

    fn recenter(&mut self, coordinates: Coordinates, zoom: u8) {
        tracing::debug!(lat = coordinates.lat, lng = coordinates.lng, zoom, "recenter");
    }
}

/// Initialize logging. Default level is INFO; `-v`/`-q` shift it and
/// `RUST_LOG` overrides everything.
fn init_logging(verbose: u8, quiet: u8) {
    let net = verbose as i8 - quiet as i8;
    let level = match net {
        i8::MIN..=-2 => "error",
        -1 => "warn",
        0 => "info",
        1 => "debug",
        2..=i8::MAX => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,waylog={level}")));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn format_row(workout: &Workout) -> String {
    let head = format!(
        "{}: {} km in {} min",
        workout.description(),
        workout.distance_km(),
        workout.duration_min()
    );
    match *workout.details() {
        WorkoutDetails::Running {
            cadence_spm,
            pace_min_per_km,
        } => format!("{head}, {pace_min_per_km:.1} min/km, {cadence_spm} spm"),
        WorkoutDetails::Cycling {
            elevation_gain_m,
            speed_km_per_h,
        } => format!("{head}, {speed_km_per_h:.1} km/h, {elevation_gain_m} m gained"),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let root = cli
        .data_dir
        .or_else(AppDirs::data_dir)
        .unwrap_or_else(|| PathBuf::from("."));
    let log = WorkoutLog::new(FileBlobStore::with_root(root));

    let mut app = App::new(LogMap, log);
    app.hydrate();

    match cli.cmd {
        Cmd::Add {
            kind,
            lat,
            lng,
            distance,
            duration,
            extra,
        } => {
            app.on_map_click(Coordinates::new(lat, lng));
            let record = app.submit(&FormInput::new(kind.into(), &distance, &duration, &extra))?;
            println!("{}", format_row(&record));
        }
        Cmd::List => {
            if app.workouts().is_empty() {
                println!("no workouts yet");
            }
            for (i, workout) in app.workouts().iter().enumerate() {
                println!("{}\t{}", i + 1, format_row(workout));
            }
        }
        Cmd::Reset => {
            app.reset()?;
            println!("workout log cleared");
        }
    }

    Ok(())
}
