use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use wayfinder_lib::{
    render_route_text, Campus, DeepLink, Error as LibError, MapView, RouteSession, SessionState,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Campus wayfinding utilities")]
struct Cli {
    /// Override the bundled campus dataset with a JSON file.
    #[arg(long)]
    data: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every location on the campus.
    Locations,
    /// List the wards registered for a building.
    Wards {
        /// Building name.
        #[arg(long)]
        building: String,
    },
    /// Resolve a route between two locations and print directions.
    Route {
        /// Starting location name.
        #[arg(long = "from")]
        from: String,
        /// Destination location name.
        #[arg(long = "to")]
        to: String,
        /// Ward inside the destination building.
        #[arg(long)]
        ward: Option<String>,
    },
    /// Emit the map overlay consumed by the rendering surface, as JSON.
    Map {
        /// Highlight a route starting here.
        #[arg(long)]
        from: Option<String>,
        /// Highlight a route ending here.
        #[arg(long)]
        to: Option<String>,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let campus = load_campus(cli.data.as_deref())?;

    match cli.command {
        Command::Locations => handle_locations(&campus, cli.format),
        Command::Wards { building } => handle_wards(&campus, cli.format, &building),
        Command::Route { from, to, ward } => {
            handle_route(&campus, cli.format, &from, &to, ward.as_deref())
        }
        Command::Map { from, to } => handle_map(&campus, from.as_deref(), to.as_deref()),
    }
}

fn load_campus(data: Option<&Path>) -> Result<Campus> {
    match data {
        Some(path) => Campus::from_path(path)
            .with_context(|| format!("failed to load campus dataset from {}", path.display())),
        None => Campus::bundled().context("failed to load the bundled campus dataset"),
    }
}

/// Fail with suggestions when a name is not a known location.
fn require_location(campus: &Campus, name: &str) -> Result<()> {
    if campus.graph.contains(name) {
        return Ok(());
    }
    Err(LibError::UnknownLocation {
        name: name.to_string(),
        suggestions: campus.graph.fuzzy_location_matches(name, 3),
    }
    .into())
}

fn handle_locations(campus: &Campus, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(campus.graph.location_names())?
        ),
        OutputFormat::Text => {
            for name in campus.graph.location_names() {
                println!("- {name}");
            }
        }
    }
    Ok(())
}

fn handle_wards(campus: &Campus, format: OutputFormat, building: &str) -> Result<()> {
    require_location(campus, building)?;
    let wards = campus.catalog.wards_for(building);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&wards)?),
        OutputFormat::Text => {
            if wards.is_empty() {
                println!("No indoor directions available for {building}.");
            } else {
                println!("Wards in {building}:");
                for ward in wards {
                    println!("- {ward}");
                }
            }
        }
    }
    Ok(())
}

fn handle_route(
    campus: &Campus,
    format: OutputFormat,
    from: &str,
    to: &str,
    ward: Option<&str>,
) -> Result<()> {
    require_location(campus, from)?;
    require_location(campus, to)?;

    let link = DeepLink {
        start: Some(from.to_string()),
        destination: Some(to.to_string()),
        ward: ward.map(str::to_string),
    };
    let session = RouteSession::seeded(campus, &link);
    let view = session.derive();

    if view.state == SessionState::RouteUnavailable {
        return Err(LibError::RouteNotFound {
            start: from.to_string(),
            goal: to.to_string(),
        }
        .into());
    }

    if let Some(requested) = ward {
        let selected = view
            .route
            .as_ref()
            .and_then(|route| route.ward.as_ref())
            .is_some();
        if !selected {
            eprintln!("Ward '{requested}' is not registered for {to}; showing the exterior route only.");
        }
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&view)?),
        OutputFormat::Text => print!("{}", render_route_text(&view)),
    }
    Ok(())
}

fn handle_map(campus: &Campus, from: Option<&str>, to: Option<&str>) -> Result<()> {
    let view = match (from, to) {
        (Some(from), Some(to)) => {
            require_location(campus, from)?;
            require_location(campus, to)?;
            let link = DeepLink {
                start: Some(from.to_string()),
                destination: Some(to.to_string()),
                ward: None,
            };
            Some(RouteSession::seeded(campus, &link).derive())
        }
        _ => None,
    };

    let map = MapView::new(campus, view.as_ref());
    println!("{}", serde_json::to_string_pretty(&map)?);
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
