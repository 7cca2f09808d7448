//! Batch planning pipeline.
//!
//! Geocodes an origin/destination pair, resolves the requested avoid areas
//! into no-fly polygons, fetches the baseline driving route, and writes the
//! KML/GPX/mission artifacts. Route skirting and altitude refinement happen
//! in the external planner; this binary exports the reference route.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use skyfence::amap::AmapClient;
use skyfence::config::AmapConfig;
use skyfence::export::{export_gpx, export_kml, export_mission};
use skyfence::models::{Waypoint, ZoneSet};
use skyfence::resolver::{ForbiddenZoneResolver, GeocodeSource};

#[derive(Parser, Debug)]
#[command(name = "plan")]
#[command(about = "Plan a drone route request and write export artifacts")]
struct Args {
    /// Origin address or place name
    #[arg(long)]
    origin: String,

    /// Destination address or place name
    #[arg(long)]
    destination: String,

    /// Place name to avoid; repeatable
    #[arg(long)]
    avoid: Vec<String>,

    /// Buffer radius in meters for avoid areas without a boundary
    #[arg(long, default_value = "500")]
    buffer: f64,

    /// Flight altitude in meters attached to exported waypoints
    #[arg(long, default_value = "120")]
    altitude: f64,

    /// Config file with the AMap key; falls back to AMAP_API_KEY
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for the exported artifacts
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => AmapConfig::load_from_file(path)?,
        None => AmapConfig::from_env()?,
    };

    info!("Skyfence Planning Pipeline");
    let client = AmapClient::new(&config)?;

    let origin = client
        .geocode(&args.origin)
        .await
        .context("Origin geocoding failed")?
        .with_context(|| format!("Could not geocode origin {:?}", args.origin))?;
    let destination = client
        .geocode(&args.destination)
        .await
        .context("Destination geocoding failed")?
        .with_context(|| format!("Could not geocode destination {:?}", args.destination))?;
    info!(
        "Origin at ({}, {}), destination at ({}, {})",
        origin.x, origin.y, destination.x, destination.y
    );

    // Resolve avoid areas into obstacle polygons
    let resolver = ForbiddenZoneResolver::new(client.clone(), client.clone(), client.clone());
    let mut obstacles = ZoneSet::new();
    for name in &args.avoid {
        let zones = resolver.resolve(name, args.buffer).await;
        if zones.is_empty() {
            warn!("No polygons resolved for avoid area {:?}", name);
        } else {
            info!("Added {} polygons for avoid area {:?}", zones.len(), name);
            obstacles.extend(zones);
        }
    }

    let route = client
        .driving_route(origin, destination)
        .await
        .context("Route lookup failed")?
        .context("No driving route between origin and destination")?;
    info!("Reference route has {} points", route.points.len());

    let waypoints: Vec<Waypoint> = route
        .points
        .iter()
        .map(|p| Waypoint::with_altitude(p.x, p.y, args.altitude))
        .collect();

    std::fs::create_dir_all(&args.output_dir).context("Failed to create output directory")?;
    let kml_path = args.output_dir.join("route.kml");
    let gpx_path = args.output_dir.join("route.gpx");
    let mission_path = args.output_dir.join("route.csv");

    export_kml(&waypoints, &obstacles, &kml_path)?;
    export_gpx(&waypoints, &gpx_path)?;
    export_mission(&waypoints, &mission_path)?;

    info!(
        "Wrote {} waypoints and {} no-fly polygons to {}, {} and {}",
        waypoints.len(),
        obstacles.len(),
        kml_path.display(),
        gpx_path.display(),
        mission_path.display()
    );

    Ok(())
}
