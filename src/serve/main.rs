//! Zone resolution query server.
//!
//! Provides an HTTP API over the resolver core: forbidden-zone lookup by
//! name, forward geocoding, and the baseline driving route used as a visual
//! overlay by map front ends.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use skyfence::amap::AmapClient;
use skyfence::config::AmapConfig;
use skyfence::geometry::parse_point;
use skyfence::models::Zone;
use skyfence::resolver::{ForbiddenZoneResolver, GeocodeSource};

#[derive(Parser, Debug)]
#[command(name = "serve")]
#[command(about = "No-fly zone resolution server")]
struct Args {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:3000")]
    listen: String,

    /// Config file with the AMap key; falls back to AMAP_API_KEY
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Application state shared across handlers
struct AppState {
    client: AmapClient,
    resolver: ForbiddenZoneResolver<AmapClient, AmapClient, AmapClient>,
    default_buffer_m: f64,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => AmapConfig::load_from_file(path)?,
        None => AmapConfig::from_env()?,
    };

    info!("Skyfence Zone Server");
    let client = AmapClient::new(&config)?;
    let resolver = ForbiddenZoneResolver::new(client.clone(), client.clone(), client.clone());

    let state = Arc::new(AppState {
        client,
        resolver,
        default_buffer_m: config.default_buffer_meters,
    });

    // Build router
    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/v1/zones", get(zones_handler))
        .route("/v1/geocode", get(geocode_handler))
        .route("/v1/route", get(route_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    info!("Starting server on {}", args.listen);

    let listener = tokio::net::TcpListener::bind(&args.listen).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check endpoint
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Deserialize)]
struct ZonesParams {
    name: String,
    /// Buffer radius in meters for point-only fallbacks
    buffer: Option<f64>,
}

#[derive(Serialize)]
struct ZonesResponse {
    name: String,
    features: Vec<ZoneFeature>,
}

#[derive(Serialize)]
struct ZoneFeature {
    #[serde(rename = "type")]
    feature_type: &'static str,
    geometry: PolygonGeometry,
    properties: ZoneProperties,
}

#[derive(Serialize)]
struct PolygonGeometry {
    #[serde(rename = "type")]
    geo_type: &'static str,
    coordinates: Vec<Vec<[f64; 2]>>,
}

#[derive(Serialize)]
struct ZoneProperties {
    name: String,
    index: usize,
}

fn zone_feature(name: &str, index: usize, zone: &Zone) -> ZoneFeature {
    let ring = zone.exterior().0.iter().map(|p| [p.x, p.y]).collect();
    ZoneFeature {
        feature_type: "Feature",
        geometry: PolygonGeometry {
            geo_type: "Polygon",
            coordinates: vec![ring],
        },
        properties: ZoneProperties {
            name: name.to_string(),
            index,
        },
    }
}

/// Resolve a place name into no-fly polygons
async fn zones_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ZonesParams>,
) -> Json<ZonesResponse> {
    let buffer = params.buffer.unwrap_or(state.default_buffer_m);
    let zones = state.resolver.resolve(&params.name, buffer).await;

    let features = zones
        .iter()
        .enumerate()
        .map(|(i, zone)| zone_feature(&params.name, i, zone))
        .collect();

    Json(ZonesResponse {
        name: params.name,
        features,
    })
}

#[derive(Deserialize)]
struct GeocodeParams {
    address: String,
}

#[derive(Serialize)]
struct GeocodeResponse {
    address: String,
    lon: f64,
    lat: f64,
}

/// Forward geocoding
async fn geocode_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<GeocodeParams>,
) -> Result<Json<GeocodeResponse>, (StatusCode, String)> {
    let point = state.client.geocode(&params.address).await.map_err(|e| {
        tracing::error!("Geocode failed: {}", e);
        (StatusCode::BAD_GATEWAY, e.to_string())
    })?;

    match point {
        Some(point) => Ok(Json(GeocodeResponse {
            address: params.address,
            lon: point.x,
            lat: point.y,
        })),
        None => Err((StatusCode::NOT_FOUND, "address not found".to_string())),
    }
}

#[derive(Deserialize)]
struct RouteParams {
    /// Origin as `lon,lat`
    origin: String,
    /// Destination as `lon,lat`
    destination: String,
}

#[derive(Serialize)]
struct RouteResponse {
    points: Vec<[f64; 2]>,
}

/// Baseline driving route between two points
async fn route_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RouteParams>,
) -> Result<Json<RouteResponse>, (StatusCode, String)> {
    let origin = parse_point(&params.origin)
        .ok_or_else(|| (StatusCode::BAD_REQUEST, "invalid origin".to_string()))?;
    let destination = parse_point(&params.destination)
        .ok_or_else(|| (StatusCode::BAD_REQUEST, "invalid destination".to_string()))?;

    let route = state
        .client
        .driving_route(origin, destination)
        .await
        .map_err(|e| {
            tracing::error!("Route lookup failed: {}", e);
            (StatusCode::BAD_GATEWAY, e.to_string())
        })?;

    match route {
        Some(route) => Ok(Json(RouteResponse {
            points: route.points.iter().map(|p| [p.x, p.y]).collect(),
        })),
        None => Err((StatusCode::NOT_FOUND, "no route found".to_string())),
    }
}
