//! Baseline driving route via `direction/driving`.
//!
//! The route is a visual/contextual overlay for downstream collaborators, not
//! an input to obstacle resolution.

use geo_types::Coord;
use serde_json::Value;
use tracing::debug;

use super::AmapClient;
use crate::error::ProviderError;
use crate::geometry::polyline::parse_polyline;

/// A driving route: the first returned path flattened into one ordered point
/// sequence, plus the provider payload for callers that want leg metadata.
///
/// `points` is never empty: a route whose steps carry no parsable polyline is
/// reported as not-found rather than as an empty route.
#[derive(Debug, Clone)]
pub struct DrivingRoute {
    pub points: Vec<Coord<f64>>,
    pub raw: Value,
}

/// Concatenate the per-step polyline fragments of the first path.
fn collect_route_points(route: &Value) -> Vec<Coord<f64>> {
    let steps = route
        .pointer("/paths/0/steps")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    steps
        .iter()
        .filter_map(|step| step.get("polyline").and_then(Value::as_str))
        .flat_map(parse_polyline)
        .collect()
}

impl AmapClient {
    /// Fetch a driving route between two points, or `None` when the provider
    /// has no route for the pair.
    pub async fn driving_route(
        &self,
        origin: Coord<f64>,
        destination: Coord<f64>,
    ) -> Result<Option<DrivingRoute>, ProviderError> {
        let body = self
            .get_json(
                "direction/driving",
                &[
                    ("origin", format!("{},{}", origin.x, origin.y)),
                    ("destination", format!("{},{}", destination.x, destination.y)),
                ],
            )
            .await?;

        if body.get("status").and_then(Value::as_str) != Some("1") {
            let info = body.get("info").and_then(Value::as_str);
            debug!("no driving route (status {:?})", info);
            return Ok(None);
        }

        let Some(route) = body.get("route") else {
            return Ok(None);
        };

        let points = collect_route_points(route);
        if points.is_empty() {
            return Ok(None);
        }

        Ok(Some(DrivingRoute {
            points,
            raw: body,
        }))
    }
}
