//! Strict-priority forbidden-zone orchestration.

use serde_json::Value;
use tracing::{debug, info, warn};

use super::{DistrictResolver, DistrictSource, GeocodeSource, PlaceSource};
use crate::geometry::buffer::{circle_buffer, DEFAULT_CIRCLE_SEGMENTS};
use crate::geometry::polyline::parse_ring;
use crate::models::{Poi, Zone, ZoneSet};

/// Sub-district expansion requested for the top-level district lookup.
const DISTRICT_SUBDISTRICT: u8 = 3;

/// Retry budget for the top-level district lookup.
const DISTRICT_RETRIES: u32 = 2;

/// Result cap for the place search.
const SEARCH_LIMIT: u32 = 10;

/// Boundary fields probed on a place-detail document, directly and inside
/// the `biz_ext` extension object.
const BOUNDARY_FIELDS: [&str; 4] = ["polyline", "boundary", "shape", "polygon"];

fn non_empty(v: &Value) -> Option<&str> {
    v.as_str().filter(|s| !s.is_empty())
}

fn probe_boundary_fields(detail: &Value) -> Option<&str> {
    for field in BOUNDARY_FIELDS {
        let payload = detail
            .get(field)
            .and_then(non_empty)
            .or_else(|| {
                detail
                    .get("biz_ext")
                    .and_then(|ext| ext.get(field))
                    .and_then(non_empty)
            });
        if payload.is_some() {
            return payload;
        }
    }
    None
}

/// Resolves a place name to its no-fly polygons by cascading through the
/// upstream sources in strict priority order:
///
/// 1. authoritative administrative boundary (recursive district resolution),
/// 2. place-search POI boundary payloads, enriched by a detail lookup,
/// 3. a circular buffer around the first usable POI location,
/// 4. a circular buffer around the geocoded point.
///
/// The first strategy producing at least one polygon wins. Every attempt is
/// traced for diagnostics but nothing beyond non-emptiness steers control
/// flow, and no failure escapes: a fully failed resolution is an empty set.
pub struct ForbiddenZoneResolver<D, P, G> {
    districts: DistrictResolver<D>,
    places: P,
    geocoder: G,
}

impl<D, P, G> ForbiddenZoneResolver<D, P, G>
where
    D: DistrictSource + Sync,
    P: PlaceSource + Sync,
    G: GeocodeSource + Sync,
{
    pub fn new(district_source: D, places: P, geocoder: G) -> Self {
        Self {
            districts: DistrictResolver::new(district_source),
            places,
            geocoder,
        }
    }

    /// Resolve `name` into obstacle polygons, falling back to a circle of
    /// `default_buffer_m` meters when only a point can be established.
    pub async fn resolve(&self, name: &str, default_buffer_m: f64) -> ZoneSet {
        info!("resolving forbidden zone for {name:?} (default buffer {default_buffer_m} m)");

        let zones = self
            .districts
            .resolve(name, DISTRICT_SUBDISTRICT, DISTRICT_RETRIES)
            .await;
        if !zones.is_empty() {
            info!("{name:?}: {} polygons via district boundary", zones.len());
            return zones;
        }

        let pois = match self.places.search_places(name, SEARCH_LIMIT).await {
            Ok(pois) => pois,
            Err(err) => {
                warn!("place search for {name:?} failed: {err}");
                Vec::new()
            }
        };
        debug!("place search returned {} POIs for {name:?}", pois.len());

        for (idx, poi) in pois.iter().enumerate() {
            if let Some(zone) = self.poi_boundary(idx, poi).await {
                return vec![zone];
            }
        }

        if let Some(center) = pois.iter().find_map(Poi::location_point) {
            info!(
                "{name:?}: buffering POI location at ({}, {})",
                center.x, center.y
            );
            return vec![circle_buffer(
                center,
                default_buffer_m,
                DEFAULT_CIRCLE_SEGMENTS,
            )];
        }

        match self.geocoder.geocode(name).await {
            Ok(Some(center)) => {
                info!(
                    "{name:?}: buffering geocoded point at ({}, {})",
                    center.x, center.y
                );
                return vec![circle_buffer(
                    center,
                    default_buffer_m,
                    DEFAULT_CIRCLE_SEGMENTS,
                )];
            }
            Ok(None) => debug!("geocode found nothing for {name:?}"),
            Err(err) => warn!("geocode for {name:?} failed: {err}"),
        }

        info!("failed to resolve {name:?}");
        Vec::new()
    }

    /// Boundary for one POI: the search result's own payload first, then the
    /// richer detail document when the POI has an id.
    async fn poi_boundary(&self, idx: usize, poi: &Poi) -> Option<Zone> {
        if let Some(payload) = poi.boundary_payload() {
            if let Some(zone) = parse_ring(payload) {
                info!("using POI #{idx} search-result boundary");
                return Some(zone);
            }
        }

        let id = poi.id.as_deref()?;
        let detail = match self.places.place_detail(id).await {
            Ok(Some(detail)) => detail,
            Ok(None) => return None,
            Err(err) => {
                warn!("place detail for {id:?} failed: {err}");
                return None;
            }
        };

        let zone = probe_boundary_fields(&detail).and_then(parse_ring)?;
        info!("using place-detail boundary for POI {id:?}");
        Some(zone)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use geo_types::Coord;
    use serde_json::json;

    use super::*;
    use crate::error::ProviderError;
    use crate::models::District;

    const RING: &str = "116.0,39.9;116.1,39.9;116.1,40.0;116.0,40.0";

    #[derive(Default)]
    struct StubDistricts {
        district: Option<District>,
        calls: AtomicUsize,
    }

    impl DistrictSource for StubDistricts {
        async fn fetch_district(
            &self,
            _keywords: &str,
            _subdistrict: u8,
        ) -> Result<Option<District>, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.district.clone())
        }
    }

    #[derive(Default)]
    struct StubPlaces {
        pois: Vec<Poi>,
        details: HashMap<String, Value>,
        search_calls: AtomicUsize,
        detail_calls: AtomicUsize,
    }

    impl PlaceSource for StubPlaces {
        async fn search_places(
            &self,
            _keywords: &str,
            _limit: u32,
        ) -> Result<Vec<Poi>, ProviderError> {
            self.search_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.pois.clone())
        }

        async fn place_detail(&self, id: &str) -> Result<Option<Value>, ProviderError> {
            self.detail_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.details.get(id).cloned())
        }
    }

    #[derive(Default)]
    struct StubGeocoder {
        point: Option<Coord<f64>>,
        calls: AtomicUsize,
    }

    impl GeocodeSource for StubGeocoder {
        async fn geocode(&self, _address: &str) -> Result<Option<Coord<f64>>, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.point)
        }
    }

    fn poi(id: Option<&str>, location: Option<&str>, polyline: Option<&str>) -> Poi {
        Poi {
            id: id.map(String::from),
            location: location.map(String::from),
            polyline: polyline.map(String::from),
            ..Poi::default()
        }
    }

    #[tokio::test]
    async fn test_district_boundary_wins_without_place_search() {
        let districts = StubDistricts {
            district: Some(District {
                name: "airport district".to_string(),
                polyline: Some(RING.to_string()),
                ..District::default()
            }),
            ..StubDistricts::default()
        };
        let places = StubPlaces::default();
        let geocoder = StubGeocoder::default();
        let resolver = ForbiddenZoneResolver::new(&districts, &places, &geocoder);

        let zones = resolver.resolve("airport district", 500.0).await;
        assert_eq!(zones.len(), 1);
        assert_eq!(places.search_calls.load(Ordering::SeqCst), 0);
        assert_eq!(geocoder.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_poi_boundary_beats_geocode() {
        let districts = StubDistricts::default();
        let places = StubPlaces {
            pois: vec![poi(Some("B1"), Some("116.05,39.95"), Some(RING))],
            ..StubPlaces::default()
        };
        let geocoder = StubGeocoder {
            point: Some(Coord { x: 1.0, y: 1.0 }),
            ..StubGeocoder::default()
        };
        let resolver = ForbiddenZoneResolver::new(&districts, &places, &geocoder);

        let zones = resolver.resolve("river", 500.0).await;
        assert_eq!(zones.len(), 1);
        // Parsed ring, closed: 4 payload points + closing vertex.
        assert_eq!(zones[0].exterior().0.len(), 5);
        assert_eq!(geocoder.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_detail_probe_finds_nested_shape() {
        let districts = StubDistricts::default();
        let mut details = HashMap::new();
        details.insert(
            "B7".to_string(),
            json!({"name": "harbor", "biz_ext": {"shape": RING}}),
        );
        let places = StubPlaces {
            pois: vec![poi(Some("B7"), None, None)],
            details,
            ..StubPlaces::default()
        };
        let geocoder = StubGeocoder::default();
        let resolver = ForbiddenZoneResolver::new(&districts, &places, &geocoder);

        let zones = resolver.resolve("harbor", 500.0).await;
        assert_eq!(zones.len(), 1);
        assert_eq!(places.detail_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_location_buffer_when_no_boundary_anywhere() {
        let districts = StubDistricts::default();
        let places = StubPlaces {
            pois: vec![
                poi(None, Some("not a point"), None),
                poi(None, Some("112.5,37.8"), None),
            ],
            ..StubPlaces::default()
        };
        let geocoder = StubGeocoder::default();
        let resolver = ForbiddenZoneResolver::new(&districts, &places, &geocoder);

        let zones = resolver.resolve("campus", 300.0).await;
        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].exterior().0.len(), 25);
        assert_eq!(geocoder.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_geocode_fallback_produces_closed_circle() {
        let districts = StubDistricts::default();
        let places = StubPlaces::default();
        let geocoder = StubGeocoder {
            point: Some(Coord { x: 116.0, y: 40.0 }),
            ..StubGeocoder::default()
        };
        let resolver = ForbiddenZoneResolver::new(&districts, &places, &geocoder);

        let zones = resolver.resolve("somewhere", 500.0).await;
        assert_eq!(zones.len(), 1);

        let exterior = &zones[0].exterior().0;
        assert_eq!(exterior.len(), 25);
        assert_eq!(exterior.first(), exterior.last());
        for vertex in exterior {
            assert!((vertex.x - 116.0).abs() < 0.01);
            assert!((vertex.y - 40.0).abs() < 0.01);
        }
    }

    #[tokio::test]
    async fn test_every_source_empty_yields_empty_set() {
        let districts = StubDistricts::default();
        let places = StubPlaces::default();
        let geocoder = StubGeocoder::default();
        let resolver = ForbiddenZoneResolver::new(&districts, &places, &geocoder);

        let zones = resolver.resolve("nowhere", 500.0).await;
        assert!(zones.is_empty());
        assert_eq!(geocoder.calls.load(Ordering::SeqCst), 1);
    }
}
