//! Injected upstream capabilities.
//!
//! Every method reports a three-way outcome: `Ok(Some(_))`/non-empty list for
//! a hit, `Ok(None)`/empty list when the source has no matching data, and
//! `Err(ProviderError)` for transient failures (network, timeout, malformed
//! body). Callers never treat not-found as an error.

use std::future::Future;

use geo_types::Coord;
use serde_json::Value;

use crate::error::ProviderError;
use crate::models::{District, Poi};

/// Administrative district lookup with sub-district expansion.
pub trait DistrictSource {
    /// Fetch the top district matching `keywords`, with children expanded up
    /// to `subdistrict` levels and full boundary detail requested.
    fn fetch_district(
        &self,
        keywords: &str,
        subdistrict: u8,
    ) -> impl Future<Output = Result<Option<District>, ProviderError>> + Send;
}

/// Keyword place search with a detail lookup for richer shape data.
pub trait PlaceSource {
    /// Ranked POI search, at most `limit` results.
    fn search_places(
        &self,
        keywords: &str,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<Poi>, ProviderError>> + Send;

    /// Detail record for one POI id, as a raw document to probe for boundary
    /// fields.
    fn place_detail(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<Value>, ProviderError>> + Send;
}

/// Free-text address to a single point.
pub trait GeocodeSource {
    fn geocode(
        &self,
        address: &str,
    ) -> impl Future<Output = Result<Option<Coord<f64>>, ProviderError>> + Send;
}

impl<T: DistrictSource> DistrictSource for &T {
    fn fetch_district(
        &self,
        keywords: &str,
        subdistrict: u8,
    ) -> impl Future<Output = Result<Option<District>, ProviderError>> + Send {
        (**self).fetch_district(keywords, subdistrict)
    }
}

impl<T: PlaceSource> PlaceSource for &T {
    fn search_places(
        &self,
        keywords: &str,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<Poi>, ProviderError>> + Send {
        (**self).search_places(keywords, limit)
    }

    fn place_detail(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<Value>, ProviderError>> + Send {
        (**self).place_detail(id)
    }
}

impl<T: GeocodeSource> GeocodeSource for &T {
    fn geocode(
        &self,
        address: &str,
    ) -> impl Future<Output = Result<Option<Coord<f64>>, ProviderError>> + Send {
        (**self).geocode(address)
    }
}
