//! Skyfence - no-fly zone resolution for drone route planning.
//!
//! Resolves human-readable place names into obstacle polygons by cascading
//! through AMap geodata sources (administrative boundaries, place search,
//! geocoding) and synthesizing buffer polygons where no authoritative
//! boundary exists. This library provides shared types and modules for the
//! serve and plan binaries.

pub mod amap;
pub mod config;
pub mod error;
pub mod export;
pub mod geometry;
pub mod models;
pub mod resolver;

pub use config::AmapConfig;
pub use error::ProviderError;
pub use models::{District, Poi, Waypoint, Zone, ZoneSet};
pub use resolver::{DistrictResolver, ForbiddenZoneResolver};
