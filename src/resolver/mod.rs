//! Forbidden-zone resolution.
//!
//! The resolvers only see the upstream endpoints through the capability
//! traits in [`sources`], so tests drive them with deterministic stubs and
//! the binaries plug in [`crate::amap::AmapClient`].

pub mod district;
pub mod forbidden;
mod sources;

pub use district::DistrictResolver;
pub use forbidden::ForbiddenZoneResolver;
pub use sources::{DistrictSource, GeocodeSource, PlaceSource};
