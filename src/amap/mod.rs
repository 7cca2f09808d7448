//! AMap (Gaode) REST adapters.
//!
//! One thin client per upstream concern: geocoding, administrative district
//! lookup, place search/detail, and driving-route reference. All calls are
//! sequential awaited requests with the fixed per-call timeout from
//! [`crate::config::AmapConfig`]; none of them retries on its own.

mod client;
mod district;
mod geocode;
mod place;
mod route;

pub use client::AmapClient;
pub use route::DrivingRoute;
