//! Core data models for zone resolution and export.

mod de;
pub mod district;
pub mod poi;
pub mod zone;

pub(crate) use de::lenient_string;
pub use district::District;
pub use poi::Poi;
pub use zone::{Waypoint, Zone, ZoneSet};
