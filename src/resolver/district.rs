//! Recursive administrative boundary resolution.

use futures::future::BoxFuture;
use tracing::{debug, warn};

use super::DistrictSource;
use crate::geometry::polyline::parse_rings;
use crate::models::ZoneSet;

/// Hard cap on recursive descent, regardless of how deep the provider claims
/// its district tree goes. Guards against cyclic or absurdly deep trees.
const MAX_RECURSION_DEPTH: usize = 4;

/// Sub-district expansion requested when descending into children.
const CHILD_SUBDISTRICT: u8 = 1;

/// Resolves an administrative-area name to its boundary polygons,
/// descending into sub-areas when the top-level area has no usable boundary.
pub struct DistrictResolver<S> {
    source: S,
}

impl<S: DistrictSource + Sync> DistrictResolver<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Resolve `name` to zero or more boundary polygons.
    ///
    /// Transient lookup failures are retried up to `retries` times; a miss is
    /// final immediately. Never errors: an exhausted budget or a boundary-less
    /// tree both come back as an empty set, which callers read as "not this
    /// source".
    pub async fn resolve(&self, name: &str, subdistrict: u8, retries: u32) -> ZoneSet {
        self.resolve_at_depth(name, subdistrict, retries, MAX_RECURSION_DEPTH)
            .await
    }

    fn resolve_at_depth<'a>(
        &'a self,
        name: &'a str,
        subdistrict: u8,
        retries: u32,
        depth_left: usize,
    ) -> BoxFuture<'a, ZoneSet> {
        Box::pin(async move {
            if depth_left == 0 {
                warn!("district recursion cap hit at {name:?}");
                return Vec::new();
            }

            let retries = retries.max(1);
            for attempt in 1..=retries {
                let district = match self.source.fetch_district(name, subdistrict).await {
                    Ok(Some(district)) => district,
                    Ok(None) => {
                        debug!("no district match for {name:?}");
                        return Vec::new();
                    }
                    Err(err) => {
                        warn!(
                            "district lookup for {name:?} failed \
                             (attempt {attempt}/{retries}): {err}"
                        );
                        continue;
                    }
                };

                // A directly usable boundary short-circuits the descent.
                if let Some(payload) = district.boundary_payload() {
                    let rings = parse_rings(payload);
                    if !rings.is_empty() {
                        debug!("{name:?} resolved to {} boundary rings", rings.len());
                        return rings;
                    }
                }

                if district.children.is_empty() {
                    return Vec::new();
                }

                debug!(
                    "{name:?} has no boundary, descending into {} sub-districts",
                    district.children.len()
                );
                let mut collected = Vec::new();
                for child in &district.children {
                    if child.name.is_empty() {
                        continue;
                    }
                    // Child failures are skipped, not propagated: one branch
                    // going dark must not lose the siblings' boundaries.
                    let rings = self
                        .resolve_at_depth(&child.name, CHILD_SUBDISTRICT, 1, depth_left - 1)
                        .await;
                    collected.extend(rings);
                }
                return collected;
            }

            Vec::new()
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::error::ProviderError;
    use crate::models::District;

    struct StubDistricts {
        responses: HashMap<String, District>,
        calls: AtomicUsize,
    }

    impl StubDistricts {
        fn new(districts: Vec<(&str, District)>) -> Self {
            Self {
                responses: districts
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), v))
                    .collect(),
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl DistrictSource for StubDistricts {
        async fn fetch_district(
            &self,
            keywords: &str,
            _subdistrict: u8,
        ) -> Result<Option<District>, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.responses.get(keywords).cloned())
        }
    }

    struct FailingDistricts {
        calls: AtomicUsize,
    }

    impl DistrictSource for FailingDistricts {
        async fn fetch_district(
            &self,
            _keywords: &str,
            _subdistrict: u8,
        ) -> Result<Option<District>, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(ProviderError::Malformed("stub outage".to_string()))
        }
    }

    fn leaf(name: &str, boundary: &str) -> District {
        District {
            name: name.to_string(),
            polyline: Some(boundary.to_string()),
            ..District::default()
        }
    }

    fn parent(name: &str, children: Vec<District>) -> District {
        District {
            name: name.to_string(),
            children,
            ..District::default()
        }
    }

    #[tokio::test]
    async fn test_direct_boundary_short_circuits() {
        let stub = StubDistricts::new(vec![(
            "metro",
            leaf("metro", "0,0;1,0;1,1;0,1|2,2;3,2;3,3"),
        )]);
        let resolver = DistrictResolver::new(&stub);

        let zones = resolver.resolve("metro", 3, 2).await;
        assert_eq!(zones.len(), 2);
        assert_eq!(stub.call_count(), 1);
    }

    #[tokio::test]
    async fn test_children_aggregated_when_parent_has_no_boundary() {
        let stub = StubDistricts::new(vec![
            (
                "metro",
                parent(
                    "metro",
                    vec![parent("north", vec![]), parent("south", vec![])],
                ),
            ),
            ("north", leaf("north", "0,0;1,0;1,1")),
            ("south", leaf("south", "5,5;6,5;6,6")),
        ]);
        let resolver = DistrictResolver::new(&stub);

        let zones = resolver.resolve("metro", 3, 2).await;
        assert_eq!(zones.len(), 2);
        // Parent plus one call per child.
        assert_eq!(stub.call_count(), 3);
    }

    #[tokio::test]
    async fn test_failed_child_skipped() {
        let stub = StubDistricts::new(vec![
            (
                "metro",
                parent(
                    "metro",
                    vec![parent("missing", vec![]), parent("south", vec![])],
                ),
            ),
            ("south", leaf("south", "5,5;6,5;6,6")),
        ]);
        let resolver = DistrictResolver::new(&stub);

        let zones = resolver.resolve("metro", 3, 2).await;
        assert_eq!(zones.len(), 1);
    }

    #[tokio::test]
    async fn test_retry_budget_exhausted_yields_empty() {
        let stub = FailingDistricts {
            calls: AtomicUsize::new(0),
        };
        let resolver = DistrictResolver::new(&stub);

        let zones = resolver.resolve("anywhere", 3, 2).await;
        assert!(zones.is_empty());
        assert_eq!(stub.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_cyclic_tree_terminates() {
        // A district listing itself as its only child must hit the depth cap.
        let stub = StubDistricts::new(vec![("loop", parent("loop", vec![parent("loop", vec![])]))]);
        let resolver = DistrictResolver::new(&stub);

        let zones = resolver.resolve("loop", 3, 2).await;
        assert!(zones.is_empty());
        assert_eq!(stub.call_count(), MAX_RECURSION_DEPTH);
    }

    #[tokio::test]
    async fn test_degenerate_boundary_falls_through_to_children() {
        let mut broken = parent("metro", vec![parent("south", vec![])]);
        broken.polyline = Some("0,0;1,1".to_string());
        let stub = StubDistricts::new(vec![
            ("metro", broken),
            ("south", leaf("south", "5,5;6,5;6,6")),
        ]);
        let resolver = DistrictResolver::new(&stub);

        let zones = resolver.resolve("metro", 3, 2).await;
        assert_eq!(zones.len(), 1);
    }
}
