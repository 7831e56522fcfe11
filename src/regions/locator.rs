//! Nearest-region lookup over the candidate catalog.
//!
//! The R-tree narrows the search by squared degree distance; a haversine
//! pass then orders the survivors by true ground distance. Used to label
//! arbitrary coordinates with the closest known region name when reverse
//! geocoding has nothing to offer.

use crate::regions::catalog::Region;
use crate::types::place::LatLon;
use haversine::{distance, Location as HaversineLocation, Units};
use ordered_float::OrderedFloat;
use rstar::RTree;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Debug, Clone)]
pub struct RegionLocator {
    rtree: RTree<Region>,
}

// Helper struct for BinaryHeap ordering
struct RegionCandidate<'a> {
    distance_km: OrderedFloat<f64>,
    region: &'a Region,
}
// Manual implementations (only compare distance)
impl PartialEq for RegionCandidate<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.distance_km == other.distance_km
    }
}
impl Eq for RegionCandidate<'_> {}
impl PartialOrd for RegionCandidate<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for RegionCandidate<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance_km.cmp(&other.distance_km)
    }
}

impl RegionLocator {
    pub fn new(regions: Vec<Region>) -> Self {
        Self {
            rtree: RTree::bulk_load(regions),
        }
    }

    /// The closest region to a coordinate with its haversine distance in km,
    /// or `None` for an empty catalog.
    pub fn nearest(&self, coordinate: LatLon) -> Option<(&Region, f64)> {
        self.query(coordinate, 1, f64::INFINITY).into_iter().next()
    }

    /// Up to `n_results` regions within `max_distance_km` of a coordinate,
    /// sorted by haversine distance, closest first.
    pub fn query(
        &self,
        coordinate: LatLon,
        n_results: usize,
        max_distance_km: f64,
    ) -> Vec<(&Region, f64)> {
        if n_results == 0 {
            return vec![];
        }

        let query_point = [coordinate.latitude(), coordinate.longitude()];
        let mut heap: BinaryHeap<RegionCandidate<'_>> = BinaryHeap::with_capacity(n_results);

        // Degree distance and km distance order slightly differently, so
        // keep iterating a little past n_results before trusting the heap.
        let iteration_limit = (n_results * 2).max(8);
        let mut items_checked = 0;

        for region in self.rtree.nearest_neighbor_iter(&query_point) {
            items_checked += 1;

            let dist_km = distance(
                HaversineLocation {
                    latitude: coordinate.latitude(),
                    longitude: coordinate.longitude(),
                },
                HaversineLocation {
                    latitude: region.coordinate.latitude(),
                    longitude: region.coordinate.longitude(),
                },
                Units::Kilometers,
            );

            if dist_km > max_distance_km {
                if items_checked >= iteration_limit {
                    break;
                }
                continue;
            }

            let candidate = RegionCandidate {
                distance_km: OrderedFloat(dist_km),
                region,
            };

            if heap.len() < n_results {
                heap.push(candidate);
            } else {
                // unwrap safe: heap is full (len >= n_results >= 1)
                let worst = heap.peek().unwrap().distance_km;
                if candidate.distance_km < worst {
                    heap.pop();
                    heap.push(candidate);
                }
            }

            if items_checked >= iteration_limit && heap.len() == n_results {
                break;
            }
        }

        heap.into_sorted_vec()
            .into_iter()
            .map(|c| (c.region, c.distance_km.into_inner()))
            .collect()
    }
}
