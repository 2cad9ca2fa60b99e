//! Extraction of potentially hazardous objects from a feed.

use crate::domain::{FeedResponse, NearEarthObject};

/// Keep the objects flagged as potentially hazardous.
///
/// Date groups are visited in ascending date order, objects within a group in
/// feed order, so the output is deterministic for a given payload.
pub fn hazardous_objects(feed: FeedResponse) -> Vec<NearEarthObject> {
    feed.near_earth_objects
        .into_values()
        .flatten()
        .filter(|neo| neo.is_potentially_hazardous_asteroid)
        .collect()
}
