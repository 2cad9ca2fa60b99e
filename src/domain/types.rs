//! Shared domain types.
//!
//! The NeoWs payload types mirror the upstream JSON schema so they can be
//! decoded directly with serde. Fields the feed does not always carry are
//! defaulted; the ones we depend on are required.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Min/max estimated diameter in one unit system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DiameterRange {
    pub estimated_diameter_min: f64,
    pub estimated_diameter_max: f64,
}

/// Estimated diameter in every unit system NeoWs reports.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EstimatedDiameter {
    pub kilometers: DiameterRange,
    #[serde(default)]
    pub meters: DiameterRange,
    #[serde(default)]
    pub miles: DiameterRange,
    #[serde(default)]
    pub feet: DiameterRange,
}

/// Relative velocity at close approach. NeoWs sends these as decimal strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelativeVelocity {
    #[serde(default)]
    pub kilometers_per_second: String,
    #[serde(default)]
    pub kilometers_per_hour: String,
    #[serde(default)]
    pub miles_per_hour: String,
}

/// Miss distance at close approach, as decimal strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MissDistance {
    #[serde(default)]
    pub astronomical: String,
    #[serde(default)]
    pub lunar: String,
    #[serde(default)]
    pub kilometers: String,
    #[serde(default)]
    pub miles: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CloseApproach {
    pub close_approach_date: String,
    #[serde(default)]
    pub close_approach_date_full: Option<String>,
    #[serde(default)]
    pub epoch_date_close_approach: i64,
    #[serde(default)]
    pub relative_velocity: RelativeVelocity,
    #[serde(default)]
    pub miss_distance: MissDistance,
    #[serde(default)]
    pub orbiting_body: String,
}

/// A single near-Earth object as reported by the feed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NearEarthObject {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub neo_reference_id: String,
    pub name: String,
    pub nasa_jpl_url: String,
    #[serde(default)]
    pub absolute_magnitude_h: f64,
    pub estimated_diameter: EstimatedDiameter,
    pub is_potentially_hazardous_asteroid: bool,
    pub close_approach_data: Vec<CloseApproach>,
    #[serde(default)]
    pub is_sentry_object: bool,
}

impl NearEarthObject {
    /// Upper bound of the estimated diameter, in kilometers.
    pub fn max_diameter_km(&self) -> f64 {
        self.estimated_diameter.kilometers.estimated_diameter_max
    }

    /// First listed close approach, if any.
    pub fn next_approach(&self) -> Option<&CloseApproach> {
        self.close_approach_data.first()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedLinks {
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub prev: Option<String>,
    #[serde(default, rename = "self")]
    pub self_link: Option<String>,
}

/// Raw decoded `/feed` payload.
///
/// Date keys decode into a `BTreeMap`, so iteration is always in ascending
/// date order regardless of the order the upstream serialised them in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedResponse {
    #[serde(default)]
    pub element_count: usize,
    #[serde(default)]
    pub near_earth_objects: BTreeMap<NaiveDate, Vec<NearEarthObject>>,
    #[serde(default)]
    pub links: FeedLinks,
}

impl FeedResponse {
    /// Number of objects across all date groups.
    pub fn object_count(&self) -> usize {
        self.near_earth_objects.values().map(Vec::len).sum()
    }
}

/// The hazardous subset currently being served.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    /// Reference date of the load that produced this dataset.
    /// `None` only for the initial, never-loaded dataset.
    pub as_of: Option<NaiveDate>,
    pub objects: Vec<NearEarthObject>,
}

impl Dataset {
    pub fn new(as_of: NaiveDate, objects: Vec<NearEarthObject>) -> Self {
        Self {
            as_of: Some(as_of),
            objects,
        }
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
