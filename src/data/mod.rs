//! Upstream data: the NeoWs client and the hazard filter applied to its feed.

pub mod hazard;
pub mod neows;

pub use hazard::hazardous_objects;
pub use neows::{FeedSource, NeoWsClient};
