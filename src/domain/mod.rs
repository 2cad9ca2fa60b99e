//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the NeoWs feed payload (`FeedResponse`, `NearEarthObject` and friends)
//! - the hazardous subset served to readers (`Dataset`)

pub mod types;

pub use types::*;
