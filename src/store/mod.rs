//! The in-memory dataset served to every reader.
//!
//! The store owns exactly one `Arc<Dataset>` at a time behind an
//! `ArcSwapOption`. Readers get the `Arc`; a load builds the replacement
//! without touching the slot and swaps it in whole, so a snapshot is always
//! one complete refresh, never a mix of two. `None` is the Empty state.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use chrono::NaiveDate;
use tracing::{Level, debug, info};

use crate::data::{FeedSource, hazardous_objects};
use crate::domain::Dataset;
use crate::error::FetchError;
use crate::report;

/// Outcome of a successful load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadSummary {
    pub as_of: NaiveDate,
    /// Objects in the upstream payload, across all dates.
    pub fetched: usize,
    /// Objects kept as hazardous.
    pub hazardous: usize,
}

pub struct DatasetStore<S> {
    source: S,
    current: ArcSwapOption<Dataset>,
    empty: Arc<Dataset>,
}

impl<S: FeedSource> DatasetStore<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            current: ArcSwapOption::empty(),
            empty: Arc::new(Dataset::default()),
        }
    }

    /// Fetch the feed for `date`, filter it and swap the result in.
    ///
    /// On error the current dataset is left exactly as it was.
    #[tracing::instrument(skip(self))]
    pub async fn load(&self, date: NaiveDate) -> Result<LoadSummary, FetchError> {
        let feed = self.source.fetch_feed(date).await?;
        let fetched = feed.object_count();
        let objects = hazardous_objects(feed);
        let dataset = Arc::new(Dataset::new(date, objects));

        let summary = LoadSummary {
            as_of: date,
            fetched,
            hazardous: dataset.len(),
        };
        if tracing::enabled!(Level::DEBUG) {
            debug!("{}", report::format_dataset_summary(&dataset));
        }

        self.current.store(Some(dataset));

        info!(
            as_of = %summary.as_of,
            fetched = summary.fetched,
            hazardous = summary.hazardous,
            "dataset replaced"
        );
        Ok(summary)
    }
}

impl<S> DatasetStore<S> {
    /// Current dataset. An empty store yields an empty dataset.
    pub fn snapshot(&self) -> Arc<Dataset> {
        self.current
            .load_full()
            .unwrap_or_else(|| Arc::clone(&self.empty))
    }

    pub fn is_populated(&self) -> bool {
        self.current.load().is_some()
    }
}
