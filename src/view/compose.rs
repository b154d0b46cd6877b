use tracing::debug;

use super::filter::{filter_records, FilterCriteria};
use super::sort::{sort_records, SortDirection, SortKey};
use crate::model::Record;

/// Everything needed to turn a record snapshot into a display listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewRequest {
    pub filter: FilterCriteria,
    pub sort_key: SortKey,
    pub direction: SortDirection,
    /// Truncate to this many entries (summary previews only).
    pub limit: Option<usize>,
}

impl ViewRequest {
    pub fn new(filter: FilterCriteria, sort_key: SortKey, direction: SortDirection) -> Self {
        Self {
            filter,
            sort_key,
            direction,
            limit: None,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Filter, then sort, then truncate.
///
/// Recomputed from scratch on every call.
pub fn compose_view<'a, R, I>(records: I, request: &ViewRequest) -> Vec<&'a R>
where
    R: Record + ?Sized + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let filtered = filter_records(records, &request.filter);
    let matched = filtered.len();

    let mut sorted = sort_records(filtered, request.sort_key, request.direction);
    if let Some(limit) = request.limit {
        sorted.truncate(limit);
    }

    debug!(
        matched,
        shown = sorted.len(),
        sort = %request.sort_key,
        "composed view"
    );

    sorted
}
