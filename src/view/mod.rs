pub mod compose;
pub mod filter;
pub mod sort;

pub use compose::{compose_view, ViewRequest};
pub use filter::{filter_records, FilterCriteria, RawFilter};
pub use sort::{compare_by_key, sort_records, SortDirection, SortKey};
