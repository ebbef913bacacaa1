//! Tag-overlap ranking and set filtering for tagged assets and pages.
//!
//! Everything here is a pure function over a caller-owned corpus: ranking by shared
//! tags, type filtering, tag clouds and validated list options.

mod error;
mod listing;
mod model;
mod settings;
mod tags;
mod util;

pub use error::{LookupError, TagError, UnknownTypeError, ValidationError};
pub use listing::{
    any_not_of_type, any_of_type, compare_by, gallery_pages, not_of_type, of_type, page_count,
    parse, parse_with_default, partition, partition_by_label, select, select_by_label, ListOptions,
    SortOrder, SortSpec, DEFAULT_SORT_FIELD,
};
pub use model::{AsItem, AssetType, SortValue, Tag, TagSet, TaggableItem, TypeSelector};
pub use settings::{Settings, ENV_PREFIX};
pub use tags::{
    band, cloud, most_popular, rank, related, resolve_first, tag_frequencies, BandedTag,
    EmptyTagPolicy, PopularTag, RankedMatch, TagOverlapRanker, TagSource,
};
