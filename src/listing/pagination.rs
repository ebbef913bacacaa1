use std::cmp::Ordering;
use std::num::NonZeroUsize;

use crate::model::{AsItem, TaggableItem};

use super::{ListOptions, SortOrder, SortSpec};

/// Orders two items by one sort field. Items lacking the field go last in either direction.
#[must_use]
pub fn compare_by(a: &TaggableItem, b: &TaggableItem, spec: &SortSpec) -> Ordering {
    match (a.sort_key(&spec.field), b.sort_key(&spec.field)) {
        (Some(a), Some(b)) => match spec.order {
            SortOrder::Asc => a.cmp(b),
            SortOrder::Desc => b.cmp(a),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl ListOptions {
    /// Skips `offset` entries and keeps at most `limit`, without reordering.
    #[must_use]
    pub fn window<T>(&self, items: Vec<T>) -> Vec<T> {
        let offset = usize::from(self.offset.unwrap_or(0));
        let limit = self.limit.map_or(usize::MAX, usize::from);
        items.into_iter().skip(offset).take(limit).collect()
    }

    /// Stable sort by `by`/`order`, then [`ListOptions::window`].
    #[must_use]
    pub fn apply<T: AsItem>(&self, mut items: Vec<T>) -> Vec<T> {
        let spec = self.sort_spec();
        items.sort_by(|a, b| compare_by(a.item(), b.item(), &spec));
        let total = items.len();
        let items = self.window(items);
        tracing::debug!("listing {} of {total} items by {spec}", items.len());
        items
    }
}

/// Splits a list into gallery slides of `per_page` entries; the last slide may be shorter.
pub fn gallery_pages<T>(items: &[T], per_page: NonZeroUsize) -> std::slice::Chunks<'_, T> {
    items.chunks(per_page.get())
}

/// Number of slides [`gallery_pages`] yields.
#[must_use]
pub const fn page_count(total: usize, per_page: NonZeroUsize) -> usize {
    total.div_ceil(per_page.get())
}
