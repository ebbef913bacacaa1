use std::collections::BTreeMap;
use std::num::NonZeroUsize;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::model::{AsItem, Tag};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PopularTag {
    pub tag: Tag,
    pub count: u64,
}

/// A tag with its size class in a cloud; band 0 is the least popular.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct BandedTag {
    pub tag: Tag,
    pub count: u64,
    pub band: usize,
}

/// How often each tag is used across `items`.
pub fn tag_frequencies<T: AsItem>(items: &[T]) -> BTreeMap<Tag, u64> {
    let mut frequencies: BTreeMap<Tag, u64> = BTreeMap::new();
    for tag in items.iter().flat_map(|item| item.item().tags.iter()) {
        *frequencies.entry(tag.clone()).or_default() += 1;
    }
    frequencies
}

/// The `limit` most used tags, most used first; equal counts in tag order.
pub fn most_popular<'a, I>(frequencies: I, limit: usize) -> Vec<PopularTag>
where
    I: IntoIterator<Item = (&'a Tag, &'a u64)>,
{
    frequencies
        .into_iter()
        .sorted_by(|(tag_a, count_a), (tag_b, count_b)| {
            count_b.cmp(count_a).then_with(|| tag_a.cmp(tag_b))
        })
        .take(limit)
        .map(|(tag, count)| PopularTag {
            tag: tag.clone(),
            count: *count,
        })
        .collect()
}

/// Picks the `limit` most used tags and sorts them into `band_count` equal-width
/// bands over their count range. Returned in tag order.
#[tracing::instrument(level = "debug", skip(frequencies), fields(tags = frequencies.len()))]
pub fn band(
    frequencies: &BTreeMap<Tag, u64>,
    band_count: NonZeroUsize,
    limit: usize,
) -> Vec<BandedTag> {
    let selected = most_popular(frequencies, limit);
    let (Some(min), Some(max)) = (
        selected.iter().map(|popular| popular.count).min(),
        selected.iter().map(|popular| popular.count).max(),
    ) else {
        return Vec::new();
    };

    let top_band = band_count.get() - 1;
    let range = u128::from(max - min);
    if range == 0 {
        tracing::debug!("all {} selected tags used {max} times", selected.len());
    }

    selected
        .into_iter()
        .map(|PopularTag { tag, count }| {
            // floor((count - min) / ((max - min) / band_count)), kept exact
            let band = if range == 0 {
                top_band
            } else {
                let scaled = u128::from(count - min) * band_count.get() as u128 / range;
                usize::try_from(scaled).map_or(top_band, |band| band.min(top_band))
            };
            BandedTag { tag, count, band }
        })
        .sorted_by(|a, b| a.tag.cmp(&b.tag))
        .collect()
}

/// Tag cloud for a set of items: [`tag_frequencies`] followed by [`band`].
pub fn cloud<T: AsItem>(items: &[T], band_count: NonZeroUsize, limit: usize) -> Vec<BandedTag> {
    band(&tag_frequencies(items), band_count, limit)
}
