use std::cmp::Ordering;
use std::fmt::{Debug, Formatter};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::error::LookupError;
use crate::listing::{compare_by, SortSpec};
use crate::model::{AsItem, TagSet, TaggableItem};

/// A corpus item together with the number of reference tags it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankedMatch<'a> {
    pub item: &'a TaggableItem,
    pub overlap: usize,
}

impl AsItem for RankedMatch<'_> {
    fn item(&self) -> &TaggableItem {
        self.item
    }
}

/// What an empty reference tag set should select.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EmptyTagPolicy {
    /// Nothing matches an empty tag set.
    #[default]
    NoResults,
    /// Every item is listed, each with an overlap of zero.
    WholeCorpus,
}

type Comparator = Box<dyn Fn(&TaggableItem, &TaggableItem) -> Ordering + Send + Sync>;

enum TieBreak {
    CorpusOrder,
    Field(SortSpec),
    Custom(Comparator),
}

impl TieBreak {
    fn compare(&self, a: &TaggableItem, b: &TaggableItem) -> Ordering {
        match self {
            Self::CorpusOrder => Ordering::Equal,
            Self::Field(spec) => compare_by(a, b, spec),
            Self::Custom(comparator) => comparator(a, b),
        }
    }
}

impl Debug for TieBreak {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CorpusOrder => write!(f, "CorpusOrder"),
            Self::Field(spec) => write!(f, "Field({spec})"),
            Self::Custom(_) => write!(f, "Custom"),
        }
    }
}

/// Items sharing at least one tag with `reference`, most shared tags first.
/// With `strict`, only items carrying every reference tag remain.
/// Ties keep corpus order; an empty reference or corpus gives an empty result.
#[tracing::instrument(level = "debug", skip_all, fields(corpus = corpus.len(), reference = reference.len(), strict = strict))]
pub fn rank<'a>(corpus: &'a [TaggableItem], reference: &TagSet, strict: bool) -> Vec<RankedMatch<'a>> {
    let matches = overlapping(corpus, reference, strict, &[]);
    tracing::debug!("{} matches", matches.len());
    matches
}

/// Items related to `item_id` by tagging, most related first. The item itself is left out.
#[tracing::instrument(level = "debug", skip(corpus), fields(corpus = corpus.len()), err(Debug))]
pub fn related<'a>(
    corpus: &'a [TaggableItem],
    item_id: &str,
) -> Result<Vec<RankedMatch<'a>>, LookupError> {
    let item = corpus
        .iter()
        .find(|item| item.id == item_id)
        .ok_or_else(|| LookupError::ItemNotFound(item_id.to_string()))?;
    Ok(overlapping(corpus, &item.tags, false, &[item_id]))
}

fn overlapping<'a>(
    corpus: &'a [TaggableItem],
    reference: &TagSet,
    strict: bool,
    excluded: &[&str],
) -> Vec<RankedMatch<'a>> {
    corpus
        .iter()
        .filter(|item| !excluded.contains(&item.id.as_str()))
        .map(|item| RankedMatch {
            item,
            overlap: item.tags.overlap(reference),
        })
        .filter(|ranked| ranked.overlap > 0 && (!strict || ranked.overlap == reference.len()))
        // stable: equal overlaps keep corpus order
        .sorted_by(|a, b| b.overlap.cmp(&a.overlap))
        .collect()
}

/// Configurable form of [`rank`]: exclusions, a secondary ordering and an explicit
/// policy for empty reference sets.
#[derive(Debug)]
pub struct TagOverlapRanker {
    reference: TagSet,
    empty_policy: EmptyTagPolicy,
    strict: bool,
    excluded: Vec<String>,
    tie_break: TieBreak,
}

impl TagOverlapRanker {
    #[must_use]
    pub const fn new(reference: TagSet, empty_policy: EmptyTagPolicy) -> Self {
        Self {
            reference,
            empty_policy,
            strict: false,
            excluded: Vec::new(),
            tie_break: TieBreak::CorpusOrder,
        }
    }

    #[must_use]
    pub const fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    #[must_use]
    pub fn exclude(mut self, item_id: impl Into<String>) -> Self {
        self.excluded.push(item_id.into());
        self
    }

    /// Orders items with equal overlap by a sort field.
    #[must_use]
    pub fn tie_break(mut self, spec: SortSpec) -> Self {
        self.tie_break = TieBreak::Field(spec);
        self
    }

    #[must_use]
    pub fn tie_break_by(
        mut self,
        comparator: impl Fn(&TaggableItem, &TaggableItem) -> Ordering + Send + Sync + 'static,
    ) -> Self {
        self.tie_break = TieBreak::Custom(Box::new(comparator));
        self
    }

    #[must_use]
    pub const fn reference(&self) -> &TagSet {
        &self.reference
    }

    #[tracing::instrument(level = "debug", skip_all, fields(corpus = corpus.len(), reference = self.reference.len(), strict = self.strict))]
    pub fn rank<'a>(&self, corpus: &'a [TaggableItem]) -> Vec<RankedMatch<'a>> {
        let excluded = self.excluded.iter().map(String::as_str).collect_vec();

        let mut matches = if self.reference.is_empty() {
            match self.empty_policy {
                EmptyTagPolicy::NoResults => Vec::new(),
                EmptyTagPolicy::WholeCorpus => {
                    tracing::debug!("empty reference, listing the whole corpus");
                    corpus
                        .iter()
                        .filter(|item| !excluded.contains(&item.id.as_str()))
                        .map(|item| RankedMatch { item, overlap: 0 })
                        .collect_vec()
                }
            }
        } else {
            overlapping(corpus, &self.reference, self.strict, &excluded)
        };

        if !matches!(self.tie_break, TieBreak::CorpusOrder) {
            matches.sort_by(|a, b| {
                b.overlap
                    .cmp(&a.overlap)
                    .then_with(|| self.tie_break.compare(a.item, b.item))
            });
        }
        tracing::debug!("{} matches", matches.len());
        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::SortOrder;
    use crate::model::AssetType;
    use anyhow::Result;

    fn item(id: &str, tags: &str) -> TaggableItem {
        TaggableItem::new(id, AssetType::Image).with_tags(TagSet::from_list(tags))
    }

    fn ids_and_overlaps<'a>(matches: &[RankedMatch<'a>]) -> Vec<(&'a str, usize)> {
        matches
            .iter()
            .map(|ranked| (ranked.item.id.as_str(), ranked.overlap))
            .collect()
    }

    #[test]
    fn ranks_by_overlap() {
        let corpus = vec![item("A", "x, y"), item("B", "y"), item("C", "z")];
        let reference = TagSet::from_list("x, y");
        assert_eq!(vec![("A", 2), ("B", 1)], ids_and_overlaps(&rank(&corpus, &reference, false)));
        assert_eq!(vec![("A", 2)], ids_and_overlaps(&rank(&corpus, &reference, true)));
    }

    #[test]
    fn ties_keep_corpus_order() {
        let corpus = vec![
            item("1", "sea"),
            item("2", "sea, sky"),
            item("3", "sky"),
            item("4", "sea, sky, sand"),
            item("5", "sand"),
        ];
        let reference = TagSet::from_list("sea, sky");
        assert_eq!(
            vec![("2", 2), ("4", 2), ("1", 1), ("3", 1)],
            ids_and_overlaps(&rank(&corpus, &reference, false))
        );
        assert_eq!(
            rank(&corpus, &reference, false),
            rank(&corpus, &reference, false)
        );
    }

    #[test]
    fn strict_is_subset_with_full_overlap() {
        let corpus = vec![
            item("1", "a, b, c"),
            item("2", "a, b"),
            item("3", "b, c, d"),
            item("4", "a, c"),
        ];
        let reference = TagSet::from_list("a, c");
        let loose = rank(&corpus, &reference, false);
        let strict = rank(&corpus, &reference, true);
        assert!(strict.iter().all(|ranked| loose.contains(ranked)));
        assert!(strict.iter().all(|ranked| ranked.overlap == reference.len()));
        assert_eq!(vec![("1", 2), ("4", 2)], ids_and_overlaps(&strict));
    }

    #[test]
    fn empty_inputs() {
        let corpus = vec![item("1", "a")];
        assert!(rank(&corpus, &TagSet::new(), false).is_empty());
        assert!(rank(&corpus, &TagSet::new(), true).is_empty());
        assert!(rank(&[], &TagSet::from_list("a"), false).is_empty());
    }

    #[test]
    fn related_excludes_item() -> Result<()> {
        let corpus = vec![item("1", "a, b"), item("2", "b"), item("3", "a, b, c"), item("4", "c")];
        assert_eq!(vec![("3", 2), ("2", 1)], ids_and_overlaps(&related(&corpus, "1")?));
        assert_eq!(
            LookupError::ItemNotFound("9".to_string()),
            related(&corpus, "9").unwrap_err()
        );
        Ok(())
    }

    #[test]
    fn ranker_empty_policy() {
        let corpus = vec![item("1", "a"), item("2", "")];
        let none = TagOverlapRanker::new(TagSet::new(), EmptyTagPolicy::NoResults);
        assert!(none.rank(&corpus).is_empty());
        let all = TagOverlapRanker::new(TagSet::new(), EmptyTagPolicy::WholeCorpus).exclude("1");
        assert_eq!(vec![("2", 0)], ids_and_overlaps(&all.rank(&corpus)));
    }

    #[test]
    fn ranker_tie_break_and_exclusion() {
        let corpus = vec![
            item("1", "a").with_sort_key("title", "Zebra"),
            item("2", "a, b").with_sort_key("title", "Yak"),
            item("3", "a").with_sort_key("title", "Aardvark"),
            item("4", "a").with_sort_key("title", "Moose"),
        ];
        let reference = TagSet::from_list("a, b");
        let ranker = TagOverlapRanker::new(reference.clone(), EmptyTagPolicy::NoResults)
            .exclude("4")
            .tie_break(SortSpec::new("title", SortOrder::Asc));
        assert_eq!(vec![("2", 2), ("3", 1), ("1", 1)], ids_and_overlaps(&ranker.rank(&corpus)));

        let by_id_desc = TagOverlapRanker::new(reference.clone(), EmptyTagPolicy::NoResults)
            .tie_break_by(|a, b| b.id.cmp(&a.id));
        assert_eq!(
            vec![("2", 2), ("4", 1), ("3", 1), ("1", 1)],
            ids_and_overlaps(&by_id_desc.rank(&corpus))
        );

        let strict = TagOverlapRanker::new(reference, EmptyTagPolicy::NoResults).strict(true);
        assert_eq!(vec![("2", 2)], ids_and_overlaps(&strict.rank(&corpus)));
    }
}
