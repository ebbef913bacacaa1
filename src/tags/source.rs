use serde::{Deserialize, Serialize};

use crate::error::LookupError;
use crate::model::{TagSet, TaggableItem};

use super::{most_popular, tag_frequencies};

/// Where the reference tags for a listing come from.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TagSource {
    /// Every tag used in the corpus.
    All,
    /// The `n` most used tags in the corpus.
    Top(usize),
    /// The tags of one item, e.g. the current page or asset.
    Item(String),
    /// An explicit list, usually from a `tags="a, b"` attribute.
    Requested(TagSet),
    /// Tags appearing next to all of the given tags.
    Coincident(TagSet),
}

impl TagSource {
    #[must_use]
    pub fn requested(list: &str) -> Self {
        Self::Requested(TagSet::from_list(list))
    }

    #[tracing::instrument(level = "debug", skip(corpus), fields(corpus = corpus.len()), err(Debug))]
    pub fn resolve(&self, corpus: &[TaggableItem]) -> Result<TagSet, LookupError> {
        let tags = match self {
            Self::All => tag_frequencies(corpus).into_keys().collect(),
            Self::Top(limit) => most_popular(&tag_frequencies(corpus), *limit)
                .into_iter()
                .map(|popular| popular.tag)
                .collect(),
            Self::Item(item_id) => corpus
                .iter()
                .find(|item| &item.id == item_id)
                .map(|item| item.tags.clone())
                .ok_or_else(|| LookupError::ItemNotFound(item_id.clone()))?,
            Self::Requested(tags) => tags.clone(),
            Self::Coincident(tags) => coincident(corpus, tags),
        };
        tracing::debug!("resolved {} tags", tags.len());
        Ok(tags)
    }
}

fn coincident(corpus: &[TaggableItem], tags: &TagSet) -> TagSet {
    if tags.is_empty() {
        return TagSet::new();
    }
    corpus
        .iter()
        .filter(|item| item.tags.is_superset(tags))
        .flat_map(|item| item.tags.iter())
        .filter(|tag| !tags.contains(tag))
        .cloned()
        .collect()
}

/// Tries each source in turn and returns the first non-empty tag set.
/// Missing items are skipped like empty sources; if nothing yields tags the result is [`LookupError::NoTags`].
pub fn resolve_first(sources: &[TagSource], corpus: &[TaggableItem]) -> Result<TagSet, LookupError> {
    for source in sources {
        match source.resolve(corpus) {
            Ok(tags) if !tags.is_empty() => return Ok(tags),
            Ok(_) | Err(LookupError::ItemNotFound(_)) => continue,
            Err(err) => return Err(err),
        }
    }
    Err(LookupError::NoTags)
}
