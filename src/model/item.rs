use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{AssetType, Tag, TagSet};

/// A value usable for secondary ordering (title, creation time, position, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SortValue {
    Integer(i64),
    Timestamp(NaiveDateTime),
    Text(String),
}

impl SortValue {
    const fn rank(&self) -> u8 {
        match self {
            Self::Integer(_) => 0,
            Self::Timestamp(_) => 1,
            Self::Text(_) => 2,
        }
    }
}

impl PartialOrd for SortValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SortValue {
    /// Values of the same kind compare naturally, text case-insensitively.
    /// Mixed kinds order integers before timestamps before text.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a.cmp(b),
            (Self::Timestamp(a), Self::Timestamp(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => a
                .to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b)),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl From<&str> for SortValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for SortValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for SortValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<NaiveDateTime> for SortValue {
    fn from(value: NaiveDateTime) -> Self {
        Self::Timestamp(value)
    }
}

/// An asset or page as seen by the ranking code. The corpus owns these; results only borrow them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggableItem {
    pub id: String,
    #[serde(default)]
    pub tags: TagSet,
    #[serde(default, rename = "type")]
    pub asset_type: AssetType,
    #[serde(default)]
    pub sort_keys: BTreeMap<String, SortValue>,
}

impl TaggableItem {
    #[must_use]
    pub fn new(id: impl Into<String>, asset_type: AssetType) -> Self {
        Self {
            id: id.into(),
            tags: TagSet::new(),
            asset_type,
            sort_keys: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_tags(mut self, tags: TagSet) -> Self {
        self.tags = tags;
        self
    }

    #[must_use]
    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tags.insert(tag);
        self
    }

    #[must_use]
    pub fn with_sort_key(mut self, field: impl Into<String>, value: impl Into<SortValue>) -> Self {
        self.sort_keys.insert(field.into(), value.into());
        self
    }

    #[must_use]
    pub fn sort_key(&self, field: &str) -> Option<&SortValue> {
        self.sort_keys.get(field)
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        match self.sort_key("title") {
            Some(SortValue::Text(title)) => Some(title),
            _ => None,
        }
    }
}

/// Anything that wraps a corpus item: the item itself, a reference, a ranked match.
pub trait AsItem {
    fn item(&self) -> &TaggableItem;
}

impl AsItem for TaggableItem {
    fn item(&self) -> &Self {
        self
    }
}

impl<T: AsItem + ?Sized> AsItem for &T {
    fn item(&self) -> &TaggableItem {
        (**self).item()
    }
}
