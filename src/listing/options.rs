use std::collections::{BTreeSet, HashMap};
use std::fmt::{Display, Formatter};

use nom::Finish;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::util::short_number;

pub const DEFAULT_SORT_FIELD: &str = "title";

const LIMIT: &str = "limit";
const OFFSET: &str = "offset";
const BY: &str = "by";
const ORDER: &str = "order";

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl Display for SortOrder {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Asc => write!(f, "ASC"),
            Self::Desc => write!(f, "DESC"),
        }
    }
}

/// Field plus direction, e.g. `title ASC`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
pub struct SortSpec {
    pub field: String,
    pub order: SortOrder,
}

impl SortSpec {
    #[must_use]
    pub fn new(field: impl Into<String>, order: SortOrder) -> Self {
        Self {
            field: field.into(),
            order,
        }
    }
}

impl Display for SortSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.field, self.order)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ListOptions {
    pub limit: Option<u16>,
    pub offset: Option<u16>,
    pub by: String,
    pub order: SortOrder,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            limit: None,
            offset: None,
            by: DEFAULT_SORT_FIELD.to_string(),
            order: SortOrder::Asc,
        }
    }
}

impl ListOptions {
    #[must_use]
    pub fn sort_spec(&self) -> SortSpec {
        SortSpec::new(self.by.clone(), self.order)
    }
}

/// Validates `limit`, `offset`, `by` and `order`, in that order, failing on the first bad one.
/// `by` defaults to `title` and must name one of `sortable_fields`; `order` defaults to `asc`.
pub fn parse(
    raw: &HashMap<String, String>,
    sortable_fields: &BTreeSet<String>,
) -> Result<ListOptions, ValidationError> {
    parse_with_default(raw, sortable_fields, DEFAULT_SORT_FIELD)
}

#[tracing::instrument(level = "debug", skip(sortable_fields), err(Debug))]
pub fn parse_with_default(
    raw: &HashMap<String, String>,
    sortable_fields: &BTreeSet<String>,
    default_by: &str,
) -> Result<ListOptions, ValidationError> {
    for key in raw.keys() {
        if ![LIMIT, OFFSET, BY, ORDER].contains(&key.as_str()) {
            tracing::trace!("ignoring unrecognized list option {key:?}");
        }
    }

    let limit = match raw.get(LIMIT) {
        Some(value) => match short_number(value).finish() {
            Ok((_, limit)) if limit > 0 => Some(limit),
            _ => {
                return Err(ValidationError::InvalidLimit {
                    value: value.clone(),
                })
            }
        },
        None => None,
    };

    let offset = match raw.get(OFFSET) {
        Some(value) => Some(
            short_number(value)
                .finish()
                .map(|(_, offset)| offset)
                .map_err(|_err| ValidationError::InvalidOffset {
                    value: value.clone(),
                })?,
        ),
        None => None,
    };

    let by = raw.get(BY).map_or(default_by, |by| by.trim());
    if !sortable_fields.contains(by) {
        return Err(ValidationError::InvalidSortField {
            value: by.to_string(),
            allowed: sortable_fields.iter().cloned().collect(),
        });
    }

    let order = match raw.get(ORDER).map(|order| order.trim()) {
        None => SortOrder::Asc,
        Some(order) if order.eq_ignore_ascii_case("asc") => SortOrder::Asc,
        Some(order) if order.eq_ignore_ascii_case("desc") => SortOrder::Desc,
        Some(order) => {
            return Err(ValidationError::InvalidOrder {
                value: order.to_string(),
            })
        }
    };

    Ok(ListOptions {
        limit,
        offset,
        by: by.to_string(),
        order,
    })
}
