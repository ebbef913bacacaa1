use std::fmt::{Display, Formatter};
use std::str::FromStr;

use nom::Finish;
use serde::{Deserialize, Serialize};

use crate::error::UnknownTypeError;
use crate::util::type_label;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetType {
    Image,
    Audio,
    Movie,
    #[default]
    Other,
}

impl AssetType {
    pub const ALL: [Self; 4] = [Self::Image, Self::Audio, Self::Movie, Self::Other];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Audio => "audio",
            Self::Movie => "movie",
            Self::Other => "other",
        }
    }

    /// Listing name, e.g. `images`. Audio has no separate plural.
    #[must_use]
    pub const fn plural(self) -> &'static str {
        match self {
            Self::Image => "images",
            Self::Audio => "audio",
            Self::Movie => "movies",
            Self::Other => "others",
        }
    }
}

impl FromStr for AssetType {
    type Err = UnknownTypeError;

    /// Accepts singular and plural names, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        Self::ALL
            .into_iter()
            .find(|asset_type| {
                label.eq_ignore_ascii_case(asset_type.name())
                    || label.eq_ignore_ascii_case(asset_type.plural())
            })
            .ok_or_else(|| UnknownTypeError::new(s))
    }
}

impl Display for AssetType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A type restriction as written in listing names: `images` keeps images,
/// `non_images` (or `not_images`) keeps everything else.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct TypeSelector {
    pub asset_type: AssetType,
    pub negated: bool,
}

impl TypeSelector {
    #[must_use]
    pub const fn only(asset_type: AssetType) -> Self {
        Self {
            asset_type,
            negated: false,
        }
    }

    #[must_use]
    pub const fn except(asset_type: AssetType) -> Self {
        Self {
            asset_type,
            negated: true,
        }
    }

    #[must_use]
    pub fn accepts(self, asset_type: AssetType) -> bool {
        (self.asset_type == asset_type) != self.negated
    }
}

impl FromStr for TypeSelector {
    type Err = UnknownTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (_, (negated, name)) = type_label(s.trim())
            .finish()
            .map_err(|_err| UnknownTypeError::new(s))?;
        let asset_type = name.parse::<AssetType>().map_err(|_err| UnknownTypeError::new(s))?;
        Ok(Self {
            asset_type,
            negated,
        })
    }
}

impl Display for TypeSelector {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.negated {
            write!(f, "non_{}", self.asset_type.plural())
        } else {
            write!(f, "{}", self.asset_type.plural())
        }
    }
}
