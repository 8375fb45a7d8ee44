//! Business verticals and placement kinds.
//!
//! A (vertical, kind) pair owns one index list and one six-slot board. Both
//! enums expose a stable `name()` used in store keys; renaming a variant's
//! name orphans every key written under the old one.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Vertical
// ---------------------------------------------------------------------------

/// Top-level business partition. Records, indexes and slots never cross it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vertical {
    Classifieds,
    Services,
}

impl Vertical {
    /// Every vertical, in declaration order.
    pub const ALL: [Vertical; 2] = [Vertical::Classifieds, Vertical::Services];

    /// Parse from the key/wire name.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "classifieds" => Ok(Self::Classifieds),
            "services" => Ok(Self::Services),
            other => Err(CoreError::Validation(format!(
                "Unknown vertical '{other}'. Must be one of: classifieds, services"
            ))),
        }
    }

    /// Key/wire name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Classifieds => "classifieds",
            Self::Services => "services",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Classifieds => "Classifieds",
            Self::Services => "Services",
        }
    }
}

impl std::fmt::Display for Vertical {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Kind
// ---------------------------------------------------------------------------

/// The type of content being placed. All kinds share the same slot engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Kind {
    SeasonalPick,
    FeaturedStore,
    FeaturedCategory,
}

impl Kind {
    /// Every kind, in declaration order.
    pub const ALL: [Kind; 3] = [Kind::SeasonalPick, Kind::FeaturedStore, Kind::FeaturedCategory];

    /// Parse from the key/wire name.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "seasonal-pick" => Ok(Self::SeasonalPick),
            "featured-store" => Ok(Self::FeaturedStore),
            "featured-category" => Ok(Self::FeaturedCategory),
            other => Err(CoreError::Validation(format!(
                "Unknown placement kind '{other}'. Must be one of: \
                 seasonal-pick, featured-store, featured-category"
            ))),
        }
    }

    /// Key/wire name.
    pub fn name(self) -> &'static str {
        match self {
            Self::SeasonalPick => "seasonal-pick",
            Self::FeaturedStore => "featured-store",
            Self::FeaturedCategory => "featured-category",
        }
    }

    /// Entity label used in `NotFound` errors and log lines.
    pub fn label(self) -> &'static str {
        match self {
            Self::SeasonalPick => "Seasonal pick",
            Self::FeaturedStore => "Featured store",
            Self::FeaturedCategory => "Featured category",
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
