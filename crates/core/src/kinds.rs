//! Display payloads for each placement kind.
//!
//! The slot engine never looks inside these; it only needs the associated
//! [`Kind`] to pick keys and the `Validate` impl to reject bad input on
//! create.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::vertical::Kind;

/// Maximum length for titles and names.
pub const MAX_TITLE_LEN: u64 = 200;

/// Maximum length for free-text descriptions.
pub const MAX_DESCRIPTION_LEN: u64 = 2000;

/// A payload type that can be placed into slots.
pub trait PlacementKind:
    Serialize + DeserializeOwned + Validate + Clone + std::fmt::Debug + PartialEq + Send + Sync + 'static
{
    const KIND: Kind;

    /// Title or name shown in log lines.
    fn display_name(&self) -> &str;
}

// ---------------------------------------------------------------------------
// Seasonal pick
// ---------------------------------------------------------------------------

/// A hand-picked seasonal item (e.g. "Back to school").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct SeasonalPick {
    #[validate(length(min = 1, max = MAX_TITLE_LEN))]
    pub title: String,
    #[validate(length(max = MAX_DESCRIPTION_LEN))]
    pub description: Option<String>,
    #[validate(url)]
    pub image_url: String,
    #[validate(url)]
    pub link_url: Option<String>,
}

impl PlacementKind for SeasonalPick {
    const KIND: Kind = Kind::SeasonalPick;

    fn display_name(&self) -> &str {
        &self.title
    }
}

// ---------------------------------------------------------------------------
// Featured store
// ---------------------------------------------------------------------------

/// A store promoted on the vertical's landing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct FeaturedStore {
    #[validate(length(min = 1, max = MAX_TITLE_LEN))]
    pub store_id: String,
    #[validate(length(min = 1, max = MAX_TITLE_LEN))]
    pub store_name: String,
    #[validate(url)]
    pub logo_url: Option<String>,
    #[validate(url)]
    pub banner_url: Option<String>,
    #[validate(url)]
    pub store_url: Option<String>,
}

impl PlacementKind for FeaturedStore {
    const KIND: Kind = Kind::FeaturedStore;

    fn display_name(&self) -> &str {
        &self.store_name
    }
}

// ---------------------------------------------------------------------------
// Featured category
// ---------------------------------------------------------------------------

/// A category tile promoted on the vertical's landing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct FeaturedCategory {
    #[validate(length(min = 1, max = MAX_TITLE_LEN))]
    pub category_id: String,
    #[validate(length(min = 1, max = MAX_TITLE_LEN))]
    pub category_name: String,
    #[validate(url)]
    pub icon_url: Option<String>,
    #[validate(url)]
    pub image_url: Option<String>,
}

impl PlacementKind for FeaturedCategory {
    const KIND: Kind = Kind::FeaturedCategory;

    fn display_name(&self) -> &str {
        &self.category_name
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
