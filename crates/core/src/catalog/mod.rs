//! Option catalog: option groups, options, and their decoded artwork.
//!
//! The catalog is built once at startup (see [`OptionCatalog::load`]) and is
//! read-only afterwards, so it can be shared across requests behind an `Arc`
//! without locking.

#[cfg(test)]
pub(crate) mod fixtures;
mod loader;

use std::collections::HashMap;

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::types::{GroupId, OptionId};

pub use loader::{color_file_name, CatalogError};

/// A named category of mutually related options (e.g. "Eye").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionGroup {
    pub id: GroupId,
    pub name: String,
    /// Maximum number of simultaneous selections from this group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_max: Option<u32>,
    /// A customization must contain at least one option from this group.
    #[serde(default)]
    pub force_select: bool,
    /// Paint order; also decides which mask layer the group lands on.
    pub z_index: i32,
    #[serde(default)]
    pub options: Vec<PartOption>,
}

/// A single selectable visual element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartOption {
    pub id: OptionId,
    pub group_id: GroupId,
    pub name: String,
    /// Artwork base file name, without color suffix or extension.
    pub resource: String,
    /// Allowed colors. `None` means the option has fixed colors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
    /// Reserved for thumbnails.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumb_color: Option<String>,
}

impl PartOption {
    /// Whether `color` is one of the option's declared colors.
    pub fn allows_color(&self, color: &str) -> bool {
        self.colors
            .as_deref()
            .is_some_and(|colors| colors.iter().any(|c| c == color))
    }
}

/// Decoded artwork of one option.
#[derive(Debug)]
pub(crate) enum Artwork {
    /// Single image for an option without colors.
    Plain(RgbaImage),
    /// One image per declared color, plus the first declared color which is
    /// used when a selection omits its color.
    ByColor {
        default_color: String,
        images: HashMap<String, RgbaImage>,
    },
}

/// Process-wide, read-only option catalog.
#[derive(Debug)]
pub struct OptionCatalog {
    groups: Vec<OptionGroup>,
    groups_by_id: HashMap<GroupId, usize>,
    options_by_id: HashMap<OptionId, PartOption>,
    artwork: HashMap<OptionId, Artwork>,
}

impl OptionCatalog {
    /// All option groups in catalog order.
    pub fn groups(&self) -> &[OptionGroup] {
        &self.groups
    }

    pub fn group(&self, id: GroupId) -> Option<&OptionGroup> {
        self.groups_by_id.get(&id).map(|&idx| &self.groups[idx])
    }

    pub fn option(&self, id: OptionId) -> Option<&PartOption> {
        self.options_by_id.get(&id)
    }

    /// Number of distinct options across all groups.
    pub fn option_count(&self) -> usize {
        self.options_by_id.len()
    }

    /// Artwork for an option, optionally in a specific color.
    ///
    /// A colored option looked up without a color resolves to its first
    /// declared color. A plain option looked up with a color has no artwork.
    pub fn artwork(&self, option_id: OptionId, color: Option<&str>) -> Option<&RgbaImage> {
        match (self.artwork.get(&option_id)?, color) {
            (Artwork::Plain(image), None) => Some(image),
            (Artwork::Plain(_), Some(_)) => None,
            (Artwork::ByColor { images, .. }, Some(color)) => images.get(color),
            (
                Artwork::ByColor {
                    default_color,
                    images,
                },
                None,
            ) => images.get(default_color),
        }
    }
}
