//! Builds an [`OptionCatalog`] from catalog metadata and an artwork directory.
//!
//! Every artwork file referenced by the metadata is read and decoded here, so
//! a broken asset directory fails at startup instead of at render time.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use image::RgbaImage;

use super::{Artwork, OptionCatalog, OptionGroup, PartOption};
use crate::types::{GroupId, OptionId};

/// Startup-time catalog configuration errors. None of these are recoverable.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("No option groups provided")]
    NoGroups,

    #[error("No image directory provided")]
    NoImageDirectory,

    #[error("Given image directory does not exist: {0}")]
    ImageDirectoryMissing(PathBuf),

    #[error("No image extension provided")]
    NoImageExtension,

    #[error("Option {option_id} is listed in group {group_id} but declares group {declared}")]
    GroupMismatch {
        option_id: OptionId,
        group_id: GroupId,
        declared: GroupId,
    },

    #[error("Group {0} declares allowMax 0, which no selection can satisfy")]
    ZeroAllowMax(GroupId),

    #[error("Option {0} declares an empty color list")]
    EmptyColors(OptionId),

    #[error("Failed to read catalog metadata {path}: {source}")]
    ReadMetadata {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse catalog metadata: {0}")]
    ParseMetadata(#[from] serde_json::Error),

    #[error("Failed to read artwork {path}: {source}")]
    ReadArtwork {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to decode artwork {path}: {source}")]
    DecodeArtwork {
        path: PathBuf,
        source: image::ImageError,
    },
}

/// File-system safe form of a color: the leading `#` becomes `hash`.
///
/// ```
/// use catalli_core::catalog::color_file_name;
///
/// assert_eq!(color_file_name("#FF00FF"), "hashFF00FF");
/// assert_eq!(color_file_name("FF00FF"), "FF00FF");
/// ```
pub fn color_file_name(color: &str) -> String {
    match color.strip_prefix('#') {
        Some(rest) => format!("hash{rest}"),
        None => color.to_string(),
    }
}

impl OptionCatalog {
    /// Build the catalog from option groups and the artwork directory.
    ///
    /// Artwork paths are `{image_dir}/{resource}{ext}` for plain options and
    /// `{image_dir}/{resource}_{color_file_name(color)}{ext}` for each color of
    /// a colored option. `image_extension` gets a leading `.` if it lacks one.
    ///
    /// Options sharing an id across groups overwrite each other (last wins).
    pub fn load(
        groups: Vec<OptionGroup>,
        image_dir: impl AsRef<Path>,
        image_extension: &str,
    ) -> Result<Self, CatalogError> {
        let image_dir = image_dir.as_ref();

        if groups.is_empty() {
            return Err(CatalogError::NoGroups);
        }
        if image_dir.as_os_str().to_string_lossy().trim().is_empty() {
            return Err(CatalogError::NoImageDirectory);
        }
        if !image_dir.is_dir() {
            return Err(CatalogError::ImageDirectoryMissing(image_dir.to_path_buf()));
        }
        let extension = normalize_extension(image_extension)?;

        let groups_by_id = groups
            .iter()
            .enumerate()
            .map(|(idx, group)| (group.id, idx))
            .collect::<HashMap<_, _>>();

        let mut options_by_id = HashMap::new();
        let mut artwork = HashMap::new();

        for group in &groups {
            if group.allow_max == Some(0) {
                return Err(CatalogError::ZeroAllowMax(group.id));
            }
            for option in &group.options {
                if option.group_id != group.id {
                    return Err(CatalogError::GroupMismatch {
                        option_id: option.id,
                        group_id: group.id,
                        declared: option.group_id,
                    });
                }
                artwork.insert(option.id, load_artwork(option, image_dir, &extension)?);
                options_by_id.insert(option.id, option.clone());
            }
        }

        tracing::info!(
            groups = groups.len(),
            options = options_by_id.len(),
            image_dir = %image_dir.display(),
            "Option catalog loaded"
        );

        Ok(Self {
            groups,
            groups_by_id,
            options_by_id,
            artwork,
        })
    }

    /// Read the catalog metadata JSON document at `metadata_path`, then
    /// [`load`](Self::load) it.
    pub fn from_file(
        metadata_path: impl AsRef<Path>,
        image_dir: impl AsRef<Path>,
        image_extension: &str,
    ) -> Result<Self, CatalogError> {
        let metadata_path = metadata_path.as_ref();
        let raw = std::fs::read(metadata_path).map_err(|source| CatalogError::ReadMetadata {
            path: metadata_path.to_path_buf(),
            source,
        })?;
        let groups: Vec<OptionGroup> = serde_json::from_slice(&raw)?;
        Self::load(groups, image_dir, image_extension)
    }
}

fn normalize_extension(extension: &str) -> Result<String, CatalogError> {
    let extension = extension.trim();
    if extension.is_empty() {
        return Err(CatalogError::NoImageExtension);
    }
    if extension.starts_with('.') {
        Ok(extension.to_string())
    } else {
        Ok(format!(".{extension}"))
    }
}

fn load_artwork(
    option: &PartOption,
    image_dir: &Path,
    extension: &str,
) -> Result<Artwork, CatalogError> {
    let Some(colors) = &option.colors else {
        let path = image_dir.join(format!("{}{extension}", option.resource));
        return Ok(Artwork::Plain(read_image(&path)?));
    };

    let default_color = colors
        .first()
        .ok_or(CatalogError::EmptyColors(option.id))?
        .clone();

    let mut images = HashMap::with_capacity(colors.len());
    for color in colors {
        let path = image_dir.join(format!(
            "{}_{}{extension}",
            option.resource,
            color_file_name(color)
        ));
        images.insert(color.clone(), read_image(&path)?);
    }

    Ok(Artwork::ByColor {
        default_color,
        images,
    })
}

fn read_image(path: &Path) -> Result<RgbaImage, CatalogError> {
    let bytes = std::fs::read(path).map_err(|source| CatalogError::ReadArtwork {
        path: path.to_path_buf(),
        source,
    })?;
    let image = image::load_from_memory(&bytes).map_err(|source| CatalogError::DecodeArtwork {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(image.to_rgba8())
}
