//! Two-layer mask compositor.
//!
//! Selected options are painted in ascending group z-index onto one of two
//! transparent canvases. Groups below the animation layer threshold go to
//! `mask0` (drawn under the client's animated layer), the rest go to `mask1`
//! (drawn over it). Both canvases are encoded as PNG.

use std::io::Cursor;

use base64::Engine;
use image::{ImageFormat, RgbaImage};

use crate::catalog::{OptionCatalog, OptionGroup, PartOption};
use crate::customization::CharPart;
use crate::types::{GroupId, OptionId};

/// Width of a rendered mask in pixels.
pub const MASK_WIDTH: u32 = 200;
/// Height of a rendered mask in pixels.
pub const MASK_HEIGHT: u32 = 200;
/// Groups with a z-index strictly below this go to `mask0`, others to `mask1`.
///
/// Layer 0 holds things like skin, eyes and mouth; the client's animation
/// layer (moving feet, weapons) sits in between; layer 1 holds hats.
pub const ANIMATION_LAYER_Z_INDEX: i32 = 10000;

/// Canvas size and layer split used by [`render_masks`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskSettings {
    pub width: u32,
    pub height: u32,
    pub animation_layer_z_index: i32,
}

impl Default for MaskSettings {
    fn default() -> Self {
        Self {
            width: MASK_WIDTH,
            height: MASK_HEIGHT,
            animation_layer_z_index: ANIMATION_LAYER_Z_INDEX,
        }
    }
}

/// PNG-encoded mask layers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskPair {
    pub mask0: Vec<u8>,
    pub mask1: Vec<u8>,
}

/// Rendering failures. Only reachable with a selection that did not pass
/// validation or a catalog missing artwork, so callers treat these as
/// internal errors.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Option {0} is not in the catalog")]
    UnknownOption(OptionId),

    #[error("Option group {0} is not in the catalog")]
    UnknownGroup(GroupId),

    #[error("No artwork for option {option_id} with color {color:?}")]
    MissingArtwork {
        option_id: OptionId,
        color: Option<String>,
    },

    #[error("Failed to encode mask: {0}")]
    Encode(#[from] image::ImageError),
}

struct Layer<'a> {
    part: &'a CharPart,
    option: &'a PartOption,
    group: &'a OptionGroup,
}

/// Composite a validated selection into the two mask layers.
///
/// Paint order is the groups' z-index; entries with equal z-index keep their
/// submission order. Each artwork is drawn unscaled at the canvas origin.
pub fn render_masks(
    parts: &[CharPart],
    catalog: &OptionCatalog,
    settings: &MaskSettings,
) -> Result<MaskPair, RenderError> {
    let mut layers = parts
        .iter()
        .map(|part| {
            let option = catalog
                .option(part.option_id)
                .ok_or(RenderError::UnknownOption(part.option_id))?;
            let group = catalog
                .group(option.group_id)
                .ok_or(RenderError::UnknownGroup(option.group_id))?;
            Ok(Layer {
                part,
                option,
                group,
            })
        })
        .collect::<Result<Vec<_>, RenderError>>()?;

    // `sort_by_key` is stable.
    layers.sort_by_key(|layer| layer.group.z_index);

    let mut below = RgbaImage::new(settings.width, settings.height);
    let mut above = RgbaImage::new(settings.width, settings.height);

    for layer in &layers {
        let color = layer.part.color.as_deref().filter(|c| !c.is_empty());
        let artwork = catalog
            .artwork(layer.option.id, color)
            .ok_or_else(|| RenderError::MissingArtwork {
                option_id: layer.option.id,
                color: color.map(str::to_string),
            })?;

        let canvas = if layer.group.z_index < settings.animation_layer_z_index {
            &mut below
        } else {
            &mut above
        };
        image::imageops::overlay(canvas, artwork, 0, 0);
    }

    tracing::debug!(layers = layers.len(), "Rendered customization masks");

    Ok(MaskPair {
        mask0: encode_png(&below)?,
        mask1: encode_png(&above)?,
    })
}

fn encode_png(canvas: &RgbaImage) -> Result<Vec<u8>, RenderError> {
    let mut bytes = Vec::new();
    canvas.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Encode PNG bytes as a `data:image/png;base64,...` URI.
pub fn png_data_uri(png: &[u8]) -> String {
    format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(png)
    )
}
