//! Generated catalog artwork for tests, here and in dependent crates.
//!
//! Each option gets a flat-colored PNG whose covered area depends on its
//! group: group 1 (skin) fills the canvas, group 7 (hat) a band along the top
//! edge, every other group a centered square. Enable the `test-support`
//! feature to use it outside this crate.

use std::path::Path;

use image::{Rgba, RgbaImage};

use crate::catalog::{color_file_name, OptionGroup};
use crate::types::{GroupId, OptionId};

/// Side length of generated artwork.
pub const SIZE: u32 = 200;

/// Parse `#RRGGBB` into an opaque pixel.
///
/// # Panics
///
/// On anything that is not six hex digits after an optional `#`.
pub fn hex_rgba(color: &str) -> Rgba<u8> {
    let hex = color.trim_start_matches('#');
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap();
    Rgba([channel(0), channel(2), channel(4), 255])
}

/// Paint used for an option's artwork: the color itself, or a shade derived
/// from the option id for colorless artwork.
pub fn fill_color(option_id: OptionId, color: Option<&str>) -> Rgba<u8> {
    match color {
        Some(color) => hex_rgba(color),
        None => Rgba([(option_id % 256) as u8, (option_id / 256 % 256) as u8, 128, 255]),
    }
}

/// A pixel inside the area covered by `group_id`'s artwork.
pub fn covered_pixel(group_id: GroupId) -> (u32, u32) {
    match group_id {
        1 => (5, 190),
        7 => (100, 5),
        _ => (100, 100),
    }
}

fn covers(group_id: GroupId, x: u32, y: u32) -> bool {
    match group_id {
        1 => true,
        7 => y < 20,
        _ => (90..110).contains(&x) && (90..110).contains(&y),
    }
}

fn artwork_image(group_id: GroupId, fill: Rgba<u8>) -> RgbaImage {
    RgbaImage::from_fn(SIZE, SIZE, |x, y| {
        if covers(group_id, x, y) {
            fill
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}

/// Write PNG artwork for every option (and color) in `groups` into `dir`,
/// named the way [`OptionCatalog::load`](crate::catalog::OptionCatalog::load)
/// expects with a `.png` extension.
///
/// # Panics
///
/// If a file cannot be written.
pub fn write_artwork(dir: &Path, groups: &[OptionGroup]) {
    for group in groups {
        for option in &group.options {
            match &option.colors {
                None => {
                    let path = dir.join(format!("{}.png", option.resource));
                    artwork_image(group.id, fill_color(option.id, None))
                        .save(path)
                        .unwrap();
                }
                Some(colors) => {
                    for color in colors {
                        let path = dir.join(format!(
                            "{}_{}.png",
                            option.resource,
                            color_file_name(color)
                        ));
                        artwork_image(group.id, fill_color(option.id, Some(color)))
                            .save(path)
                            .unwrap();
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covered_pixel_lies_inside_artwork() {
        for group_id in [1, 2, 4, 7] {
            let (x, y) = covered_pixel(group_id);
            assert!(covers(group_id, x, y), "group {group_id}");
        }
        // The hat band and the centered square do not overlap.
        let (hx, hy) = covered_pixel(7);
        assert!(!covers(2, hx, hy));
        let (ex, ey) = covered_pixel(2);
        assert!(!covers(7, ex, ey));
    }

    #[test]
    fn hex_colors_parse_with_or_without_hash() {
        assert_eq!(hex_rgba("#0080FF"), Rgba([0, 128, 255, 255]));
        assert_eq!(hex_rgba("27160E"), Rgba([0x27, 0x16, 0x0E, 255]));
    }
}
