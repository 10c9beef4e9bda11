//! Small on-disk catalog used by unit tests across the crate.

use tempfile::TempDir;

use super::{OptionCatalog, OptionGroup, PartOption};
pub(crate) use crate::test_support::{covered_pixel, fill_color, write_artwork};

fn option(id: i64, group_id: i64, name: &str, resource: &str, colors: &[&str]) -> PartOption {
    PartOption {
        id,
        group_id,
        name: name.to_string(),
        resource: resource.to_string(),
        colors: (!colors.is_empty()).then(|| colors.iter().map(|c| c.to_string()).collect()),
        thumb_color: None,
    }
}

/// Skin (forced, z 100), Eye (forced, z 300), Hat (optional, z 20000).
pub(crate) fn sample_groups() -> Vec<OptionGroup> {
    vec![
        OptionGroup {
            id: 1,
            name: "Skin".to_string(),
            allow_max: Some(1),
            force_select: true,
            z_index: 100,
            options: vec![option(1000, 1, "Skin", "skin", &["#27160E", "#935837"])],
        },
        OptionGroup {
            id: 2,
            name: "Eye".to_string(),
            allow_max: Some(1),
            force_select: true,
            z_index: 300,
            options: vec![
                option(2000, 2, "Normal", "eye_normal", &[]),
                option(2001, 2, "Anime", "eye_anime", &["#000000", "#FF0000", "#FFFFFF"]),
            ],
        },
        OptionGroup {
            id: 7,
            name: "Hat".to_string(),
            allow_max: Some(1),
            force_select: false,
            z_index: 20000,
            options: vec![
                option(7000, 7, "Cap", "hat_cap", &["#4AD031"]),
                option(7001, 7, "Crown", "hat_crown", &[]),
                option(7002, 7, "Future Employer", "hat_future_employer", &[]),
            ],
        },
    ]
}

pub(crate) fn catalog_from(groups: Vec<OptionGroup>) -> (TempDir, OptionCatalog) {
    let dir = tempfile::tempdir().unwrap();
    write_artwork(dir.path(), &groups);
    let catalog = OptionCatalog::load(groups, dir.path(), ".png").unwrap();
    (dir, catalog)
}

pub(crate) fn sample_catalog() -> (TempDir, OptionCatalog) {
    catalog_from(sample_groups())
}
