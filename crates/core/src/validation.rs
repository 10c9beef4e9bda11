//! Customization validator -- pure logic over a submission and the catalog.
//!
//! Validation runs in two passes. Each entry is first checked on its own, in
//! submission order; only when every entry resolves to a known option are the
//! group rules (`forceSelect`, `allowMax`) checked, in catalog order. The first
//! violation found is returned.

use std::collections::HashMap;

use serde_json::Value;

use crate::catalog::{OptionCatalog, PartOption};
use crate::customization::{CharPart, Customization};
use crate::types::{GroupId, OptionId};

/// Why a customization was refused. The `Display` text is shown to clients.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("No character customization is provided")]
    Empty,

    #[error("Character customization provided is not an array")]
    NotAList,

    #[error("Missing or malformed char part at position {index}")]
    MissingPart { index: usize },

    #[error("Invalid option id: {0}")]
    InvalidOptionId(String),

    /// Holds the id as submitted, which may be a number no option can carry.
    #[error("Option doesn't exist: {0}")]
    UnknownOption(String),

    #[error("Option doesn't have colors, but a color is received: {option}")]
    ColorNotSupported { option: String },

    #[error("Given color is not allowed for the option: {option} ({color})")]
    ColorNotAllowed { option: String, color: String },

    #[error("Selection is required for the group: {group_name} ({group_id})")]
    SelectionRequired {
        group_id: GroupId,
        group_name: String,
    },

    #[error(
        "Too many options selected for group: {group_name} ({group_id}), \
         {selected} selected but at most {allow_max} allowed"
    )]
    TooManySelected {
        group_id: GroupId,
        group_name: String,
        allow_max: u32,
        selected: usize,
    },
}

/// Validate an untrusted JSON submission and return it as typed parts.
///
/// Accepts `optionId` as a JSON number with no fractional part or a numeric
/// string. Any other finite number is a well-formed id that names no option.
/// An empty string, `false` or `0` as `color` is treated as no color.
pub fn validate_submission(
    raw: &Value,
    catalog: &OptionCatalog,
) -> Result<Customization, Rejection> {
    let result = validate_raw(raw, catalog);
    if let Err(rejection) = &result {
        tracing::debug!(%rejection, "Customization rejected");
    }
    result
}

/// Validate an already typed selection.
pub fn validate(parts: &[CharPart], catalog: &OptionCatalog) -> Result<(), Rejection> {
    let result = validate_typed(parts, catalog);
    if let Err(rejection) = &result {
        tracing::debug!(%rejection, "Customization rejected");
    }
    result
}

fn validate_raw(raw: &Value, catalog: &OptionCatalog) -> Result<Customization, Rejection> {
    let entries = match raw {
        Value::Null => return Err(Rejection::Empty),
        Value::Array(entries) if entries.is_empty() => return Err(Rejection::Empty),
        Value::Object(fields) if fields.is_empty() => return Err(Rejection::Empty),
        Value::String(s) if s.is_empty() => return Err(Rejection::Empty),
        Value::Array(entries) => entries,
        _ => return Err(Rejection::NotAList),
    };

    let mut parts = Vec::with_capacity(entries.len());
    let mut resolved = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let part = parse_entry(index, entry)?;
        resolved.push(check_part(&part, catalog)?);
        parts.push(part);
    }

    check_groups(&resolved, catalog)?;
    Ok(parts)
}

fn validate_typed(parts: &[CharPart], catalog: &OptionCatalog) -> Result<(), Rejection> {
    if parts.is_empty() {
        return Err(Rejection::Empty);
    }

    let resolved = parts
        .iter()
        .map(|part| check_part(part, catalog))
        .collect::<Result<Vec<_>, _>>()?;

    check_groups(&resolved, catalog)
}

fn parse_entry(index: usize, entry: &Value) -> Result<CharPart, Rejection> {
    let Value::Object(fields) = entry else {
        return Err(Rejection::MissingPart { index });
    };

    let option_id = parse_option_id(fields.get("optionId"))?;
    let color = match fields.get("color") {
        None | Some(Value::Null) | Some(Value::Bool(false)) => None,
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
    };

    Ok(CharPart { option_id, color })
}

fn parse_option_id(value: Option<&Value>) -> Result<OptionId, Rejection> {
    let invalid = || {
        Rejection::InvalidOptionId(value.map_or_else(|| "missing".to_string(), Value::to_string))
    };

    let number = match value {
        Some(Value::Number(n)) => match n.as_i64() {
            Some(id) => Some(Ok(id)),
            None => n.as_f64().map(Err),
        },
        Some(Value::String(s)) => {
            let s = s.trim();
            match s.parse::<OptionId>() {
                Ok(id) => Some(Ok(id)),
                Err(_) => s.parse::<f64>().ok().map(Err),
            }
        }
        _ => None,
    };

    match number {
        None | Some(Ok(0)) => Err(invalid()),
        Some(Ok(id)) => Ok(id),
        Some(Err(n)) if !n.is_finite() || n == 0.0 => Err(invalid()),
        Some(Err(n)) if is_whole_id(n) => Ok(n as OptionId),
        Some(Err(n)) => Err(Rejection::UnknownOption(n.to_string())),
    }
}

/// `1000.0` names the same option as `1000`.
fn is_whole_id(n: f64) -> bool {
    n.fract() == 0.0 && n >= OptionId::MIN as f64 && n < OptionId::MAX as f64
}

fn check_part<'a>(
    part: &CharPart,
    catalog: &'a OptionCatalog,
) -> Result<&'a PartOption, Rejection> {
    let option = catalog
        .option(part.option_id)
        .ok_or_else(|| Rejection::UnknownOption(part.option_id.to_string()))?;

    if let Some(color) = part.color.as_deref().filter(|c| !c.is_empty()) {
        if option.colors.is_none() {
            return Err(Rejection::ColorNotSupported {
                option: option.name.clone(),
            });
        }
        if !option.allows_color(color) {
            return Err(Rejection::ColorNotAllowed {
                option: option.name.clone(),
                color: color.to_string(),
            });
        }
    }

    Ok(option)
}

fn check_groups(resolved: &[&PartOption], catalog: &OptionCatalog) -> Result<(), Rejection> {
    let mut selected: HashMap<GroupId, usize> = HashMap::new();
    for option in resolved {
        *selected.entry(option.group_id).or_default() += 1;
    }

    for group in catalog.groups() {
        let count = selected.get(&group.id).copied().unwrap_or(0);

        if count == 0 {
            if group.force_select {
                return Err(Rejection::SelectionRequired {
                    group_id: group.id,
                    group_name: group.name.clone(),
                });
            }
            continue;
        }

        if let Some(allow_max) = group.allow_max {
            if count > allow_max as usize {
                return Err(Rejection::TooManySelected {
                    group_id: group.id,
                    group_name: group.name.clone(),
                    allow_max,
                    selected: count,
                });
            }
        }
    }

    Ok(())
}
