//! User customization selections.

use serde::{Deserialize, Serialize};

use crate::types::OptionId;

/// One selected option, optionally in one of the option's colors.
///
/// Serialized as `{"optionId": 1000, "color": "#D99958"}`; `color` is omitted
/// when not set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharPart {
    pub option_id: OptionId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl CharPart {
    pub fn new(option_id: OptionId) -> Self {
        Self {
            option_id,
            color: None,
        }
    }

    pub fn colored(option_id: OptionId, color: impl Into<String>) -> Self {
        Self {
            option_id,
            color: Some(color.into()),
        }
    }
}

/// A user's full selection. Semantically a set; paint order comes from the
/// option groups' z-index, not from the order of this list.
pub type Customization = Vec<CharPart>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_in_wire_format() {
        let parts = vec![CharPart::colored(1000, "#D99958"), CharPart::new(4001)];
        assert_eq!(
            serde_json::to_value(&parts).unwrap(),
            json!([{"optionId": 1000, "color": "#D99958"}, {"optionId": 4001}])
        );
    }

    #[test]
    fn missing_color_deserializes_as_none() {
        let part: CharPart = serde_json::from_value(json!({"optionId": 7007})).unwrap();
        assert_eq!(part, CharPart::new(7007));
    }
}
