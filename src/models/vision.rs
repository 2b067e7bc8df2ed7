//! Vision/Traction Organizer
//!
//! Singleton strategy document. Always present; defaults to empty.

use serde::{Deserialize, Serialize};
use super::entity::{Entity, EntityKind};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreValue {
    pub id: String,
    pub value: String,
    pub description: String,
}

impl Entity for CoreValue {
    const KIND: EntityKind = EntityKind::CoreValue;

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreFocus {
    pub purpose: String,
    pub niche: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VisionDocument {
    pub core_values: Vec<CoreValue>,
    pub core_focus: CoreFocus,
    pub ten_year_target: String,
    pub marketing_strategy: String,
    pub three_year_picture: String,
    pub one_year_plan: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_document_fills_defaults() {
        let doc: VisionDocument =
            serde_json::from_str(r#"{"tenYearTarget":"$10M","coreFocus":{"purpose":"Help"}}"#)
                .unwrap();
        assert_eq!(doc.ten_year_target, "$10M");
        assert_eq!(doc.core_focus.purpose, "Help");
        assert_eq!(doc.core_focus.niche, "");
        assert!(doc.core_values.is_empty());
    }
}
