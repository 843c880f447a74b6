use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use super::report::ReportData;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmendmentType {
    AutoFix,
    Suggestion,
}

impl std::fmt::Display for AmendmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AutoFix => write!(f, "auto_fix"),
            Self::Suggestion => write!(f, "suggestion"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "high"),
            Self::Medium => write!(f, "medium"),
            Self::Low => write!(f, "low"),
        }
    }
}

/// One applied correction, with enough provenance to audit or revert it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Amendment {
    #[serde(rename = "type")]
    pub amendment_type: AmendmentType,
    pub description: String,
    /// Dot-separated path into the report, e.g. `rentalAssessment.weekly_rent`.
    pub field: String,
    pub original_value: Value,
    pub amended_value: Value,
    pub confidence: Confidence,
}

/// Outcome of one amendment run.
///
/// Contradictions without a fix are kept in a single list; on the wire it is
/// written under both `remainingContradictions` and `failedAmendments`.
#[derive(Debug, Clone, PartialEq)]
pub struct AmendmentResult {
    pub success: bool,
    pub amended_data: ReportData,
    pub amendments: Vec<Amendment>,
    pub unresolved: Vec<String>,
}

impl AmendmentResult {
    pub fn new(
        amended_data: ReportData,
        amendments: Vec<Amendment>,
        unresolved: Vec<String>,
    ) -> Self {
        Self {
            success: !amendments.is_empty(),
            amended_data,
            amendments,
            unresolved,
        }
    }

    pub fn remaining_contradictions(&self) -> &[String] {
        &self.unresolved
    }

    pub fn failed_amendments(&self) -> &[String] {
        &self.unresolved
    }
}

impl Serialize for AmendmentResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("AmendmentResult", 5)?;
        state.serialize_field("success", &self.success)?;
        state.serialize_field("amendedData", &self.amended_data)?;
        state.serialize_field("amendments", &self.amendments)?;
        state.serialize_field("remainingContradictions", &self.unresolved)?;
        state.serialize_field("failedAmendments", &self.unresolved)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn amendment_serializes_type_and_confidence() {
        let amendment = Amendment {
            amendment_type: AmendmentType::AutoFix,
            description: "Zeroed rent".to_string(),
            field: "rentalAssessment.weekly_rent".to_string(),
            original_value: json!(500),
            amended_value: json!(0),
            confidence: Confidence::High,
        };
        let value = serde_json::to_value(&amendment).unwrap();
        assert_eq!(value["type"], "auto_fix");
        assert_eq!(value["confidence"], "high");
        assert_eq!(value["originalValue"], 500);
        assert_eq!(value["amendedValue"], 0);
    }

    #[test]
    fn unresolved_is_written_under_both_names() {
        let result = AmendmentResult::new(ReportData::default(), vec![], vec!["x".to_string()]);
        assert!(!result.success);
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["remainingContradictions"], json!(["x"]));
        assert_eq!(value["failedAmendments"], json!(["x"]));
        assert_eq!(value["amendedData"], json!({}));
    }
}
