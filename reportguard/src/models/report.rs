use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ReportGuardError, Result};

/// Snapshot of one valuation report under edit.
///
/// The surrounding application owns this record and attaches many more fields
/// than the consistency checks read. Anything not modelled here is kept in
/// `extra` so a check/amend round trip returns the record intact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_data: Option<PropertyData>,
    /// Risk category name to rating, conventionally 1-5.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_ratings: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vra_assessment: Option<VraAssessment>,
    /// Comparable sales. Only the number of entries is inspected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sales_evidence: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rental_assessment: Option<RentalAssessment>,
    /// Narrative summary of the report.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub general_comments: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sections: Option<Map<String, Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyData {
    /// e.g. "missing", "none", "average", "good"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kitchen_condition: Option<String>,
    /// e.g. "very_poor", "poor", "average", "good"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structural_condition: Option<String>,
    /// Tags such as "main_road", "power_lines", "industrial".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_factors: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VraAssessment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RentalAssessment {
    /// Number or numeric string, as captured by the rental form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekly_rent: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RentalAssessment {
    pub fn weekly_rent_amount(&self) -> Option<f64> {
        self.weekly_rent.as_ref().and_then(numeric)
    }
}

impl VraAssessment {
    pub fn trimmed_comments(&self) -> &str {
        self.comments.as_deref().map(str::trim).unwrap_or_default()
    }
}

impl ReportData {
    /// Number of risk ratings at or above `threshold`. Ratings that are not
    /// numeric are ignored.
    pub fn risk_ratings_at_least(&self, threshold: f64) -> usize {
        self.risk_ratings
            .as_ref()
            .map(|ratings| {
                ratings
                    .values()
                    .filter_map(numeric)
                    .filter(|rating| *rating >= threshold)
                    .count()
            })
            .unwrap_or(0)
    }

    /// Read the value at a dot-separated path such as `rentalAssessment.weekly_rent`.
    pub fn get_path(&self, path: &str) -> Result<Option<Value>> {
        let root = serde_json::to_value(self)?;
        let mut cursor = &root;
        for segment in split_path(path)? {
            match cursor.get(segment) {
                Some(next) => cursor = next,
                None => return Ok(None),
            }
        }
        Ok(Some(cursor.clone()))
    }

    /// Assign `value` at a dot-separated path.
    ///
    /// Missing intermediates (and intermediates that are not objects) become
    /// empty objects, so a path can introduce structure the report did not
    /// have. Fails when the result no longer fits the report shape.
    pub fn set_path(&mut self, path: &str, value: Value) -> Result<()> {
        let segments = split_path(path)?;
        let mut root = serde_json::to_value(&*self)?;
        assign(&mut root, &segments, value);
        *self = serde_json::from_value(root).map_err(|e| {
            ReportGuardError::Validation(format!("Value at '{path}' does not fit the report: {e}"))
        })?;
        Ok(())
    }
}

fn split_path(path: &str) -> Result<Vec<&str>> {
    let segments: Vec<&str> = path.split('.').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(ReportGuardError::Validation(format!(
            "Invalid field path: '{path}'"
        )));
    }
    Ok(segments)
}

fn assign(target: &mut Value, segments: &[&str], value: Value) {
    if !target.is_object() {
        *target = Value::Object(Map::new());
    }
    if let Value::Object(map) = target {
        match segments {
            [] => {}
            [leaf] => {
                map.insert((*leaf).to_string(), value);
            }
            [head, rest @ ..] => {
                let child = map.entry((*head).to_string()).or_insert(Value::Null);
                assign(child, rest, value);
            }
        }
    }
}

/// Numbers and numeric strings both count; form inputs arrive as either.
/// "inf" and "NaN" are not figures.
pub(crate) fn numeric(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}
