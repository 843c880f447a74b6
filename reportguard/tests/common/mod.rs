// Common test utilities for integration tests
#![allow(dead_code)]

use std::sync::Once;

use reportguard::ReportData;
use serde_json::{json, Value};

static INIT: Once = Once::new();

/// Initialize tracing subscriber once for tests
pub fn init_test_logger() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn report(value: Value) -> ReportData {
    serde_json::from_value(value).expect("valid report data")
}

/// A report that trips every contradiction rule and every warning rule.
pub fn contradictory_report() -> Value {
    json!({
        "reportId": "VR-2024-0117",
        "propertyData": {
            "address": "14 Station Street",
            "kitchen_condition": "missing",
            "structural_condition": "poor",
            "external_factors": ["main_road", "school"]
        },
        "riskRatings": {"structural": 5, "location": 2, "flood": 4},
        "vraAssessment": {"comments": "", "assessor": "K. Lee"},
        "salesEvidence": [{"address": "3 Rail Parade", "price": 640000}],
        "rentalAssessment": {"weekly_rent": 650, "source": "agent"},
        "generalComments": "No significant risks. Strong market evidence supports a \
                            confident valuation and excellent marketability.",
        "sections": {"summary": {"body": ""}, "location": {"suburb": "Carlton"}}
    })
}

/// A complete report with nothing to flag.
pub fn clean_report() -> Value {
    json!({
        "propertyData": {
            "kitchen_condition": "good",
            "structural_condition": "good",
            "external_factors": ["park"]
        },
        "riskRatings": {"structural": 2, "location": 3},
        "vraAssessment": {"comments": ""},
        "salesEvidence": [{}, {}, {}],
        "rentalAssessment": {"weekly_rent": 720},
        "generalComments": "Well presented dwelling in an established street.",
        "sections": {"summary": {"body": "Complete."}}
    })
}

// Re-export commonly used crates for convenience
pub use tempfile;
