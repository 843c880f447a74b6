mod common;

use common::{clean_report, contradictory_report, init_test_logger, report};
use pretty_assertions::assert_eq;
use reportguard::{check_report_contradictions, generate_contradiction_report, ReportData};
use serde_json::json;

#[test]
fn test_empty_report_is_clean() {
    init_test_logger();

    let result = check_report_contradictions(&ReportData::default());

    assert!(!result.has_contradictions);
    assert!(result.contradictions.is_empty());
    assert!(result.warnings.is_empty());
    assert_eq!(
        generate_contradiction_report(&result),
        "✅ No contradictions or warnings detected in report."
    );
}

#[test]
fn test_clean_report_has_no_findings() {
    let result = check_report_contradictions(&report(clean_report()));
    assert!(result.is_clean(), "unexpected findings: {result:?}");
}

#[test]
fn test_uninhabitable_property_with_rent() {
    let result = check_report_contradictions(&report(json!({
        "propertyData": {"kitchen_condition": "missing"},
        "rentalAssessment": {"weekly_rent": 500}
    })));

    assert!(result.has_contradictions);
    assert_eq!(result.contradictions.len(), 1);
    let message = &result.contradictions[0].message;
    assert!(message.contains("uninhabitable"));
    assert!(message.contains("500"));
}

#[test]
fn test_rent_given_as_string() {
    let result = check_report_contradictions(&report(json!({
        "propertyData": {"structural_condition": "very_poor"},
        "rentalAssessment": {"weekly_rent": "475"}
    })));
    assert_eq!(result.contradictions.len(), 1);
    assert!(result.contradictions[0].message.contains("$475/week"));
}

#[test]
fn test_high_risk_without_vra_comments() {
    let result = check_report_contradictions(&report(json!({
        "riskRatings": {"structural": 5, "location": 2},
        "vraAssessment": {"comments": ""}
    })));

    assert_eq!(result.contradictions.len(), 1);
    let message = &result.contradictions[0].message;
    assert!(message.contains("1 high risk factors"));
    assert!(message.contains("no VRA comments"));
}

#[test]
fn test_non_numeric_ratings_are_ignored() {
    let result = check_report_contradictions(&report(json!({
        "riskRatings": {"structural": "n/a", "flood": null, "location": "4"},
        "vraAssessment": {"comments": ""}
    })));
    assert_eq!(result.contradictions.len(), 1);
    assert!(result.contradictions[0]
        .message
        .contains("1 high risk factors"));
}

#[test]
fn test_narrative_denial_phrases() {
    let cases = vec![
        ("There are no significant risks.", true),
        ("MINIMAL RISK to the lender.", true),
        ("A low risk profile overall.", true),
        ("No major concerns were noted.", true),
        ("No risks highlighted by the inspection.", true),
        ("A risk-free purchase.", true),
        ("Risks are noted in the schedule.", false),
        ("Moderate risk given the location.", false),
    ];

    for (narrative, expected) in cases {
        let result = check_report_contradictions(&report(json!({
            "riskRatings": {"flood": 4},
            "vraAssessment": {"comments": "The site lies in a mapped flood overlay with two recorded inundation events."},
            "generalComments": narrative
        })));
        assert_eq!(
            result.has_contradictions, expected,
            "Failed for narrative: '{narrative}'"
        );
    }
}

#[test]
fn test_every_rule_fires_on_contradictory_report() {
    let result = check_report_contradictions(&report(contradictory_report()));

    assert_eq!(result.contradictions.len(), 4);
    assert_eq!(
        result.contradiction_messages(),
        vec![
            "CRITICAL: Property is marked as uninhabitable but shows rental income of $650/week. \
             Uninhabitable properties cannot generate rental income.",
            "CRITICAL: 2 high risk factors identified but no VRA comments provided. VRA \
             commentary is mandatory for high-risk properties.",
            "CRITICAL: General comments claim low/no risks but 2 high risk factors were \
             identified in the risk ratings.",
            "CRITICAL: General comments express high valuation confidence despite poor \
             structural conditions (poor).",
        ]
    );
    assert_eq!(
        result.warning_messages(),
        vec![
            "General comments claim strong market evidence but only 1 sales recorded \
             (limited sales comparables).",
            "General comments claim excellent marketability despite negative external \
             factors (main_road).",
            "Incomplete sections detected: summary",
        ]
    );
}

#[test]
fn test_check_is_deterministic() {
    let input = report(contradictory_report());
    assert_eq!(
        check_report_contradictions(&input),
        check_report_contradictions(&input)
    );
}

#[test]
fn test_text_report_lists_contradictions_before_warnings() {
    let result = check_report_contradictions(&report(contradictory_report()));
    let text = generate_contradiction_report(&result);

    let critical = text
        .find("🚨 CRITICAL CONTRADICTIONS FOUND:")
        .expect("critical header");
    let warnings = text.find("⚠️ WARNINGS:").expect("warnings header");
    assert!(critical < warnings);
    assert!(text.contains("\n4. CRITICAL: General comments express high valuation confidence"));
    assert!(text.ends_with("\n3. Incomplete sections detected: summary"));
}

#[test]
fn test_result_wire_format() {
    let result = check_report_contradictions(&report(json!({
        "sections": {"notes": ""}
    })));
    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(
        value,
        json!({
            "hasContradictions": false,
            "contradictions": [],
            "warnings": ["Incomplete sections detected: notes"]
        })
    );
}
