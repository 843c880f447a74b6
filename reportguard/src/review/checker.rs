//! Rule-based consistency checks over a report snapshot.
//!
//! Every rule is independent and guards on the fields it reads, so a sparse
//! report simply produces fewer findings. Rules always run in the same order,
//! which fixes the order of the resulting messages.

use serde_json::Value;

use crate::models::{
    Contradiction, ContradictionKind, ContradictionResult, ReportData, Warning, WarningKind,
};

use super::narrative::{
    contains_any, CONFIDENCE_PHRASES, MARKETABILITY_PHRASES, MARKET_EVIDENCE_PHRASES,
    RISK_DENIAL_PHRASES,
};

/// Ratings at or above this are high risk.
pub const HIGH_RISK_THRESHOLD: f64 = 4.0;
/// Fewer comparable sales than this do not support "strong evidence" claims.
pub const MIN_SALES_COMPARABLES: usize = 3;
/// VRA commentary shorter than this (once trimmed) is flagged as brief.
pub const MIN_VRA_COMMENT_CHARS: usize = 50;

const UNINHABITABLE_KITCHEN: &[&str] = &["missing", "none"];
const UNINHABITABLE_STRUCTURE: &str = "very_poor";
const POOR_STRUCTURE: &[&str] = &["poor", "very_poor"];
const NEGATIVE_EXTERNAL_FACTORS: &[&str] = &["main_road", "power_lines", "industrial"];

#[derive(Default)]
struct Findings {
    contradictions: Vec<Contradiction>,
    warnings: Vec<Warning>,
}

impl Findings {
    fn contradiction(&mut self, kind: ContradictionKind, message: String) {
        tracing::debug!(kind = %kind, "Contradiction detected");
        self.contradictions.push(Contradiction::new(kind, message));
    }

    fn warning(&mut self, kind: WarningKind, message: String) {
        tracing::debug!(?kind, "Warning raised");
        self.warnings.push(Warning::new(kind, message));
    }
}

/// Check a report for contradictions and warnings.
///
/// Never fails: absent fields skip the rules that need them.
pub fn check_report_contradictions(report: &ReportData) -> ContradictionResult {
    let mut findings = Findings::default();
    let narrative = report.general_comments.as_deref().map(str::to_lowercase);
    let narrative = narrative.as_deref();

    check_uninhabitable_with_rent(report, &mut findings);
    check_high_risk_vra_comments(report, &mut findings);
    check_narrative_against_risk_ratings(report, narrative, &mut findings);
    check_sales_evidence_against_narrative(report, narrative, &mut findings);
    check_structural_condition_against_confidence(report, narrative, &mut findings);
    check_external_factors_against_marketability(report, narrative, &mut findings);
    check_incomplete_sections(report, &mut findings);

    ContradictionResult::new(findings.contradictions, findings.warnings)
}

/// An uninhabitable property cannot earn rent.
fn check_uninhabitable_with_rent(report: &ReportData, findings: &mut Findings) {
    let (Some(property), Some(rental)) = (&report.property_data, &report.rental_assessment) else {
        return;
    };

    let kitchen_missing = property
        .kitchen_condition
        .as_deref()
        .is_some_and(|k| UNINHABITABLE_KITCHEN.contains(&k));
    let structurally_unsound =
        property.structural_condition.as_deref() == Some(UNINHABITABLE_STRUCTURE);
    let weekly_rent = rental.weekly_rent_amount().unwrap_or(0.0);

    if (kitchen_missing || structurally_unsound) && weekly_rent > 0.0 {
        findings.contradiction(
            ContradictionKind::UninhabitableWithRent { weekly_rent },
            format!(
                "CRITICAL: Property is marked as uninhabitable but shows rental income of ${}/week. \
                 Uninhabitable properties cannot generate rental income.",
                format_amount(weekly_rent)
            ),
        );
    }
}

/// High-risk ratings require VRA commentary, and brief commentary is flagged.
fn check_high_risk_vra_comments(report: &ReportData, findings: &mut Findings) {
    let (Some(_), Some(vra)) = (&report.risk_ratings, &report.vra_assessment) else {
        return;
    };

    let high_risk_count = report.risk_ratings_at_least(HIGH_RISK_THRESHOLD);
    if high_risk_count == 0 {
        return;
    }

    let comments = vra.trimmed_comments();
    let characters = comments.chars().count();

    if characters == 0 {
        findings.contradiction(
            ContradictionKind::HighRiskMissingVra { high_risk_count },
            format!(
                "CRITICAL: {high_risk_count} high risk factors identified but no VRA comments provided. \
                 VRA commentary is mandatory for high-risk properties."
            ),
        );
    }

    if characters > 0 && characters < MIN_VRA_COMMENT_CHARS {
        findings.warning(
            WarningKind::BriefVraComments { characters },
            format!(
                "VRA comments are brief ({characters} characters) for a property with \
                 {high_risk_count} high risk factors. Consider expanding the commentary."
            ),
        );
    }
}

/// The narrative must not wave away risks the ratings flag.
fn check_narrative_against_risk_ratings(
    report: &ReportData,
    narrative: Option<&str>,
    findings: &mut Findings,
) {
    let (Some(narrative), Some(_)) = (narrative, &report.risk_ratings) else {
        return;
    };

    let high_risk_count = report.risk_ratings_at_least(HIGH_RISK_THRESHOLD);
    if high_risk_count > 0 && contains_any(narrative, RISK_DENIAL_PHRASES) {
        findings.contradiction(
            ContradictionKind::NarrativeDeniesRisk { high_risk_count },
            format!(
                "CRITICAL: General comments claim low/no risks but {high_risk_count} high risk \
                 factors were identified in the risk ratings."
            ),
        );
    }
}

fn check_sales_evidence_against_narrative(
    report: &ReportData,
    narrative: Option<&str>,
    findings: &mut Findings,
) {
    let (Some(sales), Some(narrative)) = (&report.sales_evidence, narrative) else {
        return;
    };

    let sales_count = sales.len();
    if sales_count < MIN_SALES_COMPARABLES && contains_any(narrative, MARKET_EVIDENCE_PHRASES) {
        findings.warning(
            WarningKind::LimitedSalesEvidence { sales_count },
            format!(
                "General comments claim strong market evidence but only {sales_count} sales \
                 recorded (limited sales comparables)."
            ),
        );
    }
}

fn check_structural_condition_against_confidence(
    report: &ReportData,
    narrative: Option<&str>,
    findings: &mut Findings,
) {
    let (Some(property), Some(narrative)) = (&report.property_data, narrative) else {
        return;
    };

    let Some(condition) = property
        .structural_condition
        .as_deref()
        .filter(|c| POOR_STRUCTURE.contains(c))
    else {
        return;
    };

    if contains_any(narrative, CONFIDENCE_PHRASES) {
        findings.contradiction(
            ContradictionKind::ConfidenceDespiteStructuralIssues,
            format!(
                "CRITICAL: General comments express high valuation confidence despite poor \
                 structural conditions ({condition})."
            ),
        );
    }
}

fn check_external_factors_against_marketability(
    report: &ReportData,
    narrative: Option<&str>,
    findings: &mut Findings,
) {
    let (Some(property), Some(narrative)) = (&report.property_data, narrative) else {
        return;
    };

    let negatives: Vec<&str> = property
        .external_factors
        .iter()
        .flatten()
        .map(String::as_str)
        .filter(|f| NEGATIVE_EXTERNAL_FACTORS.contains(f))
        .collect();

    if !negatives.is_empty() && contains_any(narrative, MARKETABILITY_PHRASES) {
        findings.warning(
            WarningKind::MarketabilityDespiteExternals,
            format!(
                "General comments claim excellent marketability despite negative external \
                 factors ({}).",
                negatives.join(", ")
            ),
        );
    }
}

/// Sections with a blank value, or a blank member, are incomplete.
fn check_incomplete_sections(report: &ReportData, findings: &mut Findings) {
    let Some(sections) = &report.sections else {
        return;
    };

    let incomplete: Vec<String> = sections
        .iter()
        .filter(|(_, value)| match value {
            Value::Object(fields) => fields.values().any(is_blank),
            other => is_blank(other),
        })
        .map(|(name, _)| name.clone())
        .collect();

    if !incomplete.is_empty() {
        let message = format!("Incomplete sections detected: {}", incomplete.join(", "));
        findings.warning(
            WarningKind::IncompleteSections {
                sections: incomplete,
            },
            message,
        );
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Dollar amount with thousands separators; cents only when present.
fn format_amount(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (digits, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if amount < 0.0 && fixed != "0.00" {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if cents == "00" {
        grouped
    } else {
        format!("{grouped}.{cents}")
    }
}
