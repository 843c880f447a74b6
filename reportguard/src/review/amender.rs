//! Best-effort automatic fixes for detected contradictions.
//!
//! The amender works on its own copy of the report. Each contradiction is
//! mapped to at most one fix by its [`ContradictionKind`]; the fix proposes an
//! [`Amendment`] which is then written into the copy by field path. Anything
//! without a fix is handed back untouched for the caller to deal with.

use serde_json::{json, Value};

use crate::models::{
    Amendment, AmendmentResult, AmendmentType, Confidence, Contradiction, ContradictionKind,
    ContradictionResult, ReportData,
};

use super::narrative::{
    append_sentence, apply_rewrites, strip_phrases, CONFIDENCE_REWRITES, MARKETABILITY_REWRITES,
    MARKET_EVIDENCE_REWRITES, RISK_DENIAL_PHRASES,
};

const WEEKLY_RENT_FIELD: &str = "rentalAssessment.weekly_rent";
const VRA_COMMENTS_FIELD: &str = "vraAssessment.comments";
const GENERAL_COMMENTS_FIELD: &str = "generalComments";

pub struct ContradictionAmender {
    working: ReportData,
}

impl ContradictionAmender {
    /// Start from a private copy of `report`; the caller's value is never modified.
    pub fn new(report: &ReportData) -> Self {
        Self {
            working: report.clone(),
        }
    }

    /// Attempt a fix for every contradiction in `contradictions`, in order.
    ///
    /// Warnings are not amended. Fixes never re-run the checker, so an applied
    /// amendment may still leave (or introduce) other findings.
    pub async fn amend_contradictions(
        mut self,
        contradictions: &ContradictionResult,
    ) -> AmendmentResult {
        let mut amendments = Vec::new();
        let mut unresolved = Vec::new();

        for contradiction in &contradictions.contradictions {
            let Some(amendment) = self.propose(contradiction) else {
                tracing::debug!(message = %contradiction.message, "No automatic fix available");
                unresolved.push(contradiction.message.clone());
                continue;
            };

            match self
                .working
                .set_path(&amendment.field, amendment.amended_value.clone())
            {
                Ok(()) => {
                    tracing::debug!(
                        kind = %contradiction.kind,
                        field = %amendment.field,
                        confidence = %amendment.confidence,
                        "Amendment applied"
                    );
                    amendments.push(amendment);
                }
                Err(e) => {
                    tracing::warn!(
                        field = %amendment.field,
                        error = %e,
                        "Failed to apply amendment"
                    );
                    unresolved.push(contradiction.message.clone());
                }
            }
        }

        tracing::info!(
            amended = amendments.len(),
            unresolved = unresolved.len(),
            "Amendment run complete"
        );

        AmendmentResult::new(self.working, amendments, unresolved)
    }

    fn propose(&self, contradiction: &Contradiction) -> Option<Amendment> {
        match &contradiction.kind {
            ContradictionKind::UninhabitableWithRent { weekly_rent } => {
                Some(self.zero_rental_income(*weekly_rent))
            }
            ContradictionKind::HighRiskMissingVra { high_risk_count } => {
                Some(self.add_vra_commentary(*high_risk_count))
            }
            ContradictionKind::NarrativeDeniesRisk { high_risk_count } => {
                Some(self.acknowledge_risks(*high_risk_count))
            }
            ContradictionKind::ConfidenceDespiteStructuralIssues => Some(self.rewrite_narrative(
                "Moderated valuation confidence language to reflect poor structural condition",
                |text| {
                    append_sentence(
                        &apply_rewrites(text, CONFIDENCE_REWRITES),
                        "Structural condition factors have been considered in forming this valuation.",
                    )
                },
                Confidence::High,
            )),
            ContradictionKind::StrongEvidenceFromFewSales { .. } => Some(self.rewrite_narrative(
                "Moderated market evidence claims to reflect limited sales comparables",
                |text| apply_rewrites(text, MARKET_EVIDENCE_REWRITES),
                Confidence::Medium,
            )),
            ContradictionKind::MarketabilityDespiteExternals => Some(self.rewrite_narrative(
                "Moderated marketability claims to reflect negative external factors",
                |text| {
                    append_sentence(
                        &apply_rewrites(text, MARKETABILITY_REWRITES),
                        "External factors affecting the property may impact its marketability.",
                    )
                },
                Confidence::Medium,
            )),
            ContradictionKind::Unrecognised => None,
        }
    }

    fn zero_rental_income(&self, weekly_rent: f64) -> Amendment {
        auto_fix(
            format!(
                "Set weekly rent to $0 because an uninhabitable property cannot generate rental \
                 income (was ${weekly_rent}/week)"
            ),
            WEEKLY_RENT_FIELD,
            self.current(WEEKLY_RENT_FIELD)
                .unwrap_or_else(|| amount_value(weekly_rent)),
            json!(0),
            Confidence::High,
        )
    }

    fn add_vra_commentary(&self, high_risk_count: usize) -> Amendment {
        auto_fix(
            format!("Added VRA commentary addressing {high_risk_count} high risk factors"),
            VRA_COMMENTS_FIELD,
            self.current(VRA_COMMENTS_FIELD).unwrap_or(Value::Null),
            Value::String(vra_commentary(high_risk_count)),
            Confidence::Medium,
        )
    }

    fn acknowledge_risks(&self, high_risk_count: usize) -> Amendment {
        self.rewrite_narrative(
            &format!(
                "Removed low/no risk claims from general comments and acknowledged \
                 {high_risk_count} high risk factors"
            ),
            |text| {
                append_sentence(
                    &strip_phrases(text, RISK_DENIAL_PHRASES),
                    &format!(
                        "However, {high_risk_count} significant risk factors have been identified \
                         in the risk ratings and require ongoing monitoring."
                    ),
                )
            },
            Confidence::High,
        )
    }

    /// Build a `generalComments` amendment from the working copy's current narrative.
    fn rewrite_narrative(
        &self,
        description: &str,
        rewrite: impl FnOnce(&str) -> String,
        confidence: Confidence,
    ) -> Amendment {
        let current = self.working.general_comments.as_deref().unwrap_or_default();
        auto_fix(
            description.to_string(),
            GENERAL_COMMENTS_FIELD,
            self.current(GENERAL_COMMENTS_FIELD).unwrap_or(Value::Null),
            Value::String(rewrite(current)),
            confidence,
        )
    }

    fn current(&self, field: &str) -> Option<Value> {
        self.working.get_path(field).ok().flatten()
    }
}

/// Convenience wrapper: amend a copy of `report` against `contradictions`.
pub async fn run_automated_amendment(
    report: &ReportData,
    contradictions: &ContradictionResult,
) -> AmendmentResult {
    ContradictionAmender::new(report)
        .amend_contradictions(contradictions)
        .await
}

fn auto_fix(
    description: String,
    field: &str,
    original_value: Value,
    amended_value: Value,
    confidence: Confidence,
) -> Amendment {
    Amendment {
        amendment_type: AmendmentType::AutoFix,
        description,
        field: field.to_string(),
        original_value,
        amended_value,
        confidence,
    }
}

fn amount_value(amount: f64) -> Value {
    if amount.fract() == 0.0 && amount.abs() < i64::MAX as f64 {
        json!(amount as i64)
    } else {
        json!(amount)
    }
}

fn vra_commentary(high_risk_count: usize) -> String {
    format!(
        "This property has been assessed with {high_risk_count} high risk factors that require \
         careful consideration. Each identified risk has been reviewed against the property's \
         physical condition and location. The valuation reflects the potential impact of these \
         risks on marketability and value. Lenders should review the individual risk ratings \
         before relying on this report. Specialist investigation is recommended where the \
         identified risks may materially affect the security."
    )
}
