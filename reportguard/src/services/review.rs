use serde::Serialize;
use tracing::Instrument;
use uuid::Uuid;

use crate::config::{ReviewConfig, MAX_REVIEW_PASSES};
use crate::models::{AmendmentResult, ContradictionResult, ReportData};
use crate::review::{
    check_report_contradictions, generate_contradiction_report, run_automated_amendment,
};

/// Result of a full review: the first check, what was amended, and where the
/// report stands afterwards.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewOutcome {
    /// Identifies this review in logs.
    pub review_id: Uuid,
    pub initial: ContradictionResult,
    /// Amendments accumulated over every pass; unresolved items are from the last pass.
    pub amendment: AmendmentResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_check: Option<ContradictionResult>,
    pub passes: u32,
    /// Text rendering of the final check, or of the initial one when no recheck ran.
    pub report: String,
}

/// Runs the checker and amender on behalf of callers and applies the
/// configured re-check policy.
#[derive(Debug, Clone)]
pub struct ReviewService {
    config: ReviewConfig,
}

impl ReviewService {
    pub fn new(config: ReviewConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReviewConfig {
        &self.config
    }

    pub fn check(&self, report: &ReportData) -> ContradictionResult {
        let result = check_report_contradictions(report);
        tracing::info!(
            contradictions = result.contradictions.len(),
            warnings = result.warnings.len(),
            "Report checked"
        );
        result
    }

    /// Amend `report`, checking it first when no result is supplied.
    pub async fn amend(
        &self,
        report: &ReportData,
        contradictions: Option<ContradictionResult>,
    ) -> AmendmentResult {
        let contradictions = contradictions.unwrap_or_else(|| self.check(report));
        run_automated_amendment(report, &contradictions).await
    }

    /// Check and amend repeatedly, up to `max_passes` rounds (the configured
    /// value when `None`), stopping once nothing is left to fix or a round
    /// makes no amendment.
    pub async fn review(&self, report: &ReportData, max_passes: Option<u32>) -> ReviewOutcome {
        let max_passes = max_passes
            .unwrap_or(self.config.max_passes)
            .clamp(1, MAX_REVIEW_PASSES);

        let review_id = Uuid::new_v4();
        self.run_passes(report, max_passes, review_id)
            .instrument(tracing::info_span!("review", %review_id, max_passes))
            .await
    }

    async fn run_passes(
        &self,
        report: &ReportData,
        max_passes: u32,
        review_id: Uuid,
    ) -> ReviewOutcome {
        let initial = self.check(report);
        let mut current = initial.clone();
        let mut data = report.clone();
        let mut amendments = Vec::new();
        let mut unresolved = Vec::new();
        let mut passes = 0;

        while passes < max_passes && current.has_contradictions {
            let round = run_automated_amendment(&data, &current).await;
            passes += 1;

            let progressed = round.success;
            amendments.extend(round.amendments);
            unresolved = round.unresolved;
            data = round.amended_data;

            if !progressed {
                break;
            }
            if passes < max_passes {
                current = check_report_contradictions(&data);
            }
        }

        let final_check = self
            .config
            .recheck_after_amend
            .then(|| check_report_contradictions(&data));
        let report_text = generate_contradiction_report(final_check.as_ref().unwrap_or(&initial));

        tracing::info!(
            passes,
            amendments = amendments.len(),
            unresolved = unresolved.len(),
            "Review complete"
        );

        ReviewOutcome {
            review_id,
            initial,
            amendment: AmendmentResult::new(data, amendments, unresolved),
            final_check,
            passes,
            report: report_text,
        }
    }
}

impl Default for ReviewService {
    fn default() -> Self {
        Self::new(ReviewConfig::default())
    }
}
