use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Leading integer of a message body, e.g. the `2` in "CRITICAL: 2 high risk factors".
static COUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s+high risk factors").unwrap());

/// First dollar figure, allowing thousands separators.
static DOLLAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$(\d+(?:,\d+)*(?:\.\d+)?)").unwrap());

/// Leading count in a sales evidence message ("only 2 sales recorded").
static SALES_COUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s+sales").unwrap());

/// What a contradiction is about, carrying the figures a fix needs.
///
/// The checker builds these directly; messages that arrive as plain text are
/// mapped back with [`ContradictionKind::classify`].
#[derive(Debug, Clone, PartialEq)]
pub enum ContradictionKind {
    UninhabitableWithRent { weekly_rent: f64 },
    HighRiskMissingVra { high_risk_count: usize },
    NarrativeDeniesRisk { high_risk_count: usize },
    ConfidenceDespiteStructuralIssues,
    StrongEvidenceFromFewSales { sales_count: usize },
    MarketabilityDespiteExternals,
    Unrecognised,
}

impl ContradictionKind {
    /// Recover the kind of a contradiction from its message.
    ///
    /// Rules are tried in order and the first whose two markers both appear
    /// wins. Markers match regardless of case. Figures that cannot be read
    /// default to zero.
    pub fn classify(message: &str) -> Self {
        let lower = message.to_lowercase();
        let has = |a: &str, b: &str| lower.contains(a) && lower.contains(b);

        if has("uninhabitable", "rental income") {
            Self::UninhabitableWithRent {
                weekly_rent: extract_dollar_amount(message),
            }
        } else if has("high risk factors", "no vra comments") {
            Self::HighRiskMissingVra {
                high_risk_count: extract_count(&COUNT_RE, message),
            }
        } else if has("general comments claim low/no risks", "high risk factors") {
            Self::NarrativeDeniesRisk {
                high_risk_count: extract_count(&COUNT_RE, message),
            }
        } else if has("high valuation confidence", "poor structural conditions") {
            Self::ConfidenceDespiteStructuralIssues
        } else if has("strong market evidence", "limited sales comparables") {
            Self::StrongEvidenceFromFewSales {
                sales_count: extract_count(&SALES_COUNT_RE, message),
            }
        } else if has("excellent marketability", "negative external factors") {
            Self::MarketabilityDespiteExternals
        } else {
            Self::Unrecognised
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UninhabitableWithRent { .. } => "uninhabitable_with_rent",
            Self::HighRiskMissingVra { .. } => "high_risk_missing_vra",
            Self::NarrativeDeniesRisk { .. } => "narrative_denies_risk",
            Self::ConfidenceDespiteStructuralIssues => "confidence_despite_structural_issues",
            Self::StrongEvidenceFromFewSales { .. } => "strong_evidence_from_few_sales",
            Self::MarketabilityDespiteExternals => "marketability_despite_externals",
            Self::Unrecognised => "unrecognised",
        }
    }
}

impl std::fmt::Display for ContradictionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn extract_count(re: &Regex, message: &str) -> usize {
    re.captures(message)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

fn extract_dollar_amount(message: &str) -> f64 {
    DOLLAR_RE
        .captures(message)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().replace(',', "").parse().ok())
        .unwrap_or(0.0)
}

/// A critical inconsistency between report fields.
///
/// Serialized as its message only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Contradiction {
    pub kind: ContradictionKind,
    pub message: String,
}

impl Contradiction {
    pub fn new(kind: ContradictionKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<String> for Contradiction {
    fn from(message: String) -> Self {
        Self {
            kind: ContradictionKind::classify(&message),
            message,
        }
    }
}

impl From<&str> for Contradiction {
    fn from(message: &str) -> Self {
        Self::from(message.to_string())
    }
}

impl From<Contradiction> for String {
    fn from(contradiction: Contradiction) -> Self {
        contradiction.message
    }
}

impl std::fmt::Display for Contradiction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarningKind {
    BriefVraComments { characters: usize },
    LimitedSalesEvidence { sales_count: usize },
    MarketabilityDespiteExternals,
    IncompleteSections { sections: Vec<String> },
    Other,
}

/// A non-blocking consistency or completeness concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    pub fn new(kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<String> for Warning {
    fn from(message: String) -> Self {
        Self {
            kind: WarningKind::Other,
            message,
        }
    }
}

impl From<&str> for Warning {
    fn from(message: &str) -> Self {
        Self::from(message.to_string())
    }
}

impl From<Warning> for String {
    fn from(warning: Warning) -> Self {
        warning.message
    }
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Output of one consistency check over a report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContradictionResult {
    #[serde(default)]
    pub has_contradictions: bool,
    #[serde(default)]
    pub contradictions: Vec<Contradiction>,
    #[serde(default)]
    pub warnings: Vec<Warning>,
}

impl ContradictionResult {
    pub fn new(contradictions: Vec<Contradiction>, warnings: Vec<Warning>) -> Self {
        Self {
            has_contradictions: !contradictions.is_empty(),
            contradictions,
            warnings,
        }
    }

    /// Build a result from plain messages, classifying each contradiction.
    pub fn from_messages<C, W>(contradictions: C, warnings: W) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
        W: IntoIterator,
        W::Item: Into<String>,
    {
        Self::new(
            contradictions
                .into_iter()
                .map(|m| Contradiction::from(m.into()))
                .collect(),
            warnings.into_iter().map(|m| Warning::from(m.into())).collect(),
        )
    }

    pub fn is_clean(&self) -> bool {
        self.contradictions.is_empty() && self.warnings.is_empty()
    }

    pub fn contradiction_messages(&self) -> Vec<&str> {
        self.contradictions.iter().map(|c| c.message.as_str()).collect()
    }

    pub fn warning_messages(&self) -> Vec<&str> {
        self.warnings.iter().map(|w| w.message.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_uninhabitable_reads_dollar_amount() {
        let kind = ContradictionKind::classify(
            "CRITICAL: Property is marked as uninhabitable but shows rental income of $1,250/week.",
        );
        assert_eq!(
            kind,
            ContradictionKind::UninhabitableWithRent {
                weekly_rent: 1250.0
            }
        );
    }

    #[test]
    fn classify_missing_dollar_amount_defaults_to_zero() {
        let kind = ContradictionKind::classify("uninhabitable home with rental income");
        assert_eq!(
            kind,
            ContradictionKind::UninhabitableWithRent { weekly_rent: 0.0 }
        );
    }

    #[test]
    fn classify_reads_high_risk_count() {
        let kind = ContradictionKind::classify(
            "CRITICAL: 3 high risk factors identified but no VRA comments provided.",
        );
        assert_eq!(
            kind,
            ContradictionKind::HighRiskMissingVra { high_risk_count: 3 }
        );
    }

    #[test]
    fn classify_ignores_case() {
        let kind = ContradictionKind::classify(
            "critical: 2 HIGH RISK FACTORS identified but no vra comments provided.",
        );
        assert_eq!(
            kind,
            ContradictionKind::HighRiskMissingVra { high_risk_count: 2 }
        );
    }

    #[test]
    fn classify_first_rule_wins() {
        // Carries markers for both the VRA and the narrative rule.
        let kind = ContradictionKind::classify(
            "General comments claim low/no risks; 2 high risk factors and no VRA comments",
        );
        assert_eq!(
            kind,
            ContradictionKind::HighRiskMissingVra { high_risk_count: 2 }
        );
    }

    #[test]
    fn classify_needs_both_markers() {
        assert_eq!(
            ContradictionKind::classify("excellent marketability throughout"),
            ContradictionKind::Unrecognised
        );
        assert_eq!(
            ContradictionKind::classify("Incomplete sections detected: summary"),
            ContradictionKind::Unrecognised
        );
    }

    #[test]
    fn contradiction_serializes_as_message() {
        let c = Contradiction::new(ContradictionKind::ConfidenceDespiteStructuralIssues, "msg");
        assert_eq!(serde_json::to_value(&c).unwrap(), serde_json::json!("msg"));
    }

    #[test]
    fn result_deserializes_from_strings() {
        let result: ContradictionResult = serde_json::from_str(
            r#"{"contradictions": ["CRITICAL: 1 high risk factors identified but no VRA comments provided."], "warnings": ["w"]}"#,
        )
        .unwrap();
        assert_eq!(
            result.contradictions[0].kind,
            ContradictionKind::HighRiskMissingVra { high_risk_count: 1 }
        );
        assert_eq!(result.warning_messages(), vec!["w"]);
    }

    #[test]
    fn from_messages_sets_flag() {
        let empty = ContradictionResult::from_messages(Vec::<String>::new(), vec!["w"]);
        assert!(!empty.has_contradictions);
        assert!(!empty.is_clean());

        let some = ContradictionResult::from_messages(vec!["x"], Vec::<String>::new());
        assert!(some.has_contradictions);
    }
}
