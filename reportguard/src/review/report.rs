use crate::models::ContradictionResult;

pub const CLEAN_REPORT: &str = "✅ No contradictions or warnings detected in report.";

/// Render a check result as text for display alongside the report editor.
pub fn generate_contradiction_report(result: &ContradictionResult) -> String {
    if result.is_clean() {
        return CLEAN_REPORT.to_string();
    }

    let mut blocks = Vec::new();

    if !result.contradictions.is_empty() {
        blocks.push(numbered_block(
            "🚨 CRITICAL CONTRADICTIONS FOUND:",
            result.contradictions.iter().map(|c| c.message.as_str()),
        ));
    }

    if !result.warnings.is_empty() {
        blocks.push(numbered_block(
            "⚠️ WARNINGS:",
            result.warnings.iter().map(|w| w.message.as_str()),
        ));
    }

    blocks.join("\n\n")
}

fn numbered_block<'a>(header: &str, messages: impl Iterator<Item = &'a str>) -> String {
    let mut lines = vec![header.to_string()];
    lines.extend(
        messages
            .enumerate()
            .map(|(i, message)| format!("{}. {message}", i + 1)),
    );
    lines.join("\n")
}
