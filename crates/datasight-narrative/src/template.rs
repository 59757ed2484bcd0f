//! Prompts for the enhancer and the deterministic template fallback.

use std::fmt::Write as _;

use datasight_model::{
    AnalysisResult, BusinessDomain, Level, Narrative, NarrativeMode, NarrativeSource,
};

const KEY_FINDINGS: usize = 5;
const PROMPT_RECOMMENDATIONS: usize = 3;

/// Headlines of the most confident insights, strongest first.
pub fn key_findings(result: &AnalysisResult) -> Vec<String> {
    let mut ranked: Vec<_> = result.insights.iter().collect();
    ranked.sort_by(|a, b| {
        b.confidence
            .total_cmp(&a.confidence)
            .then_with(|| a.headline.cmp(&b.headline))
    });
    ranked
        .into_iter()
        .take(KEY_FINDINGS)
        .map(|record| record.headline.clone())
        .collect()
}

fn push_findings(prompt: &mut String, findings: &[String]) {
    prompt.push_str("KEY FINDINGS:\n");
    if findings.is_empty() {
        prompt.push_str("- no notable statistical findings\n");
    }
    for finding in findings {
        let _ = writeln!(prompt, "- {finding}");
    }
}

/// Prompt text for the configured mode.
pub fn build_prompt(result: &AnalysisResult, mode: NarrativeMode) -> String {
    let findings = key_findings(result);
    let mut prompt = String::new();
    match mode {
        NarrativeMode::Summarize => {
            prompt.push_str(
                "You are a senior data analyst. Summarize this analysis for a business audience.\n\n",
            );
            push_findings(&mut prompt, &findings);
            let _ = writeln!(
                prompt,
                "\nCONTEXT:\nDomain: {}\nRows: {}\nData quality score: {:.0}\nOverall risk: {:.2}",
                result.business.domain.as_str(),
                result.dataset.rows,
                result.data_quality.score,
                result.business.risk.overall,
            );
            prompt.push_str(
                "\nREQUIREMENTS:\n- Write 2-3 sentences\n- Use the numbers above\n- End with a next step\n\nSummary:",
            );
        }
        NarrativeMode::RefineRecommendations => {
            prompt.push_str(
                "You are a business consultant. Make these recommendations specific and actionable.\n\n",
            );
            push_findings(&mut prompt, &findings);
            prompt.push_str("\nRECOMMENDATIONS:\n");
            for rec in result.recommendations.iter().take(PROMPT_RECOMMENDATIONS) {
                let _ = writeln!(
                    prompt,
                    "- [{}] {}: {}",
                    rec.priority.as_str(),
                    rec.title,
                    rec.action
                );
            }
            prompt.push_str(
                "\nREQUIREMENTS:\n- One or two sentences per recommendation\n- Keep the original order\n\nRefined recommendations:",
            );
        }
    }
    prompt
}

/// Narrative assembled from the structured result alone.
pub fn template_narrative(result: &AnalysisResult, mode: NarrativeMode) -> Narrative {
    let findings = key_findings(result);
    let mut text = format!(
        "Analysis of {} rows across {} columns",
        result.dataset.rows, result.dataset.columns
    );
    if result.business.domain != BusinessDomain::Generic {
        let _ = write!(text, " in the {} domain", result.business.domain.as_str());
    }
    let _ = write!(
        text,
        " found {} insights with a data quality score of {:.0}.",
        result.insights.len(),
        result.data_quality.score
    );
    if let Some(first) = findings.first() {
        let _ = write!(text, " Most notable: {first}.");
    }
    let high_priority = result
        .recommendations
        .iter()
        .filter(|rec| rec.priority == Level::High)
        .count();
    match mode {
        NarrativeMode::Summarize => {
            if high_priority > 0 {
                let _ = write!(
                    text,
                    " {high_priority} high-priority recommendations call for immediate action."
                );
            }
        }
        NarrativeMode::RefineRecommendations => {
            for rec in &result.recommendations {
                let _ = write!(text, "\n- {} ({}): {}", rec.title, rec.priority.as_str(), rec.action);
            }
        }
    }
    Narrative {
        mode,
        source: NarrativeSource::Template,
        text,
        key_findings: findings,
    }
}
