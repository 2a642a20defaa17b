//! Risk summaries and standalone risk analysis
//!
//! Generator output is free text. Both parsers accept a bare JSON object,
//! one wrapped in a code fence, or one embedded in prose.

use std::sync::Arc;

use chrono::Utc;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use shared_types::{Extraction, RiskAssessment, RiskFinding, RiskLevel, RiskSummary, Severity};
use thiserror::Error;

use crate::config::WorkflowConfig;
use crate::context::SessionContext;
use crate::error::WorkflowError;
use crate::orchestrator::generate_with_timeout;
use crate::prompts::analysis_prompt;
use crate::services::TextGenerator;
use crate::store::ContractStore;

lazy_static! {
    static ref RISK_SCORE: Regex =
        Regex::new(r"(?i)risk\s*score\D{0,20}?(\d{1,3})").unwrap();
}

/// The optional risk summary could not be produced
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Risk summary unavailable: {0}")]
pub struct RiskSummaryUnavailable(pub String);

/// Parse a risk summary from generator output.
///
/// Tries the whole response as JSON first, then the first `{...}` block in it.
pub fn parse_risk_summary(text: &str) -> Result<RiskSummary, RiskSummaryUnavailable> {
    parse_json_object(text).map_err(RiskSummaryUnavailable)
}

fn parse_json_object<T: serde::de::DeserializeOwned>(text: &str) -> Result<T, String> {
    let strict_error = match serde_json::from_str(text.trim()) {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };
    let block = first_json_object(text).ok_or_else(|| format!("no JSON object in response ({})", strict_error))?;
    serde_json::from_str(block).map_err(|e| e.to_string())
}

/// First balanced `{...}` block in `text`, skipping braces inside strings
fn first_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }
    None
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalysisPayload {
    overall_score: f64,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    findings: Vec<FindingPayload>,
}

#[derive(Debug, Deserialize)]
struct FindingPayload {
    title: String,
    #[serde(default)]
    severity: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    recommendation: String,
    #[serde(default)]
    clause: Option<String>,
}

fn parse_severity(raw: &str) -> Severity {
    match raw.trim().to_lowercase().as_str() {
        "low" => Severity::Low,
        "high" => Severity::High,
        "critical" => Severity::Critical,
        _ => Severity::Medium,
    }
}

fn clamp_score(score: f64) -> u8 {
    if score.is_nan() {
        return 0;
    }
    score.round().clamp(0.0, 100.0) as u8
}

/// What could be recovered from an analysis response
#[derive(Debug, Clone, PartialEq)]
struct ParsedAnalysis {
    score: u8,
    summary: Option<String>,
    findings: Vec<RiskFinding>,
    extraction: Extraction,
}

fn parse_analysis(text: &str) -> Option<ParsedAnalysis> {
    if let Ok(payload) = parse_json_object::<AnalysisPayload>(text) {
        let findings = payload
            .findings
            .into_iter()
            .map(|f| RiskFinding {
                title: f.title,
                severity: parse_severity(&f.severity),
                description: f.description,
                recommendation: f.recommendation,
                clause: f.clause.filter(|c| !c.trim().is_empty()),
            })
            .collect();
        return Some(ParsedAnalysis {
            score: clamp_score(payload.overall_score),
            summary: payload.summary.filter(|s| !s.trim().is_empty()),
            findings,
            extraction: Extraction::Structured,
        });
    }

    let captures = RISK_SCORE.captures(text)?;
    let score: f64 = captures.get(1)?.as_str().parse().ok()?;
    Some(ParsedAnalysis {
        score: clamp_score(score),
        summary: None,
        findings: Vec::new(),
        extraction: Extraction::ScoreOnly,
    })
}

/// Standalone risk analysis of contract text
pub struct RiskAnalyzer {
    generator: Arc<dyn TextGenerator>,
    store: Arc<dyn ContractStore>,
    config: WorkflowConfig,
}

impl RiskAnalyzer {
    pub fn new(generator: Arc<dyn TextGenerator>, store: Arc<dyn ContractStore>, config: WorkflowConfig) -> Self {
        Self {
            generator,
            store,
            config,
        }
    }

    /// Analyse `text` and return the full assessment.
    ///
    /// The result is unredacted; show it through
    /// [`entitlement_gate::redact_assessment`]. Persisting it is best-effort.
    pub async fn analyze(
        &self,
        ctx: &SessionContext,
        text: &str,
        contract_id: Option<&str>,
    ) -> Result<RiskAssessment, WorkflowError> {
        if text.trim().is_empty() {
            return Err(WorkflowError::EmptyDocument);
        }

        let response = generate_with_timeout(
            self.generator.as_ref(),
            &analysis_prompt(text),
            self.config.analysis_max_tokens,
            self.config.generation_timeout,
        )
        .await
        .map_err(|e| WorkflowError::GenerationFailed(e.to_string()))?;

        let parsed = parse_analysis(&response)
            .ok_or_else(|| WorkflowError::GenerationFailed("analysis response had no risk score".to_string()))?;
        if parsed.extraction == Extraction::ScoreOnly {
            tracing::warn!("Risk analysis returned unstructured output, kept score only");
        }

        let assessment = RiskAssessment {
            id: uuid::Uuid::new_v4().to_string(),
            contract_id: contract_id.map(str::to_string),
            user_id: ctx.user_id().to_string(),
            overall_score: parsed.score,
            risk_level: RiskLevel::from_score(parsed.score),
            findings: parsed.findings,
            summary: parsed.summary,
            extraction: parsed.extraction,
            created_at: Utc::now(),
        };

        if let Err(e) = self.store.save_assessment(&assessment).await {
            tracing::warn!("Failed to persist risk assessment {}: {}", assessment.id, e);
        }
        tracing::info!(
            "Risk analysis {} scored {} ({} findings)",
            assessment.id,
            assessment.overall_score,
            assessment.findings.len()
        );
        Ok(assessment)
    }
}
