//! Plan-dependent view of a risk assessment

use chrono::{DateTime, Utc};
use serde::Serialize;
use shared_types::{Extraction, Plan, RiskAssessment, RiskFinding, RiskLevel, Severity};

/// Findings a user without a paid plan may see
pub const FREE_FINDING_LIMIT: usize = 2;

/// Characters of each description shown without a paid plan
pub const DESCRIPTION_PREVIEW_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FindingView {
    pub title: String,
    pub severity: Severity,
    pub description: String,
    /// `None` when the plan does not include recommendations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clause: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessmentView {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_id: Option<String>,
    pub overall_score: u8,
    pub risk_level: RiskLevel,
    pub findings: Vec<FindingView>,
    /// Findings withheld from this view
    pub hidden_findings: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub extraction: Extraction,
    pub created_at: DateTime<Utc>,
}

/// Filter an assessment for a viewer on `plan`.
///
/// Paid plans see everything. Others get the first two findings only, with
/// descriptions cut to 100 characters and no recommendations. Score, level
/// and summary are never withheld.
pub fn redact_assessment(plan: Plan, assessment: &RiskAssessment) -> RiskAssessmentView {
    let full = plan.is_paid();
    let findings: Vec<FindingView> = if full {
        assessment.findings.iter().map(full_finding).collect()
    } else {
        assessment
            .findings
            .iter()
            .take(FREE_FINDING_LIMIT)
            .map(redacted_finding)
            .collect()
    };

    RiskAssessmentView {
        id: assessment.id.clone(),
        contract_id: assessment.contract_id.clone(),
        overall_score: assessment.overall_score,
        risk_level: assessment.risk_level,
        hidden_findings: assessment.findings.len() - findings.len(),
        findings,
        summary: assessment.summary.clone(),
        extraction: assessment.extraction,
        created_at: assessment.created_at,
    }
}

fn full_finding(finding: &RiskFinding) -> FindingView {
    FindingView {
        title: finding.title.clone(),
        severity: finding.severity,
        description: finding.description.clone(),
        recommendation: Some(finding.recommendation.clone()),
        clause: finding.clause.clone(),
    }
}

fn redacted_finding(finding: &RiskFinding) -> FindingView {
    FindingView {
        title: finding.title.clone(),
        severity: finding.severity,
        description: truncate_chars(&finding.description, DESCRIPTION_PREVIEW_CHARS),
        recommendation: None,
        clause: finding.clause.clone(),
    }
}

/// Cut to `limit` characters (not bytes), marking the cut with `...`
fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((byte_index, _)) => format!("{}...", &text[..byte_index]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn finding(i: usize, description: &str) -> RiskFinding {
        RiskFinding {
            title: format!("Finding {}", i),
            severity: Severity::High,
            description: description.to_string(),
            recommendation: format!("Fix {}", i),
            clause: None,
        }
    }

    fn assessment(findings: Vec<RiskFinding>) -> RiskAssessment {
        RiskAssessment {
            id: "ra-1".to_string(),
            contract_id: Some("c-1".to_string()),
            user_id: "u-1".to_string(),
            overall_score: 72,
            risk_level: RiskLevel::from_score(72),
            findings,
            summary: Some("Several one-sided clauses".to_string()),
            extraction: Extraction::Structured,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_free_plan_sees_two_truncated_findings() {
        let long = "x".repeat(250);
        let a = assessment(vec![finding(1, &long), finding(2, "short"), finding(3, "hidden")]);
        let view = redact_assessment(Plan::Free, &a);

        assert_eq!(view.findings.len(), 2);
        assert_eq!(view.hidden_findings, 1);
        assert_eq!(view.findings[0].description, format!("{}...", "x".repeat(100)));
        assert_eq!(view.findings[1].description, "short");
        assert!(view.findings.iter().all(|f| f.recommendation.is_none()));
        assert_eq!(view.overall_score, 72);
        assert_eq!(view.risk_level, RiskLevel::High);
    }

    #[test]
    fn test_paid_plans_see_everything() {
        let long = "y".repeat(250);
        let a = assessment(vec![finding(1, &long), finding(2, "b"), finding(3, "c")]);
        for plan in [Plan::Basic, Plan::AiPlus, Plan::Team, Plan::Unlimited] {
            let view = redact_assessment(plan, &a);
            assert_eq!(view.findings.len(), 3);
            assert_eq!(view.hidden_findings, 0);
            assert_eq!(view.findings[0].description, long);
            assert_eq!(view.findings[2].recommendation.as_deref(), Some("Fix 3"));
        }
    }

    #[test]
    fn test_truncation_respects_multibyte_characters() {
        let text = "é".repeat(101);
        let cut = truncate_chars(&text, 100);
        assert_eq!(cut.chars().count(), 103);
        assert_eq!(truncate_chars("ünïcode", 100), "ünïcode");
    }

    #[test]
    fn test_hidden_recommendation_is_not_serialized() {
        let a = assessment(vec![finding(1, "desc")]);
        let json = serde_json::to_value(redact_assessment(Plan::Free, &a)).unwrap();
        assert!(json["findings"][0].get("recommendation").is_none());
        assert_eq!(json["hiddenFindings"], 0);
    }
}
