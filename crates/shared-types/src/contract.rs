//! The generated contract artifact and its delivery lifecycle

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::collaborator::Collaborator;
use crate::jurisdiction::JurisdictionCode;
use crate::money::Money;
use crate::template::FormValues;

/// Delivery lifecycle: `draft -> generated -> purchased -> downloaded`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractStatus {
    Draft,
    Generated,
    Purchased,
    Downloaded,
}

impl ContractStatus {
    /// Payment has been confirmed (downloaded implies purchased)
    pub fn is_purchased(&self) -> bool {
        matches!(self, ContractStatus::Purchased | ContractStatus::Downloaded)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContractStatus::Draft => "draft",
            ContractStatus::Generated => "generated",
            ContractStatus::Purchased => "purchased",
            ContractStatus::Downloaded => "downloaded",
        }
    }
}

impl std::fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Best-effort commentary produced alongside the contract body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskSummary {
    pub purpose: String,
    pub common_mistakes: Vec<String>,
    pub key_clauses_to_review: Vec<String>,
    pub jurisdiction_risks: Vec<String>,
    pub disclaimer: String,
}

/// How the price of a generation was decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Pricing {
    /// Covered by the plan's monthly allowance
    Included,
    /// Charged per page at `rate`
    Marginal { rate: Money },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Text,
    Markdown,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Text => "txt",
            ExportFormat::Markdown => "md",
            ExportFormat::Json => "json",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Text => "text/plain; charset=utf-8",
            ExportFormat::Markdown => "text/markdown; charset=utf-8",
            ExportFormat::Json => "application/json",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "txt" | "text" => Some(ExportFormat::Text),
            "md" | "markdown" => Some(ExportFormat::Markdown),
            "json" => Some(ExportFormat::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadRecord {
    pub format: ExportFormat,
    pub at: DateTime<Utc>,
}

/// The unit of value produced by the generation workflow.
///
/// Only payment confirmation (status and purchase fields) and collaborator
/// edits mutate a contract after generation; entitlement checks work on views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedContract {
    pub id: String,
    pub template_id: String,
    pub title: String,
    pub content: String,
    pub jurisdiction: JurisdictionCode,
    pub language: String,
    /// Form values as submitted
    pub form_data: FormValues,
    pub generated_at: DateTime<Utc>,
    pub user_id: String,
    pub status: ContractStatus,
    pub page_count: u32,
    pub price: Money,
    pub pricing: Pricing,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_summary: Option<RiskSummary>,
    #[serde(default)]
    pub collaborators: Vec<Collaborator>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchased_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchased_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_reference: Option<String>,
    #[serde(default)]
    pub downloads: Vec<DownloadRecord>,
}

impl GeneratedContract {
    pub fn is_purchased(&self) -> bool {
        self.status.is_purchased()
    }

    pub fn collaborator(&self, id: &str) -> Option<&Collaborator> {
        self.collaborators.iter().find(|c| c.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_ordering_follows_lifecycle() {
        assert!(ContractStatus::Draft < ContractStatus::Generated);
        assert!(ContractStatus::Generated < ContractStatus::Purchased);
        assert!(ContractStatus::Purchased < ContractStatus::Downloaded);
        assert!(ContractStatus::Downloaded.is_purchased());
        assert!(!ContractStatus::Generated.is_purchased());
    }

    #[test]
    fn test_risk_summary_requires_every_field() {
        let complete = json!({
            "purpose": "Protect confidential information",
            "commonMistakes": ["Undefined term"],
            "keyClausesToReview": ["Term"],
            "jurisdictionRisks": [],
            "disclaimer": "Not legal advice"
        });
        assert!(serde_json::from_value::<RiskSummary>(complete).is_ok());

        let missing = json!({ "purpose": "x", "disclaimer": "y" });
        assert!(serde_json::from_value::<RiskSummary>(missing).is_err());
    }

    #[test]
    fn test_pricing_is_tagged() {
        let marginal = Pricing::Marginal {
            rate: Money::from_cents(60),
        };
        assert_eq!(
            serde_json::to_value(marginal).unwrap(),
            json!({ "kind": "marginal", "rate": 60 })
        );
        assert_eq!(
            serde_json::to_value(Pricing::Included).unwrap(),
            json!({ "kind": "included" })
        );
    }

    #[test]
    fn test_export_format_parse() {
        assert_eq!(ExportFormat::parse("MD"), Some(ExportFormat::Markdown));
        assert_eq!(ExportFormat::parse("txt"), Some(ExportFormat::Text));
        assert_eq!(ExportFormat::parse("docx"), None);
        assert_eq!(ExportFormat::Json.extension(), "json");
    }
}
