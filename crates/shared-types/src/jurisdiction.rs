//! Jurisdiction reference types
//!
//! The concrete table (legal system, currency, mandatory clauses per
//! jurisdiction) lives in the catalog crate; this module only defines the
//! shapes shared across the workspace.

use serde::{Deserialize, Serialize};

/// Country/region codes supported by the template catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum JurisdictionCode {
    US,
    UK,
    CA,
    AU,
    DE,
    FR,
    ES,
    SG,
    ZA,
}

impl JurisdictionCode {
    pub const ALL: [JurisdictionCode; 9] = [
        JurisdictionCode::US,
        JurisdictionCode::UK,
        JurisdictionCode::CA,
        JurisdictionCode::AU,
        JurisdictionCode::DE,
        JurisdictionCode::FR,
        JurisdictionCode::ES,
        JurisdictionCode::SG,
        JurisdictionCode::ZA,
    ];

    /// Full country name
    pub fn name(&self) -> &'static str {
        match self {
            JurisdictionCode::US => "United States",
            JurisdictionCode::UK => "United Kingdom",
            JurisdictionCode::CA => "Canada",
            JurisdictionCode::AU => "Australia",
            JurisdictionCode::DE => "Germany",
            JurisdictionCode::FR => "France",
            JurisdictionCode::ES => "Spain",
            JurisdictionCode::SG => "Singapore",
            JurisdictionCode::ZA => "South Africa",
        }
    }

    /// Parse from code or name (case-insensitive)
    pub fn parse_code(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "US" | "USA" | "UNITED STATES" => Some(JurisdictionCode::US),
            "UK" | "GB" | "UNITED KINGDOM" => Some(JurisdictionCode::UK),
            "CA" | "CANADA" => Some(JurisdictionCode::CA),
            "AU" | "AUSTRALIA" => Some(JurisdictionCode::AU),
            "DE" | "GERMANY" => Some(JurisdictionCode::DE),
            "FR" | "FRANCE" => Some(JurisdictionCode::FR),
            "ES" | "SPAIN" => Some(JurisdictionCode::ES),
            "SG" | "SINGAPORE" => Some(JurisdictionCode::SG),
            "ZA" | "SOUTH AFRICA" => Some(JurisdictionCode::ZA),
            _ => None,
        }
    }
}

impl std::fmt::Display for JurisdictionCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LegalSystem {
    CommonLaw,
    CivilLaw,
    Mixed,
}

impl LegalSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            LegalSystem::CommonLaw => "common-law",
            LegalSystem::CivilLaw => "civil-law",
            LegalSystem::Mixed => "mixed",
        }
    }
}

/// Legal context a contract is drafted for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Jurisdiction {
    pub code: JurisdictionCode,
    pub legal_system: LegalSystem,
    /// ISO 4217 currency code
    pub currency: String,
    /// Clauses and disclosures the jurisdiction makes mandatory
    pub specific_requirements: Vec<String>,
}
