//! Jurisdiction reference table
//!
//! One entry per supported code: the legal tradition the contract is
//! drafted under, the currency amounts are expressed in, and the clauses or
//! disclosures that jurisdiction makes mandatory.

use once_cell::sync::Lazy;
use shared_types::{Jurisdiction, JurisdictionCode, LegalSystem};

use crate::error::CatalogError;

fn entry(
    code: JurisdictionCode,
    legal_system: LegalSystem,
    currency: &str,
    requirements: &[&str],
) -> Jurisdiction {
    Jurisdiction {
        code,
        legal_system,
        currency: currency.to_string(),
        specific_requirements: requirements.iter().map(|r| r.to_string()).collect(),
    }
}

static JURISDICTIONS: Lazy<Vec<Jurisdiction>> = Lazy::new(|| {
    vec![
        entry(
            JurisdictionCode::US,
            LegalSystem::CommonLaw,
            "USD",
            &[
                "Governing law and venue clause naming a specific state",
                "At-will employment statement where applicable",
                "E-SIGN Act consent to electronic records and signatures",
                "Defend Trade Secrets Act whistleblower immunity notice in confidentiality clauses",
            ],
        ),
        entry(
            JurisdictionCode::UK,
            LegalSystem::CommonLaw,
            "GBP",
            &[
                "UK GDPR / Data Protection Act 2018 data processing terms",
                "Contracts (Rights of Third Parties) Act 1999 exclusion clause",
                "Written statement of employment particulars from day one",
                "Unfair Contract Terms Act 1977 reasonableness of liability caps",
            ],
        ),
        entry(
            JurisdictionCode::CA,
            LegalSystem::Mixed,
            "CAD",
            &[
                "Provincial governing law clause (Quebec civil code differs)",
                "PIPEDA personal information consent",
                "Employment standards minimum notice of termination",
                "Bilingual version where required in Quebec (Charter of the French Language)",
            ],
        ),
        entry(
            JurisdictionCode::AU,
            LegalSystem::CommonLaw,
            "AUD",
            &[
                "Australian Consumer Law unfair contract terms protections",
                "Fair Work Act National Employment Standards",
                "Privacy Act 1988 Australian Privacy Principles",
                "GST treatment of amounts payable",
            ],
        ),
        entry(
            JurisdictionCode::DE,
            LegalSystem::CivilLaw,
            "EUR",
            &[
                "BGB §§ 305-310 standard business terms control",
                "GDPR Art. 28 data processing agreement",
                "Nachweisgesetz written employment conditions",
                "Written form requirement for lease terms over one year (BGB § 550)",
            ],
        ),
        entry(
            JurisdictionCode::FR,
            LegalSystem::CivilLaw,
            "EUR",
            &[
                "French-language version (Loi Toubon) for employment and consumer contracts",
                "Code civil good-faith obligation (art. 1104)",
                "GDPR data processing terms",
                "Mandatory diagnostics annex for residential leases (loi ALUR)",
            ],
        ),
        entry(
            JurisdictionCode::ES,
            LegalSystem::CivilLaw,
            "EUR",
            &[
                "Código Civil consent, object and cause requirements",
                "LOPDGDD / GDPR personal data clause",
                "Ley de Arrendamientos Urbanos minimum lease duration",
                "Registration of employment contracts with SEPE",
            ],
        ),
        entry(
            JurisdictionCode::SG,
            LegalSystem::CommonLaw,
            "SGD",
            &[
                "Personal Data Protection Act 2012 consent",
                "Employment Act key employment terms in writing",
                "Stamp duty on leases and share transfers",
            ],
        ),
        entry(
            JurisdictionCode::ZA,
            LegalSystem::Mixed,
            "ZAR",
            &[
                "Protection of Personal Information Act (POPIA) terms",
                "Consumer Protection Act plain-language requirement",
                "Basic Conditions of Employment Act particulars",
                "Rental Housing Act written lease and deposit interest",
            ],
        ),
    ]
});

/// Look up the table entry for a code
pub fn get_jurisdiction(code: JurisdictionCode) -> Option<&'static Jurisdiction> {
    JURISDICTIONS.iter().find(|j| j.code == code)
}

/// Look up a jurisdiction by code or country name, e.g. `"gb"` or `"France"`
pub fn find_jurisdiction(raw: &str) -> Result<&'static Jurisdiction, CatalogError> {
    JurisdictionCode::parse_code(raw)
        .and_then(get_jurisdiction)
        .ok_or_else(|| CatalogError::UnknownJurisdiction(raw.to_string()))
}

/// All known jurisdictions, in table order
pub fn list_jurisdictions() -> &'static [Jurisdiction] {
    &JURISDICTIONS
}
