//! Prompt construction for the text generator

use std::fmt::Write;

use form_engine::{display_value, is_empty_value};
use shared_types::{ContractTemplate, FormValues, Jurisdiction};

/// Prompt for the contract body.
///
/// Embeds the template description, the jurisdiction's legal context and
/// every filled-in field in schema order.
pub fn contract_prompt(
    template: &ContractTemplate,
    jurisdiction: &Jurisdiction,
    values: &FormValues,
    language: &str,
) -> String {
    let mut prompt = String::new();
    let _ = writeln!(
        prompt,
        "Draft a complete, professionally formatted {} ({}).",
        template.name, template.description
    );
    push_jurisdiction(&mut prompt, jurisdiction);
    let _ = writeln!(prompt, "Write the contract in language: {}.", language);
    let _ = writeln!(prompt, "Target length: about {} pages.", template.estimated_pages);

    prompt.push_str("\nContract details:\n");
    for field in &template.fields {
        let value = values.get(&field.name);
        if is_empty_value(value) {
            continue;
        }
        if let Some(value) = value {
            let _ = writeln!(prompt, "- {}: {}", field.label, display_value(value));
        }
    }

    if !template.risk_areas.is_empty() {
        let _ = writeln!(
            prompt,
            "\nPay particular attention to: {}.",
            template.risk_areas.join(", ")
        );
    }
    prompt.push_str(
        "\nReturn only the contract text with numbered clauses and signature blocks. \
         Do not add commentary before or after the contract.",
    );
    prompt
}

/// Prompt for the structured risk summary that accompanies a contract
pub fn risk_summary_prompt(template: &ContractTemplate, jurisdiction: &Jurisdiction, language: &str) -> String {
    let mut prompt = String::new();
    let _ = writeln!(
        prompt,
        "Summarise the key risks of a {} ({}).",
        template.name, template.description
    );
    push_jurisdiction(&mut prompt, jurisdiction);
    let _ = writeln!(prompt, "Answer in language: {}.", language);
    prompt.push_str(
        "\nRespond with a single JSON object and nothing else, using exactly these keys:\n\
         {\"purpose\": string, \"commonMistakes\": [string], \"keyClausesToReview\": [string], \
         \"jurisdictionRisks\": [string], \"disclaimer\": string}",
    );
    prompt
}

/// Prompt for analysing an arbitrary document
pub fn analysis_prompt(text: &str) -> String {
    format!(
        "Analyse the following contract for legal and commercial risk.\n\
         Respond with a single JSON object and nothing else:\n\
         {{\"overallScore\": number 0-100, \"summary\": string, \"findings\": [{{\"title\": string, \
         \"severity\": \"low\"|\"medium\"|\"high\"|\"critical\", \"description\": string, \
         \"recommendation\": string, \"clause\": string}}]}}\n\n\
         Contract:\n{}",
        text
    )
}

fn push_jurisdiction(prompt: &mut String, jurisdiction: &Jurisdiction) {
    let _ = writeln!(
        prompt,
        "Jurisdiction: {} ({} legal system, amounts in {}).",
        jurisdiction.code.name(),
        jurisdiction.legal_system.as_str(),
        jurisdiction.currency
    );
    if !jurisdiction.specific_requirements.is_empty() {
        prompt.push_str("Mandatory local requirements:\n");
        for requirement in &jurisdiction.specific_requirements {
            let _ = writeln!(prompt, "- {}", requirement);
        }
    }
}
