//! Rendering a purchased contract for download

use form_engine::display_value;
use serde::Serialize;
use shared_types::{ExportFormat, GeneratedContract};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedDocument {
    pub file_name: String,
    pub mime_type: String,
    pub body: String,
}

/// Render the full contract in `format`.
///
/// Callers are responsible for the entitlement check; this never truncates.
pub fn render_export(contract: &GeneratedContract, format: ExportFormat) -> Result<ExportedDocument, serde_json::Error> {
    let body = match format {
        ExportFormat::Text => render_text(contract),
        ExportFormat::Markdown => render_markdown(contract),
        ExportFormat::Json => serde_json::to_string_pretty(contract)?,
    };
    Ok(ExportedDocument {
        file_name: format!("{}.{}", file_stem(&contract.title), format.extension()),
        mime_type: format.mime_type().to_string(),
        body,
    })
}

fn render_text(contract: &GeneratedContract) -> String {
    let mut out = String::new();
    out.push_str(&contract.title);
    out.push('\n');
    out.push_str(&"=".repeat(contract.title.chars().count()));
    out.push_str("\n\n");
    out.push_str(contract.content.trim_end());
    out.push('\n');
    out
}

fn render_markdown(contract: &GeneratedContract) -> String {
    let mut out = format!("# {}\n\n", contract.title);
    out.push_str(&format!(
        "*Jurisdiction: {} | Language: {} | Generated: {}*\n\n",
        contract.jurisdiction.name(),
        contract.language,
        contract.generated_at.format("%Y-%m-%d")
    ));
    out.push_str(contract.content.trim_end());
    out.push('\n');

    if let Some(summary) = &contract.risk_summary {
        out.push_str("\n---\n\n## Risk summary\n\n");
        out.push_str(&summary.purpose);
        out.push('\n');
        push_list(&mut out, "Common mistakes", &summary.common_mistakes);
        push_list(&mut out, "Key clauses to review", &summary.key_clauses_to_review);
        push_list(&mut out, "Jurisdiction risks", &summary.jurisdiction_risks);
        out.push_str(&format!("\n> {}\n", summary.disclaimer));
    }

    if !contract.form_data.is_empty() {
        out.push_str("\n## Details provided\n\n");
        let mut keys: Vec<&String> = contract.form_data.keys().collect();
        keys.sort();
        for key in keys {
            if let Some(value) = contract.form_data.get(key) {
                out.push_str(&format!("- **{}**: {}\n", key, display_value(value)));
            }
        }
    }
    out
}

fn push_list(out: &mut String, heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    out.push_str(&format!("\n### {}\n\n", heading));
    for item in items {
        out.push_str(&format!("- {}\n", item));
    }
}

fn file_stem(title: &str) -> String {
    let stem: String = title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect();
    let stem = stem
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    if stem.is_empty() {
        "contract".to_string()
    } else {
        stem
    }
}
