use std::fmt::Write;
use std::io::Read;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use contract_workflow::WorkflowConfig;
use entitlement_gate::{quote_price, remaining_included_generations};
use form_engine::{FieldErrors, FormSession};
use serde::Serialize;
use serde_json::json;
use shared_types::{Category, ContractTemplate, FormValues, Plan, Pricing};

pub fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read values from stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

pub fn templates(jurisdiction: Option<&str>, category: Option<&str>, as_json: bool) -> Result<String> {
    let mut selected: Vec<&ContractTemplate> = contract_catalog::list_templates().iter().collect();

    if let Some(raw) = jurisdiction {
        let code = contract_catalog::find_jurisdiction(raw)?.code;
        selected.retain(|t| t.supports(code));
    }
    if let Some(raw) = category {
        let category: Category = serde_json::from_value(json!(raw.trim().to_lowercase()))
            .map_err(|_| anyhow!("Unknown category: {}", raw))?;
        selected.retain(|t| t.category == category);
    }

    if as_json {
        return Ok(serde_json::to_string_pretty(&selected)?);
    }
    let mut out = String::new();
    for t in selected {
        let codes: Vec<String> = t.jurisdictions.iter().map(|j| j.to_string()).collect();
        writeln!(
            out,
            "{:<20} {:<32} {:>2} pages  {}",
            t.id,
            t.name,
            t.estimated_pages,
            codes.join(",")
        )?;
    }
    Ok(out.trim_end().to_string())
}

pub fn jurisdictions(as_json: bool) -> Result<String> {
    let all = contract_catalog::list_jurisdictions();
    if as_json {
        return Ok(serde_json::to_string_pretty(all)?);
    }
    let mut out = String::new();
    for j in all {
        writeln!(
            out,
            "{}  {:<16} {:<11} {}",
            j.code,
            j.code.name(),
            j.legal_system.as_str(),
            j.currency
        )?;
    }
    Ok(out.trim_end().to_string())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckReport {
    pub template: String,
    pub completion: u8,
    pub errors: FieldErrors,
    pub submittable: bool,
}

pub fn check(template_id: &str, raw_values: &str) -> Result<CheckReport> {
    let template = contract_catalog::get_template(template_id)?;
    let values: FormValues =
        serde_json::from_str(raw_values).context("Values must be a JSON object keyed by field name")?;

    let mut form = FormSession::new(template);
    for (name, value) in values {
        form.set_value(&name, value)?;
    }
    let errors = form.validate().clone();
    let completion = form.completion();
    Ok(CheckReport {
        template: template.id.clone(),
        completion,
        submittable: completion == 100 && errors.is_empty(),
        errors,
    })
}

pub fn render_check(report: &CheckReport, as_json: bool) -> Result<String> {
    if as_json {
        return Ok(serde_json::to_string_pretty(report)?);
    }
    let mut out = format!("{}: {}% complete\n", report.template, report.completion);
    for (field, message) in &report.errors {
        writeln!(out, "  {}: {}", field, message)?;
    }
    out.push_str(if report.submittable { "ready to submit" } else { "not ready to submit" });
    Ok(out)
}

pub fn quote(template_id: &str, plan: &str, usage: u32, as_json: bool) -> Result<String> {
    let template = contract_catalog::get_template(template_id)?;
    let Some(plan) = Plan::parse(plan) else {
        bail!("Unknown plan: {}", plan);
    };
    let quote = quote_price(plan, usage, template.estimated_pages);
    let remaining = remaining_included_generations(plan, usage);

    if as_json {
        return Ok(serde_json::to_string_pretty(&json!({
            "template": template.id,
            "plan": plan,
            "pages": template.estimated_pages,
            "remainingIncluded": remaining.to_string(),
            "price": quote.price,
            "pricing": quote.pricing,
        }))?);
    }
    let basis = match quote.pricing {
        Pricing::Included => "included in plan".to_string(),
        Pricing::Marginal { rate } => format!("{} pages at {}/page", template.estimated_pages, rate),
    };
    Ok(format!(
        "{} on {}: {} ({}; {} included generations left)",
        template.id, plan, quote.price, basis, remaining
    ))
}

pub fn config(as_json: bool) -> Result<String> {
    let config = WorkflowConfig::from_env()?;
    if as_json {
        return Ok(serde_json::to_string_pretty(&json!({
            "generationTimeoutMs": config.generation_timeout.as_millis() as u64,
            "contentMaxTokens": config.content_max_tokens,
            "riskMaxTokens": config.risk_max_tokens,
            "analysisMaxTokens": config.analysis_max_tokens,
            "defaultLanguage": config.default_language,
        }))?);
    }
    Ok(format!(
        "generation timeout: {}ms\ncontent max tokens: {}\nrisk max tokens: {}\nanalysis max tokens: {}\ndefault language: {}",
        config.generation_timeout.as_millis(),
        config.content_max_tokens,
        config.risk_max_tokens,
        config.analysis_max_tokens,
        config.default_language
    ))
}
