//! Contract generation
//!
//! Turns a submitted form into a `generated` contract: two independent
//! generator calls (body and risk summary) run concurrently, then the price
//! is decided from the plan and this month's usage.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use entitlement_gate::{quote_price, PriceQuote};
use form_engine::FormSubmission;
use shared_types::{
    ContractStatus, ContractTemplate, FormValues, GeneratedContract, Jurisdiction, JurisdictionCode, Money,
    Pricing, RiskSummary, UsagePeriod,
};

use crate::config::WorkflowConfig;
use crate::context::SessionContext;
use crate::error::WorkflowError;
use crate::prompts::{contract_prompt, risk_summary_prompt};
use crate::risk::parse_risk_summary;
use crate::services::{GeneratorError, TextGenerator};
use crate::store::ContractStore;

/// One generator call, bounded by `timeout`
pub(crate) async fn generate_with_timeout(
    generator: &dyn TextGenerator,
    prompt: &str,
    max_tokens: u32,
    timeout: Duration,
) -> Result<String, GeneratorError> {
    match tokio::time::timeout(timeout, generator.generate_text(prompt, max_tokens)).await {
        Ok(result) => result,
        Err(_elapsed) => Err(GeneratorError::Timeout(timeout.as_millis() as u64)),
    }
}

pub struct GenerationOrchestrator {
    generator: Arc<dyn TextGenerator>,
    store: Arc<dyn ContractStore>,
    config: WorkflowConfig,
}

impl GenerationOrchestrator {
    pub fn new(generator: Arc<dyn TextGenerator>, store: Arc<dyn ContractStore>, config: WorkflowConfig) -> Self {
        Self {
            generator,
            store,
            config,
        }
    }

    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    /// A `draft` contract: the form snapshot with no content and no price
    pub fn draft(
        &self,
        ctx: &SessionContext,
        template: &ContractTemplate,
        values: FormValues,
        jurisdiction: JurisdictionCode,
        language: Option<&str>,
    ) -> Result<GeneratedContract, WorkflowError> {
        resolve_jurisdiction(template, jurisdiction)?;
        Ok(GeneratedContract {
            id: uuid::Uuid::new_v4().to_string(),
            template_id: template.id.clone(),
            title: contract_title(template, jurisdiction),
            content: String::new(),
            jurisdiction,
            language: self.language(language),
            form_data: values,
            generated_at: Utc::now(),
            user_id: ctx.user_id().to_string(),
            status: ContractStatus::Draft,
            page_count: template.estimated_pages,
            price: Money::ZERO,
            pricing: Pricing::Included,
            risk_summary: None,
            collaborators: Vec::new(),
            purchased_at: None,
            purchased_by: None,
            payment_reference: None,
            downloads: Vec::new(),
        })
    }

    /// Generate a contract from a submitted form.
    ///
    /// Fails with `UnsupportedJurisdiction` before calling out if the template
    /// isn't offered there. The body call is mandatory; the risk summary is
    /// best-effort and its failure only leaves `risk_summary` empty. Nothing
    /// is returned or stored until both calls have settled, so dropping this
    /// future never leaves a partial contract behind.
    pub async fn generate(
        &self,
        ctx: &SessionContext,
        template: &ContractTemplate,
        submission: &FormSubmission,
        jurisdiction: JurisdictionCode,
        language: Option<&str>,
    ) -> Result<GeneratedContract, WorkflowError> {
        if submission.template_id != template.id {
            return Err(WorkflowError::SubmissionMismatch {
                template: template.id.clone(),
                submitted: submission.template_id.clone(),
            });
        }
        let jurisdiction_info = resolve_jurisdiction(template, jurisdiction)?;
        let language = self.language(language);

        tracing::info!(
            "Generating '{}' for {} in {} ({})",
            template.id,
            ctx.user_id(),
            jurisdiction,
            language
        );

        let content_prompt = contract_prompt(template, jurisdiction_info, &submission.values, &language);
        let risk_prompt = risk_summary_prompt(template, jurisdiction_info, &language);
        let timeout = self.config.generation_timeout;

        let (content, risk) = tokio::join!(
            generate_with_timeout(self.generator.as_ref(), &content_prompt, self.config.content_max_tokens, timeout),
            generate_with_timeout(self.generator.as_ref(), &risk_prompt, self.config.risk_max_tokens, timeout),
        );

        let content = content.map_err(|e| {
            tracing::warn!("Contract body generation failed for '{}': {}", template.id, e);
            WorkflowError::GenerationFailed(e.to_string())
        })?;
        if content.trim().is_empty() {
            return Err(WorkflowError::GenerationFailed("generator returned empty content".to_string()));
        }
        let risk_summary = settle_risk_summary(&template.id, risk);

        let now = Utc::now();
        let period = UsagePeriod::containing(now);
        let quote = self.quote(ctx, period, template.estimated_pages).await;

        let contract = GeneratedContract {
            id: uuid::Uuid::new_v4().to_string(),
            template_id: template.id.clone(),
            title: contract_title(template, jurisdiction),
            content,
            jurisdiction,
            language,
            form_data: submission.values.clone(),
            generated_at: now,
            user_id: ctx.user_id().to_string(),
            status: ContractStatus::Generated,
            page_count: template.estimated_pages,
            price: quote.price,
            pricing: quote.pricing,
            risk_summary,
            collaborators: Vec::new(),
            purchased_at: None,
            purchased_by: None,
            payment_reference: None,
            downloads: Vec::new(),
        };

        if let Err(e) = self.store.create_contract(&contract).await {
            tracing::warn!("Failed to persist contract {}: {}", contract.id, e);
        }
        if let Err(e) = self.store.record_generation(ctx.user_id(), period).await {
            tracing::warn!("Failed to record usage for {}: {}", ctx.user_id(), e);
        }

        tracing::info!(
            "Generated contract {} ({} pages, {})",
            contract.id,
            contract.page_count,
            contract.price
        );
        Ok(contract)
    }

    /// Price decision from a fresh usage read.
    ///
    /// A store with no usage count at all (no session fallback) is treated as
    /// an exhausted allowance.
    async fn quote(&self, ctx: &SessionContext, period: UsagePeriod, pages: u32) -> PriceQuote {
        let plan = ctx.plan_at(Utc::now());
        let usage = match self.store.usage(ctx.user_id(), period).await {
            Ok(usage) => usage,
            Err(e) => {
                tracing::warn!("Usage lookup failed for {}, pricing at marginal rate: {}", ctx.user_id(), e);
                u32::MAX
            }
        };
        quote_price(plan, usage, pages)
    }

    fn language(&self, requested: Option<&str>) -> String {
        requested
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_lowercase)
            .unwrap_or_else(|| self.config.default_language.clone())
    }
}

fn resolve_jurisdiction(
    template: &ContractTemplate,
    code: JurisdictionCode,
) -> Result<&'static Jurisdiction, WorkflowError> {
    let unsupported = || WorkflowError::UnsupportedJurisdiction {
        template: template.id.clone(),
        jurisdiction: code,
    };
    if !template.supports(code) {
        return Err(unsupported());
    }
    contract_catalog::get_jurisdiction(code).ok_or_else(unsupported)
}

fn settle_risk_summary(template_id: &str, response: Result<String, GeneratorError>) -> Option<RiskSummary> {
    let parsed = response
        .map_err(|e| e.to_string())
        .and_then(|text| parse_risk_summary(&text).map_err(|e| e.to_string()));
    match parsed {
        Ok(summary) => Some(summary),
        Err(reason) => {
            tracing::warn!("Risk summary unavailable for '{}': {}", template_id, reason);
            None
        }
    }
}

fn contract_title(template: &ContractTemplate, jurisdiction: JurisdictionCode) -> String {
    format!("{} ({})", template.name, jurisdiction.name())
}
