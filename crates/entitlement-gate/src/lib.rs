//! Entitlement policy
//!
//! Decides how much of a contract or risk assessment a user may see, whether
//! they may export it, and what a generation costs under their plan. Every
//! function here is pure: callers pass in the subscription, usage count and
//! clock they already hold.

pub mod export;
pub mod plan;
pub mod preview;
pub mod quota;
pub mod redact;

pub use export::{can_export, ExportDenied};
pub use plan::{effective_plan, has_active_paid_plan};
pub use preview::{preview_content, preview_text, ContentView, PREVIEW_WORD_LIMIT};
pub use quota::{
    included_generations, marginal_page_rate, quote_price, remaining_included_generations,
    PriceQuote, Quota, PAY_PER_USE_PAGE_RATE,
};
pub use redact::{
    redact_assessment, FindingView, RiskAssessmentView, DESCRIPTION_PREVIEW_CHARS,
    FREE_FINDING_LIMIT,
};
