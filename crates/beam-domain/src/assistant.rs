//! Capability seam for a conversational assistant
//!
//! The ledger never calls an assistant. Integrations implement
//! [`AskAssistant`] and may pass [`emissions_context`] along with a question.

use thiserror::Error;

use crate::model::MaterialLedger;
use crate::service::emissions::kg_to_tonnes;
use crate::service::summary::{aggregate, grand_total};

/// Errors reported by an assistant integration
#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("Assistant unavailable: {0}")]
    Unavailable(String),

    #[error("Assistant request failed: {0}")]
    Request(String),
}

/// Answers free-text questions, optionally grounded on a document excerpt
pub trait AskAssistant {
    fn ask(&self, question: &str, context: Option<&str>) -> Result<String, AssistantError>;
}

/// Short text excerpt describing the ledger's totals
pub fn emissions_context(ledger: &MaterialLedger) -> String {
    let summary = aggregate(ledger);
    let total = grand_total(&summary);
    let mut context = format!(
        "Total embodied emissions: {:.1} kg CO2e ({:.2} t CO2e) across {} line items.",
        total,
        kg_to_tonnes(total),
        ledger.row_count()
    );
    for row in &summary {
        context.push_str(&format!("\n- {}: {:.1} kg CO2e", row.material, row.total_emissions_kg));
    }
    context
}
