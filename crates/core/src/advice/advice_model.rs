//! Spending advice models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Expense category as sent by the client. Unknown values map to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpendingCategory {
    Food,
    Entertainment,
    Shopping,
    Transport,
    #[serde(other)]
    Other,
}

/// A proposed expense and the caller's account context.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdviceRequest {
    pub expense_amount: Decimal,
    pub current_balance: Decimal,
    pub monthly_budget: Decimal,
    #[serde(default)]
    pub category: Option<SpendingCategory>,
    /// Accepted for client compatibility; no rule reads it.
    #[serde(default)]
    pub recent_transactions: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdviceResponse {
    pub advice: String,
}
