//! Advice module - rule-based feedback on a proposed expense.

mod advice_model;
mod advice_service;

pub use advice_model::{AdviceRequest, AdviceResponse, SpendingCategory};
pub use advice_service::AdviceGenerator;
