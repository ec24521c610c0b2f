//! Alerts module - budget overrun detection on new expenses.

mod alerts_model;
mod alerts_service;

pub use alerts_model::{AlertOutcome, BudgetAlert, MonthlyPosition};
pub use alerts_service::BudgetAlertEvaluator;
