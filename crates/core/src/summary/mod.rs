//! Summary module - scheduled daily activity notifications.

mod schedule;
mod summary_model;
mod summary_service;

pub use schedule::DailySchedule;
pub use summary_model::{summary_message, SummaryReport};
pub use summary_service::DailySummaryJob;
