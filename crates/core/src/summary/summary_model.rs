//! Daily summary models.

use serde::Serialize;

use crate::constants::{APP_NAME, CURRENCY_LABEL, NOTIFICATION_TYPE_DAILY_SUMMARY};
use crate::notifications::PushMessage;
use crate::totals::Totals;
use crate::utils::{format_plain, format_whole};

/// Builds the daily summary notification for one user's totals.
pub fn summary_message(token: &str, totals: &Totals) -> PushMessage {
    PushMessage::new(
        token,
        format!("{} - Résumé quotidien", APP_NAME),
        format!(
            "Aujourd'hui: +{} {currency}, -{} {currency}",
            format_whole(totals.total_income),
            format_whole(totals.total_expenses),
            currency = CURRENCY_LABEL
        ),
    )
    .with_data("type", NOTIFICATION_TYPE_DAILY_SUMMARY)
    .with_data("income", format_plain(totals.total_income))
    .with_data("expenses", format_plain(totals.total_expenses))
}

/// Counters describing one run of the daily summary job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryReport {
    pub users_scanned: usize,
    pub notified: usize,
    pub skipped_no_token: usize,
    pub skipped_inactive: usize,
    pub failed: usize,
    /// Set when listing users failed and the run stopped early.
    pub aborted: bool,
}
