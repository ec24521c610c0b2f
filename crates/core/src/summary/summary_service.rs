use std::sync::Arc;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use log::{debug, error, info};

use super::summary_model::{summary_message, SummaryReport};
use crate::errors::Result;
use crate::notifications::PushSender;
use crate::totals::Totals;
use crate::transactions::TransactionRepositoryTrait;
use crate::users::{User, UserRepositoryTrait};
use crate::utils::{day_window, Period};

enum UserOutcome {
    NoToken,
    Inactive,
    Notified,
}

/// Pushes each active user's income and expense totals for the current day.
pub struct DailySummaryJob {
    user_repository: Arc<dyn UserRepositoryTrait>,
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    push_sender: Arc<dyn PushSender>,
    timezone: Tz,
    page_size: i64,
}

impl DailySummaryJob {
    pub fn new(
        user_repository: Arc<dyn UserRepositoryTrait>,
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        push_sender: Arc<dyn PushSender>,
        timezone: Tz,
        page_size: i64,
    ) -> Self {
        Self {
            user_repository,
            transaction_repository,
            push_sender,
            timezone,
            page_size: page_size.max(1),
        }
    }

    /// Runs once over every user. Never fails; problems are logged and counted.
    pub async fn run(&self, now: DateTime<Utc>) -> SummaryReport {
        let day = day_window(now, self.timezone);
        let mut report = SummaryReport::default();
        let mut cursor: Option<String> = None;

        loop {
            let page = match self
                .user_repository
                .list_users_page(cursor.as_deref(), self.page_size)
            {
                Ok(page) => page,
                Err(e) => {
                    error!("Error sending daily summary: failed to list users: {}", e);
                    report.aborted = true;
                    break;
                }
            };
            let Some(last) = page.last() else {
                break;
            };
            cursor = Some(last.id.clone());
            let page_len = page.len();

            for user in &page {
                report.users_scanned += 1;
                match self.summarize_user(user, &day).await {
                    Ok(UserOutcome::NoToken) => report.skipped_no_token += 1,
                    Ok(UserOutcome::Inactive) => report.skipped_inactive += 1,
                    Ok(UserOutcome::Notified) => report.notified += 1,
                    Err(e) => {
                        error!("Error sending daily summary to user {}: {}", user.id, e);
                        report.failed += 1;
                    }
                }
            }

            if (page_len as i64) < self.page_size {
                break;
            }
        }

        info!(
            "Daily summary finished: {} users, {} notified, {} failed",
            report.users_scanned, report.notified, report.failed
        );
        report
    }

    async fn summarize_user(&self, user: &User, day: &Period) -> Result<UserOutcome> {
        let Some(token) = user.device_token() else {
            return Ok(UserOutcome::NoToken);
        };
        let transactions =
            self.transaction_repository
                .list_for_user_between(&user.id, day.start, day.end)?;
        let totals = Totals::from_transactions(&transactions)?;
        if !totals.has_activity() {
            return Ok(UserOutcome::Inactive);
        }
        let message_id = self
            .push_sender
            .send(summary_message(token, &totals))
            .await?;
        debug!("Daily summary sent to user {} ({})", user.id, message_id);
        Ok(UserOutcome::Notified)
    }
}
