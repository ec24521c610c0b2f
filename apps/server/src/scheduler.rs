//! Background scheduler for the daily summary.
//!
//! Sleeps until the next configured local time, runs the job, repeats.

use std::sync::Arc;

use chrono::Utc;
use chrono_tz::Tz;
use gertonargent_core::summary::{DailySchedule, DailySummaryJob};
use tracing::{error, info, warn};

/// Starts the background daily summary scheduler.
pub fn start_daily_summary_scheduler(
    job: Arc<DailySummaryJob>,
    schedule: DailySchedule,
    timezone: Tz,
) {
    tokio::spawn(async move {
        info!(
            "Daily summary scheduler started ({:02}:{:02} {})",
            schedule.hour, schedule.minute, timezone
        );

        loop {
            let now = Utc::now();
            let Some(next_run) = schedule.next_after(now, timezone) else {
                warn!("No upcoming daily summary run could be computed, scheduler stopped");
                return;
            };
            let wait = (next_run - now).to_std().unwrap_or_default();
            tokio::time::sleep(wait).await;

            run_scheduled_summary(job.clone()).await;
        }
    });
}

/// Runs the job in its own task so a panic ends this run only, not the schedule.
async fn run_scheduled_summary(job: Arc<DailySummaryJob>) {
    info!("Running scheduled daily summary...");
    let report = match tokio::spawn(async move { job.run(Utc::now()).await }).await {
        Ok(report) => report,
        Err(e) => {
            error!("Daily summary run crashed: {}", e);
            return;
        }
    };
    if report.aborted {
        warn!("Daily summary stopped early: {:?}", report);
    } else {
        info!(
            "Daily summary completed: {} notified, {} without token, {} inactive, {} failed",
            report.notified, report.skipped_no_token, report.skipped_inactive, report.failed
        );
    }
}
