use rust_decimal::Decimal;

/// Application name used in notification titles.
pub const APP_NAME: &str = "GèrTonArgent";

/// Currency label appended to amounts in notification bodies.
pub const CURRENCY_LABEL: &str = "FCFA";

/// Budget utilization (percent) above which an alert is sent.
pub const BUDGET_ALERT_UTILIZATION_THRESHOLD: i64 = 80;

/// Largest amount or budget accepted from a client (10^15).
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// Notification `data.type` for budget alerts.
pub const NOTIFICATION_TYPE_BUDGET_ALERT: &str = "budget_alert";

/// Notification `data.type` for the daily summary.
pub const NOTIFICATION_TYPE_DAILY_SUMMARY: &str = "daily_summary";

/// Default number of users loaded per page by the daily summary.
pub const DEFAULT_SUMMARY_PAGE_SIZE: i64 = 200;

/// Default cron expression for the daily summary (20:00 local).
pub const DEFAULT_SUMMARY_SCHEDULE: &str = "0 20 * * *";
