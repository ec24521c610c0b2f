use std::{net::SocketAddr, path::PathBuf, time::Duration};

use anyhow::Context;
use chrono_tz::Tz;
use gertonargent_core::constants::{DEFAULT_SUMMARY_PAGE_SIZE, DEFAULT_SUMMARY_SCHEDULE};
use gertonargent_core::summary::DailySchedule;
use gertonargent_core::utils::DEFAULT_TZ;

use crate::auth::decode_secret_key;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    /// Decoded HS256 secret for caller tokens. `None` leaves every call unauthenticated.
    pub jwt_secret: Option<Vec<u8>>,
    pub timezone: Tz,
    pub summary_schedule: DailySchedule,
    pub summary_page_size: i64,
    pub fcm_service_account: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            db_path: "./db/app.db".to_string(),
            cors_allow: vec!["*".to_string()],
            request_timeout: Duration::from_millis(30000),
            jwt_secret: None,
            timezone: DEFAULT_TZ,
            summary_schedule: DailySchedule { minute: 0, hour: 20 },
            summary_page_size: DEFAULT_SUMMARY_PAGE_SIZE,
            fcm_service_account: None,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Config::default();

        let listen_addr: SocketAddr = match non_empty_var("GTA_LISTEN_ADDR") {
            Some(raw) => raw.parse().context("Invalid GTA_LISTEN_ADDR")?,
            None => defaults.listen_addr,
        };
        let db_path = non_empty_var("GTA_DB_PATH").unwrap_or(defaults.db_path);
        let cors_allow = std::env::var("GTA_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = std::env::var("GTA_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".into())
            .parse()
            .unwrap_or(30000);
        let jwt_secret = non_empty_var("GTA_JWT_SECRET")
            .map(|raw| decode_secret_key(&raw))
            .transpose()
            .context("Invalid GTA_JWT_SECRET")?;
        let timezone: Tz = match non_empty_var("GTA_TIMEZONE") {
            Some(raw) => raw
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid GTA_TIMEZONE '{}': {}", raw, e))?,
            None => defaults.timezone,
        };
        let schedule_expr = non_empty_var("GTA_SUMMARY_SCHEDULE")
            .unwrap_or_else(|| DEFAULT_SUMMARY_SCHEDULE.to_string());
        let summary_schedule =
            DailySchedule::parse(&schedule_expr).context("Invalid GTA_SUMMARY_SCHEDULE")?;
        let summary_page_size = std::env::var("GTA_SUMMARY_PAGE_SIZE")
            .ok()
            .and_then(|v| v.trim().parse::<i64>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(defaults.summary_page_size);
        let fcm_service_account = non_empty_var("GTA_FCM_SERVICE_ACCOUNT").map(PathBuf::from);

        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            jwt_secret,
            timezone,
            summary_schedule,
            summary_page_size,
            fcm_service_account,
        })
    }
}
