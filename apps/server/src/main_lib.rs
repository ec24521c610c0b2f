use std::sync::{Arc, Once};

use crate::{auth::AuthManager, config::Config, domain_events::WebDomainEventSink};
use gertonargent_core::{
    advice::AdviceGenerator,
    alerts::BudgetAlertEvaluator,
    events::DomainEventSink,
    notifications::PushSender,
    summary::DailySummaryJob,
    tokens::TokenRegistrar,
    transactions::{TransactionService, TransactionServiceTrait},
    users::{UserService, UserServiceTrait},
};
use gertonargent_push::{FcmClient, LogPushSender, ServiceAccountKey};
use gertonargent_storage_sqlite::{
    db::{self, write_actor},
    transactions::TransactionRepository,
    users::UserRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub transaction_service: Arc<dyn TransactionServiceTrait>,
    pub advice_generator: AdviceGenerator,
    pub token_registrar: Arc<TokenRegistrar>,
    pub daily_summary_job: Arc<DailySummaryJob>,
    pub auth: Option<Arc<AuthManager>>,
}

static TRACING: Once = Once::new();

/// Installs the global subscriber. Calls after the first are no-ops.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let log_format = std::env::var("GTA_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let registry = tracing_subscriber::registry().with(filter);

        let result = if log_format.eq_ignore_ascii_case("json") {
            registry
                .with(fmt::layer().json().with_current_span(false))
                .try_init()
        } else {
            registry
                .with(fmt::layer().with_target(true).with_line_number(true))
                .try_init()
        };
        if let Err(e) = result {
            eprintln!("Tracing already initialized: {e}");
        }
    });
}

/// Picks the push transport: FCM when a service account is configured, logging otherwise.
pub fn build_push_sender(config: &Config) -> anyhow::Result<Arc<dyn PushSender>> {
    match &config.fcm_service_account {
        Some(path) => {
            let key = ServiceAccountKey::from_file(path)?;
            tracing::info!("Push delivery through FCM project {}", key.project_id);
            Ok(Arc::new(FcmClient::new(key)?))
        }
        None => {
            tracing::warn!("GTA_FCM_SERVICE_ACCOUNT not set, push messages will only be logged");
            Ok(Arc::new(LogPushSender))
        }
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let push_sender = build_push_sender(config)?;
    build_state_with_push(config, push_sender).await
}

pub async fn build_state_with_push(
    config: &Config,
    push_sender: Arc<dyn PushSender>,
) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = write_actor::spawn_writer((*pool).clone());

    let user_repository = Arc::new(UserRepository::new(pool.clone(), writer.clone()));
    let transaction_repository = Arc::new(TransactionRepository::new(pool.clone(), writer));

    let domain_event_sink = Arc::new(WebDomainEventSink::new());
    let event_sink: Arc<dyn DomainEventSink> = domain_event_sink.clone();

    let user_service = Arc::new(UserService::new(user_repository.clone()));
    let transaction_service = Arc::new(TransactionService::new(
        transaction_repository.clone(),
        event_sink,
    ));
    let token_registrar = Arc::new(TokenRegistrar::new(user_repository.clone()));

    let evaluator = Arc::new(BudgetAlertEvaluator::new(
        user_repository.clone(),
        transaction_repository.clone(),
        push_sender.clone(),
        config.timezone,
    ));
    domain_event_sink.start_worker(evaluator);

    let daily_summary_job = Arc::new(DailySummaryJob::new(
        user_repository,
        transaction_repository,
        push_sender,
        config.timezone,
        config.summary_page_size,
    ));

    let auth = config
        .jwt_secret
        .as_deref()
        .map(|secret| Arc::new(AuthManager::new(secret)));
    if auth.is_none() {
        tracing::warn!("GTA_JWT_SECRET not set, every call will be treated as unauthenticated");
    }

    Ok(Arc::new(AppState {
        user_service,
        transaction_service,
        advice_generator: AdviceGenerator::new(),
        token_registrar,
        daily_summary_job,
        auth,
    }))
}
