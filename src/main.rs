//! Bookit notification agent.
//!
//! Keeps one notification session open for a signed-in user: joins the live
//! channel, polls the unread count, and surfaces incoming events as alerts
//! until interrupted.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use bookit_core::config::AppConfig;
use bookit_core::error::AppError;
use bookit_core::types::UserId;
use bookit_notify::{
    HttpNotificationClient, NotificationStore, StoreSettings, StoreSnapshot, TracingNotifier,
};
use bookit_realtime::WsConnector;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Agent error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let config_path =
        std::env::var("BOOKIT_CONFIG").unwrap_or_else(|_| "config/default.toml".to_string());
    AppConfig::load(&config_path)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Identity to run as: first argument, then `BOOKIT_USER`, then `session.user_id`.
fn resolve_user(config: &AppConfig) -> Result<UserId, AppError> {
    std::env::args()
        .nth(1)
        .or_else(|| std::env::var("BOOKIT_USER").ok())
        .or_else(|| config.session.user_id.clone())
        .ok_or_else(|| {
            AppError::configuration(
                "No user to run as: pass a user id, set BOOKIT_USER, or set session.user_id",
            )
        })?
        .parse()
}

/// Main agent run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Bookit notification agent v{}", env!("CARGO_PKG_VERSION"));

    let user_id = resolve_user(&config)?;

    let api = Arc::new(HttpNotificationClient::new(&config.api)?);
    let connector = Arc::new(WsConnector::new(
        config.realtime.server_url.clone(),
        config.realtime.channel_buffer_size,
    ));
    let notifier = Arc::new(TracingNotifier::new(true));
    let store = NotificationStore::new(
        api,
        connector,
        notifier,
        StoreSettings::from_config(&config.realtime),
    );

    store.request_notification_permission().await;
    store.init(user_id.clone()).await?;
    store.fetch_notifications().await;
    let poller = store.start_polling();

    let mut revisions = store.subscribe();
    let mut last = store.snapshot();
    render(&last, None);

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    let mut liveness = tokio::time::interval(store.settings().poll_interval);
    liveness.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                tracing::info!("Shutdown signal received, leaving live channel...");
                break;
            }
            _ = liveness.tick() => {
                if !store.is_connected().await {
                    match store.init(user_id.clone()).await {
                        Ok(()) => store.fetch_notifications().await,
                        Err(e) => tracing::warn!(error = %e, "Rejoining live channel failed"),
                    }
                }
            }
            changed = revisions.changed() => {
                if changed.is_err() {
                    break;
                }
                let current = store.snapshot();
                render(&current, Some(&last));
                last = current;
            }
        }
    }

    poller.cancel();
    store.teardown().await;

    tracing::info!(user_id = %user_id, "Bookit notification agent stopped");
    Ok(())
}

/// Log what changed between two snapshots.
fn render(current: &StoreSnapshot, previous: Option<&StoreSnapshot>) {
    let count_changed = previous.is_none_or(|p| p.unread_count != current.unread_count);
    let list_changed = previous.is_none_or(|p| p.notifications.len() != current.notifications.len());

    if count_changed || list_changed {
        tracing::info!(
            unread = current.unread_count,
            notifications = current.notifications.len(),
            live = current.live_events.len(),
            "Notification state updated"
        );
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
