use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use bloodlink::config::Settings;
use bloodlink::core::RequestPipeline;
use bloodlink::error::{handle_json_payload_error, handle_query_payload_error};
use bloodlink::routes::{self, AppState};
use bloodlink::services::{
    EmailTransport, MessagingTransport, NotificationDispatcher, SmtpMailer, SqliteStore, Store,
    WebhookMessenger,
};
use std::sync::Arc;
use tracing::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {e}");
        panic!("Configuration error: {e}");
    });

    // Initialize logging
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(settings.logging.level.clone()));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if settings.logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting Bloodlink alert service...");

    // Initialize the store (runs migrations)
    let store: Arc<dyn Store> = Arc::new(
        SqliteStore::connect(
            &settings.database.url,
            settings.database.max_connections,
            settings.database.busy_timeout_secs,
        )
        .await
        .unwrap_or_else(|e| {
            error!("Failed to open database: {}", e);
            panic!("Database error: {e}");
        }),
    );

    info!(
        "Store initialized ({}, max {} connections)",
        settings.database.url, settings.database.max_connections
    );

    // Notification channels: both optional, both best-effort.
    let email: Option<Arc<dyn EmailTransport>> = match SmtpMailer::from_settings(&settings.email) {
        Some(mailer) => {
            info!(
                "Email channel enabled via {}",
                settings.email.smtp_host.as_deref().unwrap_or("")
            );
            Some(Arc::new(mailer))
        }
        None => {
            info!("Email channel not configured, notifications will be skipped");
            None
        }
    };

    let messaging: Option<Arc<dyn MessagingTransport>> =
        match WebhookMessenger::from_settings(&settings.messaging) {
            Some(messenger) => {
                info!("Secondary messaging channel enabled");
                Some(Arc::new(messenger))
            }
            None => {
                info!("Secondary messaging channel disabled");
                None
            }
        };

    let dispatcher = NotificationDispatcher::new(email, messaging);

    let pipeline = Arc::new(RequestPipeline::new(
        store.clone(),
        dispatcher,
        settings.matching.far_notify_limit,
    ));

    let app_state = AppState { store, pipeline };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
