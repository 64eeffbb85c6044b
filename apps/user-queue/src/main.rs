use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use user_queue::api::{start_server, AppState};
use user_queue::config::Config;
use user_queue::messaging::RabbitMqConnection;
use user_queue::metrics::Metrics;

#[tokio::main]
async fn main() {
    setup_panic_handler();
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    setup_logging(&config.rust_log);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        service_name = %config.service_name,
        queue = %config.queue_name,
        "User queue service starting"
    );

    // Refuse to start against a broker we cannot reach.
    match RabbitMqConnection::connect(&config.connector).await {
        Ok(conn) => {
            info!("RabbitMQ reachable");
            if let Err(e) = conn.shutdown().await {
                warn!(error = %e, "Startup probe connection did not close cleanly");
            }
        }
        Err(e) => {
            eprintln!("Failed to connect to RabbitMQ: {}", e);
            std::process::exit(1);
        }
    }

    let metrics = match Metrics::new() {
        Ok(metrics) => metrics,
        Err(e) => {
            eprintln!("Failed to create metrics: {}", e);
            std::process::exit(1);
        }
    };

    let state = AppState {
        connector: config.connector.clone(),
        queue_name: config.queue_name.clone(),
        metrics,
    };

    if let Err(e) = start_server(state, config.port, shutdown_signal()).await {
        eprintln!("HTTP server error: {}", e);
        std::process::exit(1);
    }

    info!("User queue service stopped");
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => warn!("Shutdown signal received, cleaning up..."),
        Err(e) => error!(error = %e, "Failed to listen for shutdown signal"),
    }
}

fn setup_logging(rust_log: &str) {
    let filter = EnvFilter::try_new(rust_log).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        let payload = panic_info.payload();
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            *s
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.as_str()
        } else {
            "Unknown panic payload"
        };

        let location = panic_info
            .location()
            .map(|loc| format!("{}:{}:{}", loc.file(), loc.line(), loc.column()))
            .unwrap_or_else(|| "unknown location".to_string());

        eprintln!("PANIC: {} at {}", message, location);
        eprintln!("Thread: {:?}", std::thread::current().name());
    }));
}
