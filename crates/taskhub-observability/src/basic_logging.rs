use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Console-only logging, used when observability is disabled at build time or
/// with `OBSERVABILITY_ENABLED=false`.
///
/// - **Log Level**: `LOG_LEVEL` (default: "info"), or `RUST_LOG` when set
/// - **Filtering**: noisy dependencies are held at warn
///
/// Safe to call more than once; later calls are ignored.
pub fn init_basic_console_logging() {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "taskhub={level},taskhub_db={level},taskhub_cli={level},tower_http=warn,hyper=warn,sqlx=warn",
            level = log_level
        ))
    });

    let console_layer = fmt::layer()
        .compact()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_filter(env_filter);

    if tracing_subscriber::registry()
        .with(console_layer)
        .try_init()
        .is_ok()
    {
        eprintln!("Observability disabled - console logging only");
    }
}
