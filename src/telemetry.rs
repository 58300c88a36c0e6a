use tracing::{subscriber::set_global_default, Subscriber};
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Registry};

/// Bunyan formatted json logs on stdout. `RUST_LOG` overrides `env_filter`.
pub fn get_subscriber(name: String, env_filter: String) -> impl Subscriber + Send + Sync {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(env_filter));
    let formatting_layer = BunyanFormattingLayer::new(name, std::io::stdout);

    Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer)
}

/// Must only be called once
pub fn init_subscriber(subscriber: impl Subscriber + Send + Sync) {
    if let Err(e) = LogTracer::init() {
        eprintln!("Failed to redirect log records to tracing: {}", e);
    }
    if let Err(e) = set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}
