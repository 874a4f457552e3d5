use crate::config::Environment;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Directives used when `RUST_LOG` is unset.
fn default_directives(env: &Environment) -> &'static str {
    match env {
        Environment::Dev => "finova_web=debug,tower_http=debug,info",
        Environment::Staging => "finova_web=debug,tower_http=info,info",
        Environment::Prod => "finova_web=info,tower_http=info,warn",
    }
}

pub fn init_logging(env: &Environment) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(env)));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_file(env.is_dev())
        .with_line_number(env.is_dev());

    // JSON lines in production so engine spans (flow, view_id) stay queryable
    let registry = tracing_subscriber::registry().with(filter);
    if env.is_prod() {
        registry.with(fmt_layer.json().flatten_event(true)).init();
    } else {
        registry.with(fmt_layer.pretty()).init();
    }

    tracing::info!(env = ?env, "Logging initialized");
}
