use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Staging,
    Prod,
}

impl Environment {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "prod" | "production" => Self::Prod,
            "staging" => Self::Staging,
            _ => Self::Dev,
        }
    }

    pub fn is_dev(&self) -> bool {
        matches!(self, Self::Dev)
    }

    pub fn is_prod(&self) -> bool {
        matches!(self, Self::Prod)
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub env: Environment,
    pub server_addr: String,

    // CORS
    pub cors_allow_origins: Vec<String>,

    // Simulated analysis
    pub analysis_delay_ms: u64,

    // View lifetime
    pub view_ttl_seconds: u64,
    pub view_sweep_interval_seconds: u64,
    pub max_views_per_flow: usize,

    // Uploads
    pub max_upload_bytes: usize,

    // Logo, team photos and profile icons, served under /static
    pub assets_dir: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            env: Environment::Dev,
            server_addr: "0.0.0.0:8080".to_string(),
            cors_allow_origins: vec!["http://localhost:3000".to_string()],
            analysis_delay_ms: 3000,
            view_ttl_seconds: 1800,
            view_sweep_interval_seconds: 60,
            max_views_per_flow: 10_000,
            max_upload_bytes: 25 * 1024 * 1024,
            assets_dir: "assets".to_string(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let env = Environment::from_str(&env::var("ENV").unwrap_or_else(|_| "dev".to_string()));
        let server_addr = env::var("SERVER_ADDR").unwrap_or(defaults.server_addr);
        server_addr
            .parse::<std::net::SocketAddr>()
            .with_context(|| format!("SERVER_ADDR '{server_addr}' is not a socket address"))?;

        // CORS
        let cors_allow_origins = env::var("CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let analysis_delay_ms = parse_or("ANALYSIS_DELAY_MS", defaults.analysis_delay_ms);
        let view_ttl_seconds = parse_or("VIEW_TTL_SECONDS", defaults.view_ttl_seconds);
        let view_sweep_interval_seconds = parse_or(
            "VIEW_SWEEP_INTERVAL_SECONDS",
            defaults.view_sweep_interval_seconds,
        )
        .max(1);
        let max_views_per_flow =
            parse_or("MAX_VIEWS_PER_FLOW", defaults.max_views_per_flow).max(1);
        let max_upload_bytes = parse_or("MAX_UPLOAD_BYTES", defaults.max_upload_bytes);
        let assets_dir = env::var("ASSETS_DIR").unwrap_or(defaults.assets_dir);

        Ok(Settings {
            env,
            server_addr,
            cors_allow_origins,
            analysis_delay_ms,
            view_ttl_seconds,
            view_sweep_interval_seconds,
            max_views_per_flow,
            max_upload_bytes,
            assets_dir,
        })
    }

    pub fn analysis_delay(&self) -> Duration {
        Duration::from_millis(self.analysis_delay_ms)
    }

    pub fn view_ttl(&self) -> Duration {
        Duration::from_secs(self.view_ttl_seconds)
    }

    pub fn view_sweep_interval(&self) -> Duration {
        Duration::from_secs(self.view_sweep_interval_seconds)
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_parsing_defaults_to_dev() {
        assert_eq!(Environment::from_str("PRODUCTION"), Environment::Prod);
        assert_eq!(Environment::from_str("staging"), Environment::Staging);
        assert_eq!(Environment::from_str("whatever"), Environment::Dev);
        assert!(Environment::Dev.is_dev());
        assert!(Environment::Prod.is_prod());
    }

    #[test]
    fn default_delay_is_three_seconds() {
        let settings = Settings::default();
        assert_eq!(settings.analysis_delay(), Duration::from_millis(3000));
        assert_eq!(settings.view_ttl(), Duration::from_secs(1800));
        assert_eq!(settings.max_views_per_flow, 10_000);
        assert_eq!(settings.assets_dir, "assets");
    }
}
