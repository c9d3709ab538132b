use std::env;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Deployment stage, parsed from `APP_ENV`. Anything unrecognized falls
/// back to development.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AppEnvironment::Development => "development",
            AppEnvironment::Test => "test",
            AppEnvironment::Production => "production",
        })
    }
}

/// Runtime settings for the marketplace service, read from the process
/// environment. A `.env` file next to the binary is honored when present.
///
/// Recognized variables: `APP_ENV`, `APP_HOST`, `APP_PORT`,
/// `APP_SEED_DEMO`, and `APP_LOG_LEVEL`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub listen: ListenConfig,
    pub telemetry: TelemetryConfig,
    /// Seed the demo fleet, listings, and accounts at startup. The
    /// `--seed-demo` CLI flag switches this on as well.
    pub seed_demo: bool,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::parse(&string_env("APP_ENV", "development"));

        let host = string_env("APP_HOST", "127.0.0.1");
        let port_raw = string_env("APP_PORT", "4000");
        let port = port_raw
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort { value: port_raw })?;

        Ok(Self {
            environment,
            listen: ListenConfig { host, port },
            telemetry: TelemetryConfig {
                log_level: string_env("APP_LOG_LEVEL", "info"),
            },
            seed_demo: flag_env("APP_SEED_DEMO"),
        })
    }
}

fn string_env(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// `1`, `true`, and `yes` (any case) switch a flag on; everything else,
/// including an unset variable, leaves it off.
fn flag_env(key: &str) -> bool {
    matches!(
        env::var(key)
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase()
            .as_str(),
        "1" | "true" | "yes"
    )
}

/// Address the HTTP listener binds to.
#[derive(Debug, Clone)]
pub struct ListenConfig {
    pub host: String,
    pub port: u16,
}

impl ListenConfig {
    /// `localhost` maps to the IPv4 loopback; any other host must be a
    /// literal IP address.
    pub fn addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip = if self.host.eq_ignore_ascii_case("localhost") {
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        } else {
            self.host.parse().map_err(|source| ConfigError::InvalidHost {
                host: self.host.clone(),
                source,
            })?
        };
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("APP_PORT value '{value}' is not a valid port number")]
    InvalidPort { value: String },
    #[error("APP_HOST value '{host}' is not an IP address or 'localhost'")]
    InvalidHost {
        host: String,
        source: std::net::AddrParseError,
    },
}
