use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub catalog: CatalogConfig,
    pub payments: PaymentConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let csv_path = non_blank_var("APP_CATALOG_CSV").map(PathBuf::from);

        let public_key = non_blank_var("APP_PAYSTACK_PUBLIC_KEY");
        let currency = non_blank_var("APP_PAYMENT_CURRENCY")
            .map(|value| value.trim().to_ascii_uppercase())
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());

        let default_agent_fee_percent = match non_blank_var("APP_DEFAULT_AGENT_FEE_PERCENT") {
            Some(raw) => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite() && *value >= 0.0)
                .ok_or(ConfigError::InvalidAgentFee(raw))?,
            None => DEFAULT_AGENT_FEE_PERCENT,
        };
        let default_walking_fee = match non_blank_var("APP_DEFAULT_WALKING_FEE") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .map_err(|_| ConfigError::InvalidWalkingFee(raw))?,
            None => DEFAULT_WALKING_FEE,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            catalog: CatalogConfig { csv_path },
            payments: PaymentConfig {
                public_key,
                currency,
                default_agent_fee_percent,
                default_walking_fee,
            },
        })
    }
}

fn non_blank_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

const DEFAULT_CURRENCY: &str = "GHS";
const DEFAULT_AGENT_FEE_PERCENT: f64 = 5.0;
const DEFAULT_WALKING_FEE: u32 = 50;

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Where listings come from. `None` means the bundled sample catalog.
#[derive(Debug, Clone, Default)]
pub struct CatalogConfig {
    pub csv_path: Option<PathBuf>,
}

/// Checkout widget settings and the fee defaults applied to listings without their own.
#[derive(Debug, Clone)]
pub struct PaymentConfig {
    pub public_key: Option<String>,
    pub currency: String,
    pub default_agent_fee_percent: f64,
    /// Whole cedis.
    pub default_walking_fee: u32,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            public_key: None,
            currency: DEFAULT_CURRENCY.to_string(),
            default_agent_fee_percent: DEFAULT_AGENT_FEE_PERCENT,
            default_walking_fee: DEFAULT_WALKING_FEE,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidAgentFee(String),
    InvalidWalkingFee(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16 integer"),
            ConfigError::InvalidHost { source } => {
                write!(f, "APP_HOST must be a valid IP address: {}", source)
            }
            ConfigError::InvalidAgentFee(raw) => write!(
                f,
                "APP_DEFAULT_AGENT_FEE_PERCENT must be a non-negative number, got '{}'",
                raw
            ),
            ConfigError::InvalidWalkingFee(raw) => write!(
                f,
                "APP_DEFAULT_WALKING_FEE must be a whole amount, got '{}'",
                raw
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidAgentFee(_)
            | ConfigError::InvalidWalkingFee(_) => None,
        }
    }
}
