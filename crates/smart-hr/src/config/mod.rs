use crate::assistant::AssistantConfig;
use crate::finance::loans::LoanPolicy;
use crate::locale::Locale;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

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

/// Top-level configuration, loaded once at startup and passed down explicitly.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub locale: Locale,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub loans: LoanPolicy,
    pub assistant: AssistantConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let locale = match env::var("APP_LOCALE") {
            Ok(raw) => Locale::parse(&raw).ok_or(ConfigError::InvalidLocale(raw))?,
            Err(_) => Locale::default(),
        };

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let mut loans = LoanPolicy::default();
        if let Ok(raw) = env::var("LOAN_MAX_DEDUCTION_PCT") {
            loans.max_deduction_pct = raw
                .trim()
                .parse::<u8>()
                .ok()
                .filter(|pct| (1..=100).contains(pct))
                .ok_or(ConfigError::InvalidDeductionRatio)?;
        }

        let mut assistant = AssistantConfig {
            locale,
            ..AssistantConfig::default()
        };
        if let Ok(model) = env::var("ASSISTANT_MODEL") {
            assistant.model = model;
        }
        if let Ok(raw) = env::var("ASSISTANT_TEMPERATURE") {
            assistant.temperature = raw
                .trim()
                .parse::<f32>()
                .ok()
                .filter(|value| (0.0..=2.0).contains(value))
                .ok_or(ConfigError::InvalidTemperature)?;
        }

        Ok(Self {
            environment,
            locale,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            loans,
            assistant,
        })
    }
}

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

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidLocale(String),
    InvalidDeductionRatio,
    InvalidTemperature,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidLocale(value) => {
                write!(f, "APP_LOCALE must be 'ar' or 'en' (got '{value}')")
            }
            ConfigError::InvalidDeductionRatio => {
                write!(f, "LOAN_MAX_DEDUCTION_PCT must be an integer between 1 and 100")
            }
            ConfigError::InvalidTemperature => {
                write!(f, "ASSISTANT_TEMPERATURE must be a number between 0.0 and 2.0")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for key in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "APP_LOCALE",
            "LOAN_MAX_DEDUCTION_PCT",
            "ASSISTANT_MODEL",
            "ASSISTANT_TEMPERATURE",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.locale, Locale::Arabic);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.loans.max_deduction_pct, 50);
        assert_eq!(config.assistant.locale, Locale::Arabic);
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn locale_flows_into_assistant_settings() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_LOCALE", "en");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.locale, Locale::English);
        assert_eq!(config.assistant.locale, Locale::English);
        reset_env();
    }

    #[test]
    fn rejects_out_of_range_deduction_ratio() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("LOAN_MAX_DEDUCTION_PCT", "0");
        let err = AppConfig::load().expect_err("zero percent is refused");
        assert!(matches!(err, ConfigError::InvalidDeductionRatio));
        reset_env();
    }

    #[test]
    fn rejects_unknown_locale() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_LOCALE", "fr");
        let err = AppConfig::load().expect_err("unknown locale is refused");
        assert!(matches!(err, ConfigError::InvalidLocale(ref value) if value == "fr"));
        reset_env();
    }
}
