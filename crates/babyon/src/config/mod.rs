use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use crate::sitters::video::VideoPolicyConfig;

const DEVELOPMENT_JWT_SECRET: &str = "babyon-development-secret-change-me";
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:*,http://127.0.0.1:*";

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
    pub auth: AuthConfig,
    pub cors: CorsConfig,
    pub storage: StorageConfig,
    pub video: VideoPolicyConfig,
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
        let log_format = LogFormat::from_str(
            &env::var("APP_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string()),
        );

        let jwt_secret = match env::var("APP_JWT_SECRET") {
            Ok(secret) if !secret.trim().is_empty() => secret,
            _ if environment == AppEnvironment::Production => {
                return Err(ConfigError::MissingJwtSecret)
            }
            _ => DEVELOPMENT_JWT_SECRET.to_string(),
        };

        let allowed_origins = env::var("APP_CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| DEFAULT_CORS_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        let bucket = env::var("APP_STORAGE_BUCKET").unwrap_or_else(|_| "babyon-media".to_string());

        let defaults = VideoPolicyConfig::default();
        let video = VideoPolicyConfig {
            max_duration_seconds: number_var(
                "VIDEO_MAX_DURATION_SECONDS",
                defaults.max_duration_seconds,
            )?,
            max_file_size_bytes: number_var(
                "VIDEO_MAX_FILE_SIZE_BYTES",
                defaults.max_file_size_bytes,
            )?,
            question_sample_size: number_var(
                "VIDEO_QUESTION_SAMPLE_SIZE",
                defaults.question_sample_size,
            )?,
            estimated_seconds_per_mib: number_var(
                "VIDEO_ESTIMATED_SECONDS_PER_MIB",
                defaults.estimated_seconds_per_mib,
            )?,
            presigned_url_ttl: Duration::from_secs(number_var(
                "VIDEO_PRESIGNED_URL_TTL_SECONDS",
                defaults.presigned_url_ttl.as_secs(),
            )?),
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig {
                log_level,
                format: log_format,
            },
            auth: AuthConfig { jwt_secret },
            cors: CorsConfig { allowed_origins },
            storage: StorageConfig { bucket },
            video,
        })
    }
}

fn number_var<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { key, value: raw }),
        Err(_) => Ok(default),
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
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
}

impl LogFormat {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "pretty" => Self::Pretty,
            _ => Self::Compact,
        }
    }
}

/// Signing material for bearer tokens.
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .finish()
    }
}

/// Browser origins allowed to call the API.
#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    /// Matches an `Origin` header against the configured patterns. A pattern ending in
    /// `:*` accepts any port on that scheme and host.
    pub fn allows(&self, origin: &str) -> bool {
        self.allowed_origins
            .iter()
            .any(|pattern| origin_matches(pattern, origin))
    }
}

fn origin_matches(pattern: &str, origin: &str) -> bool {
    if pattern == "*" {
        return true;
    }

    match pattern.strip_suffix(":*") {
        Some(base) => match origin.strip_prefix(base) {
            Some("") => true,
            Some(rest) => rest
                .strip_prefix(':')
                .map(|port| !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()))
                .unwrap_or(false),
            None => false,
        },
        None => pattern.eq_ignore_ascii_case(origin),
    }
}

/// Object storage naming.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub bucket: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidNumber { key: &'static str, value: String },
    MissingJwtSecret,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { key, value } => {
                write!(f, "{key} must be a non-negative integer (found '{value}')")
            }
            ConfigError::MissingJwtSecret => {
                write!(f, "APP_JWT_SECRET must be set when APP_ENV=production")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidNumber { .. }
            | ConfigError::MissingJwtSecret => None,
        }
    }
}
