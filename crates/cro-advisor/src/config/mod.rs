use crate::optimizer::{AggregatePolicy, SynthesisOptions};
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
    pub storage: StorageConfig,
    pub analysis: AnalysisConfig,
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

        let backend = match env::var("APP_ARTIFACT_STORE") {
            Ok(value) => ArtifactBackend::parse(&value)
                .ok_or(ConfigError::InvalidArtifactStore { value })?,
            Err(_) => ArtifactBackend::Filesystem,
        };
        let reports_dir =
            PathBuf::from(env::var("APP_REPORTS_DIR").unwrap_or_else(|_| "reports".to_string()));

        let impact_ceiling = parse_f64("APP_IMPACT_CEILING", 100.0)
            .filter(|value| *value > 0.0 && *value <= 100.0)
            .ok_or(ConfigError::InvalidImpactCeiling)?;
        let anchor_markup = parse_f64("APP_ANCHOR_MARKUP", 1.2)
            .filter(|value| *value > 1.0 && value.is_finite())
            .ok_or(ConfigError::InvalidAnchorMarkup)?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            storage: StorageConfig {
                backend,
                reports_dir,
            },
            analysis: AnalysisConfig {
                impact_ceiling,
                anchor_markup,
            },
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

fn parse_f64(key: &str, default: f64) -> Option<f64> {
    match env::var(key) {
        Ok(raw) => raw.trim().parse::<f64>().ok(),
        Err(_) => Some(default),
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Backend used to persist exported reports and comparison bundles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactBackend {
    Filesystem,
    Memory,
}

impl ArtifactBackend {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "filesystem" | "fs" | "file" => Some(Self::Filesystem),
            "memory" | "in-memory" => Some(Self::Memory),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub backend: ArtifactBackend,
    pub reports_dir: PathBuf,
}

/// Tunables for the aggregate estimate and the synthesized page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisConfig {
    pub impact_ceiling: f64,
    pub anchor_markup: f64,
}

impl AnalysisConfig {
    pub fn aggregate_policy(&self) -> AggregatePolicy {
        AggregatePolicy {
            ceiling_pct: self.impact_ceiling,
        }
    }

    pub fn synthesis_options(&self) -> SynthesisOptions {
        SynthesisOptions {
            anchor_markup: self.anchor_markup,
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            impact_ceiling: AggregatePolicy::default().ceiling_pct,
            anchor_markup: SynthesisOptions::default().anchor_markup,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidArtifactStore { value: String },
    InvalidImpactCeiling,
    InvalidAnchorMarkup,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidArtifactStore { value } => write!(
                f,
                "APP_ARTIFACT_STORE must be 'filesystem' or 'memory', got '{}'",
                value
            ),
            ConfigError::InvalidImpactCeiling => {
                write!(f, "APP_IMPACT_CEILING must be a number in (0, 100]")
            }
            ConfigError::InvalidAnchorMarkup => {
                write!(f, "APP_ANCHOR_MARKUP must be a number greater than 1")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidArtifactStore { .. }
            | ConfigError::InvalidImpactCeiling
            | ConfigError::InvalidAnchorMarkup => None,
        }
    }
}
