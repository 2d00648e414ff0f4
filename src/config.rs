use crate::errors::WealthEngineError;
use std::fmt;
use std::str::FromStr;

/// Sandbox API root.
pub const DEV_BASE_URL: &str = "https://api-sandbox.wealthengine.com/v1";
/// Production API root.
pub const PROD_BASE_URL: &str = "https://api.wealthengine.com/v1";

/// Default transport timeout used by the CLI when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Which WealthEngine environment the client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Dev,
    Prod,
}

impl Mode {
    /// Base URL for this environment.
    pub fn base_url(self) -> &'static str {
        match self {
            Mode::Dev => DEV_BASE_URL,
            Mode::Prod => PROD_BASE_URL,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Dev => "Dev",
            Mode::Prod => "Prod",
        }
    }
}

impl FromStr for Mode {
    type Err = WealthEngineError;

    /// Accepts exactly "Dev" or "Prod". Other casings, padded values and the
    /// empty string are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Dev" => Ok(Mode::Dev),
            "Prod" => Ok(Mode::Prod),
            other => Err(WealthEngineError::Config(format!(
                "WealthEngine client must be initialized in either Dev or Prod mode, got {:?}",
                other
            ))),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Level of detail requested from the profile endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DetailMode {
    #[default]
    Full,
    Basic,
}

impl DetailMode {
    /// Parses a detail mode parameter. Unknown or empty values fall back to `Full`.
    pub fn from_param(param: &str) -> Self {
        match param {
            "basic" => DetailMode::Basic,
            "full" => DetailMode::Full,
            other => {
                if !other.is_empty() {
                    tracing::debug!("Unknown detail mode {:?}, using full", other);
                }
                DetailMode::Full
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DetailMode::Full => "full",
            DetailMode::Basic => "basic",
        }
    }
}

impl fmt::Display for DetailMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settings loaded from the environment.
#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub mode: Mode,
    /// Overrides the mode's base URL (proxies, mock servers).
    pub base_url: Option<String>,
    pub timeout_secs: u64,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"[REDACTED]")
            .field("mode", &self.mode)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            api_key: std::env::var("WEALTHENGINE_API_KEY")
                .map_err(|_| anyhow::anyhow!("WEALTHENGINE_API_KEY environment variable required"))
                .and_then(|key| {
                    if key.trim().is_empty() {
                        anyhow::bail!("WEALTHENGINE_API_KEY cannot be empty");
                    }
                    Ok(key)
                })?,
            mode: std::env::var("WEALTHENGINE_MODE")
                .map_err(|_| anyhow::anyhow!("WEALTHENGINE_MODE environment variable required"))
                .and_then(|mode| mode.parse::<Mode>().map_err(|e| anyhow::anyhow!(e)))?,
            base_url: std::env::var("WEALTHENGINE_BASE_URL")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(|url| {
                    if !url.starts_with("http://") && !url.starts_with("https://") {
                        anyhow::bail!("WEALTHENGINE_BASE_URL must start with http:// or https://");
                    }
                    Ok(url)
                })
                .transpose()?,
            timeout_secs: match std::env::var("WEALTHENGINE_TIMEOUT_SECS") {
                Ok(raw) => raw.trim().parse::<u64>().map_err(|_| {
                    anyhow::anyhow!("WEALTHENGINE_TIMEOUT_SECS must be a whole number of seconds")
                })?,
                Err(_) => DEFAULT_TIMEOUT_SECS,
            },
        };

        // Log successful configuration load (without sensitive values)
        tracing::info!("Configuration loaded successfully");
        tracing::debug!("WealthEngine mode: {}", config.mode);
        if let Some(ref url) = config.base_url {
            tracing::info!("WealthEngine base URL overridden: {}", url);
        }
        tracing::debug!("Transport timeout: {}s", config.timeout_secs);

        Ok(config)
    }
}
