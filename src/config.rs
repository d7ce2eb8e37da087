// Process configuration loaded from the environment

use chrono::Duration;

/// Minimum accepted length of the token signing secret, in bytes
pub const MIN_SECRET_LEN: usize = 32;

/// Default access token lifetime
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 60;

/// Errors raised while reading configuration at startup
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set in environment")]
    Missing(&'static str),

    #[error("JWT_SECRET must be at least {} bytes long", MIN_SECRET_LEN)]
    WeakSecret,

    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
    pub tasks_require_auth: bool,
    /// Empty means any origin is allowed
    pub cors_allowed_origins: Vec<String>,
}

// Keeps the secret out of logs
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"<redacted>")
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl_minutes", &self.token_ttl.num_minutes())
            .field("host", &self.host)
            .field("port", &self.port)
            .field("max_connections", &self.max_connections)
            .field("tasks_require_auth", &self.tasks_require_auth)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .finish()
    }
}

impl Config {
    /// Load configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let jwt_secret = get("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;
        if jwt_secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::WeakSecret);
        }

        let ttl_minutes = match get("ACCESS_TOKEN_TTL_MINUTES") {
            Some(raw) => match raw.trim().parse::<i64>() {
                Ok(minutes) if minutes > 0 => minutes,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "ACCESS_TOKEN_TTL_MINUTES",
                        value: raw,
                    })
                }
            },
            None => DEFAULT_TOKEN_TTL_MINUTES,
        };

        let host = get("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_or("PORT", get("PORT"), 8000u16)?;
        let max_connections = parse_or("DATABASE_MAX_CONNECTIONS", get("DATABASE_MAX_CONNECTIONS"), 5u32)?;
        let tasks_require_auth = match get("TASKS_REQUIRE_AUTH") {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::Invalid {
                name: "TASKS_REQUIRE_AUTH",
                value: raw,
            })?,
            None => false,
        };

        let cors_allowed_origins = get("CORS_ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty() && origin != "*")
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            database_url,
            jwt_secret,
            token_ttl: Duration::minutes(ttl_minutes),
            host,
            port,
            max_connections,
            tasks_require_auth,
            cors_allowed_origins,
        })
    }

    /// Socket address string the server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: std::str::FromStr>(
    name: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
