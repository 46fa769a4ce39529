use anyhow::{bail, Context, Result};
use std::env;

const DEFAULT_DB_HOST: &str = "cluster0.xygzlb8.mongodb.net";
const DEFAULT_ORIGINS: &str = "http://localhost:5173,https://healthbridge-3fca1.web.app";

/// Deployment environment. Controls the token cookie attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => AppEnv::Production,
            _ => AppEnv::Development,
        }
    }

    pub fn is_production(self) -> bool {
        self == AppEnv::Production
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub payment: PaymentConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub uri: String,
    pub name: String,
    pub max_pool_size: u32,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub env: AppEnv,
    /// Require a valid token cookie on every non-safe method.
    pub protect_writes: bool,
}

#[derive(Debug, Clone)]
pub struct PaymentConfig {
    pub secret_key: String,
    pub api_base: String,
    pub currency: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let port = var_or("PORT", "8000")
            .parse::<u16>()
            .context("PORT must be a valid port number")?;

        let max_pool_size = var_or("DB_MAX_POOL_SIZE", "20")
            .parse::<u32>()
            .context("DB_MAX_POOL_SIZE must be a positive integer")?;

        Ok(Self {
            server: ServerConfig {
                host: var_or("HOST", "0.0.0.0"),
                port,
                cors_allowed_origins: split_origins(&var_or("CORS_ALLOWED_ORIGINS", DEFAULT_ORIGINS)),
            },
            database: DatabaseConfig {
                uri: database_uri()?,
                name: var_or("DB_NAME", "HealthBridge"),
                max_pool_size,
            },
            auth: AuthConfig {
                secret: required("ACCESS_TOKEN_SECRET")?,
                env: AppEnv::parse(&var_or("APP_ENV", "development")),
                protect_writes: parse_flag(&var_or("PROTECT_WRITES", "false")),
            },
            payment: PaymentConfig {
                secret_key: required("STRIPE_SECRET_KEY")?,
                api_base: var_or("STRIPE_API_BASE", "https://api.stripe.com"),
                currency: var_or("PAYMENT_CURRENCY", "usd").to_lowercase(),
            },
        })
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn required(key: &str) -> Result<String> {
    match env::var(key) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => bail!("{} must be set", key),
    }
}

fn database_uri() -> Result<String> {
    if let Ok(uri) = env::var("DATABASE_URL") {
        if !uri.trim().is_empty() {
            return Ok(uri);
        }
    }

    let user = required("DB_USER").context("set DATABASE_URL or DB_USER/DB_PASS")?;
    let pass = required("DB_PASS").context("set DATABASE_URL or DB_USER/DB_PASS")?;
    Ok(atlas_uri(&user, &pass, &var_or("DB_HOST", DEFAULT_DB_HOST)))
}

/// Builds the Atlas SRV connection string. Credentials are percent-encoded.
pub fn atlas_uri(user: &str, pass: &str, host: &str) -> String {
    format!(
        "mongodb+srv://{}:{}@{}/?retryWrites=true&w=majority&appName=Cluster0",
        urlencoding::encode(user),
        urlencoding::encode(pass),
        host
    )
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.trim_end_matches('/').to_string())
        .collect()
}

fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
