use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub csrf_secret: String,
    /// When false, state-changing endpoints skip the authenticity token check
    pub allow_forgery_protection: bool,
    /// Units requested per child for each needed item
    pub default_item_quantity: i32,
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET must be set")?;

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            csrf_secret: env::var("CSRF_SECRET").unwrap_or_else(|_| jwt_secret.clone()),
            jwt_secret,
            jwt_issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "partner-requests".to_string()),
            allow_forgery_protection: parse_bool(
                &env::var("ALLOW_FORGERY_PROTECTION").unwrap_or_else(|_| "true".to_string()),
            )
            .context("ALLOW_FORGERY_PROTECTION must be true or false")?,
            default_item_quantity: parse_item_quantity(
                &env::var("DEFAULT_ITEM_QUANTITY").unwrap_or_else(|_| "50".to_string()),
            )
            .context("DEFAULT_ITEM_QUANTITY must be a positive number")?,
            allowed_origins: env::var("ALLOWED_ORIGINS")
                .map(|v| parse_origins(&v))
                .unwrap_or_default(),
        })
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(anyhow::anyhow!("Invalid boolean: {}", other)),
    }
}

fn parse_item_quantity(value: &str) -> Result<i32> {
    let quantity: i32 = value.trim().parse()?;
    if quantity <= 0 {
        anyhow::bail!("Item quantity must be positive, got {}", quantity);
    }
    Ok(quantity)
}

fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
