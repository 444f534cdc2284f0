use std::str::FromStr;

use anyhow::Context;
use serde::Deserialize;

/// Which half of the API this process serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Accounts, bearer tokens and reviews.
    Reviews,
    /// Anonymous, moderated comments.
    Comments,
}

impl FromStr for Variant {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reviews" => Ok(Variant::Reviews),
            "comments" => Ok(Variant::Comments),
            other => anyhow::bail!("unknown APP_VARIANT {other:?}, expected reviews or comments"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub host: String,
    pub port: u16,
    pub variant: Variant,
    pub max_connections: u32,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let variant = match std::env::var("APP_VARIANT") {
            Ok(v) => v.parse()?,
            Err(_) => Variant::Reviews,
        };

        // The comments API never signs tokens, so it may run without a secret.
        let secret = match (std::env::var("JWT_SECRET"), variant) {
            (Ok(s), _) => s,
            (Err(_), Variant::Comments) => String::new(),
            (Err(e), Variant::Reviews) => return Err(e).context("JWT_SECRET must be set"),
        };

        let jwt = JwtConfig {
            secret,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "feedback".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "feedback-users".into()),
            ttl_minutes: std::env::var("JWT_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(120),
        };

        let port = std::env::var("APP_PORT")
            .or_else(|_| std::env::var("PORT"))
            .ok()
            .map(|v| v.parse::<u16>())
            .transpose()
            .context("APP_PORT must be a port number")?
            .unwrap_or(8080);

        Ok(Self {
            database_url,
            jwt,
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port,
            variant,
            max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(10),
        })
    }
}
