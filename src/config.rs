use std::env;
use anyhow::{Context, Result};

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_MONGO_URI: &str = "mongodb://localhost:27017/";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub mongo_uri: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let port = match env::var("PORT") {
            Ok(value) => value
                .parse::<u16>()
                .context("PORT must be a valid port number (0-65535)")?,
            Err(_) => DEFAULT_PORT,
        };

        let mongo_uri = env::var("MONGO_URI")
            .ok()
            .filter(|uri| !uri.is_empty())
            .unwrap_or_else(|| DEFAULT_MONGO_URI.to_string());

        Ok(Config { port, mongo_uri })
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  MongoDB URI: {}", redact_credentials(&self.mongo_uri));
        tracing::info!("  Service listening on: 0.0.0.0:{}", self.port);
    }
}

/// Replaces the `user:password@` part of a connection string with `***@`.
fn redact_credentials(uri: &str) -> String {
    let Some((scheme, rest)) = uri.split_once("://") else {
        return uri.to_string();
    };
    let authority_end = rest.find('/').unwrap_or(rest.len());
    match rest[..authority_end].rfind('@') {
        Some(at) => format!("{}://***@{}", scheme, &rest[at + 1..]),
        None => uri.to_string(),
    }
}
