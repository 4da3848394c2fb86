//! Configuration management following 12-factor app principles
//!
//! Process-level settings only. Each collaborator (session store,
//! assistant client, skill behaviour) loads its own section from the
//! environment next to the code that uses it.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Skill application id accepted by the endpoint; `None` accepts any
    pub skill_id: Option<String>,

    /// Runtime configuration
    pub rust_log: String,
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid port number, got {raw:?}"))?,
            Err(_) => 3000,
        };

        let config = Self {
            skill_id: env::var("ALEXA_SKILL_ID")
                .ok()
                .filter(|id| !id.trim().is_empty()),
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "voxthread=debug".to_string()),
            port,
        };

        Ok(config)
    }
}
