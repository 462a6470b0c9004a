//! Application settings: realtor API access and the agent loop.

use crate::realtor::{Credential, RealtorError};

/// Default RapidAPI host for the realtor listings API.
pub const REALTOR_API_HOST: &str = "realtor.p.rapidapi.com";

/// Environment variable holding the RapidAPI key.
pub const REALTOR_API_KEY_VAR: &str = "REALTOR_API_KEY";

/// Optional override of the base URL (useful with a local proxy).
pub const REALTOR_BASE_URL_VAR: &str = "REALTOR_BASE_URL";

/// Connection settings for the realtor API.
#[derive(Debug, Clone)]
pub struct RealtorConfig {
    pub api_key: Credential,
    /// Scheme + host, no trailing slash
    pub base_url: String,
    /// Value of the `X-RapidAPI-Host` header
    pub host: String,
    pub user_agent: String,
}

impl RealtorConfig {
    pub fn new<C: Into<Credential>>(api_key: C) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: format!("https://{REALTOR_API_HOST}"),
            host: REALTOR_API_HOST.to_string(),
            user_agent: concat!("realtor_agent/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Read `REALTOR_API_KEY` (required) and `REALTOR_BASE_URL` (optional).
    /// A local `.env` file is honoured when present.
    pub fn from_env() -> Result<Self, RealtorError> {
        let _ = dotenvy::dotenv();
        let key = std::env::var(REALTOR_API_KEY_VAR)
            .map_err(|_| RealtorError::config(format!("{REALTOR_API_KEY_VAR} not set")))?;
        let config = Self::new(key);
        if config.api_key.is_empty() {
            return Err(RealtorError::config(format!("{REALTOR_API_KEY_VAR} is empty")));
        }
        Ok(match std::env::var(REALTOR_BASE_URL_VAR) {
            Ok(url) if !url.trim().is_empty() => config.with_base_url(url.trim()),
            _ => config,
        })
    }
}

/// Settings for the OpenAI agent loop in the binary.
pub struct Config {
    /// OpenAI model name
    pub model: String,
    pub max_tokens: u32,
    /// Upper bound on propose/execute rounds per question
    pub max_loops: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            max_tokens: 2000,
            max_loops: 5,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults, with `OPENAI_MODEL` overriding the model when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(model) = std::env::var("OPENAI_MODEL") {
            if !model.trim().is_empty() {
                config.model = model.trim().to_string();
            }
        }
        config
    }
}
