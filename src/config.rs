//! Runtime configuration read from the environment.
//!
//! `.env` is loaded by `main` before this runs, so values there count too.

use std::env;

pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_NUTRITION_MODEL: &str = "mixtral-8x7b-32768";
pub const DEFAULT_SYMPTOM_MODEL: &str = "llama3-8b-8192";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

pub const API_KEY_VAR: &str = "GROQ_API_KEY";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            request_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroqConfig {
    /// `None` when the key is missing or blank. The client then runs degraded.
    pub api_key: Option<String>,
    pub base_url: String,
    pub nutrition_model: String,
    pub symptom_model: String,
    pub timeouts: Timeouts,
}

impl Default for GroqConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_GROQ_BASE_URL.to_string(),
            nutrition_model: DEFAULT_NUTRITION_MODEL.to_string(),
            symptom_model: DEFAULT_SYMPTOM_MODEL.to_string(),
            timeouts: Timeouts::default(),
        }
    }
}

impl GroqConfig {
    /// Build the config from environment variables.
    ///
    /// - `GROQ_API_KEY`: secret, optional (absence is not an error)
    /// - `GROQ_BASE_URL`: defaults to the public Groq endpoint
    /// - `GROQ_NUTRITION_MODEL`, `GROQ_SYMPTOM_MODEL`: per-persona model ids
    /// - `GROQ_REQUEST_TIMEOUT_SECS`, `GROQ_CONNECT_TIMEOUT_SECS`
    pub fn from_env() -> Self {
        let api_key = env::var(API_KEY_VAR)
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        let base_url = env::var("GROQ_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_GROQ_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Self {
            api_key,
            base_url,
            nutrition_model: env_or("GROQ_NUTRITION_MODEL", DEFAULT_NUTRITION_MODEL),
            symptom_model: env_or("GROQ_SYMPTOM_MODEL", DEFAULT_SYMPTOM_MODEL),
            timeouts: Timeouts {
                request_secs: env_parse_u64("GROQ_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
                connect_secs: env_parse_u64("GROQ_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
            },
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
