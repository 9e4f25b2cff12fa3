use serde::Deserialize;
use std::env;
use std::fmt;

use crate::infrastructure::repositories::{gemini_tts_repository, openai_tts_repository};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    pub tts_backend: TtsBackend,
    /// Request-level guard; segmentation handles anything below this
    pub max_text_length: usize,
    // Gemini backend
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_voice: String,
    pub gemini_chunk_limit: usize,
    // OpenAI backend
    pub openai_api_key: Option<String>,
    pub openai_tts_model: String,
    pub openai_tts_voice: String,
    pub openai_chunk_limit: usize,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Which speech backend a run uses; the two are interchangeable behind the
/// same chunk-synthesizer contract
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum TtsBackend {
    Gemini,
    OpenAi,
}

impl fmt::Display for TtsBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TtsBackend::Gemini => write!(f, "gemini"),
            TtsBackend::OpenAi => write!(f, "openai"),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            environment: match env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string())
                .to_lowercase()
                .as_str()
            {
                "production" => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .to_lowercase()
                .as_str()
            {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            tts_backend: match env::var("TTS_BACKEND")
                .unwrap_or_else(|_| "gemini".to_string())
                .to_lowercase()
                .as_str()
            {
                "openai" => TtsBackend::OpenAi,
                _ => TtsBackend::Gemini,
            },
            max_text_length: env::var("MAX_TEXT_LENGTH")
                .unwrap_or_else(|_| "100000".to_string())
                .parse()?,
            gemini_api_key: env::var("GEMINI_API_KEY").ok(),
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-2.5-pro-preview-tts".to_string()),
            gemini_voice: env::var("GEMINI_VOICE").unwrap_or_else(|_| "Enceladus".to_string()),
            gemini_chunk_limit: env::var("GEMINI_CHUNK_LIMIT")
                .unwrap_or_else(|_| gemini_tts_repository::DEFAULT_CHUNK_LIMIT.to_string())
                .parse()?,
            openai_api_key: env::var("OPENAI_API_KEY").ok(),
            openai_tts_model: env::var("OPENAI_TTS_MODEL").unwrap_or_else(|_| "tts-1".to_string()),
            openai_tts_voice: env::var("OPENAI_TTS_VOICE").unwrap_or_else(|_| "alloy".to_string()),
            openai_chunk_limit: env::var("OPENAI_CHUNK_LIMIT")
                .unwrap_or_else(|_| openai_tts_repository::DEFAULT_CHUNK_LIMIT.to_string())
                .parse()?,
        };

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }
}
