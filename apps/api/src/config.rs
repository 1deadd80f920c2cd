use std::path::PathBuf;

use anyhow::{Context, Result};

const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_IMAGE_MODEL: &str = "dall-e-3";
const DEFAULT_IMAGE_SIZE: &str = "1024x1024";
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_TOKEN_SECRET: &str = "guidebook-admin-token-secret";
const DEFAULT_CORS_ORIGINS: &str =
    "http://localhost:5173,http://localhost:5174,http://localhost:3000";

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub model_name: String,
    pub article_model: String,
    pub image_model: String,
    pub image_size: String,
    pub cache_dir: PathBuf,
    pub admin_password: String,
    pub admin_token_secret: String,
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let model_name = env_or("OPENAI_MODEL_NAME", DEFAULT_MODEL);

        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            openai_base_url: env_or("OPENAI_BASE_URL", DEFAULT_BASE_URL),
            article_model: env_or("OPENAI_ARTICLE_MODEL", &model_name),
            model_name,
            image_model: env_or("OPENAI_IMAGE_MODEL", DEFAULT_IMAGE_MODEL),
            image_size: env_or("OPENAI_IMAGE_SIZE", DEFAULT_IMAGE_SIZE),
            cache_dir: PathBuf::from(env_or("CACHE_DIR", "cache")),
            admin_password: env_or("ADMIN_PASSWORD", "changeme"),
            admin_token_secret: env_or("ADMIN_TOKEN_SECRET", DEFAULT_TOKEN_SECRET),
            host: env_or("HOST", "0.0.0.0"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            cors_origins: parse_origins(&env_or("CORS_ORIGINS", DEFAULT_CORS_ORIGINS)),
            rust_log: env_or("RUST_LOG", "info"),
        })
    }

    pub fn detail_cache_path(&self) -> PathBuf {
        self.cache_dir.join("detail_cache.json")
    }

    pub fn article_cache_path(&self) -> PathBuf {
        self.cache_dir.join("articles.json")
    }

    pub fn career_cache_path(&self) -> PathBuf {
        self.cache_dir.join("career_cache.json")
    }

    pub fn transition_cache_path(&self) -> PathBuf {
        self.cache_dir.join("transition_plan_cache.json")
    }

    pub fn image_dir(&self) -> PathBuf {
        self.cache_dir.join("career_images")
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Splits a comma-separated origin list, dropping blanks.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
impl Config {
    /// Test configuration rooted at `cache_dir`; never reads the environment.
    pub fn for_tests(cache_dir: impl Into<PathBuf>) -> Self {
        Config {
            openai_api_key: "test-key".to_string(),
            openai_base_url: DEFAULT_BASE_URL.to_string(),
            model_name: DEFAULT_MODEL.to_string(),
            article_model: "article-model".to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            image_size: DEFAULT_IMAGE_SIZE.to_string(),
            cache_dir: cache_dir.into(),
            admin_password: "letmein".to_string(),
            admin_token_secret: "test-secret".to_string(),
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: parse_origins(DEFAULT_CORS_ORIGINS),
            rust_log: "debug".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins_trims_and_drops_blanks() {
        let origins = parse_origins(" http://a.test , ,http://b.test,");
        assert_eq!(origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn test_cache_paths_live_under_cache_dir() {
        let config = Config::for_tests("/tmp/gb");
        assert_eq!(config.detail_cache_path(), PathBuf::from("/tmp/gb/detail_cache.json"));
        assert_eq!(config.article_cache_path(), PathBuf::from("/tmp/gb/articles.json"));
        assert_eq!(config.career_cache_path(), PathBuf::from("/tmp/gb/career_cache.json"));
        assert_eq!(
            config.transition_cache_path(),
            PathBuf::from("/tmp/gb/transition_plan_cache.json")
        );
        assert_eq!(config.image_dir(), PathBuf::from("/tmp/gb/career_images"));
    }
}
