use anyhow::{Context, Result};

use apify_client::DEFAULT_BASE_URL;

const DEFAULT_PAGE_SIZE: u64 = 1000;

/// Application configuration loaded from environment variables.
/// Query parameters for individual jobs come from the command line.
#[derive(Debug, Clone)]
pub struct Config {
    pub apify_api_key: String,
    pub apify_base_url: String,
    /// Dataset items requested per page.
    pub page_size: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let apify_api_key = std::env::var("APIFY_API_KEY")
            .context("APIFY_API_KEY environment variable is required")?;
        if apify_api_key.trim().is_empty() {
            anyhow::bail!("APIFY_API_KEY is set but empty");
        }

        let config = Self {
            apify_api_key,
            apify_base_url: match std::env::var("APIFY_BASE_URL") {
                Ok(raw) => parse_base_url(&raw)?,
                Err(_) => DEFAULT_BASE_URL.to_string(),
            },
            page_size: match std::env::var("APIFY_PAGE_SIZE") {
                Ok(raw) => parse_page_size(&raw)?,
                Err(_) => DEFAULT_PAGE_SIZE,
            },
        };

        Ok(config)
    }

    pub fn log_redacted(&self) {
        tracing::info!("Config loaded:");
        tracing::info!("  APIFY_API_KEY: {}", preview(&self.apify_api_key));
        tracing::info!("  APIFY_BASE_URL: {}", self.apify_base_url);
        tracing::info!("  APIFY_PAGE_SIZE: {}", self.page_size);
    }
}

fn parse_page_size(raw: &str) -> Result<u64> {
    let size: u64 = raw
        .trim()
        .parse()
        .with_context(|| format!("APIFY_PAGE_SIZE must be a number, got '{raw}'"))?;
    if size == 0 {
        anyhow::bail!("APIFY_PAGE_SIZE must be greater than zero");
    }
    Ok(size)
}

fn parse_base_url(raw: &str) -> Result<String> {
    let url = raw.trim();
    if url.is_empty() {
        anyhow::bail!("APIFY_BASE_URL is set but empty");
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        anyhow::bail!("APIFY_BASE_URL must be an absolute http(s) URL, got '{raw}'");
    }
    Ok(url.to_string())
}

fn preview(val: &str) -> String {
    let n = val.chars().count().min(5);
    let head: String = val.chars().take(n).collect();
    format!("{}...({} chars)", head, val.chars().count())
}
