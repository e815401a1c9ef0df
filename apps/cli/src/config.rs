use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use yieldfolio_core::constants::DEFAULT_FX_PAIR;

pub struct Config {
    pub holdings_path: PathBuf,
    pub fx_pair: String,
    pub fetch_concurrency: usize,
    pub fetch_timeout: Duration,
    pub fetch_max_retries: u32,
    /// Target language for business summaries; `None` disables translation
    pub translate_to: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self {
            holdings_path: env::var("YF_HOLDINGS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("portfolio.csv")),
            fx_pair: env::var("YF_FX_PAIR").unwrap_or_else(|_| DEFAULT_FX_PAIR.to_string()),
            fetch_concurrency: parse_var("YF_FETCH_CONCURRENCY", 4),
            fetch_timeout: Duration::from_millis(parse_var("YF_FETCH_TIMEOUT_MS", 10_000)),
            fetch_max_retries: parse_var("YF_FETCH_MAX_RETRIES", 2),
            translate_to: env::var("YF_TRANSLATE_TO")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
        }
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
