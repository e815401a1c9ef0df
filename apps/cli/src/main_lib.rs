use std::sync::Arc;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use yieldfolio_core::fx::{FxService, MarketDataFxRateProvider};
use yieldfolio_core::{PortfolioService, SummaryTranslation};
use yieldfolio_market_data::{RetryPolicy, SnapshotFetcher, YahooProvider};
use yieldfolio_translation::MyMemoryTranslator;

use crate::config::Config;

pub fn init_tracing() {
    let log_format = std::env::var("YF_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false).with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}

pub fn build_service(config: &Config) -> anyhow::Result<PortfolioService> {
    let provider = Arc::new(YahooProvider::new(config.fetch_timeout)?);
    let policy = RetryPolicy {
        max_retries: config.fetch_max_retries,
        timeout: config.fetch_timeout,
        ..RetryPolicy::default()
    };
    let fetcher = Arc::new(SnapshotFetcher::new(provider, policy, config.fetch_concurrency));

    let fx_provider = Arc::new(MarketDataFxRateProvider::new(fetcher.clone()));
    let fx_service = FxService::with_pair(fx_provider, config.fx_pair.clone());

    let translation = match &config.translate_to {
        Some(lang) => match MyMemoryTranslator::new(config.fetch_timeout) {
            Ok(translator) => Some(SummaryTranslation::new(Arc::new(translator), lang.clone())),
            Err(e) => {
                tracing::warn!("Translation disabled: {}", e);
                None
            }
        },
        None => None,
    };

    tracing::debug!(
        "Using provider '{}' for {}",
        fetcher.provider_id(),
        config.holdings_path.display()
    );
    Ok(PortfolioService::new(fetcher, fx_service, translation))
}
