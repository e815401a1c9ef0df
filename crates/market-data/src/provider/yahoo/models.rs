//! Yahoo Finance API response models.
//!
//! These models are used for parsing the quoteSummary API responses,
//! which carry the price, dividend and analyst fields a snapshot needs.

use serde::Deserialize;

/// Main response wrapper for quoteSummary API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooQuoteSummaryResponse {
    pub quote_summary: YahooQuoteSummary,
}

/// Quote summary container
#[derive(Debug, Deserialize)]
pub struct YahooQuoteSummary {
    #[serde(default)]
    pub result: Vec<YahooQuoteSummaryResult>,
}

/// Individual result from quoteSummary API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooQuoteSummaryResult {
    pub price: Option<YahooPriceData>,
    pub summary_detail: Option<YahooSummaryDetail>,
    pub financial_data: Option<YahooFinancialData>,
    pub asset_profile: Option<YahooAssetProfile>,
}

/// Price module
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooPriceData {
    pub currency: Option<String>,
    pub regular_market_price: Option<YahooRawValue>,
}

/// Yahoo wraps numbers as `{"raw": 123.45, "fmt": "123.45"}`,
/// or `{}` when no data is available.
#[derive(Debug, Deserialize, Clone)]
pub struct YahooRawValue {
    pub raw: Option<f64>,
}

/// Summary detail module (dividends, beta, 52-week range)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooSummaryDetail {
    pub currency: Option<String>,
    pub dividend_rate: Option<YahooRawValue>,
    pub dividend_yield: Option<YahooRawValue>,
    pub trailing_annual_dividend_rate: Option<YahooRawValue>,
    pub beta: Option<YahooRawValue>,
    pub fifty_two_week_high: Option<YahooRawValue>,
    pub fifty_two_week_low: Option<YahooRawValue>,
}

/// Financial data module (current price, analyst consensus)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooFinancialData {
    pub current_price: Option<YahooRawValue>,
    pub target_mean_price: Option<YahooRawValue>,
    pub recommendation_key: Option<String>,
}

/// Asset profile module (company description)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooAssetProfile {
    pub long_business_summary: Option<String>,
}
