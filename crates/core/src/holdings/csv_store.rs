use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{Local, NaiveDateTime};
use log::{debug, error, warn};
use rust_decimal::Decimal;
use serde::Deserialize;

use super::{normalize_ticker, Holding, HoldingsError, HoldingsRepositoryTrait};
use crate::errors::Result;

const HEADERS: [&str; 3] = ["Ticker", "Quantity", "TargetRatio"];
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Deserialize)]
struct HoldingRecord {
    #[serde(rename = "Ticker")]
    ticker: String,
    #[serde(rename = "Quantity")]
    quantity: String,
    #[serde(rename = "TargetRatio", default)]
    target_ratio: Option<String>,
}

/// Holdings persisted as a `Ticker,Quantity,TargetRatio` CSV file.
///
/// The last save time is kept in a sibling `<stem>_updated.txt`.
pub struct CsvHoldingsStore {
    path: PathBuf,
}

impl CsvHoldingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn timestamp_path(&self) -> PathBuf {
        let stem = self
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "portfolio".to_string());
        self.path.with_file_name(format!("{}_updated.txt", stem))
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "portfolio.csv".to_string());
        self.path.with_file_name(format!(".{}.tmp", name))
    }

    fn read_holdings(&self) -> Result<Vec<Holding>> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&self.path)?;

        let mut holdings = Vec::new();
        for record in reader.deserialize::<HoldingRecord>() {
            let record = record?;
            let ticker = normalize_ticker(&record.ticker);
            if ticker.is_empty() {
                continue;
            }
            let quantity = parse_decimal(&record.quantity).ok_or_else(|| {
                HoldingsError::Storage(format!(
                    "Invalid quantity '{}' for {}",
                    record.quantity, ticker
                ))
            })?;
            let target_ratio = match record.target_ratio.as_deref().map(str::trim) {
                None | Some("") => Decimal::ZERO,
                Some(raw) => parse_decimal(raw).ok_or_else(|| {
                    HoldingsError::Storage(format!(
                        "Invalid target ratio '{}' for {}",
                        raw, ticker
                    ))
                })?,
            };
            holdings.push(Holding {
                ticker,
                quantity,
                target_ratio,
            });
        }
        Ok(holdings)
    }

    fn write_holdings(&self, holdings: &[Holding]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let temp = self.temp_path();
        {
            let mut writer = csv::Writer::from_path(&temp)?;
            writer.write_record(HEADERS)?;
            for holding in holdings {
                let quantity = holding.quantity.normalize().to_string();
                let target_ratio = holding.target_ratio.normalize().to_string();
                writer.write_record([
                    holding.ticker.as_str(),
                    quantity.as_str(),
                    target_ratio.as_str(),
                ])?;
            }
            writer.flush()?;
        }

        if let Err(e) = fs::rename(&temp, &self.path) {
            let _ = fs::remove_file(&temp);
            return Err(e.into());
        }
        Ok(())
    }
}

impl HoldingsRepositoryTrait for CsvHoldingsStore {
    fn load(&self) -> Result<Vec<Holding>> {
        match self.load_for_update() {
            Ok(holdings) => Ok(holdings),
            Err(e) => {
                error!(
                    "Failed to read holdings from {}: {}",
                    self.path.display(),
                    e
                );
                Ok(Vec::new())
            }
        }
    }

    fn load_for_update(&self) -> Result<Vec<Holding>> {
        if !self.path.exists() {
            debug!("No holdings file at {}", self.path.display());
            return Ok(Vec::new());
        }
        let holdings = self.read_holdings()?;
        debug!(
            "Loaded {} holdings from {}",
            holdings.len(),
            self.path.display()
        );
        Ok(holdings)
    }

    fn save(&self, holdings: &[Holding]) -> Result<()> {
        self.write_holdings(holdings)?;

        let stamp = Local::now().naive_local().format(TIMESTAMP_FORMAT).to_string();
        if let Err(e) = fs::write(self.timestamp_path(), stamp) {
            warn!("Failed to record holdings update time: {}", e);
        }
        debug!("Saved {} holdings to {}", holdings.len(), self.path.display());
        Ok(())
    }

    fn last_updated(&self) -> Option<NaiveDateTime> {
        let raw = fs::read_to_string(self.timestamp_path()).ok()?;
        NaiveDateTime::parse_from_str(raw.trim(), TIMESTAMP_FORMAT).ok()
    }
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}
