//! Holdings list edits. Each returns a new list; `update_holdings` runs one
//! against a store and saves the result.

use rust_decimal::Decimal;
use yieldfolio_core::errors::Result;
use yieldfolio_core::holdings::{normalize_ticker, HoldingsError};
use yieldfolio_core::{Holding, HoldingsRepositoryTrait};

/// Strict load, `edit`, save. Nothing is written when the store cannot be read.
pub fn update_holdings<F>(store: &dyn HoldingsRepositoryTrait, edit: F) -> Result<Vec<Holding>>
where
    F: FnOnce(&[Holding]) -> Result<Vec<Holding>>,
{
    let current = store.load_for_update()?;
    let updated = edit(&current)?;
    store.save(&updated)?;
    Ok(updated)
}

pub fn add_holding(
    holdings: &[Holding],
    ticker: &str,
    quantity: Decimal,
    target_ratio: Decimal,
) -> Result<Vec<Holding>> {
    let holding = Holding::new(ticker, quantity, target_ratio);
    holding.validate()?;
    if holdings.iter().any(|h| h.ticker == holding.ticker) {
        return Err(HoldingsError::AlreadyExists(holding.ticker).into());
    }
    let mut updated = holdings.to_vec();
    updated.push(holding);
    Ok(updated)
}

pub fn set_holding(
    holdings: &[Holding],
    ticker: &str,
    quantity: Option<Decimal>,
    target_ratio: Option<Decimal>,
) -> Result<Vec<Holding>> {
    let ticker = normalize_ticker(ticker);
    if !holdings.iter().any(|h| h.ticker == ticker) {
        return Err(HoldingsError::NotFound(ticker).into());
    }
    holdings
        .iter()
        .map(|h| {
            if h.ticker != ticker {
                return Ok(h.clone());
            }
            let edited = Holding {
                ticker: h.ticker.clone(),
                quantity: quantity.unwrap_or(h.quantity),
                target_ratio: target_ratio.unwrap_or(h.target_ratio),
            };
            edited.validate()?;
            Ok(edited)
        })
        .collect()
}

pub fn remove_holding(holdings: &[Holding], ticker: &str) -> Result<Vec<Holding>> {
    let ticker = normalize_ticker(ticker);
    let updated: Vec<Holding> = holdings
        .iter()
        .filter(|h| h.ticker != ticker)
        .cloned()
        .collect();
    if updated.len() == holdings.len() {
        return Err(HoldingsError::NotFound(ticker).into());
    }
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::fs;
    use tempfile::tempdir;
    use yieldfolio_core::{CsvHoldingsStore, Error};

    fn sample() -> Vec<Holding> {
        vec![
            Holding::new("SCHD", dec!(100), dec!(60)),
            Holding::new("O", dec!(20), dec!(40)),
        ]
    }

    #[test]
    fn test_add_normalizes_and_appends() {
        let updated = add_holding(&sample(), " jepi ", dec!(5), dec!(0)).unwrap();
        assert_eq!(updated.len(), 3);
        assert_eq!(updated[2].ticker, "JEPI");
    }

    #[test]
    fn test_add_rejects_duplicate_and_invalid() {
        assert!(matches!(
            add_holding(&sample(), "schd", dec!(1), dec!(0)),
            Err(Error::Holdings(HoldingsError::AlreadyExists(_)))
        ));
        assert!(matches!(
            add_holding(&sample(), "VYM", dec!(-1), dec!(0)),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_set_updates_only_given_fields() {
        let updated = set_holding(&sample(), "o", None, Some(dec!(25))).unwrap();
        assert_eq!(updated[1].quantity, dec!(20));
        assert_eq!(updated[1].target_ratio, dec!(25));
        assert_eq!(updated[0], sample()[0]);
    }

    #[test]
    fn test_set_unknown_ticker() {
        assert!(set_holding(&sample(), "KO", Some(dec!(1)), None).is_err());
    }

    #[test]
    fn test_set_rejects_out_of_range_target() {
        assert!(set_holding(&sample(), "O", None, Some(dec!(120))).is_err());
    }

    #[test]
    fn test_remove() {
        let updated = remove_holding(&sample(), "SCHD").unwrap();
        assert_eq!(updated.len(), 1);
        assert!(remove_holding(&updated, "SCHD").is_err());
    }

    #[test]
    fn test_update_saves_edited_list() {
        let dir = tempdir().unwrap();
        let store = CsvHoldingsStore::new(dir.path().join("portfolio.csv"));
        store.save(&sample()).unwrap();

        update_holdings(&store, |h| add_holding(h, "VYM", dec!(1), dec!(0))).unwrap();

        let tickers: Vec<String> = store.load().unwrap().into_iter().map(|h| h.ticker).collect();
        assert_eq!(tickers, vec!["SCHD", "O", "VYM"]);
    }

    #[test]
    fn test_update_leaves_unreadable_file_untouched() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("portfolio.csv");
        let content = "Ticker,Quantity,TargetRatio\nSCHD,100,40\nO,50,30\nJEPI,abc,30\n";
        fs::write(&path, content).unwrap();
        let store = CsvHoldingsStore::new(&path);

        let result = update_holdings(&store, |h| add_holding(h, "VYM", dec!(1), dec!(0)));

        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), content);
    }
}
