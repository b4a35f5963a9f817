//! CSV file market-data adapter.
//!
//! Candles live in `<SYMBOL>.csv` with columns
//! `timestamp,open,high,low,close,volume`; timestamps are epoch
//! milliseconds or `YYYY-MM-DD` dates. Order-book snapshots live in
//! `<SYMBOL>_book.csv` with columns `side,price,size`.

use crate::domain::candle::Candle;
use crate::domain::error::CryptraderError;
use crate::domain::orderbook::{BookLevel, OrderBook};
use crate::ports::data_port::MarketDataPort;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use std::fs;
use std::path::PathBuf;

const BOOK_SUFFIX: &str = "_book.csv";

pub struct CsvMarketAdapter {
    base_path: PathBuf,
}

impl CsvMarketAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn candle_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol))
    }

    fn book_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}{}", symbol, BOOK_SUFFIX))
    }
}

fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, CryptraderError> {
    if let Ok(millis) = raw.parse::<i64>() {
        return DateTime::from_timestamp_millis(millis)
            .map(|dt| dt.naive_utc())
            .ok_or_else(|| CryptraderError::Data {
                reason: format!("timestamp out of range: {}", raw),
            });
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|d| d.and_time(NaiveTime::MIN))
        .map_err(|e| CryptraderError::Data {
            reason: format!("invalid timestamp {}: {}", raw, e),
        })
}

fn parse_field(record: &csv::StringRecord, index: usize, name: &str) -> Result<f64, CryptraderError> {
    record
        .get(index)
        .ok_or_else(|| CryptraderError::Data {
            reason: format!("missing {} column", name),
        })?
        .trim()
        .parse()
        .map_err(|e| CryptraderError::Data {
            reason: format!("invalid {} value: {}", name, e),
        })
}

impl MarketDataPort for CsvMarketAdapter {
    fn fetch_ohlcv(&self, symbol: &str, limit: usize) -> Result<Vec<Candle>, CryptraderError> {
        let path = self.candle_path(symbol);
        let content = fs::read_to_string(&path).map_err(|e| CryptraderError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut candles = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| CryptraderError::Data {
                reason: format!("CSV parse error: {}", e),
            })?;

            let raw_ts = record.get(0).ok_or_else(|| CryptraderError::Data {
                reason: "missing timestamp column".into(),
            })?;
            let timestamp = parse_timestamp(raw_ts.trim())?;

            candles.push(Candle {
                symbol: symbol.to_string(),
                timestamp,
                open: parse_field(&record, 1, "open")?,
                high: parse_field(&record, 2, "high")?,
                low: parse_field(&record, 3, "low")?,
                close: parse_field(&record, 4, "close")?,
                volume: parse_field(&record, 5, "volume")?,
            });
        }

        candles.sort_by_key(|c| c.timestamp);
        if candles.len() > limit {
            candles.drain(..candles.len() - limit);
        }
        Ok(candles)
    }

    fn fetch_order_book(&self, symbol: &str) -> Result<OrderBook, CryptraderError> {
        let path = self.book_path(symbol);
        let content = fs::read_to_string(&path).map_err(|e| CryptraderError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut book = OrderBook::default();

        for result in rdr.records() {
            let record = result.map_err(|e| CryptraderError::Data {
                reason: format!("CSV parse error: {}", e),
            })?;

            let side = record
                .get(0)
                .ok_or_else(|| CryptraderError::Data {
                    reason: "missing side column".into(),
                })?
                .trim()
                .to_lowercase();
            let level = BookLevel {
                price: parse_field(&record, 1, "price")?,
                size: parse_field(&record, 2, "size")?,
            };

            match side.as_str() {
                "bid" => book.bids.push(level),
                "ask" => book.asks.push(level),
                other => {
                    return Err(CryptraderError::Data {
                        reason: format!("unknown order-book side: {}", other),
                    })
                }
            }
        }

        Ok(book)
    }

    fn list_symbols(&self) -> Result<Vec<String>, CryptraderError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| CryptraderError::Data {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut symbols = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| CryptraderError::Data {
                reason: format!("directory entry error: {}", e),
            })?;

            let name = entry.file_name();
            let name_str = name.to_string_lossy();

            if name_str.ends_with(BOOK_SUFFIX) {
                continue;
            }
            if let Some(symbol) = name_str.strip_suffix(".csv") {
                symbols.push(symbol.to_string());
            }
        }

        symbols.sort();
        Ok(symbols)
    }
}
