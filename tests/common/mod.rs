#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
pub use cryptrader::domain::candle::Candle;
use cryptrader::domain::error::CryptraderError;
use cryptrader::domain::orderbook::{BookLevel, OrderBook};
use cryptrader::domain::strategy::StrategyParams;
use cryptrader::ports::data_port::MarketDataPort;
use std::collections::HashMap;

pub struct MockMarketData {
    pub candles: HashMap<String, Vec<Candle>>,
    pub books: HashMap<String, OrderBook>,
    pub errors: HashMap<String, String>,
}

impl MockMarketData {
    pub fn new() -> Self {
        Self {
            candles: HashMap::new(),
            books: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_candles(mut self, symbol: &str, candles: Vec<Candle>) -> Self {
        self.candles.insert(symbol.to_string(), candles);
        self
    }

    pub fn with_book(mut self, symbol: &str, book: OrderBook) -> Self {
        self.books.insert(symbol.to_string(), book);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl MarketDataPort for MockMarketData {
    fn fetch_ohlcv(&self, symbol: &str, limit: usize) -> Result<Vec<Candle>, CryptraderError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(CryptraderError::Data {
                reason: reason.clone(),
            });
        }
        let candles = self
            .candles
            .get(symbol)
            .cloned()
            .ok_or_else(|| CryptraderError::NoData {
                symbol: symbol.to_string(),
            })?;
        let skip = candles.len().saturating_sub(limit);
        Ok(candles.into_iter().skip(skip).collect())
    }

    fn fetch_order_book(&self, symbol: &str) -> Result<OrderBook, CryptraderError> {
        self.books
            .get(symbol)
            .cloned()
            .ok_or_else(|| CryptraderError::NoData {
                symbol: symbol.to_string(),
            })
    }

    fn list_symbols(&self) -> Result<Vec<String>, CryptraderError> {
        let mut symbols: Vec<String> = self.candles.keys().cloned().collect();
        symbols.sort();
        Ok(symbols)
    }
}

pub fn ts(day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        + chrono::Duration::days(day as i64 - 1)
}

pub fn make_candle(symbol: &str, day: u32, close: f64, low: f64, high: f64) -> Candle {
    Candle {
        symbol: symbol.to_string(),
        timestamp: ts(day),
        open: close,
        high,
        low,
        close,
        volume: 100.0,
    }
}

pub fn flat_candle(symbol: &str, day: u32, close: f64, volume: f64) -> Candle {
    Candle {
        symbol: symbol.to_string(),
        timestamp: ts(day),
        open: close,
        high: close,
        low: close,
        close,
        volume,
    }
}

/// Short-period parameters so signals fire after a handful of candles.
pub fn fast_params() -> StrategyParams {
    StrategyParams {
        ema_fast: 2,
        ema_slow: 10,
        rsi_period: 2,
        rsi_lower: 0.0,
        rsi_upper: 100.0,
        stop_lookback: 10,
        take_profit_rr: 2.0,
        ..Default::default()
    }
}

/// Rising closes with a swing low at 95: entry fires on the third candle
/// (close 100) with stop 95 and take-profit 110.
pub fn entry_prefix(symbol: &str) -> Vec<Candle> {
    vec![
        make_candle(symbol, 1, 95.0, 95.0, 95.0),
        make_candle(symbol, 2, 97.0, 95.0, 97.0),
        make_candle(symbol, 3, 100.0, 98.0, 100.0),
    ]
}

pub fn sample_book(bid_size: f64, ask_size: f64) -> OrderBook {
    OrderBook {
        bids: vec![BookLevel {
            price: 99.5,
            size: bid_size,
        }],
        asks: vec![BookLevel {
            price: 100.5,
            size: ask_size,
        }],
    }
}
