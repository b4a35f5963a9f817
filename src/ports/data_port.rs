//! Market-data access port trait.
//!
//! One trait covers every upstream source: the backtester needs candles,
//! the screener needs candles plus an order-book snapshot. Exchange REST
//! clients and local files implement the same surface.

use crate::domain::candle::Candle;
use crate::domain::error::CryptraderError;
use crate::domain::orderbook::OrderBook;

pub trait MarketDataPort {
    /// Up to `limit` most recent candles in chronological order.
    fn fetch_ohlcv(&self, symbol: &str, limit: usize) -> Result<Vec<Candle>, CryptraderError>;

    /// Current order-book snapshot for a symbol.
    fn fetch_order_book(&self, symbol: &str) -> Result<OrderBook, CryptraderError>;

    fn list_symbols(&self) -> Result<Vec<String>, CryptraderError>;
}
