//! Market screening heuristics.
//!
//! Stateless classifiers over a recent candle window plus an order-book
//! snapshot: accumulation/distribution phase detection from price drift,
//! volume surge and range compression, and a whale-pressure score from
//! resting bid/ask volume.

use std::fmt;

use super::candle::Candle;
use super::orderbook::OrderBook;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketPhase {
    Accumulation,
    Distribution,
}

impl fmt::Display for MarketPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarketPhase::Accumulation => write!(f, "Accumulation"),
            MarketPhase::Distribution => write!(f, "Distribution"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScreenParams {
    /// Trailing candles inspected by the phase detector.
    pub lookback: usize,
    /// Minimum summed volume percent change to call a surge.
    pub volume_surge: f64,
    /// Maximum absolute summed price percent change for accumulation.
    pub price_drift: f64,
    /// Minimum summed price decline for distribution.
    pub price_drop: f64,
    /// Maximum high-low range as a fraction of the average close.
    pub volatility_ratio: f64,
}

impl Default for ScreenParams {
    fn default() -> Self {
        ScreenParams {
            lookback: 5,
            volume_surge: 0.2,
            price_drift: 0.01,
            price_drop: 0.02,
            volatility_ratio: 0.05,
        }
    }
}

/// Classify the trailing window as accumulation, distribution, or neither.
///
/// Accumulation: volume surging while price drifts sideways inside a
/// compressed range. Distribution: volume surging into falling prices.
pub fn detect_market_phase(candles: &[Candle], params: &ScreenParams) -> Option<MarketPhase> {
    let start = candles.len().saturating_sub(params.lookback);
    let recent = &candles[start..];
    if recent.len() < 2 {
        return None;
    }

    let mut price_change = 0.0;
    let mut volume_change = 0.0;
    for window in recent.windows(2) {
        price_change += window[1].pct_change(window[0].close);
        if window[0].volume != 0.0 {
            volume_change += (window[1].volume - window[0].volume) / window[0].volume;
        }
    }

    let high = recent.iter().map(|c| c.high).fold(f64::NEG_INFINITY, f64::max);
    let low = recent.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);
    let volatility = high - low;
    let avg_price = recent.iter().map(|c| c.close).sum::<f64>() / recent.len() as f64;

    if volume_change > params.volume_surge
        && price_change.abs() < params.price_drift
        && volatility < params.volatility_ratio * avg_price
    {
        Some(MarketPhase::Accumulation)
    } else if volume_change > params.volume_surge && price_change < -params.price_drop {
        Some(MarketPhase::Distribution)
    } else {
        None
    }
}

/// Resting bid volume over resting ask volume, rounded to two decimals.
/// 0 when the ask side is empty.
pub fn whale_score(book: &OrderBook) -> f64 {
    let ask_volume = book.ask_volume();
    if ask_volume <= 0.0 {
        return 0.0;
    }
    (book.bid_volume() / ask_volume * 100.0).round() / 100.0
}

/// Signed composite: whale score scaled by +/-100 depending on phase,
/// 0 without a phase.
pub fn strength_index(phase: Option<MarketPhase>, whale_score: f64) -> f64 {
    match phase {
        Some(MarketPhase::Accumulation) => whale_score * 100.0,
        Some(MarketPhase::Distribution) => whale_score * -100.0,
        None => 0.0,
    }
}

/// One screened symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenResult {
    pub symbol: String,
    pub phase: Option<MarketPhase>,
    pub whale_score: f64,
    pub strength_index: f64,
}

impl ScreenResult {
    pub fn evaluate(
        symbol: &str,
        candles: &[Candle],
        book: &OrderBook,
        params: &ScreenParams,
    ) -> Self {
        let phase = detect_market_phase(candles, params);
        let score = whale_score(book);
        ScreenResult {
            symbol: symbol.to_string(),
            phase,
            whale_score: score,
            strength_index: strength_index(phase, score),
        }
    }
}

/// Strongest accumulation first, strongest distribution last.
pub fn rank_screen_results(results: &mut [ScreenResult]) {
    results.sort_by(|a, b| {
        b.strength_index
            .partial_cmp(&a.strength_index)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}
