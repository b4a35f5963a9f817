//! Strategy parameters.
//!
//! Entry: trend up (fast EMA > slow EMA) + RSI inside a neutral band +
//! OBV rising. Exit: swing-low stop, take-profit at a risk multiple, or
//! trend flip.

#[derive(Debug, Clone, PartialEq)]
pub struct StrategyParams {
    pub ema_fast: usize,
    pub ema_slow: usize,
    pub rsi_period: usize,
    pub rsi_lower: f64,
    pub rsi_upper: f64,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    /// Bars before the entry bar scanned for the swing low.
    pub stop_lookback: usize,
    /// Take-profit distance as a multiple of entry risk.
    pub take_profit_rr: f64,
}

impl Default for StrategyParams {
    fn default() -> Self {
        StrategyParams {
            ema_fast: 50,
            ema_slow: 200,
            rsi_period: 14,
            rsi_lower: 40.0,
            rsi_upper: 55.0,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            stop_lookback: 10,
            take_profit_rr: 2.0,
        }
    }
}
