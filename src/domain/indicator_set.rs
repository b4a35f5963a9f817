//! Precomputed indicator series for one candle sequence.
//!
//! Everything a strategy evaluates is computed in a single pass per
//! indicator before the backtest loop starts; the loop itself only
//! reads aligned values.

use crate::domain::candle::Candle;
use crate::domain::indicator::{
    calculate_ema, calculate_macd, calculate_obv, calculate_rsi, IndicatorSeries, IndicatorValue,
};
use crate::domain::strategy::StrategyParams;

#[derive(Debug, Clone)]
pub struct IndicatorSet {
    pub ema_fast: IndicatorSeries,
    pub ema_slow: IndicatorSeries,
    pub rsi: IndicatorSeries,
    pub obv: IndicatorSeries,
    pub macd: IndicatorSeries,
}

impl IndicatorSet {
    pub fn compute(candles: &[Candle], params: &StrategyParams) -> Self {
        IndicatorSet {
            ema_fast: calculate_ema(candles, params.ema_fast),
            ema_slow: calculate_ema(candles, params.ema_slow),
            rsi: calculate_rsi(candles, params.rsi_period),
            obv: calculate_obv(candles),
            macd: calculate_macd(
                candles,
                params.macd_fast,
                params.macd_slow,
                params.macd_signal,
            ),
        }
    }

    pub fn ema_fast_at(&self, index: usize) -> Option<f64> {
        self.ema_fast.simple_at(index)
    }

    pub fn ema_slow_at(&self, index: usize) -> Option<f64> {
        self.ema_slow.simple_at(index)
    }

    pub fn rsi_at(&self, index: usize) -> Option<f64> {
        self.rsi.simple_at(index)
    }

    pub fn obv_at(&self, index: usize) -> Option<f64> {
        self.obv.simple_at(index)
    }

    /// MACD (line, signal, histogram) at `index`.
    pub fn macd_at(&self, index: usize) -> Option<(f64, f64, f64)> {
        let point = self.macd.values.get(index)?;
        if !point.valid {
            return None;
        }
        match point.value {
            IndicatorValue::Macd {
                line,
                signal,
                histogram,
            } => Some((line, signal, histogram)),
            _ => None,
        }
    }
}
