//! Exponential Moving Average indicator.
//!
//! k = 2/(span+1), seeded with the first close, then
//! EMA[i] = C[i]*k + EMA[i-1]*(1-k). No warmup: every bar is valid.

use crate::domain::candle::Candle;
use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};

pub fn calculate_ema(candles: &[Candle], span: usize) -> IndicatorSeries {
    if span == 0 || candles.is_empty() {
        return IndicatorSeries {
            indicator_type: IndicatorType::Ema(span),
            values: Vec::new(),
        };
    }

    let k = 2.0 / (span as f64 + 1.0);
    let mut values = Vec::with_capacity(candles.len());
    let mut ema = candles[0].close;

    for (i, candle) in candles.iter().enumerate() {
        if i > 0 {
            ema = candle.close * k + ema * (1.0 - k);
        }
        values.push(IndicatorPoint {
            timestamp: candle.timestamp,
            valid: true,
            value: IndicatorValue::Simple(ema),
        });
    }

    IndicatorSeries {
        indicator_type: IndicatorType::Ema(span),
        values,
    }
}
