//! MACD (Moving Average Convergence Divergence) indicator.
//!
//! MACD Line = EMA(fast) - EMA(slow)
//! Signal Line = EMA(signal) of MACD Line, seeded with the line's first value
//! Histogram = MACD Line - Signal Line
//!
//! Default parameters: fast=12, slow=26, signal=9.
//! First-value EMA seeding means every bar is defined; no warmup.

use crate::domain::candle::Candle;
use crate::domain::indicator::{
    calculate_ema, IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue,
};

pub const DEFAULT_FAST: usize = 12;
pub const DEFAULT_SLOW: usize = 26;
pub const DEFAULT_SIGNAL: usize = 9;

pub fn calculate_macd(
    candles: &[Candle],
    fast: usize,
    slow: usize,
    signal_span: usize,
) -> IndicatorSeries {
    if candles.is_empty() || fast == 0 || slow == 0 || signal_span == 0 {
        return IndicatorSeries {
            indicator_type: IndicatorType::Macd {
                fast,
                slow,
                signal: signal_span,
            },
            values: Vec::new(),
        };
    }

    let ema_fast = ema_raw_values(candles, fast);
    let ema_slow = ema_raw_values(candles, slow);

    let macd_line: Vec<f64> = ema_fast
        .iter()
        .zip(ema_slow.iter())
        .map(|(f, s)| f - s)
        .collect();

    let k = 2.0 / (signal_span as f64 + 1.0);
    let mut signal_line = Vec::with_capacity(candles.len());
    let mut signal_ema = macd_line[0];
    for (i, &line) in macd_line.iter().enumerate() {
        if i > 0 {
            signal_ema = line * k + signal_ema * (1.0 - k);
        }
        signal_line.push(signal_ema);
    }

    let values = candles
        .iter()
        .enumerate()
        .map(|(i, candle)| IndicatorPoint {
            timestamp: candle.timestamp,
            valid: true,
            value: IndicatorValue::Macd {
                line: macd_line[i],
                signal: signal_line[i],
                histogram: macd_line[i] - signal_line[i],
            },
        })
        .collect();

    IndicatorSeries {
        indicator_type: IndicatorType::Macd {
            fast,
            slow,
            signal: signal_span,
        },
        values,
    }
}

pub fn calculate_macd_default(candles: &[Candle]) -> IndicatorSeries {
    calculate_macd(candles, DEFAULT_FAST, DEFAULT_SLOW, DEFAULT_SIGNAL)
}

/// Extract raw f64 values from the EMA module.
fn ema_raw_values(candles: &[Candle], span: usize) -> Vec<f64> {
    calculate_ema(candles, span)
        .values
        .iter()
        .map(|p| p.value.as_simple().unwrap_or(0.0))
        .collect()
}
