//! OHLCV candle representation.

use chrono::NaiveDateTime;

#[derive(Debug, Clone, PartialEq)]
pub struct Candle {
    pub symbol: String,
    pub timestamp: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    /// (high + low + close) / 3
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }

    /// Close-to-close percent change versus a previous close.
    /// 0 when the previous close is 0.
    pub fn pct_change(&self, prev_close: f64) -> f64 {
        if prev_close == 0.0 {
            return 0.0;
        }
        (self.close - prev_close) / prev_close
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_candle() -> Candle {
        Candle {
            symbol: "BTCUSDT".into(),
            timestamp: NaiveDate::from_ymd_opt(2024, 1, 15)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            open: 100.0,
            high: 110.0,
            low: 90.0,
            close: 105.0,
            volume: 50_000.0,
        }
    }

    #[test]
    fn typical_price() {
        let candle = sample_candle();
        // (110 + 90 + 105) / 3 = 101.666...
        let expected = (110.0 + 90.0 + 105.0) / 3.0;
        assert!((candle.typical_price() - expected).abs() < f64::EPSILON);
    }

    #[test]
    fn pct_change_up() {
        let candle = sample_candle();
        // (105 - 100) / 100 = 0.05
        assert!((candle.pct_change(100.0) - 0.05).abs() < f64::EPSILON);
    }

    #[test]
    fn pct_change_down() {
        let candle = sample_candle();
        // (105 - 120) / 120 = -0.125
        assert!((candle.pct_change(120.0) - (-0.125)).abs() < f64::EPSILON);
    }

    #[test]
    fn pct_change_zero_prev() {
        let candle = sample_candle();
        assert!((candle.pct_change(0.0) - 0.0).abs() < f64::EPSILON);
    }
}
