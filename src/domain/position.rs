//! Position tracking and trade records.

use chrono::NaiveDateTime;
use std::fmt;

/// The single open position of a running simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub symbol: String,
    pub quantity: f64,
    pub entry_price: f64,
    pub entry_time: NaiveDateTime,
    pub stop_price: f64,
}

impl Position {
    /// Risk between entry and stop, per unit.
    pub fn risk_per_unit(&self) -> f64 {
        self.entry_price - self.stop_price
    }

    /// Take-profit level at `rr` times the entry risk.
    pub fn take_profit(&self, rr: f64) -> f64 {
        self.entry_price + rr * self.risk_per_unit()
    }

    pub fn unrealized_pnl(&self, price: f64) -> f64 {
        self.quantity * (price - self.entry_price)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Long,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Long => write!(f, "LONG"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    Stop,
    TakeProfit,
    TrendFlip,
    EndOfData,
}

impl fmt::Display for ExitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitReason::Stop => write!(f, "STOP"),
            ExitReason::TakeProfit => write!(f, "TAKE_PROFIT"),
            ExitReason::TrendFlip => write!(f, "TREND_FLIP"),
            ExitReason::EndOfData => write!(f, "END_OF_DATA"),
        }
    }
}

/// A finished round trip. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeRecord {
    pub symbol: String,
    pub side: Side,
    pub quantity: f64,
    pub entry_time: NaiveDateTime,
    pub entry_price: f64,
    pub stop_price: f64,
    pub exit_time: NaiveDateTime,
    pub exit_price: f64,
    pub pnl: f64,
    pub exit_reason: ExitReason,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn sample_position() -> Position {
        Position {
            symbol: "BTCUSDT".into(),
            quantity: 200.0,
            entry_price: 100.0,
            entry_time: ts(15),
            stop_price: 95.0,
        }
    }

    #[test]
    fn risk_per_unit() {
        let pos = sample_position();
        assert!((pos.risk_per_unit() - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn take_profit_at_two_r() {
        let pos = sample_position();
        // 100 + 2*5 = 110
        assert!((pos.take_profit(2.0) - 110.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unrealized_pnl_profit() {
        let pos = sample_position();
        assert!((pos.unrealized_pnl(110.0) - 2000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unrealized_pnl_loss() {
        let pos = sample_position();
        assert!((pos.unrealized_pnl(95.0) - (-1000.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn exit_reason_display() {
        assert_eq!(ExitReason::Stop.to_string(), "STOP");
        assert_eq!(ExitReason::TakeProfit.to_string(), "TAKE_PROFIT");
        assert_eq!(ExitReason::TrendFlip.to_string(), "TREND_FLIP");
        assert_eq!(ExitReason::EndOfData.to_string(), "END_OF_DATA");
    }

    #[test]
    fn side_display() {
        assert_eq!(Side::Long.to_string(), "LONG");
    }

    #[test]
    fn trade_record_fields() {
        let trade = TradeRecord {
            symbol: "BTCUSDT".into(),
            side: Side::Long,
            quantity: 200.0,
            entry_time: ts(15),
            entry_price: 100.0,
            stop_price: 95.0,
            exit_time: ts(20),
            exit_price: 110.0,
            pnl: 2000.0,
            exit_reason: ExitReason::TakeProfit,
        };
        assert_eq!(trade.symbol, "BTCUSDT");
        assert!(trade.exit_time >= trade.entry_time);
        assert!((trade.pnl - 2000.0).abs() < f64::EPSILON);
        assert_eq!(trade.exit_reason, ExitReason::TakeProfit);
    }
}
