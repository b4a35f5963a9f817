//! Backtest engine: a single-pass FLAT/LONG state machine over candles.
//!
//! Entry requires all three filters at the current bar: trend (fast EMA
//! above slow EMA), momentum (RSI inside the configured band), and volume
//! confirmation (OBV above the previous bar). Position size is derived
//! from the risk budget and the distance to the swing-low stop. Exits are
//! checked every bar the position is open, stop first, then take-profit,
//! then trend flip; a position still open after the last bar is closed at
//! that bar's close.

use crate::domain::account::Account;
use crate::domain::candle::Candle;
use crate::domain::error::CryptraderError;
use crate::domain::indicator_set::IndicatorSet;
use crate::domain::position::{ExitReason, Position, TradeRecord};
use crate::domain::strategy::StrategyParams;

/// OBV comparison and the swing-low window both need a prior bar.
pub const MIN_CANDLES: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestConfig {
    pub initial_capital: f64,
    /// Fraction of cash risked against the stop distance per trade.
    pub risk_fraction: f64,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        BacktestConfig {
            initial_capital: 100_000.0,
            risk_fraction: 0.01,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BacktestResult {
    pub trades: Vec<TradeRecord>,
    pub initial_capital: f64,
    pub final_cash: f64,
}

impl BacktestResult {
    pub fn total_pnl(&self) -> f64 {
        self.trades.iter().map(|t| t.pnl).sum()
    }
}

pub fn run_backtest(
    candles: &[Candle],
    params: &StrategyParams,
    config: &BacktestConfig,
) -> Result<BacktestResult, CryptraderError> {
    if candles.len() < MIN_CANDLES {
        return Err(CryptraderError::InsufficientData {
            symbol: candles
                .first()
                .map(|c| c.symbol.clone())
                .unwrap_or_else(|| "unknown".to_string()),
            candles: candles.len(),
            minimum: MIN_CANDLES,
        });
    }

    let indicators = IndicatorSet::compute(candles, params);
    let mut account = Account::new(config.initial_capital);

    for (i, candle) in candles.iter().enumerate().skip(1) {
        if account.is_flat() && entry_signal(i, &indicators, params) {
            let entry_price = candle.close;
            let stop_price = swing_low_stop(candles, i, entry_price, params.stop_lookback);
            let risk_per_unit = entry_price - stop_price;
            if risk_per_unit > 0.0 {
                let budget = account.cash * config.risk_fraction;
                let quantity = (budget / risk_per_unit).floor();
                if quantity > 0.0 {
                    account.open(Position {
                        symbol: candle.symbol.clone(),
                        quantity,
                        entry_price,
                        entry_time: candle.timestamp,
                        stop_price,
                    });
                }
            }
        }

        // Manage the open position; the entry bar is checked as well.
        if let Some(position) = &account.open_position {
            let stop_price = position.stop_price;
            let take_profit = position.take_profit(params.take_profit_rr);

            let exit = if candle.low <= stop_price {
                Some((stop_price, ExitReason::Stop))
            } else if candle.high >= take_profit {
                Some((take_profit, ExitReason::TakeProfit))
            } else if trend_flipped(i, &indicators) {
                Some((candle.close, ExitReason::TrendFlip))
            } else {
                None
            };

            if let Some((exit_price, reason)) = exit {
                account.close(exit_price, candle.timestamp, reason);
            }
        }
    }

    if !account.is_flat() {
        let last = &candles[candles.len() - 1];
        account.close(last.close, last.timestamp, ExitReason::EndOfData);
    }

    Ok(BacktestResult {
        trades: account.trades,
        initial_capital: account.initial_capital,
        final_cash: account.cash,
    })
}

/// All three entry filters at bar `i`. False during indicator warmup.
fn entry_signal(i: usize, indicators: &IndicatorSet, params: &StrategyParams) -> bool {
    let (Some(fast), Some(slow), Some(rsi), Some(obv), Some(prev_obv)) = (
        indicators.ema_fast_at(i),
        indicators.ema_slow_at(i),
        indicators.rsi_at(i),
        indicators.obv_at(i),
        indicators.obv_at(i - 1),
    ) else {
        return false;
    };

    fast > slow && rsi >= params.rsi_lower && rsi <= params.rsi_upper && obv > prev_obv
}

/// Fast EMA has crossed below slow EMA at bar `i`.
fn trend_flipped(i: usize, indicators: &IndicatorSet) -> bool {
    match (indicators.ema_fast_at(i), indicators.ema_slow_at(i)) {
        (Some(fast), Some(slow)) => fast < slow,
        _ => false,
    }
}

/// Stop for an entry at bar `i`: the lowest low over the `lookback` bars
/// strictly before `i`, or 1% below entry when that low is not below the
/// entry price.
fn swing_low_stop(candles: &[Candle], i: usize, entry_price: f64, lookback: usize) -> f64 {
    let start = i.saturating_sub(lookback);
    let recent_low = candles[start..i]
        .iter()
        .map(|c| c.low)
        .fold(f64::INFINITY, f64::min);

    if recent_low < entry_price {
        recent_low
    } else {
        entry_price * 0.99
    }
}
