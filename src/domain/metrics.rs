//! Performance metrics over a completed backtest.

use super::backtest::BacktestResult;

#[derive(Debug, Clone, PartialEq)]
pub struct Metrics {
    pub initial_capital: f64,
    pub final_capital: f64,
    pub total_return: f64,
    pub total_pnl: f64,
    pub num_trades: usize,
    pub trades_won: usize,
    pub trades_lost: usize,
    pub trades_breakeven: usize,
    pub win_rate: f64,
    /// Mean P&L over winning trades; 0 with no winners.
    pub avg_win: f64,
    /// Mean P&L over losing-or-breakeven trades (a value <= 0); 0 with none.
    pub avg_loss: f64,
    pub largest_win: f64,
    pub largest_loss: f64,
}

impl Metrics {
    pub fn compute(result: &BacktestResult) -> Self {
        let initial_capital = result.initial_capital;
        let final_capital = result.final_cash;

        let total_return = if initial_capital > 0.0 {
            (final_capital - initial_capital) / initial_capital
        } else {
            0.0
        };
        let total_pnl = final_capital - initial_capital;

        let mut trades_won = 0usize;
        let mut trades_lost = 0usize;
        let mut trades_breakeven = 0usize;
        let mut total_wins = 0.0_f64;
        let mut total_losses = 0.0_f64;
        let mut largest_win = 0.0_f64;
        let mut largest_loss = 0.0_f64;

        for trade in &result.trades {
            let pnl = trade.pnl;
            if pnl > 0.0 {
                trades_won += 1;
                total_wins += pnl;
                if pnl > largest_win {
                    largest_win = pnl;
                }
            } else if pnl < 0.0 {
                trades_lost += 1;
                total_losses += pnl;
                if pnl < largest_loss {
                    largest_loss = pnl;
                }
            } else {
                trades_breakeven += 1;
            }
        }

        let num_trades = result.trades.len();
        let win_rate = if num_trades > 0 {
            trades_won as f64 / num_trades as f64
        } else {
            0.0
        };

        let avg_win = if trades_won > 0 {
            total_wins / trades_won as f64
        } else {
            0.0
        };

        // losing-or-breakeven bucket, matching the win-rate complement
        let losers_or_breakeven = trades_lost + trades_breakeven;
        let avg_loss = if losers_or_breakeven > 0 {
            total_losses / losers_or_breakeven as f64
        } else {
            0.0
        };

        Metrics {
            initial_capital,
            final_capital,
            total_return,
            total_pnl,
            num_trades,
            trades_won,
            trades_lost,
            trades_breakeven,
            win_rate,
            avg_win,
            avg_loss,
            largest_win,
            largest_loss,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::position::{ExitReason, Side, TradeRecord};
    use chrono::NaiveDate;

    fn make_trade(pnl: f64) -> TradeRecord {
        let entry_time = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        TradeRecord {
            symbol: "BTCUSDT".into(),
            side: Side::Long,
            quantity: 100.0,
            entry_time,
            entry_price: 100.0,
            stop_price: 95.0,
            exit_time: entry_time + chrono::Duration::days(5),
            exit_price: 100.0 + pnl / 100.0,
            pnl,
            exit_reason: ExitReason::TrendFlip,
        }
    }

    fn make_result(pnls: &[f64]) -> BacktestResult {
        let trades: Vec<TradeRecord> = pnls.iter().map(|&p| make_trade(p)).collect();
        let total: f64 = pnls.iter().sum();
        BacktestResult {
            trades,
            initial_capital: 100_000.0,
            final_cash: 100_000.0 + total,
        }
    }

    #[test]
    fn metrics_no_trades() {
        let metrics = Metrics::compute(&make_result(&[]));

        assert_eq!(metrics.num_trades, 0);
        assert!((metrics.total_return - 0.0).abs() < f64::EPSILON);
        assert!((metrics.win_rate - 0.0).abs() < f64::EPSILON);
        assert!((metrics.avg_win - 0.0).abs() < f64::EPSILON);
        assert!((metrics.avg_loss - 0.0).abs() < f64::EPSILON);
        assert!((metrics.largest_win - 0.0).abs() < f64::EPSILON);
        assert!((metrics.largest_loss - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn metrics_total_return() {
        let metrics = Metrics::compute(&make_result(&[5000.0, 5000.0]));
        assert!((metrics.total_return - 0.10).abs() < 1e-9);
        assert!((metrics.total_pnl - 10_000.0).abs() < 1e-9);
    }

    #[test]
    fn metrics_win_rate() {
        let metrics = Metrics::compute(&make_result(&[100.0, -50.0, 200.0, 0.0]));

        assert_eq!(metrics.trades_won, 2);
        assert_eq!(metrics.trades_lost, 1);
        assert_eq!(metrics.trades_breakeven, 1);
        assert!((metrics.win_rate - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn metrics_avg_win_and_loss() {
        let metrics = Metrics::compute(&make_result(&[100.0, -60.0, 200.0, -40.0]));

        assert!((metrics.avg_win - 150.0).abs() < 1e-9);
        assert!((metrics.avg_loss - (-50.0)).abs() < 1e-9);
    }

    #[test]
    fn breakeven_counts_toward_avg_loss_bucket() {
        // losers-or-breakeven: -60, 0 -> mean -30
        let metrics = Metrics::compute(&make_result(&[100.0, -60.0, 0.0]));
        assert!((metrics.avg_loss - (-30.0)).abs() < 1e-9);
    }

    #[test]
    fn metrics_largest_win_and_loss() {
        let metrics = Metrics::compute(&make_result(&[100.0, 300.0, -50.0, -150.0]));

        assert!((metrics.largest_win - 300.0).abs() < 1e-9);
        assert!((metrics.largest_loss - (-150.0)).abs() < 1e-9);
    }

    #[test]
    fn win_rate_bounded() {
        for pnls in [&[100.0, 200.0][..], &[-100.0, -200.0][..], &[][..]] {
            let metrics = Metrics::compute(&make_result(pnls));
            assert!((0.0..=1.0).contains(&metrics.win_rate));
        }
    }

    #[test]
    fn zero_initial_capital_guard() {
        let result = BacktestResult {
            trades: vec![],
            initial_capital: 0.0,
            final_cash: 0.0,
        };
        let metrics = Metrics::compute(&result);
        assert!((metrics.total_return - 0.0).abs() < f64::EPSILON);
    }
}
