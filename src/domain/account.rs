//! Account state: cash ledger, at most one open position, closed-trade log.

use chrono::NaiveDateTime;

use super::position::{ExitReason, Position, Side, TradeRecord};

#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub cash: f64,
    pub initial_capital: f64,
    pub open_position: Option<Position>,
    pub trades: Vec<TradeRecord>,
}

impl Account {
    pub fn new(initial_capital: f64) -> Self {
        Account {
            cash: initial_capital,
            initial_capital,
            open_position: None,
            trades: Vec::new(),
        }
    }

    pub fn is_flat(&self) -> bool {
        self.open_position.is_none()
    }

    /// Open a position, debiting cash by quantity * entry price.
    ///
    /// Panics in debug builds if a position is already open; the caller
    /// gates entries on `is_flat`.
    pub fn open(&mut self, position: Position) {
        debug_assert!(self.open_position.is_none());
        self.cash -= position.quantity * position.entry_price;
        self.open_position = Some(position);
    }

    /// Close the open position at `exit_price`, crediting cash and
    /// finalizing the trade record. Returns the realized P&L, or `None`
    /// when flat.
    pub fn close(
        &mut self,
        exit_price: f64,
        exit_time: NaiveDateTime,
        reason: ExitReason,
    ) -> Option<f64> {
        let position = self.open_position.take()?;
        self.cash += position.quantity * exit_price;
        let pnl = (exit_price - position.entry_price) * position.quantity;

        self.trades.push(TradeRecord {
            symbol: position.symbol,
            side: Side::Long,
            quantity: position.quantity,
            entry_time: position.entry_time,
            entry_price: position.entry_price,
            stop_price: position.stop_price,
            exit_time,
            exit_price,
            pnl,
            exit_reason: reason,
        });

        Some(pnl)
    }
}
