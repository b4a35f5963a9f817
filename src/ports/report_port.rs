//! Report generation port trait.

use crate::domain::backtest::BacktestResult;
use crate::domain::error::CryptraderError;

/// Port for writing the trade ledger of a finished backtest.
pub trait ReportPort {
    fn write(&self, result: &BacktestResult, output_path: &str) -> Result<(), CryptraderError>;
}
