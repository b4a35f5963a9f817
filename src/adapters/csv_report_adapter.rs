//! CSV trade-ledger report adapter.
//!
//! One row per closed trade:
//! `symbol,entry_time,exit_time,side,entry_price,exit_price,quantity,stop_price,pnl,exit_reason`

use crate::domain::backtest::BacktestResult;
use crate::domain::error::CryptraderError;
use crate::ports::report_port::ReportPort;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub struct CsvReportAdapter;

impl ReportPort for CsvReportAdapter {
    fn write(&self, result: &BacktestResult, output_path: &str) -> Result<(), CryptraderError> {
        let mut writer = csv::Writer::from_path(output_path).map_err(|e| CryptraderError::Data {
            reason: format!("failed to open {}: {}", output_path, e),
        })?;

        writer
            .write_record([
                "symbol",
                "entry_time",
                "exit_time",
                "side",
                "entry_price",
                "exit_price",
                "quantity",
                "stop_price",
                "pnl",
                "exit_reason",
            ])
            .map_err(|e| CryptraderError::Data {
                reason: format!("failed to write ledger header: {}", e),
            })?;

        for trade in &result.trades {
            writer
                .write_record([
                    trade.symbol.clone(),
                    trade.entry_time.format(TIME_FORMAT).to_string(),
                    trade.exit_time.format(TIME_FORMAT).to_string(),
                    trade.side.to_string(),
                    trade.entry_price.to_string(),
                    trade.exit_price.to_string(),
                    trade.quantity.to_string(),
                    trade.stop_price.to_string(),
                    trade.pnl.to_string(),
                    trade.exit_reason.to_string(),
                ])
                .map_err(|e| CryptraderError::Data {
                    reason: format!("failed to write ledger row: {}", e),
                })?;
        }

        writer.flush().map_err(|e| CryptraderError::Data {
            reason: format!("failed to flush ledger: {}", e),
        })?;
        Ok(())
    }
}
