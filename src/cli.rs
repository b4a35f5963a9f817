//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_market_adapter::CsvMarketAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::backtest::{run_backtest, BacktestConfig};
use crate::domain::config_validation::{
    validate_backtest_config, validate_data_config, validate_screen_config,
    validate_strategy_config,
};
use crate::domain::error::CryptraderError;
use crate::domain::metrics::Metrics;
use crate::domain::screen::{rank_screen_results, ScreenParams, ScreenResult};
use crate::domain::strategy::StrategyParams;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::MarketDataPort;
use crate::ports::report_port::ReportPort;

const DEFAULT_CANDLE_LIMIT: usize = 365;

type ConfigCheck = fn(&dyn ConfigPort) -> Result<(), CryptraderError>;

#[derive(Parser, Debug)]
#[command(name = "cryptrader", about = "Crypto backtester and market screener")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a backtest over one symbol's candle history
    Backtest {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        symbol: Option<String>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        dry_run: bool,
    },
    /// Screen symbols for accumulation/distribution and whale pressure
    Screen {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        symbols: Option<String>,
    },
    /// List symbols available in the data directory
    ListSymbols {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Backtest {
            config,
            symbol,
            output,
            dry_run,
        } => {
            if dry_run {
                run_dry_run(&config)
            } else {
                run_backtest_command(&config, symbol.as_deref(), output.as_ref())
            }
        }
        Command::Screen { config, symbols } => run_screen_command(&config, symbols.as_deref()),
        Command::ListSymbols { config } => run_list_symbols(&config),
        Command::Validate { config } => run_validate(&config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = CryptraderError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

pub fn build_backtest_config(adapter: &dyn ConfigPort) -> BacktestConfig {
    BacktestConfig {
        initial_capital: adapter.get_double("backtest", "initial_capital", 100_000.0),
        risk_fraction: adapter.get_double("backtest", "risk_fraction", 0.01),
    }
}

pub fn build_strategy_params(adapter: &dyn ConfigPort) -> StrategyParams {
    let defaults = StrategyParams::default();
    StrategyParams {
        ema_fast: adapter.get_int("strategy", "ema_fast", defaults.ema_fast as i64) as usize,
        ema_slow: adapter.get_int("strategy", "ema_slow", defaults.ema_slow as i64) as usize,
        rsi_period: adapter.get_int("strategy", "rsi_period", defaults.rsi_period as i64) as usize,
        rsi_lower: adapter.get_double("strategy", "rsi_lower", defaults.rsi_lower),
        rsi_upper: adapter.get_double("strategy", "rsi_upper", defaults.rsi_upper),
        macd_fast: adapter.get_int("strategy", "macd_fast", defaults.macd_fast as i64) as usize,
        macd_slow: adapter.get_int("strategy", "macd_slow", defaults.macd_slow as i64) as usize,
        macd_signal: adapter.get_int("strategy", "macd_signal", defaults.macd_signal as i64)
            as usize,
        stop_lookback: adapter.get_int("strategy", "stop_lookback", defaults.stop_lookback as i64)
            as usize,
        take_profit_rr: adapter.get_double("strategy", "take_profit_rr", defaults.take_profit_rr),
    }
}

pub fn build_screen_params(adapter: &dyn ConfigPort) -> ScreenParams {
    let defaults = ScreenParams::default();
    ScreenParams {
        lookback: adapter.get_int("screen", "lookback", defaults.lookback as i64) as usize,
        volume_surge: adapter.get_double("screen", "volume_surge", defaults.volume_surge),
        price_drift: adapter.get_double("screen", "price_drift", defaults.price_drift),
        price_drop: adapter.get_double("screen", "price_drop", defaults.price_drop),
        volatility_ratio: adapter.get_double(
            "screen",
            "volatility_ratio",
            defaults.volatility_ratio,
        ),
    }
}

pub fn resolve_symbols(symbol_override: Option<&str>, config: &dyn ConfigPort) -> Vec<String> {
    if let Some(s) = symbol_override {
        return s
            .split(',')
            .map(|t| t.trim().to_uppercase())
            .filter(|t| !t.is_empty())
            .collect();
    }

    if let Some(symbols) = config.get_string("data", "symbols") {
        return symbols
            .split(',')
            .map(|t| t.trim().to_uppercase())
            .filter(|t| !t.is_empty())
            .collect();
    }

    if let Some(symbol) = config.get_string("data", "symbol") {
        let symbol = symbol.trim().to_uppercase();
        if !symbol.is_empty() {
            return vec![symbol];
        }
    }

    vec![]
}

pub fn candle_limit(config: &dyn ConfigPort) -> usize {
    config.get_int("data", "limit", DEFAULT_CANDLE_LIMIT as i64) as usize
}

fn data_adapter(config: &dyn ConfigPort) -> Result<CsvMarketAdapter, CryptraderError> {
    let path = config
        .get_string("data", "path")
        .ok_or_else(|| CryptraderError::ConfigMissing {
            section: "data".into(),
            key: "path".into(),
        })?;
    Ok(CsvMarketAdapter::new(PathBuf::from(path)))
}

fn run_backtest_command(
    config_path: &PathBuf,
    symbol_override: Option<&str>,
    output_path: Option<&PathBuf>,
) -> ExitCode {
    // Stage 1: Load config
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    // Stage 2: Validate
    let checks: [ConfigCheck; 3] = [
        validate_backtest_config,
        validate_strategy_config,
        validate_data_config,
    ];
    for validate in checks {
        if let Err(e) = validate(&adapter) {
            eprintln!("error: {e}");
            return (&e).into();
        }
    }

    // Stage 3: Resolve symbol and parameters
    let symbols = resolve_symbols(symbol_override, &adapter);
    let Some(symbol) = symbols.first() else {
        eprintln!("error: no symbol configured");
        return ExitCode::from(2);
    };

    let params = build_strategy_params(&adapter);
    let bt_config = build_backtest_config(&adapter);
    let limit = candle_limit(&adapter);

    let data_port = match data_adapter(&adapter) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let output = output_path
        .cloned()
        .unwrap_or_else(|| PathBuf::from("trades.csv"));

    run_backtest_pipeline(&data_port, symbol, &params, &bt_config, limit, &output)
}

pub fn run_backtest_pipeline(
    data_port: &dyn MarketDataPort,
    symbol: &str,
    params: &StrategyParams,
    bt_config: &BacktestConfig,
    limit: usize,
    output: &PathBuf,
) -> ExitCode {
    // Stage 4: Fetch candles
    let candles = match data_port.fetch_ohlcv(symbol, limit) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    if candles.is_empty() {
        let err = CryptraderError::NoData {
            symbol: symbol.to_string(),
        };
        eprintln!("error: {err}");
        return (&err).into();
    }

    eprintln!("Running backtest: {} over {} candles", symbol, candles.len());

    // Stage 5: Simulate
    let result = match run_backtest(&candles, params, bt_config) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // Stage 6: Metrics + console summary
    let metrics = Metrics::compute(&result);

    eprintln!("\n=== Performance Report ===");
    eprintln!("Initial Capital:  {:.2}", metrics.initial_capital);
    eprintln!("Final Capital:    {:.2}", metrics.final_capital);
    eprintln!("Total Return:     {:.2}%", metrics.total_return * 100.0);
    eprintln!("Total P&L:        {:.2}", metrics.total_pnl);
    eprintln!("Trades:           {}", metrics.num_trades);
    eprintln!("Win Rate:         {:.1}%", metrics.win_rate * 100.0);
    eprintln!("Avg Win:          {:.2}", metrics.avg_win);
    eprintln!("Avg Loss:         {:.2}", metrics.avg_loss);
    eprintln!("Largest Win:      {:.2}", metrics.largest_win);
    eprintln!("Largest Loss:     {:.2}", metrics.largest_loss);

    // Stage 7: Write ledger
    let output_str = output.display().to_string();
    match CsvReportAdapter.write(&result, &output_str) {
        Ok(()) => {
            eprintln!("\nTrades saved to {}", output_str);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_screen_command(config_path: &PathBuf, symbols_override: Option<&str>) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let checks: [ConfigCheck; 2] = [validate_screen_config, validate_data_config];
    for validate in checks {
        if let Err(e) = validate(&adapter) {
            eprintln!("error: {e}");
            return (&e).into();
        }
    }

    let symbols = resolve_symbols(symbols_override, &adapter);
    if symbols.is_empty() {
        eprintln!("error: no symbols configured");
        return ExitCode::from(2);
    }

    let screen_params = build_screen_params(&adapter);
    let limit = candle_limit(&adapter);

    let data_port = match data_adapter(&adapter) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    run_screen_pipeline(&data_port, &symbols, &screen_params, limit)
}

pub fn run_screen_pipeline(
    data_port: &dyn MarketDataPort,
    symbols: &[String],
    params: &ScreenParams,
    limit: usize,
) -> ExitCode {
    let mut results = Vec::with_capacity(symbols.len());

    for symbol in symbols {
        let candles = match data_port.fetch_ohlcv(symbol, limit) {
            Ok(c) if !c.is_empty() => c,
            Ok(_) => {
                eprintln!("warning: skipping {} (no candles)", symbol);
                continue;
            }
            Err(e) => {
                eprintln!("warning: skipping {} ({})", symbol, e);
                continue;
            }
        };
        let book = match data_port.fetch_order_book(symbol) {
            Ok(b) => b,
            Err(e) => {
                eprintln!("warning: skipping {} ({})", symbol, e);
                continue;
            }
        };

        results.push(ScreenResult::evaluate(symbol, &candles, &book, params));
    }

    if results.is_empty() {
        eprintln!("error: no symbols could be screened");
        return ExitCode::from(5);
    }

    rank_screen_results(&mut results);

    println!("symbol,phase,whale_score,strength_index");
    for r in &results {
        let phase = r
            .phase
            .map(|p| p.to_string())
            .unwrap_or_else(|| "None".to_string());
        println!(
            "{},{},{:.2},{:.2}",
            r.symbol, phase, r.whale_score, r.strength_index
        );
    }
    eprintln!("{} symbols screened", results.len());
    ExitCode::SUCCESS
}

pub fn run_dry_run(config_path: &PathBuf) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let checks: [ConfigCheck; 4] = [
        validate_backtest_config,
        validate_strategy_config,
        validate_screen_config,
        validate_data_config,
    ];
    for validate in checks {
        if let Err(e) = validate(&adapter) {
            eprintln!("error: {e}");
            return (&e).into();
        }
    }
    eprintln!("Config validated successfully");

    let params = build_strategy_params(&adapter);
    let bt_config = build_backtest_config(&adapter);

    eprintln!("\nStrategy:");
    eprintln!("  trend:    EMA({}) > EMA({})", params.ema_fast, params.ema_slow);
    eprintln!(
        "  momentum: RSI({}) in [{}, {}]",
        params.rsi_period, params.rsi_lower, params.rsi_upper
    );
    eprintln!("  volume:   OBV rising");
    eprintln!(
        "  exits:    stop at {}-bar swing low, take-profit at {}R, trend flip",
        params.stop_lookback, params.take_profit_rr
    );

    eprintln!("\nBacktest:");
    eprintln!("  initial_capital: {}", bt_config.initial_capital);
    eprintln!("  risk_fraction:   {}", bt_config.risk_fraction);

    let symbols = resolve_symbols(None, &adapter);
    eprintln!("\nSymbols: {}", symbols.join(", "));

    eprintln!("\nDry run complete: configuration is valid");
    ExitCode::SUCCESS
}

fn run_list_symbols(config_path: &PathBuf) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let adapter = match data_adapter(&config) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let symbols = match adapter.list_symbols() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if symbols.is_empty() {
        eprintln!("No symbols found");
    } else {
        for symbol in &symbols {
            println!("{}", symbol);
        }
        eprintln!("{} symbols found", symbols.len());
    }
    ExitCode::SUCCESS
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let checks: [(&str, ConfigCheck); 4] = [
        ("backtest", validate_backtest_config),
        ("strategy", validate_strategy_config),
        ("screen", validate_screen_config),
        ("data", validate_data_config),
    ];
    for (name, validate) in checks {
        match validate(&adapter) {
            Ok(()) => eprintln!("  [{}] ok", name),
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        }
    }

    eprintln!("\nConfiguration is valid.");
    ExitCode::SUCCESS
}
