//! Configuration validation.
//!
//! Validates all config fields before a backtest or screen runs.

use crate::domain::error::CryptraderError;
use crate::ports::config_port::ConfigPort;

pub fn validate_backtest_config(config: &dyn ConfigPort) -> Result<(), CryptraderError> {
    validate_initial_capital(config)?;
    validate_risk_fraction(config)?;
    Ok(())
}

pub fn validate_strategy_config(config: &dyn ConfigPort) -> Result<(), CryptraderError> {
    validate_ema_spans(config)?;
    validate_rsi(config)?;
    validate_macd(config)?;
    validate_stop_lookback(config)?;
    validate_take_profit_rr(config)?;
    Ok(())
}

pub fn validate_screen_config(config: &dyn ConfigPort) -> Result<(), CryptraderError> {
    validate_screen_lookback(config)?;
    validate_screen_thresholds(config)?;
    Ok(())
}

pub fn validate_data_config(config: &dyn ConfigPort) -> Result<(), CryptraderError> {
    match config.get_string("data", "path") {
        Some(s) if !s.trim().is_empty() => {}
        _ => {
            return Err(CryptraderError::ConfigMissing {
                section: "data".to_string(),
                key: "path".to_string(),
            })
        }
    }

    let symbols = config.get_string("data", "symbols");
    let symbol = config.get_string("data", "symbol");
    match (symbols, symbol) {
        (Some(s), _) if !s.trim().is_empty() => Ok(()),
        (None, Some(s)) if !s.trim().is_empty() => Ok(()),
        _ => Err(CryptraderError::ConfigMissing {
            section: "data".to_string(),
            key: "symbol".to_string(),
        }),
    }
}

fn validate_initial_capital(config: &dyn ConfigPort) -> Result<(), CryptraderError> {
    let value = config.get_double("backtest", "initial_capital", 100_000.0);
    if value <= 0.0 {
        return Err(CryptraderError::ConfigInvalid {
            section: "backtest".to_string(),
            key: "initial_capital".to_string(),
            reason: "initial_capital must be positive".to_string(),
        });
    }
    Ok(())
}

fn validate_risk_fraction(config: &dyn ConfigPort) -> Result<(), CryptraderError> {
    let value = config.get_double("backtest", "risk_fraction", 0.01);
    if value <= 0.0 || value > 1.0 {
        return Err(CryptraderError::ConfigInvalid {
            section: "backtest".to_string(),
            key: "risk_fraction".to_string(),
            reason: "risk_fraction must be between 0 and 1".to_string(),
        });
    }
    Ok(())
}

fn validate_ema_spans(config: &dyn ConfigPort) -> Result<(), CryptraderError> {
    let fast = config.get_int("strategy", "ema_fast", 50);
    let slow = config.get_int("strategy", "ema_slow", 200);
    if fast < 1 {
        return Err(CryptraderError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "ema_fast".to_string(),
            reason: "ema_fast must be at least 1".to_string(),
        });
    }
    if slow < 1 {
        return Err(CryptraderError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "ema_slow".to_string(),
            reason: "ema_slow must be at least 1".to_string(),
        });
    }
    if fast >= slow {
        return Err(CryptraderError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "ema_fast".to_string(),
            reason: "ema_fast must be shorter than ema_slow".to_string(),
        });
    }
    Ok(())
}

fn validate_rsi(config: &dyn ConfigPort) -> Result<(), CryptraderError> {
    let period = config.get_int("strategy", "rsi_period", 14);
    if period < 1 {
        return Err(CryptraderError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "rsi_period".to_string(),
            reason: "rsi_period must be at least 1".to_string(),
        });
    }

    let lower = config.get_double("strategy", "rsi_lower", 40.0);
    let upper = config.get_double("strategy", "rsi_upper", 55.0);
    if !(0.0..=100.0).contains(&lower) || !(0.0..=100.0).contains(&upper) {
        return Err(CryptraderError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "rsi_lower".to_string(),
            reason: "RSI band must lie within [0, 100]".to_string(),
        });
    }
    if lower >= upper {
        return Err(CryptraderError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "rsi_lower".to_string(),
            reason: "rsi_lower must be below rsi_upper".to_string(),
        });
    }
    Ok(())
}

fn validate_macd(config: &dyn ConfigPort) -> Result<(), CryptraderError> {
    for key in ["macd_fast", "macd_slow", "macd_signal"] {
        let default = match key {
            "macd_fast" => 12,
            "macd_slow" => 26,
            _ => 9,
        };
        if config.get_int("strategy", key, default) < 1 {
            return Err(CryptraderError::ConfigInvalid {
                section: "strategy".to_string(),
                key: key.to_string(),
                reason: format!("{} must be at least 1", key),
            });
        }
    }
    Ok(())
}

fn validate_stop_lookback(config: &dyn ConfigPort) -> Result<(), CryptraderError> {
    let value = config.get_int("strategy", "stop_lookback", 10);
    if value < 1 {
        return Err(CryptraderError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "stop_lookback".to_string(),
            reason: "stop_lookback must be at least 1".to_string(),
        });
    }
    Ok(())
}

fn validate_take_profit_rr(config: &dyn ConfigPort) -> Result<(), CryptraderError> {
    let value = config.get_double("strategy", "take_profit_rr", 2.0);
    if value <= 0.0 {
        return Err(CryptraderError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "take_profit_rr".to_string(),
            reason: "take_profit_rr must be positive".to_string(),
        });
    }
    Ok(())
}

fn validate_screen_lookback(config: &dyn ConfigPort) -> Result<(), CryptraderError> {
    let value = config.get_int("screen", "lookback", 5);
    if value < 2 {
        return Err(CryptraderError::ConfigInvalid {
            section: "screen".to_string(),
            key: "lookback".to_string(),
            reason: "lookback must be at least 2".to_string(),
        });
    }
    Ok(())
}

fn validate_screen_thresholds(config: &dyn ConfigPort) -> Result<(), CryptraderError> {
    for (key, default) in [
        ("volume_surge", 0.2),
        ("price_drift", 0.01),
        ("price_drop", 0.02),
        ("volatility_ratio", 0.05),
    ] {
        if config.get_double("screen", key, default) <= 0.0 {
            return Err(CryptraderError::ConfigInvalid {
                section: "screen".to_string(),
                key: key.to_string(),
                reason: format!("{} must be positive", key),
            });
        }
    }
    Ok(())
}
