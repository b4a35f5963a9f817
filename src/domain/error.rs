//! Domain error types.

/// Top-level error type for cryptrader.
#[derive(Debug, thiserror::Error)]
pub enum CryptraderError {
    #[error("data source error: {reason}")]
    Data { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("no data for {symbol}")]
    NoData { symbol: String },

    #[error("insufficient data for {symbol}: have {candles} candles, need {minimum}")]
    InsufficientData {
        symbol: String,
        candles: usize,
        minimum: usize,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&CryptraderError> for std::process::ExitCode {
    fn from(err: &CryptraderError) -> Self {
        let code: u8 = match err {
            CryptraderError::Io(_) => 1,
            CryptraderError::ConfigParse { .. }
            | CryptraderError::ConfigMissing { .. }
            | CryptraderError::ConfigInvalid { .. } => 2,
            CryptraderError::Data { .. } => 3,
            CryptraderError::NoData { .. } | CryptraderError::InsufficientData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
