use thiserror::Error;

/// Errors raised while configuring or starting a countdown
#[derive(Debug, Error)]
pub enum Error {
    #[error("countdown interval must be a positive number of seconds, got {0}")]
    InvalidInterval(f64),

    #[error("ring colors must contain at least one color")]
    EmptyRingColors,

    #[error("text colors must contain at least one color")]
    EmptyTextColors,

    #[error("width multiplier must be positive and finite, got {0}")]
    InvalidWidthMultiplier(f32),

    #[error("width divisor must be positive and finite, got {0}")]
    InvalidWidthDivisor(f32),

    #[error("sequencer has already been started")]
    AlreadyStarted,

    #[error("failed to register timer: {0}")]
    Timer(#[from] calloop::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
