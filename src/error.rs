use thiserror::Error;

/// Failures callers need to branch on.
///
/// Short series are *not* errors: the indicator engine simply omits the
/// fields it cannot compute, and a non-positive current price yields empty
/// level lists.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Caller bug: parallel input slices disagree in length.
    #[error("input length mismatch: closes={closes}, highs={highs}, lows={lows}, volumes={volumes}")]
    LengthMismatch {
        closes: usize,
        highs: usize,
        lows: usize,
        volumes: usize,
    },

    /// Candle ordering or OHLC invariants were broken by the data source.
    #[error("invalid candle sequence at index {index}: {reason}")]
    InvalidSequence { index: usize, reason: String },

    /// The persistence collaborator failed. Callers may retry.
    #[error("upstream unavailable ({collaborator}): {source}")]
    UpstreamUnavailable {
        collaborator: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl EngineError {
    pub fn upstream(collaborator: &'static str, source: anyhow::Error) -> Self {
        Self::UpstreamUnavailable {
            collaborator,
            source,
        }
    }

    /// Whether the same request may succeed if repeated.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::UpstreamUnavailable { .. })
    }
}

pub type EngineResult<T> = std::result::Result<T, EngineError>;
