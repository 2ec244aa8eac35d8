use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Define the CandleType enum
#[derive(Debug, PartialEq)]
pub enum CandleType {
    Bullish,
    Bearish,
}

/// One OHLCV bucket.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Candle {
    pub time: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    // A constructor for convenience
    pub fn new(
        time: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Candle {
            time,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    // A method to determine the type of candle
    pub fn get_type(&self) -> CandleType {
        if self.close >= self.open {
            CandleType::Bullish
        } else {
            CandleType::Bearish
        }
    }

    // Returns the low and high of the candle body as a tuple
    pub fn body_range(&self) -> (f64, f64) {
        match self.get_type() {
            CandleType::Bullish => (self.open, self.close),
            CandleType::Bearish => (self.close, self.open),
        }
    }

    /// Checks `low <= body <= high` and a non-negative volume.
    /// Returns a description of the first broken invariant.
    pub fn validate(&self) -> Result<(), String> {
        let fields = [self.open, self.high, self.low, self.close, self.volume];
        if fields.iter().any(|v| !v.is_finite()) {
            return Err("non-finite price or volume".to_string());
        }
        let (body_low, body_high) = self.body_range();
        if self.low > body_low {
            return Err(format!("low {} above body low {}", self.low, body_low));
        }
        if body_high > self.high {
            return Err(format!("body high {} above high {}", body_high, self.high));
        }
        if self.volume < 0.0 {
            return Err(format!("negative volume {}", self.volume));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candle(open: f64, high: f64, low: f64, close: f64, volume: f64) -> Candle {
        Candle::new(DateTime::<Utc>::UNIX_EPOCH, open, high, low, close, volume)
    }

    #[test]
    fn body_range_orders_open_close() {
        assert_eq!(candle(10.0, 12.0, 9.0, 11.0, 1.0).body_range(), (10.0, 11.0));
        assert_eq!(candle(11.0, 12.0, 9.0, 10.0, 1.0).body_range(), (10.0, 11.0));
        assert_eq!(candle(11.0, 12.0, 9.0, 10.0, 1.0).get_type(), CandleType::Bearish);
    }

    #[test]
    fn validate_rejects_broken_invariants() {
        assert!(candle(10.0, 12.0, 9.0, 11.0, 0.0).validate().is_ok());
        assert!(candle(10.0, 10.5, 9.0, 11.0, 1.0).validate().is_err());
        assert!(candle(10.0, 12.0, 10.5, 11.0, 1.0).validate().is_err());
        assert!(candle(10.0, 12.0, 9.0, 11.0, -1.0).validate().is_err());
        assert!(candle(f64::NAN, 12.0, 9.0, 11.0, 1.0).validate().is_err());
    }
}
