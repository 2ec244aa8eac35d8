use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// Proximity tier of a level relative to the current price.
/// Variant order is weakest first so `Ord` compares by strength.
#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Strength {
    Weak,
    Medium,
    Strong,
}

impl Strength {
    /// Line/border weight used by chart annotations.
    pub fn visual_weight(&self) -> u8 {
        match self {
            Strength::Weak => 1,
            Strength::Medium => 2,
            Strength::Strong => 3,
        }
    }

    /// Fill colour for liquidation-zone rectangles.
    pub fn color_hex(&self) -> &'static str {
        match self {
            Strength::Weak => "#fbbf24",
            Strength::Medium => "#f97316",
            Strength::Strong => "#ef4444",
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LevelKind {
    Support,
    Resistance,
}

/// A clustered price level classified against the current price.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct Level {
    pub price: f64,
    pub strength: Strength,
    /// Distance from the current price in percent, rounded to 2 decimals.
    pub distance_pct: f64,
    #[serde(rename = "type")]
    pub kind: LevelKind,
}

/// A price band rather than a point.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct LiquidationZone {
    pub start_price: f64,
    pub end_price: f64,
    pub strength: Strength,
    pub label: String,
}

impl LiquidationZone {
    pub fn overlaps(&self, other: &LiquidationZone) -> bool {
        self.start_price <= other.end_price && other.start_price <= self.end_price
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn strength_orders_weak_to_strong() {
        assert!(Strength::Weak < Strength::Medium);
        assert!(Strength::Medium < Strength::Strong);
        let weights: Vec<u8> = Strength::iter().map(|s| s.visual_weight()).collect();
        assert_eq!(weights, vec![1, 2, 3]);
    }

    #[test]
    fn level_kind_serializes_as_type() {
        let level = Level {
            price: 100.0,
            strength: Strength::Strong,
            distance_pct: 1.5,
            kind: LevelKind::Support,
        };
        let json = serde_json::to_value(level).unwrap();
        assert_eq!(json["type"], "support");
        assert_eq!(json["strength"], "strong");
    }

    #[test]
    fn zone_overlap_is_inclusive() {
        let a = LiquidationZone {
            start_price: 99.0,
            end_price: 101.0,
            strength: Strength::Medium,
            label: "a".into(),
        };
        let b = LiquidationZone {
            start_price: 101.0,
            end_price: 103.0,
            strength: Strength::Weak,
            label: "b".into(),
        };
        assert!(a.overlaps(&b));
    }
}
