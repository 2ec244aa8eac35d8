use itertools::Itertools;

use crate::analysis::clustering::{select_levels, significant_levels};
use crate::config::{ANALYSIS, LevelParams};
use crate::models::CandleSeries;
use crate::models::levels::{Level, LevelKind, LiquidationZone, Strength};
use crate::models::results::DetectedLevels;
use crate::utils::maths_utils::round_to;

/// `|current - level| / current * 100`. Caller guarantees `current_price > 0`.
pub fn distance_pct(level_price: f64, current_price: f64) -> f64 {
    (current_price - level_price).abs() / current_price * 100.0
}

/// Under 2% strong, under 5% medium, otherwise weak.
pub fn classify_strength(distance_pct: f64) -> Strength {
    if distance_pct < ANALYSIS.strength.strong_pct {
        Strength::Strong
    } else if distance_pct < ANALYSIS.strength.medium_pct {
        Strength::Medium
    } else {
        Strength::Weak
    }
}

fn has_current_price(current_price: f64) -> bool {
    current_price.is_finite() && current_price > 0.0
}

/// Tag raw level prices with strength and distance. Without a usable
/// current price (`<= 0`) there is nothing to measure against: returns empty.
pub fn classify_levels(prices: &[f64], kind: LevelKind, current_price: f64) -> Vec<Level> {
    if !has_current_price(current_price) {
        return Vec::new();
    }

    prices
        .iter()
        .map(|&price| {
            let distance = distance_pct(price, current_price);
            Level {
                price,
                // tier from the exact distance; only the reported value is rounded
                strength: classify_strength(distance),
                distance_pct: round_to(distance, 2),
                kind,
            }
        })
        .collect()
}

/// Support/resistance detection over the most recent `lookback_periods` candles.
pub fn detect_levels(series: &CandleSeries, params: &LevelParams, current_price: f64) -> DetectedLevels {
    if !has_current_price(current_price) {
        return DetectedLevels::default();
    }

    let lookback = params.lookback_periods.min(ANALYSIS.max_lookback_periods);
    let (highs, lows) = series.recent_extremes_newest_first(lookback);
    detect_levels_from_extremes(&highs, &lows, params, current_price)
}

/// Same as [`detect_levels`] for callers holding raw newest-first highs/lows.
pub fn detect_levels_from_extremes(
    highs_newest_first: &[f64],
    lows_newest_first: &[f64],
    params: &LevelParams,
    current_price: f64,
) -> DetectedLevels {
    if !has_current_price(current_price) {
        return DetectedLevels::default();
    }

    let side = |prices: &[f64], kind: LevelKind| {
        let candidates = significant_levels(prices, params.sensitivity);
        let chosen = select_levels(
            &candidates,
            kind,
            params.selection,
            params.max_levels,
            current_price,
        );
        classify_levels(&chosen, kind, current_price)
    };

    DetectedLevels {
        support_levels: side(lows_newest_first, LevelKind::Support),
        resistance_levels: side(highs_newest_first, LevelKind::Resistance),
    }
}

/// Turn classified levels into liquidation bands of relative half-width
/// `sensitivity / 2`. Overlapping bands on the same side are merged and keep
/// the strongest tier. Supports come first, each side sorted by price.
pub fn build_liquidation_zones(levels: &DetectedLevels, sensitivity: f64) -> Vec<LiquidationZone> {
    let half_width = sensitivity / 2.0;
    let mut zones = merge_side(&levels.support_levels, half_width, "Support liquidation zone");
    zones.extend(merge_side(
        &levels.resistance_levels,
        half_width,
        "Resistance liquidation zone",
    ));
    zones
}

fn merge_side(levels: &[Level], half_width: f64, label: &str) -> Vec<LiquidationZone> {
    let bands = levels
        .iter()
        .map(|level| LiquidationZone {
            start_price: level.price * (1.0 - half_width),
            end_price: level.price * (1.0 + half_width),
            strength: level.strength,
            label: label.to_string(),
        })
        .sorted_by(|a, b| a.start_price.total_cmp(&b.start_price));

    let mut merged: Vec<LiquidationZone> = Vec::new();
    for band in bands {
        match merged.last_mut() {
            Some(last) if last.overlaps(&band) => {
                last.end_price = last.end_price.max(band.end_price);
                last.strength = last.strength.max(band.strength);
            }
            _ => merged.push(band),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LevelSelection;
    use crate::domain::Candle;
    use chrono::{DateTime, Duration, Utc};
    use proptest::prelude::*;

    fn series_from(highs: &[f64], lows: &[f64]) -> CandleSeries {
        let candles = highs
            .iter()
            .zip(lows)
            .enumerate()
            .map(|(i, (&h, &l))| {
                let mid = (h + l) / 2.0;
                Candle::new(
                    DateTime::<Utc>::UNIX_EPOCH + Duration::hours(i as i64),
                    mid,
                    h,
                    l,
                    mid,
                    1.0,
                )
            })
            .collect();
        CandleSeries::new(candles).unwrap()
    }

    #[test]
    fn strength_tiers_at_boundaries() {
        assert_eq!(classify_strength(0.0), Strength::Strong);
        assert_eq!(classify_strength(1.99), Strength::Strong);
        assert_eq!(classify_strength(2.0), Strength::Medium);
        assert_eq!(classify_strength(4.99), Strength::Medium);
        assert_eq!(classify_strength(5.0), Strength::Weak);
    }

    #[test]
    fn classify_reports_rounded_distance() {
        let levels = classify_levels(&[98.7654], LevelKind::Support, 100.0);
        assert_eq!(levels.len(), 1);
        assert_eq!(levels[0].distance_pct, 1.23);
        assert_eq!(levels[0].strength, Strength::Strong);
        assert_eq!(levels[0].kind, LevelKind::Support);
    }

    #[test]
    fn zero_current_price_yields_no_levels() {
        let series = series_from(&[101.0, 101.5, 120.0], &[99.0, 99.5, 110.0]);
        let params = LevelParams::default();
        assert!(detect_levels(&series, &params, 0.0).is_empty());
        assert!(detect_levels(&series, &params, -3.0).is_empty());
        assert!(classify_levels(&[100.0], LevelKind::Resistance, 0.0).is_empty());
    }

    #[test]
    fn detects_support_and_resistance_from_touches() {
        let highs = [110.0, 105.0, 110.5, 105.2, 130.0];
        let lows = [95.0, 90.0, 95.5, 90.3, 100.0];
        let series = series_from(&highs, &lows);

        let result = detect_levels(&series, &LevelParams::default(), 100.0);

        let resistance: Vec<f64> = result.resistance_levels.iter().map(|l| l.price).collect();
        assert_eq!(resistance.len(), 2);
        assert!((resistance[0] - 110.25).abs() < 1e-9);
        assert!((resistance[1] - 105.1).abs() < 1e-9);

        let support: Vec<f64> = result.support_levels.iter().map(|l| l.price).collect();
        assert_eq!(support.len(), 2);
        assert!((support[0] - 90.15).abs() < 1e-9);
        assert!((support[1] - 95.25).abs() < 1e-9);

        assert_eq!(result.support_levels[1].strength, Strength::Medium);
        assert_eq!(result.resistance_levels[0].strength, Strength::Weak);
    }

    #[test]
    fn lookback_limits_the_window() {
        // the old 200/201 touches fall outside a lookback of 3
        let highs = [200.0, 201.0, 110.0, 110.5, 111.0];
        let lows = [190.0, 191.0, 100.0, 100.2, 100.4];
        let series = series_from(&highs, &lows);
        let params = LevelParams {
            lookback_periods: 3,
            ..LevelParams::default()
        };

        let result = detect_levels(&series, &params, 105.0);
        assert_eq!(result.resistance_levels.len(), 1);
        assert!(result.resistance_levels[0].price < 112.0);
    }

    #[test]
    fn caps_levels_per_side() {
        // 8 separate double touches, 10% apart
        let mut highs = Vec::new();
        for i in 0..8 {
            let p = 100.0 * 1.1f64.powi(i);
            highs.push(p);
            highs.push(p * 1.001);
        }
        let result = detect_levels_from_extremes(&highs, &[], &LevelParams::default(), 150.0);
        assert_eq!(result.resistance_levels.len(), 5);
        assert!(result.support_levels.is_empty());
        // extremes policy: highest first
        assert!(result.resistance_levels[0].price > 190.0);
    }

    #[test]
    fn nearest_policy_prefers_levels_around_price() {
        let mut lows = Vec::new();
        for i in 0..8 {
            let p = 100.0 * 1.1f64.powi(i);
            lows.push(p);
            lows.push(p * 1.001);
        }
        let params = LevelParams {
            selection: LevelSelection::NearestToPrice,
            ..LevelParams::default()
        };
        let result = detect_levels_from_extremes(&[], &lows, &params, 150.0);
        assert_eq!(result.support_levels.len(), 5);
        // the level ~146.5 (1.1^4) is nearest to 150
        assert!((result.support_levels[0].price - 146.48).abs() < 0.1);
        assert_eq!(result.support_levels[0].strength, Strength::Medium);
    }

    #[test]
    fn liquidation_zones_merge_overlapping_bands() {
        let detected = DetectedLevels {
            support_levels: classify_levels(&[100.0, 101.5, 90.0], LevelKind::Support, 102.0),
            resistance_levels: classify_levels(&[110.0], LevelKind::Resistance, 102.0),
        };
        let zones = build_liquidation_zones(&detected, 0.02);

        assert_eq!(zones.len(), 3);
        // 90 band alone
        assert!((zones[0].start_price - 89.1).abs() < 1e-9);
        assert_eq!(zones[0].strength, Strength::Weak);
        // 100 and 101.5 bands overlap: [99, 102.515], strongest tier kept
        assert!((zones[1].start_price - 99.0).abs() < 1e-9);
        assert!((zones[1].end_price - 102.515).abs() < 1e-9);
        assert_eq!(zones[1].strength, Strength::Strong);
        assert_eq!(zones[1].label, "Support liquidation zone");
        assert_eq!(zones[2].label, "Resistance liquidation zone");
    }

    proptest! {
        #[test]
        fn strength_is_monotonic_in_distance(a in 0.0f64..20.0, b in 0.0f64..20.0) {
            if a < b {
                prop_assert!(classify_strength(a) >= classify_strength(b));
            }
        }

        #[test]
        fn nonpositive_price_always_empty(
            highs in prop::collection::vec(1.0f64..500.0, 0..60),
            price in -100.0f64..=0.0,
        ) {
            let result = detect_levels_from_extremes(&highs, &highs, &LevelParams::default(), price);
            prop_assert!(result.is_empty());
        }

        #[test]
        fn detection_is_deterministic(
            highs in prop::collection::vec(50.0f64..60.0, 0..100),
            price in 40.0f64..70.0,
        ) {
            let params = LevelParams::default();
            prop_assert_eq!(
                detect_levels_from_extremes(&highs, &highs, &params, price),
                detect_levels_from_extremes(&highs, &highs, &params, price)
            );
        }
    }
}
