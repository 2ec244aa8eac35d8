//! Greedy relative-tolerance clustering of touch prices.

use itertools::Itertools;

use crate::config::LevelSelection;
use crate::models::levels::LevelKind;
use crate::utils::maths_utils::relative_distance;

#[cfg(debug_assertions)]
use crate::config::debug::PRINT_CLUSTERS;

/// Minimum touches for a cluster to count as a level.
pub const MIN_CLUSTER_MEMBERS: usize = 2;

/// Prices that touched roughly the same level.
///
/// Matching always uses `key`, the price that opened the cluster, so the
/// matching centre never drifts while scanning. The reported level is
/// `average()`, which can differ slightly from `key`.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceCluster {
    pub key: f64,
    pub members: Vec<f64>,
}

impl PriceCluster {
    fn new(price: f64) -> Self {
        Self {
            key: price,
            members: vec![price],
        }
    }

    pub fn matches(&self, price: f64, sensitivity: f64) -> bool {
        relative_distance(price, self.key) <= sensitivity
    }

    pub fn average(&self) -> f64 {
        self.members.iter().sum::<f64>() / self.members.len() as f64
    }

    pub fn is_significant(&self) -> bool {
        self.members.len() >= MIN_CLUSTER_MEMBERS
    }
}

/// First-fit clustering in input order. Each price joins the earliest-created
/// cluster whose key is within `sensitivity` (relative), otherwise opens a new
/// one. Result depends on input order; callers pass newest-first.
///
/// Non-positive and non-finite prices cannot anchor a relative tolerance and
/// are skipped.
pub fn find_price_clusters(prices: &[f64], sensitivity: f64) -> Vec<PriceCluster> {
    let mut clusters: Vec<PriceCluster> = Vec::new();

    for &price in prices {
        if !price.is_finite() || price <= 0.0 {
            continue;
        }
        match clusters.iter_mut().find(|c| c.matches(price, sensitivity)) {
            Some(cluster) => cluster.members.push(price),
            None => clusters.push(PriceCluster::new(price)),
        }
    }

    #[cfg(debug_assertions)]
    if PRINT_CLUSTERS {
        for c in &clusters {
            log::info!(
                "cluster key={:.4} avg={:.4} members={}",
                c.key,
                c.average(),
                c.members.len()
            );
        }
    }

    clusters
}

/// Average price of every significant cluster, in cluster creation order.
pub fn significant_levels(prices: &[f64], sensitivity: f64) -> Vec<f64> {
    find_price_clusters(prices, sensitivity)
        .iter()
        .filter(|c| c.is_significant())
        .map(PriceCluster::average)
        .collect()
}

/// Pick at most `max_levels` of the candidate prices for one side.
///
/// `Extremes` keeps the lowest supports and the highest resistances.
/// `NearestToPrice` keeps the candidates closest to `current_price`
/// (ties keep cluster creation order).
pub fn select_levels(
    candidates: &[f64],
    kind: LevelKind,
    selection: LevelSelection,
    max_levels: usize,
    current_price: f64,
) -> Vec<f64> {
    let ordered = match (selection, kind) {
        (LevelSelection::Extremes, LevelKind::Support) => candidates
            .iter()
            .copied()
            .sorted_by(|a, b| a.total_cmp(b))
            .collect_vec(),
        (LevelSelection::Extremes, LevelKind::Resistance) => candidates
            .iter()
            .copied()
            .sorted_by(|a, b| b.total_cmp(a))
            .collect_vec(),
        (LevelSelection::NearestToPrice, _) => candidates
            .iter()
            .copied()
            .sorted_by(|a, b| (a - current_price).abs().total_cmp(&(b - current_price).abs()))
            .collect_vec(),
    };

    ordered.into_iter().take(max_levels).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn scenario_highs_form_one_cluster_near_100() {
        let highs = [100.0, 101.0, 100.5, 150.0, 151.0, 100.8];
        let clusters = find_price_clusters(&highs, 0.02);

        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].key, 100.0);
        assert_eq!(clusters[0].members, vec![100.0, 101.0, 100.5, 100.8]);
        // 151 is within 2% of 150, so that pair is also retained
        assert_eq!(clusters[1].members, vec![150.0, 151.0]);

        let levels = significant_levels(&highs, 0.02);
        assert_eq!(levels.len(), 2);
        assert!((levels[0] - 100.575).abs() < 1e-9);
        assert!((levels[1] - 150.5).abs() < 1e-9);
    }

    #[test]
    fn lone_touch_is_dropped() {
        let highs = [100.0, 101.0, 100.5, 150.0, 100.8];
        let levels = significant_levels(&highs, 0.02);
        assert_eq!(levels.len(), 1);
        assert!(levels[0] > 99.0 && levels[0] < 102.0);
    }

    #[test]
    fn matching_uses_original_key_not_running_average() {
        // 102 joins 100 (2%), 103.5 is 3.5% from the key even though it is
        // within 2% of the running average (101).
        let clusters = find_price_clusters(&[100.0, 102.0, 103.5], 0.02);
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].members, vec![100.0, 102.0]);
        assert_eq!(clusters[1].key, 103.5);
    }

    #[test]
    fn first_fit_prefers_earliest_cluster() {
        // 101 is within 2% of both 100 and 102; it joins 100 (created first)
        let clusters = find_price_clusters(&[100.0, 102.5, 101.0], 0.02);
        assert_eq!(clusters[0].members, vec![100.0, 101.0]);
        assert_eq!(clusters[1].members, vec![102.5]);
    }

    #[test]
    fn invalid_prices_are_skipped() {
        let clusters = find_price_clusters(&[0.0, -5.0, f64::NAN, 10.0, 10.1], 0.02);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].members.len(), 2);
        assert!(find_price_clusters(&[], 0.02).is_empty());
    }

    #[test]
    fn extremes_selection_sorts_by_side() {
        let candidates = [105.0, 90.0, 120.0, 95.0, 80.0, 110.0, 99.0];
        let support = select_levels(&candidates, LevelKind::Support, LevelSelection::Extremes, 5, 100.0);
        assert_eq!(support, vec![80.0, 90.0, 95.0, 99.0, 105.0]);

        let resistance =
            select_levels(&candidates, LevelKind::Resistance, LevelSelection::Extremes, 5, 100.0);
        assert_eq!(resistance, vec![120.0, 110.0, 105.0, 99.0, 95.0]);
    }

    #[test]
    fn nearest_selection_sorts_by_distance() {
        let candidates = [105.0, 90.0, 120.0, 95.0, 80.0, 110.0, 99.0];
        let nearest =
            select_levels(&candidates, LevelKind::Support, LevelSelection::NearestToPrice, 3, 100.0);
        assert_eq!(nearest, vec![99.0, 105.0, 95.0]);
    }

    proptest! {
        #[test]
        fn mutually_close_prices_form_one_cluster(
            base in 1.0f64..10_000.0,
            offsets in prop::collection::vec(0.0f64..0.009, 1..50),
        ) {
            // every price within 0.9% of base, so within 2% of whichever opens the cluster
            let prices: Vec<f64> = offsets.iter().map(|o| base * (1.0 + o)).collect();
            let significant = significant_levels(&prices, 0.02);
            if prices.len() >= 2 {
                prop_assert_eq!(significant.len(), 1);
            } else {
                prop_assert!(significant.is_empty());
            }
        }

        #[test]
        fn clustering_is_deterministic(prices in prop::collection::vec(1.0f64..500.0, 0..200)) {
            prop_assert_eq!(
                find_price_clusters(&prices, 0.02),
                find_price_clusters(&prices, 0.02)
            );
        }
    }
}
