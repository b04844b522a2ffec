//! Unique-source parsing by angular clustering.
//!
//! Two pure passes: every position is replaced by the mean of all input
//! positions within `margin` of it, then exact duplicates are removed
//! keeping first-seen order. The clustering is a single pass, not a fixed
//! point, so the result depends on the margin and on how close the clusters
//! sit to each other.

use crate::config::SelectionConfig;
use crate::query::SkyPosition;

/// Replaces each position by the mean of the input positions within
/// `margin` degrees (flat-sky), itself included.
pub fn cluster_means(positions: &[SkyPosition], margin: f64) -> Vec<SkyPosition> {
    positions
        .iter()
        .map(|p| {
            let (ra, dec, n) = positions
                .iter()
                .filter(|q| p.distance_to(q) <= margin)
                .fold((0.0, 0.0, 0usize), |(ra, dec, n), q| (ra + q.ra, dec + q.dec, n + 1));
            if n == 0 {
                // Only reachable with a NaN coordinate or margin.
                *p
            } else {
                SkyPosition::new(ra / n as f64, dec / n as f64)
            }
        })
        .collect()
}

/// Drops exact duplicates, keeping the first occurrence.
pub fn dedup_stable(positions: Vec<SkyPosition>) -> Vec<SkyPosition> {
    let mut unique: Vec<SkyPosition> = Vec::with_capacity(positions.len());
    for p in positions {
        if !unique.contains(&p) {
            unique.push(p);
        }
    }
    unique
}

/// Unique sources among `positions`, treating entries within `margin`
/// degrees of each other as the same source.
pub fn parse_unique_sources(positions: &[SkyPosition], margin: f64) -> Vec<SkyPosition> {
    dedup_stable(cluster_means(positions, margin))
}

/// [`parse_unique_sources`] with the margin taken from
/// `config.unique_margin`.
pub fn unique_sources(positions: &[SkyPosition], config: &SelectionConfig) -> Vec<SkyPosition> {
    parse_unique_sources(positions, config.unique_margin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn p(ra: f64, dec: f64) -> SkyPosition {
        SkyPosition::new(ra, dec)
    }

    #[test]
    fn collapses_tight_pairs() {
        let input = [p(10.0, 10.0), p(10.002, 10.0), p(20.0, 20.0)];
        let unique = parse_unique_sources(&input, 0.005);
        assert_eq!(unique.len(), 2);
        assert_relative_eq!(unique[0].ra, 10.001, epsilon = 1e-12);
        assert_eq!(unique[1], p(20.0, 20.0));
    }

    #[test]
    fn keeps_first_seen_order() {
        let input = [p(5.0, 5.0), p(1.0, 1.0), p(5.0, 5.0), p(3.0, 3.0)];
        let unique = parse_unique_sources(&input, 0.001);
        assert_eq!(unique, vec![p(5.0, 5.0), p(1.0, 1.0), p(3.0, 3.0)]);
    }

    #[test]
    fn chain_is_not_transitive() {
        // Middle point links both ends; ends are not within margin of each other.
        let input = [p(0.0, 0.0), p(0.004, 0.0), p(0.008, 0.0)];
        let means = cluster_means(&input, 0.005);
        assert_relative_eq!(means[0].ra, 0.002, epsilon = 1e-12);
        assert_relative_eq!(means[1].ra, 0.004, epsilon = 1e-12);
        assert_relative_eq!(means[2].ra, 0.006, epsilon = 1e-12);
        assert_eq!(parse_unique_sources(&input, 0.005).len(), 3);
    }

    #[test]
    fn config_margin_drives_clustering() {
        let input = [p(10.0, 10.0), p(10.002, 10.0)];
        assert_eq!(unique_sources(&input, &SelectionConfig::default()).len(), 1);
        let tight = SelectionConfig {
            unique_margin: 0.001,
            ..SelectionConfig::default()
        };
        assert_eq!(unique_sources(&input, &tight), input.to_vec());
    }

    #[test]
    fn empty_input() {
        assert!(parse_unique_sources(&[], 0.005).is_empty());
    }

    #[test]
    fn second_pass_does_not_shrink_separated_clusters() {
        let input = [
            p(100.0, -30.0),
            p(100.001, -30.001),
            p(100.0005, -29.9995),
            p(100.1, -30.0),
            p(100.1015, -30.0),
            p(101.0, -31.0),
        ];
        let first = parse_unique_sources(&input, 0.005);
        assert_eq!(first.len(), 3);
        let second = parse_unique_sources(&first, 0.005);
        assert_eq!(second.len(), first.len());
    }
}
