//! Resolution search: pick the frequency whose median edge length is
//! closest to a target.

use std::ops::RangeInclusive;

use crate::error::{MeshError, Result};
use crate::mesh::{MAX_FREQUENCY, Mesh};
use crate::stats::EdgeStats;

/// Default search range for [`select_frequency`].
pub const DEFAULT_SEARCH_RANGE: RangeInclusive<u32> = 1..=12;

/// Outcome of a frequency search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyChoice {
    /// Selected subdivision frequency.
    pub frequency: u32,
    /// `|median - target|` in kilometers.
    pub deviation_km: f64,
    /// Median edge length achieved at `frequency`.
    pub median_km: f64,
}

/// Brute-force the frequency in `range` whose median great-circle edge
/// length is closest to `target_km`.
///
/// Candidates are tried in ascending order and only a strictly smaller
/// deviation replaces the current best, so ties go to the smallest frequency.
///
/// # Errors
///
/// Returns [`MeshError::InvalidArgument`] for a non-positive target or
/// radius, an empty range, a range that starts at zero, or a range that
/// ends above [`MAX_FREQUENCY`]. All checks run before any mesh is built.
pub fn select_frequency(
    target_km: f64,
    range: RangeInclusive<u32>,
    radius_km: f64,
) -> Result<FrequencyChoice> {
    if !(target_km.is_finite() && target_km > 0.0) {
        return Err(MeshError::invalid(
            "target length",
            format!("must be a positive number of kilometers, got {target_km}"),
        ));
    }
    if !(radius_km.is_finite() && radius_km > 0.0) {
        return Err(MeshError::invalid(
            "radius",
            format!("must be a positive number of kilometers, got {radius_km}"),
        ));
    }
    if range.is_empty() {
        return Err(MeshError::invalid(
            "search range",
            format!("{}..={} is empty", range.start(), range.end()),
        ));
    }
    if *range.start() == 0 {
        return Err(MeshError::invalid("search range", "frequencies start at 1"));
    }
    if *range.end() > MAX_FREQUENCY {
        return Err(MeshError::invalid(
            "search range",
            format!("{} exceeds the maximum of {MAX_FREQUENCY}", range.end()),
        ));
    }

    let mut best: Option<FrequencyChoice> = None;
    for f in range {
        let mesh = Mesh::build(f)?;
        let Some(stats) = EdgeStats::compute(&mesh, radius_km) else {
            continue;
        };
        let deviation_km = (stats.median_km - target_km).abs();
        tracing::debug!(
            frequency = f,
            median_km = stats.median_km,
            deviation_km,
            "evaluated candidate"
        );

        if best.is_none_or(|b| deviation_km < b.deviation_km) {
            best = Some(FrequencyChoice {
                frequency: f,
                deviation_km,
                median_km: stats.median_km,
            });
        }
    }

    best.ok_or_else(|| MeshError::invalid("search range", "no candidate produced edges"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::EARTH_RADIUS_KM;

    #[test]
    fn test_selection_is_minimal_over_range() {
        let choice = select_frequency(1180.0, 1..=10, EARTH_RADIUS_KM).unwrap();

        for f in 1..=10 {
            let mesh = Mesh::build(f).unwrap();
            let stats = EdgeStats::compute(&mesh, EARTH_RADIUS_KM).unwrap();
            let deviation = (stats.median_km - 1180.0).abs();
            assert!(
                choice.deviation_km <= deviation,
                "f={f} beats chosen f={}",
                choice.frequency
            );
        }
        assert_eq!(choice.frequency, 7);
        assert!((choice.deviation_km - (choice.median_km - 1180.0).abs()).abs() < 1e-9);
    }

    #[test]
    fn test_selection_is_deterministic() {
        let a = select_frequency(732.0, DEFAULT_SEARCH_RANGE, EARTH_RADIUS_KM).unwrap();
        let b = select_frequency(732.0, DEFAULT_SEARCH_RANGE, EARTH_RADIUS_KM).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_huge_target_picks_coarsest() {
        let choice = select_frequency(50_000.0, 1..=4, EARTH_RADIUS_KM).unwrap();
        assert_eq!(choice.frequency, 1);
    }

    #[test]
    fn test_tiny_target_picks_finest() {
        let choice = select_frequency(1.0, 1..=4, EARTH_RADIUS_KM).unwrap();
        assert_eq!(choice.frequency, 4);
    }

    #[test]
    fn test_single_candidate_range() {
        let choice = select_frequency(100.0, 3..=3, EARTH_RADIUS_KM).unwrap();
        assert_eq!(choice.frequency, 3);
    }

    #[test]
    fn test_invalid_inputs() {
        for target in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                select_frequency(target, 1..=4, EARTH_RADIUS_KM),
                Err(MeshError::InvalidArgument { .. })
            ));
        }
        #[allow(clippy::reversed_empty_ranges)]
        let empty = 5..=4;
        assert!(select_frequency(100.0, empty, EARTH_RADIUS_KM).is_err());
        assert!(select_frequency(100.0, 0..=4, EARTH_RADIUS_KM).is_err());
        assert!(select_frequency(100.0, 1..=4, 0.0).is_err());
    }

    #[test]
    fn test_oversize_range_rejected_before_building() {
        let started = std::time::Instant::now();
        let result = select_frequency(100.0, 1..=MAX_FREQUENCY + 1, EARTH_RADIUS_KM);
        assert!(matches!(
            result,
            Err(MeshError::InvalidArgument {
                context: "search range",
                ..
            })
        ));
        // Building even one large mesh would take far longer than this.
        assert!(started.elapsed() < std::time::Duration::from_secs(1));

        let result = select_frequency(100.0, 240..=300, EARTH_RADIUS_KM);
        assert!(matches!(result, Err(MeshError::InvalidArgument { .. })));
    }
}
