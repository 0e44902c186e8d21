//! Zone calculator: threshold scalars to five-band zone tables.
//!
//! Pace bands are multiples of threshold pace (more seconds = easier).
//! Heart-rate bands are rounded percentages of LTHR, capped at 220 bpm.

use crate::{Error, Result, ZoneBand, ZoneId, ZoneKind, ZoneTable};

/// Pace band factors `(fast, slow)` relative to threshold pace, Z1..Z5
const PACE_FACTORS: [(f64, f64); 5] = [
    (1.30, 1.45),
    (1.15, 1.30),
    (1.05, 1.15),
    (1.00, 1.05),
    (0.90, 1.00),
];

/// Heart-rate band percentages of LTHR for Z2..Z4; Z1 and Z5 are open-ended
const HR_PERCENTS: [(u32, u32); 3] = [(85, 89), (90, 94), (95, 99)];

/// Ceiling applied to every heart-rate bound
pub const HR_CEILING_BPM: u32 = 220;

/// Compute pace zones from threshold pace in seconds per kilometre
pub fn compute_pace_zones(threshold_pace_seconds: f64) -> Result<ZoneTable> {
    if !threshold_pace_seconds.is_finite() || threshold_pace_seconds <= 0.0 {
        return Err(Error::InvalidThreshold(format!(
            "threshold pace must be a positive number of seconds, got {}",
            threshold_pace_seconds
        )));
    }

    let bands = PACE_FACTORS.map(|(fast, slow)| ZoneBand {
        min: threshold_pace_seconds * fast,
        max: threshold_pace_seconds * slow,
    });

    tracing::debug!(
        "Computed pace zones for threshold {:.1}s/km",
        threshold_pace_seconds
    );

    Ok(ZoneTable {
        kind: ZoneKind::Pace,
        bands,
    })
}

/// Compute heart-rate zones from lactate-threshold heart rate
pub fn compute_hr_zones(lthr_bpm: u32) -> Result<ZoneTable> {
    if lthr_bpm == 0 {
        return Err(Error::InvalidThreshold(
            "LTHR must be greater than zero".into(),
        ));
    }

    let z2_floor = percent_of(lthr_bpm, 85);
    let [z2, z3, z4] = HR_PERCENTS.map(|(low, high)| {
        hr_band(percent_of(lthr_bpm, low), percent_of(lthr_bpm, high))
    });

    let bands = [
        hr_band(0, z2_floor.saturating_sub(1)),
        z2,
        z3,
        z4,
        hr_band(percent_of(lthr_bpm, 100), HR_CEILING_BPM),
    ];

    tracing::debug!("Computed HR zones for LTHR {} bpm", lthr_bpm);

    Ok(ZoneTable {
        kind: ZoneKind::HeartRate,
        bands,
    })
}

/// `value * percent / 100`, rounded half-up in integer arithmetic
fn percent_of(value: u32, percent: u32) -> u32 {
    let scaled = u64::from(value) * u64::from(percent);
    ((scaled + 50) / 100).min(u64::from(u32::MAX)) as u32
}

fn hr_band(min: u32, max: u32) -> ZoneBand {
    ZoneBand {
        min: f64::from(min.min(HR_CEILING_BPM)),
        max: f64::from(max.min(HR_CEILING_BPM)),
    }
}

/// Pace band for a single zone
pub fn pace_range(threshold_pace_seconds: f64, zone: ZoneId) -> Result<ZoneBand> {
    Ok(compute_pace_zones(threshold_pace_seconds)?.band(zone))
}

/// A zone expressed as percent of threshold *speed*, `(low, high)`.
///
/// Speed is the inverse of pace, so each bound is `round(100 / factor)`:
/// Z1 69-77, Z2 77-87, Z3 87-95, Z4 95-100, Z5 100-111. Publishing the
/// percentage lets the calendar recompute paces from its own threshold.
pub fn pace_zone_percent(zone: ZoneId) -> (u32, u32) {
    let (fast, slow) = PACE_FACTORS[zone.index()];
    (
        (100.0 / slow).round() as u32,
        (100.0 / fast).round() as u32,
    )
}

/// Classify a concrete pace or heart rate into a zone.
///
/// Values beyond the outer bands clamp to Z1/Z5. A value on a shared edge
/// belongs to the harder zone. Non-finite input has no zone.
pub fn zone_for_value(table: &ZoneTable, value: f64) -> Option<ZoneId> {
    if !value.is_finite() {
        return None;
    }

    let mut hardest_first = table.iter().rev();
    let found = match table.kind {
        ZoneKind::Pace => hardest_first.find(|(_, band)| value <= band.max),
        ZoneKind::HeartRate => hardest_first.find(|(_, band)| value >= band.min),
    };

    Some(found.map(|(zone, _)| zone).unwrap_or(ZoneId::Z1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pace_z4_anchored_on_threshold() {
        for threshold in [180.0, 240.0, 300.0, 421.5] {
            let zones = compute_pace_zones(threshold).unwrap();
            let z4 = zones.band(ZoneId::Z4);
            assert!((z4.min - threshold).abs() < 1.0);
            assert!((z4.max - threshold * 1.05).abs() < 1.0);
            assert_eq!(zones.band(ZoneId::Z5).max, z4.min);
        }
    }

    #[test]
    fn test_pace_zones_contiguous() {
        let zones = compute_pace_zones(240.0).unwrap();
        let bands: Vec<_> = zones.iter().map(|(_, b)| b).collect();
        for pair in bands.windows(2) {
            // Each harder zone sits directly below the easier one in seconds
            assert!((pair[0].min - pair[1].max).abs() < 1e-9);
            assert!(pair[0].min > pair[1].min);
        }
        assert!((zones.band(ZoneId::Z1).max - 348.0).abs() < 1e-9);
        assert!((zones.band(ZoneId::Z5).min - 216.0).abs() < 1e-9);
    }

    #[test]
    fn test_hr_zones_for_170() {
        let zones = compute_hr_zones(170).unwrap();
        assert_eq!(zones.kind, ZoneKind::HeartRate);
        assert_eq!(zones.band(ZoneId::Z1), ZoneBand { min: 0.0, max: 144.0 });
        assert_eq!(zones.band(ZoneId::Z2), ZoneBand { min: 145.0, max: 151.0 });
        assert_eq!(zones.band(ZoneId::Z3), ZoneBand { min: 153.0, max: 160.0 });
        assert_eq!(zones.band(ZoneId::Z4), ZoneBand { min: 162.0, max: 168.0 });
        assert_eq!(zones.band(ZoneId::Z5), ZoneBand { min: 170.0, max: 220.0 });
    }

    #[test]
    fn test_hr_zones_ascending() {
        let zones = compute_hr_zones(182).unwrap();
        let bands: Vec<_> = zones.iter().map(|(_, b)| b).collect();
        for pair in bands.windows(2) {
            assert!(pair[0].max < pair[1].min);
        }
    }

    #[test]
    fn test_hr_zones_clamped_to_ceiling() {
        let zones = compute_hr_zones(240).unwrap();
        for (_, band) in zones.iter() {
            assert!(band.min >= 0.0 && band.max <= 220.0);
        }
        assert_eq!(zones.band(ZoneId::Z5).min, 220.0);
    }

    #[test]
    fn test_invalid_thresholds_rejected() {
        assert!(matches!(compute_pace_zones(0.0), Err(Error::InvalidThreshold(_))));
        assert!(matches!(compute_pace_zones(-240.0), Err(Error::InvalidThreshold(_))));
        assert!(matches!(compute_pace_zones(f64::NAN), Err(Error::InvalidThreshold(_))));
        assert!(matches!(
            compute_pace_zones(f64::INFINITY),
            Err(Error::InvalidThreshold(_))
        ));
        assert!(matches!(compute_hr_zones(0), Err(Error::InvalidThreshold(_))));
    }

    #[test]
    fn test_pace_zone_percent() {
        assert_eq!(pace_zone_percent(ZoneId::Z1), (69, 77));
        assert_eq!(pace_zone_percent(ZoneId::Z2), (77, 87));
        assert_eq!(pace_zone_percent(ZoneId::Z3), (87, 95));
        assert_eq!(pace_zone_percent(ZoneId::Z4), (95, 100));
        assert_eq!(pace_zone_percent(ZoneId::Z5), (100, 111));
    }

    #[test]
    fn test_pace_range() {
        let band = pace_range(300.0, ZoneId::Z4).unwrap();
        assert!((band.min - 300.0).abs() < 1e-9);
        assert!((band.max - 315.0).abs() < 1e-9);
    }

    #[test]
    fn test_zone_for_value() {
        let pace = compute_pace_zones(240.0).unwrap();
        assert_eq!(zone_for_value(&pace, 246.0), Some(ZoneId::Z4));
        assert_eq!(zone_for_value(&pace, 200.0), Some(ZoneId::Z5));
        assert_eq!(zone_for_value(&pace, 400.0), Some(ZoneId::Z1));
        assert_eq!(zone_for_value(&pace, f64::NAN), None);

        let hr = compute_hr_zones(170).unwrap();
        assert_eq!(zone_for_value(&hr, 165.0), Some(ZoneId::Z4));
        assert_eq!(zone_for_value(&hr, 169.0), Some(ZoneId::Z4));
        assert_eq!(zone_for_value(&hr, 120.0), Some(ZoneId::Z1));
        assert_eq!(zone_for_value(&hr, 230.0), Some(ZoneId::Z5));
    }
}
