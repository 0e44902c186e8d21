//! Target resolution: symbolic `(zone, position)` targets to concrete values.
//!
//! Resolution always runs against a table computed from the profile handed
//! in for the current pass. Nothing here caches results keyed on the zone
//! and position alone, so a threshold change is reflected immediately.

use crate::format::format_pace;
use crate::zones::pace_zone_percent;
use crate::{
    BlockTarget, Error, Result, TargetMetric, ThresholdProfile, ZoneId, ZoneKind, ZoneTable,
    ZoneTarget,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Resolve a position inside a zone band to a concrete value.
///
/// Position 0.0 is the easiest edge and 1.0 the hardest. For pace the
/// easiest edge is the numerically larger bound; for heart rate it is the
/// lower bound. Positions outside `[0.0, 1.0]` fail rather than clamp.
pub fn resolve_target(table: &ZoneTable, zone: ZoneId, position: f64) -> Result<f64> {
    check_position(position)?;

    let band = table.band(zone);
    let value = match table.kind {
        ZoneKind::Pace => band.max - position * band.width(),
        ZoneKind::HeartRate => band.min + position * band.width(),
    };

    tracing::debug!(
        "Resolved {}@{} against {:?} table to {:.2}",
        zone,
        position,
        table.kind,
        value
    );
    Ok(value)
}

/// Ensure a zone position lies in `[0.0, 1.0]`
pub fn check_position(position: f64) -> Result<()> {
    if (0.0..=1.0).contains(&position) {
        Ok(())
    } else {
        Err(Error::OutOfRange(format!(
            "zone position {} is outside [0.0, 1.0]",
            position
        )))
    }
}

/// How zone targets should be written into builder text
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TargetStyle {
    /// The zone id itself ("Z4")
    Symbolic,
    /// Percent of threshold speed ("95%-100% pace")
    #[default]
    PercentOfThreshold,
    /// Concrete pace resolved from the athlete's threshold pace
    Pace,
    /// Concrete heart rate resolved from the athlete's LTHR
    HeartRate,
}

/// Resolution strategy for one render pass
///
/// Concrete variants carry a table computed from the profile supplied for
/// this pass; build a new resolution whenever the profile changes.
#[derive(Clone, Debug, PartialEq)]
pub enum TargetResolution {
    Symbolic,
    PercentOfThreshold,
    Concrete(ZoneTable),
}

impl TargetResolution {
    /// Resolve zone targets to concrete paces
    pub fn pace(profile: &ThresholdProfile) -> Result<Self> {
        Ok(TargetResolution::Concrete(profile.pace_zones()?))
    }

    /// Resolve zone targets to concrete heart rates
    pub fn heart_rate(profile: &ThresholdProfile) -> Result<Self> {
        Ok(TargetResolution::Concrete(profile.hr_zones()?))
    }

    /// Build a resolution for the configured style.
    ///
    /// Concrete styles need a profile; without one the zones are published
    /// as percent of threshold so the calendar can resolve them itself.
    pub fn from_style(style: TargetStyle, profile: Option<&ThresholdProfile>) -> Result<Self> {
        match (style, profile) {
            (TargetStyle::Symbolic, _) => Ok(TargetResolution::Symbolic),
            (TargetStyle::PercentOfThreshold, _) => Ok(TargetResolution::PercentOfThreshold),
            (TargetStyle::Pace, Some(profile)) => Self::pace(profile),
            (TargetStyle::HeartRate, Some(profile)) => Self::heart_rate(profile),
            (style, None) => {
                tracing::warn!(
                    "No threshold profile available for {:?} targets, falling back to percent of threshold",
                    style
                );
                Ok(TargetResolution::PercentOfThreshold)
            }
        }
    }

    /// Resolve a symbolic zone target
    pub fn resolve_zone(&self, target: &ZoneTarget) -> Result<ResolvedTarget> {
        check_position(target.position)?;

        let resolved = match self {
            TargetResolution::Symbolic => ResolvedTarget::Symbolic(target.zone),
            TargetResolution::PercentOfThreshold => {
                let (low, high) = pace_zone_percent(target.zone);
                ResolvedTarget::PercentRange(low, high)
            }
            TargetResolution::Concrete(table) => {
                let value = resolve_target(table, target.zone, target.position)?;
                match table.kind {
                    ZoneKind::Pace => ResolvedTarget::Pace(value),
                    ZoneKind::HeartRate => ResolvedTarget::HeartRate(value),
                }
            }
        };
        Ok(resolved)
    }

    /// Resolve any block target; explicit literals pass through untouched
    pub fn resolve(&self, target: &BlockTarget) -> Result<ResolvedTarget> {
        match target {
            BlockTarget::Zone(zone) => self.resolve_zone(zone),
            BlockTarget::Explicit(explicit) => Ok(ResolvedTarget::Literal(
                explicit.metric.clone(),
                explicit.value.trim().to_string(),
            )),
        }
    }
}

/// A target ready to be written into builder text
#[derive(Clone, Debug, PartialEq)]
pub enum ResolvedTarget {
    /// Seconds per kilometre
    Pace(f64),
    /// Beats per minute
    HeartRate(f64),
    /// Percent of threshold speed, `(low, high)`
    PercentRange(u32, u32),
    Symbolic(ZoneId),
    Literal(TargetMetric, String),
}

impl fmt::Display for ResolvedTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedTarget::Pace(seconds) => write!(f, "{}/km pace", format_pace(*seconds)),
            ResolvedTarget::HeartRate(bpm) => write!(f, "{}bpm", bpm.round() as u32),
            ResolvedTarget::PercentRange(low, high) => write!(f, "{}%-{}% pace", low, high),
            ResolvedTarget::Symbolic(zone) => write!(f, "{}", zone),
            ResolvedTarget::Literal(_, value) => f.write_str(value),
        }
    }
}
