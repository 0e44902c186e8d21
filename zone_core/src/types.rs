//! Core domain types for the zone engine.
//!
//! This module defines the fundamental types used throughout the system:
//! - Zone identifiers, bands and tables
//! - Athlete threshold profile
//! - Workout blocks, targets and plans

use crate::{Error, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Zones
// ============================================================================

/// Ordinal training zone, Z1 easiest to Z5 hardest
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ZoneId {
    Z1,
    Z2,
    Z3,
    Z4,
    Z5,
}

impl ZoneId {
    /// All zones in ascending intensity
    pub const ALL: [ZoneId; 5] = [ZoneId::Z1, ZoneId::Z2, ZoneId::Z3, ZoneId::Z4, ZoneId::Z5];

    /// Position of this zone within a table (Z1 = 0)
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ZoneId::Z1 => "Z1",
            ZoneId::Z2 => "Z2",
            ZoneId::Z3 => "Z3",
            ZoneId::Z4 => "Z4",
            ZoneId::Z5 => "Z5",
        }
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ZoneId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "Z1" => Ok(ZoneId::Z1),
            "Z2" => Ok(ZoneId::Z2),
            "Z3" => Ok(ZoneId::Z3),
            "Z4" => Ok(ZoneId::Z4),
            "Z5" => Ok(ZoneId::Z5),
            other => Err(Error::OutOfRange(format!("unknown zone id {:?}", other))),
        }
    }
}

/// Lower and upper bound of a zone, in the table's native unit
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZoneBand {
    pub min: f64,
    pub max: f64,
}

impl ZoneBand {
    pub fn width(&self) -> f64 {
        self.max - self.min
    }
}

/// What a zone table measures
///
/// Pace is seconds per kilometre, so its intensity runs opposite to its
/// numeric value. Heart rate is beats per minute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneKind {
    Pace,
    HeartRate,
}

/// Five contiguous bands, indexed by [`ZoneId`]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZoneTable {
    pub kind: ZoneKind,
    pub bands: [ZoneBand; 5],
}

impl ZoneTable {
    pub fn band(&self, zone: ZoneId) -> ZoneBand {
        self.bands[zone.index()]
    }

    /// Bands in Z1 → Z5 order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (ZoneId, ZoneBand)> + '_ {
        ZoneId::ALL.iter().map(move |&zone| (zone, self.band(zone)))
    }
}

// ============================================================================
// Athlete Profile
// ============================================================================

/// The two scalars every zone table is derived from
///
/// Owned by the caller. Tables are recomputed from it on every call and
/// never cached alongside it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThresholdProfile {
    pub threshold_pace_seconds_per_km: f64,
    pub lthr_bpm: u32,
}

impl ThresholdProfile {
    pub fn new(threshold_pace_seconds_per_km: f64, lthr_bpm: u32) -> Self {
        Self {
            threshold_pace_seconds_per_km,
            lthr_bpm,
        }
    }

    pub fn pace_zones(&self) -> Result<ZoneTable> {
        crate::zones::compute_pace_zones(self.threshold_pace_seconds_per_km)
    }

    pub fn hr_zones(&self) -> Result<ZoneTable> {
        crate::zones::compute_hr_zones(self.lthr_bpm)
    }
}

// ============================================================================
// Workout Blocks
// ============================================================================

/// Phase of a workout block; contiguous runs of the same phase share a header
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Phase {
    Warmup,
    Interval,
    Recovery,
    Cooldown,
    Steady,
    Other(String),
}

impl Phase {
    pub fn as_str(&self) -> &str {
        match self {
            Phase::Warmup => "warmup",
            Phase::Interval => "interval",
            Phase::Recovery => "recovery",
            Phase::Cooldown => "cooldown",
            Phase::Steady => "steady",
            Phase::Other(name) => name,
        }
    }

    /// Group header as it appears in builder text ("Warmup", "Interval", ...)
    pub fn header(&self) -> String {
        capitalize(self.as_str())
    }
}

impl FromStr for Phase {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(Error::Schema("block type must not be empty".into()));
        }
        check_header(trimmed)?;

        let phase = match trimmed.to_lowercase().as_str() {
            "warmup" | "warm_up" | "warm-up" => Phase::Warmup,
            "interval" | "intervals" => Phase::Interval,
            "recovery" => Phase::Recovery,
            "cooldown" | "cool_down" | "cool-down" => Phase::Cooldown,
            "steady" => Phase::Steady,
            _ => Phase::Other(trimmed.to_string()),
        };
        Ok(phase)
    }
}

impl TryFrom<String> for Phase {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Phase> for String {
    fn from(phase: Phase) -> Self {
        phase.as_str().to_string()
    }
}

/// Metric of an explicit target as named by the planning collaborator
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TargetMetric {
    Pace,
    Power,
    HeartRate,
    Rpe,
    Other(String),
}

impl TargetMetric {
    pub fn as_str(&self) -> &str {
        match self {
            TargetMetric::Pace => "pace",
            TargetMetric::Power => "power",
            TargetMetric::HeartRate => "hr",
            TargetMetric::Rpe => "rpe",
            TargetMetric::Other(name) => name,
        }
    }
}

impl From<String> for TargetMetric {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "pace" => TargetMetric::Pace,
            "power" => TargetMetric::Power,
            "hr" | "heart_rate" | "heartrate" => TargetMetric::HeartRate,
            "rpe" => TargetMetric::Rpe,
            other => TargetMetric::Other(other.to_string()),
        }
    }
}

impl From<TargetMetric> for String {
    fn from(metric: TargetMetric) -> Self {
        metric.as_str().to_string()
    }
}

/// Symbolic target: a zone plus a position inside it (0.0 easiest, 1.0 hardest)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZoneTarget {
    pub zone: ZoneId,
    pub position: f64,
}

/// Pre-resolved literal target, rendered verbatim
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExplicitTarget {
    pub metric: TargetMetric,
    pub value: String,
}

/// What a block asks the athlete to hold
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlockTarget {
    Zone(ZoneTarget),
    Explicit(ExplicitTarget),
}

/// One step of a workout, in execution order
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorkoutBlock {
    pub phase: Phase,
    pub duration_minutes: f64,
    pub target: BlockTarget,
    /// Step label shown after the target ("Threshold", "Easy jog")
    pub label: Option<String>,
    /// Repeat count; values above one make the block a repeat set
    pub reps: Option<u32>,
}

impl WorkoutBlock {
    pub fn zone(phase: Phase, duration_minutes: f64, zone: ZoneId, position: f64) -> Self {
        Self {
            phase,
            duration_minutes,
            target: BlockTarget::Zone(ZoneTarget { zone, position }),
            label: None,
            reps: None,
        }
    }

    pub fn explicit(
        phase: Phase,
        duration_minutes: f64,
        metric: TargetMetric,
        value: impl Into<String>,
    ) -> Self {
        Self {
            phase,
            duration_minutes,
            target: BlockTarget::Explicit(ExplicitTarget {
                metric,
                value: value.into(),
            }),
            label: None,
            reps: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_reps(mut self, reps: u32) -> Self {
        self.reps = Some(reps);
        self
    }

    /// Number of times the block is performed (at least once)
    pub fn repeat_count(&self) -> u32 {
        self.reps.unwrap_or(1).max(1)
    }
}

// ============================================================================
// Plans
// ============================================================================

/// Sport of a planned workout
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sport {
    Run,
    Bike,
    Strength,
    Yoga,
    Mobility,
}

impl Sport {
    /// Activity type understood by the external calendar
    pub fn calendar_type(self) -> &'static str {
        match self {
            Sport::Run => "Run",
            Sport::Bike => "Ride",
            Sport::Strength => "WeightTraining",
            Sport::Yoga => "Yoga",
            Sport::Mobility => "Workout",
        }
    }
}

impl FromStr for Sport {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "run" | "running" => Ok(Sport::Run),
            "bike" | "ride" | "cycling" => Ok(Sport::Bike),
            "strength" => Ok(Sport::Strength),
            "yoga" => Ok(Sport::Yoga),
            "mobility" => Ok(Sport::Mobility),
            other => Err(Error::Schema(format!("unknown sport {:?}", other))),
        }
    }
}

/// A complete workout ready for rendering and publishing
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorkoutPlan {
    pub name: String,
    pub description: String,
    pub sport: Sport,
    /// Intended start in the athlete's local time
    pub start: NaiveDateTime,
    pub blocks: Vec<WorkoutBlock>,
}

impl WorkoutPlan {
    pub fn total_minutes(&self) -> f64 {
        self.blocks
            .iter()
            .map(|b| b.duration_minutes * f64::from(b.repeat_count()))
            .sum()
    }

    pub fn moving_time_seconds(&self) -> u32 {
        (self.total_minutes() * 60.0).round() as u32
    }
}

/// Builder text is line oriented: one header or step per line
pub(crate) fn check_single_line(field: &str, value: &str) -> Result<()> {
    if value.chars().any(char::is_control) {
        return Err(Error::Schema(format!(
            "{} {:?} must be a single line without control characters",
            field, value
        )));
    }
    Ok(())
}

/// A group header must not read back as a step line
pub(crate) fn check_header(header: &str) -> Result<()> {
    check_single_line("block type", header)?;
    if header.starts_with('-') {
        return Err(Error::Schema(format!(
            "block type {:?} must not start with '-'",
            header
        )));
    }
    Ok(())
}

pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
