//! Inbound workout documents from the planning collaborator.
//!
//! The collaborator is an LLM, so its output is untrusted: responses may be
//! wrapped in prose or markdown fences, and any field may be missing. A
//! document is either converted in full or rejected; no partial plans.

use crate::format::check_duration;
use crate::resolve::check_position;
use crate::types::check_single_line;
use crate::{
    BlockTarget, Error, ExplicitTarget, Phase, Result, Sport, TargetMetric, WorkoutBlock,
    WorkoutPlan, ZoneId, ZoneTarget,
};
use chrono::NaiveDateTime;
use serde::Deserialize;
use serde_json::Value;

/// Defaults applied to fields the collaborator may omit
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlanDefaults {
    /// Zone position used when a block names a zone without one
    pub zone_position: f64,
    pub sport: Sport,
}

impl Default for PlanDefaults {
    fn default() -> Self {
        Self {
            zone_position: 0.5,
            sport: Sport::Run,
        }
    }
}

/// Workout document format (matches the collaborator's structured output)
#[derive(Debug, Deserialize)]
struct RawWorkout {
    workout_name: Option<String>,
    description: Option<String>,
    sport: Option<String>,
    structure: Option<Vec<RawBlock>>,
}

#[derive(Debug, Deserialize)]
struct RawBlock {
    #[serde(rename = "type")]
    kind: Option<String>,
    duration_min: Option<f64>,
    reps: Option<u32>,
    zone: Option<String>,
    zone_position: Option<f64>,
    target: Option<RawTarget>,
    intensity: Option<String>,
    intensity_description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawTarget {
    metric: Option<String>,
    value: Option<Value>,
}

/// Extract the JSON object from a collaborator response.
///
/// Handles bare JSON, ```json fenced blocks, plain fences, and finally the
/// span from the first `{` to the last `}`. The result borrows from `text`;
/// nothing is copied until the plan itself is built.
pub fn extract_json(text: &str) -> Result<&str> {
    let trimmed = text.trim();
    if trimmed.starts_with('{') {
        return Ok(trimmed);
    }

    if let Some(start) = text.find("```json") {
        let start = start + "```json".len();
        if let Some(end) = text[start..].find("```") {
            return Ok(text[start..start + end].trim());
        }
    }

    if let Some(start) = text.find("```") {
        let start = start + 3;
        // Skip language identifier if present
        let content_start = text[start..]
            .find('\n')
            .map(|i| start + i + 1)
            .unwrap_or(start);
        if let Some(end) = text[content_start..].find("```") {
            return Ok(text[content_start..content_start + end].trim());
        }
    }

    if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) {
        if start < end {
            return Ok(&text[start..=end]);
        }
    }

    Err(Error::Schema("no JSON object found in response".into()))
}

/// Parse a collaborator response into a validated plan starting at `start`
pub fn parse_plan(text: &str, start: NaiveDateTime, defaults: &PlanDefaults) -> Result<WorkoutPlan> {
    let json = extract_json(text)?;
    let raw: RawWorkout = serde_json::from_str(json)
        .map_err(|e| Error::Schema(format!("malformed workout document: {}", e)))?;

    let name = raw
        .workout_name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| Error::Schema("missing workout_name".into()))?;

    let sport = match raw.sport.as_deref() {
        Some(sport) => sport.parse::<Sport>()?,
        None => defaults.sport,
    };

    let structure = raw
        .structure
        .ok_or_else(|| Error::Schema("missing structure".into()))?;

    let blocks = structure
        .into_iter()
        .enumerate()
        .map(|(index, block)| convert_block(index, block, defaults))
        .collect::<Result<Vec<_>>>()?;

    tracing::info!("Parsed workout {:?} with {} blocks", name, blocks.len());

    Ok(WorkoutPlan {
        name,
        description: raw.description.unwrap_or_default(),
        sport,
        start,
        blocks,
    })
}

fn convert_block(index: usize, raw: RawBlock, defaults: &PlanDefaults) -> Result<WorkoutBlock> {
    let phase: Phase = raw
        .kind
        .as_deref()
        .ok_or_else(|| Error::Schema(format!("block {} is missing type", index)))?
        .parse::<Phase>()
        .map_err(|e| Error::Schema(format!("block {}: {}", index, e)))?;

    let duration_minutes = raw
        .duration_min
        .ok_or_else(|| Error::Schema(format!("block {} is missing duration_min", index)))?;
    check_duration(index, duration_minutes)?;

    let target = convert_target(index, raw.zone, raw.zone_position, raw.target, defaults)?;

    let label = raw
        .intensity_description
        .or(raw.intensity)
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty());
    if let Some(label) = &label {
        check_single_line(&format!("block {} label", index), label)?;
    }

    Ok(WorkoutBlock {
        phase,
        duration_minutes,
        target,
        label,
        reps: raw.reps,
    })
}

/// A zone wins over an explicit target when both are present
fn convert_target(
    index: usize,
    zone: Option<String>,
    zone_position: Option<f64>,
    target: Option<RawTarget>,
    defaults: &PlanDefaults,
) -> Result<BlockTarget> {
    if let Some(zone) = zone.filter(|z| !z.trim().is_empty()) {
        let zone: ZoneId = zone.parse()?;
        let position = zone_position.unwrap_or(defaults.zone_position);
        check_position(position)?;
        return Ok(BlockTarget::Zone(ZoneTarget { zone, position }));
    }

    let explicit = target.and_then(|t| {
        let value = match t.value? {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            _ => return None,
        };
        if value.is_empty() {
            return None;
        }
        let metric = TargetMetric::from(t.metric.unwrap_or_default());
        Some(ExplicitTarget { metric, value })
    });

    let explicit = explicit.ok_or(Error::MissingTarget { index })?;
    check_single_line(&format!("block {} target", index), &explicit.value)?;
    Ok(BlockTarget::Explicit(explicit))
}
