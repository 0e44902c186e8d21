//! Outbound calendar events.
//!
//! One event per plan, in plan order, shaped for the calendar's bulk event
//! endpoint. Building an event always passes the temporal safeguard first.

use crate::builder::render;
use crate::resolve::TargetResolution;
use crate::safeguard::authorize_push;
use crate::{Result, WorkoutPlan};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Calendar category for planned workouts
pub const WORKOUT_CATEGORY: &str = "WORKOUT";

/// Format of `start_date_local`
const START_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// An event as the calendar expects it
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub category: String,
    pub start_date_local: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub activity_type: String,
    /// Total planned duration in seconds
    pub moving_time: u32,
}

/// Knobs for event construction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    /// Append the plan's prose description after the structured text
    pub append_description: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            append_description: true,
        }
    }
}

/// Build the calendar event for one plan
pub fn build_event(
    plan: &WorkoutPlan,
    resolution: &TargetResolution,
    options: &ExportOptions,
    today: NaiveDate,
) -> Result<CalendarEvent> {
    authorize_push(plan, today)?;

    let structure = render(&plan.blocks, resolution)?;
    let prose = plan.description.trim();
    let description = if options.append_description && !prose.is_empty() {
        if structure.is_empty() {
            prose.to_string()
        } else {
            format!("{}\n\n{}", structure, prose)
        }
    } else {
        structure
    };

    let event = CalendarEvent {
        category: WORKOUT_CATEGORY.to_string(),
        start_date_local: plan.start.format(START_FORMAT).to_string(),
        name: plan.name.clone(),
        description,
        activity_type: plan.sport.calendar_type().to_string(),
        moving_time: plan.moving_time_seconds(),
    };

    tracing::info!(
        "Built calendar event {:?} for {} ({}s)",
        event.name,
        event.start_date_local,
        event.moving_time
    );
    Ok(event)
}

/// Build events for a batch of plans, keeping their order.
///
/// The first failing plan rejects the whole batch.
pub fn build_events(
    plans: &[WorkoutPlan],
    resolution: &TargetResolution,
    options: &ExportOptions,
    today: NaiveDate,
) -> Result<Vec<CalendarEvent>> {
    plans
        .iter()
        .map(|plan| build_event(plan, resolution, options, today))
        .collect()
}

/// Serialize a batch as the JSON array the bulk endpoint accepts
pub fn to_payload_json(events: &[CalendarEvent]) -> Result<String> {
    Ok(serde_json::to_string(events)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, Phase, Sport, TargetMetric, ThresholdProfile, WorkoutBlock, ZoneId};
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 6, 15).unwrap()
    }

    fn plan(name: &str, days_from_today: i64) -> WorkoutPlan {
        WorkoutPlan {
            name: name.into(),
            description: "Stay relaxed on the recoveries.".into(),
            sport: Sport::Run,
            start: (today() + Duration::days(days_from_today))
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            blocks: vec![
                WorkoutBlock::zone(Phase::Warmup, 10.0, ZoneId::Z1, 0.5),
                WorkoutBlock::zone(Phase::Interval, 5.0, ZoneId::Z4, 0.5),
                WorkoutBlock::explicit(Phase::Recovery, 2.0, TargetMetric::Rpe, "3"),
                WorkoutBlock::zone(Phase::Cooldown, 10.0, ZoneId::Z1, 0.5),
            ],
        }
    }

    #[test]
    fn test_build_event_fields() {
        let event = build_event(
            &plan("Cruise", 1),
            &TargetResolution::PercentOfThreshold,
            &ExportOptions::default(),
            today(),
        )
        .unwrap();

        assert_eq!(event.category, "WORKOUT");
        assert_eq!(event.start_date_local, "2030-06-16T09:00:00");
        assert_eq!(event.activity_type, "Run");
        assert_eq!(event.moving_time, 27 * 60);
        assert!(event.description.starts_with("Warmup\n- 10m 69%-77% pace"));
        assert!(event
            .description
            .ends_with("\n\nStay relaxed on the recoveries."));
    }

    #[test]
    fn test_description_not_appended_when_disabled() {
        let options = ExportOptions {
            append_description: false,
        };
        let event = build_event(&plan("Cruise", 0), &TargetResolution::Symbolic, &options, today())
            .unwrap();
        assert!(event.description.ends_with("- 10m Z1"));
    }

    #[test]
    fn test_past_plan_blocked() {
        let result = build_event(
            &plan("Yesterday", -1),
            &TargetResolution::Symbolic,
            &ExportOptions::default(),
            today(),
        );
        assert!(matches!(result, Err(Error::PastDate { .. })));
    }

    #[test]
    fn test_build_events_keeps_order_and_fails_whole_batch() {
        let resolution = TargetResolution::pace(&ThresholdProfile::new(240.0, 170)).unwrap();
        let options = ExportOptions::default();

        let events = build_events(
            &[plan("Tue", 2), plan("Mon", 1)],
            &resolution,
            &options,
            today(),
        )
        .unwrap();
        let names: Vec<_> = events.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Tue", "Mon"]);

        let result = build_events(&[plan("Ok", 1), plan("Past", -3)], &resolution, &options, today());
        assert!(result.is_err());
    }

    #[test]
    fn test_payload_json_shape() {
        let events = build_events(
            &[plan("Cruise", 1)],
            &TargetResolution::Symbolic,
            &ExportOptions::default(),
            today(),
        )
        .unwrap();
        let json = to_payload_json(&events).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let event = &value[0];
        assert_eq!(event["category"], "WORKOUT");
        assert_eq!(event["type"], "Run");
        assert_eq!(event["moving_time"], 1620);
        assert_eq!(event["start_date_local"], "2030-06-16T09:00:00");
    }
}
