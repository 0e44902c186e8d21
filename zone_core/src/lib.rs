#![forbid(unsafe_code)]

//! Training zone and workout structuring engine.
//!
//! This crate provides:
//! - Pace and heart-rate zone tables derived from athlete thresholds
//! - Resolution of symbolic `(zone, position)` targets to concrete values
//! - Rendering of ordered workout blocks into calendar builder text
//! - A temporal safeguard gating every calendar write
//! - Inbound plan validation and outbound calendar events

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod format;
pub mod zones;
pub mod resolve;
pub mod builder;
pub mod safeguard;
pub mod schema;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use format::{format_pace, parse_pace};
pub use zones::{compute_hr_zones, compute_pace_zones, pace_zone_percent};
pub use resolve::{resolve_target, ResolvedTarget, TargetResolution, TargetStyle};
pub use builder::{render, sections, Section};
pub use safeguard::{authorize_delete, authorize_push, is_allowed_date, local_today};
pub use schema::{parse_plan, PlanDefaults};
pub use export::{build_event, build_events, CalendarEvent, ExportOptions};
