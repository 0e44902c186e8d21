//! Pace and duration formatting shared by the zone engine.

use crate::{Error, Result};

/// Format seconds per kilometre as `m:ss`.
///
/// Rounds to the nearest whole second before splitting, so 239.7 becomes
/// "4:00" rather than "3:60". Negative input formats as "0:00" and
/// non-finite input as "--:--".
pub fn format_pace(seconds: f64) -> String {
    if !seconds.is_finite() {
        return "--:--".to_string();
    }
    let total = seconds.max(0.0).round() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Parse a pace such as `4:06`, `4:06/km` or a bare seconds value `246`.
pub fn parse_pace(input: &str) -> Result<f64> {
    let trimmed = input.trim();
    let value = trimmed.strip_suffix("/km").unwrap_or(trimmed).trim();

    let seconds = match value.split_once(':') {
        Some((mins, secs)) => {
            let mins: u32 = mins
                .trim()
                .parse()
                .map_err(|_| invalid_pace(input))?;
            let secs: u32 = secs
                .trim()
                .parse()
                .map_err(|_| invalid_pace(input))?;
            if secs >= 60 {
                return Err(invalid_pace(input));
            }
            f64::from(mins) * 60.0 + f64::from(secs)
        }
        None => value.parse::<f64>().map_err(|_| invalid_pace(input))?,
    };

    if !seconds.is_finite() || seconds <= 0.0 {
        return Err(invalid_pace(input));
    }
    Ok(seconds)
}

fn invalid_pace(input: &str) -> Error {
    Error::InvalidThreshold(format!("cannot parse pace {:?}", input))
}

/// Whole seconds a block lasts, as written into builder text
pub fn duration_seconds(minutes: f64) -> u64 {
    (minutes * 60.0).round().max(0.0) as u64
}

/// Reject durations that would render as an empty step
pub(crate) fn check_duration(index: usize, minutes: f64) -> Result<()> {
    if !minutes.is_finite() || minutes <= 0.0 {
        return Err(Error::Schema(format!(
            "block {} has non-positive duration {}",
            index, minutes
        )));
    }
    if duration_seconds(minutes) == 0 {
        return Err(Error::Schema(format!(
            "block {} lasts under one second ({} min)",
            index, minutes
        )));
    }
    Ok(())
}

/// Format a block duration in builder syntax.
///
/// Whole minutes render as `10m`; anything else as whole seconds (`90s`).
pub fn format_duration(minutes: f64) -> String {
    if (minutes - minutes.round()).abs() < 1e-9 {
        format!("{}m", minutes.round() as u64)
    } else {
        format!("{}s", duration_seconds(minutes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_pace() {
        assert_eq!(format_pace(240.0), "4:00");
        assert_eq!(format_pace(246.0), "4:06");
        assert_eq!(format_pace(307.5), "5:08");
        assert_eq!(format_pace(59.4), "0:59");
    }

    #[test]
    fn test_format_pace_carries_rounded_minute() {
        assert_eq!(format_pace(239.7), "4:00");
        assert_eq!(format_pace(359.5), "6:00");
    }

    #[test]
    fn test_format_pace_degenerate_input() {
        assert_eq!(format_pace(-3.0), "0:00");
        assert_eq!(format_pace(f64::NAN), "--:--");
    }

    #[test]
    fn test_parse_pace() {
        assert_eq!(parse_pace("4:06").unwrap(), 246.0);
        assert_eq!(parse_pace(" 5:00/km ").unwrap(), 300.0);
        assert_eq!(parse_pace("252").unwrap(), 252.0);
    }

    #[test]
    fn test_parse_pace_rejects_garbage() {
        for bad in ["", "4:60", "abc", "0:00", "-240", "4:xx"] {
            assert!(
                matches!(parse_pace(bad), Err(Error::InvalidThreshold(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(10.0), "10m");
        assert_eq!(format_duration(1.5), "90s");
        assert_eq!(format_duration(0.25), "15s");
    }

    #[test]
    fn test_sub_second_duration_rejected() {
        assert_eq!(duration_seconds(0.004), 0);
        assert!(matches!(check_duration(3, 0.004), Err(Error::Schema(msg)) if msg.contains("block 3")));
        assert!(check_duration(0, 0.01).is_ok());
        assert!(check_duration(0, 0.0).is_err());
        assert!(check_duration(0, f64::NAN).is_err());
    }
}
