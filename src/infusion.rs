//! Infusion-cycle rules and countdown display formatting.

use crate::{Error, Result};

/// Number of steeping repetitions per tea.
pub const MAX_CYCLES: usize = 3;

/// Advance the infusion cycle for a fresh selection.
///
/// `same_tea` is whether the newly chosen tea matches the previous
/// selection; choosing a different tea restarts at the first cycle.
/// Repeated selection wraps back to 1 after the third cycle.
pub fn advance_cycle(previous: u8, same_tea: bool) -> u8 {
    let base = if same_tea { previous } else { 0 };
    if (base as usize) < MAX_CYCLES {
        base + 1
    } else {
        1
    }
}

/// Zero-padded `mm:ss` rendering of a second count.
pub fn format_mmss(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Parse a duration entered in the tea menu: either `mm:ss` or a bare
/// number of seconds.
pub fn parse_duration(input: &str) -> Result<u32> {
    let input = input.trim();
    let invalid = || Error::Validation(format!("invalid duration '{}' (expected mm:ss)", input));

    match input.split_once(':') {
        Some((minutes, seconds)) => {
            let minutes: u32 = minutes.parse().map_err(|_| invalid())?;
            let seconds: u32 = seconds.parse().map_err(|_| invalid())?;
            if seconds >= 60 {
                return Err(invalid());
            }
            Ok(minutes * 60 + seconds)
        }
        None => input.parse().map_err(|_| invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_wraps_after_three() {
        let mut cycle = 0;
        let starts: Vec<u8> = (0..4)
            .map(|_| {
                cycle = advance_cycle(cycle, true);
                cycle
            })
            .collect();
        assert_eq!(starts, vec![1, 2, 3, 1]);
    }

    #[test]
    fn test_different_tea_resets_cycle() {
        assert_eq!(advance_cycle(2, false), 1);
        assert_eq!(advance_cycle(3, false), 1);
    }

    #[test]
    fn test_reset_cycle_restarts_same_tea() {
        // After a manual reset the cycle is zeroed but the selection kept,
        // so the same tea starts over at cycle 1.
        assert_eq!(advance_cycle(0, true), 1);
    }

    #[test]
    fn test_format_mmss() {
        assert_eq!(format_mmss(0), "00:00");
        assert_eq!(format_mmss(125), "02:05");
        assert_eq!(format_mmss(59), "00:59");
        assert_eq!(format_mmss(3600), "60:00");
    }

    #[test]
    fn test_parse_duration_mmss() {
        assert_eq!(parse_duration("02:05").unwrap(), 125);
        assert_eq!(parse_duration("0:30").unwrap(), 30);
        assert_eq!(parse_duration(" 03:00 ").unwrap(), 180);
    }

    #[test]
    fn test_parse_duration_bare_seconds() {
        assert_eq!(parse_duration("90").unwrap(), 90);
        assert_eq!(parse_duration("0").unwrap(), 0);
    }

    #[test]
    fn test_parse_duration_rejects_invalid() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("1:60").is_err());
        assert!(parse_duration("one:30").is_err());
        assert!(parse_duration("-10").is_err());
    }

    #[test]
    fn test_parse_format_roundtrip() {
        for secs in [0, 30, 125, 240] {
            assert_eq!(parse_duration(&format_mmss(secs)).unwrap(), secs);
        }
    }
}
