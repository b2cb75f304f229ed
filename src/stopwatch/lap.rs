use serde::{Deserialize, Serialize};

/// A recorded lap. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lap {
    pub elapsed_ms: u64,
    pub label: String,
}

impl Lap {
    pub fn new(elapsed_ms: u64) -> Self {
        Self {
            elapsed_ms,
            label: format_hms(elapsed_ms),
        }
    }
}

/// Format milliseconds as "HH:MM:SS", truncated to whole seconds.
///
/// Hours are not capped; they keep growing past two digits.
pub fn format_hms(ms: u64) -> String {
    let total_secs = ms / 1000;
    let h = total_secs / 3600;
    let m = (total_secs % 3600) / 60;
    let s = total_secs % 60;
    format!("{h:02}:{m:02}:{s:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_hms() {
        assert_eq!(format_hms(0), "00:00:00");
        assert_eq!(format_hms(999), "00:00:00");
        assert_eq!(format_hms(1_500), "00:00:01");
        assert_eq!(format_hms(61_000), "00:01:01");
        assert_eq!(format_hms(3_661_000), "01:01:01");
    }

    #[test]
    fn test_format_hms_unbounded_hours() {
        assert_eq!(format_hms(360_000_000), "100:00:00");
        assert_eq!(format_hms(99 * 3_600_000 + 59 * 60_000 + 59_999), "99:59:59");
    }

    #[test]
    fn test_lap_label_matches_elapsed() {
        let lap = Lap::new(3_000);
        assert_eq!(lap.label, "00:00:03");
    }

    #[test]
    fn test_lap_wire_names() {
        let json = serde_json::to_value(Lap::new(1_000)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "elapsedMs": 1000, "label": "00:00:01" })
        );
    }
}
