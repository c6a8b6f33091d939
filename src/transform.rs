//! Timestamp → chart label mapping

use chrono::{DateTime, Datelike, NaiveDateTime, Timelike};

use crate::api::ForecastError;

/// Formats Open-Meteo emits with `timezone=auto` (local time, no offset).
const LOCAL_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];
const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M%:z", "%Y-%m-%dT%H:%M:%S%:z"];
/// UTC without seconds; rfc3339 needs them.
const UTC_FORMATS: [&str; 1] = ["%Y-%m-%dT%H:%MZ"];

/// Read the calendar fields of a timestamp as written; offsets are not applied.
fn parse_timestamp(timestamp: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp) {
        return Some(dt.naive_local());
    }
    if let Some(dt) = OFFSET_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(timestamp, format).ok())
    {
        return Some(dt.naive_local());
    }
    LOCAL_FORMATS
        .iter()
        .chain(UTC_FORMATS.iter())
        .find_map(|format| NaiveDateTime::parse_from_str(timestamp, format).ok())
}

/// "2024-01-01T00:00" → "1/1 0:00"
pub fn chart_label(timestamp: &str) -> Result<String, ForecastError> {
    let dt = parse_timestamp(timestamp)
        .ok_or_else(|| ForecastError::Parse(format!("bad timestamp {timestamp:?}")))?;
    Ok(format!("{}/{} {}:00", dt.day(), dt.month(), dt.hour()))
}

/// Map every timestamp, keeping order and length.
pub fn chart_labels(timestamps: &[String]) -> Result<Vec<String>, ForecastError> {
    timestamps.iter().map(|ts| chart_label(ts)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_drops_padding() {
        assert_eq!(chart_label("2024-01-01T00:00").unwrap(), "1/1 0:00");
        assert_eq!(chart_label("2024-12-09T07:00").unwrap(), "9/12 7:00");
        assert_eq!(chart_label("2024-06-30T23:00").unwrap(), "30/6 23:00");
    }

    #[test]
    fn test_label_ignores_minutes() {
        assert_eq!(chart_label("2024-03-05T14:45:10").unwrap(), "5/3 14:00");
    }

    #[test]
    fn test_label_keeps_offset_local_fields() {
        assert_eq!(chart_label("2024-01-01T23:00+05:00").unwrap(), "1/1 23:00");
    }

    #[test]
    fn test_label_accepts_utc_suffix() {
        assert_eq!(chart_label("2024-01-01T05:00Z").unwrap(), "1/1 5:00");
        assert_eq!(chart_label("2024-01-01T05:00:00Z").unwrap(), "1/1 5:00");
    }

    #[test]
    fn test_bad_timestamp_is_parse_error() {
        let err = chart_label("yesterday").unwrap_err();
        assert!(matches!(err, ForecastError::Parse(_)));
    }

    #[test]
    fn test_labels_preserve_order_and_length() {
        let timestamps: Vec<String> = (0..24)
            .map(|h| format!("2024-01-02T{h:02}:00"))
            .collect();
        let labels = chart_labels(&timestamps).unwrap();
        assert_eq!(labels.len(), timestamps.len());
        assert_eq!(labels[0], "2/1 0:00");
        assert_eq!(labels[23], "2/1 23:00");
    }
}
