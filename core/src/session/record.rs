use crate::prelude::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};

/// Number of virtual ranging positions across the swath.
pub const ARRAY_COUNT: usize = 7;

/// Accepted position fix with its composite UTC timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GnssFix {
    pub time_utc: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// One complete line from the ranging channel, in centimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangingSample {
    pub distances_cm: [f64; ARRAY_COUNT],
}

impl RangingSample {
    /// Parses a comma-delimited line of exactly seven distance readings.
    pub fn parse_line(line: &str) -> CoreResult<Self> {
        let mut distances_cm = [0.0; ARRAY_COUNT];
        let mut count = 0;
        for part in line.trim().split(',') {
            if count == ARRAY_COUNT {
                return Err(CoreError::MalformedRanging(format!(
                    "more than {} values",
                    ARRAY_COUNT
                )));
            }
            distances_cm[count] = part
                .trim()
                .parse::<f64>()
                .map_err(|_| CoreError::MalformedRanging(format!("value {:?}", part)))?;
            count += 1;
        }
        if count != ARRAY_COUNT {
            return Err(CoreError::MalformedRanging(format!(
                "expected {} values, got {}",
                ARRAY_COUNT, count
            )));
        }
        Ok(Self { distances_cm })
    }
}

/// Fused, persisted unit of the session log. Written once per accepted
/// fix and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub time_utc: String,
    pub latitude: f64,
    pub longitude: f64,
    pub heading_deg: f64,
    pub distances_cm: [f64; ARRAY_COUNT],
}

impl SessionRecord {
    /// Encodes the record as one comma-delimited log row:
    /// `time, lat, lon, heading, d1..d7`.
    pub fn encode_row(&self) -> String {
        let mut row = format!(
            "{}, {}, {}, {}",
            self.time_utc, self.latitude, self.longitude, self.heading_deg
        );
        for distance in &self.distances_cm {
            row.push_str(&format!(", {}", distance));
        }
        row
    }

    /// Decodes one log row; `line` is the 1-based row number used for
    /// error reporting.
    pub fn decode_row(row: &str, line: usize) -> CoreResult<Self> {
        let fields: Vec<&str> = row.trim().split(',').map(str::trim).collect();
        if fields.len() != 4 + ARRAY_COUNT {
            return Err(CoreError::CorruptLogRow {
                line,
                reason: format!("expected {} fields, got {}", 4 + ARRAY_COUNT, fields.len()),
            });
        }
        let number = |field: &str| -> CoreResult<f64> {
            field.parse::<f64>().map_err(|_| CoreError::CorruptLogRow {
                line,
                reason: format!("numeric field {:?}", field),
            })
        };
        let mut distances_cm = [0.0; ARRAY_COUNT];
        for (slot, &field) in distances_cm.iter_mut().zip(fields[4..].iter()) {
            *slot = number(field)?;
        }
        Ok(Self {
            time_utc: fields[0].to_string(),
            latitude: number(fields[1])?,
            longitude: number(fields[2])?,
            heading_deg: number(fields[3])?,
            distances_cm,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranging_line_parses_seven_values() {
        let sample = RangingSample::parse_line("10.0, 11.5, 12.0, 13.0, 14.0, 15.0, 16.0").unwrap();
        assert_eq!(sample.distances_cm[0], 10.0);
        assert_eq!(sample.distances_cm[6], 16.0);
    }

    #[test]
    fn ranging_line_rejects_wrong_counts() {
        assert!(RangingSample::parse_line("1.0, 2.0, 3.0").is_err());
        assert!(RangingSample::parse_line("1, 2, 3, 4, 5, 6, 7, 8").is_err());
        assert!(RangingSample::parse_line("1, 2, 3, 4, 5, six, 7").is_err());
    }

    #[test]
    fn record_row_round_trips() {
        let record = SessionRecord {
            time_utc: "2024-06-15_12:00:01".to_string(),
            latitude: 48.1173,
            longitude: 11.5167,
            heading_deg: 90.0,
            distances_cm: [10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0],
        };
        let decoded = SessionRecord::decode_row(&record.encode_row(), 1).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn corrupt_row_reports_line_number() {
        let result = SessionRecord::decode_row("only, four, fields, here", 3);
        match result {
            Err(CoreError::CorruptLogRow { line, .. }) => assert_eq!(line, 3),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn record_serializes_to_json() {
        let record = SessionRecord {
            time_utc: "2024-06-15_12:00:01".to_string(),
            latitude: -33.9,
            longitude: 18.4,
            heading_deg: 45.0,
            distances_cm: [5.0; ARRAY_COUNT],
        };
        let encoded = serde_json::to_string(&record).unwrap();
        let decoded: SessionRecord = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, record);
    }
}
