use crate::prelude::{CoreError, CoreResult};
use crate::session::GnssFix;

/// Event produced for each GNSS sentence handed to the parser.
#[derive(Debug, Clone, PartialEq)]
pub enum SentenceEvent {
    /// Date/time reference sentence; carries the composite UTC string.
    TimeReference { time_utc: String },
    /// Position fix, accepted only after a reference date is known.
    PositionFix(GnssFix),
    /// Non-empty course-over-ground field; the stored heading was updated.
    HeadingUpdated { heading_deg: f64 },
    /// Unhandled sentence type, or a fix seen before any reference date.
    Ignored,
}

/// Stateful NMEA-0183 decoder. One instance per acquisition session; the
/// reference date and heading never leak across sessions.
pub struct NmeaParser {
    reference_date: Option<String>,
    last_heading: f64,
}

impl NmeaParser {
    pub fn new() -> Self {
        Self {
            reference_date: None,
            last_heading: 0.0,
        }
    }

    /// Heading from the most recent non-empty course-over-ground field.
    pub fn last_heading(&self) -> f64 {
        self.last_heading
    }

    pub fn reference_date(&self) -> Option<&str> {
        self.reference_date.as_deref()
    }

    /// Decodes one sentence, updating parser state as a side effect.
    /// Malformed numeric fields are reported as errors the caller can log
    /// and skip; they never poison the parser state.
    pub fn parse(&mut self, sentence: &str) -> CoreResult<SentenceEvent> {
        let body = sentence.trim().split('*').next().unwrap_or("");
        let fields: Vec<&str> = body.split(',').collect();
        let address = fields[0].strip_prefix('$').unwrap_or(fields[0]);
        if address.len() < 3 || !address.is_ascii() {
            return Ok(SentenceEvent::Ignored);
        }
        // Talker prefixes vary between receivers; dispatch on the type code.
        match &address[address.len() - 3..] {
            "ZDA" => self.parse_zda(&fields),
            "GGA" => self.parse_gga(&fields),
            "RMC" => self.parse_rmc(&fields),
            _ => Ok(SentenceEvent::Ignored),
        }
    }

    fn parse_zda(&mut self, fields: &[&str]) -> CoreResult<SentenceEvent> {
        if fields.len() < 5 {
            return Err(CoreError::MalformedSentence("short ZDA sentence".into()));
        }
        let date = format!("{}-{}-{}", fields[4], fields[3], fields[2]);
        let time_utc = compose_time(&date, fields[1])?;
        self.reference_date = Some(date);
        Ok(SentenceEvent::TimeReference { time_utc })
    }

    fn parse_gga(&mut self, fields: &[&str]) -> CoreResult<SentenceEvent> {
        let Some(date) = self.reference_date.clone() else {
            return Ok(SentenceEvent::Ignored);
        };
        if fields.len() < 6 {
            return Err(CoreError::MalformedSentence("short GGA sentence".into()));
        }
        let time_utc = compose_time(&date, fields[1])?;
        let latitude = decode_angle(fields[2], 2, fields[3] == "S")?;
        let longitude = decode_angle(fields[4], 3, fields[5] == "W")?;
        Ok(SentenceEvent::PositionFix(GnssFix {
            time_utc,
            latitude,
            longitude,
        }))
    }

    fn parse_rmc(&mut self, fields: &[&str]) -> CoreResult<SentenceEvent> {
        if fields.len() > 8 && !fields[8].is_empty() {
            let heading_deg = fields[8].parse::<f64>().map_err(|_| {
                CoreError::MalformedSentence(format!("course field {:?}", fields[8]))
            })?;
            self.last_heading = heading_deg;
            return Ok(SentenceEvent::HeadingUpdated { heading_deg });
        }
        Ok(SentenceEvent::Ignored)
    }
}

impl Default for NmeaParser {
    fn default() -> Self {
        Self::new()
    }
}

/// `"hhmmss[.sss]"` plus a reference date into `"date_hh:mm:ss[.sss]"`.
fn compose_time(date: &str, raw: &str) -> CoreResult<String> {
    if raw.len() < 5 || !raw.is_ascii() {
        return Err(CoreError::MalformedSentence(format!("time field {:?}", raw)));
    }
    Ok(format!("{}_{}:{}:{}", date, &raw[..2], &raw[2..4], &raw[4..]))
}

/// Degree/decimal-minute field (`ddmm.mmm` or `dddmm.mmm`) into signed
/// decimal degrees.
fn decode_angle(raw: &str, degree_digits: usize, negate: bool) -> CoreResult<f64> {
    if raw.len() <= degree_digits || !raw.is_ascii() {
        return Err(CoreError::MalformedSentence(format!("angle field {:?}", raw)));
    }
    let whole = raw[..degree_digits]
        .parse::<f64>()
        .map_err(|_| CoreError::MalformedSentence(format!("angle field {:?}", raw)))?;
    let minutes = raw[degree_digits..]
        .parse::<f64>()
        .map_err(|_| CoreError::MalformedSentence(format!("angle field {:?}", raw)))?;
    let value = whole + minutes / 60.0;
    Ok(if negate { -value } else { value })
}
