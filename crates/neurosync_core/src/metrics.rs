//! Check-in metrics: the editable wellness record behind the check-in form.
//!
//! Edits are typed but not range-checked; range policy is applied once, when a
//! snapshot is taken for submission. Out-of-range values are rejected, never clamped.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Lower bound of the 1-10 self-rating scales (mood, stress, diet quality).
pub const SCALE_MIN: u8 = 1;
/// Upper bound of the 1-10 self-rating scales.
pub const SCALE_MAX: u8 = 10;
/// Sleep longer than a full day is not a plausible nightly figure.
pub const MAX_SLEEP_HOURS: f64 = 24.0;

// ============================================================================
// Fields
// ============================================================================

/// One editable field of a check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricField {
    Mood,
    Stress,
    SleepHours,
    ActivityMinutes,
    DietQuality,
    JournalEntry,
    Hrv,
}

impl MetricField {
    pub const ALL: [MetricField; 7] = [
        MetricField::Mood,
        MetricField::Stress,
        MetricField::SleepHours,
        MetricField::ActivityMinutes,
        MetricField::DietQuality,
        MetricField::JournalEntry,
        MetricField::Hrv,
    ];

    /// Name used in the serialized payload.
    pub fn wire_name(self) -> &'static str {
        match self {
            MetricField::Mood => "mood",
            MetricField::Stress => "stress",
            MetricField::SleepHours => "sleepHours",
            MetricField::ActivityMinutes => "activityMinutes",
            MetricField::DietQuality => "dietQuality",
            MetricField::JournalEntry => "journalEntry",
            MetricField::Hrv => "hrv",
        }
    }

    pub fn is_numeric(self) -> bool {
        !matches!(self, MetricField::JournalEntry)
    }
}

impl fmt::Display for MetricField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for MetricField {
    type Err = EditError;

    /// Accepts both the wire name (`sleepHours`) and snake_case (`sleep_hours`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();
        MetricField::ALL
            .into_iter()
            .find(|field| field.wire_name().to_lowercase() == normalized)
            .ok_or_else(|| EditError::UnknownField(s.to_string()))
    }
}

// ============================================================================
// Errors
// ============================================================================

/// A single field edit that could not be stored. The field keeps its previous value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditError {
    #[error("unknown check-in field '{0}'")]
    UnknownField(String),
    #[error("{field} expects {expected}, got '{input}'")]
    NotNumeric {
        field: MetricField,
        input: String,
        expected: &'static str,
    },
}

/// A snapshot that cannot be submitted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MetricsError {
    #[error("{field} = {value} is outside {bounds}")]
    OutOfRange {
        field: MetricField,
        value: f64,
        bounds: &'static str,
    },
}

// ============================================================================
// CheckInMetrics
// ============================================================================

/// One self-reported wellness check-in.
///
/// Serializes with the camelCase names the insight prompt embeds, in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInMetrics {
    /// 1-10
    pub mood: u8,
    /// 1-10
    pub stress: u8,
    pub sleep_hours: f64,
    pub activity_minutes: u32,
    /// 1-10
    pub diet_quality: u8,
    pub journal_entry: String,
    /// Heart rate variability in milliseconds.
    pub hrv: f64,
}

impl Default for CheckInMetrics {
    fn default() -> Self {
        Self {
            mood: 7,
            stress: 4,
            sleep_hours: 7.5,
            activity_minutes: 45,
            diet_quality: 8,
            journal_entry: String::new(),
            hrv: 55.0,
        }
    }
}

impl CheckInMetrics {
    pub fn set_mood(&mut self, mood: u8) {
        self.mood = mood;
    }

    pub fn set_stress(&mut self, stress: u8) {
        self.stress = stress;
    }

    pub fn set_sleep_hours(&mut self, hours: f64) {
        self.sleep_hours = hours;
    }

    pub fn set_activity_minutes(&mut self, minutes: u32) {
        self.activity_minutes = minutes;
    }

    pub fn set_diet_quality(&mut self, quality: u8) {
        self.diet_quality = quality;
    }

    pub fn set_journal_entry(&mut self, entry: impl Into<String>) {
        self.journal_entry = entry.into();
    }

    pub fn set_hrv(&mut self, hrv: f64) {
        self.hrv = hrv;
    }

    /// Apply raw text from a form field.
    ///
    /// Numeric fields only accept text that parses to their type; anything else is
    /// rejected and the field keeps its previous value. The journal takes any text.
    pub fn apply_edit(&mut self, field: MetricField, raw: &str) -> Result<(), EditError> {
        match field {
            MetricField::Mood => self.mood = parse_scale(field, raw)?,
            MetricField::Stress => self.stress = parse_scale(field, raw)?,
            MetricField::SleepHours => self.sleep_hours = parse_real(field, raw)?,
            MetricField::ActivityMinutes => {
                self.activity_minutes = raw.trim().parse().map_err(|_| EditError::NotNumeric {
                    field,
                    input: raw.to_string(),
                    expected: "a whole number of minutes",
                })?
            }
            MetricField::DietQuality => self.diet_quality = parse_scale(field, raw)?,
            MetricField::JournalEntry => self.journal_entry = raw.to_string(),
            MetricField::Hrv => self.hrv = parse_real(field, raw)?,
        }
        Ok(())
    }

    /// Check every numeric field against its submission bounds.
    /// Reports the first violation in field order.
    pub fn validate(&self) -> Result<(), MetricsError> {
        check_scale(MetricField::Mood, self.mood)?;
        check_scale(MetricField::Stress, self.stress)?;
        if !(self.sleep_hours.is_finite() && (0.0..=MAX_SLEEP_HOURS).contains(&self.sleep_hours)) {
            return Err(MetricsError::OutOfRange {
                field: MetricField::SleepHours,
                value: self.sleep_hours,
                bounds: "0..=24 hours",
            });
        }
        check_scale(MetricField::DietQuality, self.diet_quality)?;
        if !(self.hrv.is_finite() && self.hrv >= 0.0) {
            return Err(MetricsError::OutOfRange {
                field: MetricField::Hrv,
                value: self.hrv,
                bounds: ">= 0 ms",
            });
        }
        Ok(())
    }

    /// Validated, owned copy taken at submission time.
    pub fn snapshot(&self) -> Result<CheckInMetrics, MetricsError> {
        self.validate()?;
        Ok(self.clone())
    }
}

fn parse_scale(field: MetricField, raw: &str) -> Result<u8, EditError> {
    raw.trim().parse().map_err(|_| EditError::NotNumeric {
        field,
        input: raw.to_string(),
        expected: "a whole number",
    })
}

fn parse_real(field: MetricField, raw: &str) -> Result<f64, EditError> {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(EditError::NotNumeric {
            field,
            input: raw.to_string(),
            expected: "a finite number",
        }),
    }
}

fn check_scale(field: MetricField, value: u8) -> Result<(), MetricsError> {
    if (SCALE_MIN..=SCALE_MAX).contains(&value) {
        Ok(())
    } else {
        Err(MetricsError::OutOfRange {
            field,
            value: f64::from(value),
            bounds: "1..=10",
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let m = CheckInMetrics::default();
        assert_eq!(m.mood, 7);
        assert_eq!(m.stress, 4);
        assert_eq!(m.sleep_hours, 7.5);
        assert_eq!(m.activity_minutes, 45);
        assert_eq!(m.diet_quality, 8);
        assert_eq!(m.hrv, 55.0);
        assert!(m.journal_entry.is_empty());
        assert!(m.validate().is_ok());
    }

    #[test]
    fn test_serializes_camel_case_in_order() {
        let json = serde_json::to_string(&CheckInMetrics::default()).unwrap();
        assert_eq!(
            json,
            r#"{"mood":7,"stress":4,"sleepHours":7.5,"activityMinutes":45,"dietQuality":8,"journalEntry":"","hrv":55.0}"#
        );
    }

    #[test]
    fn test_apply_edit_numeric() {
        let mut m = CheckInMetrics::default();
        m.apply_edit(MetricField::Mood, " 9 ").unwrap();
        m.apply_edit(MetricField::SleepHours, "6.25").unwrap();
        m.apply_edit(MetricField::ActivityMinutes, "120").unwrap();
        assert_eq!(m.mood, 9);
        assert_eq!(m.sleep_hours, 6.25);
        assert_eq!(m.activity_minutes, 120);
    }

    #[test]
    fn test_non_numeric_edit_keeps_previous_value() {
        let mut m = CheckInMetrics::default();
        let err = m.apply_edit(MetricField::Stress, "very").unwrap_err();
        assert!(matches!(err, EditError::NotNumeric { field: MetricField::Stress, .. }));
        assert_eq!(m.stress, 4);

        assert!(m.apply_edit(MetricField::Hrv, "NaN").is_err());
        assert!(m.apply_edit(MetricField::Hrv, "inf").is_err());
        assert_eq!(m.hrv, 55.0);

        assert!(m.apply_edit(MetricField::ActivityMinutes, "-5").is_err());
        assert_eq!(m.activity_minutes, 45);
    }

    #[test]
    fn test_journal_accepts_any_text() {
        let mut m = CheckInMetrics::default();
        m.apply_edit(MetricField::JournalEntry, "  slept badly, 3 coffees ").unwrap();
        assert_eq!(m.journal_entry, "  slept badly, 3 coffees ");
        m.set_journal_entry("");
        assert!(m.validate().is_ok());
    }

    #[test]
    fn test_out_of_range_is_stored_but_rejected_at_snapshot() {
        let mut m = CheckInMetrics::default();
        m.apply_edit(MetricField::Mood, "15").unwrap();
        assert_eq!(m.mood, 15);
        match m.snapshot() {
            Err(MetricsError::OutOfRange { field, value, .. }) => {
                assert_eq!(field, MetricField::Mood);
                assert_eq!(value, 15.0);
            }
            other => panic!("Expected OutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_bounds() {
        let mut m = CheckInMetrics::default();
        m.set_sleep_hours(24.0);
        m.set_hrv(0.0);
        m.set_activity_minutes(0);
        assert!(m.validate().is_ok());

        m.set_sleep_hours(24.5);
        assert!(m.validate().is_err());
        m.set_sleep_hours(8.0);

        m.set_hrv(-1.0);
        assert!(m.validate().is_err());
        m.set_hrv(40.0);

        m.set_diet_quality(0);
        assert!(m.validate().is_err());
    }

    #[test]
    fn test_field_names_parse() {
        assert_eq!("sleepHours".parse::<MetricField>().unwrap(), MetricField::SleepHours);
        assert_eq!("sleep_hours".parse::<MetricField>().unwrap(), MetricField::SleepHours);
        assert_eq!("HRV".parse::<MetricField>().unwrap(), MetricField::Hrv);
        assert_eq!("journal-entry".parse::<MetricField>().unwrap(), MetricField::JournalEntry);
        assert!("weight".parse::<MetricField>().is_err());
    }
}
