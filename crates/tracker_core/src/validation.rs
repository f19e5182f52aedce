//! crates/tracker_core/src/validation.rs
//!
//! Client-side validation. A failure here blocks the request entirely; nothing
//! is sent to the backend.

use crate::domain::{Mode, NewTopic, SoloMetric};

/// Which self-reported percentage a message refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricField {
    Covered,
    Remembered,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Add at least one bullet point")]
    NoPoints,
    #[error("Coverage must be between 0 and 100")]
    CoveredOutOfRange,
    #[error("Remembered must be between 0 and 100")]
    RememberedOutOfRange,
    #[error("Title is required")]
    BlankTitle,
}

impl MetricField {
    fn out_of_range(self) -> ValidationError {
        match self {
            MetricField::Covered => ValidationError::CoveredOutOfRange,
            MetricField::Remembered => ValidationError::RememberedOutOfRange,
        }
    }
}

/// Parses a percentage typed by the user. Anything that is not a finite
/// number in the closed range 0..=100 is rejected for `field`.
pub fn parse_percent(field: MetricField, input: &str) -> Result<f64, ValidationError> {
    let value = input
        .trim()
        .parse::<f64>()
        .map_err(|_| field.out_of_range())?;
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err(field.out_of_range());
    }
    Ok(value)
}

/// Validates both solo fields, coverage first.
pub fn validate_solo(covered: &str, remembered: &str) -> Result<SoloMetric, ValidationError> {
    let covered = parse_percent(MetricField::Covered, covered)?;
    let remembered = parse_percent(MetricField::Remembered, remembered)?;
    Ok(SoloMetric::new(covered, remembered))
}

/// Builds the create-topic payload, trimming the title.
pub fn validate_new_topic(
    title: &str,
    description: &str,
    mode: Mode,
) -> Result<NewTopic, ValidationError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ValidationError::BlankTitle);
    }
    Ok(NewTopic {
        title: title.to_string(),
        description: description.trim().to_string(),
        mode,
    })
}
