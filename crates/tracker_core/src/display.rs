//! crates/tracker_core/src/display.rs
//!
//! Display shapes for the numbers the backend computes. The client never
//! recomputes scores; it only formats them.

use crate::domain::{ComparisonResult, SoloMetric, TrendSnapshot};

/// Formats a value already expressed in percent with one decimal, e.g. `85.5%`.
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Formats a 0..=1 fraction as a percentage with one decimal, e.g. `0.3` -> `30.0%`.
pub fn format_fraction(fraction: f64) -> String {
    format_percent(fraction * 100.0)
}

//=========================================================================================
// Comparison Results
//=========================================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct MissedPointLine {
    pub text: String,
    pub similarity: String,
}

/// A comparison result ready to print.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonDisplay {
    pub recall_score: String,
    /// `None` when nothing was missed: the section is not shown at all.
    pub missed: Option<Vec<MissedPointLine>>,
}

impl ComparisonDisplay {
    pub fn from_result(result: &ComparisonResult) -> Self {
        let missed = if result.missed_points.is_empty() {
            None
        } else {
            Some(
                result
                    .missed_points
                    .iter()
                    .map(|m| MissedPointLine {
                        text: m.text.clone(),
                        similarity: format_fraction(m.similarity),
                    })
                    .collect(),
            )
        };
        Self {
            recall_score: format_percent(result.recall_score),
            missed,
        }
    }

    /// Heading of the missed-points section, e.g. `Missed Points (2)`.
    pub fn missed_heading(&self) -> Option<String> {
        self.missed
            .as_ref()
            .map(|lines| format!("Missed Points ({})", lines.len()))
    }
}

//=========================================================================================
// Solo Trend
//=========================================================================================

/// One point on the trend chart. `index` is the ordinal position, starting at 1.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub index: usize,
    pub coverage: f64,
    pub remembered: f64,
}

/// Solo metrics in chronological order, labelled by position only.
///
/// Rows are not guaranteed to carry a day index or date, so the x-axis is
/// purely ordinal.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendChart {
    pub points: Vec<ChartPoint>,
    pub suggestion: String,
}

impl TrendChart {
    pub const X_LABEL: &'static str = "Session";

    /// Reverses the backend's most-recent-first rows before numbering them.
    pub fn from_snapshot(snapshot: &TrendSnapshot) -> Self {
        let points = snapshot
            .metrics
            .iter()
            .rev()
            .enumerate()
            .map(|(i, m): (usize, &SoloMetric)| ChartPoint {
                index: i + 1,
                coverage: m.percent_covered,
                remembered: m.percent_remembered,
            })
            .collect();
        Self {
            points,
            suggestion: snapshot.suggestion.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
