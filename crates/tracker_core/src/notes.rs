//! crates/tracker_core/src/notes.rs
//!
//! The bullet points a user collects before submitting an automated session.

use crate::validation::ValidationError;

/// An ordered list of bullet points. Points are only appended or removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteSubmission {
    points: Vec<String>,
}

impl NoteSubmission {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a trimmed point. Blank input is ignored; returns whether a point was added.
    pub fn add(&mut self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        self.points.push(text.to_string());
        true
    }

    /// Removes the point at `index`, if there is one.
    pub fn remove(&mut self, index: usize) -> Option<String> {
        if index < self.points.len() {
            Some(self.points.remove(index))
        } else {
            None
        }
    }

    pub fn points(&self) -> &[String] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn can_submit(&self) -> bool {
        !self.is_empty()
    }

    /// The points to send, or `NoPoints` when there are none.
    pub fn ready(&self) -> Result<&[String], ValidationError> {
        if self.points.is_empty() {
            Err(ValidationError::NoPoints)
        } else {
            Ok(&self.points)
        }
    }
}
