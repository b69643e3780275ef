use std::fmt::Write;

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::Serialize;

use crate::error::{require_text, Result, ValidationError};

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 100.0;

/// Rounds to two decimals, ties away from zero (scores are never negative,
/// so this is the same as rounding half up).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Coarse band over the overall average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PerformanceLevel {
    Excellent,
    Good,
    Satisfactory,
    NeedsImprovement,
    Failing,
}

impl PerformanceLevel {
    pub fn from_average(average: f64) -> Self {
        match average {
            a if a >= 90.0 => PerformanceLevel::Excellent,
            a if a >= 80.0 => PerformanceLevel::Good,
            a if a >= 70.0 => PerformanceLevel::Satisfactory,
            a if a >= 60.0 => PerformanceLevel::NeedsImprovement,
            _ => PerformanceLevel::Failing,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PerformanceLevel::Excellent => "Excellent",
            PerformanceLevel::Good => "Good",
            PerformanceLevel::Satisfactory => "Satisfactory",
            PerformanceLevel::NeedsImprovement => "Needs Improvement",
            PerformanceLevel::Failing => "Failing",
        }
    }
}

/// Subject -> scores, in the order subjects were first graded.
///
/// A subject only exists while it has at least one score. Listing through
/// [`GradeLedger::subjects`] is lexicographic; [`GradeLedger::all_grades`]
/// keeps insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GradeLedger {
    grades: IndexMap<String, Vec<f64>>,
}

impl GradeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_grade(&mut self, subject: &str, score: f64) -> Result<()> {
        if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
            return Err(ValidationError::ScoreOutOfRange(score));
        }
        require_text("subject", subject)?;

        self.grades.entry(subject.to_string()).or_default().push(score);
        tracing::debug!(subject, score, "grade recorded");
        Ok(())
    }

    /// Returns false when the subject is unknown or the index is out of
    /// bounds.
    pub fn remove_grade(&mut self, subject: &str, index: usize) -> bool {
        let Some(scores) = self.grades.get_mut(subject) else {
            return false;
        };
        if index >= scores.len() {
            return false;
        }

        scores.remove(index);
        if scores.is_empty() {
            self.grades.shift_remove(subject);
        }
        tracing::debug!(subject, index, "grade removed");
        true
    }

    pub fn grades(&self, subject: &str) -> Vec<f64> {
        self.grades.get(subject).cloned().unwrap_or_default()
    }

    pub fn all_grades(&self) -> IndexMap<String, Vec<f64>> {
        self.grades.clone()
    }

    pub fn subject_average(&self, subject: &str) -> f64 {
        match self.grades.get(subject) {
            Some(scores) if !scores.is_empty() => {
                round2(scores.iter().sum::<f64>() / scores.len() as f64)
            }
            _ => 0.0,
        }
    }

    pub fn overall_average(&self) -> f64 {
        let count = self.score_count();
        if count == 0 {
            return 0.0;
        }
        round2(self.scores().sum::<f64>() / count as f64)
    }

    /// Subjects sorted lexicographically.
    pub fn subjects(&self) -> Vec<String> {
        let mut subjects: Vec<String> = self.grades.keys().cloned().collect();
        subjects.sort();
        subjects
    }

    /// Every recorded score, flattened.
    pub fn scores(&self) -> impl Iterator<Item = f64> + '_ {
        self.grades.values().flatten().copied()
    }

    pub fn score_count(&self) -> usize {
        self.grades.values().map(Vec::len).sum()
    }

    /// Number of subjects.
    pub fn len(&self) -> usize {
        self.grades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grades.is_empty()
    }

    pub fn performance_level(&self) -> PerformanceLevel {
        PerformanceLevel::from_average(self.overall_average())
    }

    pub fn grade_report(&self, name: &str, student_id: &str, enrolled_on: NaiveDate) -> String {
        if self.is_empty() {
            return format!("{name} has no grades recorded.");
        }

        let rule = "=".repeat(50);
        let mut output = String::new();
        let _ = writeln!(output, "Grade Report for {} ({})", name, student_id);
        let _ = writeln!(output, "Enrollment Date: {}", enrolled_on.format("%a %b %d %Y"));
        let _ = writeln!(output, "{rule}");

        for subject in self.subjects() {
            let scores: Vec<String> = self.grades(&subject).iter().map(f64::to_string).collect();
            let _ = writeln!(
                output,
                "{}: {} (Average: {})",
                subject,
                scores.join(", "),
                self.subject_average(&subject)
            );
        }

        let _ = writeln!(output, "{rule}");
        let _ = write!(output, "Overall Average: {}", self.overall_average());
        output
    }
}
