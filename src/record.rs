use indexmap::IndexMap;
use serde::Serialize;

use crate::error::{require_text, Result};
use crate::ledger::{round2, GradeLedger};
use crate::scale::GradeScale;

pub const DEFAULT_CREDITS: u32 = 3;
const UNASSIGNED: &str = "TBD";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Course {
    pub id: String,
    pub name: String,
    credits: u32,
    pub instructor: String,
    pub schedule: String,
}

impl Course {
    pub fn new(id: &str, name: &str) -> Self {
        Course {
            id: id.to_string(),
            name: name.to_string(),
            credits: DEFAULT_CREDITS,
            instructor: UNASSIGNED.to_string(),
            schedule: UNASSIGNED.to_string(),
        }
    }

    pub fn credits(&self) -> u32 {
        self.credits
    }

    /// Zero is treated as "not given" and falls back to the default weight.
    pub fn with_credits(mut self, credits: u32) -> Self {
        self.credits = if credits == 0 { DEFAULT_CREDITS } else { credits };
        self
    }

    pub fn with_instructor(mut self, instructor: &str) -> Self {
        self.instructor = instructor.to_string();
        self
    }

    pub fn with_schedule(mut self, schedule: &str) -> Self {
        self.schedule = schedule.to_string();
        self
    }
}

/// One ledger plus the current enrollment. Grades and courses are not
/// linked: GPA averages every recorded score, credits sum enrolled courses.
#[derive(Debug, Clone, Default)]
pub struct AcademicRecord {
    ledger: GradeLedger,
    courses: IndexMap<String, Course>,
    scale: GradeScale,
}

impl AcademicRecord {
    pub fn new(scale: GradeScale) -> Self {
        AcademicRecord {
            ledger: GradeLedger::new(),
            courses: IndexMap::new(),
            scale,
        }
    }

    pub fn scale(&self) -> GradeScale {
        self.scale
    }

    pub fn ledger(&self) -> &GradeLedger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut GradeLedger {
        &mut self.ledger
    }

    pub fn add_grade(&mut self, subject: &str, score: f64) -> Result<()> {
        self.ledger.add_grade(subject, score)
    }

    /// Returns `Ok(false)` if the course id is already enrolled.
    pub fn enroll(&mut self, course: Course) -> Result<bool> {
        require_text("course id", &course.id)?;
        if self.courses.contains_key(&course.id) {
            return Ok(false);
        }

        tracing::info!(course_id = %course.id, credits = course.credits(), "enrolled");
        self.courses.insert(course.id.clone(), course);
        Ok(true)
    }

    pub fn drop_course(&mut self, course_id: &str) -> bool {
        let removed = self.courses.shift_remove(course_id).is_some();
        if removed {
            tracing::info!(course_id, "dropped");
        }
        removed
    }

    pub fn course(&self, course_id: &str) -> Option<&Course> {
        self.courses.get(course_id)
    }

    /// Enrolled courses in enrollment order.
    pub fn courses(&self) -> Vec<Course> {
        self.courses.values().cloned().collect()
    }

    pub fn total_credits(&self) -> u32 {
        self.courses.values().map(Course::credits).sum()
    }

    /// Mean grade points over every recorded score.
    pub fn gpa(&self) -> f64 {
        let count = self.ledger.score_count();
        if count == 0 {
            return 0.0;
        }
        let points: f64 = self.ledger.scores().map(|score| self.scale.points(score)).sum();
        round2(points / count as f64)
    }
}
