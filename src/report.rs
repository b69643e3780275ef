use std::fmt::Write;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use uuid::Uuid;

use crate::models::Standing;
use crate::record::{AcademicRecord, Course};
use crate::student::Enrolled;

/// Credits below which a summary recommends a heavier load.
pub const ON_TRACK_CREDITS: u32 = 30;
pub const LIGHT_LOAD_ADVICE: &str = "Increase course load to stay on track";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentInfo {
    pub person_id: u64,
    pub student_id: String,
    pub name: String,
    pub email: String,
    pub major: String,
    pub role: String,
    /// Year of study, undergraduates only.
    pub year: Option<u8>,
}

/// Point-in-time copy of a student's record. Owns all of its data.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub report_id: Uuid,
    pub student: StudentInfo,
    pub courses: Vec<Course>,
    pub grades: IndexMap<String, Vec<f64>>,
    pub gpa: f64,
    pub total_credits: u32,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceSummary {
    pub gpa: f64,
    pub credits: u32,
    pub standing: Standing,
    pub recommendations: Vec<String>,
}

pub fn generate_report<S: Enrolled + ?Sized>(subject: &S) -> Report {
    let student = subject.student();
    let record = student.record();

    let report = Report {
        report_id: Uuid::new_v4(),
        student: StudentInfo {
            person_id: student.person().id(),
            student_id: student.student_id().to_string(),
            name: student.name().to_string(),
            email: student.person().email().to_string(),
            major: student.major().to_string(),
            role: subject.role(),
            year: subject.year_of_study(),
        },
        courses: record.courses(),
        grades: record.ledger().all_grades(),
        gpa: record.gpa(),
        total_credits: record.total_credits(),
        generated_at: Utc::now(),
    };

    tracing::info!(
        report_id = %report.report_id,
        student_id = %report.student.student_id,
        gpa = report.gpa,
        "report generated"
    );
    report
}

pub fn performance_summary(record: &AcademicRecord) -> PerformanceSummary {
    let gpa = record.gpa();
    let credits = record.total_credits();
    let standing = Standing::from_gpa(gpa);

    let mut recommendations = vec![standing.advice().to_string()];
    if credits < ON_TRACK_CREDITS {
        recommendations.push(LIGHT_LOAD_ADVICE.to_string());
    }

    PerformanceSummary {
        gpa,
        credits,
        standing,
        recommendations,
    }
}

pub fn render_markdown(report: &Report, summary: &PerformanceSummary) -> String {
    let mut output = String::new();
    let info = &report.student;

    let _ = writeln!(output, "# Academic Report: {}", info.name);
    let _ = writeln!(
        output,
        "{} (ID: {}), {}, {}",
        info.role, info.student_id, info.major, info.email
    );
    let _ = writeln!(output, "Generated at {}", report.generated_at.to_rfc3339());
    let _ = writeln!(output);
    let _ = writeln!(output, "## Enrolled Courses");

    if report.courses.is_empty() {
        let _ = writeln!(output, "No courses enrolled.");
    } else {
        for course in report.courses.iter() {
            let _ = writeln!(
                output,
                "- {} {} ({} credits, {}, {})",
                course.id, course.name, course.credits(), course.instructor, course.schedule
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Grades");

    if report.grades.is_empty() {
        let _ = writeln!(output, "No grades recorded.");
    } else {
        let mut subjects: Vec<&String> = report.grades.keys().collect();
        subjects.sort();
        for subject in subjects {
            let scores: Vec<String> = report.grades[subject].iter().map(f64::to_string).collect();
            let _ = writeln!(output, "- {}: {}", subject, scores.join(", "));
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Standing");
    let _ = writeln!(
        output,
        "GPA {:.2} across {} credits: {}",
        summary.gpa,
        summary.credits,
        summary.standing.as_str()
    );
    for recommendation in summary.recommendations.iter() {
        let _ = writeln!(output, "- {}", recommendation);
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::person::IdSequence;
    use crate::scale::GradeScale;
    use crate::student::{Profile, Student, UndergraduateStudent};

    fn sarah(ids: &IdSequence) -> Student {
        let profile = Profile::new(
            "Sarah Connor",
            22,
            "sarah@university.edu",
            "STU006",
            "Computer Science",
        );
        let mut student = Student::new(ids, &profile).unwrap();
        student.add_grade("Mathematics", 92.0).unwrap();
        student.add_grade("Physics", 88.0).unwrap();
        student.add_grade("Chemistry", 95.0).unwrap();
        student.enroll(Course::new("CS101", "Introduction to Programming")).unwrap();
        student.enroll(Course::new("MATH201", "Calculus II")).unwrap();
        student.enroll(Course::new("PHYS101", "General Physics")).unwrap();
        student
    }

    #[test]
    fn summary_for_good_standing_with_light_load() {
        let ids = IdSequence::new();
        let student = sarah(&ids);
        let summary = performance_summary(student.record());

        assert_eq!(summary.gpa, 3.33);
        assert_eq!(summary.credits, 9);
        assert_eq!(summary.standing, Standing::Good);
        assert_eq!(
            summary.recommendations,
            vec!["Maintain current performance", LIGHT_LOAD_ADVICE]
        );
    }

    #[test]
    fn full_load_drops_course_load_advice() {
        let mut record = AcademicRecord::new(GradeScale::Standard);
        record.add_grade("Mathematics", 99.0).unwrap();
        for n in 0..10 {
            record.enroll(Course::new(&format!("C{n}"), "Course")).unwrap();
        }
        let summary = performance_summary(&record);
        assert_eq!(summary.credits, 30);
        assert_eq!(summary.standing, Standing::Excellent);
        assert_eq!(summary.recommendations, vec!["Consider honors program"]);
    }

    #[test]
    fn empty_record_is_suspended() {
        let summary = performance_summary(&AcademicRecord::default());
        assert_eq!(summary.standing, Standing::Suspended);
        assert_eq!(summary.recommendations.len(), 2);
    }

    #[test]
    fn report_is_detached_from_live_record() {
        let ids = IdSequence::new();
        let mut student = sarah(&ids);
        let report = generate_report(&student);

        student.add_grade("Mathematics", 10.0).unwrap();
        student.record_mut().ledger_mut().remove_grade("Physics", 0);
        student.record_mut().drop_course("CS101");

        assert_eq!(report.grades["Mathematics"], vec![92.0]);
        assert_eq!(report.grades["Physics"], vec![88.0]);
        assert_eq!(report.courses.len(), 3);
        assert_eq!(report.total_credits, 9);
        assert_eq!(report.gpa, 3.33);
        assert_eq!(report.student.role, "Student");
        assert_eq!(report.student.person_id, 1);
        assert_eq!(report.student.year, None);
    }

    #[test]
    fn undergraduate_report_carries_year() {
        let ids = IdSequence::new();
        let profile = Profile::new("John Doe", 20, "john@university.edu", "STU004", "Computer Science");
        let undergrad = UndergraduateStudent::new(&ids, &profile, 2).unwrap();
        let report = generate_report(&undergrad);
        assert_eq!(report.student.year, Some(2));
        assert_eq!(report.student.role, "Sophomore (Undergraduate)");
        assert_eq!(serde_json::to_value(&report).unwrap()["student"]["year"], 2);
    }

    #[test]
    fn markdown_lists_courses_grades_and_standing() {
        let ids = IdSequence::new();
        let student = sarah(&ids);
        let report = generate_report(&student);
        let summary = performance_summary(student.record());
        let text = render_markdown(&report, &summary);

        assert!(text.starts_with("# Academic Report: Sarah Connor\n"));
        assert!(text.contains("- CS101 Introduction to Programming (3 credits, TBD, TBD)"));
        assert!(text.contains("- Chemistry: 95\n- Mathematics: 92\n- Physics: 88"));
        assert!(text.contains("GPA 3.33 across 9 credits: Good"));
        assert!(text.contains("- Increase course load to stay on track"));
    }

    #[test]
    fn report_serializes_to_json() {
        let ids = IdSequence::new();
        let report = generate_report(&sarah(&ids));
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["student"]["name"], "Sarah Connor");
        assert_eq!(value["total_credits"], 9);
        assert_eq!(value["grades"]["Physics"][0], 88.0);
    }
}
