use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context};

use crate::record::Course;
use crate::student::Student;

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
enum Entry {
    Grade,
    Course,
}

#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    entry: Entry,
    key: String,
    name: Option<String>,
    score: Option<f64>,
    credits: Option<u32>,
    instructor: Option<String>,
    schedule: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub grades: usize,
    pub courses: usize,
    pub duplicate_courses: usize,
}

pub fn load_record(path: &Path, student: &mut Student) -> anyhow::Result<ImportSummary> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    load_record_from_reader(file, student)
}

/// Reads `entry,key,name,score,credits,instructor,schedule` rows. `grade`
/// rows use `key` as the subject; `course` rows use it as the course id.
/// Stops at the first invalid row.
pub fn load_record_from_reader<R: Read>(
    input: R,
    student: &mut Student,
) -> anyhow::Result<ImportSummary> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(input);
    let mut summary = ImportSummary::default();

    for (index, result) in reader.deserialize::<CsvRow>().enumerate() {
        // header is line 1
        let line = index + 2;
        let row = result.with_context(|| format!("malformed row on line {line}"))?;

        match row.entry {
            Entry::Grade => {
                let Some(score) = row.score else {
                    bail!("grade row on line {line} has no score");
                };
                student
                    .add_grade(&row.key, score)
                    .with_context(|| format!("invalid grade on line {line}"))?;
                summary.grades += 1;
            }
            Entry::Course => {
                let name = row.name.as_deref().unwrap_or(&row.key);
                let mut course = Course::new(&row.key, name).with_credits(row.credits.unwrap_or(0));
                if let Some(instructor) = row.instructor.as_deref().filter(|s| !s.is_empty()) {
                    course = course.with_instructor(instructor);
                }
                if let Some(schedule) = row.schedule.as_deref().filter(|s| !s.is_empty()) {
                    course = course.with_schedule(schedule);
                }

                let enrolled = student
                    .enroll(course)
                    .with_context(|| format!("invalid course on line {line}"))?;
                if enrolled {
                    summary.courses += 1;
                } else {
                    tracing::warn!(course_id = %row.key, line, "duplicate course skipped");
                    summary.duplicate_courses += 1;
                }
            }
        }
    }

    tracing::info!(
        grades = summary.grades,
        courses = summary.courses,
        "record imported"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::person::IdSequence;
    use crate::student::Profile;

    fn blank_student(ids: &IdSequence) -> Student {
        let profile = Profile::new(
            "Sarah Connor",
            22,
            "sarah@university.edu",
            "STU006",
            "Computer Science",
        );
        Student::new(ids, &profile).unwrap()
    }

    const FIXTURE: &str = "\
entry,key,name,score,credits,instructor,schedule
grade,Mathematics,,92,,,
grade,Physics,,88,,,
grade,Chemistry,,95,,,
course,CS101,Introduction to Programming,,,Dr. Hopper,MWF 9:00
course,MATH201,Calculus II,,4,,
course,CS101,Introduction to Programming,,,,
";

    #[test]
    fn imports_grades_and_courses() {
        let ids = IdSequence::new();
        let mut student = blank_student(&ids);
        let summary = load_record_from_reader(FIXTURE.as_bytes(), &mut student).unwrap();

        assert_eq!(
            summary,
            ImportSummary {
                grades: 3,
                courses: 2,
                duplicate_courses: 1,
            }
        );
        let record = student.record();
        assert_eq!(record.total_credits(), 7);
        assert_eq!(record.gpa(), 3.33);
        let course = record.course("CS101").unwrap();
        assert_eq!(course.instructor, "Dr. Hopper");
        assert_eq!(record.course("MATH201").unwrap().schedule, "TBD");
    }

    #[test]
    fn invalid_score_names_the_line() {
        let ids = IdSequence::new();
        let mut student = blank_student(&ids);
        let input = "entry,key,name,score,credits,instructor,schedule\n\
                     grade,Mathematics,,92,,,\n\
                     grade,Biology,,150,,,\n";
        let err = load_record_from_reader(input.as_bytes(), &mut student).unwrap_err();
        assert!(err.to_string().contains("line 3"));
        assert_eq!(student.record().ledger().subjects(), vec!["Mathematics"]);
    }

    #[test]
    fn grade_row_without_score_fails() {
        let ids = IdSequence::new();
        let mut student = blank_student(&ids);
        let input = "entry,key,name,score,credits,instructor,schedule\n\
                     grade,Mathematics,,,,,\n";
        assert!(load_record_from_reader(input.as_bytes(), &mut student).is_err());
    }

    #[test]
    fn unknown_entry_kind_fails() {
        let ids = IdSequence::new();
        let mut student = blank_student(&ids);
        let input = "entry,key,name,score,credits,instructor,schedule\n\
                     club,Chess,,,,,\n";
        assert!(load_record_from_reader(input.as_bytes(), &mut student).is_err());
    }
}
