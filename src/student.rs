use crate::error::{require_text, Result, ValidationError};
use crate::person::{check_age, check_email, IdSequence, Person};
use crate::record::{AcademicRecord, Course};
use crate::scale::GradeScale;

pub const GRADUATION_CREDITS: u32 = 120;
pub const GRADUATION_GPA: f64 = 2.0;

const YEAR_NAMES: [&str; 4] = ["Freshman", "Sophomore", "Junior", "Senior"];
const STUDENT_ID_PREFIX: &str = "STU";

/// `STU` followed by exactly three digits, e.g. `STU001`.
pub fn is_valid_student_id(student_id: &str) -> bool {
    student_id
        .strip_prefix(STUDENT_ID_PREFIX)
        .is_some_and(|digits| digits.len() == 3 && digits.bytes().all(|b| b.is_ascii_digit()))
}

fn check_student_id(student_id: &str) -> Result<()> {
    require_text("student id", student_id)?;
    if !is_valid_student_id(student_id) {
        return Err(ValidationError::InvalidStudentId(student_id.to_string()));
    }
    Ok(())
}

/// Identity and program fields shared by every kind of student.
#[derive(Debug, Clone)]
pub struct Profile {
    pub name: String,
    pub age: u32,
    pub email: String,
    pub student_id: String,
    pub major: String,
}

/// Every problem with `profile` (and `year`, for an undergraduate) at once,
/// in field order. Empty when a student could be built from it.
pub fn validate_profile(profile: &Profile, year: Option<u8>) -> Vec<ValidationError> {
    let checks = [
        require_text("name", &profile.name),
        check_age(profile.age),
        check_email(&profile.email),
        check_student_id(&profile.student_id),
        require_text("major", &profile.major),
        year.map_or(Ok(()), check_year),
    ];
    checks.into_iter().filter_map(|check| check.err()).collect()
}

impl Profile {
    pub fn new(name: &str, age: u32, email: &str, student_id: &str, major: &str) -> Self {
        Profile {
            name: name.to_string(),
            age,
            email: email.to_string(),
            student_id: student_id.to_string(),
            major: major.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Student {
    person: Person,
    student_id: String,
    major: String,
    record: AcademicRecord,
}

impl Student {
    pub fn new(ids: &IdSequence, profile: &Profile) -> Result<Self> {
        Self::with_scale(ids, profile, GradeScale::Standard)
    }

    fn with_scale(ids: &IdSequence, profile: &Profile, scale: GradeScale) -> Result<Self> {
        check_student_id(&profile.student_id)?;
        require_text("major", &profile.major)?;
        let person = Person::new(ids, &profile.name, profile.age, &profile.email)?;

        Ok(Student {
            person,
            student_id: profile.student_id.clone(),
            major: profile.major.clone(),
            record: AcademicRecord::new(scale),
        })
    }

    pub fn person(&self) -> &Person {
        &self.person
    }

    pub fn person_mut(&mut self) -> &mut Person {
        &mut self.person
    }

    pub fn name(&self) -> &str {
        self.person.name()
    }

    pub fn student_id(&self) -> &str {
        &self.student_id
    }

    pub fn major(&self) -> &str {
        &self.major
    }

    pub fn set_major(&mut self, major: &str) -> Result<()> {
        require_text("major", major)?;
        self.major = major.to_string();
        Ok(())
    }

    pub fn record(&self) -> &AcademicRecord {
        &self.record
    }

    pub fn record_mut(&mut self) -> &mut AcademicRecord {
        &mut self.record
    }

    pub fn add_grade(&mut self, subject: &str, score: f64) -> Result<()> {
        self.record.add_grade(subject, score)
    }

    pub fn enroll(&mut self, course: Course) -> Result<bool> {
        self.record.enroll(course)
    }

    /// Text grade report headed by the date this student was created.
    pub fn grade_report(&self) -> String {
        self.record.ledger().grade_report(
            self.person.name(),
            &self.student_id,
            self.person.created_at().date_naive(),
        )
    }

    fn info_line(&self, role: &str) -> String {
        format!(
            "{}: {} (ID: {}), Major: {}",
            role,
            self.person.name(),
            self.student_id,
            self.major
        )
    }
}

/// Common view over every kind of student.
pub trait Enrolled {
    fn student(&self) -> &Student;

    fn student_mut(&mut self) -> &mut Student;

    /// Display label for the kind of student.
    fn role(&self) -> String;

    fn info(&self) -> String {
        self.student().info_line(&self.role())
    }

    fn gpa(&self) -> f64 {
        self.student().record().gpa()
    }

    /// `Some` only for kinds that track graduation requirements.
    fn graduation_eligible(&self) -> Option<bool> {
        None
    }

    /// `Some` only for undergraduates.
    fn year_of_study(&self) -> Option<u8> {
        None
    }

    /// Extra `Label: value` lines for this kind of student.
    fn details(&self) -> Vec<String> {
        Vec::new()
    }
}

impl Enrolled for Student {
    fn student(&self) -> &Student {
        self
    }

    fn student_mut(&mut self) -> &mut Student {
        self
    }

    fn role(&self) -> String {
        "Student".to_string()
    }
}

#[derive(Debug, Clone)]
pub struct Thesis {
    pub title: String,
    pub advisor: String,
    pub research_area: String,
}

impl Thesis {
    pub fn new(title: &str, advisor: &str, research_area: &str) -> Self {
        Thesis {
            title: title.to_string(),
            advisor: advisor.to_string(),
            research_area: research_area.to_string(),
        }
    }
}

/// Graded on the stricter graduate scale.
#[derive(Debug, Clone)]
pub struct GraduateStudent {
    student: Student,
    thesis: Thesis,
}

impl GraduateStudent {
    pub fn new(ids: &IdSequence, profile: &Profile, thesis: Thesis) -> Result<Self> {
        require_text("thesis title", &thesis.title)?;
        let student = Student::with_scale(ids, profile, GradeScale::Graduate)?;
        Ok(GraduateStudent { student, thesis })
    }

    pub fn thesis_title(&self) -> &str {
        &self.thesis.title
    }

    pub fn set_thesis_title(&mut self, title: &str) -> Result<()> {
        require_text("thesis title", title)?;
        self.thesis.title = title.to_string();
        Ok(())
    }

    pub fn advisor(&self) -> &str {
        &self.thesis.advisor
    }

    pub fn research_area(&self) -> &str {
        &self.thesis.research_area
    }

    pub fn defend_thesis(&self) -> String {
        format!(
            "{} is defending thesis: \"{}\"",
            self.student.name(),
            self.thesis.title
        )
    }
}

impl Enrolled for GraduateStudent {
    fn student(&self) -> &Student {
        &self.student
    }

    fn student_mut(&mut self) -> &mut Student {
        &mut self.student
    }

    fn role(&self) -> String {
        "Graduate Student".to_string()
    }

    fn info(&self) -> String {
        format!(
            "{}, Research: {}, Advisor: {}",
            self.student.info_line(&self.role()),
            self.thesis.research_area,
            self.thesis.advisor
        )
    }

    fn details(&self) -> Vec<String> {
        vec![format!("Thesis: {}", self.thesis.title)]
    }
}

#[derive(Debug, Clone)]
pub struct UndergraduateStudent {
    student: Student,
    year: u8,
    clubs: Vec<String>,
}

fn check_year(year: u8) -> Result<()> {
    if !(1..=4).contains(&year) {
        return Err(ValidationError::YearOutOfRange(year));
    }
    Ok(())
}

impl UndergraduateStudent {
    pub fn new(ids: &IdSequence, profile: &Profile, year: u8) -> Result<Self> {
        check_year(year)?;
        let student = Student::new(ids, profile)?;
        Ok(UndergraduateStudent {
            student,
            year,
            clubs: Vec::new(),
        })
    }

    pub fn year(&self) -> u8 {
        self.year
    }

    pub fn set_year(&mut self, year: u8) -> Result<()> {
        check_year(year)?;
        self.year = year;
        Ok(())
    }

    pub fn year_name(&self) -> &'static str {
        YEAR_NAMES[usize::from(self.year - 1)]
    }

    /// No-op when already a member.
    pub fn join_club(&mut self, club: &str) -> Result<()> {
        require_text("club name", club)?;
        if !self.clubs.iter().any(|existing| existing == club) {
            self.clubs.push(club.to_string());
        }
        Ok(())
    }

    pub fn clubs(&self) -> Vec<String> {
        self.clubs.clone()
    }

    pub fn can_graduate(&self) -> bool {
        let record = self.student.record();
        record.total_credits() >= GRADUATION_CREDITS && record.gpa() >= GRADUATION_GPA
    }
}

impl Enrolled for UndergraduateStudent {
    fn student(&self) -> &Student {
        &self.student
    }

    fn student_mut(&mut self) -> &mut Student {
        &mut self.student
    }

    fn role(&self) -> String {
        format!("{} (Undergraduate)", self.year_name())
    }

    fn graduation_eligible(&self) -> Option<bool> {
        Some(self.can_graduate())
    }

    fn year_of_study(&self) -> Option<u8> {
        Some(self.year)
    }

    fn details(&self) -> Vec<String> {
        let clubs = if self.clubs.is_empty() {
            "None".to_string()
        } else {
            self.clubs.join(", ")
        };
        vec![
            format!("Can Graduate: {}", self.can_graduate()),
            format!("Clubs: {clubs}"),
        ]
    }
}
