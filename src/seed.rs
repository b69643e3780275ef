use crate::error::Result;
use crate::person::IdSequence;
use crate::record::Course;
use crate::student::{Enrolled, GraduateStudent, Profile, Student, Thesis, UndergraduateStudent};

/// The sample cohort shown by the `demo` command.
#[derive(Debug, Clone)]
pub struct Cohort {
    pub undergraduate: UndergraduateStudent,
    pub graduate: GraduateStudent,
    pub student: Student,
}

impl Cohort {
    pub fn members(&self) -> Vec<&dyn Enrolled> {
        vec![&self.undergraduate, &self.graduate, &self.student]
    }
}

pub fn sample_cohort(ids: &IdSequence) -> Result<Cohort> {
    let mut undergraduate = UndergraduateStudent::new(
        ids,
        &Profile::new(
            "John Doe",
            20,
            "john@university.edu",
            "STU004",
            "Computer Science",
        ),
        3,
    )?;
    {
        let student = undergraduate.student_mut();
        student.add_grade("Data Structures", 88.0)?;
        student.add_grade("Algorithms", 92.0)?;
        student.add_grade("Database Systems", 85.0)?;
        student.enroll(Course::new("CS201", "Data Structures"))?;
        student.enroll(Course::new("CS301", "Algorithms"))?;
        student.enroll(Course::new("CS340", "Database Systems"))?;
    }
    undergraduate.join_club("Programming Club")?;
    undergraduate.join_club("Chess Club")?;

    let mut graduate = GraduateStudent::new(
        ids,
        &Profile::new(
            "Jane Smith",
            24,
            "jane@university.edu",
            "STU005",
            "Computer Science",
        ),
        Thesis::new(
            "Machine Learning in Healthcare",
            "Dr. Johnson",
            "Artificial Intelligence",
        ),
    )?;
    {
        let student = graduate.student_mut();
        student.add_grade("Advanced AI", 95.0)?;
        student.add_grade("Research Methods", 97.0)?;
        student.add_grade("Thesis Work", 98.0)?;
        student.enroll(Course::new("CS790", "Advanced AI").with_instructor("Dr. Johnson"))?;
        student.enroll(Course::new("CS791", "Research Methods"))?;
    }

    let mut student = Student::new(
        ids,
        &Profile::new(
            "Sarah Connor",
            22,
            "sarah@university.edu",
            "STU006",
            "Computer Science",
        ),
    )?;
    student.add_grade("Mathematics", 92.0)?;
    student.add_grade("Physics", 88.0)?;
    student.add_grade("Chemistry", 95.0)?;
    student.enroll(Course::new("CS101", "Introduction to Programming"))?;
    student.enroll(Course::new("MATH201", "Calculus II"))?;
    student.enroll(Course::new("PHYS101", "General Physics"))?;

    Ok(Cohort {
        undergraduate,
        graduate,
        student,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_cohort_draws_three_ids() {
        let ids = IdSequence::new();
        let cohort = sample_cohort(&ids).unwrap();
        assert_eq!(ids.issued(), 3);
        let roles: Vec<String> = cohort.members().iter().map(|m| m.role()).collect();
        assert_eq!(
            roles,
            vec!["Junior (Undergraduate)", "Graduate Student", "Student"]
        );
    }
}
