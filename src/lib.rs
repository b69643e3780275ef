//! Student grade tracking: per-subject score ledgers, enrollment and credit
//! totals, GPA under interchangeable grade scales, and report snapshots with
//! a derived academic standing.

pub mod config;
pub mod error;
pub mod import;
pub mod ledger;
pub mod models;
pub mod person;
pub mod record;
pub mod report;
pub mod repository;
pub mod scale;
pub mod seed;
pub mod student;

pub use error::{Result, ValidationError};
pub use ledger::{round2, GradeLedger, PerformanceLevel};
pub use models::Standing;
pub use person::{IdSequence, Person};
pub use record::{AcademicRecord, Course};
pub use report::{generate_report, performance_summary, PerformanceSummary, Report};
pub use repository::{Identifiable, InMemoryRepository, Repository};
pub use scale::GradeScale;
pub use student::{
    validate_profile, Enrolled, GraduateStudent, Profile, Student, Thesis, UndergraduateStudent,
};
