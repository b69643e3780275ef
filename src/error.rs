use thiserror::Error;

pub type Result<T> = std::result::Result<T, ValidationError>;

/// Rejected input. Raised at the point of the bad value; nothing is written
/// before the check passes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Grade must be between 0 and 100, got {0}")]
    ScoreOutOfRange(f64),
    #[error("{field} cannot be empty")]
    BlankField { field: &'static str },
    #[error("Year must be between 1 and 4, got {0}")]
    YearOutOfRange(u8),
    #[error("Invalid email format: `{0}`")]
    InvalidEmail(String),
    #[error("Age must be between 0 and 120, got {0}")]
    AgeOutOfRange(u32),
    #[error("Student ID must follow format STU001, got `{0}`")]
    InvalidStudentId(String),
}

impl ValidationError {
    pub fn blank(field: &'static str) -> Self {
        ValidationError::BlankField { field }
    }

    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::ScoreOutOfRange(_) => "grade",
            ValidationError::BlankField { field } => *field,
            ValidationError::YearOutOfRange(_) => "year",
            ValidationError::InvalidEmail(_) => "email",
            ValidationError::AgeOutOfRange(_) => "age",
            ValidationError::InvalidStudentId(_) => "student id",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::ScoreOutOfRange(_)
            | ValidationError::YearOutOfRange(_)
            | ValidationError::AgeOutOfRange(_) => "OUT_OF_RANGE",
            ValidationError::BlankField { .. } => "REQUIRED",
            ValidationError::InvalidEmail(_) | ValidationError::InvalidStudentId(_) => {
                "INVALID_FORMAT"
            }
        }
    }
}

/// Fails with `BlankField` when `value` is empty or whitespace only.
pub(crate) fn require_text(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::blank(field));
    }
    Ok(())
}
