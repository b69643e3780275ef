use serde::Serialize;

/// Academic standing derived from GPA. Thresholds are checked top-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Standing {
    Excellent,
    Good,
    Satisfactory,
    Probation,
    Suspended,
}

impl Standing {
    pub fn from_gpa(gpa: f64) -> Self {
        match gpa {
            g if g >= 3.8 => Standing::Excellent,
            g if g >= 3.0 => Standing::Good,
            g if g >= 2.0 => Standing::Satisfactory,
            g if g >= 1.0 => Standing::Probation,
            _ => Standing::Suspended,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Standing::Excellent => "Excellent",
            Standing::Good => "Good",
            Standing::Satisfactory => "Satisfactory",
            Standing::Probation => "Probation",
            Standing::Suspended => "Suspended",
        }
    }

    /// The recommendation every summary with this standing opens with.
    pub fn advice(&self) -> &'static str {
        match self {
            Standing::Excellent => "Consider honors program",
            Standing::Good => "Maintain current performance",
            Standing::Satisfactory => "Consider tutoring for improvement",
            Standing::Probation => "Academic intervention required",
            Standing::Suspended => "Meet with academic advisor immediately",
        }
    }
}
