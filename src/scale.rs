use serde::Serialize;

/// Score -> grade points conversion. Each table lists `(minimum score,
/// points)` breakpoints from the top down; anything under the last
/// breakpoint is worth 0.0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum GradeScale {
    #[default]
    Standard,
    Graduate,
}

const STANDARD_TABLE: [(f64, f64); 11] = [
    (97.0, 4.0),
    (93.0, 3.7),
    (90.0, 3.3),
    (87.0, 3.0),
    (83.0, 2.7),
    (80.0, 2.3),
    (77.0, 2.0),
    (73.0, 1.7),
    (70.0, 1.3),
    (67.0, 1.0),
    (65.0, 0.7),
];

const GRADUATE_TABLE: [(f64, f64); 7] = [
    (98.0, 4.0),
    (95.0, 3.7),
    (92.0, 3.3),
    (89.0, 3.0),
    (86.0, 2.7),
    (83.0, 2.3),
    (80.0, 2.0),
];

impl GradeScale {
    pub fn breakpoints(&self) -> &'static [(f64, f64)] {
        match self {
            GradeScale::Standard => &STANDARD_TABLE,
            GradeScale::Graduate => &GRADUATE_TABLE,
        }
    }

    pub fn points(&self, score: f64) -> f64 {
        self.breakpoints()
            .iter()
            .find(|(minimum, _)| score >= *minimum)
            .map(|(_, points)| *points)
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_breakpoints() {
        let scale = GradeScale::Standard;
        assert_eq!(scale.points(100.0), 4.0);
        assert_eq!(scale.points(97.0), 4.0);
        assert_eq!(scale.points(96.9), 3.7);
        assert_eq!(scale.points(88.0), 3.0);
        assert_eq!(scale.points(77.0), 2.0);
        assert_eq!(scale.points(65.0), 0.7);
        assert_eq!(scale.points(64.99), 0.0);
        assert_eq!(scale.breakpoints().len(), 11);
    }

    #[test]
    fn graduate_table_is_stricter() {
        let scale = GradeScale::Graduate;
        assert_eq!(scale.points(98.0), 4.0);
        assert_eq!(scale.points(97.0), 3.7);
        assert_eq!(scale.points(95.0), 3.7);
        assert_eq!(scale.points(80.0), 2.0);
        assert_eq!(scale.points(79.0), 0.0);
        assert_eq!(scale.breakpoints().len(), 7);
        assert!(scale.points(90.0) < GradeScale::Standard.points(90.0));
    }
}
