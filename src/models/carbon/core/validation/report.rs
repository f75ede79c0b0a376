use serde::{Deserialize, Serialize};

/// Outcome of one consistency check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    pub name: String,
    pub passed: bool,
    /// Measured deviation, in the units the check compares against its tolerance.
    pub deviation: f64,
}

impl CheckResult {
    pub(super) fn within(name: impl Into<String>, deviation: f64, tolerance: f64) -> Self {
        Self {
            name: name.into(),
            passed: deviation <= tolerance,
            deviation,
        }
    }
}

/// All check outcomes for one environmental model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub checks: Vec<CheckResult>,
}

impl ValidationReport {
    /// Whether every check passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.checks.iter().all(|check| check.passed)
    }

    /// The checks that did not pass.
    pub fn failures(&self) -> impl Iterator<Item = &CheckResult> {
        self.checks.iter().filter(|check| !check.passed)
    }

    /// Looks up a check by name.
    #[must_use]
    pub fn check(&self, name: &str) -> Option<&CheckResult> {
        self.checks.iter().find(|check| check.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_only_when_every_check_passes() {
        let mut report = ValidationReport {
            checks: vec![
                CheckResult::within("a", 0.0, 1e-6),
                CheckResult::within("b", 1e-7, 1e-6),
            ],
        };
        assert!(report.passed());
        assert_eq!(report.failures().count(), 0);

        report.checks.push(CheckResult::within("c", 1.0, 1e-6));
        assert!(!report.passed());
        assert_eq!(report.failures().next().map(|c| c.name.as_str()), Some("c"));
    }

    #[test]
    fn nan_deviation_fails() {
        assert!(!CheckResult::within("nan", f64::NAN, 1.0).passed);
    }

    #[test]
    fn empty_report_passes() {
        assert!(ValidationReport::default().passed());
    }
}
