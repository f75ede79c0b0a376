/// Tolerances applied by the consistency checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidationConfig {
    /// Largest absolute entry allowed in `L · (I − A) − I`.
    pub inverse_tolerance: f64,

    /// Slack allowed on the diagonal and dominance bounds.
    pub bound_tolerance: f64,

    /// Largest relative gap between `D · x` and the raw pressure totals.
    pub reconstruction_tolerance: f64,

    /// Relative reconstruction gap above which a warning is logged.
    pub reconstruction_warning: f64,

    /// Largest allowed distance of a linkage index mean from one.
    pub linkage_tolerance: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            inverse_tolerance: 1e-4,
            bound_tolerance: 1e-9,
            reconstruction_tolerance: 1e-3,
            reconstruction_warning: 1e-6,
            linkage_tolerance: 1e-9,
        }
    }
}
