use crate::models::carbon::core::ValidationConfig;

/// Options for building one dataset version.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildConfig {
    /// Tolerances used to certify the built model.
    pub validation: ValidationConfig,

    /// Refuse to return a dataset whose validation report has failures.
    pub require_certification: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            validation: ValidationConfig::default(),
            require_certification: true,
        }
    }
}
