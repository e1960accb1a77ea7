use thiserror::Error;

use crate::models::sorting::SortingConfig;

/// A sorting configuration that parsed but cannot be used.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SortingConfigError {
    #[error("no sorters are configured")]
    NoSorters,

    #[error("default sorter {0:?} is not declared under [sorters]")]
    UnknownDefault(String),

    #[error("sorter alias {0:?} must be non-empty and contain no whitespace")]
    InvalidAlias(String),

    #[error("max_depth for {scope} must be at least 1")]
    ZeroDepth { scope: String },
}

impl SortingConfig {
    /// Checks the guard rails the registry relies on.
    pub fn validate(&self) -> Result<(), SortingConfigError> {
        if self.sorters.is_empty() {
            return Err(SortingConfigError::NoSorters);
        }

        for (alias, spec) in &self.sorters {
            if alias.is_empty() || alias.chars().any(char::is_whitespace) {
                return Err(SortingConfigError::InvalidAlias(alias.clone()));
            }
            if spec.max_depth == Some(0) {
                return Err(SortingConfigError::ZeroDepth {
                    scope: format!("sorter {alias:?}"),
                });
            }
        }

        if self.max_depth == Some(0) {
            return Err(SortingConfigError::ZeroDepth {
                scope: "all sorters".to_string(),
            });
        }

        if !self.sorters.contains_key(&self.default) {
            return Err(SortingConfigError::UnknownDefault(self.default.clone()));
        }

        Ok(())
    }
}
