//! Probe error taxonomy
//!
//! Every platform service reports failures through [`ProbeError`]. The
//! resolver swallows all of these at the probe boundary: the corresponding
//! snapshot fields keep their defaults and the probe still counts as
//! complete.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProbeError {
    /// The platform legitimately has no such device or sensor.
    #[error("capability not supported on this platform")]
    Unsupported,
    /// The platform denied access to the capability.
    #[error("access to the capability was denied")]
    PermissionDenied,
    /// The capability exists but is currently disabled (e.g. the radio
    /// handle could not be acquired).
    #[error("capability is disabled: {0}")]
    Disabled(String),
    /// An I/O failure while querying the platform.
    #[error("probe I/O failure: {0}")]
    Io(#[from] std::io::Error),
    /// Any other platform failure.
    #[error("probe failed: {0}")]
    Other(String),
}

impl ProbeError {
    /// True for conditions that mean "the capability is absent" rather
    /// than "the query broke". Both degrade to defaults, but backends log
    /// them at different levels.
    pub fn is_absence(&self) -> bool {
        matches!(self, ProbeError::Unsupported | ProbeError::Disabled(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absence_classification() {
        assert!(ProbeError::Unsupported.is_absence());
        assert!(ProbeError::Disabled("radio off".into()).is_absence());
        assert!(!ProbeError::PermissionDenied.is_absence());
        assert!(!ProbeError::Other("boom".into()).is_absence());
    }
}
