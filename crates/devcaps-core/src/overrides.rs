//! Auto-focus override table
//!
//! Focus support reported through the camera service is wrong for a set of
//! known phone models that shipped on the earliest OS generation. The
//! resolver consults this table after the camera probe and forces the back
//! camera auto-focus flag to true when the resolved device name matches.

use serde::{Deserialize, Serialize};

/// Default set of model codes that misreport back camera auto focus.
const DEFAULT_AUTO_FOCUS_MODELS: &[&str] = &[
    "RM-820", // Lumia 920
    "RM-821", // Lumia 920
    "RM-822", // Lumia 920
    "RM-824", // Lumia 820
    "RM-825", // Lumia 820
    "RM-826", // Lumia 820
    "RM-846", // Lumia 620
    "RM-867", // Lumia 920
    "RM-875", // Lumia 1020
    "RM-876", // Lumia 1020
    "RM-877", // Lumia 1020
    "RM-885", // Lumia 720
    "RM-887", // Lumia 720
    "RM-892", // Lumia 925
    "RM-893", // Lumia 925
    "RM-910", // Lumia 925
    "RM-955", // Lumia 925
];

/// Pluggable lookup table of device model codes whose back camera supports
/// auto focus despite the platform reporting otherwise. Matching is by
/// substring of the resolved device name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FocusOverrides {
    models: Vec<String>,
}

impl Default for FocusOverrides {
    fn default() -> Self {
        Self {
            models: DEFAULT_AUTO_FOCUS_MODELS
                .iter()
                .map(|m| (*m).to_string())
                .collect(),
        }
    }
}

impl FocusOverrides {
    /// Table with no entries; no device name will ever match.
    pub fn empty() -> Self {
        Self { models: Vec::new() }
    }

    /// Build a table from an explicit model list, replacing the defaults.
    pub fn from_models<I, S>(models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            models: models.into_iter().map(Into::into).collect(),
        }
    }

    /// Add model codes on top of the current table.
    pub fn extend<I, S>(&mut self, models: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.models.extend(models.into_iter().map(Into::into));
    }

    /// Whether the override applies to the given device name.
    pub fn applies_to(&self, device_name: &str) -> bool {
        self.models.iter().any(|m| device_name.contains(m.as_str()))
    }

    pub fn models(&self) -> &[String] {
        &self.models
    }
}
