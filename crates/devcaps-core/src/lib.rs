//! Devcaps Core - Capability identifiers and the resolved snapshot record
//!
//! This crate provides the foundational types for the devcaps system:
//! - Stable capability identifiers, decoupled from any display string
//! - The flat snapshot record populated by the resolver
//! - Capture resolution and screen metric types with their derivation rules
//! - The probe error taxonomy shared across platform backends
//! - The auto-focus override table for hardware that misreports focus support

pub mod capability;
pub mod error;
pub mod overrides;
pub mod resolution;
pub mod screen;
pub mod snapshot;

pub use capability::CapabilityId;
pub use error::ProbeError;
pub use overrides::FocusOverrides;
pub use resolution::{sort_resolutions, CaptureResolution};
pub use screen::{display_diagonal_inches, ScreenCategory};
pub use snapshot::{AccentColor, Snapshot};
