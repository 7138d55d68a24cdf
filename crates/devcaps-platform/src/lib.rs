//! Devcaps Platform - Capability-providing services boundary
//!
//! This crate defines the [`Platform`] trait through which the resolver
//! queries hardware and software capabilities, plus two backends:
//! - [`HostPlatform`]: answers from the machine the process runs on, for
//!   the services a desktop host can actually provide
//! - [`StaticPlatform`]: scripted responses for composition and tests

pub mod host;
pub mod static_platform;
pub mod types;

use async_trait::async_trait;
use devcaps_core::ProbeError;

pub use host::HostPlatform;
pub use static_platform::{Failure, Service, StaticPlatform};
pub use types::{
    CameraDescriptor, CameraInventory, DeviceIdentity, MemoryStatus, PowerStatus, ScreenMetrics,
    SensorCoreSupport, SensorKind, ThemeInfo,
};

/// The set of platform services the resolver probes.
///
/// One method per capability-providing service. Each call is independent;
/// a failure in one never affects another. Backends report absence through
/// [`ProbeError::Unsupported`] and disabled-but-present capabilities (the
/// FM radio case) through [`ProbeError::Disabled`].
#[async_trait]
pub trait Platform: Send + Sync {
    /// Manufacturer, product name, and hardware/firmware versions.
    async fn device_identity(&self) -> Result<DeviceIdentity, ProbeError>;

    /// Carrier / operator name. Separate from identity because it is
    /// re-resolved on refresh passes.
    async fn operator_name(&self) -> Result<Option<String>, ProbeError>;

    /// Presence, flash, focus, and capture resolutions per camera panel.
    async fn enumerate_cameras(&self) -> Result<CameraInventory, ProbeError>;

    /// Presence check for a single sensor kind.
    async fn sensor_present(&self, kind: SensorKind) -> Result<bool, ProbeError>;

    /// Whether the combined motion API is usable. Requires both a compass
    /// and a gyroscope; the platform answers for the combination.
    async fn motion_api_available(&self) -> Result<bool, ProbeError>;

    /// Availability of the SensorCore activity tracking APIs.
    async fn sensor_core_support(&self) -> Result<SensorCoreSupport, ProbeError>;

    /// Application memory usage, limit, and peak, in bytes.
    async fn memory_status(&self) -> Result<MemoryStatus, ProbeError>;

    /// Physical pixel dimensions and raw DPI.
    async fn screen_metrics(&self) -> Result<ScreenMetrics, ProbeError>;

    /// Battery presence, charge, external power, and power-saving mode.
    async fn power_status(&self) -> Result<PowerStatus, ProbeError>;

    /// Whether at least one removable storage volume is mounted.
    async fn sd_card_present(&self) -> Result<bool, ProbeError>;

    /// Whether an FM radio handle can be acquired.
    async fn fm_radio_available(&self) -> Result<bool, ProbeError>;

    /// Whether a vibration actuator is present.
    async fn vibration_device_present(&self) -> Result<bool, ProbeError>;

    /// Number of logical processor cores.
    async fn processor_core_count(&self) -> Result<u32, ProbeError>;

    /// Current UI theme and accent color.
    async fn ui_theme(&self) -> Result<ThemeInfo, ProbeError>;
}
