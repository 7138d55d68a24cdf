//! Reply types for the platform services

use devcaps_core::{AccentColor, CaptureResolution};
use serde::{Deserialize, Serialize};

/// One camera and its probed capabilities.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CameraDescriptor {
    pub flash: bool,
    pub auto_focus: bool,
    /// Unordered as reported; the resolver sorts and deduplicates.
    pub photo_resolutions: Vec<CaptureResolution>,
    pub video_resolutions: Vec<CaptureResolution>,
}

/// The cameras found by enclosure panel. A panel with no camera is None.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CameraInventory {
    pub back: Option<CameraDescriptor>,
    pub front: Option<CameraDescriptor>,
}

/// Sensor kinds probed individually for presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorKind {
    Accelerometer,
    Compass,
    Gyroscope,
    Inclinometer,
    Orientation,
    /// Proximity / NFC
    Proximity,
}

impl SensorKind {
    pub const ALL: &'static [SensorKind] = &[
        SensorKind::Accelerometer,
        SensorKind::Compass,
        SensorKind::Gyroscope,
        SensorKind::Inclinometer,
        SensorKind::Orientation,
        SensorKind::Proximity,
    ];
}

/// Availability of the SensorCore activity tracking APIs.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SensorCoreSupport {
    pub activity_monitor: bool,
    pub place_monitor: bool,
    pub step_counter: bool,
    pub track_point_monitor: bool,
}

/// Application memory accounting in bytes.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MemoryStatus {
    pub usage_bytes: u64,
    pub limit_bytes: u64,
    pub peak_bytes: u64,
}

/// Physical screen metrics.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ScreenMetrics {
    pub width: u32,
    pub height: u32,
    pub dpi_x: f64,
    pub dpi_y: f64,
}

/// Battery and power supply state.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PowerStatus {
    pub has_battery: bool,
    pub charge_percent: Option<u8>,
    pub on_external_power: bool,
    pub power_saving_mode: bool,
}

/// Device identity fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeviceIdentity {
    pub device_name: Option<String>,
    pub manufacturer: Option<String>,
    pub hardware_version: Option<String>,
    pub firmware_version: Option<String>,
}

/// Current UI theme.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ThemeInfo {
    pub dark: bool,
    pub accent_color: Option<AccentColor>,
}
