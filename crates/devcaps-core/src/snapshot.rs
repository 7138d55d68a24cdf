//! The resolved capability snapshot
//!
//! A flat record of every probed capability and property. Fields hold their
//! type's default until the probe that owns them reports; consumers should
//! only trust values once `ready` is true.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::capability::CapabilityId;
use crate::resolution::CaptureResolution;
use crate::screen::ScreenCategory;

/// An RGB accent color from the platform theme service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccentColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl std::fmt::Display for AccentColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// The full set of resolved capability and property fields.
///
/// Created empty, populated by the resolver, safe to read once `ready`
/// flips true. A refresh pass re-resolves only the dynamic subset (memory,
/// power, storage, operator, theme); everything else is probed exactly once
/// per process.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    /// True once every probe of the current pass has reported.
    pub ready: bool,
    /// When the last pass completed.
    pub resolved_at: Option<DateTime<Utc>>,

    // Device identity
    pub device_name: Option<String>,
    pub manufacturer: Option<String>,
    pub hardware_version: Option<String>,
    pub firmware_version: Option<String>,
    /// Carrier / operator name. Dynamic: re-resolved on refresh.
    pub operator: Option<String>,

    // Cameras and flashes
    pub has_back_camera: bool,
    pub has_front_camera: bool,
    pub has_back_camera_flash: bool,
    pub has_front_camera_flash: bool,
    pub has_back_camera_auto_focus: bool,
    pub has_front_camera_auto_focus: bool,
    /// Sorted descending by pixel count.
    pub back_camera_photo_resolutions: Vec<CaptureResolution>,
    pub back_camera_video_resolutions: Vec<CaptureResolution>,
    pub front_camera_photo_resolutions: Vec<CaptureResolution>,
    pub front_camera_video_resolutions: Vec<CaptureResolution>,

    // Sensors
    pub has_accelerometer: bool,
    pub has_compass: bool,
    pub has_gyroscope: bool,
    pub has_inclinometer: bool,
    pub has_orientation_sensor: bool,
    /// Proximity / NFC
    pub has_proximity_sensor: bool,

    // Motion and activity APIs
    pub motion_api_supported: bool,
    pub sensor_core_activity_monitor_supported: bool,
    pub sensor_core_place_monitor_supported: bool,
    pub sensor_core_step_counter_supported: bool,
    pub sensor_core_track_point_monitor_supported: bool,

    // Other hardware
    pub has_fm_radio: bool,
    pub has_vibration_device: bool,
    pub processor_core_count: u32,

    // Screen
    pub screen_category: ScreenCategory,
    pub screen_width: u32,
    pub screen_height: u32,
    pub raw_dpi_x: f64,
    pub raw_dpi_y: f64,
    /// E.g. 4.5 for a 4.5 inch panel. None when DPI is unknown.
    pub display_diagonal_inches: Option<f64>,

    // Memory (dynamic)
    pub memory_usage_bytes: u64,
    pub memory_limit_bytes: u64,
    pub memory_peak_bytes: u64,

    // Battery and power (dynamic)
    pub has_battery_status: bool,
    pub battery_charge_percent: Option<u8>,
    pub on_external_power: bool,
    pub power_saving_mode: bool,

    // Storage (dynamic)
    pub has_sd_card: bool,

    // Theme (dynamic)
    pub dark_theme: bool,
    pub accent_color: Option<AccentColor>,
}

impl Snapshot {
    /// Read a boolean capability flag by its stable identifier.
    pub fn capability(&self, id: CapabilityId) -> bool {
        match id {
            CapabilityId::Accelerometer => self.has_accelerometer,
            CapabilityId::Compass => self.has_compass,
            CapabilityId::Gyroscope => self.has_gyroscope,
            CapabilityId::Inclinometer => self.has_inclinometer,
            CapabilityId::OrientationSensor => self.has_orientation_sensor,
            CapabilityId::ProximitySensor => self.has_proximity_sensor,
            CapabilityId::MotionApi => self.motion_api_supported,
            CapabilityId::SensorCoreActivityMonitor => {
                self.sensor_core_activity_monitor_supported
            }
            CapabilityId::SensorCorePlaceMonitor => self.sensor_core_place_monitor_supported,
            CapabilityId::SensorCoreStepCounter => self.sensor_core_step_counter_supported,
            CapabilityId::SensorCoreTrackPointMonitor => {
                self.sensor_core_track_point_monitor_supported
            }
            CapabilityId::FmRadio => self.has_fm_radio,
            CapabilityId::VibrationDevice => self.has_vibration_device,
            CapabilityId::BackCamera => self.has_back_camera,
            CapabilityId::FrontCamera => self.has_front_camera,
            CapabilityId::BackCameraFlash => self.has_back_camera_flash,
            CapabilityId::FrontCameraFlash => self.has_front_camera_flash,
            CapabilityId::BackCameraAutoFocus => self.has_back_camera_auto_focus,
            CapabilityId::FrontCameraAutoFocus => self.has_front_camera_auto_focus,
            CapabilityId::BatteryStatus => self.has_battery_status,
            CapabilityId::SdCard => self.has_sd_card,
            CapabilityId::ExternalPower => self.on_external_power,
            CapabilityId::PowerSavingMode => self.power_saving_mode,
            CapabilityId::DarkTheme => self.dark_theme,
        }
    }
}
