//! Stable identifiers for boolean device capabilities
//!
//! Consumers key off these identifiers rather than display text, and map
//! identifier to localized label only at render time.

use serde::{Deserialize, Serialize};

/// Identifier for a single boolean capability flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapabilityId {
    Accelerometer,
    Compass,
    Gyroscope,
    Inclinometer,
    OrientationSensor,
    /// Proximity / NFC device
    ProximitySensor,
    /// Combined motion API (needs both compass and gyroscope)
    MotionApi,
    SensorCoreActivityMonitor,
    SensorCorePlaceMonitor,
    SensorCoreStepCounter,
    SensorCoreTrackPointMonitor,
    FmRadio,
    VibrationDevice,
    BackCamera,
    FrontCamera,
    BackCameraFlash,
    FrontCameraFlash,
    BackCameraAutoFocus,
    FrontCameraAutoFocus,
    /// Whether battery status information is available at all
    BatteryStatus,
    SdCard,
    ExternalPower,
    PowerSavingMode,
    DarkTheme,
}

impl CapabilityId {
    /// All capability identifiers, in presentation order.
    pub const ALL: &'static [CapabilityId] = &[
        CapabilityId::Accelerometer,
        CapabilityId::Compass,
        CapabilityId::Gyroscope,
        CapabilityId::Inclinometer,
        CapabilityId::OrientationSensor,
        CapabilityId::ProximitySensor,
        CapabilityId::MotionApi,
        CapabilityId::SensorCoreActivityMonitor,
        CapabilityId::SensorCorePlaceMonitor,
        CapabilityId::SensorCoreStepCounter,
        CapabilityId::SensorCoreTrackPointMonitor,
        CapabilityId::FmRadio,
        CapabilityId::VibrationDevice,
        CapabilityId::BackCamera,
        CapabilityId::FrontCamera,
        CapabilityId::BackCameraFlash,
        CapabilityId::FrontCameraFlash,
        CapabilityId::BackCameraAutoFocus,
        CapabilityId::FrontCameraAutoFocus,
        CapabilityId::BatteryStatus,
        CapabilityId::SdCard,
        CapabilityId::ExternalPower,
        CapabilityId::PowerSavingMode,
        CapabilityId::DarkTheme,
    ];

    /// Whether the capability belongs to the dynamic subset that is
    /// re-probed on refresh. Static hardware flags are resolved once.
    pub fn is_dynamic(&self) -> bool {
        matches!(
            self,
            CapabilityId::SdCard
                | CapabilityId::ExternalPower
                | CapabilityId::PowerSavingMode
                | CapabilityId::DarkTheme
        )
    }

    /// Stable machine-readable name, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            CapabilityId::Accelerometer => "accelerometer",
            CapabilityId::Compass => "compass",
            CapabilityId::Gyroscope => "gyroscope",
            CapabilityId::Inclinometer => "inclinometer",
            CapabilityId::OrientationSensor => "orientation_sensor",
            CapabilityId::ProximitySensor => "proximity_sensor",
            CapabilityId::MotionApi => "motion_api",
            CapabilityId::SensorCoreActivityMonitor => "sensor_core_activity_monitor",
            CapabilityId::SensorCorePlaceMonitor => "sensor_core_place_monitor",
            CapabilityId::SensorCoreStepCounter => "sensor_core_step_counter",
            CapabilityId::SensorCoreTrackPointMonitor => "sensor_core_track_point_monitor",
            CapabilityId::FmRadio => "fm_radio",
            CapabilityId::VibrationDevice => "vibration_device",
            CapabilityId::BackCamera => "back_camera",
            CapabilityId::FrontCamera => "front_camera",
            CapabilityId::BackCameraFlash => "back_camera_flash",
            CapabilityId::FrontCameraFlash => "front_camera_flash",
            CapabilityId::BackCameraAutoFocus => "back_camera_auto_focus",
            CapabilityId::FrontCameraAutoFocus => "front_camera_auto_focus",
            CapabilityId::BatteryStatus => "battery_status",
            CapabilityId::SdCard => "sd_card",
            CapabilityId::ExternalPower => "external_power",
            CapabilityId::PowerSavingMode => "power_saving_mode",
            CapabilityId::DarkTheme => "dark_theme",
        }
    }
}

impl std::fmt::Display for CapabilityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
