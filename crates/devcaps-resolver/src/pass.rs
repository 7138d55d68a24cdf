//! Pass planning: which probes run, and how results land in the snapshot

use std::sync::Arc;

use devcaps_core::{display_diagonal_inches, sort_resolutions, ProbeError, ScreenCategory, Snapshot};
use devcaps_platform::{
    CameraInventory, MemoryStatus, Platform, PowerStatus, ScreenMetrics, SensorCoreSupport,
    SensorKind, ThemeInfo,
};
use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;
use tracing::debug;

/// The two resolution pass types. A full pass probes everything; a refresh
/// pass re-probes only the dynamic subset (memory, power, storage,
/// operator, theme).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PassKind {
    Full,
    Refresh,
}

/// Outcome of one probe. `None` payloads mean the probe failed and its
/// fields take their defaults; the probe still counts as complete.
#[derive(Debug)]
pub(crate) enum ProbeReport {
    Cameras(Option<CameraInventory>),
    Sensor(SensorKind, Option<bool>),
    MotionApi(Option<bool>),
    SensorCore(Option<SensorCoreSupport>),
    Memory(Option<MemoryStatus>),
    Screen(Option<ScreenMetrics>),
    Power(Option<PowerStatus>),
    SdCard(Option<bool>),
    FmRadio(Option<bool>),
    Vibration(Option<bool>),
    CoreCount(Option<u32>),
    Theme(Option<ThemeInfo>),
    /// Outer None: the probe failed. Inner None: no operator reported.
    Operator(Option<Option<String>>),
}

impl ProbeReport {
    pub(crate) fn is_failure(&self) -> bool {
        match self {
            ProbeReport::Cameras(r) => r.is_none(),
            ProbeReport::Sensor(_, r) => r.is_none(),
            ProbeReport::MotionApi(r) => r.is_none(),
            ProbeReport::SensorCore(r) => r.is_none(),
            ProbeReport::Memory(r) => r.is_none(),
            ProbeReport::Screen(r) => r.is_none(),
            ProbeReport::Power(r) => r.is_none(),
            ProbeReport::SdCard(r) => r.is_none(),
            ProbeReport::FmRadio(r) => r.is_none(),
            ProbeReport::Vibration(r) => r.is_none(),
            ProbeReport::CoreCount(r) => r.is_none(),
            ProbeReport::Theme(r) => r.is_none(),
            ProbeReport::Operator(r) => r.is_none(),
        }
    }
}

/// Degrade a probe result to `None` on failure, logging the cause. Absence
/// of a capability is expected and logged as such.
pub(crate) fn observe<T>(probe: &'static str, result: Result<T, ProbeError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) if e.is_absence() => {
            debug!(probe, reason = %e, "capability absent");
            None
        }
        Err(e) => {
            debug!(probe, error = %e, "probe failed, fields keep defaults");
            None
        }
    }
}

/// Spawn every probe for the given pass kind into the task set. The number
/// of outstanding probes is the size of the set; completion accounting
/// happens by joining it, so adding a probe here needs no counter update.
pub(crate) fn spawn_probes(
    kind: PassKind,
    platform: &Arc<dyn Platform>,
    tasks: &mut JoinSet<ProbeReport>,
) {
    // Dynamic subset, dispatched on every pass.
    let p = platform.clone();
    tasks.spawn(async move { ProbeReport::Memory(observe("memory", p.memory_status().await)) });

    let p = platform.clone();
    tasks.spawn(async move { ProbeReport::Power(observe("power", p.power_status().await)) });

    let p = platform.clone();
    tasks.spawn(async move { ProbeReport::SdCard(observe("sd_card", p.sd_card_present().await)) });

    let p = platform.clone();
    tasks.spawn(async move { ProbeReport::Theme(observe("theme", p.ui_theme().await)) });

    let p = platform.clone();
    tasks
        .spawn(async move { ProbeReport::Operator(observe("operator", p.operator_name().await)) });

    if kind == PassKind::Refresh {
        return;
    }

    // Static capabilities, probed once per process.
    let p = platform.clone();
    tasks
        .spawn(async move { ProbeReport::Cameras(observe("cameras", p.enumerate_cameras().await)) });

    for sensor in SensorKind::ALL {
        let p = platform.clone();
        let sensor = *sensor;
        tasks.spawn(async move {
            ProbeReport::Sensor(sensor, observe("sensor", p.sensor_present(sensor).await))
        });
    }

    let p = platform.clone();
    tasks.spawn(async move {
        ProbeReport::MotionApi(observe("motion_api", p.motion_api_available().await))
    });

    let p = platform.clone();
    tasks.spawn(async move {
        ProbeReport::SensorCore(observe("sensor_core", p.sensor_core_support().await))
    });

    let p = platform.clone();
    tasks.spawn(async move { ProbeReport::Screen(observe("screen", p.screen_metrics().await)) });

    let p = platform.clone();
    tasks.spawn(async move {
        ProbeReport::FmRadio(observe("fm_radio", p.fm_radio_available().await))
    });

    let p = platform.clone();
    tasks.spawn(async move {
        ProbeReport::Vibration(observe("vibration", p.vibration_device_present().await))
    });

    let p = platform.clone();
    tasks.spawn(async move {
        ProbeReport::CoreCount(observe("core_count", p.processor_core_count().await))
    });
}

/// Write a probe's outcome into the snapshot. Each report touches a
/// disjoint set of fields; failed probes write the fields' defaults.
pub(crate) fn merge(snapshot: &mut Snapshot, report: ProbeReport) {
    match report {
        ProbeReport::Cameras(inventory) => {
            let inventory = inventory.unwrap_or_default();

            snapshot.has_back_camera = false;
            snapshot.has_front_camera = false;
            snapshot.has_back_camera_flash = false;
            snapshot.has_front_camera_flash = false;
            snapshot.has_back_camera_auto_focus = false;
            snapshot.has_front_camera_auto_focus = false;
            snapshot.back_camera_photo_resolutions = Vec::new();
            snapshot.back_camera_video_resolutions = Vec::new();
            snapshot.front_camera_photo_resolutions = Vec::new();
            snapshot.front_camera_video_resolutions = Vec::new();

            if let Some(back) = inventory.back {
                snapshot.has_back_camera = true;
                snapshot.has_back_camera_flash = back.flash;
                snapshot.has_back_camera_auto_focus = back.auto_focus;
                snapshot.back_camera_photo_resolutions = back.photo_resolutions;
                snapshot.back_camera_video_resolutions = back.video_resolutions;
                sort_resolutions(&mut snapshot.back_camera_photo_resolutions);
                sort_resolutions(&mut snapshot.back_camera_video_resolutions);
            }
            if let Some(front) = inventory.front {
                snapshot.has_front_camera = true;
                snapshot.has_front_camera_flash = front.flash;
                snapshot.has_front_camera_auto_focus = front.auto_focus;
                snapshot.front_camera_photo_resolutions = front.photo_resolutions;
                snapshot.front_camera_video_resolutions = front.video_resolutions;
                sort_resolutions(&mut snapshot.front_camera_photo_resolutions);
                sort_resolutions(&mut snapshot.front_camera_video_resolutions);
            }
        }
        ProbeReport::Sensor(kind, present) => {
            let present = present.unwrap_or(false);
            match kind {
                SensorKind::Accelerometer => snapshot.has_accelerometer = present,
                SensorKind::Compass => snapshot.has_compass = present,
                SensorKind::Gyroscope => snapshot.has_gyroscope = present,
                SensorKind::Inclinometer => snapshot.has_inclinometer = present,
                SensorKind::Orientation => snapshot.has_orientation_sensor = present,
                SensorKind::Proximity => snapshot.has_proximity_sensor = present,
            }
        }
        ProbeReport::MotionApi(available) => {
            snapshot.motion_api_supported = available.unwrap_or(false);
        }
        ProbeReport::SensorCore(support) => {
            let support = support.unwrap_or_default();
            snapshot.sensor_core_activity_monitor_supported = support.activity_monitor;
            snapshot.sensor_core_place_monitor_supported = support.place_monitor;
            snapshot.sensor_core_step_counter_supported = support.step_counter;
            snapshot.sensor_core_track_point_monitor_supported = support.track_point_monitor;
        }
        ProbeReport::Memory(memory) => {
            let memory = memory.unwrap_or_default();
            snapshot.memory_usage_bytes = memory.usage_bytes;
            snapshot.memory_limit_bytes = memory.limit_bytes;
            snapshot.memory_peak_bytes = memory.peak_bytes;
        }
        ProbeReport::Screen(metrics) => {
            let metrics = metrics.unwrap_or_default();
            snapshot.screen_width = metrics.width;
            snapshot.screen_height = metrics.height;
            snapshot.raw_dpi_x = metrics.dpi_x;
            snapshot.raw_dpi_y = metrics.dpi_y;
            snapshot.screen_category = ScreenCategory::from_pixels(metrics.width, metrics.height);
            snapshot.display_diagonal_inches =
                display_diagonal_inches(metrics.width, metrics.height, metrics.dpi_x, metrics.dpi_y);
        }
        ProbeReport::Power(power) => {
            let power = power.unwrap_or_default();
            snapshot.has_battery_status = power.has_battery;
            snapshot.battery_charge_percent = power.charge_percent;
            snapshot.on_external_power = power.on_external_power;
            snapshot.power_saving_mode = power.power_saving_mode;
        }
        ProbeReport::SdCard(present) => {
            snapshot.has_sd_card = present.unwrap_or(false);
        }
        ProbeReport::FmRadio(available) => {
            snapshot.has_fm_radio = available.unwrap_or(false);
        }
        ProbeReport::Vibration(present) => {
            snapshot.has_vibration_device = present.unwrap_or(false);
        }
        ProbeReport::CoreCount(count) => {
            snapshot.processor_core_count = count.unwrap_or(0);
        }
        ProbeReport::Theme(theme) => {
            let theme = theme.unwrap_or_default();
            snapshot.dark_theme = theme.dark;
            snapshot.accent_color = theme.accent_color;
        }
        ProbeReport::Operator(operator) => {
            snapshot.operator = operator.flatten();
        }
    }
}
