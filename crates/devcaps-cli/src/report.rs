//! Snapshot rendering
//!
//! Maps stable capability identifiers to display labels at render time;
//! nothing upstream ever keys on these strings.

use devcaps_core::{CapabilityId, CaptureResolution, Snapshot};

/// Human-readable label for a capability flag.
fn label(id: CapabilityId) -> &'static str {
    match id {
        CapabilityId::Accelerometer => "Accelerometer",
        CapabilityId::Compass => "Compass",
        CapabilityId::Gyroscope => "Gyroscope",
        CapabilityId::Inclinometer => "Inclinometer",
        CapabilityId::OrientationSensor => "Orientation sensor",
        CapabilityId::ProximitySensor => "Proximity (NFC)",
        CapabilityId::MotionApi => "Motion API",
        CapabilityId::SensorCoreActivityMonitor => "SensorCore: activity monitor",
        CapabilityId::SensorCorePlaceMonitor => "SensorCore: place monitor",
        CapabilityId::SensorCoreStepCounter => "SensorCore: step counter",
        CapabilityId::SensorCoreTrackPointMonitor => "SensorCore: track point monitor",
        CapabilityId::FmRadio => "FM radio",
        CapabilityId::VibrationDevice => "Vibration device",
        CapabilityId::BackCamera => "Back camera",
        CapabilityId::FrontCamera => "Front camera",
        CapabilityId::BackCameraFlash => "Back camera flash",
        CapabilityId::FrontCameraFlash => "Front camera flash",
        CapabilityId::BackCameraAutoFocus => "Back camera auto focus",
        CapabilityId::FrontCameraAutoFocus => "Front camera auto focus",
        CapabilityId::BatteryStatus => "Battery status info",
        CapabilityId::SdCard => "SD card present",
        CapabilityId::ExternalPower => "External power",
        CapabilityId::PowerSavingMode => "Power saving mode",
        CapabilityId::DarkTheme => "Dark theme",
    }
}

/// Bytes as megabytes with one decimal.
fn format_megabytes(bytes: u64) -> String {
    let mb = bytes as f64 / (1024.0 * 1024.0);
    format!("{:.1} MB", (mb * 10.0).round() / 10.0)
}

fn format_resolutions(resolutions: &[CaptureResolution]) -> String {
    if resolutions.is_empty() {
        return "not available".to_string();
    }
    resolutions
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render the snapshot as a text report.
pub fn render_text(snapshot: &Snapshot) -> String {
    let mut out = String::new();
    let na = || "not available".to_string();

    out.push_str("Device\n");
    out.push_str(&format!(
        "  Name:              {}\n",
        snapshot.device_name.clone().unwrap_or_else(na)
    ));
    out.push_str(&format!(
        "  Manufacturer:      {}\n",
        snapshot.manufacturer.clone().unwrap_or_else(na)
    ));
    out.push_str(&format!(
        "  Hardware version:  {}\n",
        snapshot.hardware_version.clone().unwrap_or_else(na)
    ));
    out.push_str(&format!(
        "  Firmware version:  {}\n",
        snapshot.firmware_version.clone().unwrap_or_else(na)
    ));
    out.push_str(&format!(
        "  Operator:          {}\n",
        snapshot.operator.clone().unwrap_or_else(na)
    ));
    out.push_str(&format!(
        "  Processor cores:   {}\n",
        snapshot.processor_core_count
    ));

    out.push_str("\nCapabilities\n");
    for id in CapabilityId::ALL {
        let mark = if snapshot.capability(*id) { "yes" } else { "no" };
        out.push_str(&format!("  {:<24} {}\n", label(*id), mark));
    }

    out.push_str("\nScreen\n");
    out.push_str(&format!(
        "  Resolution:        {} ({}x{})\n",
        snapshot.screen_category, snapshot.screen_width, snapshot.screen_height
    ));
    match snapshot.display_diagonal_inches {
        Some(inches) => out.push_str(&format!("  Display size:      {inches} inches\n")),
        None => out.push_str("  Display size:      not available\n"),
    }

    out.push_str("\nMemory\n");
    out.push_str(&format!(
        "  Usage:             {}\n",
        format_megabytes(snapshot.memory_usage_bytes)
    ));
    out.push_str(&format!(
        "  Peak:              {}\n",
        format_megabytes(snapshot.memory_peak_bytes)
    ));
    out.push_str(&format!(
        "  Limit:             {}\n",
        format_megabytes(snapshot.memory_limit_bytes)
    ));

    out.push_str("\nPower\n");
    match snapshot.battery_charge_percent {
        Some(percent) => out.push_str(&format!("  Battery charge:    {percent}%\n")),
        None => out.push_str("  Battery charge:    not available\n"),
    }

    out.push_str("\nCameras\n");
    out.push_str(&format!(
        "  Back photo:        {}\n",
        format_resolutions(&snapshot.back_camera_photo_resolutions)
    ));
    out.push_str(&format!(
        "  Back video:        {}\n",
        format_resolutions(&snapshot.back_camera_video_resolutions)
    ));
    out.push_str(&format!(
        "  Front photo:       {}\n",
        format_resolutions(&snapshot.front_camera_photo_resolutions)
    ));
    out.push_str(&format!(
        "  Front video:       {}\n",
        format_resolutions(&snapshot.front_camera_video_resolutions)
    ));

    if let Some(accent) = snapshot.accent_color {
        out.push_str(&format!("\nTheme accent:        {accent}\n"));
    }

    out
}

/// Render the snapshot as pretty-printed JSON.
pub fn render_json(snapshot: &Snapshot) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}
