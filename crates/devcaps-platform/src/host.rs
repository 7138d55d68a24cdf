//! Host-backed platform services
//!
//! Answers the services a desktop or embedded Linux host can actually
//! provide: memory accounting, core count, removable storage, DMI identity,
//! and battery state. Mobile-only services (cameras, sensors, screen, radio,
//! vibration, theme, operator) report [`ProbeError::Unsupported`].

use std::sync::Mutex;

use async_trait::async_trait;
use devcaps_core::ProbeError;
use sysinfo::{Disks, ProcessesToUpdate, System};
use tracing::debug;

use crate::types::{
    CameraInventory, DeviceIdentity, MemoryStatus, PowerStatus, ScreenMetrics, SensorCoreSupport,
    SensorKind, ThemeInfo,
};
use crate::Platform;

/// Platform implementation backed by the local machine.
pub struct HostPlatform {
    sys: Mutex<System>,
}

impl HostPlatform {
    pub fn new() -> Self {
        let mut sys = System::new_all();
        sys.refresh_all();
        Self { sys: Mutex::new(sys) }
    }
}

impl Default for HostPlatform {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Platform for HostPlatform {
    async fn device_identity(&self) -> Result<DeviceIdentity, ProbeError> {
        let mut identity = DeviceIdentity {
            device_name: read_dmi("product_name"),
            manufacturer: read_dmi("sys_vendor"),
            hardware_version: read_dmi("product_version"),
            firmware_version: read_dmi("bios_version"),
        };
        if identity.device_name.is_none() {
            identity.device_name = System::host_name();
        }
        if identity.firmware_version.is_none() {
            identity.firmware_version = System::kernel_version();
        }
        Ok(identity)
    }

    async fn operator_name(&self) -> Result<Option<String>, ProbeError> {
        Err(ProbeError::Unsupported)
    }

    async fn enumerate_cameras(&self) -> Result<CameraInventory, ProbeError> {
        Err(ProbeError::Unsupported)
    }

    async fn sensor_present(&self, _kind: SensorKind) -> Result<bool, ProbeError> {
        Err(ProbeError::Unsupported)
    }

    async fn motion_api_available(&self) -> Result<bool, ProbeError> {
        Err(ProbeError::Unsupported)
    }

    async fn sensor_core_support(&self) -> Result<SensorCoreSupport, ProbeError> {
        Err(ProbeError::Unsupported)
    }

    async fn memory_status(&self) -> Result<MemoryStatus, ProbeError> {
        let pid = sysinfo::get_current_pid().map_err(|e| ProbeError::Other(e.to_string()))?;
        let mut sys = self.sys.lock().expect("sysinfo lock poisoned");
        sys.refresh_memory();
        sys.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);

        let usage_bytes = sys.process(pid).map(|p| p.memory()).unwrap_or(0);
        let limit_bytes = sys.total_memory();
        let peak_bytes = read_peak_memory().unwrap_or(usage_bytes);

        Ok(MemoryStatus {
            usage_bytes,
            limit_bytes,
            peak_bytes,
        })
    }

    async fn screen_metrics(&self) -> Result<ScreenMetrics, ProbeError> {
        Err(ProbeError::Unsupported)
    }

    async fn power_status(&self) -> Result<PowerStatus, ProbeError> {
        read_power_supplies().ok_or(ProbeError::Unsupported)
    }

    async fn sd_card_present(&self) -> Result<bool, ProbeError> {
        let disks = Disks::new_with_refreshed_list();
        let removable = disks.iter().any(|d| d.is_removable());
        debug!(disks = disks.len(), removable, "enumerated storage volumes");
        Ok(removable)
    }

    async fn fm_radio_available(&self) -> Result<bool, ProbeError> {
        Err(ProbeError::Unsupported)
    }

    async fn vibration_device_present(&self) -> Result<bool, ProbeError> {
        Err(ProbeError::Unsupported)
    }

    async fn processor_core_count(&self) -> Result<u32, ProbeError> {
        let sys = self.sys.lock().expect("sysinfo lock poisoned");
        Ok(sys.cpus().len() as u32)
    }

    async fn ui_theme(&self) -> Result<ThemeInfo, ProbeError> {
        Err(ProbeError::Unsupported)
    }
}

/// Read a DMI identity field, trimmed. None off Linux or when unreadable.
fn read_dmi(field: &str) -> Option<String> {
    read_trimmed(format!("/sys/class/dmi/id/{field}"))
}

fn read_trimmed(path: impl AsRef<std::path::Path>) -> Option<String> {
    let content = std::fs::read_to_string(path).ok()?;
    let trimmed = content.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Peak resident set size of this process in bytes, from /proc.
fn read_peak_memory() -> Option<u64> {
    let status = std::fs::read_to_string("/proc/self/status").ok()?;
    for line in status.lines() {
        if let Some(rest) = line.strip_prefix("VmHWM:") {
            let kb: u64 = rest.trim().trim_end_matches("kB").trim().parse().ok()?;
            return Some(kb * 1024);
        }
    }
    None
}

/// Scan /sys/class/power_supply for battery and mains state. None when the
/// directory is absent (containers, non-Linux hosts).
fn read_power_supplies() -> Option<PowerStatus> {
    let entries = std::fs::read_dir("/sys/class/power_supply").ok()?;
    let mut status = PowerStatus::default();
    let mut saw_any = false;

    for entry in entries.flatten() {
        let path = entry.path();
        let Some(kind) = read_trimmed(path.join("type")) else {
            continue;
        };
        saw_any = true;
        match kind.as_str() {
            "Battery" => {
                status.has_battery = true;
                if let Some(capacity) = read_trimmed(path.join("capacity")) {
                    if let Ok(percent) = capacity.parse::<u8>() {
                        status.charge_percent = Some(percent.min(100));
                    }
                }
            }
            "Mains" | "USB" => {
                if let Some(online) = read_trimmed(path.join("online")) {
                    if online == "1" {
                        status.on_external_power = true;
                    }
                }
            }
            _ => {}
        }
    }

    if saw_any {
        Some(status)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_status_reports_nonzero() {
        let platform = HostPlatform::new();
        let memory = platform.memory_status().await.unwrap();
        assert!(memory.usage_bytes > 0);
        assert!(memory.limit_bytes > memory.usage_bytes);
        assert!(memory.peak_bytes >= memory.usage_bytes);
    }

    #[tokio::test]
    async fn test_core_count_positive() {
        let platform = HostPlatform::new();
        assert!(platform.processor_core_count().await.unwrap() > 0);
    }

    #[tokio::test]
    async fn test_mobile_services_unsupported() {
        let platform = HostPlatform::new();
        assert!(matches!(
            platform.enumerate_cameras().await,
            Err(ProbeError::Unsupported)
        ));
        assert!(matches!(
            platform.sensor_present(SensorKind::Gyroscope).await,
            Err(ProbeError::Unsupported)
        ));
        assert!(matches!(
            platform.motion_api_available().await,
            Err(ProbeError::Unsupported)
        ));
        assert!(matches!(
            platform.sensor_core_support().await,
            Err(ProbeError::Unsupported)
        ));
        assert!(matches!(
            platform.fm_radio_available().await,
            Err(ProbeError::Unsupported)
        ));
        assert!(matches!(
            platform.ui_theme().await,
            Err(ProbeError::Unsupported)
        ));
    }

    #[tokio::test]
    async fn test_sd_card_probe_does_not_fail() {
        let platform = HostPlatform::new();
        // Presence depends on the machine; the probe itself must succeed.
        platform.sd_card_present().await.unwrap();
    }

    #[test]
    fn test_read_trimmed_missing_path() {
        assert_eq!(read_trimmed("/nonexistent/devcaps/test"), None);
    }

    #[test]
    fn test_read_trimmed_strips_whitespace() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("value");
        std::fs::write(&path, "  LENOVO \n").unwrap();
        assert_eq!(read_trimmed(&path), Some("LENOVO".to_string()));
    }
}
