//! End-to-end resolver scenarios against a scripted platform

use std::sync::Arc;
use std::time::Duration;

use devcaps_core::{
    AccentColor, CapabilityId, CaptureResolution, FocusOverrides, ScreenCategory,
};
use devcaps_platform::{
    CameraDescriptor, CameraInventory, DeviceIdentity, Failure, MemoryStatus, PowerStatus,
    ScreenMetrics, SensorCoreSupport, SensorKind, Service, StaticPlatform, ThemeInfo,
};
use devcaps_resolver::{CapabilityResolver, PassKind, ResolverEvent};

fn phone_platform() -> StaticPlatform {
    StaticPlatform::new()
        .with_identity(DeviceIdentity {
            device_name: Some("Lumia 925 (RM-892)".to_string()),
            manufacturer: Some("NOKIA".to_string()),
            hardware_version: Some("1.0".to_string()),
            firmware_version: Some("3047.0000.1326.2001".to_string()),
        })
        .with_operator("Example Mobile")
        .with_cameras(CameraInventory {
            back: Some(CameraDescriptor {
                flash: true,
                auto_focus: true,
                photo_resolutions: vec![
                    CaptureResolution::new(640, 480),
                    CaptureResolution::new(3552, 2448),
                    CaptureResolution::new(1280, 720),
                ],
                video_resolutions: vec![
                    CaptureResolution::new(1280, 720),
                    CaptureResolution::new(1920, 1080),
                ],
            }),
            front: Some(CameraDescriptor {
                flash: false,
                auto_focus: false,
                photo_resolutions: vec![CaptureResolution::new(1280, 960)],
                video_resolutions: vec![CaptureResolution::new(1280, 720)],
            }),
        })
        .with_sensor(SensorKind::Accelerometer, true)
        .with_sensor(SensorKind::Compass, true)
        .with_sensor(SensorKind::Gyroscope, true)
        .with_sensor(SensorKind::Proximity, true)
        .with_motion_api(true)
        .with_sensor_core(SensorCoreSupport {
            activity_monitor: true,
            place_monitor: true,
            step_counter: true,
            track_point_monitor: false,
        })
        .with_memory(MemoryStatus {
            usage_bytes: 52_428_800,
            limit_bytes: 188_743_680,
            peak_bytes: 60_817_408,
        })
        .with_screen(ScreenMetrics {
            width: 768,
            height: 1280,
            dpi_x: 331.3,
            dpi_y: 331.3,
        })
        .with_power(PowerStatus {
            has_battery: true,
            charge_percent: Some(73),
            on_external_power: false,
            power_saving_mode: false,
        })
        .with_sd_card(false)
        .with_fm_radio(true)
        .with_vibration(true)
        .with_core_count(2)
        .with_theme(ThemeInfo {
            dark: true,
            accent_color: Some(AccentColor { r: 0, g: 120, b: 215 }),
        })
}

fn resolver_with(platform: Arc<StaticPlatform>) -> CapabilityResolver {
    CapabilityResolver::new(platform, FocusOverrides::default())
}

#[tokio::test]
async fn test_full_pass_populates_snapshot() {
    let platform = Arc::new(phone_platform());
    let resolver = resolver_with(platform);

    let snapshot = resolver.resolve_and_wait().await;

    assert!(snapshot.ready);
    assert!(snapshot.resolved_at.is_some());
    assert_eq!(snapshot.device_name.as_deref(), Some("Lumia 925 (RM-892)"));
    assert_eq!(snapshot.manufacturer.as_deref(), Some("NOKIA"));
    assert_eq!(snapshot.operator.as_deref(), Some("Example Mobile"));

    assert!(snapshot.capability(CapabilityId::Accelerometer));
    assert!(snapshot.capability(CapabilityId::Gyroscope));
    assert!(!snapshot.capability(CapabilityId::Inclinometer));
    assert!(snapshot.capability(CapabilityId::MotionApi));
    assert!(snapshot.capability(CapabilityId::SensorCoreActivityMonitor));
    assert!(snapshot.capability(CapabilityId::SensorCoreStepCounter));
    assert!(!snapshot.capability(CapabilityId::SensorCoreTrackPointMonitor));
    assert!(snapshot.capability(CapabilityId::FmRadio));
    assert!(snapshot.capability(CapabilityId::VibrationDevice));
    assert!(snapshot.capability(CapabilityId::BatteryStatus));
    assert!(!snapshot.capability(CapabilityId::SdCard));
    assert!(snapshot.capability(CapabilityId::DarkTheme));

    assert_eq!(snapshot.battery_charge_percent, Some(73));
    assert_eq!(snapshot.processor_core_count, 2);
    assert_eq!(snapshot.memory_limit_bytes, 188_743_680);
    assert_eq!(snapshot.screen_category, ScreenCategory::Wxga);
    assert_eq!(snapshot.display_diagonal_inches, Some(4.5));

    // Capture resolutions land sorted by pixel count, descending.
    assert_eq!(
        snapshot.back_camera_photo_resolutions,
        vec![
            CaptureResolution::new(3552, 2448),
            CaptureResolution::new(1280, 720),
            CaptureResolution::new(640, 480),
        ]
    );
    assert_eq!(
        snapshot.back_camera_video_resolutions,
        vec![
            CaptureResolution::new(1920, 1080),
            CaptureResolution::new(1280, 720),
        ]
    );
}

#[tokio::test]
async fn test_failing_probes_default_and_still_ready() {
    let platform = Arc::new(
        phone_platform()
            .failing(Service::Cameras, Failure::Unsupported)
            .failing(Service::Power, Failure::PermissionDenied)
            .failing(Service::FmRadio, Failure::Disabled("radio off".into())),
    );
    let resolver = resolver_with(platform);
    let mut events = resolver.subscribe();

    let snapshot = resolver.resolve_and_wait().await;

    assert!(snapshot.ready);
    assert!(!snapshot.has_back_camera);
    assert!(snapshot.back_camera_photo_resolutions.is_empty());
    assert!(!snapshot.has_battery_status);
    assert_eq!(snapshot.battery_charge_percent, None);
    assert!(!snapshot.has_fm_radio);
    // Unaffected probes still landed.
    assert!(snapshot.has_gyroscope);
    assert_eq!(snapshot.processor_core_count, 2);

    let mut completed = None;
    while let Ok(event) = events.try_recv() {
        if let ResolverEvent::PassCompleted { kind, probes, failures } = event {
            completed = Some((kind, probes, failures));
        }
    }
    let (kind, probes, failures) = completed.expect("pass completed event");
    assert_eq!(kind, PassKind::Full);
    assert_eq!(failures, 3);
    // identity + 5 dynamic + cameras + 6 sensors + motion api +
    // sensor core + screen + radio + vibration + core count
    assert_eq!(probes, 19);
}

#[tokio::test]
async fn test_ready_fires_exactly_once_per_pass() {
    let platform = Arc::new(phone_platform());
    let resolver = resolver_with(platform);
    let mut events = resolver.subscribe();

    resolver.resolve_and_wait().await;

    let mut ready_true = 0;
    let mut saw_completed = false;
    while let Ok(event) = events.try_recv() {
        match event {
            ResolverEvent::ReadyChanged(true) => ready_true += 1,
            ResolverEvent::ReadyChanged(false) => {
                panic!("first pass must not announce ready=false")
            }
            ResolverEvent::PassCompleted { .. } => saw_completed = true,
            ResolverEvent::PassStarted { .. } => {}
        }
    }
    assert_eq!(ready_true, 1);
    assert!(saw_completed);
}

#[tokio::test]
async fn test_ready_waits_for_slowest_probe() {
    let platform = Arc::new(phone_platform());
    let gate = platform.gate(Service::SdCard);
    let resolver = resolver_with(platform.clone());

    resolver.resolve().await;

    // Give the fast probes ample time to finish; the gated one holds the
    // pass open.
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(!resolver.ready());
    assert_eq!(platform.calls(Service::Memory), 1);
    assert_eq!(platform.calls(Service::SdCard), 0);

    gate.notify_one();
    resolver.wait_ready().await;
    assert!(resolver.ready());
    assert_eq!(platform.calls(Service::SdCard), 1);
}

#[tokio::test]
async fn test_refresh_reprobes_only_dynamic_subset() {
    let platform = Arc::new(phone_platform());
    let resolver = resolver_with(platform.clone());

    let first = resolver.resolve_and_wait().await;
    assert!(!first.has_sd_card);
    assert_eq!(platform.calls(Service::Identity), 1);
    assert_eq!(platform.calls(Service::Cameras), 1);
    assert_eq!(platform.calls(Service::Sensors), 6);
    assert_eq!(platform.calls(Service::MotionApi), 1);
    assert_eq!(platform.calls(Service::SensorCore), 1);
    assert_eq!(platform.calls(Service::Screen), 1);
    assert_eq!(platform.calls(Service::CoreCount), 1);

    // The world changes between passes.
    platform.set_sd_card(true);
    platform.set_memory(MemoryStatus {
        usage_bytes: 80_000_000,
        limit_bytes: 188_743_680,
        peak_bytes: 90_000_000,
    });

    let second = resolver.resolve_and_wait().await;

    // Dynamic fields were re-resolved.
    assert!(second.has_sd_card);
    assert_eq!(second.memory_usage_bytes, 80_000_000);
    assert_eq!(platform.calls(Service::Memory), 2);
    assert_eq!(platform.calls(Service::Power), 2);
    assert_eq!(platform.calls(Service::SdCard), 2);
    assert_eq!(platform.calls(Service::Theme), 2);
    assert_eq!(platform.calls(Service::Operator), 2);

    // Static probes did not run again and their fields are retained.
    assert_eq!(platform.calls(Service::Identity), 1);
    assert_eq!(platform.calls(Service::Cameras), 1);
    assert_eq!(platform.calls(Service::Sensors), 6);
    assert_eq!(platform.calls(Service::MotionApi), 1);
    assert_eq!(platform.calls(Service::SensorCore), 1);
    assert_eq!(platform.calls(Service::Screen), 1);
    assert_eq!(platform.calls(Service::CoreCount), 1);
    assert_eq!(second.device_name, first.device_name);
    assert!(second.has_gyroscope);
    assert!(second.motion_api_supported);
    assert!(second.sensor_core_step_counter_supported);
    assert_eq!(
        second.back_camera_photo_resolutions,
        first.back_camera_photo_resolutions
    );
}

#[tokio::test]
async fn test_refresh_dispatch_drops_both_ready_flags() {
    let platform = Arc::new(phone_platform());
    let gate = platform.gate(Service::Memory);
    let resolver = resolver_with(platform.clone());

    gate.notify_one();
    resolver.resolve_and_wait().await;

    // Refresh dispatched but held open by the gated probe: the atomic flag
    // and the snapshot's own flag must agree.
    resolver.resolve().await;
    assert!(!resolver.ready());
    assert!(!resolver.snapshot().await.ready);

    gate.notify_one();
    resolver.wait_ready().await;
    assert!(resolver.ready());
    assert!(resolver.snapshot().await.ready);
}

#[tokio::test]
async fn test_refresh_announces_ready_flip_both_ways() {
    let platform = Arc::new(phone_platform());
    let resolver = resolver_with(platform);

    resolver.resolve_and_wait().await;

    let mut events = resolver.subscribe();
    resolver.resolve_and_wait().await;

    let mut sequence = Vec::new();
    while let Ok(event) = events.try_recv() {
        if let ResolverEvent::ReadyChanged(ready) = event {
            sequence.push(ready);
        }
    }
    assert_eq!(sequence, vec![false, true]);
}

#[tokio::test]
async fn test_auto_focus_correction_applies_after_identity() {
    // The camera service misreports focus support for this model.
    let platform = Arc::new(
        StaticPlatform::new()
            .with_device_name("NOKIA 909 (RM-875)")
            .with_back_camera(CameraDescriptor {
                flash: true,
                auto_focus: false,
                photo_resolutions: vec![CaptureResolution::new(7712, 5360)],
                video_resolutions: vec![CaptureResolution::new(1920, 1080)],
            }),
    );
    // Hold the camera probe back so identity clearly lands first.
    let gate = platform.gate(Service::Cameras);
    let resolver = resolver_with(platform.clone());

    resolver.resolve().await;
    assert_eq!(platform.calls(Service::Identity), 1);

    gate.notify_one();
    let snapshot = resolver.resolve_and_wait().await;

    assert!(snapshot.has_back_camera);
    assert!(snapshot.capability(CapabilityId::BackCameraAutoFocus));
}

#[tokio::test]
async fn test_no_correction_for_unlisted_model() {
    let platform = Arc::new(
        StaticPlatform::new()
            .with_device_name("NOKIA RM-999")
            .with_back_camera(CameraDescriptor {
                flash: false,
                auto_focus: false,
                photo_resolutions: vec![],
                video_resolutions: vec![],
            }),
    );
    let resolver = resolver_with(platform);
    let snapshot = resolver.resolve_and_wait().await;
    assert!(snapshot.has_back_camera);
    assert!(!snapshot.capability(CapabilityId::BackCameraAutoFocus));
}

#[tokio::test]
async fn test_resolve_while_resolving_is_ignored() {
    let platform = Arc::new(phone_platform());
    let gate = platform.gate(Service::Memory);
    let resolver = resolver_with(platform.clone());

    resolver.resolve().await;
    // A second dispatch while the pass is outstanding must not run
    // anything again.
    resolver.resolve().await;
    resolver.resolve().await;

    gate.notify_one();
    resolver.wait_ready().await;

    assert_eq!(platform.calls(Service::Identity), 1);
    assert_eq!(platform.calls(Service::Cameras), 1);
    assert_eq!(platform.calls(Service::Memory), 1);
}

#[tokio::test]
async fn test_custom_override_table() {
    let platform = Arc::new(
        StaticPlatform::new()
            .with_device_name("Vendor X1-200")
            .with_back_camera(CameraDescriptor::default()),
    );
    let resolver =
        CapabilityResolver::new(platform, FocusOverrides::from_models(["X1-200"]));
    let snapshot = resolver.resolve_and_wait().await;
    assert!(snapshot.capability(CapabilityId::BackCameraAutoFocus));
}

#[tokio::test]
async fn test_resolve_detached_completes() {
    let platform = Arc::new(phone_platform());
    let resolver = resolver_with(platform);

    resolver.resolve_detached();
    resolver.wait_ready().await;
    assert!(resolver.snapshot().await.ready);
}
