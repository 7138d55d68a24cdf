//! Scripted platform backend
//!
//! Serves pre-configured responses for every service, with per-service
//! call counting, failure injection, and completion gating. Used by the
//! resolver tests and anywhere a deterministic platform is needed.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use devcaps_core::ProbeError;
use tokio::sync::Notify;

use crate::types::{
    CameraDescriptor, CameraInventory, DeviceIdentity, MemoryStatus, PowerStatus, ScreenMetrics,
    SensorCoreSupport, SensorKind, ThemeInfo,
};
use crate::Platform;

/// One platform service, for call accounting and failure injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    Identity,
    Operator,
    Cameras,
    Sensors,
    MotionApi,
    SensorCore,
    Memory,
    Screen,
    Power,
    SdCard,
    FmRadio,
    Vibration,
    CoreCount,
    Theme,
}

/// Injected failure for a service.
#[derive(Debug, Clone)]
pub enum Failure {
    Unsupported,
    PermissionDenied,
    Disabled(String),
    Other(String),
}

impl Failure {
    fn to_error(&self) -> ProbeError {
        match self {
            Failure::Unsupported => ProbeError::Unsupported,
            Failure::PermissionDenied => ProbeError::PermissionDenied,
            Failure::Disabled(reason) => ProbeError::Disabled(reason.clone()),
            Failure::Other(reason) => ProbeError::Other(reason.clone()),
        }
    }
}

#[derive(Debug, Clone, Default)]
struct Responses {
    identity: DeviceIdentity,
    operator: Option<String>,
    cameras: CameraInventory,
    sensors: HashMap<SensorKind, bool>,
    motion_api: bool,
    sensor_core: SensorCoreSupport,
    memory: MemoryStatus,
    screen: ScreenMetrics,
    power: PowerStatus,
    sd_card: bool,
    fm_radio: bool,
    vibration: bool,
    core_count: u32,
    theme: ThemeInfo,
}

/// Platform implementation with scripted responses.
#[derive(Default)]
pub struct StaticPlatform {
    responses: Mutex<Responses>,
    failures: Mutex<HashMap<Service, Failure>>,
    calls: Mutex<HashMap<Service, usize>>,
    gates: Mutex<HashMap<Service, Arc<Notify>>>,
}

impl StaticPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    // Builder-style configuration, used before the platform is shared.

    pub fn with_identity(self, identity: DeviceIdentity) -> Self {
        self.responses.lock().unwrap().identity = identity;
        self
    }

    pub fn with_device_name(self, name: &str) -> Self {
        self.responses.lock().unwrap().identity.device_name = Some(name.to_string());
        self
    }

    pub fn with_operator(self, operator: &str) -> Self {
        self.responses.lock().unwrap().operator = Some(operator.to_string());
        self
    }

    pub fn with_cameras(self, cameras: CameraInventory) -> Self {
        self.responses.lock().unwrap().cameras = cameras;
        self
    }

    pub fn with_back_camera(self, camera: CameraDescriptor) -> Self {
        self.responses.lock().unwrap().cameras.back = Some(camera);
        self
    }

    pub fn with_front_camera(self, camera: CameraDescriptor) -> Self {
        self.responses.lock().unwrap().cameras.front = Some(camera);
        self
    }

    pub fn with_sensor(self, kind: SensorKind, present: bool) -> Self {
        self.responses.lock().unwrap().sensors.insert(kind, present);
        self
    }

    pub fn with_motion_api(self, available: bool) -> Self {
        self.responses.lock().unwrap().motion_api = available;
        self
    }

    pub fn with_sensor_core(self, support: SensorCoreSupport) -> Self {
        self.responses.lock().unwrap().sensor_core = support;
        self
    }

    pub fn with_memory(self, memory: MemoryStatus) -> Self {
        self.responses.lock().unwrap().memory = memory;
        self
    }

    pub fn with_screen(self, screen: ScreenMetrics) -> Self {
        self.responses.lock().unwrap().screen = screen;
        self
    }

    pub fn with_power(self, power: PowerStatus) -> Self {
        self.responses.lock().unwrap().power = power;
        self
    }

    pub fn with_sd_card(self, present: bool) -> Self {
        self.responses.lock().unwrap().sd_card = present;
        self
    }

    pub fn with_fm_radio(self, available: bool) -> Self {
        self.responses.lock().unwrap().fm_radio = available;
        self
    }

    pub fn with_vibration(self, present: bool) -> Self {
        self.responses.lock().unwrap().vibration = present;
        self
    }

    pub fn with_core_count(self, count: u32) -> Self {
        self.responses.lock().unwrap().core_count = count;
        self
    }

    pub fn with_theme(self, theme: ThemeInfo) -> Self {
        self.responses.lock().unwrap().theme = theme;
        self
    }

    /// Make a service fail with the given error on every call.
    pub fn failing(self, service: Service, failure: Failure) -> Self {
        self.failures.lock().unwrap().insert(service, failure);
        self
    }

    // Runtime mutation, for refresh scenarios.

    pub fn set_memory(&self, memory: MemoryStatus) {
        self.responses.lock().unwrap().memory = memory;
    }

    pub fn set_power(&self, power: PowerStatus) {
        self.responses.lock().unwrap().power = power;
    }

    pub fn set_sd_card(&self, present: bool) {
        self.responses.lock().unwrap().sd_card = present;
    }

    pub fn set_theme(&self, theme: ThemeInfo) {
        self.responses.lock().unwrap().theme = theme;
    }

    pub fn set_operator(&self, operator: Option<String>) {
        self.responses.lock().unwrap().operator = operator;
    }

    /// Gate a service: its calls block until the returned handle is
    /// notified. Notifying before the call is reached also releases it.
    pub fn gate(&self, service: Service) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        self.gates.lock().unwrap().insert(service, notify.clone());
        notify
    }

    /// Number of completed calls to a service.
    pub fn calls(&self, service: Service) -> usize {
        self.calls.lock().unwrap().get(&service).copied().unwrap_or(0)
    }

    async fn enter(&self, service: Service) -> Result<(), ProbeError> {
        let gate = self.gates.lock().unwrap().get(&service).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        *self.calls.lock().unwrap().entry(service).or_insert(0) += 1;
        if let Some(failure) = self.failures.lock().unwrap().get(&service) {
            return Err(failure.to_error());
        }
        Ok(())
    }
}

#[async_trait]
impl Platform for StaticPlatform {
    async fn device_identity(&self) -> Result<DeviceIdentity, ProbeError> {
        self.enter(Service::Identity).await?;
        Ok(self.responses.lock().unwrap().identity.clone())
    }

    async fn operator_name(&self) -> Result<Option<String>, ProbeError> {
        self.enter(Service::Operator).await?;
        Ok(self.responses.lock().unwrap().operator.clone())
    }

    async fn enumerate_cameras(&self) -> Result<CameraInventory, ProbeError> {
        self.enter(Service::Cameras).await?;
        Ok(self.responses.lock().unwrap().cameras.clone())
    }

    async fn sensor_present(&self, kind: SensorKind) -> Result<bool, ProbeError> {
        self.enter(Service::Sensors).await?;
        Ok(self
            .responses
            .lock()
            .unwrap()
            .sensors
            .get(&kind)
            .copied()
            .unwrap_or(false))
    }

    async fn motion_api_available(&self) -> Result<bool, ProbeError> {
        self.enter(Service::MotionApi).await?;
        Ok(self.responses.lock().unwrap().motion_api)
    }

    async fn sensor_core_support(&self) -> Result<SensorCoreSupport, ProbeError> {
        self.enter(Service::SensorCore).await?;
        Ok(self.responses.lock().unwrap().sensor_core)
    }

    async fn memory_status(&self) -> Result<MemoryStatus, ProbeError> {
        self.enter(Service::Memory).await?;
        Ok(self.responses.lock().unwrap().memory)
    }

    async fn screen_metrics(&self) -> Result<ScreenMetrics, ProbeError> {
        self.enter(Service::Screen).await?;
        Ok(self.responses.lock().unwrap().screen)
    }

    async fn power_status(&self) -> Result<PowerStatus, ProbeError> {
        self.enter(Service::Power).await?;
        Ok(self.responses.lock().unwrap().power)
    }

    async fn sd_card_present(&self) -> Result<bool, ProbeError> {
        self.enter(Service::SdCard).await?;
        Ok(self.responses.lock().unwrap().sd_card)
    }

    async fn fm_radio_available(&self) -> Result<bool, ProbeError> {
        self.enter(Service::FmRadio).await?;
        Ok(self.responses.lock().unwrap().fm_radio)
    }

    async fn vibration_device_present(&self) -> Result<bool, ProbeError> {
        self.enter(Service::Vibration).await?;
        Ok(self.responses.lock().unwrap().vibration)
    }

    async fn processor_core_count(&self) -> Result<u32, ProbeError> {
        self.enter(Service::CoreCount).await?;
        Ok(self.responses.lock().unwrap().core_count)
    }

    async fn ui_theme(&self) -> Result<ThemeInfo, ProbeError> {
        self.enter(Service::Theme).await?;
        Ok(self.responses.lock().unwrap().theme)
    }
}
