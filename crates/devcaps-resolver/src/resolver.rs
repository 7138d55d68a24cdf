//! The capability resolver
//!
//! Owns the snapshot, the pass state machine, and the event channel.
//! `resolve()` dispatches a pass and returns; a driver task joins the probe
//! set and flips `ready` exactly once when the last probe lands.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use chrono::Utc;
use devcaps_core::{FocusOverrides, Snapshot};
use devcaps_platform::Platform;
use tokio::sync::{broadcast, RwLock};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::pass::{self, PassKind};

/// Resolver event for consumers tracking resolution progress.
#[derive(Debug, Clone)]
pub enum ResolverEvent {
    /// A pass was dispatched.
    PassStarted { kind: PassKind },
    /// The ready flag flipped. Fires at most once per direction per pass.
    /// Delivered from the driver task's context; marshalling to a UI
    /// thread is the subscriber's business.
    ReadyChanged(bool),
    /// All probes of the pass have reported.
    PassCompleted {
        kind: PassKind,
        probes: usize,
        failures: usize,
    },
}

/// Pass state. `resolve()` is a no-op while a pass is outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResolveState {
    Idle,
    Resolving,
    Ready,
}

/// Aggregates independent capability probes into one consistent snapshot.
///
/// Explicitly constructed and injected; owned by whatever composes the
/// consumer layer, living for the application session. Cloning is cheap
/// and clones share all state.
#[derive(Clone)]
pub struct CapabilityResolver {
    platform: Arc<dyn Platform>,
    overrides: Arc<FocusOverrides>,
    snapshot: Arc<RwLock<Snapshot>>,
    state: Arc<Mutex<ResolveState>>,
    ready: Arc<AtomicBool>,
    event_tx: broadcast::Sender<ResolverEvent>,
}

impl CapabilityResolver {
    pub fn new(platform: Arc<dyn Platform>, overrides: FocusOverrides) -> Self {
        let (event_tx, _) = broadcast::channel(32);
        Self {
            platform,
            overrides: Arc::new(overrides),
            snapshot: Arc::new(RwLock::new(Snapshot::default())),
            state: Arc::new(Mutex::new(ResolveState::Idle)),
            ready: Arc::new(AtomicBool::new(false)),
            event_tx,
        }
    }

    /// Whether all probes of the current pass have completed. Fields are
    /// only meaningful once this is true.
    pub fn ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    /// Clone of the current snapshot.
    pub async fn snapshot(&self) -> Snapshot {
        self.snapshot.read().await.clone()
    }

    /// Subscribe to resolver events.
    pub fn subscribe(&self) -> broadcast::Receiver<ResolverEvent> {
        self.event_tx.subscribe()
    }

    /// Dispatch a resolution pass and return once all probes are in
    /// flight. The first call runs a full pass; later calls refresh the
    /// dynamic subset only. Ignored while a pass is outstanding.
    pub async fn resolve(&self) {
        let Some(kind) = self.begin_pass() else {
            return;
        };
        let started = Instant::now();

        if kind == PassKind::Refresh {
            // Both ready signals flip under the write lock so no reader can
            // observe one without the other.
            {
                let mut snapshot = self.snapshot.write().await;
                snapshot.ready = false;
                self.ready.store(false, Ordering::SeqCst);
            }
            let _ = self.event_tx.send(ResolverEvent::ReadyChanged(false));
        }
        let _ = self.event_tx.send(ResolverEvent::PassStarted { kind });

        // Device identity resolves before anything else is dispatched: the
        // camera probe's auto-focus correction is keyed by device name.
        let mut identity_failed = false;
        if kind == PassKind::Full {
            let identity = pass::observe("identity", self.platform.device_identity().await);
            identity_failed = identity.is_none();
            let identity = identity.unwrap_or_default();
            let mut snapshot = self.snapshot.write().await;
            snapshot.device_name = identity.device_name;
            snapshot.manufacturer = identity.manufacturer;
            snapshot.hardware_version = identity.hardware_version;
            snapshot.firmware_version = identity.firmware_version;
        }

        let mut tasks = JoinSet::new();
        pass::spawn_probes(kind, &self.platform, &mut tasks);

        let resolver = self.clone();
        tokio::spawn(async move {
            resolver.drive(kind, tasks, identity_failed, started).await;
        });
    }

    /// Dispatch a pass without awaiting even the dispatch itself.
    pub fn resolve_detached(&self) {
        let resolver = self.clone();
        tokio::spawn(async move { resolver.resolve().await });
    }

    /// Dispatch a pass and wait for it to complete.
    pub async fn resolve_and_wait(&self) -> Snapshot {
        self.resolve().await;
        self.wait_ready().await;
        self.snapshot().await
    }

    /// Wait until the ready flag is true, returning immediately if it
    /// already is.
    pub async fn wait_ready(&self) {
        let mut rx = self.event_tx.subscribe();
        if self.ready() {
            return;
        }
        loop {
            match rx.recv().await {
                Ok(ResolverEvent::ReadyChanged(true)) => return,
                Ok(_) => {}
                Err(broadcast::error::RecvError::Lagged(_)) => {
                    if self.ready() {
                        return;
                    }
                }
                Err(broadcast::error::RecvError::Closed) => return,
            }
        }
    }

    /// Claim the pass slot. Returns the pass kind to run, or None when a
    /// pass is already outstanding.
    fn begin_pass(&self) -> Option<PassKind> {
        let mut state = self.state.lock().expect("resolver state lock poisoned");
        match *state {
            ResolveState::Resolving => {
                warn!("resolve requested while a pass is outstanding, ignoring");
                None
            }
            ResolveState::Idle => {
                *state = ResolveState::Resolving;
                Some(PassKind::Full)
            }
            ResolveState::Ready => {
                *state = ResolveState::Resolving;
                Some(PassKind::Refresh)
            }
        }
    }

    /// Join every probe of the pass, merge results, then flip ready and
    /// notify. Runs on its own task; completion may land on any thread.
    async fn drive(
        &self,
        kind: PassKind,
        mut tasks: JoinSet<pass::ProbeReport>,
        identity_failed: bool,
        started: Instant,
    ) {
        // Identity ran inline during dispatch but belongs to the pass.
        let probes = tasks.len() + usize::from(kind == PassKind::Full);
        let mut failures = usize::from(identity_failed);

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(report) => {
                    if report.is_failure() {
                        failures += 1;
                    }
                    pass::merge(&mut *self.snapshot.write().await, report);
                }
                Err(e) => {
                    warn!(error = %e, "probe task failed to join");
                    failures += 1;
                }
            }
        }

        {
            let mut snapshot = self.snapshot.write().await;
            if snapshot.has_back_camera && !snapshot.has_back_camera_auto_focus {
                if let Some(name) = snapshot.device_name.clone() {
                    if self.overrides.applies_to(&name) {
                        debug!(device = %name, "auto focus correction applied");
                        snapshot.has_back_camera_auto_focus = true;
                    }
                }
            }
            snapshot.ready = true;
            snapshot.resolved_at = Some(Utc::now());
        }

        *self.state.lock().expect("resolver state lock poisoned") = ResolveState::Ready;
        self.ready.store(true, Ordering::SeqCst);
        let _ = self.event_tx.send(ResolverEvent::ReadyChanged(true));
        let _ = self.event_tx.send(ResolverEvent::PassCompleted {
            kind,
            probes,
            failures,
        });

        info!(
            ?kind,
            probes,
            failures,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "resolution pass complete"
        );
    }
}
