// ── Update coordinator ──
//
// Polls the hub's four read endpoints on a fixed period, merges them into
// one `DeviceSnapshot`, and publishes it atomically. A failed cycle keeps
// the previous snapshot and raises a `Failed` update instead.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::time::Duration;

use arc_swap::ArcSwapOption;
use tokio::sync::{Mutex, Notify, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use haptique_api::HubClient;

use crate::error::CoreError;
use crate::snapshot::DeviceSnapshot;

// ── State types ──────────────────────────────────────────────────

/// Where the coordinator is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum CoordinatorState {
    Idle,
    Polling,
    Published,
    Failed,
}

/// Latest outcome signal, delivered through [`Coordinator::subscribe`].
#[derive(Debug, Clone)]
pub enum CoordinatorUpdate {
    /// No cycle has completed yet.
    Pending,
    Published {
        snapshot: Arc<DeviceSnapshot>,
    },
    /// The cycle failed; the previous snapshot (if any) is still current.
    Failed {
        error: CoreError,
        consecutive_failures: u32,
    },
}

// ── Coordinator ──────────────────────────────────────────────────

/// Polling coordinator for a single hub.
///
/// Cheaply cloneable via `Arc<CoordinatorInner>`. Cycles never overlap:
/// scheduled ticks and explicit refreshes serialise on one cycle lock.
#[derive(Clone)]
pub struct Coordinator {
    inner: Arc<CoordinatorInner>,
}

struct CoordinatorInner {
    client: HubClient,
    poll_interval: Duration,
    snapshot: ArcSwapOption<DeviceSnapshot>,
    state: watch::Sender<CoordinatorState>,
    updates: watch::Sender<CoordinatorUpdate>,
    consecutive_failures: AtomicU32,
    last_update_success: AtomicBool,
    cycle_lock: Mutex<()>,
    refresh_requested: Notify,
    cancel: CancellationToken,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl Coordinator {
    /// Create an idle coordinator. Nothing is fetched until [`refresh`](Self::refresh)
    /// or [`start`](Self::start) is called.
    pub fn new(client: HubClient, poll_interval: Duration) -> Self {
        let (state, _) = watch::channel(CoordinatorState::Idle);
        let (updates, _) = watch::channel(CoordinatorUpdate::Pending);

        Self {
            inner: Arc::new(CoordinatorInner {
                client,
                poll_interval,
                snapshot: ArcSwapOption::empty(),
                state,
                updates,
                consecutive_failures: AtomicU32::new(0),
                last_update_success: AtomicBool::new(false),
                cycle_lock: Mutex::new(()),
                refresh_requested: Notify::new(),
                cancel: CancellationToken::new(),
                task: Mutex::new(None),
            }),
        }
    }

    pub fn client(&self) -> &HubClient {
        &self.inner.client
    }

    pub fn poll_interval(&self) -> Duration {
        self.inner.poll_interval
    }

    // ── Observation ──────────────────────────────────────────────

    /// Last published snapshot, or `None` before the first success.
    pub fn snapshot(&self) -> Option<Arc<DeviceSnapshot>> {
        self.inner.snapshot.load_full()
    }

    pub fn state(&self) -> CoordinatorState {
        *self.inner.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<CoordinatorUpdate> {
        self.inner.updates.subscribe()
    }

    /// Whether the most recent cycle succeeded. Adapters report
    /// themselves unavailable while this is false.
    pub fn last_update_success(&self) -> bool {
        self.inner.last_update_success.load(Ordering::Acquire)
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.inner.consecutive_failures.load(Ordering::Acquire)
    }

    pub fn is_shut_down(&self) -> bool {
        self.inner.cancel.is_cancelled()
    }

    // ── Cycles ───────────────────────────────────────────────────

    /// Ask the polling task for a cycle as soon as possible.
    ///
    /// Never blocks. Requests made while one is already pending collapse
    /// into a single cycle.
    pub fn request_refresh(&self) {
        debug!("refresh requested");
        self.inner.refresh_requested.notify_one();
    }

    /// Run one cycle now and return its outcome.
    ///
    /// Waits for any in-flight cycle first. On failure the previous
    /// snapshot stays published and a `Failed` update is broadcast.
    pub async fn refresh(&self) -> Result<Arc<DeviceSnapshot>, CoreError> {
        if self.is_shut_down() {
            return Err(CoreError::Disconnected);
        }

        let _cycle = self.inner.cycle_lock.lock().await;
        self.inner.state.send_replace(CoordinatorState::Polling);

        let outcome = tokio::select! {
            biased;
            () = self.inner.cancel.cancelled() => Err(CoreError::Disconnected),
            result = self.fetch() => result,
        };

        let result = match outcome {
            Ok(snapshot) => Ok(self.publish(snapshot)),
            // Abandoned by shutdown, not a device failure.
            Err(CoreError::Disconnected) => Err(CoreError::Disconnected),
            Err(e) => Err(self.fail(e)),
        };

        self.inner.state.send_replace(CoordinatorState::Idle);
        result
    }

    async fn fetch(&self) -> Result<DeviceSnapshot, CoreError> {
        let client = &self.inner.client;
        let (status, rf_status, rf_saved, ir_saved) = tokio::try_join!(
            client.get_status(),
            client.get_rf_status(),
            client.get_rf_saved(),
            client.get_ir_saved(),
        )?;
        Ok(DeviceSnapshot::new(status, rf_status, rf_saved, ir_saved))
    }

    fn publish(&self, snapshot: DeviceSnapshot) -> Arc<DeviceSnapshot> {
        let snapshot = Arc::new(snapshot);
        self.inner.snapshot.store(Some(Arc::clone(&snapshot)));

        let previous_failures = self.inner.consecutive_failures.swap(0, Ordering::AcqRel);
        self.inner.last_update_success.store(true, Ordering::Release);

        self.inner.state.send_replace(CoordinatorState::Published);
        self.inner.updates.send_replace(CoordinatorUpdate::Published {
            snapshot: Arc::clone(&snapshot),
        });

        if previous_failures > 0 {
            info!(
                after_failures = previous_failures,
                "hub reachable again, snapshot published"
            );
        } else {
            debug!(
                rf_saved = snapshot.rf_saved.len(),
                ir_saved = snapshot.ir_saved.len(),
                rx_count = snapshot.rx_count(),
                "snapshot published"
            );
        }

        snapshot
    }

    fn fail(&self, error: CoreError) -> CoreError {
        let consecutive_failures = self
            .inner
            .consecutive_failures
            .fetch_add(1, Ordering::AcqRel)
            .saturating_add(1);
        self.inner.last_update_success.store(false, Ordering::Release);

        warn!(
            error = %error,
            consecutive_failures,
            "update cycle failed, keeping previous snapshot"
        );

        self.inner.state.send_replace(CoordinatorState::Failed);
        self.inner.updates.send_replace(CoordinatorUpdate::Failed {
            error: error.clone(),
            consecutive_failures,
        });

        error
    }

    // ── Lifecycle ────────────────────────────────────────────────

    /// Spawn the background polling task.
    ///
    /// The first scheduled cycle runs one full interval from now; callers
    /// are expected to have run the initial [`refresh`](Self::refresh)
    /// themselves. A zero interval disables the task entirely.
    pub async fn start(&self) {
        if self.inner.poll_interval.is_zero() {
            debug!("poll interval is zero, background polling disabled");
            return;
        }

        let mut task = self.inner.task.lock().await;
        if task.is_some() || self.is_shut_down() {
            return;
        }

        let coordinator = self.clone();
        let cancel = self.inner.cancel.clone();
        *task = Some(tokio::spawn(poll_task(coordinator, cancel)));
        debug!(interval_secs = self.inner.poll_interval.as_secs(), "polling task started");
    }

    /// Stop polling, abandon any in-flight cycle, and join the task.
    ///
    /// Idempotent. After shutdown every [`refresh`](Self::refresh) fails
    /// with [`CoreError::Disconnected`].
    pub async fn shutdown(&self) {
        self.inner.cancel.cancel();

        let handle = self.inner.task.lock().await.take();
        if let Some(handle) = handle {
            let _ = handle.await;
        }

        self.inner.state.send_replace(CoordinatorState::Idle);
        debug!("coordinator shut down");
    }
}

// ── Background task ──────────────────────────────────────────────

async fn poll_task(coordinator: Coordinator, cancel: CancellationToken) {
    let mut interval = tokio::time::interval(coordinator.inner.poll_interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval.tick().await; // consume the immediate first tick

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            () = coordinator.inner.refresh_requested.notified() => {
                interval.reset();
            }
            _ = interval.tick() => {}
        }

        // Outcome is already logged and broadcast by `refresh`.
        let _ = coordinator.refresh().await;
    }
}
