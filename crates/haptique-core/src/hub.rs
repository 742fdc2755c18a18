// ── Hub context ──
//
// Explicit per-instance context: one client, one coordinator, one
// dispatcher, with setup and teardown. Nothing here is global; hosts keep
// one `HubContext` per configured hub.

use std::future::Future;
use std::sync::Arc;

use strum::IntoEnumIterator;
use tracing::info;

use haptique_api::HubClient;

use crate::command::{Command, CommandKind, CommandResult};
use crate::config::HubConfig;
use crate::coordinator::Coordinator;
use crate::dispatch::Dispatcher;
use crate::entity::{AccessPointSwitch, DeviceInfo, HubSensor, SavedCommandButton, SensorKind};
use crate::error::CoreError;
use crate::setup::FALLBACK_TITLE;
use crate::snapshot::DeviceSnapshot;

/// Adapters for one hub, built from the current snapshot.
pub struct Entities {
    pub device: DeviceInfo,
    pub sensors: Vec<HubSensor>,
    pub access_point: AccessPointSwitch,
    pub buttons: Vec<SavedCommandButton>,
}

#[derive(Clone)]
pub struct HubContext {
    config: Arc<HubConfig>,
    client: HubClient,
    coordinator: Coordinator,
    dispatcher: Dispatcher,
}

impl HubContext {
    /// Build the context without touching the network.
    pub fn new(config: HubConfig) -> Result<Self, CoreError> {
        let client = HubClient::new(config.entry_id(), config.token.as_ref(), &config.transport())?;
        let coordinator = Coordinator::new(client.clone(), config.poll_interval);
        let dispatcher = Dispatcher::new(client.clone(), coordinator.clone());

        Ok(Self {
            config: Arc::new(config),
            client,
            coordinator,
            dispatcher,
        })
    }

    /// Build the context and run the first cycle. A failed first cycle
    /// aborts the connection.
    pub async fn connect(config: HubConfig) -> Result<Self, CoreError> {
        let ctx = Self::new(config)?;
        ctx.coordinator.refresh().await?;
        Ok(ctx)
    }

    /// Connect and start scheduled polling.
    pub async fn setup(config: HubConfig) -> Result<Self, CoreError> {
        let ctx = Self::connect(config).await?;
        ctx.coordinator.start().await;
        info!(host = %ctx.entry_id(), title = %ctx.title(), "hub ready");
        Ok(ctx)
    }

    /// Stop polling and abandon any in-flight cycle.
    pub async fn shutdown(&self) {
        self.coordinator.shutdown().await;
        info!(host = %self.entry_id(), "hub unloaded");
    }

    /// Connect, run `f`, shut down. Scheduled polling is never started.
    pub async fn oneshot<F, Fut, T>(config: HubConfig, f: F) -> Result<T, CoreError>
    where
        F: FnOnce(HubContext) -> Fut,
        Fut: Future<Output = Result<T, CoreError>>,
    {
        let ctx = Self::connect(config).await?;
        let result = f(ctx.clone()).await;
        ctx.shutdown().await;
        result
    }

    // ── Accessors ────────────────────────────────────────────────

    pub fn config(&self) -> &HubConfig {
        &self.config
    }

    pub fn entry_id(&self) -> &str {
        self.config.entry_id()
    }

    /// Configured name, else the hub's hostname, else a generic title.
    pub fn title(&self) -> String {
        if let Some(name) = self.config.name.as_deref().filter(|n| !n.is_empty()) {
            return name.to_owned();
        }
        self.coordinator
            .snapshot()
            .and_then(|s| s.status.hostname.clone())
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| FALLBACK_TITLE.to_owned())
    }

    pub fn client(&self) -> &HubClient {
        &self.client
    }

    pub fn coordinator(&self) -> &Coordinator {
        &self.coordinator
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn snapshot(&self) -> Option<Arc<DeviceSnapshot>> {
        self.coordinator.snapshot()
    }

    // ── Commands ─────────────────────────────────────────────────

    pub async fn execute(&self, cmd: Command) -> Result<CommandResult, CoreError> {
        self.dispatcher.execute(cmd).await
    }

    pub async fn dispatch(
        &self,
        kind: CommandKind,
        params: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<CommandResult, CoreError> {
        self.dispatcher.dispatch(kind, params).await
    }

    // ── Adapters ─────────────────────────────────────────────────

    pub fn device_info(&self) -> DeviceInfo {
        DeviceInfo::new(self.entry_id(), &self.title(), self.snapshot().as_deref())
    }

    /// Build every adapter for this hub. Buttons reflect the saved
    /// commands known at call time.
    pub fn entities(&self) -> Entities {
        let entry_id = self.entry_id();
        let sensors = SensorKind::iter()
            .map(|kind| HubSensor::new(self.coordinator.clone(), entry_id, kind))
            .collect();
        let buttons = self
            .snapshot()
            .map(|s| SavedCommandButton::for_snapshot(&self.dispatcher, entry_id, &s))
            .unwrap_or_default();

        Entities {
            device: self.device_info(),
            sensors,
            access_point: AccessPointSwitch::new(
                self.coordinator.clone(),
                self.dispatcher.clone(),
                entry_id,
            ),
            buttons,
        }
    }
}
