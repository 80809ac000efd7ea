//! Command dispatcher
//!
//! Runs the commands emitted by views against a [`ReleaseApi`]. Every
//! command becomes its own tokio task so reads never wait on each other.

use super::command::Command;
use crate::api::{HttpReleaseClient, ReleaseApi};
use crate::config::Config;
use anyhow::Result;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Service executing backend commands for the UI layers
#[derive(Clone)]
pub struct ReleaseService {
    api: Arc<dyn ReleaseApi>,
}

impl ReleaseService {
    pub fn new(api: Arc<dyn ReleaseApi>) -> Self {
        Self { api }
    }

    /// Build a service backed by the HTTP client described by `config`
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = HttpReleaseClient::new(&config.server, config.kube_context.clone())?;
        Ok(Self::new(Arc::new(client)))
    }

    /// Get a reference to the underlying backend client
    pub fn api(&self) -> &dyn ReleaseApi {
        self.api.as_ref()
    }

    /// Run a command in the background
    pub fn spawn(&self, command: Command) -> JoinHandle<()> {
        spawn_command(Arc::clone(&self.api), command)
    }

    pub fn spawn_all(&self, commands: impl IntoIterator<Item = Command>) -> Vec<JoinHandle<()>> {
        commands.into_iter().map(|c| self.spawn(c)).collect()
    }

    /// Run a command to completion on the current task
    pub async fn run(&self, command: Command) {
        command.execute(self.api.as_ref()).await;
    }

    /// Run several commands concurrently and wait for all of them
    pub async fn run_all(&self, commands: impl IntoIterator<Item = Command>) {
        let api = self.api.as_ref();
        futures::future::join_all(commands.into_iter().map(|c| c.execute(api))).await;
    }
}

/// Execute `command` on its own tokio task
pub fn spawn_command(api: Arc<dyn ReleaseApi>, command: Command) -> JoinHandle<()> {
    if command.is_mutation() {
        tracing::debug!("Dispatching mutation: {}", command.name());
    }
    tokio::spawn(async move {
        command.execute(api.as_ref()).await;
    })
}
