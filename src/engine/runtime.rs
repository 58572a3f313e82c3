// src/engine/runtime.rs

use std::fmt;

use anyhow::Context;
use tokio::sync::{broadcast, mpsc, watch};
use tracing::{debug, info};

use crate::errors::Result;
use crate::graph::GraphLayout;
use crate::progress::{CompletedSet, CompletionStore, ToggleEvent};

use super::core::CoreSession;
use super::{SessionCommand, SessionEvent};

const TOGGLE_CHANNEL_CAPACITY: usize = 64;

/// Drives a `CoreSession` in response to `SessionEvent`s and executes the
/// commands it returns.
///
/// This is a pure IO shell around `CoreSession`, which contains all the
/// session semantics. This struct saves the completed set through a
/// `CompletionStore`, broadcasts toggle notifications and publishes the
/// latest layout on a watch channel.
pub struct Runtime<S: CompletionStore> {
    core: CoreSession,
    store: S,
    toggles: broadcast::Sender<ToggleEvent>,
    layout: watch::Sender<GraphLayout>,
}

impl<S: CompletionStore> fmt::Debug for Runtime<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("core", &self.core)
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl<S: CompletionStore> Runtime<S> {
    pub fn new(core: CoreSession, store: S) -> Self {
        let (toggles, _) = broadcast::channel(TOGGLE_CHANNEL_CAPACITY);
        let (layout, _) = watch::channel(core.layout().clone());
        Self {
            core,
            store,
            toggles,
            layout,
        }
    }

    pub fn core(&self) -> &CoreSession {
        &self.core
    }

    pub fn into_core(self) -> CoreSession {
        self.core
    }

    /// Subscribe to toggle notifications. Exactly one event is sent per
    /// toggle, before the new set is persisted.
    pub fn subscribe(&self) -> broadcast::Receiver<ToggleEvent> {
        self.toggles.subscribe()
    }

    /// Watch the latest layout. Only the most recent value is kept.
    pub fn watch_layout(&self) -> watch::Receiver<GraphLayout> {
        self.layout.subscribe()
    }

    /// Read the persisted set and feed it into the core.
    pub fn hydrate(&mut self) -> Result<()> {
        let set = self
            .store
            .load()
            .context("failed to hydrate completed courses")?;
        info!(count = set.len(), "completed set hydrated from store");
        self.handle(SessionEvent::Hydrated(set))
    }

    /// Flip one course and return the resulting set.
    ///
    /// The in-memory set keeps the new state even if persisting it fails;
    /// the error is still returned to the caller.
    pub fn toggle_completion(&mut self, id: impl Into<String>) -> Result<&CompletedSet> {
        self.handle(SessionEvent::ToggleRequested { id: id.into() })?;
        Ok(self.core.completed())
    }

    /// Feed a single event into the core and execute the commands it returns.
    pub fn handle(&mut self, event: SessionEvent) -> Result<()> {
        debug!(?event, "session received event");
        let step = self.core.step(event);
        for command in step.commands {
            self.execute_command(command)?;
        }
        Ok(())
    }

    /// Main event loop.
    ///
    /// - Consumes `SessionEvent`s from `event_rx` until the channel closes.
    /// - Stops at the first command that fails (e.g. a failed save).
    /// - Hands the final core back to the caller.
    pub async fn run(mut self, mut event_rx: mpsc::Receiver<SessionEvent>) -> Result<CoreSession> {
        info!("coursedag session started");

        while let Some(event) = event_rx.recv().await {
            self.handle(event)?;
        }

        info!("session event channel closed; exiting");
        Ok(self.core)
    }

    fn execute_command(&mut self, command: SessionCommand) -> Result<()> {
        match command {
            SessionCommand::Notify(event) => {
                // No subscribers is fine.
                let receivers = self.toggles.send(event).unwrap_or(0);
                debug!(receivers, "toggle notification sent");
            }
            SessionCommand::Persist(set) => {
                self.store
                    .save(&set)
                    .context("failed to persist completed courses")?;
            }
            SessionCommand::Relayout(layout) => {
                self.layout.send_replace(layout);
            }
            SessionCommand::Recolor(changed) => {
                debug!(?changed, "course statuses changed");
                self.layout.send_replace(self.core.layout().clone());
            }
        }
        Ok(())
    }
}
