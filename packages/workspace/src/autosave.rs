//! # Autosave Scheduler
//!
//! Debounces committed edits into persistence calls.
//!
//! The scheduler is an explicit four-state machine run as a tokio
//! task, so "only the latest state is ever sent" and "never two
//! requests in flight" are structural guarantees rather than timer
//! accidents:
//!
//! ```text
//!            commit                    timer fires
//!   Idle ──────────────► PendingSave ──────────────► Saving
//!    ▲    (restart timer on every      │                │
//!    │     further commit; last        │ commit         │ ok / error
//!    │     tree wins)                  ▼                ▼
//!    └───────────────────────── SavingThenPending ── back to
//!          ok, nothing pending   (send deferred)    PendingSave/Idle
//! ```
//!
//! A save failure returns to `Idle` without rolling back local edits;
//! the failure is surfaced on the status channel and the next commit
//! (or a `flush`) re-enters `PendingSave`.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use stencil_model::PageContent;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::transport::{ContentTransport, PageId, TransportError};

/// Scheduler states. One instance exists per open page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SaveState {
    Idle,
    PendingSave,
    Saving,
    SavingThenPending,
}

/// What the UI shows next to the save indicator.
#[derive(Debug, Clone, PartialEq)]
pub enum AutosaveStatus {
    Idle,
    Pending,
    Saving,
    Saved { at: DateTime<Utc> },
    SaveFailed { message: String },
}

#[derive(Debug, Clone)]
pub struct AutosaveConfig {
    /// Quiet period after the last commit before a save is sent.
    pub debounce: Duration,
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(800),
        }
    }
}

enum Command {
    Commit(PageContent),
    Flush,
    Shutdown,
}

/// Handle to a running scheduler task.
pub struct AutosaveHandle {
    commands: mpsc::UnboundedSender<Command>,
    status: watch::Receiver<AutosaveStatus>,
    task: JoinHandle<()>,
}

impl AutosaveHandle {
    /// Spawn the scheduler for one page.
    pub fn spawn(
        page_id: PageId,
        transport: Arc<dyn ContentTransport>,
        config: AutosaveConfig,
    ) -> Self {
        let (commands, rx) = mpsc::unbounded_channel();
        let (status_tx, status) = watch::channel(AutosaveStatus::Idle);
        let task = tokio::spawn(run(page_id, transport, config, rx, status_tx));
        Self {
            commands,
            status,
            task,
        }
    }

    /// Hand the scheduler the latest committed tree. Coalesces: only
    /// the most recent tree is ever sent.
    pub fn commit(&self, content: PageContent) {
        let _ = self.commands.send(Command::Commit(content));
    }

    /// Skip the debounce for anything currently pending (manual retry
    /// trigger / save-now button).
    pub fn flush(&self) {
        let _ = self.commands.send(Command::Flush);
    }

    pub fn status(&self) -> AutosaveStatus {
        self.status.borrow().clone()
    }

    /// Watch channel for save-indicator updates.
    pub fn subscribe(&self) -> watch::Receiver<AutosaveStatus> {
        self.status.clone()
    }

    /// Stop the task, saving anything still pending first.
    pub async fn shutdown(self) {
        let _ = self.commands.send(Command::Shutdown);
        let _ = self.task.await;
    }
}

async fn run(
    page_id: PageId,
    transport: Arc<dyn ContentTransport>,
    config: AutosaveConfig,
    mut commands: mpsc::UnboundedReceiver<Command>,
    status: watch::Sender<AutosaveStatus>,
) {
    let mut state = SaveState::Idle;
    // Latest committed tree not yet handed to the transport.
    let mut pending: Option<PageContent> = None;
    let mut deadline: Option<Instant> = None;
    // The single in-flight save. Option is the "at most one request
    // outstanding" invariant.
    let mut in_flight: Option<BoxFuture<'static, Result<(), TransportError>>> = None;
    let mut flush_requested = false;
    let mut shutting_down = false;

    loop {
        tokio::select! {
            command = commands.recv(), if !shutting_down => {
                match command {
                    Some(Command::Commit(tree)) => match state {
                        SaveState::Idle | SaveState::PendingSave => {
                            pending = Some(tree);
                            deadline = Some(Instant::now() + config.debounce);
                            state = SaveState::PendingSave;
                            tracing::debug!(%page_id, "autosave pending, debounce restarted");
                            let _ = status.send(AutosaveStatus::Pending);
                        }
                        SaveState::Saving | SaveState::SavingThenPending => {
                            pending = Some(tree);
                            state = SaveState::SavingThenPending;
                            tracing::debug!(%page_id, "commit during save, send deferred");
                        }
                    },
                    Some(Command::Flush) => match state {
                        SaveState::PendingSave => deadline = Some(Instant::now()),
                        SaveState::Saving | SaveState::SavingThenPending => {
                            flush_requested = true;
                        }
                        SaveState::Idle => {}
                    },
                    Some(Command::Shutdown) | None => shutting_down = true,
                }
            }

            _ = tokio::time::sleep_until(deadline.unwrap_or_else(Instant::now)),
                if deadline.is_some() && in_flight.is_none() =>
            {
                deadline = None;
                if let Some(tree) = pending.take() {
                    state = SaveState::Saving;
                    tracing::debug!(%page_id, "debounce elapsed, save dispatched");
                    let _ = status.send(AutosaveStatus::Saving);
                    in_flight = Some(transport.save(&page_id, tree));
                }
            }

            result = async { in_flight.as_mut().expect("in-flight save").await },
                if in_flight.is_some() =>
            {
                in_flight = None;
                let deferred = state == SaveState::SavingThenPending;
                match result {
                    Ok(()) => {
                        tracing::debug!(%page_id, "save acknowledged");
                        if !deferred {
                            let _ = status.send(AutosaveStatus::Saved { at: Utc::now() });
                        }
                    }
                    Err(error) => {
                        // Local edits are the user's working state and
                        // are never rolled back.
                        tracing::error!(%page_id, %error, "save failed");
                        let _ = status.send(AutosaveStatus::SaveFailed {
                            message: error.to_string(),
                        });
                    }
                }
                if deferred {
                    state = SaveState::PendingSave;
                    deadline = Some(if flush_requested {
                        Instant::now()
                    } else {
                        Instant::now() + config.debounce
                    });
                } else {
                    state = SaveState::Idle;
                }
                flush_requested = false;
            }
        }

        // Drain on shutdown: finish the in-flight save, then send
        // anything still pending, then exit.
        if shutting_down && in_flight.is_none() {
            match pending.take() {
                Some(tree) => {
                    state = SaveState::Saving;
                    let _ = status.send(AutosaveStatus::Saving);
                    in_flight = Some(transport.save(&page_id, tree));
                }
                None => break,
            }
        }
    }
}
