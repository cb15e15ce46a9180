//! Lifecycle worker for a capability manager
//!
//! Every `get_or_create` and `cleanup` call of a manager is queued to a
//! single background task. The task handles one command at a time, so the
//! compare/destroy/create/install sequence of one request never interleaves
//! with another request on the same manager, even across the suspension
//! points of probing, creation and readiness.

use parking_lot::Mutex;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

use super::commands::LifecycleCommand;
use super::helpers::{ObserverSet, destroy_quietly};
use super::session::{LifecycleState, SessionHandle};
use crate::adapter::CapabilityAdapter;
use crate::availability::{DownloadMonitor, probe};
use crate::error::Result;
use crate::types::config::config_changed;
use crate::types::identifiers::CapabilityName;
use crate::types::options::ManagerConfig;

pub(super) type SharedState<A> =
    Arc<Mutex<LifecycleState<<A as CapabilityAdapter>::Config, <A as CapabilityAdapter>::Session>>>;

/// Shared state for the lifecycle worker task
pub(super) struct WorkerContext<A: CapabilityAdapter> {
    pub adapter: Arc<A>,
    pub capability: CapabilityName,
    pub config: ManagerConfig,
    pub state: SharedState<A>,
    pub observers: Arc<Mutex<ObserverSet>>,
}

/// Spawn the lifecycle worker for a manager
///
/// The task owns the create/destroy protocol and runs until every command
/// sender is dropped. On exit it tears down any session still cached so the
/// native handle is released together with the manager.
///
/// # Arguments
/// * `command_rx` - Channel receiver for lifecycle commands
/// * `ctx` - Worker context containing shared state
pub(super) fn spawn_lifecycle_worker<A: CapabilityAdapter>(
    mut command_rx: mpsc::UnboundedReceiver<LifecycleCommand<A>>,
    ctx: WorkerContext<A>,
) {
    tokio::spawn(async move {
        while let Some(cmd) = command_rx.recv().await {
            match cmd {
                LifecycleCommand::Acquire {
                    config,
                    response_tx,
                } => {
                    let result = acquire(&ctx, config).await;
                    reply(&ctx, response_tx, result);
                }
                LifecycleCommand::AcquireCurrent {
                    default,
                    response_tx,
                } => {
                    let result = match installed_session(&ctx) {
                        Some(session) => Ok(session),
                        None => acquire(&ctx, default).await,
                    };
                    reply(&ctx, response_tx, result);
                }
                LifecycleCommand::Cleanup { response_tx } => {
                    cleanup(&ctx).await;
                    let _ = response_tx.send(());
                }
            }
        }

        log::debug!("[{}] manager dropped, releasing session", ctx.capability);
        cleanup(&ctx).await;
    });
}

/// Report a failed acquire and send the result back
///
/// The caller may have stopped waiting; installed state stands regardless.
fn reply<A: CapabilityAdapter>(
    ctx: &WorkerContext<A>,
    response_tx: oneshot::Sender<Result<SessionHandle<A::Session>>>,
    result: Result<SessionHandle<A::Session>>,
) {
    if let Err(e) = &result {
        log::error!("[{}] {e}", ctx.capability);
        ctx.config.report_error(e);
    }
    let _ = response_tx.send(result);
}

/// The ready session, whatever configuration it was created from
fn installed_session<A: CapabilityAdapter>(
    ctx: &WorkerContext<A>,
) -> Option<SessionHandle<A::Session>> {
    let state = ctx.state.lock();
    if state.is_ready() {
        state.session.clone()
    } else {
        None
    }
}

/// Return the cached session for `config`, or replace it with a new one
async fn acquire<A: CapabilityAdapter>(
    ctx: &WorkerContext<A>,
    config: A::Config,
) -> Result<SessionHandle<A::Session>> {
    let capability = &ctx.capability;

    {
        let state = ctx.state.lock();
        let changed = config_changed(state.current_config.as_ref(), &config);
        if state.initialized
            && !changed
            && let Some(session) = &state.session
        {
            log::trace!("[{capability}] cache hit for session {}", session.id());
            return Ok(session.clone());
        }
        if state.session.is_some() && changed {
            log::debug!(
                "[{capability}] configuration changed from {:?} to {config:?}",
                state.current_config
            );
        }
    }

    // An unavailable capability leaves the cached session untouched
    let availability = probe(ctx.adapter.as_ref(), &config).await?;

    let stale = ctx.state.lock().reset();
    if let Some(stale) = stale {
        destroy_quietly(ctx.adapter.as_ref(), capability, &stale).await;
    }

    log::debug!("[{capability}] creating session ({availability})");
    let monitor = DownloadMonitor::new(capability, ctx.config.on_download_progress.clone());
    let session = ctx
        .adapter
        .create(&config, monitor)
        .await
        .map_err(|e| e.into_initialization(capability))?;
    let session = SessionHandle::new(session);

    if let Some(ready) = ctx.adapter.ready(&session) {
        log::debug!("[{capability}] waiting for session {} to become ready", session.id());
        if let Err(e) = ready.await {
            destroy_quietly(ctx.adapter.as_ref(), capability, &session).await;
            return Err(e.into_initialization(capability));
        }
    }

    log::info!("[{capability}] session {} ready", session.id());
    ctx.state.lock().install(config, session.clone());
    Ok(session)
}

/// Destroy the cached session, reset state, then notify and clear observers
async fn cleanup<A: CapabilityAdapter>(ctx: &WorkerContext<A>) {
    let session = ctx.state.lock().reset();
    if let Some(session) = session {
        destroy_quietly(ctx.adapter.as_ref(), &ctx.capability, &session).await;
    }

    let observers = ctx.observers.lock().drain();
    log::debug!(
        "[{}] cleaned up, notifying {} observer(s)",
        ctx.capability,
        observers.len()
    );
    for observer in observers {
        // Observers are independent; a panicking one must not take the worker down
        if catch_unwind(AssertUnwindSafe(|| observer(&ctx.capability))).is_err() {
            log::error!("[{}] cleanup observer panicked", ctx.capability);
        }
    }
}
