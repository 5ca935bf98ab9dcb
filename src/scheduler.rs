//! Process-wide periodic task scheduling.
//!
//! The portal runs a recurring claim-validation sweep (reconcile every
//! claim that may have drifted, hand the repaired values back to the
//! store). This module ships the primitive: a named task started at
//! process init, cancellable at shutdown, with an explicit guard that
//! skips a firing when the previous run is still in flight. The job body
//! is supplied by the embedding process; the crate performs no I/O of its
//! own.

use crate::errors::Result;
use std::{future::Future, pin::Pin, sync::Arc, time::Duration};
use tokio::{
    sync::{Mutex, Notify, watch},
    task::JoinHandle,
    time::MissedTickBehavior,
};
use tracing::{error, info, warn};

type Job = Arc<dyn Fn() -> Pin<Box<dyn Future<Output = Result<()>> + Send>> + Send + Sync>;

/// A cancellable recurring task.
pub struct PeriodicTask {
    name: String,
    handle: JoinHandle<()>,
    shutdown: watch::Sender<bool>,
    wakeup: Arc<Notify>,
}

impl PeriodicTask {
    /// Spawns a recurring task. The first run fires immediately, then on
    /// every elapsed interval; a run that is still in flight when the next
    /// firing arrives causes that firing to be skipped with a warning
    /// rather than overlapping.
    pub fn spawn<F, Fut>(name: impl Into<String>, every: Duration, job: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        let name = name.into();
        let job: Job = Arc::new(move || {
            Box::pin(job()) as Pin<Box<dyn Future<Output = Result<()>> + Send>>
        });
        let (shutdown, mut shutdown_rx) = watch::channel(false);
        let wakeup = Arc::new(Notify::new());
        let running = Arc::new(Mutex::new(()));

        let task_name = name.clone();
        let task_wakeup = Arc::clone(&wakeup);
        let task_running = Arc::clone(&running);
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            info!(task = %task_name, period_secs = every.as_secs_f64(), "periodic task started");
            loop {
                tokio::select! {
                    _ = interval.tick() => {}
                    () = task_wakeup.notified() => {}
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                        continue;
                    }
                }
                fire(&task_name, &job, &task_running);
            }
            // Wait out any in-flight run before reporting the task stopped.
            let _finished = task_running.lock().await;
            info!(task = %task_name, "periodic task stopped");
        });

        Self {
            name,
            handle,
            shutdown,
            wakeup,
        }
    }

    /// The task's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Requests an immediate run outside the regular cadence. Subject to
    /// the same overlap guard as scheduled firings.
    pub fn trigger_now(&self) {
        self.wakeup.notify_one();
    }

    /// True once the task loop has exited.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Stops the task and waits for the loop (and any in-flight run it
    /// already started) to finish.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        let _ = self.handle.await;
    }
}

/// Launches one guarded run. When the previous run still holds the guard,
/// the firing is skipped.
fn fire(name: &str, job: &Job, running: &Arc<Mutex<()>>) {
    let Ok(guard) = Arc::clone(running).try_lock_owned() else {
        warn!(task = %name, "previous run still in flight, skipping this firing");
        return;
    };
    let job = Arc::clone(job);
    let name = name.to_string();
    tokio::spawn(async move {
        let _guard = guard;
        if let Err(e) = job().await {
            error!(task = %name, "periodic run failed: {e}");
        }
    });
}
