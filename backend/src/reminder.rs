//! Overdue reminder worker.
//!
//! Background task that periodically scans every connection with a saved
//! reminder preference and logs an overdue notice the first time each notice
//! text is seen. Nothing is actually sent.

use crate::store::Store;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Overdue reminder worker
pub struct ReminderWorker {
    store: Arc<Store>,
    /// Scan interval (default 10 seconds)
    check_interval: Duration,
}

/// Running worker; stop it on teardown
pub struct ReminderWorkerHandle {
    shutdown_tx: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl ReminderWorker {
    pub fn new(store: Arc<Store>, check_interval: Duration) -> Self {
        Self {
            store,
            check_interval,
        }
    }

    /// Start the background worker
    ///
    /// The first scan runs immediately, then once per interval.
    pub fn start(self) -> ReminderWorkerHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            info!(
                interval_secs = self.check_interval.as_secs_f64(),
                "Started reminder worker"
            );

            let mut ticker = tokio::time::interval(self.check_interval);
            loop {
                tokio::select! {
                    _ = ticker.tick() => self.scan().await,
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    }
                }
            }

            info!("Stopped reminder worker");
        });

        ReminderWorkerHandle {
            shutdown_tx,
            task: Some(task),
        }
    }

    /// One tick: scan live state and report what was logged
    async fn scan(&self) {
        let appended = self.store.run_overdue_scan().await;
        if appended.is_empty() {
            return;
        }

        for entry in &appended {
            debug!(line = %entry, "Logged overdue reminder");
        }
        info!(count = appended.len(), "Overdue reminders logged");
    }
}

impl ReminderWorkerHandle {
    /// Signal the worker to stop and wait for it to finish
    pub async fn stop(mut self) {
        let _ = self.shutdown_tx.send(true);
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!(error = ?e, "Reminder worker ended abnormally");
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, JoinHandle::is_finished)
    }
}

impl Drop for ReminderWorkerHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
