//! Debounced background auto-save
//!
//! One worker thread per enabled coordinator, fed through a single-slot
//! coalescing queue: a new trigger replaces the pending snapshot rather
//! than enqueueing behind it, so rapid triggers collapse into one physical
//! write of the newest state (last-write-wins).
//!
//! The pending slot and the stop flag are the only cross-thread state, both
//! under one mutex with one condvar. The worker blocks only inside its
//! timed, predicate-guarded wait, and it always releases the lock before
//! calling into the save path so a slow disk write never blocks new
//! triggers.

use crate::coordinator::SaveEngine;
use chrono::Utc;
use parking_lot::{Condvar, Mutex};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Floor for the auto-save interval.
pub(crate) const MIN_INTERVAL_SECS: u64 = 5;

#[derive(Default)]
struct WorkerState {
    pending: Option<tasksave_core::GameSnapshot>,
    stop: bool,
}

struct WorkerShared {
    state: Mutex<WorkerState>,
    wake: Condvar,
}

/// Handle to the running auto-save thread.
///
/// Created by `SaveCoordinator::enable_auto_save` and consumed by
/// `shutdown`, which joins the thread and then flushes any still-pending
/// snapshot on the calling thread. Disabling never silently drops unsaved
/// state.
pub(crate) struct AutoSaveWorker {
    shared: Arc<WorkerShared>,
    engine: Arc<SaveEngine>,
    handle: Option<JoinHandle<()>>,
}

/// Clamp a requested interval to the floor.
pub(crate) fn effective_interval(interval_secs: u64) -> Duration {
    Duration::from_secs(interval_secs.max(MIN_INTERVAL_SECS))
}

impl AutoSaveWorker {
    /// Start the worker thread. `interval_secs` is clamped to the
    /// [`MIN_INTERVAL_SECS`] floor.
    pub(crate) fn spawn(engine: Arc<SaveEngine>, interval_secs: u64) -> Self {
        let interval = effective_interval(interval_secs);
        let shared = Arc::new(WorkerShared {
            state: Mutex::new(WorkerState::default()),
            wake: Condvar::new(),
        });

        let thread_shared = Arc::clone(&shared);
        let thread_engine = Arc::clone(&engine);
        let handle = std::thread::Builder::new()
            .name("tasksave-autosave".to_string())
            .spawn(move || worker_loop(&thread_shared, &thread_engine, interval))
            .expect("failed to spawn auto-save worker thread");

        info!(interval_secs = interval.as_secs(), "auto-save enabled");
        AutoSaveWorker {
            shared,
            engine,
            handle: Some(handle),
        }
    }

    /// Replace the pending slot with `snapshot` and wake the worker.
    pub(crate) fn trigger(&self, snapshot: tasksave_core::GameSnapshot) {
        {
            let mut state = self.shared.state.lock();
            // Last-write-wins: never a queue
            state.pending = Some(snapshot);
        }
        self.shared.wake.notify_one();
    }

    /// Signal stop, join the thread, then flush any still-pending snapshot
    /// through the regular save path on the calling thread.
    pub(crate) fn shutdown(mut self) {
        {
            // Notify under the lock: a worker between its stop check and the
            // condvar wait holds this lock, so the wakeup cannot be lost.
            let mut state = self.shared.state.lock();
            state.stop = true;
            self.shared.wake.notify_all();
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }

        let pending = self.shared.state.lock().pending.take();
        if let Some(snapshot) = pending {
            match self.engine.save(&snapshot) {
                Ok(()) => {
                    self.engine.record_auto_save(Utc::now());
                    debug!("flushed pending auto-save during disable");
                }
                Err(err) => warn!(error = %err, "failed to flush pending auto-save"),
            }
        }
        info!("auto-save disabled");
    }
}

fn worker_loop(shared: &WorkerShared, engine: &Arc<SaveEngine>, interval: Duration) {
    loop {
        let pending = {
            let mut state = shared.state.lock();
            let deadline = Instant::now() + interval;
            while !state.stop && state.pending.is_none() {
                if shared.wake.wait_until(&mut state, deadline).timed_out() {
                    break;
                }
            }
            if state.stop {
                // Anything still pending is flushed by shutdown()
                return;
            }
            // Swap the whole slot out, then save without holding the lock
            state.pending.take()
        };

        let Some(snapshot) = pending else {
            // Timer tick with an empty slot
            continue;
        };

        match engine.save(&snapshot) {
            Ok(()) => {
                engine.record_auto_save(Utc::now());
                debug!("auto-save completed");
            }
            // No automatic retry: the next trigger or tick is the retry
            Err(err) => warn!(error = %err, "auto-save failed"),
        }
    }
}
