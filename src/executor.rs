//! Background task execution with main-thread completion delivery.
//!
//! Rendering and measurement run off the caller's thread, but results must be
//! published back on it: the owning view mutates its published bands and event
//! queue without locks. Workers therefore never invoke completion callbacks
//! directly; they queue them, and the owner drains the queue with
//! `process_results()` at a point of its choosing.

use crate::constants::RENDER_WORKER_THREADS;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread::JoinHandle;
use tracing::{debug, warn};

/// Outcome of a background task.
pub type TaskResult<T> = anyhow::Result<T>;

type Job = Box<dyn FnOnce() + Send>;
type Completion = Box<dyn FnOnce() + Send>;

/// Fixed pool of worker threads plus a completion queue drained by the
/// owning thread.
pub struct BackgroundExecutor {
    job_tx: Option<Sender<Job>>,
    completion_rx: Receiver<Completion>,
    completion_tx: Sender<Completion>,
    pending: Arc<AtomicUsize>,
    workers: Vec<JoinHandle<()>>,
}

impl BackgroundExecutor {
    pub fn new(worker_count: usize) -> Self {
        let (job_tx, job_rx) = channel::<Job>();
        let (completion_tx, completion_rx) = channel::<Completion>();
        let job_rx = Arc::new(Mutex::new(job_rx));

        let workers = (0..worker_count.max(1))
            .map(|i| {
                let job_rx = Arc::clone(&job_rx);
                std::thread::Builder::new()
                    .name(format!("bg-worker-{i}"))
                    .spawn(move || {
                        loop {
                            let job = job_rx.lock().recv();
                            match job {
                                Ok(job) => job(),
                                // Channel closed: executor dropped.
                                Err(_) => return,
                            }
                        }
                    })
            })
            .filter_map(|handle| match handle {
                Ok(handle) => Some(handle),
                Err(err) => {
                    warn!(%err, "failed to start background worker");
                    None
                }
            })
            .collect();

        Self {
            job_tx: Some(job_tx),
            completion_rx,
            completion_tx,
            pending: Arc::new(AtomicUsize::new(0)),
            workers,
        }
    }

    pub fn with_default_workers() -> Self {
        Self::new(RENDER_WORKER_THREADS)
    }

    /// Run `work` on a worker thread. `on_complete` receives the result, but
    /// only during a later `process_results()` call on the owning thread.
    pub fn spawn<T, W, C>(&self, name: &str, work: W, on_complete: C)
    where
        T: Send + 'static,
        W: FnOnce() -> TaskResult<T> + Send + 'static,
        C: FnOnce(TaskResult<T>) + Send + 'static,
    {
        let Some(job_tx) = &self.job_tx else {
            return;
        };
        self.pending.fetch_add(1, Ordering::SeqCst);
        let task_name = name.to_string();
        let completion_tx = self.completion_tx.clone();

        let job: Job = Box::new(move || {
            debug!(task = %task_name, "background task started");
            let result = work();
            if let Err(err) = &result {
                warn!(task = %task_name, %err, "background task failed");
            }
            let completion: Completion = Box::new(move || on_complete(result));
            // Send fails only when the executor is gone; nothing left to
            // deliver to in that case.
            let _ = completion_tx.send(completion);
        });

        if job_tx.send(job).is_err() {
            self.pending.fetch_sub(1, Ordering::SeqCst);
        }
    }

    /// Run all queued completion callbacks on the current thread.
    pub fn process_results(&self) {
        while let Ok(completion) = self.completion_rx.try_recv() {
            completion();
            self.pending.fetch_sub(1, Ordering::SeqCst);
        }
    }

    pub fn has_pending(&self) -> bool {
        self.pending_count() > 0
    }

    pub fn pending_count(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }
}

impl Drop for BackgroundExecutor {
    fn drop(&mut self) {
        // Closing the job channel stops the workers once queued jobs finish.
        self.job_tx.take();
        for worker in self.workers.drain(..) {
            let _ = worker.join();
        }
    }
}
