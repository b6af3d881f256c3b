use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::application::ports::{StatusQuery, StatusQueryError};
use crate::domain::{Job, JobId};

/// Client-side view of the job store: every known job sits in exactly one of
/// `active` (non-terminal, submission order) or `completed` (terminal,
/// most recently completed first).
#[derive(Debug, Default)]
struct Partition {
    active: Vec<Job>,
    completed: Vec<Job>,
}

/// Per-job outcome of one poll tick. A job whose query failed has no entry;
/// its previous record is carried forward unchanged.
enum TickOutcome {
    Refreshed(Job),
    Terminal,
}

struct TrackerInner {
    client: Arc<dyn StatusQuery>,
    poll_interval: Duration,
    // Lock order: poll_task before partition whenever both are held.
    partition: Mutex<Partition>,
    poll_task: Mutex<Option<JoinHandle<()>>>,
}

/// Tracks submitted jobs against the authoritative store by periodic polling.
///
/// One spawned task owns the timer and all partition mutation; it stops
/// itself once no active jobs remain and is restarted by `track` or
/// `load_initial` when new work appears. At most one poll task is ever live.
#[derive(Clone)]
pub struct JobTracker {
    inner: Arc<TrackerInner>,
}

impl JobTracker {
    pub fn new(client: Arc<dyn StatusQuery>, poll_interval: Duration) -> Self {
        Self {
            inner: Arc::new(TrackerInner {
                client,
                poll_interval,
                partition: Mutex::new(Partition::default()),
                poll_task: Mutex::new(None),
            }),
        }
    }

    /// Seeds the partition from a full store listing and starts polling if
    /// any job is still in flight.
    pub async fn load_initial(&self) -> Result<(), StatusQueryError> {
        let jobs = self.inner.client.list_jobs().await?;

        let mut task_guard = lock(&self.inner.poll_task);
        {
            let mut partition = lock(&self.inner.partition);
            partition.active.clear();
            partition.completed.clear();
            for job in jobs {
                if job.status.is_terminal() {
                    partition.completed.push(job);
                } else {
                    partition.active.push(job);
                }
            }
        }
        self.ensure_polling(&mut task_guard);
        Ok(())
    }

    /// Registers freshly ingested jobs and (re)starts the poll task.
    pub fn track(&self, jobs: Vec<Job>) {
        if jobs.is_empty() {
            return;
        }
        let mut task_guard = lock(&self.inner.poll_task);
        {
            let mut partition = lock(&self.inner.partition);
            let mut terminal: Vec<Job> = Vec::new();
            for job in jobs {
                if job.status.is_terminal() {
                    terminal.push(job);
                } else {
                    partition.active.push(job);
                }
            }
            // Prepended as a block so the caller's order survives, matching
            // how completions discovered within one tick are merged.
            if !terminal.is_empty() {
                terminal.append(&mut partition.completed);
                partition.completed = terminal;
            }
        }
        self.ensure_polling(&mut task_guard);
    }

    /// Runs one poll-and-merge tick. Queries each active job in list order,
    /// one at a time; per-job failures are isolated and leave the previous
    /// record untouched.
    pub async fn poll_once(&self) {
        let snapshot: Vec<Job> = lock(&self.inner.partition).active.clone();
        if snapshot.is_empty() {
            return;
        }

        let mut outcomes: HashMap<JobId, TickOutcome> = HashMap::new();
        let mut newly_completed: Vec<Job> = Vec::new();

        for job in &snapshot {
            match self.inner.client.get_job(job.id).await {
                Ok(fresh) if fresh.status.is_terminal() => {
                    outcomes.insert(job.id, TickOutcome::Terminal);
                    newly_completed.push(fresh);
                }
                Ok(fresh) => {
                    outcomes.insert(job.id, TickOutcome::Refreshed(fresh));
                }
                Err(e) => {
                    tracing::debug!(
                        job_id = %job.id,
                        error = %e,
                        "Status poll failed, keeping last known record"
                    );
                }
            }
        }

        let mut partition = lock(&self.inner.partition);
        let prior = std::mem::take(&mut partition.active);
        // Id-keyed merge: jobs appended while the tick was in flight have no
        // outcome entry and are retained as-is.
        partition.active = prior
            .into_iter()
            .filter_map(|job| match outcomes.remove(&job.id) {
                Some(TickOutcome::Terminal) => None,
                Some(TickOutcome::Refreshed(fresh)) => Some(fresh),
                None => Some(job),
            })
            .collect();

        if !newly_completed.is_empty() {
            tracing::info!(count = newly_completed.len(), "Jobs reached terminal state");
            newly_completed.append(&mut partition.completed);
            partition.completed = newly_completed;
        }
    }

    /// Read-only `(active, completed)` snapshot.
    pub fn snapshot(&self) -> (Vec<Job>, Vec<Job>) {
        let partition = lock(&self.inner.partition);
        (partition.active.clone(), partition.completed.clone())
    }

    pub fn is_polling(&self) -> bool {
        lock(&self.inner.poll_task)
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }

    /// Stops the poll task; no further ticks fire afterwards.
    pub fn shutdown(&self) {
        if let Some(task) = lock(&self.inner.poll_task).take() {
            task.abort();
        }
    }

    fn ensure_polling(&self, task_guard: &mut Option<JoinHandle<()>>) {
        let has_active = !lock(&self.inner.partition).active.is_empty();
        if !has_active {
            return;
        }
        let live = task_guard.as_ref().is_some_and(|task| !task.is_finished());
        if !live {
            *task_guard = Some(tokio::spawn(poll_loop(self.clone())));
        }
    }
}

impl Drop for TrackerInner {
    fn drop(&mut self) {
        if let Some(task) = lock(&self.poll_task).take() {
            task.abort();
        }
    }
}

/// The single periodic task. The timer lives here, decoupled from partition
/// churn, so adding or removing jobs never resets the cadence.
async fn poll_loop(tracker: JobTracker) {
    let mut ticker = tokio::time::interval(tracker.inner.poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // interval yields immediately on the first tick; skip it so the first
    // poll lands one interval after tracking starts.
    ticker.tick().await;

    loop {
        ticker.tick().await;
        tracker.poll_once().await;

        // Exit decision is serialized with track()/load_initial() through
        // the task lock: either we see their jobs and keep going, or we
        // clear the handle first and they respawn.
        let mut task_guard = lock(&tracker.inner.poll_task);
        if lock(&tracker.inner.partition).active.is_empty() {
            tracing::debug!("No active jobs remain, poll task stopping");
            *task_guard = None;
            return;
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
