//! Cron-driven refresh scheduler
//!
//! Runs the refresh cycle on a cron schedule using `tokio-cron-scheduler`.
//! At most one cycle is in flight: a tick that fires while the previous
//! cycle is still running is skipped and counted.

use std::{
    future::Future,
    pin::Pin,
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicU64, Ordering},
    },
    time::Instant,
};

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use thiserror::Error;
use tokio::sync::Mutex as AsyncMutex;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};
use tracing::{debug, error, info, instrument, warn};

/// Scheduler errors
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// Invalid cron expression
    #[error("Invalid cron expression: {0}")]
    InvalidCronExpression(String),

    /// No refresh task registered yet
    #[error("No refresh task scheduled")]
    NotScheduled,

    /// A refresh task is already registered
    #[error("Refresh task already scheduled")]
    AlreadyScheduled,

    /// Internal scheduler error
    #[error("Internal scheduler error: {0}")]
    Internal(String),
}

impl From<JobSchedulerError> for SchedulerError {
    fn from(err: JobSchedulerError) -> Self {
        Self::Internal(err.to_string())
    }
}

/// What happened to one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The cycle ran and succeeded
    Completed,
    /// The cycle ran and failed
    Failed,
    /// A previous cycle was still running
    Skipped,
}

/// Refresh statistics
#[derive(Debug, Clone)]
pub struct RefreshStats {
    /// Cron expression
    pub cron_expression: String,
    /// Number of successful cycles
    pub success_count: u64,
    /// Number of failed cycles
    pub failure_count: u64,
    /// Ticks skipped because a cycle was still in flight
    pub skipped_count: u64,
    /// Whether a cycle is running right now
    pub in_flight: bool,
    /// Last cycle end time
    pub last_run: Option<DateTime<Utc>>,
    /// Last successful cycle end time
    pub last_success: Option<DateTime<Utc>>,
    /// Last error message
    pub last_error: Option<String>,
    /// Next scheduled tick
    pub next_run: Option<DateTime<Utc>>,
    /// Average cycle duration in milliseconds
    pub avg_duration_ms: u64,
}

type RefreshFuture = Pin<Box<dyn Future<Output = Result<(), String>> + Send>>;
type RefreshTask = Arc<dyn Fn() -> RefreshFuture + Send + Sync>;

/// Shared run bookkeeping
#[derive(Debug, Default)]
struct RefreshMetrics {
    in_flight: AtomicBool,
    success_count: AtomicU64,
    failure_count: AtomicU64,
    skipped_count: AtomicU64,
    total_duration_ms: AtomicU64,
    last_run: RwLock<Option<DateTime<Utc>>>,
    last_success: RwLock<Option<DateTime<Utc>>>,
    last_error: RwLock<Option<String>>,
}

/// Clears the in-flight flag even if the cycle panics
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl RefreshMetrics {
    fn record_success(&self, duration_ms: u64) {
        let now = Utc::now();
        self.success_count.fetch_add(1, Ordering::Relaxed);
        self.total_duration_ms
            .fetch_add(duration_ms, Ordering::Relaxed);
        *self.last_run.write() = Some(now);
        *self.last_success.write() = Some(now);
    }

    fn record_failure(&self, error: String, duration_ms: u64) {
        self.failure_count.fetch_add(1, Ordering::Relaxed);
        self.total_duration_ms
            .fetch_add(duration_ms, Ordering::Relaxed);
        *self.last_run.write() = Some(Utc::now());
        *self.last_error.write() = Some(error);
    }

    /// Run one cycle unless another is in flight
    async fn run_guarded(&self, cycle: RefreshFuture) -> TickOutcome {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            let skipped = self.skipped_count.fetch_add(1, Ordering::Relaxed) + 1;
            warn!(skipped, "Previous refresh still running, skipping tick");
            return TickOutcome::Skipped;
        }
        let _guard = InFlightGuard(&self.in_flight);

        debug!("Starting refresh cycle");
        let start = Instant::now();
        let result = cycle.await;
        let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        match result {
            Ok(()) => {
                self.record_success(duration_ms);
                debug!(duration_ms, "Refresh cycle completed");
                TickOutcome::Completed
            },
            Err(e) => {
                error!(error = %e, duration_ms, "Refresh cycle failed");
                self.record_failure(e, duration_ms);
                TickOutcome::Failed
            },
        }
    }
}

/// Cron scheduler for the refresh cycle
pub struct RefreshScheduler {
    scheduler: AsyncMutex<JobScheduler>,
    schedule: cron::Schedule,
    cron_expression: String,
    task: RwLock<Option<RefreshTask>>,
    metrics: Arc<RefreshMetrics>,
    running: AtomicBool,
}

impl std::fmt::Debug for RefreshScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshScheduler")
            .field("cron_expression", &self.cron_expression)
            .field("running", &self.running.load(Ordering::Relaxed))
            .field("scheduled", &self.task.read().is_some())
            .finish_non_exhaustive()
    }
}

impl RefreshScheduler {
    /// Create a stopped scheduler for a six-field cron expression
    ///
    /// # Cron Format
    /// ```text
    /// ┌──────────── second (0-59)
    /// │ ┌────────── minute (0-59)
    /// │ │ ┌──────── hour (0-23)
    /// │ │ │ ┌────── day of month (1-31)
    /// │ │ │ │ ┌──── month (1-12)
    /// │ │ │ │ │ ┌── day of week (SUN-SAT)
    /// │ │ │ │ │ │
    /// * * * * * *
    /// ```
    ///
    /// Write the day of week by name. Numeric days are not read the same
    /// way by every cron parser.
    #[instrument]
    pub async fn new(cron_expression: &str) -> Result<Self, SchedulerError> {
        let schedule = cron_expression.parse::<cron::Schedule>().map_err(|e| {
            SchedulerError::InvalidCronExpression(format!("{cron_expression}: {e}"))
        })?;
        let scheduler = JobScheduler::new().await?;

        Ok(Self {
            scheduler: AsyncMutex::new(scheduler),
            schedule,
            cron_expression: cron_expression.to_string(),
            task: RwLock::new(None),
            metrics: Arc::new(RefreshMetrics::default()),
            running: AtomicBool::new(false),
        })
    }

    /// Register the refresh cycle
    ///
    /// The closure is called once per tick; its future is only polled when
    /// no other cycle is in flight.
    #[instrument(skip(self, task), fields(cron = %self.cron_expression))]
    pub async fn schedule<F, Fut>(&self, task: F) -> Result<(), SchedulerError>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), String>> + Send + 'static,
    {
        if self.task.read().is_some() {
            return Err(SchedulerError::AlreadyScheduled);
        }

        let task: RefreshTask = Arc::new(move || Box::pin(task()) as RefreshFuture);
        let job_task = Arc::clone(&task);
        let metrics = Arc::clone(&self.metrics);

        let job = Job::new_async(self.cron_expression.as_str(), move |_uuid, _lock| {
            let metrics = Arc::clone(&metrics);
            let cycle = job_task();

            Box::pin(async move {
                metrics.run_guarded(cycle).await;
            })
        })
        .map_err(|e| SchedulerError::InvalidCronExpression(e.to_string()))?;

        self.scheduler.lock().await.add(job).await?;
        *self.task.write() = Some(task);

        info!("Refresh cycle scheduled");
        Ok(())
    }

    /// Run the registered cycle immediately, outside the schedule
    ///
    /// Subject to the same in-flight rule as scheduled ticks.
    pub async fn run_now(&self) -> Result<TickOutcome, SchedulerError> {
        let task = self.task.read().clone().ok_or(SchedulerError::NotScheduled)?;
        Ok(self.metrics.run_guarded(task()).await)
    }

    /// Start firing ticks
    #[instrument(skip(self))]
    pub async fn start(&self) -> Result<(), SchedulerError> {
        if self.running.load(Ordering::Relaxed) {
            debug!("Scheduler already running");
            return Ok(());
        }
        if self.task.read().is_none() {
            return Err(SchedulerError::NotScheduled);
        }

        self.scheduler.lock().await.start().await?;
        self.running.store(true, Ordering::Relaxed);
        info!(next_run = ?self.next_run(), "Refresh scheduler started");
        Ok(())
    }

    /// Stop the scheduler gracefully
    #[instrument(skip(self))]
    pub async fn stop(&self) -> Result<(), SchedulerError> {
        if !self.running.load(Ordering::Relaxed) {
            debug!("Scheduler already stopped");
            return Ok(());
        }

        self.scheduler.lock().await.shutdown().await?;
        self.running.store(false, Ordering::Relaxed);
        info!("Refresh scheduler stopped");
        Ok(())
    }

    /// Check if the scheduler is running
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// Next tick after now
    #[must_use]
    pub fn next_run(&self) -> Option<DateTime<Utc>> {
        self.schedule.upcoming(Utc).next()
    }

    /// Snapshot of the run statistics
    #[must_use]
    pub fn stats(&self) -> RefreshStats {
        let m = &self.metrics;
        let success = m.success_count.load(Ordering::Relaxed);
        let failure = m.failure_count.load(Ordering::Relaxed);
        let total = success + failure;
        let avg_duration_ms = if total > 0 {
            m.total_duration_ms.load(Ordering::Relaxed) / total
        } else {
            0
        };

        RefreshStats {
            cron_expression: self.cron_expression.clone(),
            success_count: success,
            failure_count: failure,
            skipped_count: m.skipped_count.load(Ordering::Relaxed),
            in_flight: m.in_flight.load(Ordering::Acquire),
            last_run: *m.last_run.read(),
            last_success: *m.last_success.read(),
            last_error: m.last_error.read().clone(),
            next_run: self.next_run(),
            avg_duration_ms,
        }
    }
}
