//! Cron scheduler for the daily reminder run.

use std::sync::Arc;

use chrono::Utc;
use tokio_cron_scheduler::{Job as CronJob, JobScheduler};
use tracing::{error, info, warn};

use ledgerdesk_core::config::reminder::ReminderConfig;
use ledgerdesk_core::error::{AppError, ErrorKind};
use ledgerdesk_reminder::ReminderEngine;

/// Cron-based scheduler owning the daily reminder trigger.
///
/// The engine's gate keeps a scheduled run from overlapping a manual one;
/// the scheduler's only concurrency duty is catching every error at the
/// top of the task so a failed run never unwinds into the timer.
pub struct CronScheduler {
    /// The underlying job scheduler
    scheduler: JobScheduler,
    /// The reminder engine triggered by the schedule
    engine: Arc<ReminderEngine>,
    /// Reminder engine configuration
    config: ReminderConfig,
}

impl std::fmt::Debug for CronScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CronScheduler").finish()
    }
}

impl CronScheduler {
    /// Create a new cron scheduler.
    pub async fn new(engine: Arc<ReminderEngine>, config: ReminderConfig) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::scheduler(format!("Failed to create scheduler: {e}")))?;

        Ok(Self {
            scheduler,
            engine,
            config,
        })
    }

    /// Register the daily overdue-invoice reminder run.
    pub async fn register_reminder_run(&self) -> Result<(), AppError> {
        if !self.config.enabled {
            info!("Scheduled reminder run disabled by configuration");
            return Ok(());
        }

        let engine = Arc::clone(&self.engine);
        let job = CronJob::new_async(self.config.schedule.as_str(), move |_uuid, _lock| {
            let engine = Arc::clone(&engine);
            Box::pin(async move {
                run_scheduled(engine).await;
            })
        })
        .map_err(|e| {
            AppError::scheduler(format!(
                "Failed to create reminder schedule '{}': {e}",
                self.config.schedule
            ))
        })?;

        self.scheduler
            .add(job)
            .await
            .map_err(|e| AppError::scheduler(format!("Failed to add reminder schedule: {e}")))?;

        info!(schedule = %self.config.schedule, "Registered: overdue_reminders");
        Ok(())
    }

    /// Start the scheduler.
    pub async fn start(&self) -> Result<(), AppError> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::scheduler(format!("Failed to start scheduler: {e}")))?;

        info!("Cron scheduler started");
        Ok(())
    }

    /// Shutdown the scheduler.
    pub async fn shutdown(&mut self) -> Result<(), AppError> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::scheduler(format!("Failed to shutdown scheduler: {e}")))?;

        info!("Cron scheduler shut down");
        Ok(())
    }
}

/// One scheduled run. Catches everything: the host process must outlive
/// any run failure.
async fn run_scheduled(engine: Arc<ReminderEngine>) {
    let today = Utc::now().date_naive();
    match engine.run(today).await {
        Ok(summary) => {
            info!(
                sent = summary.sent_count,
                skipped = summary.skipped_count,
                failed = summary.failed_count,
                "Scheduled reminder run finished"
            );
        }
        Err(e) if e.kind == ErrorKind::Conflict => {
            warn!("Scheduled reminder run skipped: another run is in progress");
        }
        Err(e) => {
            error!(error = %e, "Scheduled reminder run failed; no reminders sent");
        }
    }
}
