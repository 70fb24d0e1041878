//! The schedule daemon: owns one recurring timer per active schedule.
//!
//! The in-memory job registry is purely lifecycle management (start/stop);
//! correctness of the post/advance sequence rests entirely on the
//! per-fire database transaction in [`post`].

pub mod gate;
pub mod post;
pub mod render;
pub mod routine;


use std::collections::HashMap;
use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler};
use uuid::Uuid;

use crate::data::schedule::ScheduleRepository;
use crate::delivery::Messenger;
use crate::error::{schedule::ScheduleError, AppError};
use crate::scheduler::post::PostOutcome;
use crate::scheduler::routine::Routine;

pub struct Daemon {
    db: DatabaseConnection,
    messenger: Arc<dyn Messenger>,
    scheduler: JobScheduler,

    /// Live timer per schedule id. At most one entry per schedule;
    /// installing over an existing entry replaces its job.
    jobs: Mutex<HashMap<i32, Uuid>>,
}

impl Daemon {
    pub async fn new(
        db: DatabaseConnection,
        messenger: Arc<dyn Messenger>,
    ) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new().await?;
        Ok(Self {
            db,
            messenger,
            scheduler,
            jobs: Mutex::new(HashMap::new()),
        })
    }

    /// Loads all active schedules and installs their timers, then starts
    /// the scheduler.
    ///
    /// Schedules failing the validity gate are skipped with a warning but
    /// stay active; they pick up again once reactivated or refreshed after
    /// the configuration is fixed. Ticks missed while the process was down
    /// are not replayed; the next fire is purely forward-looking.
    pub async fn init(&self) -> Result<(), AppError> {
        let schedules = ScheduleRepository::new(&self.db).get_active().await?;
        let mut installed = 0usize;

        for schedule in schedules {
            if let Err(reason) = gate::check(self.messenger.as_ref(), &schedule).await {
                tracing::warn!(
                    "Not installing schedule {} '{}' (guild {}): {}",
                    schedule.id,
                    schedule.title,
                    schedule.guild_id,
                    reason
                );
                continue;
            }
            self.install(&schedule).await?;
            installed += 1;
        }

        self.scheduler.start().await?;
        tracing::info!("Schedule daemon started with {} schedule(s)", installed);
        Ok(())
    }

    /// Whether the schedule currently passes the validity gate.
    pub async fn is_valid(&self, schedule_id: i32) -> Result<bool, AppError> {
        let schedule = ScheduleRepository::new(&self.db)
            .get_by_id(schedule_id)
            .await?
            .ok_or(ScheduleError::NotFound(schedule_id))?;
        Ok(gate::check(self.messenger.as_ref(), &schedule)
            .await
            .is_ok())
    }

    /// Activates a schedule: gate check, `active=true` with a fresh
    /// `last_fire`, and timer installation.
    pub async fn activate(&self, schedule_id: i32, actor: u64) -> Result<(), AppError> {
        let repo = ScheduleRepository::new(&self.db);
        let schedule = repo
            .get_by_id(schedule_id)
            .await?
            .ok_or(ScheduleError::NotFound(schedule_id))?;
        if let Err(reason) = gate::check(self.messenger.as_ref(), &schedule).await {
            return Err(ScheduleError::NotReady(reason).into());
        }

        let schedule = repo.set_active(schedule_id, true, actor).await?;
        self.install(&schedule).await?;
        Ok(())
    }

    /// Deactivates a schedule and stops its timer. A fire already in flight
    /// completes to commit; only future ticks are cancelled.
    pub async fn deactivate(&self, schedule_id: i32, actor: u64) -> Result<(), AppError> {
        ScheduleRepository::new(&self.db)
            .set_active(schedule_id, false, actor)
            .await?;
        self.remove_job(schedule_id).await?;
        tracing::info!("Stopped schedule {}", schedule_id);
        Ok(())
    }

    /// Re-installs a running schedule's timer after its routine or channel
    /// changed. A schedule without a live timer is left alone.
    pub async fn refresh(&self, schedule_id: i32) -> Result<(), AppError> {
        let registered = self.jobs.lock().await.contains_key(&schedule_id);
        if !registered {
            return Ok(());
        }
        let schedule = ScheduleRepository::new(&self.db)
            .get_by_id(schedule_id)
            .await?
            .ok_or(ScheduleError::NotFound(schedule_id))?;
        self.install(&schedule).await
    }

    /// Admin "post now": runs one fire immediately, bypassing the active and
    /// due checks but not the gate or the transactional guard.
    pub async fn force_post(&self, schedule_id: i32) -> Result<PostOutcome, AppError> {
        post::fire(&self.db, self.messenger.as_ref(), schedule_id, true).await
    }

    async fn install(&self, schedule: &entity::schedule::Model) -> Result<(), AppError> {
        let routine = Routine::parse(&schedule.post_routine)?;

        let db = self.db.clone();
        let messenger = Arc::clone(&self.messenger);
        let schedule_id = schedule.id;
        let expression = routine.job_expression();
        let job = Job::new_async(expression.as_str(), move |_uuid, _lock| {
            let db = db.clone();
            let messenger = Arc::clone(&messenger);
            Box::pin(async move {
                if let Err(err) = post::fire(&db, messenger.as_ref(), schedule_id, false).await {
                    tracing::error!("Fire failed for schedule {}: {}", schedule_id, err);
                }
            })
        })?;

        let mut jobs = self.jobs.lock().await;
        if let Some(previous) = jobs.remove(&schedule_id) {
            self.scheduler.remove(&previous).await?;
        }
        let uuid = self.scheduler.add(job).await?;
        jobs.insert(schedule_id, uuid);

        tracing::info!(
            "Started schedule {} '{}' (guild {}, channel {:?}, routine '{}')",
            schedule.id,
            schedule.title,
            schedule.guild_id,
            schedule.post_channel_id,
            schedule.post_routine
        );
        Ok(())
    }

    async fn remove_job(&self, schedule_id: i32) -> Result<(), AppError> {
        if let Some(uuid) = self.jobs.lock().await.remove(&schedule_id) {
            self.scheduler.remove(&uuid).await?;
        }
        Ok(())
    }
}
