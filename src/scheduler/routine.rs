use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::error::schedule::ScheduleError;

/// A 5-field cron posting routine (minute hour day month weekday), UTC.
///
/// Parsing is the fail-fast point for invalid expressions: a routine is
/// validated when it is configured or a schedule is activated, never deep
/// inside the fire loop.
pub struct Routine {
    expr: String,
    schedule: cron::Schedule,
}

impl Routine {
    pub fn parse(expr: &str) -> Result<Self, ScheduleError> {
        let trimmed = expr.trim();
        if trimmed.split_whitespace().count() != 5 {
            return Err(ScheduleError::InvalidRoutine(expr.to_string()));
        }
        // The cron crate wants a seconds field; posting never needs
        // sub-minute resolution
        let with_seconds = format!("0 {trimmed}");
        let schedule = cron::Schedule::from_str(&with_seconds)
            .map_err(|_| ScheduleError::InvalidRoutine(expr.to_string()))?;

        Ok(Self {
            expr: trimmed.to_string(),
            schedule,
        })
    }

    /// First fire strictly after `from`. Never returns `from` itself, so
    /// repeated application always advances.
    pub fn next_fire(&self, from: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.schedule.after(&from).next()
    }

    /// Last fire strictly before `from`.
    pub fn previous_fire(&self, from: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.schedule.after(&from).next_back()
    }

    /// Whether a fire window opened in `(anchor, now]`.
    pub fn is_due(&self, anchor: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        self.next_fire(anchor).is_some_and(|fire| fire <= now)
    }

    pub fn expression(&self) -> &str {
        &self.expr
    }

    /// 6-field form (with a seconds column) for `tokio_cron_scheduler`.
    pub fn job_expression(&self) -> String {
        format!("0 {}", self.expr)
    }
}
