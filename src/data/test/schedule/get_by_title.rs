use super::*;

/// Tests title lookup scoping.
///
/// Verifies that lookup by title matches case-sensitively within the guild
/// and never returns another guild's schedule.
///
/// Expected: Some for the owning guild, None elsewhere
#[tokio::test]
async fn finds_schedule_only_within_its_guild() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_schedule_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let schedule = factory::schedule::ScheduleFactory::new(db)
        .guild_id("1000")
        .title("Daily Questions")
        .build()
        .await?;

    let repo = ScheduleRepository::new(db);

    let found = repo.get_by_title(1000, "Daily Questions").await?;
    assert_eq!(found.map(|s| s.id), Some(schedule.id));

    let other_guild = repo.get_by_title(2000, "Daily Questions").await?;
    assert!(other_guild.is_none());

    let other_case = repo.get_by_title(1000, "daily questions").await?;
    assert!(other_case.is_none());

    Ok(())
}

/// Tests the active-schedules listing used at daemon startup.
///
/// Expected: only active schedules, across all guilds
#[tokio::test]
async fn get_active_spans_guilds_and_skips_inactive() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_schedule_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let first = factory::schedule::ScheduleFactory::new(db)
        .guild_id("1000")
        .active(true)
        .build()
        .await?;
    let second = factory::schedule::ScheduleFactory::new(db)
        .guild_id("2000")
        .active(true)
        .build()
        .await?;
    factory::schedule::ScheduleFactory::new(db)
        .guild_id("1000")
        .active(false)
        .build()
        .await?;

    let active = ScheduleRepository::new(db).get_active().await?;
    let ids: Vec<i32> = active.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);

    Ok(())
}
