use super::*;

/// Tests activation stamping the fire anchor.
///
/// Activation records `last_fire = now` so the first fire is the next cron
/// occurrence, not a catch-up of every window missed while inactive.
///
/// Expected: Ok with active=true and a fresh last_fire
#[tokio::test]
async fn activation_stamps_last_fire() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_schedule_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let schedule = factory::schedule::create_schedule(db).await?;
    assert!(schedule.last_fire.is_none());

    let before = Utc::now();
    let activated = ScheduleRepository::new(db)
        .set_active(schedule.id, true, 101)
        .await?;

    assert!(activated.active);
    let last_fire = activated.last_fire.expect("last_fire should be stamped");
    assert!(last_fire >= before);
    assert!(last_fire <= Utc::now());
    assert_eq!(activated.modified_by, "101");

    Ok(())
}

/// Tests deactivation preserving the fire anchor.
///
/// Expected: Ok with active=false and last_fire untouched
#[tokio::test]
async fn deactivation_keeps_last_fire() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_schedule_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let anchor = Utc::now() - chrono::Duration::hours(3);
    let schedule = factory::schedule::ScheduleFactory::new(db)
        .active(true)
        .last_fire(Some(anchor))
        .build()
        .await?;

    let deactivated = ScheduleRepository::new(db)
        .set_active(schedule.id, false, 101)
        .await?;

    assert!(!deactivated.active);
    assert_eq!(deactivated.last_fire, Some(anchor));

    Ok(())
}
