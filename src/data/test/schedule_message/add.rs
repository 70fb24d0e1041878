use super::*;

/// Tests ordinal assignment on append.
///
/// Verifies that consecutive adds take numbers 1, 2, 3 and that the
/// schedule's `current_number` tracks the highest assignment.
///
/// Expected: Ok with sequential numbers
#[tokio::test]
async fn assigns_sequential_numbers() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_schedule_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let schedule = factory::schedule::create_schedule(db).await?;
    let repo = ScheduleMessageRepository::new(db);

    let first = repo
        .add(schedule.id, 100, "Pick a color".to_string(), None)
        .await?;
    let second = repo
        .add(schedule.id, 100, "Cats or dogs?".to_string(), None)
        .await?;
    let third = repo
        .add(schedule.id, 100, "Favorite season?".to_string(), None)
        .await?;

    assert_eq!(first.number, 1);
    assert_eq!(second.number, 2);
    assert_eq!(third.number, 3);
    assert!(first.date_posted.is_none());

    let after = ScheduleRepository::new(db)
        .get_by_id(schedule.id)
        .await?
        .unwrap();
    assert_eq!(after.current_number, 3);
    assert_eq!(after.posted_number, 0);

    Ok(())
}

/// Tests tag normalization on append.
///
/// Expected: lowercase space-joined tokens; empty input stored as None
#[tokio::test]
async fn normalizes_tags() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_schedule_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let schedule = factory::schedule::create_schedule(db).await?;
    let repo = ScheduleMessageRepository::new(db);

    let tagged = repo
        .add(
            schedule.id,
            100,
            "Pick a color".to_string(),
            Some("  Icebreaker   FUN ".to_string()),
        )
        .await?;
    assert_eq!(tagged.tags.as_deref(), Some("icebreaker fun"));

    let untagged = repo
        .add(
            schedule.id,
            100,
            "Cats or dogs?".to_string(),
            Some("   ".to_string()),
        )
        .await?;
    assert!(untagged.tags.is_none());

    Ok(())
}

/// Tests message length validation on append.
///
/// The raw text must be 1-1800 characters and at most 2000 once substituted
/// into the schedule's format.
///
/// Expected: Err for empty, overlong, and overlong-once-rendered messages
#[tokio::test]
async fn rejects_length_violations() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_schedule_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let schedule = factory::schedule::ScheduleFactory::new(db)
        .format(format!("{}${{message}}", "x".repeat(300)))
        .build()
        .await?;
    let repo = ScheduleMessageRepository::new(db);

    let empty = repo.add(schedule.id, 100, String::new(), None).await;
    assert!(matches!(
        empty,
        Err(AppError::Schedule(ScheduleError::LengthOutOfRange { .. }))
    ));

    let raw_overlong = repo.add(schedule.id, 100, "y".repeat(1801), None).await;
    assert!(matches!(
        raw_overlong,
        Err(AppError::Schedule(ScheduleError::LengthOutOfRange { .. }))
    ));

    // 1800 raw is fine on its own but 2100 once the format is applied
    let rendered_overlong = repo.add(schedule.id, 100, "y".repeat(1800), None).await;
    assert!(matches!(
        rendered_overlong,
        Err(AppError::Schedule(ScheduleError::RenderedTooLong { .. }))
    ));

    Ok(())
}

/// Tests appending to an unknown schedule.
///
/// Expected: Err(NotFound)
#[tokio::test]
async fn fails_for_unknown_schedule() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_schedule_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let result = ScheduleMessageRepository::new(db)
        .add(999999, 100, "Pick a color".to_string(), None)
        .await;
    assert!(matches!(
        result,
        Err(AppError::Schedule(ScheduleError::NotFound(999999)))
    ));

    Ok(())
}
