use super::*;

/// Tests backlog head selection.
///
/// The next message is the smallest number strictly greater than the
/// schedule's posted pointer.
///
/// Expected: message 1 at pointer 0, message 2 at pointer 1
#[tokio::test]
async fn returns_lowest_unposted_number() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_schedule_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (schedule, messages) = factory::helpers::create_schedule_with_backlog(db, 3).await?;
    let repo = ScheduleMessageRepository::new(db);

    let head = repo.next_in_backlog(schedule.id, 0).await?.unwrap();
    assert_eq!(head.id, messages[0].id);

    let after_one = repo.next_in_backlog(schedule.id, 1).await?.unwrap();
    assert_eq!(after_one.number, 2);

    Ok(())
}

/// Tests gap skipping after deletion.
///
/// Deleting a backlog message leaves a hole in the numbering; selection by
/// ordering steps over it without renumbering survivors.
///
/// Expected: message 3 follows pointer 1 once message 2 is gone
#[tokio::test]
async fn skips_deleted_ordinals() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_schedule_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (schedule, messages) = factory::helpers::create_schedule_with_backlog(db, 3).await?;
    let repo = ScheduleMessageRepository::new(db);
    repo.delete(messages[1].id).await?;

    let next = repo.next_in_backlog(schedule.id, 1).await?.unwrap();
    assert_eq!(next.number, 3);

    // The pointer itself never moves on delete
    let after = ScheduleRepository::new(db)
        .get_by_id(schedule.id)
        .await?
        .unwrap();
    assert_eq!(after.posted_number, schedule.posted_number);

    Ok(())
}

/// Tests the exhausted-backlog case.
///
/// Expected: None once the pointer has reached the highest number
#[tokio::test]
async fn returns_none_when_backlog_is_empty() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_schedule_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (schedule, _) = factory::helpers::create_schedule_with_backlog(db, 2).await?;

    let next = ScheduleMessageRepository::new(db)
        .next_in_backlog(schedule.id, 2)
        .await?;
    assert!(next.is_none());

    Ok(())
}
