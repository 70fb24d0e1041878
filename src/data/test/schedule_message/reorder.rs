use super::*;

use entity::schedule_message;

async fn numbers_by_id(db: &sea_orm::DatabaseConnection, schedule_id: i32) -> Vec<(i32, i32)> {
    entity::prelude::ScheduleMessage::find()
        .filter(schedule_message::Column::ScheduleId.eq(schedule_id))
        .order_by_asc(schedule_message::Column::Number)
        .all(db)
        .await
        .unwrap()
        .into_iter()
        .map(|m| (m.number, m.id))
        .collect()
}

/// Tests moving a message to the front of the backlog.
///
/// The moved message takes `posted_number + 1` and everything it jumped
/// over shifts one slot later.
///
/// Expected: 3 -> 1, former 1 -> 2, former 2 -> 3, 4 untouched
#[tokio::test]
async fn move_to_front_shifts_the_jumped_block() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_schedule_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (schedule, messages) = factory::helpers::create_schedule_with_backlog(db, 4).await?;
    let repo = ScheduleMessageRepository::new(db);

    let moved = repo.move_to_front(schedule.id, messages[2].id, 101).await?;
    assert_eq!(moved.number, 1);

    let expected = vec![
        (1, messages[2].id),
        (2, messages[0].id),
        (3, messages[1].id),
        (4, messages[3].id),
    ];
    assert_eq!(numbers_by_id(db, schedule.id).await, expected);

    Ok(())
}

/// Tests moving a message to the back of the backlog.
///
/// Expected: 2 -> 4, former 3 -> 2, former 4 -> 3
#[tokio::test]
async fn move_to_back_shifts_the_jumped_block() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_schedule_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (schedule, messages) = factory::helpers::create_schedule_with_backlog(db, 4).await?;
    let repo = ScheduleMessageRepository::new(db);

    let moved = repo.move_to_back(schedule.id, messages[1].id, 101).await?;
    assert_eq!(moved.number, 4);

    let expected = vec![
        (1, messages[0].id),
        (2, messages[2].id),
        (3, messages[3].id),
        (4, messages[1].id),
    ];
    assert_eq!(numbers_by_id(db, schedule.id).await, expected);

    Ok(())
}

/// Tests front placement with a posted prefix.
///
/// With `posted_number = 1` the earliest postable slot is 2, never a slot
/// already consumed.
///
/// Expected: 4 -> 2, former 2 -> 3, former 3 -> 4, message 1 untouched
#[tokio::test]
async fn front_respects_the_posted_prefix() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_schedule_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let schedule = factory::schedule::ScheduleFactory::new(db)
        .posted_number(1)
        .current_number(4)
        .build()
        .await?;
    let mut messages = Vec::new();
    for number in 1..=4 {
        messages.push(factory::create_schedule_message(db, schedule.id, number).await?);
    }

    let repo = ScheduleMessageRepository::new(db);
    let moved = repo.move_to_front(schedule.id, messages[3].id, 101).await?;
    assert_eq!(moved.number, 2);

    let expected = vec![
        (1, messages[0].id),
        (2, messages[3].id),
        (3, messages[1].id),
        (4, messages[2].id),
    ];
    assert_eq!(numbers_by_id(db, schedule.id).await, expected);

    Ok(())
}

/// Tests reordering an already posted message.
///
/// Expected: Err(NotInBacklog), numbering untouched
#[tokio::test]
async fn rejects_posted_message() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_schedule_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let schedule = factory::schedule::ScheduleFactory::new(db)
        .posted_number(2)
        .current_number(4)
        .build()
        .await?;
    let mut messages = Vec::new();
    for number in 1..=4 {
        messages.push(factory::create_schedule_message(db, schedule.id, number).await?);
    }

    let before = numbers_by_id(db, schedule.id).await;
    let result = ScheduleMessageRepository::new(db)
        .move_to_back(schedule.id, messages[0].id, 101)
        .await;
    assert!(matches!(
        result,
        Err(AppError::Schedule(ScheduleError::NotInBacklog(1)))
    ));
    assert_eq!(numbers_by_id(db, schedule.id).await, before);

    Ok(())
}

/// Tests explicit-position bounds.
///
/// Expected: Err(NumberOutOfRange) outside `(posted_number, current_number]`,
/// numbering untouched
#[tokio::test]
async fn rejects_position_out_of_range() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_schedule_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (schedule, messages) = factory::helpers::create_schedule_with_backlog(db, 3).await?;
    let repo = ScheduleMessageRepository::new(db);
    let before = numbers_by_id(db, schedule.id).await;

    for target in [0, 4] {
        let result = repo
            .move_to_position(schedule.id, messages[0].id, target, 101)
            .await;
        assert!(matches!(
            result,
            Err(AppError::Schedule(ScheduleError::NumberOutOfRange { .. }))
        ));
    }
    assert_eq!(numbers_by_id(db, schedule.id).await, before);

    Ok(())
}

/// Tests that repeated moves keep the numbering a permutation.
///
/// After arbitrary front/back/position moves every backlog slot is held by
/// exactly one message, with no duplicates or holes.
///
/// Expected: numbers are exactly 1..=4 after each move
#[tokio::test]
async fn numbering_stays_a_permutation() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_schedule_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (schedule, messages) = factory::helpers::create_schedule_with_backlog(db, 4).await?;
    let repo = ScheduleMessageRepository::new(db);

    repo.move_to_front(schedule.id, messages[3].id, 101).await?;
    repo.move_to_back(schedule.id, messages[0].id, 101).await?;
    repo.move_to_position(schedule.id, messages[2].id, 2, 101)
        .await?;

    let numbers: Vec<i32> = numbers_by_id(db, schedule.id)
        .await
        .into_iter()
        .map(|(number, _)| number)
        .collect();
    assert_eq!(numbers, vec![1, 2, 3, 4]);

    Ok(())
}
