use super::*;

/// Tests tag deletion by any spelling of the name.
///
/// Expected: true when a row was removed, false for a miss
#[tokio::test]
async fn deletes_by_normalized_name() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_schedule_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let schedule = factory::schedule::create_schedule(db).await?;
    let repo = ScheduleTagRepository::new(db);
    repo.create(schedule.id, "Daily Prompt", None, 100).await?;

    assert!(repo.delete(schedule.id, "daily-prompt").await?);
    assert!(!repo.exists(schedule.id, "daily-prompt").await?);
    assert!(!repo.delete(schedule.id, "daily-prompt").await?);

    Ok(())
}

/// Tests listing tags in name order.
///
/// Expected: alphabetical, scoped to the schedule
#[tokio::test]
async fn lists_tags_in_name_order() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_schedule_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let schedule = factory::schedule::create_schedule(db).await?;
    let other = factory::schedule::create_schedule(db).await?;
    let repo = ScheduleTagRepository::new(db);

    repo.create(schedule.id, "warmup", None, 100).await?;
    repo.create(schedule.id, "icebreaker", None, 100).await?;
    repo.create(other.id, "aside", None, 100).await?;

    let tags = repo.get_by_schedule(schedule.id).await?;
    let names: Vec<&str> = tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["icebreaker", "warmup"]);

    Ok(())
}
