use super::*;

/// Tests creating a new schedule with defaults.
///
/// Verifies that the repository creates a schedule carrying the default
/// format placeholder and daily routine, starting inactive with an empty
/// backlog.
///
/// Expected: Ok with schedule created
#[tokio::test]
async fn creates_schedule_with_defaults() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_schedule_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ScheduleRepository::new(db);
    let schedule = repo
        .create(CreateScheduleParams {
            guild_id: 1000,
            title: "Daily Questions".to_string(),
            kind: ScheduleKind::Queue,
            pin: false,
            discoverable: true,
            created_by: 100,
        })
        .await?;

    assert_eq!(schedule.guild_id, "1000");
    assert_eq!(schedule.title, "Daily Questions");
    assert_eq!(schedule.kind, ScheduleKind::Queue);
    assert_eq!(schedule.format, "${message}");
    assert_eq!(schedule.post_routine, "0 0 * * *");
    assert!(schedule.post_channel_id.is_none());
    assert!(!schedule.active);
    assert!(schedule.discoverable);
    assert!(schedule.last_fire.is_none());
    assert_eq!(schedule.posted_number, 0);
    assert_eq!(schedule.current_number, 0);
    assert_eq!(schedule.created_by, "100");

    Ok(())
}

/// Tests title trimming.
///
/// Verifies that surrounding whitespace is stripped before validation and
/// storage.
///
/// Expected: Ok with trimmed title
#[tokio::test]
async fn trims_surrounding_whitespace_from_title() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_schedule_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ScheduleRepository::new(db);
    let schedule = repo
        .create(CreateScheduleParams {
            guild_id: 1000,
            title: "  Daily Questions  ".to_string(),
            kind: ScheduleKind::Queue,
            pin: false,
            discoverable: false,
            created_by: 100,
        })
        .await?;

    assert_eq!(schedule.title, "Daily Questions");

    Ok(())
}

/// Tests per-guild title uniqueness.
///
/// Verifies that a second schedule with the same title in the same guild is
/// rejected, while the same title in a different guild is accepted.
///
/// Expected: Err(DuplicateTitle) in the same guild, Ok elsewhere
#[tokio::test]
async fn rejects_duplicate_title_within_guild() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_schedule_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ScheduleRepository::new(db);
    let params = |guild_id| CreateScheduleParams {
        guild_id,
        title: "Daily Questions".to_string(),
        kind: ScheduleKind::Queue,
        pin: false,
        discoverable: false,
        created_by: 100,
    };

    repo.create(params(1000)).await?;
    let duplicate = repo.create(params(1000)).await;
    assert!(matches!(
        duplicate,
        Err(AppError::Schedule(ScheduleError::DuplicateTitle(_)))
    ));

    let other_guild = repo.create(params(2000)).await;
    assert!(other_guild.is_ok());

    Ok(())
}

/// Tests title length validation.
///
/// Verifies that titles shorter than 3 or longer than 64 characters are
/// rejected before any row is written.
///
/// Expected: Err(LengthOutOfRange)
#[tokio::test]
async fn rejects_title_length_out_of_bounds() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_schedule_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ScheduleRepository::new(db);
    let params = |title: &str| CreateScheduleParams {
        guild_id: 1000,
        title: title.to_string(),
        kind: ScheduleKind::Queue,
        pin: false,
        discoverable: false,
        created_by: 100,
    };

    let too_short = repo.create(params("ab")).await;
    assert!(matches!(
        too_short,
        Err(AppError::Schedule(ScheduleError::LengthOutOfRange { .. }))
    ));

    let too_long = repo.create(params(&"x".repeat(65))).await;
    assert!(matches!(
        too_long,
        Err(AppError::Schedule(ScheduleError::LengthOutOfRange { .. }))
    ));

    Ok(())
}
