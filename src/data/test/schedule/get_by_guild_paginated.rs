use super::*;

/// Tests guild-scoped pagination.
///
/// Verifies title ordering, page slicing, and that the reported total is
/// the number of matching schedules, not a page-rounded figure.
///
/// Expected: pages of the requested size in title order, total of 3
#[tokio::test]
async fn pages_by_title_and_reports_item_count() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_schedule_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    for title in ["Art Prompts", "Check-ins", "Book Club"] {
        factory::schedule::ScheduleFactory::new(db)
            .guild_id("1000")
            .title(title)
            .build()
            .await?;
    }
    factory::schedule::ScheduleFactory::new(db)
        .guild_id("2000")
        .title("Daily Questions")
        .build()
        .await?;

    let repo = ScheduleRepository::new(db);

    let (first_page, total) = repo.get_by_guild_paginated(1000, 0, 2).await?;
    let titles: Vec<&str> = first_page.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["Art Prompts", "Book Club"]);
    assert_eq!(total, 3);

    let (last_page, total) = repo.get_by_guild_paginated(1000, 1, 2).await?;
    assert_eq!(last_page.len(), 1);
    assert_eq!(last_page[0].title, "Check-ins");
    assert_eq!(total, 3);

    Ok(())
}
