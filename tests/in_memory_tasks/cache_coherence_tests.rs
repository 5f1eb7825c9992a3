//! Reads observe every write made through the service.

use super::helpers::{Harness, create_all, harness, titles};
use rstest::rstest;
use taskdesk::task::{
    ports::{CacheRegion, TaskRepository},
    services::TaskInput,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reads_populate_both_regions(harness: Harness) -> eyre::Result<()> {
    let created = create_all(&harness.service, &["cached"]).await?;
    let id = created
        .first()
        .and_then(taskdesk::task::domain::Task::id)
        .ok_or_else(|| eyre::eyre!("created task has no id"))?;

    harness.service.get(id).await?;
    harness.service.list(5, 0).await?;

    assert_eq!(harness.cache.entry_count(CacheRegion::ById)?, 1);
    assert_eq!(harness.cache.entry_count(CacheRegion::ByPage)?, 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cached_page_reflects_a_later_create(harness: Harness) -> eyre::Result<()> {
    create_all(&harness.service, &["older"]).await?;
    assert_eq!(titles(&harness.service.list(10, 0).await?), vec!["older"]);

    create_all(&harness.service, &["newer"]).await?;

    assert_eq!(
        titles(&harness.service.list(10, 0).await?),
        vec!["newer", "older"]
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cached_task_reflects_a_later_update(harness: Harness) -> eyre::Result<()> {
    let created = create_all(&harness.service, &["before"]).await?;
    let id = created
        .first()
        .and_then(taskdesk::task::domain::Task::id)
        .ok_or_else(|| eyre::eyre!("created task has no id"))?;
    harness.service.get(id).await?;

    harness
        .service
        .update(id, TaskInput::new("after").with_completed(true))
        .await?;
    let fetched = harness.service.get(id).await?;

    assert_eq!(fetched.title().as_str(), "after");
    assert!(fetched.completed());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn writes_bypassing_the_service_are_not_seen_until_the_next_flush(
    harness: Harness,
) -> eyre::Result<()> {
    let created = create_all(&harness.service, &["visible"]).await?;
    harness.service.list(10, 0).await?;

    let first = created
        .first()
        .ok_or_else(|| eyre::eyre!("expected a created task"))?;
    let id = first
        .id()
        .ok_or_else(|| eyre::eyre!("created task has no id"))?;
    harness.repository.delete_by_id(id).await?;
    assert_eq!(titles(&harness.service.list(10, 0).await?), vec!["visible"]);

    create_all(&harness.service, &["flusher"]).await?;
    assert_eq!(titles(&harness.service.list(10, 0).await?), vec!["flusher"]);
    Ok(())
}
