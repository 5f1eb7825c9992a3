//! Create, read, update and delete round trips through the service.

use super::helpers::{Harness, harness};
use rstest::rstest;
use taskdesk::task::{
    domain::TaskId,
    services::{ErrorResponse, TaskErrorKind, TaskInput, TaskServiceError},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_task_is_retrievable(harness: Harness) -> eyre::Result<()> {
    let created = harness
        .service
        .create(TaskInput::new("Buy milk").with_description("2 liters"))
        .await?;
    let id = created
        .id()
        .ok_or_else(|| eyre::eyre!("created task has no id"))?;

    let fetched = harness.service.get(id).await?;

    eyre::ensure!(fetched == created, "fetched task differs from created task");
    eyre::ensure!(!fetched.completed(), "new task should not be completed");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_replaces_every_mutable_field(harness: Harness) -> eyre::Result<()> {
    let created = harness
        .service
        .create(TaskInput::new("Draft").with_description("first pass"))
        .await?;
    let id = created
        .id()
        .ok_or_else(|| eyre::eyre!("created task has no id"))?;

    let updated = harness
        .service
        .update(id, TaskInput::new("Final").with_completed(true))
        .await?;

    assert_eq!(updated.id(), Some(id));
    assert_eq!(updated.title().as_str(), "Final");
    assert_eq!(updated.description(), None);
    assert!(updated.completed());
    assert_eq!(updated.created_at(), created.created_at());
    assert!(updated.updated_at() >= created.updated_at());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_then_get_is_not_found(harness: Harness) -> eyre::Result<()> {
    let created = harness.service.create(TaskInput::new("Temporary")).await?;
    let id = created
        .id()
        .ok_or_else(|| eyre::eyre!("created task has no id"))?;

    harness.service.delete(id).await?;
    let result = harness.service.get(id).await;

    assert!(matches!(result, Err(TaskServiceError::NotFound(missing)) if missing == id));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn second_delete_is_not_found(harness: Harness) -> eyre::Result<()> {
    let created = harness.service.create(TaskInput::new("Once")).await?;
    let id = created
        .id()
        .ok_or_else(|| eyre::eyre!("created task has no id"))?;

    harness.service.delete(id).await?;
    let result = harness.service.delete(id).await;

    assert!(matches!(result, Err(TaskServiceError::NotFound(_))));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn oversized_fields_produce_a_bad_request_body(harness: Harness) {
    let input = TaskInput::new("t".repeat(101)).with_description("d".repeat(501));

    let err = harness
        .service
        .create(input)
        .await
        .expect_err("oversized fields should be rejected");
    let response = ErrorResponse::from(&err);

    assert_eq!(err.kind(), TaskErrorKind::InvalidInput);
    assert_eq!(response.status, 400);
    assert_eq!(
        response.errors,
        Some(vec![
            "title: size must be between 0 and 100".to_owned(),
            "description: size must be between 0 and 500".to_owned(),
        ])
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_of_unknown_task_renders_not_found(harness: Harness) {
    let err = harness
        .service
        .update(TaskId::new(999_999), TaskInput::new("Ghost"))
        .await
        .expect_err("unknown task should not be updated");

    let response = ErrorResponse::from(&err);
    assert_eq!(response.status, 404);
    assert_eq!(response.message, "Task not found with id: 999999");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn input_deserializes_from_camel_case_json(harness: Harness) -> eyre::Result<()> {
    let input: TaskInput = serde_json::from_str(
        r#"{"title":"From JSON","description":"payload","completed":true}"#,
    )?;

    let created = harness.service.create(input).await?;

    assert_eq!(created.title().as_str(), "From JSON");
    assert!(created.completed());
    Ok(())
}
