//! Then steps for task CRUD BDD scenarios.

use super::world::{TaskWorld, run_async};
use rstest_bdd_macros::then;
use taskdesk::task::{domain::Task, services::TaskServiceError};

fn last_task(world: &TaskWorld) -> Result<&Task, eyre::Report> {
    let result = world
        .last_task_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing task result in scenario world"))?;
    result
        .as_ref()
        .map_err(|err| eyre::eyre!("unexpected task failure: {err}"))
}

#[then("the created task has an identifier and is not completed")]
fn created_task_has_identity(world: &TaskWorld) -> Result<(), eyre::Report> {
    let task = last_task(world)?;
    eyre::ensure!(task.id().is_some(), "created task has no identifier");
    eyre::ensure!(!task.completed(), "created task should not be completed");
    eyre::ensure!(
        task.created_at() == task.updated_at(),
        "expected matching timestamps at creation"
    );
    Ok(())
}

#[then("the created task can be fetched by its identifier")]
fn created_task_is_fetchable(world: &TaskWorld) -> Result<(), eyre::Report> {
    let created = last_task(world)?;
    let id = created
        .id()
        .ok_or_else(|| eyre::eyre!("created task has no identifier"))?;
    let fetched =
        run_async(world.service.get(id)).map_err(|err| eyre::eyre!("fetch failed: {err}"))?;
    eyre::ensure!(&fetched == created, "fetched task does not match created task");
    Ok(())
}

#[then("the request fails as not found")]
fn request_not_found(world: &TaskWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_task_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing task result in scenario world"))?;
    if !matches!(result, Err(TaskServiceError::NotFound(_))) {
        return Err(eyre::eyre!("expected not found error, got {result:?}"));
    }
    Ok(())
}

#[then(r#"the request fails validating the "{field}" field"#)]
fn request_fails_validation(world: &TaskWorld, field: String) -> Result<(), eyre::Report> {
    let result = world
        .last_task_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing task result in scenario world"))?;
    match result {
        Err(TaskServiceError::Validation(err)) if err.has_field(&field) => Ok(()),
        other => Err(eyre::eyre!(
            "expected validation error for {field}, got {other:?}"
        )),
    }
}

#[then(r#"fetching the existing task returns title "{title}" and completed"#)]
fn fetched_task_matches(world: &TaskWorld, title: String) -> Result<(), eyre::Report> {
    last_task(world)?;
    let id = world.existing_id()?;
    let fetched =
        run_async(world.service.get(id)).map_err(|err| eyre::eyre!("fetch failed: {err}"))?;
    eyre::ensure!(
        fetched.title().as_str() == title,
        "expected title {title}, found {}",
        fetched.title()
    );
    eyre::ensure!(fetched.completed(), "expected the task to be completed");
    Ok(())
}

#[then("{count:u64} tasks are returned, newest first")]
fn tasks_returned_newest_first(world: &TaskWorld, count: u64) -> Result<(), eyre::Report> {
    let expected = usize::try_from(count)?;
    let result = world
        .last_list_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing list result in scenario world"))?;
    let tasks = result
        .as_ref()
        .map_err(|err| eyre::eyre!("unexpected list failure: {err}"))?;
    eyre::ensure!(
        tasks.len() == expected,
        "expected {expected} tasks, found {}",
        tasks.len()
    );
    let ordered = tasks.windows(2).all(|pair| match pair {
        [newer, older] => (newer.created_at(), newer.id()) > (older.created_at(), older.id()),
        _ => true,
    });
    eyre::ensure!(ordered, "tasks are not ordered newest first");
    Ok(())
}

#[then(r#"the listing starts with "{title}""#)]
fn listing_starts_with(world: &TaskWorld, title: String) -> Result<(), eyre::Report> {
    let tasks = world
        .last_list_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing list result in scenario world"))?
        .as_ref()
        .map_err(|err| eyre::eyre!("unexpected list failure: {err}"))?;
    let first = tasks
        .first()
        .ok_or_else(|| eyre::eyre!("expected at least one task"))?;
    eyre::ensure!(
        first.title().as_str() == title,
        "expected listing to start with {title}, found {}",
        first.title()
    );
    Ok(())
}

#[then("the task list is empty")]
fn task_list_is_empty(world: &TaskWorld) -> Result<(), eyre::Report> {
    if let Some(Err(err)) = world.last_delete_result.as_ref() {
        return Err(eyre::eyre!("delete failed: {err}"));
    }
    let listed =
        run_async(world.service.list(10, 0)).map_err(|err| eyre::eyre!("list failed: {err}"))?;
    eyre::ensure!(listed.is_empty(), "expected no tasks, found {}", listed.len());
    Ok(())
}
