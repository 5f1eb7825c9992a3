//! Ordering and paging behaviour of task listings.

use super::helpers::{Harness, create_all, harness, titles};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listing_is_newest_first(harness: Harness) -> eyre::Result<()> {
    create_all(&harness.service, &["one", "two", "three"]).await?;

    let listed = harness.service.list(10, 0).await?;

    assert_eq!(titles(&listed), vec!["three", "two", "one"]);
    Ok(())
}

#[rstest]
#[case::first_page(2, 0, &["five", "four"])]
#[case::second_page(2, 2, &["three", "two"])]
#[case::offset_inside_first_page(2, 1, &["five", "four"])]
#[case::offset_inside_second_page(2, 3, &["three", "two"])]
#[case::last_partial_page(2, 4, &["one"])]
#[case::beyond_the_end(3, 9, &[])]
#[tokio::test(flavor = "multi_thread")]
async fn offsets_select_the_containing_page(
    harness: Harness,
    #[case] limit: u32,
    #[case] offset: u32,
    #[case] expected: &[&str],
) -> eyre::Result<()> {
    create_all(&harness.service, &["one", "two", "three", "four", "five"]).await?;

    let listed = harness.service.list(limit, offset).await?;

    assert_eq!(titles(&listed), expected);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_store_lists_nothing(harness: Harness) -> eyre::Result<()> {
    let listed = harness.service.list(10, 0).await?;
    eyre::ensure!(listed.is_empty(), "expected no tasks, got {}", listed.len());
    Ok(())
}
