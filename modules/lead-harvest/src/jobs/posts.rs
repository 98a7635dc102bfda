use std::path::Path;

use anyhow::{Context, Result};
use futures::{pin_mut, StreamExt};

use apify_client::{PostSearchInput, PostSearchResult, LINKEDIN_POST_SEARCH};

use super::HarvestSummary;
use crate::output::{CsvSink, PostRow};
use crate::source::{typed_items, ActorSource};

/// Parameters for the keyword post search actor.
#[derive(Debug, Clone)]
pub struct PostsQuery {
    pub keyword: String,
    /// "relevance" or "date_posted".
    pub sort_type: String,
    pub limit: u32,
    pub page_number: u32,
    /// e.g. "past-24h", "past-week", "past-month".
    pub date_filter: String,
    /// Posts with fewer comments than this are dropped.
    pub min_comments: i64,
}

/// Search posts by keyword and keep the URLs of the ones with enough comments.
pub async fn harvest_posts<S>(
    source: &S,
    query: &PostsQuery,
    page_size: u64,
    output: &Path,
) -> Result<HarvestSummary>
where
    S: ActorSource + ?Sized,
{
    let input = PostSearchInput {
        keyword: query.keyword.clone(),
        sort_type: query.sort_type.clone(),
        limit: query.limit,
        page_number: query.page_number,
        date_filter: query.date_filter.clone(),
    };
    let run = source
        .run_actor(LINKEDIN_POST_SEARCH, serde_json::to_value(&input)?)
        .await
        .with_context(|| format!("Post search for '{}' failed", query.keyword))?;

    let mut sink = CsvSink::<PostRow>::create(output)?;
    let mut summary = HarvestSummary::default();

    let items = typed_items::<_, PostSearchResult>(source, &run.default_dataset_id, page_size);
    pin_mut!(items);
    while let Some(item) = items.next().await {
        let post = item?;
        summary.seen += 1;

        let comments = post.comment_count();
        let post_url = post.post_url.unwrap_or_default();
        if comments < query.min_comments || post_url.is_empty() {
            summary.skipped += 1;
            continue;
        }

        tracing::debug!(post_url = %post_url, comments, "Keeping post");
        sink.write(&PostRow { post_url })?;
    }

    summary.written = sink.finish()?;
    summary.log("posts", output);
    Ok(summary)
}
