use std::path::Path;

use anyhow::{Context, Result};
use futures::{pin_mut, StreamExt};

use apify_client::{EngagementKind, PostEngager, PostEngagersInput, LINKEDIN_POST_ENGAGERS};

use super::{or_na, HarvestSummary};
use crate::output::{CsvSink, EngagerRow};
use crate::source::{typed_items, ActorSource};

/// Parameters for the post engagers actor.
#[derive(Debug, Clone)]
pub struct EngagersQuery {
    pub post_url: String,
    /// Index of the first engager to fetch.
    pub start: u32,
    /// Number of result pages the actor walks.
    pub iterations: u32,
    pub kind: EngagementKind,
}

/// Collect likers or commenters of a post. The headline is written as-is
/// into the `company` column.
pub async fn harvest_engagers<S>(
    source: &S,
    query: &EngagersQuery,
    page_size: u64,
    output: &Path,
) -> Result<HarvestSummary>
where
    S: ActorSource + ?Sized,
{
    let input = PostEngagersInput {
        url: query.post_url.clone(),
        start: query.start,
        iterations: query.iterations,
        kind: query.kind,
    };
    let run = source
        .run_actor(LINKEDIN_POST_ENGAGERS, serde_json::to_value(&input)?)
        .await
        .with_context(|| format!("Post {} run failed", query.kind))?;

    let mut sink = CsvSink::<EngagerRow>::create(output)?;
    let mut summary = HarvestSummary::default();

    let items = typed_items::<_, PostEngager>(source, &run.default_dataset_id, page_size);
    pin_mut!(items);
    while let Some(item) = items.next().await {
        let engager = item?;
        summary.seen += 1;

        if engager.kind.as_deref() != Some(query.kind.as_str()) {
            summary.skipped += 1;
            continue;
        }

        let row = EngagerRow {
            name: or_na(engager.name),
            url_profile: or_na(engager.url_profile),
            company: engager.subtitle.unwrap_or_default(),
        };
        tracing::info!("{} | {} | {}", row.name, row.company, row.url_profile);
        sink.write(&row)?;
    }

    summary.written = sink.finish()?;
    summary.log("engagers", output);
    Ok(summary)
}
