use std::path::Path;

use anyhow::{Context, Result};
use futures::{pin_mut, StreamExt};

use apify_client::{PostComment, PostCommentsInput, LINKEDIN_POST_COMMENTS};

use super::{or_na, HarvestSummary};
use crate::company::{extract_company, is_known};
use crate::output::{CommenterRow, CsvSink};
use crate::source::{typed_items, ActorSource};

/// Collect the commenters of `post_urls` with the company parsed from their headline.
///
/// Commenters with no name or no recognizable company are skipped.
pub async fn harvest_comments<S>(
    source: &S,
    post_urls: &[String],
    page_size: u64,
    output: &Path,
) -> Result<HarvestSummary>
where
    S: ActorSource + ?Sized,
{
    let input = PostCommentsInput {
        posts: post_urls.to_vec(),
    };
    let run = source
        .run_actor(LINKEDIN_POST_COMMENTS, serde_json::to_value(&input)?)
        .await
        .context("Post comments run failed")?;

    let mut sink = CsvSink::<CommenterRow>::create(output)?;
    let mut summary = HarvestSummary::default();

    let items = typed_items::<_, PostComment>(source, &run.default_dataset_id, page_size);
    pin_mut!(items);
    while let Some(item) = items.next().await {
        let comment = item?;
        summary.seen += 1;

        let actor = comment.actor.unwrap_or_default();
        let name = or_na(actor.name);
        let company = extract_company(actor.position.as_deref());
        let linkedin_url = or_na(actor.linkedin_url);

        if !is_known(&name) || !is_known(&company) {
            summary.skipped += 1;
            continue;
        }

        tracing::info!("{} | {} | {}", name, company, linkedin_url);
        sink.write(&CommenterRow {
            linkedin_url,
            name,
            company,
        })?;
    }

    summary.written = sink.finish()?;
    summary.log("comments", output);
    Ok(summary)
}
