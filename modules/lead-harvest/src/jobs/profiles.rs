use std::path::Path;

use anyhow::{Context, Result};
use futures::{pin_mut, StreamExt};

use apify_client::{ProfileDetail, ProfileDetailInput, LINKEDIN_PROFILE_DETAIL};

use super::{or_na, HarvestSummary};
use crate::output::{CsvSink, ProfileRow};
use crate::source::{typed_items, ActorSource};

/// Profile URLs from `column` of a CSV file, skipping blank cells.
pub fn read_profile_urls(input: &Path, column: &str) -> Result<Vec<String>> {
    let mut reader = csv::Reader::from_path(input)
        .with_context(|| format!("Failed to open {}", input.display()))?;

    let headers = reader
        .headers()
        .with_context(|| format!("Failed to read header of {}", input.display()))?
        .clone();
    let index = headers.iter().position(|h| h == column).with_context(|| {
        format!(
            "Column '{}' not found in {} (columns: {})",
            column,
            input.display(),
            headers.iter().collect::<Vec<_>>().join(", ")
        )
    })?;

    let mut urls = Vec::new();
    for record in reader.records() {
        let record = record.with_context(|| format!("Malformed row in {}", input.display()))?;
        match record.get(index).map(str::trim) {
            Some(url) if !url.is_empty() => urls.push(url.to_string()),
            _ => {}
        }
    }
    Ok(urls)
}

/// Look up each profile in turn and append name, company and location.
///
/// One actor run per profile. The output is appended to, so an interrupted
/// batch can be resumed with the remaining input rows.
pub async fn harvest_profiles<S>(
    source: &S,
    profile_urls: &[String],
    page_size: u64,
    output: &Path,
) -> Result<HarvestSummary>
where
    S: ActorSource + ?Sized,
{
    let mut sink = CsvSink::<ProfileRow>::append(output)?;
    let mut summary = HarvestSummary::default();

    for profile_url in profile_urls {
        tracing::info!(profile_url = %profile_url, "Processing profile");

        let input = ProfileDetailInput {
            urls: vec![profile_url.clone()],
            max_connections_per_crawl: 1,
            enhance_profiles: true,
        };
        let run = source
            .run_actor(LINKEDIN_PROFILE_DETAIL, serde_json::to_value(&input)?)
            .await
            .with_context(|| format!("Profile lookup failed for {profile_url}"))?;

        let items = typed_items::<_, ProfileDetail>(source, &run.default_dataset_id, page_size);
        pin_mut!(items);
        while let Some(item) = items.next().await {
            let detail = item?;
            summary.seen += 1;

            let basic = detail.basic_info.unwrap_or_default();
            sink.write(&ProfileRow {
                name: or_na(basic.fullname),
                company: or_na(basic.current_company),
                location: or_na(basic.location.and_then(|l| l.full)),
                profile_url: profile_url.clone(),
            })?;
        }
    }

    summary.written = sink.finish()?;
    summary.log("profiles", output);
    Ok(summary)
}
