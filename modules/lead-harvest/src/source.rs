//! Seam between the harvest jobs and the Apify API.

use anyhow::Result;
use async_stream::try_stream;
use async_trait::async_trait;
use futures::{Stream, StreamExt};
use serde::de::DeserializeOwned;
use serde_json::Value;

use apify_client::{ApifyClient, DatasetPage, RunData};

/// Something that can run an actor to completion and serve its dataset.
#[async_trait]
pub trait ActorSource: Send + Sync {
    /// Start `actor_id` with `input` and wait for the run to succeed.
    async fn run_actor(&self, actor_id: &str, input: Value) -> Result<RunData>;

    /// Fetch one page of raw dataset items.
    async fn fetch_page(
        &self,
        dataset_id: &str,
        offset: u64,
        limit: u64,
    ) -> Result<DatasetPage<Value>>;
}

#[async_trait]
impl ActorSource for ApifyClient {
    async fn run_actor(&self, actor_id: &str, input: Value) -> Result<RunData> {
        Ok(self.call_actor(actor_id, &input).await?)
    }

    async fn fetch_page(
        &self,
        dataset_id: &str,
        offset: u64,
        limit: u64,
    ) -> Result<DatasetPage<Value>> {
        Ok(self.list_items(dataset_id, offset, limit).await?)
    }
}

/// Every item of a dataset, requested `page_size` at a time.
///
/// Each request covers the window `[offset, offset + page_size)` and the next
/// one starts right after it, even when the page came back short. Iteration
/// ends on the first empty page; the reported total is not trusted since it
/// lags right after a run finishes.
pub fn dataset_items<'a, S>(
    source: &'a S,
    dataset_id: &'a str,
    page_size: u64,
) -> impl Stream<Item = Result<Value>> + Send + 'a
where
    S: ActorSource + ?Sized,
{
    let limit = page_size.max(1);
    try_stream! {
        let mut offset = 0u64;
        loop {
            let page = source.fetch_page(dataset_id, offset, limit).await?;
            if page.items.is_empty() {
                tracing::debug!(dataset_id, offset, total = ?page.total, "Dataset exhausted");
                break;
            }
            for item in page.items {
                yield item;
            }
            offset += limit;
        }
    }
}

/// [`dataset_items`] decoded into `T`.
pub fn typed_items<'a, S, T>(
    source: &'a S,
    dataset_id: &'a str,
    page_size: u64,
) -> impl Stream<Item = Result<T>> + Send + 'a
where
    S: ActorSource + ?Sized,
    T: DeserializeOwned + Send + 'a,
{
    dataset_items(source, dataset_id, page_size)
        .map(|item| item.and_then(|value| Ok(serde_json::from_value(value)?)))
}
