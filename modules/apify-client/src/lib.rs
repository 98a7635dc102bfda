pub mod error;
pub mod types;

pub use error::{ApifyError, Result};
pub use types::{
    BasicInfo, CommentActor, DatasetPage, EngagementKind, PostComment, PostCommentsInput,
    PostEngager, PostEngagersInput, PostSearchInput, PostSearchResult, PostStats, ProfileDetail,
    ProfileDetailInput, ProfileLocation, RunData,
};

use serde::de::DeserializeOwned;
use serde::Serialize;
use types::ApiResponse;

pub const DEFAULT_BASE_URL: &str = "https://api.apify.com/v2";

/// Actor for harvestapi/linkedin-post-comments.
pub const LINKEDIN_POST_COMMENTS: &str = "harvestapi/linkedin-post-comments";

/// Actor for the no-cookies post engagers scraper (likers and commenters).
pub const LINKEDIN_POST_ENGAGERS: &str =
    "scraping_solutions/linkedin-posts-engagers-likers-and-commenters-no-cookies";

/// Actor for apimaestro/linkedin-profile-detail.
pub const LINKEDIN_PROFILE_DETAIL: &str = "apimaestro/linkedin-profile-detail";

/// Actor for the no-cookies keyword post search.
pub const LINKEDIN_POST_SEARCH: &str = "apimaestro/linkedin-posts-search-scraper-no-cookies";

const PAGINATION_TOTAL_HEADER: &str = "x-apify-pagination-total";

pub struct ApifyClient {
    client: reqwest::Client,
    token: String,
    base_url: String,
}

impl ApifyClient {
    /// `base_url` is usually [`DEFAULT_BASE_URL`].
    pub fn new(token: String, base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            token,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Start an actor run. Returns immediately with run metadata.
    pub async fn start_run<I>(&self, actor_id: &str, input: &I) -> Result<RunData>
    where
        I: Serialize + ?Sized,
    {
        let url = format!("{}/acts/{}/runs", self.base_url, actor_path(actor_id));
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(input)
            .send()
            .await?;
        let resp = check_status(resp).await?;

        let api_resp: ApiResponse<RunData> = decode(resp).await?;
        Ok(api_resp.data)
    }

    /// Poll until a run completes. Uses `waitForFinish=60` for efficient long-polling.
    pub async fn wait_for_run(&self, run_id: &str) -> Result<RunData> {
        loop {
            let url = format!("{}/actor-runs/{}?waitForFinish=60", self.base_url, run_id);
            let resp = self
                .client
                .get(&url)
                .bearer_auth(&self.token)
                .send()
                .await?;
            let resp = check_status(resp).await?;

            let api_resp: ApiResponse<RunData> = decode(resp).await?;
            let run = api_resp.data;
            if run.is_succeeded() {
                return Ok(run);
            }
            if run.is_failed() {
                return Err(ApifyError::RunFailed {
                    run_id: run.id,
                    status: run.status,
                });
            }
            tracing::debug!(run_id, status = %run.status, "Run still in progress");
        }
    }

    /// Run an actor end-to-end: start it and wait for it to succeed.
    pub async fn call_actor<I>(&self, actor_id: &str, input: &I) -> Result<RunData>
    where
        I: Serialize + ?Sized,
    {
        tracing::info!(actor_id, "Starting Apify actor run");

        let run = self.start_run(actor_id, input).await?;
        tracing::info!(run_id = %run.id, "Apify run started, polling for completion");

        let completed = self.wait_for_run(&run.id).await?;
        tracing::info!(
            run_id = %completed.id,
            dataset_id = %completed.default_dataset_id,
            "Run completed"
        );
        Ok(completed)
    }

    /// Fetch one page of dataset items.
    pub async fn list_items<T: DeserializeOwned>(
        &self,
        dataset_id: &str,
        offset: u64,
        limit: u64,
    ) -> Result<DatasetPage<T>> {
        let url = format!(
            "{}/datasets/{}/items?format=json&offset={}&limit={}",
            self.base_url, dataset_id, offset, limit
        );
        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;
        let resp = check_status(resp).await?;

        let total = resp
            .headers()
            .get(PAGINATION_TOTAL_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());

        let items: Vec<T> = decode(resp).await?;
        tracing::debug!(dataset_id, offset, limit, count = items.len(), ?total, "Fetched dataset page");

        Ok(DatasetPage { items, total })
    }
}

/// Apify addresses `username/actor-name` as `username~actor-name` in URL paths.
pub fn actor_path(actor_id: &str) -> String {
    actor_id.replace('/', "~")
}

/// Read the whole body, then parse it, so malformed JSON surfaces as `Parse`.
async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
    let body = resp.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ApifyError::Api {
        status: status.as_u16(),
        message: body,
    })
}
