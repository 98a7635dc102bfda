//! In-memory stand-in for the Apify API.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::Value;

use apify_client::{DatasetPage, RunData};
use lead_harvest::ActorSource;

/// Serves canned datasets, one per actor run, in the order they were queued.
#[derive(Default)]
pub struct FakeSource {
    queued: Mutex<VecDeque<String>>,
    datasets: HashMap<String, Vec<Value>>,
    reported_total: Option<u64>,
    drop_empty: bool,
    /// (actor_id, input) for every run started.
    pub runs: Mutex<Vec<(String, Value)>>,
    /// (dataset_id, offset, limit) for every page requested.
    pub pages: Mutex<Vec<(String, u64, u64)>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report this `X-Apify-Pagination-Total` on every page, whatever the dataset holds.
    pub fn with_reported_total(mut self, total: u64) -> Self {
        self.reported_total = Some(total);
        self
    }

    /// Leave empty objects out of each `[offset, offset + limit)` window, the
    /// way the API does for `clean`/`skipEmpty` requests.
    pub fn dropping_empty_items(mut self) -> Self {
        self.drop_empty = true;
        self
    }

    /// Queue a run whose dataset holds `items`.
    pub fn with_run(mut self, items: Vec<Value>) -> Self {
        let dataset_id = format!("dataset-{}", self.datasets.len());
        self.queued.get_mut().unwrap().push_back(dataset_id.clone());
        self.datasets.insert(dataset_id, items);
        self
    }

    pub fn runs(&self) -> Vec<(String, Value)> {
        self.runs.lock().unwrap().clone()
    }

    pub fn pages(&self) -> Vec<(String, u64, u64)> {
        self.pages.lock().unwrap().clone()
    }
}

#[async_trait]
impl ActorSource for FakeSource {
    async fn run_actor(&self, actor_id: &str, input: Value) -> Result<RunData> {
        self.runs
            .lock()
            .unwrap()
            .push((actor_id.to_string(), input));

        let dataset_id = self
            .queued
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| anyhow!("Run run-x finished with status: FAILED"))?;

        Ok(RunData {
            id: format!("run-{dataset_id}"),
            status: "SUCCEEDED".to_string(),
            default_dataset_id: dataset_id,
            started_at: None,
            finished_at: None,
        })
    }

    async fn fetch_page(
        &self,
        dataset_id: &str,
        offset: u64,
        limit: u64,
    ) -> Result<DatasetPage<Value>> {
        self.pages
            .lock()
            .unwrap()
            .push((dataset_id.to_string(), offset, limit));

        let all = self
            .datasets
            .get(dataset_id)
            .ok_or_else(|| anyhow!("API error (status 404): dataset {dataset_id} not found"))?;
        let start = (offset as usize).min(all.len());
        let end = (start + limit as usize).min(all.len());

        let items = all[start..end]
            .iter()
            .filter(|item| !(self.drop_empty && item.as_object().is_some_and(|o| o.is_empty())))
            .cloned()
            .collect();

        Ok(DatasetPage {
            items,
            total: self.reported_total,
        })
    }
}
