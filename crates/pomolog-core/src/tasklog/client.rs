//! TaskLogClient: append to and read back the remote task log.
//!
//! Wire format:
//!
//! - `POST {base}/events?desc=<description>` with an empty body
//! - `GET {base}/events` returning a JSON array of `{ts, desc}` objects

use std::time::Duration;

use reqwest::Client;
use url::Url;

use super::entry::{describe, TaskLogEntry};
use crate::error::Result;

const EVENTS_PATH: &str = "events";

/// HTTP client for the task log service.
#[derive(Debug, Clone)]
pub struct TaskLogClient {
    events_url: Url,
    http_client: Client,
}

impl TaskLogClient {
    /// Create a client for the service rooted at `base_url`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let events_url = events_url(base_url)?;
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            events_url,
            http_client,
        })
    }

    /// Append a completed task. Returns the description actually sent.
    ///
    /// The status code is not inspected: any response counts as recorded,
    /// only transport failures are errors.
    pub async fn record_completion(&self, description: &str) -> Result<String> {
        let desc = describe(description).to_string();

        let mut url = self.events_url.clone();
        url.query_pairs_mut().append_pair("desc", &desc);

        let resp = self.http_client.post(url).send().await?;
        tracing::debug!(status = %resp.status(), desc = %desc, "completion posted");

        Ok(desc)
    }

    /// Fetch the whole log in the order the service returns it.
    pub async fn fetch_log(&self) -> Result<Vec<TaskLogEntry>> {
        let entries: Vec<TaskLogEntry> = self
            .http_client
            .get(self.events_url.clone())
            .send()
            .await?
            .json()
            .await?;

        tracing::debug!(count = entries.len(), "task log fetched");
        Ok(entries)
    }
}

/// `{base}/events`, tolerating a base with or without a trailing slash.
fn events_url(base_url: &str) -> Result<Url> {
    let mut base = Url::parse(base_url)?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base.join(EVENTS_PATH)?)
}
