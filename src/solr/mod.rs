mod query;

pub use query::SolrQuery;

use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;
use crate::models::SolrFullResponse;

#[derive(Debug, Error)]
pub enum SolrError {
    #[error("unable to reach solr: {0}")]
    Unreachable(#[from] reqwest::Error),

    #[error("solr returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unable to parse solr response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("solr reported status {0}")]
    Failed(i32),
}

/// Client for the select handler of one Solr core
pub struct SolrClient {
    http: Client,
    core_url: String,
}

impl SolrClient {
    pub fn new(config: &Config) -> Result<Self, SolrError> {
        Self::with_timeout(&config.solr_url, &config.solr_core, config.request_timeout())
    }

    pub fn with_timeout(solr_url: &str, core: &str, timeout: Duration) -> Result<Self, SolrError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            core_url: format!("{}/{}", solr_url.trim_end_matches('/'), core),
        })
    }

    pub fn select_url(&self, query: &SolrQuery, fields: &[&str]) -> String {
        format!(
            "{}/select?q={}&wt=json&fl={}",
            self.core_url,
            query.encode(),
            fields.join(",")
        )
    }

    /// Lookup URL for a single document, advertised back to callers.
    pub fn document_url(&self, id: &str) -> String {
        format!(
            "{}/select?q={}&wt=json",
            self.core_url,
            SolrQuery::new().or("id", id).encode()
        )
    }

    pub async fn select(
        &self,
        query: &SolrQuery,
        fields: &[&str],
    ) -> Result<SolrFullResponse, SolrError> {
        let url = self.select_url(query, fields);
        let resp: SolrFullResponse = serde_json::from_str(&self.get(&url).await?)?;

        if resp.response_header.status != 0 {
            return Err(SolrError::Failed(resp.response_header.status));
        }
        Ok(resp)
    }

    /// Minimal request used to report backend health
    pub async fn ping(&self) -> Result<(), SolrError> {
        let url = format!("{}/select?q=*:*&wt=json&rows=0", self.core_url);
        self.get(&url).await.map(|_| ())
    }

    async fn get(&self, url: &str) -> Result<String, SolrError> {
        debug!("Get response for: {}", url);

        let response = self.http.get(url).send().await.map_err(|e| {
            warn!("Unable to GET {}: {}", url, e);
            SolrError::Unreachable(e)
        })?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(SolrError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}
