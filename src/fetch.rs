use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::model::{CategoryMap, Department, Regulation, RegulationCategorySnapshot, SemesterMap};

/// Why a course query produced no data. Callers degrade the affected slot
/// to its empty form; neither kind is fatal to the dashboard.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("malformed response from {endpoint}: {source}")]
    MalformedResponse {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

/// The three idempotent course queries the dashboard depends on. Tests
/// substitute scripted implementations; production uses [`HttpFetcher`].
#[async_trait]
pub trait DataFetcher: Send + Sync {
    async fn fetch_semester_data(
        &self,
        department: &Department,
        regulation: &Regulation,
    ) -> Result<SemesterMap, FetchError>;

    async fn fetch_category_data(
        &self,
        department: &Department,
        regulation: &Regulation,
    ) -> Result<CategoryMap, FetchError>;

    async fn fetch_all_regulations_category_data(
        &self,
        department: &Department,
    ) -> Result<RegulationCategorySnapshot, FetchError>;
}

/// Course queries against the backend HTTP API.
pub struct HttpFetcher {
    http: Client,
    base_url: String,
}

impl HttpFetcher {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, FetchError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "issuing course query");
        let body = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        serde_json::from_str(&body).map_err(|source| FetchError::MalformedResponse {
            endpoint: path.to_string(),
            source,
        })
    }
}

#[async_trait]
impl DataFetcher for HttpFetcher {
    async fn fetch_semester_data(
        &self,
        department: &Department,
        regulation: &Regulation,
    ) -> Result<SemesterMap, FetchError> {
        self.get_json(
            "/courses/semester",
            &[
                ("department", department.name.as_str()),
                ("regulation", regulation.as_str()),
            ],
        )
        .await
    }

    async fn fetch_category_data(
        &self,
        department: &Department,
        regulation: &Regulation,
    ) -> Result<CategoryMap, FetchError> {
        self.get_json(
            "/courses/category",
            &[
                ("department", department.name.as_str()),
                ("regulation", regulation.as_str()),
            ],
        )
        .await
    }

    async fn fetch_all_regulations_category_data(
        &self,
        department: &Department,
    ) -> Result<RegulationCategorySnapshot, FetchError> {
        self.get_json(
            "/courses/category/all",
            &[("department", department.name.as_str())],
        )
        .await
    }
}
