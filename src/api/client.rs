use super::types::{ListEnvelope, Question, ReviewCycle, ReviewRecord, Reviewee, User};
use super::ReviewSource;
use crate::config::Config;
use crate::error::ApiError;
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Error bodies are cut to this many bytes before being surfaced
const MAX_ERROR_BODY: usize = 8 << 10;

const AUTH_SCHEMES: [&str; 4] = ["bearer ", "basic ", "token ", "lattice "];

pub struct LatticeClient {
    http: Client,
    base: Url,
    authorization: String,
}

impl LatticeClient {
    pub fn new(api_key: &str, base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        if api_key.trim().is_empty() {
            return Err(ApiError::EmptyApiKey);
        }
        let base = Url::parse(base_url).map_err(|_| ApiError::InvalidUrl(base_url.to_string()))?;
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base,
            authorization: auth_header_value(api_key),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        Self::new(
            &config.api_key,
            &config.base_url,
            Duration::from_secs(config.timeout_sec),
        )
    }

    /// Resolve an absolute URL, a base-relative `/path`, or a relative path
    fn resolve(&self, path_or_url: &str) -> Result<Url, ApiError> {
        let invalid = || ApiError::InvalidUrl(path_or_url.to_string());

        if path_or_url.starts_with("http://") || path_or_url.starts_with("https://") {
            return Url::parse(path_or_url).map_err(|_| invalid());
        }

        if path_or_url.starts_with('/') {
            let (path, query) = match path_or_url.split_once('?') {
                Some((path, query)) => (path, Some(query)),
                None => (path_or_url, None),
            };
            let mut url = self.base.clone();
            let joined = format!("{}{}", self.base.path().trim_end_matches('/'), path);
            url.set_path(&joined);
            url.set_query(query);
            return Ok(url);
        }

        self.base.join(path_or_url).map_err(|_| invalid())
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        debug!(url = %url, "GET");

        let response = self
            .http
            .get(url)
            .header("accept", "application/json")
            .header("Authorization", &self.authorization)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: truncate_body(body.trim()),
            });
        }

        Ok(response.json::<T>().await?)
    }

    async fn get_list<T: DeserializeOwned>(&self, url: Url) -> Result<Vec<T>, ApiError> {
        let envelope: ListEnvelope<T> = self.get_json(url).await?;
        Ok(envelope.data)
    }
}

/// Build the Authorization header, keeping an explicit scheme if the key has one
pub fn auth_header_value(api_key: &str) -> String {
    let key = api_key.trim();
    if key.is_empty() {
        return String::new();
    }
    let lower = key.to_lowercase();
    if AUTH_SCHEMES.iter().any(|scheme| lower.starts_with(scheme)) {
        key.to_string()
    } else {
        format!("Bearer {}", key)
    }
}

fn truncate_body(body: &str) -> String {
    if body.len() <= MAX_ERROR_BODY {
        return body.to_string();
    }
    let mut end = MAX_ERROR_BODY;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    body[..end].to_string()
}

#[async_trait]
impl ReviewSource for LatticeClient {
    async fn current_user(&self) -> Result<User, ApiError> {
        self.get_json(self.resolve("/v1/me")?).await
    }

    async fn list_reports(&self, manager: &User) -> Result<Vec<User>, ApiError> {
        if manager.direct_reports.url.is_empty() {
            return Ok(Vec::new());
        }
        self.get_list(self.resolve(&manager.direct_reports.url)?)
            .await
    }

    async fn list_review_cycles(&self) -> Result<Vec<ReviewCycle>, ApiError> {
        self.get_list(self.resolve("/v1/reviewCycles")?).await
    }

    async fn list_reviewees(&self, cycle: &ReviewCycle) -> Result<Vec<Reviewee>, ApiError> {
        self.get_list(self.resolve(&cycle.reviewees.url)?).await
    }

    async fn list_reviews(
        &self,
        reviews_url: &str,
        limit: usize,
    ) -> Result<Vec<ReviewRecord>, ApiError> {
        let mut url = self.resolve(reviews_url)?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string());
        self.get_list(url).await
    }

    async fn question(&self, id: &str) -> Result<Question, ApiError> {
        self.get_json(self.resolve(&format!("/v1/question/{}", id))?)
            .await
    }

    async fn user(&self, id: &str) -> Result<User, ApiError> {
        self.get_json(self.resolve(&format!("/v1/user/{}", id))?)
            .await
    }
}
