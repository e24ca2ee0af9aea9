//! Typed HTTP client for the anime REST API.

use crate::domain::{Anime, AnimePostRequestBody, AnimePutRequestBody};
use crate::storage::page::{Page, PageRequest, SortDirection};
use reqwest::{Response, StatusCode};
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected status {status}: {body}")]
    Status { status: StatusCode, body: String },
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status(),
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Clone, Debug)]
pub struct AnimeClient {
    http: reqwest::Client,
    base_url: String,
}

impl AnimeClient {
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self::with_client(http, base_url))
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn list(&self, request: PageRequest) -> ClientResult<Page<Anime>> {
        let mut query = vec![
            ("page", request.page.to_string()),
            ("size", request.size.to_string()),
        ];
        if let Some(sort) = request.sort {
            let dir = match sort.direction {
                SortDirection::Asc => "asc",
                SortDirection::Desc => "desc",
            };
            query.push(("sort", format!("{},{}", sort.property.column(), dir)));
        }
        let resp = self.http.get(self.url("/animes")).query(&query).send().await?;
        Ok(expect_status(resp, StatusCode::OK).await?.json().await?)
    }

    pub async fn list_all(&self) -> ClientResult<Vec<Anime>> {
        let resp = self.http.get(self.url("/animes/all")).send().await?;
        Ok(expect_status(resp, StatusCode::OK).await?.json().await?)
    }

    pub async fn find_by_id(&self, id: i64) -> ClientResult<Anime> {
        let resp = self
            .http
            .get(self.url(&format!("/animes/{}", id)))
            .send()
            .await?;
        Ok(expect_status(resp, StatusCode::OK).await?.json().await?)
    }

    pub async fn find_by_name(&self, name: &str) -> ClientResult<Vec<Anime>> {
        let resp = self
            .http
            .get(self.url("/animes/find"))
            .query(&[("name", name)])
            .send()
            .await?;
        Ok(expect_status(resp, StatusCode::OK).await?.json().await?)
    }

    pub async fn save(&self, body: &AnimePostRequestBody) -> ClientResult<Anime> {
        let resp = self.http.post(self.url("/animes")).json(body).send().await?;
        Ok(expect_status(resp, StatusCode::CREATED).await?.json().await?)
    }

    pub async fn replace(&self, body: &AnimePutRequestBody) -> ClientResult<()> {
        let resp = self.http.put(self.url("/animes")).json(body).send().await?;
        expect_status(resp, StatusCode::NO_CONTENT).await?;
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        let resp = self
            .http
            .delete(self.url(&format!("/animes/{}", id)))
            .send()
            .await?;
        expect_status(resp, StatusCode::NO_CONTENT).await?;
        Ok(())
    }
}

async fn expect_status(resp: Response, expected: StatusCode) -> ClientResult<Response> {
    let status = resp.status();
    if status == expected {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ClientError::Status { status, body })
}
