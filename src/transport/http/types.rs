use crate::app::AnimeService;
use crate::domain::FieldViolation;
use crate::storage::page::{PageRequest, Sort};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

#[derive(Clone)]
pub struct AppState {
    pub anime_service: Arc<AnimeService>,
    /// Page size used when `?size=` is omitted.
    pub default_page_size: u32,
}

impl AppState {
    pub fn new(anime_service: AnimeService, default_page_size: u32) -> Self {
        Self {
            anime_service: Arc::new(anime_service),
            default_page_size,
        }
    }
}

#[derive(Deserialize, Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// Zero-based page index (default 0).
    pub page: Option<u32>,
    /// Page size (default from `ANIME_DEFAULT_PAGE_SIZE`).
    pub size: Option<u32>,
    /// Sort expression, `property[,asc|desc]` with property `id` or `name`.
    pub sort: Option<String>,
}

impl PageParams {
    pub fn to_page_request(&self, default_size: u32) -> Result<PageRequest, String> {
        let mut request = PageRequest::of(
            self.page.unwrap_or(0),
            self.size.unwrap_or(default_size),
        );
        if let Some(sort) = self.sort.as_deref().filter(|s| !s.trim().is_empty()) {
            request = request.with_sort(sort.parse::<Sort>()?);
        }
        Ok(request)
    }
}

#[derive(Deserialize, Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FindByNameParams {
    /// Exact anime name to look up.
    pub name: String,
}

/// Error body returned by every failing endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExceptionDetails {
    pub title: String,
    pub status: u16,
    pub details: String,
    pub developer_message: String,
    pub timestamp: DateTime<Utc>,
    /// Comma-separated names of rejected fields (validation errors only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<String>,
    /// Comma-separated messages, aligned with `fields`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields_message: Option<String>,
}

impl ExceptionDetails {
    pub fn new(
        title: impl Into<String>,
        status: u16,
        details: impl Into<String>,
        developer_message: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            status,
            details: details.into(),
            developer_message: developer_message.into(),
            timestamp: Utc::now(),
            fields: None,
            fields_message: None,
        }
    }

    pub fn with_violations(mut self, violations: &[FieldViolation]) -> Self {
        let fields: Vec<&str> = violations.iter().map(|v| v.field.as_str()).collect();
        let messages: Vec<&str> = violations.iter().map(|v| v.message.as_str()).collect();
        self.fields = Some(fields.join(", "));
        self.fields_message = Some(messages.join(", "));
        self
    }
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
