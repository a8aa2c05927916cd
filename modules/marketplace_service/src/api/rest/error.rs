//! HTTP error mapping to RFC-9457 Problem Details

use crate::contract::MarketplaceError;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// RFC-9457 Problem Details for HTTP API errors
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Problem {
    /// A URI reference that identifies the problem type
    #[serde(rename = "type")]
    pub type_uri: String,

    /// A short, human-readable summary of the problem type
    pub title: String,

    /// The HTTP status code
    pub status: u16,

    /// A human-readable explanation specific to this occurrence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// A URI reference that identifies the specific occurrence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

impl Problem {
    pub fn new(status: StatusCode, title: impl Into<String>) -> Self {
        Self {
            type_uri: format!("https://httpstatuses.io/{}", status.as_u16()),
            title: title.into(),
            status: status.as_u16(),
            detail: None,
            instance: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

impl From<MarketplaceError> for Problem {
    fn from(error: MarketplaceError) -> Self {
        map_domain_error(error)
    }
}

/// Map domain errors to HTTP Problem Details
pub fn map_domain_error(error: MarketplaceError) -> Problem {
    match error {
        MarketplaceError::Unauthorized => Problem::new(StatusCode::UNAUTHORIZED, "Unauthorized")
            .with_detail("Authentication required"),

        MarketplaceError::Forbidden { resource, .. } => Problem::new(StatusCode::FORBIDDEN, "Forbidden")
            .with_detail(format!("You do not have access to this {}", resource)),

        MarketplaceError::NotFound { resource, id } => {
            Problem::new(StatusCode::NOT_FOUND, format!("{} Not Found", capitalize(&resource)))
                .with_detail(format!("{} with id '{}' was not found", resource, id))
        }

        MarketplaceError::Validation { message } => {
            Problem::new(StatusCode::BAD_REQUEST, "Validation Error").with_detail(message)
        }

        MarketplaceError::Internal => Problem::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            .with_detail("An unexpected error occurred"),
    }
}

/// Malformed or missing JSON bodies are client errors
pub fn map_json_rejection(rejection: JsonRejection) -> Problem {
    tracing::debug!(error = %rejection.body_text(), "Rejected request body");
    Problem::new(StatusCode::BAD_REQUEST, "Invalid Request Body").with_detail(rejection.body_text())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_error_kind() {
        let cases = [
            (MarketplaceError::Unauthorized, 401),
            (MarketplaceError::forbidden("photo", "p1"), 403),
            (MarketplaceError::not_found("photo", "p1"), 404),
            (MarketplaceError::validation("name is required"), 400),
            (MarketplaceError::Internal, 500),
        ];
        for (error, status) in cases {
            assert_eq!(map_domain_error(error).status, status);
        }
    }

    #[test]
    fn internal_error_hides_details() {
        let problem = map_domain_error(MarketplaceError::Internal);
        assert_eq!(problem.detail.as_deref(), Some("An unexpected error occurred"));
    }

    #[test]
    fn not_found_title_names_resource() {
        let problem = map_domain_error(MarketplaceError::not_found("storefront", "abc"));
        assert_eq!(problem.title, "Storefront Not Found");
    }
}
