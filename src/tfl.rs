//! TfL Unified API client
//!
//! This module fetches the current status of a transit line from the TfL
//! Unified API and reduces the response to the single human-readable
//! severity description the status bar displays.

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::lines::Line;

/// Base URL for the TfL Unified API line status endpoint
const TFL_BASE_URL: &str = "https://api.tfl.gov.uk/Line";

/// Errors that can occur when fetching line status
#[derive(Debug, Error)]
pub enum TflError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Missing expected field in response
    #[error("Missing expected field in response: {0}")]
    MissingField(String),
}

/// One element of the top-level response array (one line per query)
#[derive(Debug, Deserialize)]
struct LineStatusResponse {
    #[serde(rename = "lineStatuses", default)]
    line_statuses: Vec<LineStatus>,
}

/// A single status entry for a line
#[derive(Debug, Deserialize)]
struct LineStatus {
    #[serde(rename = "statusSeverityDescription")]
    status_severity_description: String,
}

/// Client for fetching line status from the TfL Unified API
#[derive(Debug, Clone)]
pub struct TflClient {
    client: Client,
}

impl Default for TflClient {
    fn default() -> Self {
        Self::new()
    }
}

impl TflClient {
    /// Create a new TflClient with default settings
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Create a new TflClient with a custom HTTP client
    #[allow(dead_code)]
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Fetch the current status string for the given line
    ///
    /// # Arguments
    /// * `line` - The line to query
    ///
    /// # Returns
    /// * `Ok(String)` - The severity description, e.g. "Good Service"
    /// * `Err(TflError)` - If the request or parsing fails
    pub async fn fetch_status(&self, line: Line) -> Result<String, TflError> {
        let url = format!("{}/{}/Status?detail=False", TFL_BASE_URL, line.api_id());

        let response = self.client.get(&url).send().await?;
        let text = response.text().await?;
        let api_response: Vec<LineStatusResponse> = serde_json::from_str(&text)?;

        extract_status(api_response)
    }
}

/// Reduces the response array to the first line's first severity description.
fn extract_status(response: Vec<LineStatusResponse>) -> Result<String, TflError> {
    let line = response
        .into_iter()
        .next()
        .ok_or_else(|| TflError::MissingField("response array is empty".to_string()))?;

    let status = line
        .line_statuses
        .into_iter()
        .next()
        .ok_or_else(|| TflError::MissingField("lineStatuses".to_string()))?;

    Ok(status.status_severity_description)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<String, TflError> {
        let response: Vec<LineStatusResponse> =
            serde_json::from_str(json).expect("test JSON should parse");
        extract_status(response)
    }

    #[test]
    fn test_extract_status_from_typical_response() {
        let json = r#"[
            {
                "id": "district",
                "name": "District",
                "lineStatuses": [
                    {"statusSeverity": 10, "statusSeverityDescription": "Good Service"}
                ]
            }
        ]"#;

        assert_eq!(parse(json).unwrap(), "Good Service");
    }

    #[test]
    fn test_extract_status_uses_first_entry_when_several() {
        let json = r#"[
            {
                "lineStatuses": [
                    {"statusSeverityDescription": "Minor Delays"},
                    {"statusSeverityDescription": "Good Service"}
                ]
            }
        ]"#;

        assert_eq!(parse(json).unwrap(), "Minor Delays");
    }

    #[test]
    fn test_empty_response_array_is_missing_field() {
        let err = parse("[]").expect_err("empty array should not yield a status");
        assert!(matches!(err, TflError::MissingField(_)));
    }

    #[test]
    fn test_empty_line_statuses_is_missing_field() {
        let json = r#"[{"lineStatuses": []}]"#;
        let err = parse(json).expect_err("no statuses should not yield a status");
        assert!(matches!(err, TflError::MissingField(_)));
        assert!(err.to_string().contains("lineStatuses"));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let result: Result<Vec<LineStatusResponse>, _> = serde_json::from_str("{not json");
        assert!(result.is_err());
    }
}
