use serde::{Deserialize, Serialize};

use super::ApiError;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// `?data=<place>` carried by every lookup route.
#[derive(Debug, Default, Deserialize)]
pub struct LocationQuery {
    pub data: Option<String>,
}

impl LocationQuery {
    /// The trimmed search text, rejecting a missing or blank value.
    pub fn search_query(&self) -> Result<&str, ApiError> {
        match self.data.as_deref().map(str::trim) {
            Some(query) if !query.is_empty() => Ok(query),
            _ => Err(ApiError::validation("Query parameter 'data' is required")),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SystemStatus {
    pub version: String,
    pub uptime: u64,
    pub locations: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_query_is_rejected() {
        let params = LocationQuery {
            data: Some("   ".to_string()),
        };
        assert!(params.search_query().is_err());
        assert!(LocationQuery::default().search_query().is_err());
    }

    #[test]
    fn query_is_trimmed() {
        let params = LocationQuery {
            data: Some("  seattle ".to_string()),
        };
        assert_eq!(params.search_query().unwrap(), "seattle");
    }

    #[test]
    fn error_body_omits_data() {
        let body = serde_json::to_value(ApiResponse::<()>::error("nope")).unwrap();
        assert_eq!(body, serde_json::json!({"success": false, "error": "nope"}));
    }
}
