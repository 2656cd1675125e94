//! JSON response envelope shared by every API endpoint.

use serde::Serialize;

/// `{ "success": true, "data": ... }` or `{ "success": false, "error": "..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// A successful response carrying `data`.
    #[must_use]
    pub const fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// A failed response carrying a client-safe message.
    #[must_use]
    pub const fn failure(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_shape() {
        let json = serde_json::to_value(ApiResponse::ok(vec![1, 2])).unwrap();
        assert_eq!(json, serde_json::json!({"success": true, "data": [1, 2]}));
    }

    #[test]
    fn test_ok_with_empty_data_keeps_field() {
        let json = serde_json::to_value(ApiResponse::ok(Vec::<u8>::new())).unwrap();
        assert_eq!(json, serde_json::json!({"success": true, "data": []}));
    }

    #[test]
    fn test_failure_shape() {
        let json = serde_json::to_value(ApiResponse::<()>::failure("boom".to_string())).unwrap();
        assert_eq!(json, serde_json::json!({"success": false, "error": "boom"}));
    }
}
