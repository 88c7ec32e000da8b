use thiserror::Error;

/// Errors returned by the storefront REST client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status. `message` is taken from
    /// the response body when one could be read.
    #[error("{message} (HTTP {status})")]
    Api { status: u16, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl ClientError {
    /// HTTP status of an API error, if this is one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
            ClientError::Deserialize { .. } | ClientError::InvalidBaseUrl { .. } => None,
        }
    }

    /// Text suitable for an alert: the backend's own message for API
    /// errors, the error's display form otherwise.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Pulls a human-readable message out of an error response body.
///
/// Tries a JSON `message` field, then a JSON `error` field, then the raw
/// text, then the status reason phrase.
pub(crate) fn extract_error_message(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error"] {
            if let Some(msg) = json.get(key).and_then(serde_json::Value::as_str) {
                if !msg.trim().is_empty() {
                    return msg.trim().to_string();
                }
            }
        }
    }
    let raw = body.trim();
    if !raw.is_empty() {
        return raw.to_string();
    }
    status
        .canonical_reason()
        .map_or_else(|| format!("HTTP {}", status.as_u16()), str::to_string)
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::*;

    #[test]
    fn prefers_json_message_field() {
        let msg = extract_error_message(
            StatusCode::BAD_REQUEST,
            r#"{"message":"Name already taken","error":"conflict"}"#,
        );
        assert_eq!(msg, "Name already taken");
    }

    #[test]
    fn falls_back_to_json_error_field() {
        let msg = extract_error_message(StatusCode::BAD_REQUEST, r#"{"error":"bad category"}"#);
        assert_eq!(msg, "bad category");
    }

    #[test]
    fn falls_back_to_raw_text() {
        let msg = extract_error_message(StatusCode::BAD_GATEWAY, "  upstream timed out \n");
        assert_eq!(msg, "upstream timed out");
    }

    #[test]
    fn json_without_message_uses_raw_body() {
        let msg = extract_error_message(StatusCode::BAD_REQUEST, r#"{"code":7}"#);
        assert_eq!(msg, r#"{"code":7}"#);
    }

    #[test]
    fn empty_body_uses_reason_phrase() {
        let msg = extract_error_message(StatusCode::NOT_FOUND, "");
        assert_eq!(msg, "Not Found");
    }

    #[test]
    fn user_message_strips_status_for_api_errors() {
        let err = ClientError::Api {
            status: 500,
            message: "database offline".to_string(),
        };
        assert_eq!(err.user_message(), "database offline");
        assert_eq!(err.to_string(), "database offline (HTTP 500)");
        assert_eq!(err.status(), Some(500));
    }
}
