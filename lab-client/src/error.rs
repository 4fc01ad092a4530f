/// Failures surfaced by the HTTP client layer.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// Transport failure (`status` is `None`) or a non-2xx response.
    #[error("{}", network_display(.status, .message))]
    Network { status: Option<u16>, message: String },

    /// The body was not JSON, or did not match the endpoint's schema.
    #[error("Unexpected response: {message}")]
    Decode { message: String },

    #[error("Invalid API base URL '{url}': {reason}")]
    Config { url: String, reason: String },
}

fn network_display(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(code) => format!("HTTP {code}: {message}"),
        None => message.to_string(),
    }
}

impl ApiError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Network { status: None, message: message.into() }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode { message: message.into() }
    }

    /// Build a `Network` error from a non-2xx response body.
    ///
    /// The backend reports failures as `{"detail": ...}`; when that shape is
    /// present the detail becomes the message, otherwise the raw body is used.
    pub fn from_status(status: u16, body: &str) -> Self {
        let detail = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| match v.get("detail")? {
                serde_json::Value::String(s) => Some(s.clone()),
                other => Some(other.to_string()),
            });
        let message = detail.unwrap_or_else(|| body.trim().to_string());
        Self::Network { status: Some(status), message }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Network { status, .. } => *status,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_string_becomes_message() {
        let err = ApiError::from_status(404, r#"{"detail": "File not found"}"#);
        assert_eq!(
            err,
            ApiError::Network { status: Some(404), message: "File not found".into() }
        );
        assert_eq!(err.to_string(), "HTTP 404: File not found");
    }

    #[test]
    fn test_structured_detail_is_compact_json() {
        let err = ApiError::from_status(422, r#"{"detail": [{"loc": ["body"], "msg": "bad"}]}"#);
        assert_eq!(err.status(), Some(422));
        match err {
            ApiError::Network { message, .. } => {
                assert_eq!(message, r#"[{"loc":["body"],"msg":"bad"}]"#)
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_plain_body_used_verbatim() {
        let err = ApiError::from_status(502, "Bad Gateway\n");
        assert_eq!(err.to_string(), "HTTP 502: Bad Gateway");
    }

    #[test]
    fn test_transport_error_has_no_status() {
        let err = ApiError::transport("connection refused");
        assert_eq!(err.status(), None);
        assert_eq!(err.to_string(), "connection refused");
    }
}
