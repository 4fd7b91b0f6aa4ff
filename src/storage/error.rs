use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Failures surfaced by the Storage API client.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Non-2xx response carrying the API's structured `{error, code}` payload.
    #[error("{message}. Exception code {code}")]
    Remote {
        status: u16,
        message: String,
        code: String,
    },

    /// Non-2xx response whose body is not a JSON error payload.
    #[error("HTTP {status} with unparseable error body: {body}")]
    MalformedError {
        status: u16,
        body: String,
        #[source]
        source: serde_json::Error,
    },

    /// Connection, IO or response decoding failure.
    #[error("storage API request failed: {0}")]
    Transport(#[from] ureq::Error),
}

impl StorageError {
    /// Build the error for a non-2xx response from its raw body.
    pub fn from_response(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ErrorBody>(body) {
            Ok(payload) => StorageError::Remote {
                status,
                message: payload.error.map(render_value).unwrap_or_default(),
                code: payload.code.map(render_value).unwrap_or_default(),
            },
            Err(source) => StorageError::MalformedError {
                status,
                body: body.trim().to_string(),
                source,
            },
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<Value>,
    #[serde(default)]
    code: Option<Value>,
}

fn render_value(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_payload_becomes_remote_error() {
        let err = StorageError::from_response(
            404,
            r#"{"error":"Configuration 123 not found","code":"notFound","status":"error"}"#,
        );
        assert!(matches!(err, StorageError::Remote { status: 404, .. }));
        assert_eq!(
            err.to_string(),
            "Configuration 123 not found. Exception code notFound"
        );
    }

    #[test]
    fn numeric_code_is_rendered() {
        let err = StorageError::from_response(401, r#"{"error":"Invalid access token","code":401}"#);
        assert_eq!(err.to_string(), "Invalid access token. Exception code 401");
    }

    #[test]
    fn non_json_body_is_malformed() {
        let err = StorageError::from_response(502, "<html>Bad Gateway</html>\n");
        match err {
            StorageError::MalformedError { status, body, .. } => {
                assert_eq!(status, 502);
                assert_eq!(body, "<html>Bad Gateway</html>");
            }
            other => panic!("expected malformed error, got {other:?}"),
        }
    }
}
