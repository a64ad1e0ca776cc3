use serde_json::Value;
use warble_core::AuthGatewayError;

/// Shown whenever neither the server nor the transport produced a usable
/// message.
pub const FALLBACK_ERROR_MESSAGE: &str = "Something went wrong";

/// Pull a displayable message out of an API error body. `message` may be a
/// plain string or an array of strings, which the API uses for per-field
/// validation failures; arrays are joined with `", "`.
fn message_from_body(body: &Value) -> Option<String> {
    match body.get("message")? {
        Value::String(message) if !message.is_empty() => Some(message.clone()),
        Value::Array(parts) => {
            let parts: Vec<&str> = parts.iter().filter_map(Value::as_str).collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(", "))
            }
        }
        _ => None,
    }
}

/// Normalize a non-success response into a displayable error.
pub(crate) async fn error_from_response(response: reqwest::Response) -> AuthGatewayError {
    let message = match response.json::<Value>().await {
        Ok(body) => message_from_body(&body),
        Err(_) => None,
    };
    AuthGatewayError::Api(message.unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string()))
}

/// Normalize a transport-level failure into a displayable error.
pub(crate) fn error_from_transport(error: reqwest::Error) -> AuthGatewayError {
    let message = error.to_string();
    if message.is_empty() {
        AuthGatewayError::Api(FALLBACK_ERROR_MESSAGE.to_string())
    } else {
        AuthGatewayError::Api(message)
    }
}
