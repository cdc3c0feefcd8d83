use axum::{
    extract::State,
    http::{HeaderMap, HeaderName, StatusCode},
    middleware::Next,
    response::Response,
};
use zeroize::Zeroizing;

use inkpost_auth::Authenticator;

use crate::app::errors;
use crate::context::AuthContext;

#[derive(Debug, Clone)]
pub struct AuthState {
    pub authenticator: Authenticator,
    pub header: HeaderName,
}

/// Reject the request unless the credential header validates.
///
/// Every denial produces the same response, whatever the cause.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token(req.headers(), &state.header).ok_or_else(unauthorized)?;

    // Store I/O and PBKDF2 are blocking; keep them off the async workers.
    let authenticator = state.authenticator.clone();
    let authorized = tokio::task::spawn_blocking(move || authenticator.authorize(&token))
        .await
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, "credential validation task failed");
            false
        });

    if !authorized {
        tracing::info!(
            method = %req.method(),
            path = %req.uri().path(),
            "request denied by auth guard"
        );
        return Err(unauthorized());
    }

    req.extensions_mut()
        .insert(AuthContext::new(state.authenticator.mechanism()));

    Ok(next.run(req).await)
}

/// The secret is opaque bytes; only surrounding ASCII whitespace is dropped.
fn extract_token(headers: &HeaderMap, name: &HeaderName) -> Option<Zeroizing<Vec<u8>>> {
    let value = headers.get(name)?.as_bytes().trim_ascii();
    if value.is_empty() {
        return None;
    }
    Some(Zeroizing::new(value.to_vec()))
}

fn unauthorized() -> Response {
    errors::json_error(StatusCode::UNAUTHORIZED, "unauthorized", "Unauthorized action!")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn extract_token_requires_non_empty_header() {
        let name = HeaderName::from_static("x-auth-token");
        let mut headers = HeaderMap::new();
        assert!(extract_token(&headers, &name).is_none());

        headers.insert(&name, HeaderValue::from_static("   "));
        assert!(extract_token(&headers, &name).is_none());

        headers.insert(&name, HeaderValue::from_static(" abc123 "));
        assert_eq!(extract_token(&headers, &name).unwrap().as_slice(), b"abc123");
    }

    #[test]
    fn non_ascii_header_bytes_are_kept_verbatim() {
        let name = HeaderName::from_static("x-auth-token");
        let mut headers = HeaderMap::new();
        headers.insert(&name, HeaderValue::from_bytes("pässwörd".as_bytes()).unwrap());
        assert_eq!(extract_token(&headers, &name).unwrap().as_slice(), "pässwörd".as_bytes());
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let configured = HeaderName::from_bytes(b"X-Auth-Token").unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static("x-auth-token"), HeaderValue::from_static("t"));
        assert!(extract_token(&headers, &configured).is_some());
    }
}
