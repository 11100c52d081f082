use axum::{extract::Request, http::HeaderMap, middleware::Next, response::Response};

/// Optional tenant selection for the request, parsed from the
/// `x-client-id` header. `None` is the administrative all-tenants
/// context; services treat it as "no filter".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClientScope(pub Option<i32>);

impl ClientScope {
    pub fn client_id(&self) -> Option<i32> {
        self.0
    }

    /// The selected tenant, or a validation error for operations that
    /// require one.
    pub fn required(&self) -> Result<i32, crate::error::ApiError> {
        self.0.ok_or_else(|| {
            crate::error::ApiError::bad_request("A client must be selected for this operation")
        })
    }
}

/// Middleware that extracts the tenant context header. An unparsable
/// value degrades to "no client selected" rather than failing the
/// request.
pub async fn client_context_middleware(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Response {
    let scope = parse_scope(&headers);
    request.extensions_mut().insert(scope);
    next.run(request).await
}

fn parse_scope(headers: &HeaderMap) -> ClientScope {
    let client_id = headers
        .get("x-client-id")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<i32>().ok());
    ClientScope(client_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("x-client-id", HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn parses_valid_client_id() {
        assert_eq!(parse_scope(&headers_with("42")), ClientScope(Some(42)));
    }

    #[test]
    fn missing_or_invalid_header_is_unscoped() {
        assert_eq!(parse_scope(&HeaderMap::new()), ClientScope(None));
        assert_eq!(parse_scope(&headers_with("not-a-number")), ClientScope(None));
        assert_eq!(parse_scope(&headers_with("")), ClientScope(None));
    }

    #[test]
    fn required_scope_errors_when_absent() {
        assert!(ClientScope(None).required().is_err());
        assert_eq!(ClientScope(Some(3)).required().unwrap(), 3);
    }
}
