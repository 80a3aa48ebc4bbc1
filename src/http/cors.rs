//! Response header finalization
//!
//! Every response leaving the server passes through [`finalize_headers`], so
//! the cross-origin headers are present on file responses, errors and
//! preflights alike.

use hyper::header::{HeaderName, HeaderValue, SERVER};
use hyper::Response;

/// Headers added to every response, in order
pub const CORS_HEADERS: [(&str, &str); 3] = [
    ("access-control-allow-origin", "*"),
    ("access-control-allow-methods", "GET, POST, OPTIONS"),
    ("access-control-allow-headers", "Content-Type"),
];

/// Append the CORS headers and the `Server` header to a response
///
/// hyper adds `Date`, `Content-Length` and connection headers afterwards when
/// it writes the header block.
pub fn finalize_headers<B>(mut response: Response<B>, server_name: &str) -> Response<B> {
    let headers = response.headers_mut();
    for (name, value) in CORS_HEADERS {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }
    if let Ok(value) = HeaderValue::from_str(server_name) {
        headers.insert(SERVER, value);
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::StatusCode;

    #[test]
    fn test_cors_headers_in_order() {
        let response = finalize_headers(Response::new(()), "spa-dev-server");
        let names: Vec<&str> = response
            .headers()
            .keys()
            .map(HeaderName::as_str)
            .take(3)
            .collect();
        assert_eq!(
            names,
            [
                "access-control-allow-origin",
                "access-control-allow-methods",
                "access-control-allow-headers"
            ]
        );
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
        assert_eq!(
            response.headers()["access-control-allow-methods"],
            "GET, POST, OPTIONS"
        );
        assert_eq!(
            response.headers()["access-control-allow-headers"],
            "Content-Type"
        );
        assert_eq!(response.headers()[SERVER], "spa-dev-server");
    }

    #[test]
    fn test_error_responses_are_finalized_too() {
        let mut response = Response::new(());
        *response.status_mut() = StatusCode::NOT_FOUND;
        let response = finalize_headers(response, "spa-dev-server");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
    }

    #[test]
    fn test_existing_cors_value_is_replaced() {
        let response = Response::builder()
            .header("Access-Control-Allow-Origin", "https://example.com")
            .body(())
            .unwrap();
        let response = finalize_headers(response, "spa-dev-server");
        let values: Vec<_> = response
            .headers()
            .get_all("access-control-allow-origin")
            .iter()
            .collect();
        assert_eq!(values, ["*"]);
    }
}
