//! Request dispatch module
//!
//! Entry point for HTTP request processing: method check, root path rewrite,
//! static file serving and header finalization.

use crate::config::AppState;
use crate::handler::static_files;
use crate::http;
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderName, IF_MODIFIED_SINCE, IF_NONE_MATCH, RANGE};
use hyper::http::request::Parts;
use hyper::http::uri::PathAndQuery;
use hyper::{HeaderMap, Method, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    /// Path after the root rewrite, still percent-encoded
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub is_head: bool,
    pub if_none_match: Option<&'a str>,
    pub if_modified_since: Option<&'a str>,
    pub range_header: Option<&'a str>,
}

/// Map the root URLs onto the entry file; every other target is left alone
///
/// `request_target` is the path and query as sent. A query string means the
/// target is not a root URL, so `/?v=2` is served like any other directory.
///
/// # Examples
/// ```
/// use spa_dev_server::handler::resolve_path;
/// assert_eq!(resolve_path("/", "/dev-server.html"), "/dev-server.html");
/// assert_eq!(resolve_path("/index.html", "/dev-server.html"), "/dev-server.html");
/// assert_eq!(resolve_path("/app.js", "/dev-server.html"), "/app.js");
/// assert_eq!(resolve_path("/?v=2", "/dev-server.html"), "/?v=2");
/// ```
pub fn resolve_path<'a>(request_target: &'a str, entry_path: &'a str) -> &'a str {
    match request_target {
        "/" | "/index.html" => entry_path,
        _ => request_target,
    }
}

/// Main entry point for HTTP request handling
///
/// Every response, including errors and preflights, leaves through
/// [`http::finalize_headers`]. Request bodies are never read.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let (parts, _) = req.into_parts();

    let response = match parts.method {
        Method::GET | Method::HEAD => handle_get(&parts, &state).await,
        Method::OPTIONS => http::build_options_response(),
        ref method => {
            logger::log_warning(&format!(
                "Method not allowed: {method} {}",
                parts.uri.path()
            ));
            http::build_405_response()
        }
    };

    Ok(http::finalize_headers(
        response,
        &state.config.http.server_name,
    ))
}

/// Serve a GET or HEAD request from the root directory
pub async fn handle_get(parts: &Parts, state: &AppState) -> Response<Full<Bytes>> {
    let headers = &parts.headers;

    let target = parts
        .uri
        .path_and_query()
        .map_or_else(|| parts.uri.path(), PathAndQuery::as_str);
    let rewritten = resolve_path(target, &state.entry_path) != target;
    let (path, query) = if rewritten {
        (state.entry_path.as_str(), None)
    } else {
        (parts.uri.path(), parts.uri.query())
    };

    let ctx = RequestContext {
        path,
        query,
        is_head: parts.method == Method::HEAD,
        if_none_match: header_str(headers, &IF_NONE_MATCH),
        if_modified_since: header_str(headers, &IF_MODIFIED_SINCE),
        range_header: header_str(headers, &RANGE),
    };

    static_files::serve_path(
        &ctx,
        &state.config.server.root,
        &state.config.http.index_files,
    )
    .await
}

fn header_str<'a>(headers: &'a HeaderMap, name: &HeaderName) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use http_body_util::BodyExt;
    use hyper::StatusCode;
    use std::fs;

    const ENTRY: &str = "/dev-server.html";

    #[test]
    fn test_root_paths_are_rewritten() {
        assert_eq!(resolve_path("/", ENTRY), ENTRY);
        assert_eq!(resolve_path("/index.html", ENTRY), ENTRY);
    }

    #[test]
    fn test_other_paths_are_unchanged() {
        for path in [
            "/dev-server.html",
            "/index.htm",
            "/index.html/",
            "/sub/index.html",
            "/sub/",
            "/INDEX.HTML",
            "/?v=2",
            "/index.html?x=1",
            "",
        ] {
            assert_eq!(resolve_path(path, ENTRY), path);
        }
    }

    fn state_for(dir: &std::path::Path) -> Arc<AppState> {
        let config = Config::load(dir).unwrap();
        Arc::new(AppState::new(config))
    }

    fn request(method: Method, uri: &str) -> Request<()> {
        Request::builder().method(method).uri(uri).body(()).unwrap()
    }

    async fn body_of(response: Response<Full<Bytes>>) -> Bytes {
        response.into_body().collect().await.unwrap().to_bytes()
    }

    #[tokio::test]
    async fn test_root_serves_entry_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("dev-server.html"), "<h1>entry</h1>").unwrap();
        fs::write(dir.path().join("index.html"), "<h1>other index</h1>").unwrap();
        let state = state_for(dir.path());

        for uri in ["/", "/index.html", "/dev-server.html"] {
            let response = handle_request(request(Method::GET, uri), Arc::clone(&state))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{uri}");
            assert_eq!(
                response.headers()["content-type"],
                "text/html; charset=utf-8"
            );
            assert_eq!(body_of(response).await, "<h1>entry</h1>", "{uri}");
        }
    }

    #[tokio::test]
    async fn test_query_string_skips_rewrite() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("dev-server.html"), "ENTRY").unwrap();
        fs::write(dir.path().join("index.html"), "OTHER").unwrap();
        let state = state_for(dir.path());

        for uri in ["/?v=2", "/index.html?x=1"] {
            let response = handle_request(request(Method::GET, uri), Arc::clone(&state))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{uri}");
            assert_eq!(body_of(response).await, "OTHER", "{uri}");
        }
    }

    #[tokio::test]
    async fn test_query_on_root_without_index_lists_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("dev-server.html"), "ENTRY").unwrap();
        let state = state_for(dir.path());

        let response = handle_request(request(Method::GET, "/?v=2"), state)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_of(response).await;
        let html = String::from_utf8_lossy(&body);
        assert!(html.contains("Directory listing for /"), "{html}");
        assert!(html.contains("dev-server.html"));
    }

    #[tokio::test]
    async fn test_head_mirrors_get_without_body() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("dev-server.html"), "<h1>entry</h1>").unwrap();
        let state = state_for(dir.path());

        let response = handle_request(request(Method::HEAD, "/"), state)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["content-length"], "14");
        assert!(body_of(response).await.is_empty());
    }

    #[tokio::test]
    async fn test_cors_headers_on_every_status() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("dev-server.html"), "<h1>entry</h1>").unwrap();
        let state = state_for(dir.path());

        let cases = [
            (Method::GET, "/", StatusCode::OK),
            (Method::GET, "/missing.js", StatusCode::NOT_FOUND),
            (Method::OPTIONS, "/api", StatusCode::NO_CONTENT),
            (Method::POST, "/", StatusCode::METHOD_NOT_ALLOWED),
            (Method::DELETE, "/missing.js", StatusCode::METHOD_NOT_ALLOWED),
        ];
        for (method, uri, status) in cases {
            let response = handle_request(request(method.clone(), uri), Arc::clone(&state))
                .await
                .unwrap();
            assert_eq!(response.status(), status, "{method} {uri}");
            let headers = response.headers();
            assert_eq!(headers["access-control-allow-origin"], "*");
            assert_eq!(
                headers["access-control-allow-methods"],
                "GET, POST, OPTIONS"
            );
            assert_eq!(headers["access-control-allow-headers"], "Content-Type");
            assert_eq!(headers["server"], "spa-dev-server");
        }
    }

    #[tokio::test]
    async fn test_missing_entry_file_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_for(dir.path());

        let response = handle_request(request(Method::GET, "/"), state)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
