//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, mount prefix
//! stripping, dispatch to the documentation handler and access logging.

use crate::config::AppState;
use crate::http::{self, path};
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Request context encapsulating information needed for request processing
#[derive(Debug, Default, Clone)]
pub struct RequestContext<'a> {
    /// Path relative to the mount root
    pub path: &'a str,
    pub is_head: bool,
    pub if_none_match: Option<&'a str>,
    pub if_modified_since: Option<&'a str>,
    pub if_range: Option<&'a str>,
    pub range_header: Option<&'a str>,
}

impl<'a> RequestContext<'a> {
    pub fn from_request<B>(req: &'a Request<B>, path: &'a str) -> Self {
        Self {
            path,
            is_head: *req.method() == Method::HEAD,
            if_none_match: header_str(req, "if-none-match"),
            if_modified_since: header_str(req, "if-modified-since"),
            if_range: header_str(req, "if-range"),
            range_header: header_str(req, "range"),
        }
    }
}

fn header_str<'a, B>(req: &'a Request<B>, name: &str) -> Option<&'a str> {
    req.headers().get(name).and_then(|v| v.to_str().ok())
}

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let response = route_request(&req, &state).await;

    if state.config.logging.access_log {
        log_access(&req, &response, peer_addr, started, &state);
    }

    Ok(response)
}

/// Route request: method check, mount prefix, then the documentation handler
pub async fn route_request<B>(req: &Request<B>, state: &AppState) -> Response<Full<Bytes>> {
    // 1. Check HTTP method
    if let Some(resp) = check_http_method(req.method(), state.config.http.enable_cors) {
        return resp;
    }

    // 2. Strip mount prefix
    let mount = state.mount_path.as_str();
    let Some(relative) = path::strip_mount_prefix(req.uri().path(), mount) else {
        return http::build_404_response();
    };

    // 3. Bare mount path: relative links in index.html need the trailing slash
    if relative.is_empty() && !mount.is_empty() {
        let target = req
            .uri()
            .query()
            .map_or_else(|| format!("{mount}/"), |q| format!("{mount}/?{q}"));
        return http::build_redirect_response(&target);
    }

    // 4. Dispatch
    let ctx = RequestContext::from_request(req, relative);
    state.docs.handle(&ctx).await
}

/// Check HTTP method and return appropriate response for non-GET/HEAD methods
fn check_http_method(method: &Method, enable_cors: bool) -> Option<Response<Full<Bytes>>> {
    match *method {
        Method::GET | Method::HEAD => None,
        Method::OPTIONS => Some(http::build_options_response(enable_cors)),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

fn log_access<B>(
    req: &Request<B>,
    response: &Response<Full<Bytes>>,
    peer_addr: SocketAddr,
    started: Instant,
    state: &AppState,
) {
    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = http_version(req.version()).to_string();
    entry.status = response.status().as_u16();
    entry.body_bytes = response.body().size_hint().exact().unwrap_or(0);
    entry.referer = header_str(req, "referer").map(ToString::to_string);
    entry.user_agent = header_str(req, "user-agent").map(ToString::to_string);
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);

    logger::log_access(&entry, &state.access_log_format);
}

const fn http_version(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetFs;
    use crate::config::Config;
    use crate::handler::DocsHandler;
    use http_body_util::BodyExt;

    fn state(base_path: &str) -> AppState {
        let mut config = Config::load_from("/nonexistent/openapi-viewer-test").unwrap();
        config.server.base_path = base_path.to_string();
        let fs = AssetFs::builder()
            .file("index.html", "<html>index</html>")
            .file("swagger-ui.css", "body{}")
            .build();
        AppState::new(config, DocsHandler::with_assets("{}", Arc::new(fs)))
    }

    fn request(method: &str, uri: &str) -> Request<()> {
        Request::builder().method(method).uri(uri).body(()).unwrap()
    }

    #[tokio::test]
    async fn test_mounted_paths() {
        let state = state("/docs");

        let resp = route_request(&request("GET", "/docs/spec"), &state).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.into_body().collect().await.unwrap().to_bytes(), "{}");

        let resp = route_request(&request("GET", "/docs/swagger-ui.css"), &state).await;
        assert_eq!(resp.headers()["Content-Type"], "text/css");

        let resp = route_request(&request("GET", "/docs/"), &state).await;
        assert_eq!(resp.headers()["Content-Type"], "text/html; charset=utf-8");
    }

    #[tokio::test]
    async fn test_outside_mount_is_404() {
        let state = state("/docs");
        assert_eq!(route_request(&request("GET", "/spec"), &state).await.status(), 404);
        assert_eq!(route_request(&request("GET", "/docsx/spec"), &state).await.status(), 404);
    }

    #[tokio::test]
    async fn test_bare_mount_redirects() {
        let state = state("/docs/");
        let resp = route_request(&request("GET", "/docs?x=1"), &state).await;
        assert_eq!(resp.status(), 301);
        assert_eq!(resp.headers()["Location"], "/docs/?x=1");
    }

    #[tokio::test]
    async fn test_root_mount() {
        let state = state("/");
        assert_eq!(route_request(&request("GET", "/spec"), &state).await.status(), 200);
        assert_eq!(route_request(&request("GET", "/"), &state).await.status(), 200);
    }

    #[tokio::test]
    async fn test_methods() {
        let state = state("/docs");
        assert_eq!(route_request(&request("POST", "/docs/spec"), &state).await.status(), 405);
        assert_eq!(route_request(&request("OPTIONS", "/docs/spec"), &state).await.status(), 204);

        let resp = route_request(&request("HEAD", "/docs/spec"), &state).await;
        assert_eq!(resp.status(), 200);
        assert!(resp.into_body().collect().await.unwrap().to_bytes().is_empty());
    }

    #[tokio::test]
    async fn test_handle_request_with_access_log() {
        let state = Arc::new(state("/docs"));
        let peer: SocketAddr = "127.0.0.1:50000".parse().unwrap();
        let resp = handle_request(request("GET", "/docs/spec"), state, peer)
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
    }

    #[test]
    fn test_context_reads_conditional_headers() {
        let req = Request::builder()
            .method("HEAD")
            .uri("/docs/app.js")
            .header("If-None-Match", "\"abc\"")
            .header("Range", "bytes=0-1")
            .body(())
            .unwrap();
        let ctx = RequestContext::from_request(&req, "/app.js");
        assert!(ctx.is_head);
        assert_eq!(ctx.if_none_match, Some("\"abc\""));
        assert_eq!(ctx.range_header, Some("bytes=0-1"));
        assert_eq!(ctx.if_modified_since, None);
    }
}
