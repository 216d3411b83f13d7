//! Documentation UI handler
//!
//! Serves the bundled OpenAPI viewer and the specification document. Paths
//! are relative to the mount root; the host strips any prefix beforehand.

use crate::assets::{self, AssetFile, AssetSource, ENTRY_DOCUMENT};
use crate::error::AssetError;
use crate::handler::router::RequestContext;
use crate::http::cache::{self, CachePolicy};
use crate::http::range::RangeParseResult;
use crate::http::response::{self, Validators};
use crate::http::{self, mime, path};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Request, Response};
use std::sync::Arc;

/// Lookup key answered with the specification document
pub const SPEC_KEY: &str = "spec";

/// Missing files with these suffixes are real 404s, never the entry document
const NO_FALLBACK_SUFFIXES: [&str; 3] = [".js", ".css", ".png"];

/// Serves one specification document plus the UI assets around it.
///
/// Cheap to clone; all state is immutable and shared.
#[derive(Clone)]
pub struct DocsHandler {
    spec: Bytes,
    assets: Arc<dyn AssetSource>,
    cache_policy: CachePolicy,
}

impl DocsHandler {
    /// Handler over the UI bundle compiled into the binary
    pub fn new(spec: impl Into<Bytes>) -> Self {
        Self::with_assets(spec, assets::bundled())
    }

    pub fn with_assets(spec: impl Into<Bytes>, assets: Arc<dyn AssetSource>) -> Self {
        Self {
            spec: spec.into(),
            assets,
            cache_policy: CachePolicy::default(),
        }
    }

    #[must_use]
    pub fn with_cache_policy(mut self, cache_policy: CachePolicy) -> Self {
        self.cache_policy = cache_policy;
        self
    }

    /// Serve a request whose path is already relative to the mount root
    pub async fn serve<B>(&self, req: &Request<B>) -> Response<Full<Bytes>> {
        let ctx = RequestContext::from_request(req, req.uri().path());
        self.handle(&ctx).await
    }

    /// Main dispatch: spec document, asset, SPA fallback or error
    pub async fn handle(&self, ctx: &RequestContext<'_>) -> Response<Full<Bytes>> {
        let key = path::lookup_key(ctx.path);

        if key == SPEC_KEY {
            return response::build_json_response(self.spec.clone(), ctx.is_head);
        }

        let key = if key.is_empty() {
            ENTRY_DOCUMENT.to_string()
        } else {
            key
        };

        match self.open_with_fallback(&key).await {
            Ok(file) => self.build_asset_response(&file, ctx),
            Err(AssetError::NotFound(_)) => http::build_404_response(),
            Err(err) => {
                logger::log_error(&format!("Failed to serve '{}': {err}", ctx.path));
                http::build_500_response()
            }
        }
    }

    /// Open `key`, falling back to the entry document for client-side routes
    async fn open_with_fallback(&self, key: &str) -> Result<AssetFile, AssetError> {
        match self.assets.open(key).await {
            Err(err) if err.is_not_found() && !has_static_suffix(key) => {
                self.assets.open(ENTRY_DOCUMENT).await
            }
            result => result,
        }
    }

    fn build_asset_response(
        &self,
        file: &AssetFile,
        ctx: &RequestContext<'_>,
    ) -> Response<Full<Bytes>> {
        let last_modified = file.modified.as_ref().map(cache::format_http_date);
        let cache_control = self.cache_policy.to_header_value();
        let validators = Validators {
            etag: &file.etag,
            last_modified: last_modified.as_deref(),
            cache_control: &cache_control,
        };

        if cache::is_not_modified(
            ctx.if_none_match,
            ctx.if_modified_since,
            &file.etag,
            file.modified.as_ref(),
        ) {
            return response::build_304_response(&validators);
        }

        let content_type = mime::get_content_type(file.extension(), &file.data);

        if cache::check_if_range(ctx.if_range, &file.etag, file.modified.as_ref()) {
            match http::parse_range_header(ctx.range_header, file.data.len()) {
                RangeParseResult::Valid(range) => {
                    return response::build_partial_response(
                        &file.data,
                        &content_type,
                        &validators,
                        range,
                        ctx.is_head,
                    );
                }
                RangeParseResult::NotSatisfiable => {
                    return response::build_416_response(file.data.len());
                }
                RangeParseResult::None => {}
            }
        }

        response::build_cached_response(file.data.clone(), &content_type, &validators, ctx.is_head)
    }
}

/// Whether a missing `key` must stay a 404 instead of falling back
pub fn has_static_suffix(key: &str) -> bool {
    let key = key.to_ascii_lowercase();
    NO_FALLBACK_SUFFIXES
        .iter()
        .any(|suffix| key.ends_with(suffix))
}
