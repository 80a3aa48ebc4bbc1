//! Static file serving module
//!
//! Maps the request path under the root directory, enforces containment,
//! and builds file, directory and conditional responses.

use crate::handler::listing;
use crate::handler::router::RequestContext;
use crate::http::response::{build_file_response, build_partial_response, FileMeta};
use crate::http::{self, cache, mime, path, range::RangeParseResult};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Serve whatever the request path names under `root`
///
/// - directory without trailing slash: 301 to the slashed path
/// - directory: first existing index file, else a generated listing
/// - regular file: its contents
/// - anything else, or a target outside `root`: 404
pub async fn serve_path(
    ctx: &RequestContext<'_>,
    root: &Path,
    index_files: &[String],
) -> Response<Full<Bytes>> {
    let candidate = path::translate_path(root, ctx.path);

    // File not found is common (404), no need to log
    let Some(mut target) = resolve_within_root(root, &candidate).await else {
        return http::build_404_response(ctx.is_head);
    };

    if fs::metadata(&target).await.is_ok_and(|m| m.is_dir()) {
        if !ctx.path.ends_with('/') {
            let location = match ctx.query {
                Some(q) => format!("{}/?{q}", ctx.path),
                None => format!("{}/", ctx.path),
            };
            return http::build_301_response(&location);
        }

        match find_index_file(&target, index_files).await {
            Some(index) => target = index,
            None => return listing::serve_listing(ctx, &target).await,
        }
    }

    serve_file(ctx, &target).await
}

/// Canonicalize `candidate` and make sure it still lives under `root`
///
/// Returns `None` when the path does not exist or escapes the root through a
/// symlink.
pub async fn resolve_within_root(root: &Path, candidate: &Path) -> Option<PathBuf> {
    let root_canonical = match fs::canonicalize(root).await {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Root directory not found or inaccessible '{}': {e}",
                root.display()
            ));
            return None;
        }
    };

    let canonical = fs::canonicalize(candidate).await.ok()?;
    if !canonical.starts_with(&root_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            candidate.display(),
            canonical.display()
        ));
        return None;
    }

    Some(canonical)
}

/// First configured index file present in `dir`
async fn find_index_file(dir: &Path, index_files: &[String]) -> Option<PathBuf> {
    for name in index_files {
        let index_path = dir.join(name);
        if fs::metadata(&index_path).await.is_ok_and(|m| m.is_file()) {
            return Some(index_path);
        }
    }
    None
}

/// Serve a single regular file with validators and range support
pub async fn serve_file(ctx: &RequestContext<'_>, file_path: &Path) -> Response<Full<Bytes>> {
    let metadata = match fs::metadata(file_path).await {
        Ok(m) if m.is_file() => m,
        _ => return http::build_404_response(ctx.is_head),
    };

    let content = match fs::read(file_path).await {
        Ok(c) => Bytes::from(c),
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {e}",
                file_path.display()
            ));
            return http::build_404_response(ctx.is_head);
        }
    };

    let etag = cache::generate_etag(&content);
    let modified = metadata.modified().ok();
    let last_modified = modified.map(cache::format_http_date);

    // If-None-Match takes precedence over If-Modified-Since (RFC 7232 6)
    let not_modified = if ctx.if_none_match.is_some() {
        cache::check_etag_match(ctx.if_none_match, &etag)
    } else {
        modified.is_some_and(|m| cache::check_not_modified_since(ctx.if_modified_since, m))
    };
    if not_modified {
        return http::build_304_response(&etag, last_modified.as_deref());
    }

    let meta = FileMeta {
        content_type: mime::content_type_for(file_path),
        etag: &etag,
        last_modified: last_modified.as_deref(),
    };

    let total_size = content.len() as u64;
    match http::parse_range_header(ctx.range_header, total_size) {
        RangeParseResult::Valid(range) => {
            let (start, end) = (slice_index(range.start), slice_index(range.end));
            let slice = content.slice(start..=end);
            build_partial_response(slice, &meta, range, total_size, ctx.is_head)
        }
        RangeParseResult::NotSatisfiable => http::build_416_response(total_size),
        RangeParseResult::None => build_file_response(content, &meta, ctx.is_head),
    }
}

/// Range bounds are always below the in-memory length, so this never truncates
fn slice_index(position: u64) -> usize {
    usize::try_from(position).unwrap_or(usize::MAX)
}
