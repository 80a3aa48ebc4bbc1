//! Directory listing page for directories without an index file

use crate::handler::router::RequestContext;
use crate::http::{self, path};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::fmt::Write as _;
use std::path::Path;
use tokio::fs;

/// One row of the listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub name: String,
    pub is_dir: bool,
}

pub async fn serve_listing(ctx: &RequestContext<'_>, dir: &Path) -> Response<Full<Bytes>> {
    match read_entries(dir).await {
        Ok(entries) => {
            let display_path = path::percent_decode(ctx.path);
            http::build_html_response(render_listing(&display_path, &entries), ctx.is_head)
        }
        Err(e) => {
            logger::log_error(&format!(
                "Failed to list directory '{}': {e}",
                dir.display()
            ));
            http::build_404_response(ctx.is_head)
        }
    }
}

/// Read and sort directory entries, case-insensitively by name
pub async fn read_entries(dir: &Path) -> std::io::Result<Vec<ListingEntry>> {
    let mut reader = fs::read_dir(dir).await?;
    let mut entries = Vec::new();

    while let Some(entry) = reader.next_entry().await? {
        let is_dir = entry.file_type().await.is_ok_and(|t| t.is_dir());
        entries.push(ListingEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir,
        });
    }

    entries.sort_by_cached_key(|e| e.name.to_lowercase());
    Ok(entries)
}

/// Render the listing page; directories get a trailing `/`
pub fn render_listing(display_path: &str, entries: &[ListingEntry]) -> String {
    let title = format!("Directory listing for {}", path::html_escape(display_path));

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    let _ = writeln!(html, "<title>{title}</title>");
    html.push_str("</head>\n<body>\n");
    let _ = writeln!(html, "<h1>{title}</h1>");
    html.push_str("<hr>\n<ul>\n");

    for entry in entries {
        let suffix = if entry.is_dir { "/" } else { "" };
        let _ = writeln!(
            html,
            "<li><a href=\"{}{suffix}\">{}{suffix}</a></li>",
            path::percent_encode_segment(&entry.name),
            path::html_escape(&entry.name),
        );
    }

    html.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as std_fs;

    #[test]
    fn test_render_escapes_and_encodes() {
        let entries = vec![
            ListingEntry {
                name: "a & b.txt".to_string(),
                is_dir: false,
            },
            ListingEntry {
                name: "assets".to_string(),
                is_dir: true,
            },
        ];
        let html = render_listing("/<docs>/", &entries);

        assert!(html.contains("<title>Directory listing for /&lt;docs&gt;/</title>"));
        assert!(html.contains("<li><a href=\"a%20%26%20b.txt\">a &amp; b.txt</a></li>"));
        assert!(html.contains("<li><a href=\"assets/\">assets/</a></li>"));
    }

    #[tokio::test]
    async fn test_entries_sorted_case_insensitively() {
        let dir = tempfile::tempdir().unwrap();
        std_fs::write(dir.path().join("b.js"), "").unwrap();
        std_fs::write(dir.path().join("A.css"), "").unwrap();
        std_fs::create_dir(dir.path().join("c")).unwrap();

        let entries = read_entries(dir.path()).await.unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["A.css", "b.js", "c"]);
        assert!(entries[2].is_dir);
    }
}
