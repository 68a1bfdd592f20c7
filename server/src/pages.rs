//! HTML pages served next to the JSON API.

use log::warn;
use std::path::Path;

/// Which page of a match a browser asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Control,
    Display,
}

impl PageKind {
    fn suffix(self) -> &'static str {
        match self {
            PageKind::Control => "control",
            PageKind::Display => "display",
        }
    }
}

/// Asset file for a sport. Sports without their own page use the volley one.
pub fn page_file(sport: &str, kind: PageKind) -> String {
    let family = match sport.to_lowercase().as_str() {
        "basket" => "basket",
        _ => "volley",
    };
    format!("{}_{}.html", family, kind.suffix())
}

/// Reads the page for `sport` from `assets_dir`, or a short notice if it is missing.
pub async fn load_page(assets_dir: &Path, sport: &str, kind: PageKind) -> String {
    let file = page_file(sport, kind);
    match tokio::fs::read_to_string(assets_dir.join(&file)).await {
        Ok(html) => html,
        Err(e) => {
            warn!("Could not read page {}: {}", file, e);
            format!("<h1>File {} not found</h1>", escape_html(&file))
        }
    }
}

/// Landing page linking the control and display pages of every known match.
pub fn home_page(ids: &[String]) -> String {
    let links: String = ids
        .iter()
        .map(|id| {
            let path = encode_path_segment(id);
            let label = escape_html(id);
            format!(
                "<li><a href=\"/control/{path}\">Control {label}</a> &middot; \
                 <a href=\"/display/{path}\">Display {label}</a></li>"
            )
        })
        .collect();

    format!(
        "<!doctype html>\
         <html lang=\"en\">\
         <head><meta charset=\"utf-8\"><title>Scoreboard</title></head>\
         <body style=\"background:#111;color:#fff;font-family:sans-serif;\">\
         <h1>Scoreboard</h1>\
         <p>Open these pages from any device on the same network.</p>\
         <ul>{links}</ul>\
         </body>\
         </html>"
    )
}

/// Percent-encodes every byte outside the RFC 3986 unreserved set.
fn encode_path_segment(text: &str) -> String {
    let mut encoded = String::with_capacity(text.len());
    for byte in text.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                encoded.push(char::from(byte))
            }
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_file_selection() {
        assert_eq!(page_file("Volley", PageKind::Control), "volley_control.html");
        assert_eq!(page_file("BASKET", PageKind::Display), "basket_display.html");
        assert_eq!(page_file("Handball", PageKind::Display), "volley_display.html");
    }

    #[test]
    fn test_home_page_lists_matches() {
        let html = home_page(&["Basket".to_string(), "<Volley>".to_string()]);

        assert!(html.contains("href=\"/control/Basket\""));
        assert!(html.contains("href=\"/display/Basket\""));
        assert!(html.contains("&lt;Volley&gt;"));
        assert!(!html.contains("<Volley>"));
        assert!(html.contains("href=\"/control/%3CVolley%3E\""));
    }

    #[test]
    fn test_home_page_links_encode_reserved_characters() {
        let html = home_page(&["a?b".to_string(), "x#y".to_string(), "Court 1/è".to_string()]);

        assert!(html.contains("href=\"/control/a%3Fb\""));
        assert!(html.contains("href=\"/display/x%23y\""));
        assert!(html.contains("href=\"/control/Court%201%2F%C3%A8\""));
        assert!(html.contains("Control a?b"));
    }

    #[tokio::test]
    async fn test_missing_page_falls_back_to_notice() {
        let dir = std::env::temp_dir().join("scoreboard-no-such-assets");

        let html = load_page(&dir, "Volley", PageKind::Control).await;

        assert_eq!(html, "<h1>File volley_control.html not found</h1>");
    }

    #[tokio::test]
    async fn test_page_read_from_assets_dir() {
        let dir = std::env::temp_dir().join(format!("scoreboard-assets-{}", std::process::id()));
        tokio::fs::create_dir_all(&dir).await.unwrap();
        tokio::fs::write(dir.join("basket_display.html"), "<p>basket</p>")
            .await
            .unwrap();

        let html = load_page(&dir, "basket", PageKind::Display).await;

        assert_eq!(html, "<p>basket</p>");
        let _ = tokio::fs::remove_dir_all(&dir).await;
    }
}
