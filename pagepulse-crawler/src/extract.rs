use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

/// Scheme, host and optional port of the crawl seed, used to resolve
/// root-relative hrefs.
#[derive(Debug, Clone)]
pub struct Origin {
    base: String,
}

impl Origin {
    pub fn from_url(url: &Url) -> Option<Self> {
        let host = url.host_str()?;
        let mut base = format!("{}://{}", url.scheme(), host);
        if let Some(port) = url.port() {
            base.push_str(&format!(":{}", port));
        }
        Some(Self { base })
    }

    pub fn as_str(&self) -> &str {
        &self.base
    }
}

/// Extract candidate same-site link targets from an HTML document.
///
/// Only internal links survive: fragment-only hrefs, the bare root path and
/// anything carrying its own scheme are filtered out. No deduplication
/// happens here; the crawler owns the visited set.
pub fn extract_links(html: &str, page_url: &str, origin: &Origin) -> Vec<String> {
    let document = Html::parse_document(html);
    let link_selector = Selector::parse("a[href]").unwrap();

    let mut links = Vec::new();
    for element in document.select(&link_selector) {
        if let Some(href) = element.value().attr("href")
            && let Some(resolved) = resolve_href(href, page_url, origin)
        {
            links.push(resolved);
        }
    }
    links
}

fn resolve_href(href: &str, page_url: &str, origin: &Origin) -> Option<String> {
    if href.is_empty() || href == "/" || href.starts_with('#') {
        return None;
    }

    // An href that parses on its own carries a scheme (https:, mailto:, ...)
    // and points off-site.
    if Url::parse(href).is_ok() {
        return None;
    }

    if href.starts_with('/') {
        return Some(format!("{}{}", origin.as_str(), href));
    }

    // Bare word hrefs resolve as a sibling of the current page.
    if href
        .chars()
        .next()
        .is_some_and(|c| c.is_alphanumeric() || c == '_')
    {
        return Some(format!("{}/{}", page_url.trim_end_matches('/'), href));
    }

    debug!("Skipping unresolvable href: {}", href);
    None
}
