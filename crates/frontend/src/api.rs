use std::sync::Arc;

use eot_shared::models::Excavation;
use eot_shared::{Result, SiteError};
use reqwest::Url;

/// Resolve `path` against the current page, so relative dataset paths work
/// from any chapter depth.
fn resolve_url(page_href: &str, path: &str) -> Result<Url> {
    let base = Url::parse(page_href)
        .map_err(|e| SiteError::precondition(format!("invalid page url {}: {}", page_href, e)))?;
    base.join(path)
        .map_err(|e| SiteError::precondition(format!("invalid dataset url {}: {}", path, e)))
}

fn page_href() -> Result<String> {
    crate::dom::window()?
        .location()
        .href()
        .map_err(|_| SiteError::precondition("page location unavailable"))
}

/// Fetch and parse the excavation dataset. Any failure leaves the map
/// without data, so everything is a precondition violation.
pub async fn fetch_excavation(path: &str) -> Result<Arc<Excavation>> {
    let url = resolve_url(&page_href()?, path)?;

    let resp = reqwest::get(url.clone())
        .await
        .map_err(|e| SiteError::precondition(format!("fetching {}: {}", url, e)))?;
    if !resp.status().is_success() {
        return Err(SiteError::precondition(format!(
            "fetching {}: HTTP {}",
            url,
            resp.status()
        )));
    }
    let body = resp
        .text()
        .await
        .map_err(|e| SiteError::precondition(format!("reading {}: {}", url, e)))?;

    Ok(Arc::new(Excavation::from_json(&body)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_url_relative_to_chapter() {
        let url = resolve_url(
            "https://example.org/site/chapter2/map.html",
            "../assets/json/excavations@1_minify.json",
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.org/site/assets/json/excavations@1_minify.json"
        );
    }

    #[test]
    fn test_resolve_url_absolute_path() {
        let url = resolve_url("https://example.org/site/index.html", "/data/x.json").unwrap();
        assert_eq!(url.as_str(), "https://example.org/data/x.json");
    }

    #[test]
    fn test_resolve_url_invalid_page() {
        assert!(matches!(
            resolve_url("not a url", "x.json"),
            Err(SiteError::PreconditionViolation { .. })
        ));
    }
}
