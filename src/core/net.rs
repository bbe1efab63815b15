// src/core/net.rs
//
// Blocking HTTP through one shared agent. Vendor pages are https-only,
// so this rides ureq instead of a raw socket. Non-success statuses are
// data here; the callers decide what rejects.

use std::error::Error;
use std::sync::OnceLock;
use std::time::Duration;

use ureq::Agent;

use crate::config::consts::{HTTP_TIMEOUT_SECS, USER_AGENT};

fn agent() -> &'static Agent {
    static AGENT: OnceLock<Agent> = OnceLock::new();
    AGENT.get_or_init(|| {
        Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(HTTP_TIMEOUT_SECS)))
            .http_status_as_error(false)
            .user_agent(USER_AGENT)
            .build()
            .new_agent()
    })
}

/// GET a vendor document. Anything but 200 is an error: there is no
/// partial use for a product page that didn't load.
pub fn fetch_page(url: &str) -> Result<String, Box<dyn Error>> {
    logd!("GET {url}");
    let mut res = agent()
        .get(url)
        .call()
        .map_err(|e| format!("GET {url}: {e}"))?;
    let status = res.status().as_u16();
    if status != 200 {
        return Err(format!("HTTP error: {} {}", status, url).into());
    }
    let body = res
        .body_mut()
        .read_to_string()
        .map_err(|e| format!("read {url}: {e}"))?;
    Ok(body)
}

/// Status + body of a parts-database call.
pub struct JsonResponse {
    pub status: u16,
    pub reason: String,
    pub text: String,
}

fn into_json_response(
    res: Result<ureq::http::Response<ureq::Body>, ureq::Error>,
    what: &str,
) -> Result<JsonResponse, Box<dyn Error>> {
    let mut res = res.map_err(|e| format!("{what}: {e}"))?;
    let status = res.status();
    let reason = s!(status.canonical_reason().unwrap_or_default());
    let text = res
        .body_mut()
        .read_to_string()
        .map_err(|e| format!("{what}: read: {e}"))?;
    Ok(JsonResponse { status: status.as_u16(), reason, text })
}

pub fn get_json(url: &str) -> Result<JsonResponse, Box<dyn Error>> {
    logd!("GET {url}");
    into_json_response(agent().get(url).call(), url)
}

pub fn post_json(url: &str, body: &serde_json::Value) -> Result<JsonResponse, Box<dyn Error>> {
    logd!("POST {url}");
    into_json_response(agent().post(url).send_json(body), url)
}

pub fn put_json(url: &str, body: &serde_json::Value) -> Result<JsonResponse, Box<dyn Error>> {
    logd!("PUT {url}");
    into_json_response(agent().put(url).send_json(body), url)
}

// --- address helpers ---

/// Host part of an address: scheme, port, path stripped.
pub fn host_of(url: &str) -> &str {
    let rest = match url.split_once("://") {
        Some((_, r)) => r,
        None => url,
    };
    let end = rest.find(['/', '?', '#', ':']).unwrap_or(rest.len());
    &rest[..end]
}

/// Scheme + host (+ port), no path.
pub fn origin_of(url: &str) -> String {
    let (scheme, rest) = match url.split_once("://") {
        Some((s, r)) => (s, r),
        None => ("https", url),
    };
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    join!(scheme, "://", &rest[..end])
}

/// Absolute-ize a document link against the page it came from.
pub fn resolve_href(page_url: &str, href: &str) -> String {
    let href = href.trim();
    if href.starts_with("http://") || href.starts_with("https://") {
        return s!(href);
    }
    if let Some(rest) = href.strip_prefix("//") {
        return join!("https://", rest);
    }
    let origin = origin_of(page_url);
    if href.starts_with('/') {
        return join!(&origin, href);
    }
    join!(&origin, "/", href)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_extraction() {
        assert_eq!(host_of("https://www.mouser.com/ProductDetail/x"), "www.mouser.com");
        assert_eq!(host_of("https://www.digikey.com:443/en/products"), "www.digikey.com");
        assert_eq!(host_of("www.mouser.de/x"), "www.mouser.de");
    }

    #[test]
    fn href_resolution() {
        let page = "https://www.mouser.com/ProductDetail/abc";
        assert_eq!(
            resolve_href(page, "/datasheet/2/447/x.pdf"),
            "https://www.mouser.com/datasheet/2/447/x.pdf"
        );
        assert_eq!(
            resolve_href(page, "//www.mouser.com/ds.pdf"),
            "https://www.mouser.com/ds.pdf"
        );
        assert_eq!(resolve_href(page, "https://cdn.example/ds.pdf"), "https://cdn.example/ds.pdf");
    }
}
