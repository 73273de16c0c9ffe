//! HTTP plumbing: browser-like headers and the retrying page fetcher.

use std::path::Path;
use std::time::Duration;

use log::{debug, warn};
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, CONNECTION,
    PRAGMA, UPGRADE_INSECURE_REQUESTS, USER_AGENT,
};
use reqwest::{Client, StatusCode};
use tokio::time::sleep;

use crate::core::cache::write_string;
use crate::error::{EffError, Result};

/// Retry ceiling for a single URL before the whole run aborts.
pub const MAX_RETRIES: u32 = 6;

/// Header set a real browser would send; bbref rejects bare clients.
pub fn browser_headers() -> HeaderMap {
    let mut h = HeaderMap::new();
    h.insert(
        USER_AGENT,
        HeaderValue::from_static(
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:106.0) Gecko/20100101 Firefox/106.0",
        ),
    );
    h.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8",
        ),
    );
    h.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
    h.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    h.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
    h.insert(
        HeaderName::from_static("sec-fetch-dest"),
        HeaderValue::from_static("document"),
    );
    h.insert(
        HeaderName::from_static("sec-fetch-mode"),
        HeaderValue::from_static("navigate"),
    );
    h.insert(
        HeaderName::from_static("sec-fetch-site"),
        HeaderValue::from_static("cross-site"),
    );
    h.insert(PRAGMA, HeaderValue::from_static("no-cache"));
    h.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    h
}

/// Build the shared client with browser headers baked in.
pub fn client() -> Result<Client> {
    Ok(Client::builder()
        .default_headers(browser_headers())
        .timeout(Duration::from_secs(30))
        .build()?)
}

/// Download `url` and overwrite `dest` with the response body as text.
///
/// Non-200 responses are retried with doubling backoff starting at one
/// second; after [`MAX_RETRIES`] failures the run aborts, carrying the last
/// status and body. A one-second polite pause follows the first request
/// regardless of outcome.
pub async fn fetch_to_file(client: &Client, url: &str, dest: &Path) -> Result<()> {
    let mut backoff = Duration::from_secs(1);
    let mut res = client.get(url).send().await?;
    sleep(backoff).await;

    let mut retries = 0u32;
    while res.status() != StatusCode::OK {
        if retries >= MAX_RETRIES {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            return Err(EffError::RetriesExhausted {
                url: url.to_string(),
                retries,
                status,
                body,
            });
        }
        backoff *= 2;
        warn!("sleeping {}s, retrying {}", backoff.as_secs(), url);
        sleep(backoff).await;
        res = client.get(url).send().await?;
        retries += 1;
    }

    let body = res.text().await?;
    write_string(dest, &body)?;
    debug!("saved {} to {}", url, dest.display());
    Ok(())
}
