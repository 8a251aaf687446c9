//! HTML fetch adapter.
//!
//! Issues GETs with browser-identity headers and optional session cookies,
//! and returns UTF-8 HTML text. The adapter performs no content negotiation
//! logic of its own: callers pick a [`HeaderProfile`] and everything else is
//! pass-through. Non-2xx responses become [`Error::Network`] with the status
//! embedded; they are not retried here.

use std::time::Duration;

use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, COOKIE, REFERER, USER_AGENT};
use url::Url;

use crate::encoding;
use crate::error::{Error, Result};

const DESKTOP_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";
const MOBILE_UA: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_4 like Mac OS X) \
     AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Mobile/15E148 Safari/604.1";

/// Browser-identity header sets. Search widgets render differently for
/// desktop and mobile user agents, so callers choose per page type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderProfile {
    Desktop,
    Mobile,
}

impl HeaderProfile {
    #[must_use]
    pub fn user_agent(self) -> &'static str {
        match self {
            Self::Desktop => DESKTOP_UA,
            Self::Mobile => MOBILE_UA,
        }
    }
}

/// Optional logged-in session cookie values.
///
/// Treated as opaque credentials injected at the boundary; this crate never
/// obtains or refreshes them.
#[derive(Debug, Clone, Default)]
pub struct SessionCookies {
    pub nid_aut: Option<String>,
    pub nid_ses: Option<String>,
    pub m_loc: Option<String>,
}

impl SessionCookies {
    /// Read cookie values from the conventional environment variables
    /// (`NAVER_NID_AUT`, `NAVER_NID_SES`, `NAVER_M_LOC`). Absent variables
    /// leave the corresponding cookie unset.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            nid_aut: std::env::var("NAVER_NID_AUT").ok().filter(|v| !v.is_empty()),
            nid_ses: std::env::var("NAVER_NID_SES").ok().filter(|v| !v.is_empty()),
            m_loc: std::env::var("NAVER_M_LOC").ok().filter(|v| !v.is_empty()),
        }
    }

    /// Render a `Cookie` header value, or `None` when no cookie is set.
    #[must_use]
    pub fn header_value(&self) -> Option<String> {
        let mut pairs = Vec::new();
        if let Some(value) = &self.nid_aut {
            pairs.push(format!("NID_AUT={value}"));
        }
        if let Some(value) = &self.nid_ses {
            pairs.push(format!("NID_SES={value}"));
        }
        if let Some(value) = &self.m_loc {
            pairs.push(format!("M_LOC={value}"));
        }
        if pairs.is_empty() {
            None
        } else {
            Some(pairs.join("; "))
        }
    }
}

/// Configuration for the fetch client.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout.
    pub timeout: Duration,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// Maximum redirects to follow.
    pub max_redirects: usize,
    /// Session cookies attached to every request.
    pub cookies: SessionCookies,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            max_redirects: 10,
            cookies: SessionCookies::default(),
        }
    }
}

/// HTTP client wrapper for fetching Naver pages.
pub struct FetchClient {
    http_client: reqwest::Client,
    config: FetchConfig,
}

impl FetchClient {
    /// Build a client from the given configuration.
    pub fn new(config: FetchConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self { http_client, config })
    }

    /// Fetch a page and return its body as UTF-8 HTML.
    pub async fn fetch_html(&self, url: &str, profile: HeaderProfile) -> Result<String> {
        self.get(url, profile, None).await
    }

    /// Fetch with an explicit `Referer`, used when following a post's
    /// content iframe (the frame host checks the outer page referer).
    pub async fn fetch_html_with_referer(
        &self,
        url: &str,
        profile: HeaderProfile,
        referer: &str,
    ) -> Result<String> {
        self.get(url, profile, Some(referer)).await
    }

    async fn get(
        &self,
        url: &str,
        profile: HeaderProfile,
        referer: Option<&str>,
    ) -> Result<String> {
        let parsed = Url::parse(url).map_err(|_| Error::MalformedUrl(url.to_string()))?;

        let mut request = self
            .http_client
            .get(parsed)
            .header(USER_AGENT, profile.user_agent())
            .header(
                ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,*/*;q=0.8",
            )
            .header(ACCEPT_LANGUAGE, "ko-KR,ko;q=0.9,en-US;q=0.8");

        if let Some(cookie) = self.config.cookies.header_value() {
            request = request.header(COOKIE, cookie);
        }
        if let Some(referer) = referer {
            request = request.header(REFERER, referer);
        }

        tracing::debug!(url, profile = ?profile, "fetching page");
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url, status = status.as_u16(), "non-2xx response");
            return Err(Error::Network {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        Ok(encoding::transcode_to_utf8(&body))
    }
}
