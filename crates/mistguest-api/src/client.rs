// Mist cloud HTTP client
//
// Wraps `reqwest::Client` with Mist-specific URL construction, token auth,
// page-header pagination, and error-body parsing. All endpoint groups
// (identity, orgs, sites, guests) are implemented as inherent methods in
// separate files to keep this module focused on transport mechanics.

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::OnceCell;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::models::Listing;
use crate::transport::TransportConfig;

/// Page size requested from every listing endpoint.
pub const PAGE_LIMIT: u32 = 1000;

const HEADER_PAGE_TOTAL: &str = "X-Page-Total";
const HEADER_PAGE_LIMIT: &str = "X-Page-Limit";
const HEADER_PAGE_PAGE: &str = "X-Page-Page";

/// Error body shape returned by the Mist API on 4xx/5xx.
#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    detail: Option<String>,
}

/// Outcome of a successful write: the HTTP status and the decoded body
/// (`Value::Null` when the body is empty).
#[derive(Debug, Clone)]
pub struct WriteReceipt {
    pub status: u16,
    pub body: serde_json::Value,
}

/// Async client for the Mist cloud REST API (`/api/v1/`).
///
/// One instance is the process-wide session: the underlying
/// `reqwest::Client` pools connections and is safe to share across
/// concurrent requests. The organization id is either configured or
/// resolved once from the token's privileges and cached.
pub struct MistClient {
    http: reqwest::Client,
    base_url: Url,
    configured_org_id: Option<String>,
    pub(crate) resolved_org_id: OnceCell<String>,
}

impl MistClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from an API host, token, and transport config.
    ///
    /// Injects `Authorization: Token <token>` as a default header on every
    /// request. `host` may be a bare hostname (`api.mist.com`) or a full URL.
    pub fn from_api_token(
        host: &str,
        api_token: &SecretString,
        org_id: Option<String>,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let mut token_value = HeaderValue::from_str(&format!("Token {}", api_token.expose_secret()))
            .map_err(|e| Error::Authentication {
                message: format!("invalid API token header value: {e}"),
            })?;
        token_value.set_sensitive(true);
        headers.insert(AUTHORIZATION, token_value);

        let http = transport.build_client_with_headers(headers)?;
        Self::from_reqwest(host, http, org_id)
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(
        host: &str,
        http: reqwest::Client,
        org_id: Option<String>,
    ) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(host)?;
        Ok(Self {
            http,
            base_url,
            configured_org_id: org_id.filter(|id| !id.trim().is_empty()),
            resolved_org_id: OnceCell::new(),
        })
    }

    /// Build `https://{host}/api/v1/` from a bare host or a full URL.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let raw = raw.trim();
        let with_scheme = if raw.contains("://") {
            raw.to_owned()
        } else {
            format!("https://{raw}")
        };
        let mut url = Url::parse(&with_scheme)?;

        let path = url.path().trim_end_matches('/').to_owned();
        if path.ends_with("/api/v1") {
            url.set_path(&format!("{path}/"));
        } else {
            url.set_path(&format!("{path}/api/v1/"));
        }

        Ok(url)
    }

    /// The API base URL (always ends with `/api/v1/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The organization id from configuration, if one was given.
    pub fn configured_org_id(&self) -> Option<&str> {
        self.configured_org_id.as_deref()
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join a relative path (e.g. `"orgs/{id}/sites"`) onto the base URL.
    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    /// Fetch a single object.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        let resp = Self::check_status(resp).await?;
        let body = resp.text().await?;
        decode(body)
    }

    /// Upsert with a JSON body.
    pub(crate) async fn put<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<WriteReceipt, Error> {
        let url = self.url(path)?;
        debug!("PUT {url}");

        let resp = self.http.put(url).json(body).send().await?;
        let resp = Self::check_status(resp).await?;
        let status = resp.status().as_u16();
        let raw = resp.text().await?;
        let body = if raw.trim().is_empty() {
            serde_json::Value::Null
        } else {
            decode(raw)?
        };

        Ok(WriteReceipt { status, body })
    }

    // ── Pagination helper ────────────────────────────────────────────

    /// Collect every page of a listing endpoint into a single `Vec<T>`.
    ///
    /// Mist reports paging through `X-Page-Total` / `X-Page-Limit` /
    /// `X-Page-Page` headers; a response without them is a complete listing.
    /// The page number only moves forward, so at most `total / limit`
    /// requests are made even when the server echoes a stale page header.
    pub(crate) async fn get_all<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<T>, Error> {
        let url = self.url(path)?;
        let mut all = Vec::new();
        let mut page: u64 = 1;

        loop {
            debug!("GET {url} page={page} params={params:?}");
            let resp = self
                .http
                .get(url.clone())
                .query(params)
                .query(&[("limit", PAGE_LIMIT.to_string()), ("page", page.to_string())])
                .send()
                .await?;
            let resp = Self::check_status(resp).await?;

            let paging = PageHeaders::from_headers(resp.headers(), page);
            let body = resp.text().await?;
            let listing: Listing<T> = decode(body)?;
            let items = listing.into_items();
            let received = items.len();
            all.extend(items);

            let Some(paging) = paging else { break };
            trace!(?paging, received, "page fetched");
            if received == 0 || !paging.has_next() {
                break;
            }
            page = paging.page.max(page) + 1;
        }

        Ok(all)
    }

    // ── Response handling ────────────────────────────────────────────

    async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, Error> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::Authentication {
                message: "invalid or missing API token".into(),
            });
        }

        let raw = resp.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ErrorResponse>(&raw)
            .ok()
            .and_then(|e| e.detail);

        Err(Error::Api {
            status: status.as_u16(),
            detail,
        })
    }
}

fn decode<T: DeserializeOwned>(body: String) -> Result<T, Error> {
    serde_json::from_str(&body).map_err(move |e| {
        let preview: String = body.chars().take(200).collect();
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body,
        }
    })
}

// ── Page headers ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PageHeaders {
    total: u64,
    limit: u64,
    page: u64,
}

impl PageHeaders {
    /// `requested` stands in for a missing `X-Page-Page`.
    fn from_headers(headers: &HeaderMap, requested: u64) -> Option<Self> {
        let read = |name: &str| -> Option<u64> {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse().ok())
        };

        Some(Self {
            total: read(HEADER_PAGE_TOTAL)?,
            limit: read(HEADER_PAGE_LIMIT).unwrap_or(u64::from(PAGE_LIMIT)),
            page: read(HEADER_PAGE_PAGE).unwrap_or(requested),
        })
    }

    fn has_next(&self) -> bool {
        self.limit > 0 && self.limit.saturating_mul(self.page) < self.total
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn base_url_from_bare_host() {
        let url = MistClient::normalize_base_url("api.eu.mist.com").unwrap();
        assert_eq!(url.as_str(), "https://api.eu.mist.com/api/v1/");
    }

    #[test]
    fn base_url_keeps_existing_api_prefix() {
        let url = MistClient::normalize_base_url("http://127.0.0.1:9000/api/v1/").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:9000/api/v1/");
    }

    #[test]
    fn blank_org_id_is_treated_as_unset() {
        let client =
            MistClient::from_reqwest("api.mist.com", reqwest::Client::new(), Some("  ".into()))
                .unwrap();
        assert!(client.configured_org_id().is_none());
    }

    #[test]
    fn page_headers_drive_continuation() {
        let mut headers = HeaderMap::new();
        headers.insert(HEADER_PAGE_TOTAL, HeaderValue::from_static("2500"));
        headers.insert(HEADER_PAGE_LIMIT, HeaderValue::from_static("1000"));
        headers.insert(HEADER_PAGE_PAGE, HeaderValue::from_static("2"));

        let paging = PageHeaders::from_headers(&headers, 1).unwrap();
        assert!(paging.has_next());

        let last = PageHeaders { page: 3, ..paging };
        assert!(!last.has_next());
    }

    #[test]
    fn missing_total_means_single_page() {
        assert!(PageHeaders::from_headers(&HeaderMap::new(), 1).is_none());
    }

    #[test]
    fn missing_page_header_uses_requested_page() {
        let mut headers = HeaderMap::new();
        headers.insert(HEADER_PAGE_TOTAL, HeaderValue::from_static("3"));
        headers.insert(HEADER_PAGE_LIMIT, HeaderValue::from_static("1"));

        assert!(PageHeaders::from_headers(&headers, 2).unwrap().has_next());
        assert!(!PageHeaders::from_headers(&headers, 3).unwrap().has_next());
    }
}
