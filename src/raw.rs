use crate::models::{Collection, VimeoObject};
use crate::oauth::OAuthCredentials;
use crate::utils::parse_form_urlencoded;
use crate::{VimeoClient, VimeoError, VimeoRequestFields};
use http_body_util::{BodyExt, Empty};
use hyper::body::Bytes;
use hyper::{Method, Request, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};

pub const ACCEPT_HEADER: &str = "application/vnd.vimeo.*+json;version=3.4";

/// Logical request descriptor: method, path and query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl RawRequest {
    /// A `?query` suffix on `path` is moved into `query` so it takes part in the signature.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        let path = path.into();
        match path.split_once('?') {
            Some((path, query)) => RawRequest {
                method,
                path: path.to_string(),
                query: parse_form_urlencoded(query),
            },
            None => RawRequest {
                method,
                path,
                query: Vec::new(),
            },
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn query_opt<V: ToString>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    pub fn url(&self, base_url: &str) -> String {
        if self.path.starts_with('/') {
            format!("{}{}", base_url, self.path)
        } else {
            self.path.clone()
        }
    }
}

#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

impl RawResponse {
    pub fn text(&self) -> Result<&str, VimeoError> {
        std::str::from_utf8(&self.body).map_err(|e| VimeoError::ParseError(e.to_string()))
    }

    pub fn json(&self) -> Result<serde_json::Value, VimeoError> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

#[derive(Debug, Clone)]
pub struct VimeoResponse<T> {
    pub raw: RawResponse,
    pub body: T,
}

impl<T: VimeoObject> VimeoResponse<T> {
    pub fn parse(raw: RawResponse) -> Result<Self, VimeoError> {
        let body = T::from_slice(&raw.body)?
            .ok_or_else(|| VimeoError::ParseError("response body is null".to_string()))?;
        Ok(VimeoResponse { raw, body })
    }
}

impl<T> VimeoResponse<T> {
    pub fn status(&self) -> StatusCode {
        self.raw.status
    }

    pub fn into_body(self) -> T {
        self.body
    }
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: Option<String>,
    developer_message: Option<String>,
    error_code: Option<i64>,
}

impl VimeoClient {
    /// Signs and sends a single request, returning the body of any 2xx response.
    pub async fn execute(&self, request: &RawRequest, fields: &VimeoRequestFields<'_>) -> Result<RawResponse, VimeoError> {
        let mut query = request.query.clone();
        if let Some(filter) = fields.fields {
            query.push(("fields".to_string(), filter.to_string()));
        }

        match (fields.token, fields.token_secret) {
            (Some(token), Some(token_secret)) => {
                let credentials = self.credentials.clone().with_token(token, token_secret);
                self.execute_signed(&request.method, &request.url(&self.base_url), query, &credentials).await
            }
            _ => self.execute_signed(&request.method, &request.url(&self.base_url), query, &self.credentials).await,
        }
    }

    /// Sends a page link such as `Collection::paging.next` and parses the next page.
    pub async fn get_page<T: VimeoObject>(&self, link: &str) -> Result<VimeoResponse<Collection<T>>, VimeoError> {
        let raw = self.execute(&RawRequest::get(link), &VimeoRequestFields::default()).await?;
        VimeoResponse::parse(raw)
    }

    /// Follows `paging.next`; `None` on the last page.
    pub async fn next_page<T: VimeoObject>(&self, collection: &Collection<T>) -> Result<Option<VimeoResponse<Collection<T>>>, VimeoError> {
        match collection.paging.next.as_deref() {
            Some(link) => self.get_page(link).await.map(Some),
            None => Ok(None),
        }
    }

    pub(crate) async fn execute_signed(
        &self,
        method: &Method,
        url: &str,
        query: Vec<(String, String)>,
        credentials: &OAuthCredentials,
    ) -> Result<RawResponse, VimeoError> {
        let url = url.to_string();
        let authorization = credentials.authorization_header(method, &url, &query)?;

        let uri = if query.is_empty() {
            url
        } else {
            let query_string = query
                .iter()
                .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
                .collect::<Vec<_>>()
                .join("&");
            format!("{}?{}", url, query_string)
        };

        debug!(method = %method, uri = %uri, "sending vimeo request");

        let req = Request::builder()
            .method(method.clone())
            .uri(uri)
            .header("Accept", ACCEPT_HEADER)
            .header("Authorization", authorization)
            .body(Empty::new())
            .map_err(|e| VimeoError::Other(Box::new(e)))?;

        let resp = self.client.request(req).await?;
        let status = resp.status();
        let body = resp.into_body().collect().await?.to_bytes();

        check_status(status, &body)?;

        Ok(RawResponse { status, body })
    }
}

fn check_status(status: StatusCode, body: &Bytes) -> Result<(), VimeoError> {
    if status.is_success() {
        return Ok(());
    }

    match serde_json::from_slice::<ErrorResponse>(body) {
        Ok(error_response) => {
            warn!(
                status = status.as_u16(),
                error_code = ?error_response.error_code,
                developer_message = ?error_response.developer_message,
                "vimeo error response: {}",
                error_response.error.as_deref().unwrap_or_default()
            );
        }
        Err(_) => {
            warn!(status = status.as_u16(), "vimeo error response: {}", String::from_utf8_lossy(body));
        }
    }

    match status {
        StatusCode::NOT_FOUND => Err(VimeoError::NotFound),
        StatusCode::UNAUTHORIZED => Err(VimeoError::Unauthorized),
        StatusCode::FORBIDDEN => Err(VimeoError::Forbidden),
        StatusCode::TOO_MANY_REQUESTS => Err(VimeoError::Ratelimited),
        StatusCode::INTERNAL_SERVER_ERROR | StatusCode::SERVICE_UNAVAILABLE => {
            Err(VimeoError::InternalServerError)
        }
        status => Err(VimeoError::UnknownStatusCode(status)),
    }
}
