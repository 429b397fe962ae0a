//! OAuth 1.0a request signing (HMAC-SHA1, RFC 5849).
use base64::Engine;
use chrono::Utc;
use hmac::{Hmac, Mac};
use hyper::Method;
use rand::distributions::Alphanumeric;
use rand::Rng;
use sha1::Sha1;

use crate::raw::RawResponse;
use crate::utils::parse_form_urlencoded;
use crate::{VimeoClient, VimeoError};

pub const REQUEST_TOKEN_URL: &str = "https://vimeo.com/oauth/request_token";
pub const AUTHORIZE_URL: &str = "https://vimeo.com/oauth/authorize";
pub const ACCESS_TOKEN_URL: &str = "https://vimeo.com/oauth/access_token";

const SIGNATURE_METHOD: &str = "HMAC-SHA1";
const OAUTH_VERSION: &str = "1.0";
const NONCE_LENGTH: usize = 32;
/// Callback value for clients that show the verifier to the user instead of redirecting.
pub const OUT_OF_BAND_CALLBACK: &str = "oob";

/// Where the three-legged token exchange is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthEndpoints {
    pub request_token_url: String,
    pub authorize_url: String,
    pub access_token_url: String,
}

impl Default for OAuthEndpoints {
    fn default() -> Self {
        OAuthEndpoints {
            request_token_url: REQUEST_TOKEN_URL.to_string(),
            authorize_url: AUTHORIZE_URL.to_string(),
            access_token_url: ACCESS_TOKEN_URL.to_string(),
        }
    }
}

impl OAuthEndpoints {
    /// URL the user visits to authorize a request token.
    pub fn authorize_url(&self, request_token: &str) -> String {
        format!("{}?oauth_token={}", self.authorize_url, percent_encode(request_token))
    }
}

/// Token pair returned by the request token and access token steps.
#[derive(Clone, PartialEq, Eq)]
pub struct OAuthToken {
    pub token: String,
    pub token_secret: String,
    pub callback_confirmed: bool,
}

impl OAuthToken {
    /// Parses an `oauth_token=..&oauth_token_secret=..` reply body.
    pub fn from_form(body: &str) -> Result<Self, VimeoError> {
        let mut token = None;
        let mut token_secret = None;
        let mut callback_confirmed = false;

        for (key, value) in parse_form_urlencoded(body.trim()) {
            match key.as_str() {
                "oauth_token" => token = Some(value),
                "oauth_token_secret" => token_secret = Some(value),
                "oauth_callback_confirmed" => callback_confirmed = value == "true",
                _ => {}
            }
        }

        Ok(OAuthToken {
            token: token.ok_or_else(|| VimeoError::ParseError("missing field `oauth_token`".to_string()))?,
            token_secret: token_secret
                .ok_or_else(|| VimeoError::ParseError("missing field `oauth_token_secret`".to_string()))?,
            callback_confirmed,
        })
    }
}

impl std::fmt::Debug for OAuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthToken")
            .field("token", &self.token)
            .field("callback_confirmed", &self.callback_confirmed)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Default, PartialEq, Eq)]
pub struct OAuthCredentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub token: Option<String>,
    pub token_secret: Option<String>,
    pub callback: Option<String>,
    pub verifier: Option<String>,
}

impl OAuthCredentials {
    pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
        OAuthCredentials {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            ..Default::default()
        }
    }

    pub fn with_token(mut self, token: impl Into<String>, token_secret: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self.token_secret = Some(token_secret.into());
        self
    }

    pub fn with_callback(mut self, callback: impl Into<String>) -> Self {
        self.callback = Some(callback.into());
        self
    }

    pub fn with_verifier(mut self, verifier: impl Into<String>) -> Self {
        self.verifier = Some(verifier.into());
        self
    }

    /// Reads `VIMEO_CONSUMER_KEY` and `VIMEO_CONSUMER_SECRET`, plus the optional
    /// `VIMEO_TOKEN`, `VIMEO_TOKEN_SECRET` and `VIMEO_CALLBACK`.
    pub fn from_env() -> Result<Self, VimeoError> {
        let required = |name: &'static str| std::env::var(name).map_err(|_| VimeoError::MissingConfig(name));
        let optional = |name: &str| std::env::var(name).ok().filter(|value| !value.is_empty());

        Ok(OAuthCredentials {
            consumer_key: required("VIMEO_CONSUMER_KEY")?,
            consumer_secret: required("VIMEO_CONSUMER_SECRET")?,
            token: optional("VIMEO_TOKEN"),
            token_secret: optional("VIMEO_TOKEN_SECRET"),
            callback: optional("VIMEO_CALLBACK"),
            verifier: None,
        })
    }

    pub fn authorize_url(request_token: &str) -> String {
        OAuthEndpoints::default().authorize_url(request_token)
    }

    /// `Authorization` header for a request with a fresh nonce and the current time.
    pub fn authorization_header(&self, method: &Method, url: &str, params: &[(String, String)]) -> Result<String, VimeoError> {
        self.authorization_header_with(method, url, params, &nonce(), Utc::now().timestamp())
    }

    pub fn authorization_header_with(
        &self,
        method: &Method,
        url: &str,
        params: &[(String, String)],
        nonce: &str,
        timestamp: i64,
    ) -> Result<String, VimeoError> {
        let mut oauth_params = self.oauth_params(nonce, timestamp);
        let signature = self.signature_with(method, url, params, nonce, timestamp)?;
        oauth_params.push(("oauth_signature".to_string(), signature));
        oauth_params.sort();

        let fields = oauth_params
            .iter()
            .map(|(key, value)| format!("{}=\"{}\"", percent_encode(key), percent_encode(value)))
            .collect::<Vec<_>>()
            .join(", ");

        Ok(format!("OAuth {}", fields))
    }

    /// Base64 HMAC-SHA1 signature over the request and the protocol parameters.
    pub fn signature_with(
        &self,
        method: &Method,
        url: &str,
        params: &[(String, String)],
        nonce: &str,
        timestamp: i64,
    ) -> Result<String, VimeoError> {
        let mut all_params = self.oauth_params(nonce, timestamp);
        all_params.extend(params.iter().cloned());

        let base_string = signature_base_string(method, url, &all_params);
        sign(&base_string, &self.consumer_secret, self.token_secret.as_deref().unwrap_or_default())
    }

    fn oauth_params(&self, nonce: &str, timestamp: i64) -> Vec<(String, String)> {
        let mut params = vec![
            ("oauth_consumer_key".to_string(), self.consumer_key.clone()),
            ("oauth_nonce".to_string(), nonce.to_string()),
            ("oauth_signature_method".to_string(), SIGNATURE_METHOD.to_string()),
            ("oauth_timestamp".to_string(), timestamp.to_string()),
            ("oauth_version".to_string(), OAUTH_VERSION.to_string()),
        ];

        match (&self.token, &self.callback) {
            (Some(token), _) => params.push(("oauth_token".to_string(), token.clone())),
            // The callback is only part of the request token step.
            (None, Some(callback)) => params.push(("oauth_callback".to_string(), callback.clone())),
            (None, None) => {}
        }
        if let Some(verifier) = &self.verifier {
            params.push(("oauth_verifier".to_string(), verifier.clone()));
        }

        params
    }
}

impl std::fmt::Debug for OAuthCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthCredentials")
            .field("consumer_key", &self.consumer_key)
            .field("token", &self.token)
            .field("callback", &self.callback)
            .finish_non_exhaustive()
    }
}

impl VimeoClient {
    /// First step of the three-legged flow. Signs with the consumer key only and
    /// sends the configured callback, or `oob` when there is none.
    pub async fn get_request_token(&self) -> Result<OAuthToken, VimeoError> {
        let credentials = OAuthCredentials {
            token: None,
            token_secret: None,
            verifier: None,
            callback: Some(
                self.credentials
                    .callback
                    .clone()
                    .unwrap_or_else(|| OUT_OF_BAND_CALLBACK.to_string()),
            ),
            ..self.credentials.clone()
        };

        let raw = self
            .execute_signed(&Method::POST, &self.oauth_endpoints.request_token_url, Vec::new(), &credentials)
            .await?;
        parse_token_reply(&raw)
    }

    /// URL to send the user to for the given request token.
    pub fn authorize_url(&self, request_token: &OAuthToken) -> String {
        self.oauth_endpoints.authorize_url(&request_token.token)
    }

    /// Last step: trades an authorized request token and its verifier for an access token.
    pub async fn get_access_token(&self, request_token: &OAuthToken, verifier: &str) -> Result<OAuthToken, VimeoError> {
        let credentials = OAuthCredentials {
            callback: None,
            ..self.credentials.clone()
        }
        .with_token(request_token.token.as_str(), request_token.token_secret.as_str())
        .with_verifier(verifier);

        let raw = self
            .execute_signed(&Method::POST, &self.oauth_endpoints.access_token_url, Vec::new(), &credentials)
            .await?;
        parse_token_reply(&raw)
    }
}

fn parse_token_reply(raw: &RawResponse) -> Result<OAuthToken, VimeoError> {
    OAuthToken::from_form(raw.text()?)
}

/// `METHOD&url&params`, each part percent encoded, params sorted by encoded key then value.
pub fn signature_base_string(method: &Method, url: &str, params: &[(String, String)]) -> String {
    let mut encoded = params
        .iter()
        .map(|(key, value)| (percent_encode(key), percent_encode(value)))
        .collect::<Vec<_>>();
    encoded.sort();

    let param_string = encoded
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.as_str().to_uppercase(),
        percent_encode(url),
        percent_encode(&param_string)
    )
}

pub fn sign(base_string: &str, consumer_secret: &str, token_secret: &str) -> Result<String, VimeoError> {
    let key = format!("{}&{}", percent_encode(consumer_secret), percent_encode(token_secret));

    let mut mac = Hmac::<Sha1>::new_from_slice(key.as_bytes())
        .map_err(|e| VimeoError::SigningError(e.to_string()))?;
    mac.update(base_string.as_bytes());

    Ok(base64::engine::general_purpose::STANDARD.encode(mac.finalize().into_bytes()))
}

/// RFC 3986 encoding: everything except `A-Z a-z 0-9 - . _ ~`.
fn percent_encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

fn nonce() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(NONCE_LENGTH)
        .map(char::from)
        .collect()
}
