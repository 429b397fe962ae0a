//! Typed async client for the Vimeo REST API.
//!
//! Requests are signed with OAuth 1.0a and sent with a pooled hyper client.
//! Every endpoint is a request builder handed out by [`VimeoClient`]; calling
//! `send()` parses the JSON body into the models in [`models`], while
//! `send_raw()` stops at the unparsed [`RawResponse`].
//!
//! ```no_run
//! use vimeo::{initialize_client, OAuthCredentials, VimeoClient};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let credentials = OAuthCredentials::from_env()?;
//! let client = VimeoClient::with_default_base_url(credentials, initialize_client()?);
//!
//! let me = client.get_me().send().await?.body;
//! let videos = client.get_videos(me.id).with_page(1).with_per_page(25).send().await?.body;
//! for video in &videos.data {
//!     println!("{} ({} plays)", video.name, video.stats.plays);
//! }
//! # Ok(())
//! # }
//! ```
use std::error::Error;
use hyper::body::Bytes;
use hyper_tls::HttpsConnector;
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use http_body_util::Empty;
use hyper::StatusCode;
use thiserror::Error;
use native_tls::TlsConnector;
use hyper_util::rt::TokioExecutor;


pub mod models;
pub use models::{
    Channel, ChannelPrivacy, ChannelPrivacyStatus, Collection, Paging, Picture, PictureSize, Tag,
    User, UserAccountType, UserWebsite, Video, VideoFile, VideoStats, VimeoObject,
};
pub mod oauth;
pub use oauth::{OAuthCredentials, OAuthEndpoints, OAuthToken};
pub mod raw;
pub use raw::{RawRequest, RawResponse, VimeoResponse};
pub mod scopes;
pub use scopes::{Scope, ScopeCollection};
pub mod utils;
pub mod users;
pub use users::{GetUserChannelsRequest, GetUserRequest, UserRef};
pub mod channels;
pub use channels::{GetChannelRequest, GetChannelVideosRequest};
pub mod videos;
pub use videos::{GetVideoRequest, GetVideosRequest};

pub const DEFAULT_BASE_URL: &str = "https://api.vimeo.com";

pub type HttpClient = Client<HttpsConnector<HttpConnector>, Empty<Bytes>>;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Network error: {0}")]
    NetworkError(#[from] std::io::Error),
    #[error("TLS error: {0}")]
    TlsError(#[from] native_tls::Error),
}

pub fn initialize_client() -> Result<HttpClient, ClientError> {
    let mut http = HttpConnector::new();
    http.enforce_http(false);

    let tls = TlsConnector::builder().build()?;

    let https = HttpsConnector::from((http, tls.into()));

    let client = Client::builder(TokioExecutor::new())
        .build::<_, Empty<Bytes>>(https);

    Ok(client)
}

/// Per-request settings shared by every endpoint builder.
#[derive(Debug, Default, Clone, Copy)]
pub struct VimeoRequestFields<'a> {
    pub fields: Option<&'a str>,
    pub token: Option<&'a str>,
    pub token_secret: Option<&'a str>,
}

pub trait VimeoRequest<'a> {
    fn fields(&mut self) -> &mut Option<&'a str>;

    fn token(&mut self) -> &mut Option<&'a str>;

    fn token_secret(&mut self) -> &mut Option<&'a str>;

    fn with_fields(mut self, fields: &'a str) -> Self
    where
        Self: Sized,
    {
        *self.fields() = Some(fields);
        self
    }

    fn with_token(mut self, token: &'a str, token_secret: &'a str) -> Self
    where
        Self: Sized,
    {
        *self.token() = Some(token);
        *self.token_secret() = Some(token_secret);
        self
    }
}

impl<'a, T> VimeoRequest<'a> for T
where
    T: AsMut<VimeoRequestFields<'a>>,
{
    fn fields(&mut self) -> &mut Option<&'a str> {
        &mut self.as_mut().fields
    }

    fn token(&mut self) -> &mut Option<&'a str> {
        &mut self.as_mut().token
    }

    fn token_secret(&mut self) -> &mut Option<&'a str> {
        &mut self.as_mut().token_secret
    }
}

#[derive(Error, Debug)]
pub enum VimeoError {
    #[error("Not found")]
    NotFound,
    #[error("Ratelimited")]
    Ratelimited,
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Forbidden")]
    Forbidden,
    #[error("Internal server error")]
    InternalServerError,
    #[error("Unknown Status Code: {0}")]
    UnknownStatusCode(StatusCode),
    #[error("Invalid resource URI: {0:?}")]
    InvalidUri(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Signing error: {0}")]
    SigningError(String),
    #[error("Missing configuration: {0}")]
    MissingConfig(&'static str),
    #[error("HTTP error: {0}")]
    HttpError(#[from] hyper::Error),
    #[error("Legacy HTTP error: {0}")]
    LegacyHttpError(#[from] hyper_util::client::legacy::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Other error: {0}")]
    Other(Box<dyn Error + Send + Sync>),
}

/// Entry point of the library: holds the HTTP client, base URL and OAuth credentials.
#[derive(Clone)]
pub struct VimeoClient {
    client: HttpClient,
    base_url: String,
    credentials: OAuthCredentials,
    oauth_endpoints: OAuthEndpoints,
}

impl VimeoClient {
    pub fn new(base_url: impl Into<String>, credentials: OAuthCredentials, client: HttpClient) -> Self {
        VimeoClient {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
            oauth_endpoints: OAuthEndpoints::default(),
        }
    }

    pub fn with_oauth_endpoints(mut self, oauth_endpoints: OAuthEndpoints) -> Self {
        self.oauth_endpoints = oauth_endpoints;
        self
    }

    pub fn with_default_base_url(credentials: OAuthCredentials, client: HttpClient) -> Self {
        Self::new(DEFAULT_BASE_URL, credentials, client)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credentials(&self) -> &OAuthCredentials {
        &self.credentials
    }

    pub fn oauth_endpoints(&self) -> &OAuthEndpoints {
        &self.oauth_endpoints
    }

    pub fn get_me(&self) -> GetUserRequest<'_> {
        self.get_user(UserRef::Me)
    }

    pub fn get_user(&self, user: impl Into<UserRef>) -> GetUserRequest<'_> {
        GetUserRequest {
            client: self,
            fields: VimeoRequestFields::default(),
            user: user.into(),
        }
    }

    pub fn get_user_channels(&self, user: impl Into<UserRef>) -> GetUserChannelsRequest<'_> {
        GetUserChannelsRequest {
            client: self,
            fields: VimeoRequestFields::default(),
            user: user.into(),
            page: None,
            per_page: None,
        }
    }

    pub fn get_channel(&self, channel_id: i64) -> GetChannelRequest<'_> {
        GetChannelRequest {
            client: self,
            fields: VimeoRequestFields::default(),
            channel_id,
        }
    }

    pub fn get_channel_videos(&self, channel_id: i64) -> GetChannelVideosRequest<'_> {
        GetChannelVideosRequest {
            client: self,
            fields: VimeoRequestFields::default(),
            channel_id,
            page: None,
            per_page: None,
        }
    }

    pub fn get_video(&self, video_id: i64) -> GetVideoRequest<'_> {
        GetVideoRequest {
            client: self,
            fields: VimeoRequestFields::default(),
            video_id,
        }
    }

    pub fn get_videos(&self, user: impl Into<UserRef>) -> GetVideosRequest<'_> {
        GetVideosRequest {
            client: self,
            fields: VimeoRequestFields::default(),
            user: user.into(),
            page: None,
            per_page: None,
        }
    }
}

impl std::fmt::Debug for VimeoClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VimeoClient")
            .field("base_url", &self.base_url)
            .field("consumer_key", &self.credentials.consumer_key)
            .finish_non_exhaustive()
    }
}
