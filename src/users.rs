use crate::models::{Channel, Collection, User};
use crate::raw::{RawRequest, RawResponse, VimeoResponse};
use crate::{VimeoClient, VimeoError, VimeoRequestFields};

/// The user a request is about: the authenticated user, a numeric ID or a username.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserRef {
    Me,
    Id(i64),
    Username(String),
}

impl UserRef {
    /// `/me` or `/users/{id}`.
    pub fn path(&self) -> String {
        match self {
            UserRef::Me => "/me".to_string(),
            UserRef::Id(id) => format!("/users/{}", id),
            UserRef::Username(username) => format!("/users/{}", urlencoding::encode(username)),
        }
    }
}

impl From<i64> for UserRef {
    fn from(id: i64) -> Self {
        UserRef::Id(id)
    }
}

impl From<&str> for UserRef {
    fn from(username: &str) -> Self {
        UserRef::Username(username.to_string())
    }
}

impl From<String> for UserRef {
    fn from(username: String) -> Self {
        UserRef::Username(username)
    }
}

pub struct GetUserRequest<'a> {
    pub client: &'a VimeoClient,
    pub fields: VimeoRequestFields<'a>,
    pub user: UserRef,
}

impl<'a> AsMut<VimeoRequestFields<'a>> for GetUserRequest<'a> {
    fn as_mut(&mut self) -> &mut VimeoRequestFields<'a> {
        &mut self.fields
    }
}

impl<'a> GetUserRequest<'a> {
    pub fn raw_request(&self) -> RawRequest {
        RawRequest::get(self.user.path())
    }

    pub async fn send_raw(self) -> Result<RawResponse, VimeoError> {
        self.client.execute(&self.raw_request(), &self.fields).await
    }

    pub async fn send(self) -> Result<VimeoResponse<User>, VimeoError> {
        VimeoResponse::parse(self.send_raw().await?)
    }
}

pub struct GetUserChannelsRequest<'a> {
    pub client: &'a VimeoClient,
    pub fields: VimeoRequestFields<'a>,
    pub user: UserRef,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl<'a> AsMut<VimeoRequestFields<'a>> for GetUserChannelsRequest<'a> {
    fn as_mut(&mut self) -> &mut VimeoRequestFields<'a> {
        &mut self.fields
    }
}

impl<'a> GetUserChannelsRequest<'a> {
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    pub fn raw_request(&self) -> RawRequest {
        RawRequest::get(format!("{}/channels", self.user.path()))
            .query_opt("page", self.page)
            .query_opt("per_page", self.per_page)
    }

    pub async fn send_raw(self) -> Result<RawResponse, VimeoError> {
        self.client.execute(&self.raw_request(), &self.fields).await
    }

    pub async fn send(self) -> Result<VimeoResponse<Collection<Channel>>, VimeoError> {
        VimeoResponse::parse(self.send_raw().await?)
    }
}
