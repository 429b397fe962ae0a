use crate::models::{Collection, Video};
use crate::raw::{RawRequest, RawResponse, VimeoResponse};
use crate::users::UserRef;
use crate::{VimeoClient, VimeoError, VimeoRequestFields};

pub struct GetVideoRequest<'a> {
    pub client: &'a VimeoClient,
    pub fields: VimeoRequestFields<'a>,
    pub video_id: i64,
}

impl<'a> AsMut<VimeoRequestFields<'a>> for GetVideoRequest<'a> {
    fn as_mut(&mut self) -> &mut VimeoRequestFields<'a> {
        &mut self.fields
    }
}

impl<'a> GetVideoRequest<'a> {
    pub fn raw_request(&self) -> RawRequest {
        RawRequest::get(format!("/videos/{}", self.video_id))
    }

    pub async fn send_raw(self) -> Result<RawResponse, VimeoError> {
        self.client.execute(&self.raw_request(), &self.fields).await
    }

    pub async fn send(self) -> Result<VimeoResponse<Video>, VimeoError> {
        VimeoResponse::parse(self.send_raw().await?)
    }
}

/// Videos uploaded by a user (`/me/videos` or `/users/{id}/videos`).
pub struct GetVideosRequest<'a> {
    pub client: &'a VimeoClient,
    pub fields: VimeoRequestFields<'a>,
    pub user: UserRef,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl<'a> AsMut<VimeoRequestFields<'a>> for GetVideosRequest<'a> {
    fn as_mut(&mut self) -> &mut VimeoRequestFields<'a> {
        &mut self.fields
    }
}

impl<'a> GetVideosRequest<'a> {
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    pub fn raw_request(&self) -> RawRequest {
        RawRequest::get(format!("{}/videos", self.user.path()))
            .query_opt("page", self.page)
            .query_opt("per_page", self.per_page)
    }

    pub async fn send_raw(self) -> Result<RawResponse, VimeoError> {
        self.client.execute(&self.raw_request(), &self.fields).await
    }

    pub async fn send(self) -> Result<VimeoResponse<Collection<Video>>, VimeoError> {
        VimeoResponse::parse(self.send_raw().await?)
    }
}
