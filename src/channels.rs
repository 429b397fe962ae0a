use crate::models::{Channel, Collection, Video};
use crate::raw::{RawRequest, RawResponse, VimeoResponse};
use crate::{VimeoClient, VimeoError, VimeoRequestFields};

pub struct GetChannelRequest<'a> {
    pub client: &'a VimeoClient,
    pub fields: VimeoRequestFields<'a>,
    pub channel_id: i64,
}

impl<'a> AsMut<VimeoRequestFields<'a>> for GetChannelRequest<'a> {
    fn as_mut(&mut self) -> &mut VimeoRequestFields<'a> {
        &mut self.fields
    }
}

impl<'a> GetChannelRequest<'a> {
    pub fn raw_request(&self) -> RawRequest {
        RawRequest::get(format!("/channels/{}", self.channel_id))
    }

    pub async fn send_raw(self) -> Result<RawResponse, VimeoError> {
        self.client.execute(&self.raw_request(), &self.fields).await
    }

    pub async fn send(self) -> Result<VimeoResponse<Channel>, VimeoError> {
        VimeoResponse::parse(self.send_raw().await?)
    }
}

pub struct GetChannelVideosRequest<'a> {
    pub client: &'a VimeoClient,
    pub fields: VimeoRequestFields<'a>,
    pub channel_id: i64,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl<'a> AsMut<VimeoRequestFields<'a>> for GetChannelVideosRequest<'a> {
    fn as_mut(&mut self) -> &mut VimeoRequestFields<'a> {
        &mut self.fields
    }
}

impl<'a> GetChannelVideosRequest<'a> {
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    pub fn raw_request(&self) -> RawRequest {
        RawRequest::get(format!("/channels/{}/videos", self.channel_id))
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
