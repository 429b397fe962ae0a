use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::utils::{is_blank, parse_timestamp, required_id};
use crate::VimeoError;

/// A model parsed from a single JSON object snapshot. The snapshot is kept on the
/// model as `json`, so fields without a typed counterpart stay reachable.
///
/// `parse` returns `Ok(None)` for JSON `null`. Missing optional fields fall back to
/// defaults; missing or malformed structural fields are errors.
pub trait VimeoObject: Sized {
    fn parse(value: &Value) -> Result<Option<Self>, VimeoError>;

    fn from_slice(bytes: &[u8]) -> Result<Option<Self>, VimeoError> {
        let value: Value = serde_json::from_slice(bytes)?;
        Self::parse(&value)
    }
}

fn parse_as<A, T>(value: &Value, convert: fn(A, Value) -> Result<T, VimeoError>) -> Result<Option<T>, VimeoError>
where
    A: DeserializeOwned,
{
    if value.is_null() {
        return Ok(None);
    }
    let api = A::deserialize(value)?;
    convert(api, value.clone()).map(Some)
}

fn parse_nested<T: VimeoObject>(value: Option<Value>) -> Result<Option<T>, VimeoError> {
    match value {
        Some(value) => T::parse(&value),
        None => Ok(None),
    }
}

#[derive(Debug, Deserialize)]
struct ApiUser {
    uri: Option<String>,
    name: Option<String>,
    link: Option<String>,
    location: Option<String>,
    bio: Option<String>,
    created_time: Option<String>,
    account: Option<String>,
    pictures: Option<Value>,
    websites: Option<Vec<ApiWebsite>>,
    resource_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiWebsite {
    name: Option<String>,
    link: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiPicture {
    uri: Option<String>,
    active: Option<bool>,
    #[serde(rename = "type")]
    kind: Option<String>,
    sizes: Option<Vec<ApiPictureSize>>,
    resource_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiPictureSize {
    width: Option<u32>,
    height: Option<u32>,
    link: Option<String>,
    link_with_play_button: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiChannel {
    uri: Option<String>,
    name: Option<String>,
    description: Option<String>,
    link: Option<String>,
    created_time: Option<String>,
    modified_time: Option<String>,
    user: Option<Value>,
    pictures: Option<Value>,
    header: Option<Value>,
    privacy: Option<ApiChannelPrivacy>,
    resource_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiChannelPrivacy {
    view: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiVideo {
    uri: Option<String>,
    name: Option<String>,
    description: Option<String>,
    link: Option<String>,
    duration: Option<i64>,
    width: Option<u32>,
    height: Option<u32>,
    language: Option<String>,
    created_time: Option<String>,
    modified_time: Option<String>,
    release_time: Option<String>,
    user: Option<Value>,
    pictures: Option<Value>,
    tags: Option<Vec<ApiTag>>,
    stats: Option<ApiVideoStats>,
    files: Option<Vec<ApiVideoFile>>,
    resource_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiTag {
    uri: Option<String>,
    name: Option<String>,
    tag: Option<String>,
    canonical: Option<String>,
    resource_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiVideoStats {
    plays: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct ApiVideoFile {
    quality: Option<String>,
    #[serde(rename = "type")]
    mime_type: Option<String>,
    link: Option<String>,
    link_secure: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    size: Option<u64>,
    fps: Option<f64>,
    md5: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiCollection {
    total: Option<u64>,
    page: Option<u32>,
    per_page: Option<u32>,
    paging: Option<ApiPaging>,
    data: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct ApiPaging {
    next: Option<String>,
    previous: Option<String>,
    first: Option<String>,
    last: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserAccountType {
    #[default]
    Basic,
    Plus,
    Pro,
    Business,
    ProUnlimited,
    Producer,
    LivePro,
    LiveBusiness,
    LivePremium,
}

impl UserAccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserAccountType::Basic => "basic",
            UserAccountType::Plus => "plus",
            UserAccountType::Pro => "pro",
            UserAccountType::Business => "business",
            UserAccountType::ProUnlimited => "pro_unlimited",
            UserAccountType::Producer => "producer",
            UserAccountType::LivePro => "live_pro",
            UserAccountType::LiveBusiness => "live_business",
            UserAccountType::LivePremium => "live_premium",
        }
    }
}

impl FromStr for UserAccountType {
    type Err = VimeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(UserAccountType::Basic),
            "plus" => Ok(UserAccountType::Plus),
            "pro" => Ok(UserAccountType::Pro),
            "business" => Ok(UserAccountType::Business),
            "pro_unlimited" => Ok(UserAccountType::ProUnlimited),
            "producer" => Ok(UserAccountType::Producer),
            "live_pro" => Ok(UserAccountType::LivePro),
            "live_business" => Ok(UserAccountType::LiveBusiness),
            "live_premium" => Ok(UserAccountType::LivePremium),
            other => Err(VimeoError::ParseError(format!("unknown account type {:?}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserWebsite {
    pub name: String,
    pub link: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PictureSize {
    pub width: u32,
    pub height: u32,
    pub link: String,
    pub link_with_play_button: Option<String>,
}

/// A set of thumbnails of the same image (user portrait, channel header, video poster).
#[derive(Debug, Clone, PartialEq)]
pub struct Picture {
    pub uri: Option<String>,
    pub active: bool,
    pub kind: String,
    pub sizes: Vec<PictureSize>,
    pub resource_key: String,
    pub json: Value,
}

impl Picture {
    fn from_api(api: ApiPicture, json: Value) -> Self {
        let sizes = api.sizes
            .unwrap_or_default()
            .into_iter()
            .map(|size| PictureSize {
                width: size.width.unwrap_or_default(),
                height: size.height.unwrap_or_default(),
                link: size.link.unwrap_or_default(),
                link_with_play_button: size.link_with_play_button,
            })
            .collect();

        Picture {
            uri: api.uri,
            active: api.active.unwrap_or_default(),
            kind: api.kind.unwrap_or_default(),
            sizes,
            resource_key: api.resource_key.unwrap_or_default(),
            json,
        }
    }

    pub fn largest(&self) -> Option<&PictureSize> {
        self.sizes.iter().max_by_key(|size| size.width)
    }
}

impl VimeoObject for Picture {
    fn parse(value: &Value) -> Result<Option<Self>, VimeoError> {
        parse_as(value, |api: ApiPicture, json| Ok(Picture::from_api(api, json)))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub uri: String,
    pub name: String,
    pub link: String,
    pub location: String,
    pub bio: String,
    pub created_time: Option<DateTime<Utc>>,
    pub account: UserAccountType,
    pub picture: Option<Picture>,
    pub websites: Vec<UserWebsite>,
    pub resource_key: String,
    pub json: Value,
}

impl User {
    fn from_api(api: ApiUser, json: Value) -> Result<Self, VimeoError> {
        let id = required_id(api.uri.as_deref())?;

        let account = match api.account.as_deref() {
            Some(account) => account.parse()?,
            None => UserAccountType::default(),
        };

        let websites = api.websites
            .unwrap_or_default()
            .into_iter()
            .map(|website| UserWebsite {
                name: website.name.unwrap_or_default(),
                link: website.link.unwrap_or_default(),
                description: website.description.unwrap_or_default(),
            })
            .collect();

        Ok(User {
            id,
            created_time: parse_timestamp(api.created_time.as_deref())?,
            uri: api.uri.unwrap_or_default(),
            name: api.name.unwrap_or_default(),
            link: api.link.unwrap_or_default(),
            location: api.location.unwrap_or_default(),
            bio: api.bio.unwrap_or_default(),
            account,
            picture: parse_nested(api.pictures)?,
            websites,
            resource_key: api.resource_key.unwrap_or_default(),
            json,
        })
    }

    pub fn has_location(&self) -> bool {
        !is_blank(&self.location)
    }

    pub fn has_bio(&self) -> bool {
        !is_blank(&self.bio)
    }

    pub fn has_picture(&self) -> bool {
        self.picture.is_some()
    }

    pub fn has_websites(&self) -> bool {
        !self.websites.is_empty()
    }
}

impl VimeoObject for User {
    fn parse(value: &Value) -> Result<Option<Self>, VimeoError> {
        parse_as(value, User::from_api)
    }
}

/// Who may view a channel. Unrecognised values are kept as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ChannelPrivacyStatus {
    #[default]
    Anybody,
    Users,
    Moderators,
    Other(String),
}

impl From<&str> for ChannelPrivacyStatus {
    fn from(value: &str) -> Self {
        match value {
            "anybody" => ChannelPrivacyStatus::Anybody,
            "users" => ChannelPrivacyStatus::Users,
            "moderators" => ChannelPrivacyStatus::Moderators,
            other => ChannelPrivacyStatus::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelPrivacy {
    pub view: ChannelPrivacyStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
    pub id: i64,
    pub uri: String,
    pub name: String,
    pub description: String,
    pub link: String,
    pub created_time: Option<DateTime<Utc>>,
    pub modified_time: Option<DateTime<Utc>>,
    pub user: Option<User>,
    pub picture: Option<Picture>,
    pub header: Option<Picture>,
    pub privacy: Option<ChannelPrivacy>,
    pub resource_key: String,
    pub json: Value,
}

impl Channel {
    fn from_api(api: ApiChannel, json: Value) -> Result<Self, VimeoError> {
        Ok(Channel {
            id: required_id(api.uri.as_deref())?,
            created_time: parse_timestamp(api.created_time.as_deref())?,
            modified_time: parse_timestamp(api.modified_time.as_deref())?,
            uri: api.uri.unwrap_or_default(),
            name: api.name.unwrap_or_default(),
            description: api.description.unwrap_or_default(),
            link: api.link.unwrap_or_default(),
            user: parse_nested(api.user)?,
            picture: parse_nested(api.pictures)?,
            header: parse_nested(api.header)?,
            privacy: api.privacy.map(|privacy| ChannelPrivacy {
                view: privacy.view.as_deref().map(ChannelPrivacyStatus::from).unwrap_or_default(),
            }),
            // "metadata" is only useful when exploring the API, it stays in `json`
            resource_key: api.resource_key.unwrap_or_default(),
            json,
        })
    }

    pub fn has_description(&self) -> bool {
        !is_blank(&self.description)
    }

    pub fn has_picture(&self) -> bool {
        self.picture.is_some()
    }

    pub fn has_header(&self) -> bool {
        self.header.is_some()
    }
}

impl VimeoObject for Channel {
    fn parse(value: &Value) -> Result<Option<Self>, VimeoError> {
        parse_as(value, Channel::from_api)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub uri: String,
    pub name: String,
    pub tag: String,
    pub canonical: String,
    pub resource_key: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VideoStats {
    pub plays: i64,
}

/// One rendition of a video.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoFile {
    pub quality: String,
    pub mime_type: String,
    pub link: String,
    pub link_secure: String,
    pub width: u32,
    pub height: u32,
    pub size: u64,
    pub fps: Option<f64>,
    pub md5: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Video {
    pub id: i64,
    pub uri: String,
    pub name: String,
    pub description: String,
    pub link: String,
    pub duration: i64,
    pub width: u32,
    pub height: u32,
    pub language: Option<String>,
    pub created_time: Option<DateTime<Utc>>,
    pub modified_time: Option<DateTime<Utc>>,
    pub release_time: Option<DateTime<Utc>>,
    pub user: Option<User>,
    pub picture: Option<Picture>,
    pub tags: Vec<Tag>,
    pub stats: VideoStats,
    pub files: Vec<VideoFile>,
    pub resource_key: String,
    pub json: Value,
}

impl Video {
    fn from_api(api: ApiVideo, json: Value) -> Result<Self, VimeoError> {
        let tags = api.tags
            .unwrap_or_default()
            .into_iter()
            .map(|tag| Tag {
                uri: tag.uri.unwrap_or_default(),
                name: tag.name.unwrap_or_default(),
                tag: tag.tag.unwrap_or_default(),
                canonical: tag.canonical.unwrap_or_default(),
                resource_key: tag.resource_key.unwrap_or_default(),
            })
            .collect();

        let files = api.files
            .unwrap_or_default()
            .into_iter()
            .map(|file| VideoFile {
                quality: file.quality.unwrap_or_default(),
                mime_type: file.mime_type.unwrap_or_default(),
                link: file.link.unwrap_or_default(),
                link_secure: file.link_secure.unwrap_or_default(),
                width: file.width.unwrap_or_default(),
                height: file.height.unwrap_or_default(),
                size: file.size.unwrap_or_default(),
                fps: file.fps,
                md5: file.md5,
            })
            .collect();

        Ok(Video {
            id: required_id(api.uri.as_deref())?,
            created_time: parse_timestamp(api.created_time.as_deref())?,
            modified_time: parse_timestamp(api.modified_time.as_deref())?,
            release_time: parse_timestamp(api.release_time.as_deref())?,
            uri: api.uri.unwrap_or_default(),
            name: api.name.unwrap_or_default(),
            description: api.description.unwrap_or_default(),
            link: api.link.unwrap_or_default(),
            duration: api.duration.unwrap_or_default(),
            width: api.width.unwrap_or_default(),
            height: api.height.unwrap_or_default(),
            language: api.language,
            user: parse_nested(api.user)?,
            picture: parse_nested(api.pictures)?,
            tags,
            stats: VideoStats {
                plays: api.stats.and_then(|stats| stats.plays).unwrap_or_default(),
            },
            files,
            resource_key: api.resource_key.unwrap_or_default(),
            json,
        })
    }

    pub fn has_description(&self) -> bool {
        !is_blank(&self.description)
    }

    pub fn best_file(&self) -> Option<&VideoFile> {
        self.files.iter().max_by_key(|file| (file.width, file.height))
    }
}

impl VimeoObject for Video {
    fn parse(value: &Value) -> Result<Option<Self>, VimeoError> {
        parse_as(value, Video::from_api)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Paging {
    pub next: Option<String>,
    pub previous: Option<String>,
    pub first: Option<String>,
    pub last: Option<String>,
}

/// Paginated envelope returned by list endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection<T> {
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
    pub paging: Paging,
    pub data: Vec<T>,
    pub json: Value,
}

impl<T> Collection<T> {
    pub fn has_next(&self) -> bool {
        self.paging.next.is_some()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<T: VimeoObject> VimeoObject for Collection<T> {
    fn parse(value: &Value) -> Result<Option<Self>, VimeoError> {
        if value.is_null() {
            return Ok(None);
        }
        let api = ApiCollection::deserialize(value)?;

        // null entries are dropped rather than kept as holes
        let mut data = Vec::new();
        for item in api.data.unwrap_or_default() {
            if let Some(item) = T::parse(&item)? {
                data.push(item);
            }
        }

        let paging = api.paging
            .map(|paging| Paging {
                next: paging.next,
                previous: paging.previous,
                first: paging.first,
                last: paging.last,
            })
            .unwrap_or_default();

        Ok(Some(Collection {
            total: api.total.unwrap_or_default(),
            page: api.page.unwrap_or_default(),
            per_page: api.per_page.unwrap_or_default(),
            paging,
            data,
            json: value.clone(),
        }))
    }
}

impl<T> IntoIterator for Collection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}
