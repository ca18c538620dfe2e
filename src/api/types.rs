//! Wire types exchanged with the backend.
//!
//! Field names follow the backend's JSON (`_id`, camelCase). Unknown fields
//! are ignored and optional fields default, so partial documents decode.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Immutable login handle.
    #[serde(default)]
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
}

impl User {
    /// Name to show in the header, falling back to the username.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.username
        } else {
            &self.name
        }
    }
}

/// Reference to a user that the backend sends either as a bare
/// username/id or as a populated document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserRef {
    Name(String),
    User(User),
}

impl UserRef {
    pub fn display_name(&self) -> &str {
        match self {
            UserRef::Name(name) => name,
            UserRef::User(user) => user.display_name(),
        }
    }

    /// Login handle when known. A bare reference is taken as the username.
    pub fn username(&self) -> &str {
        match self {
            UserRef::Name(name) => name,
            UserRef::User(user) => &user.username,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album_cover: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<UserRef>,
    /// Usernames this album is shared with. Never contains the owner.
    #[serde(default)]
    pub shared_users: Vec<String>,
}

impl Album {
    /// Creation date formatted like "Mar 4, 2025", or "Unknown date".
    pub fn created_label(&self) -> String {
        match self.created_at {
            Some(at) => at.format("%b %-d, %Y").to_string(),
            None => "Unknown date".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default, alias = "user", skip_serializing_if = "Option::is_none")]
    pub author: Option<UserRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    #[serde(rename = "_id")]
    pub id: String,
    /// Parent album. An image belongs to exactly one album.
    #[serde(default)]
    pub album_id: String,
    /// URL of the stored file.
    #[serde(default)]
    pub file: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person: Option<String>,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Image {
    pub fn title(&self) -> &str {
        if self.name.is_empty() {
            "Untitled Image"
        } else {
            &self.name
        }
    }
}

// -- Response envelopes -------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct AlbumsEnvelope {
    #[serde(default)]
    pub albums: Vec<Album>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AlbumEnvelope {
    pub album: Album,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ImagesEnvelope {
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ImageEnvelope {
    pub image: Image,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommentEnvelope {
    pub comment: Comment,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserEnvelope {
    pub user: User,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct MessageEnvelope {
    #[serde(default)]
    pub message: Option<String>,
}

/// Successful login: the bearer token plus the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

// -- Request bodies -----------------------------------------------------------

/// Body for creating or updating an album.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumDraft {
    pub name: String,
    pub description: String,
    pub album_cover: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareRequest {
    pub usernames: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct CommentDraft<'a> {
    pub text: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub name: String,
    pub profile_picture: String,
}

#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
}

impl std::fmt::Debug for PasswordChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordChange(••••••••)")
    }
}

#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("name", &self.name)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// An image file ready for multipart upload.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// Read when the upload is sent.
    pub path: PathBuf,
    pub size: u64,
    pub file_name: String,
    pub mime_type: &'static str,
    pub name: String,
    /// Comma separated, sent as typed.
    pub tags: String,
    pub person: String,
    pub is_favorite: bool,
}

impl std::fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageUpload")
            .field("path", &self.path)
            .field("mime_type", &self.mime_type)
            .field("size", &self.size)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Filters for `/search/images`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchQuery {
    pub query: String,
    pub tags: String,
    pub person: String,
    pub favorite: bool,
}

impl SearchQuery {
    /// True when no filter would narrow the search.
    pub fn is_empty(&self) -> bool {
        self.query.trim().is_empty()
            && self.tags.is_empty()
            && self.person.is_empty()
            && !self.favorite
    }

    /// Query-string pairs, omitting empty filters.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if !self.query.trim().is_empty() {
            params.push(("query", self.query.clone()));
        }
        if !self.tags.is_empty() {
            params.push(("tags", self.tags.clone()));
        }
        if !self.person.is_empty() {
            params.push(("person", self.person.clone()));
        }
        if self.favorite {
            params.push(("favorite", "true".to_string()));
        }
        params
    }
}
