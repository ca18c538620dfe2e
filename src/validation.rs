//! Form validation performed before any request is issued.
//!
//! A failure here never reaches the network; the store records it as a
//! failed operation carrying the message below.

use std::path::Path;

use image::ImageFormat;
use thiserror::Error;

use crate::api::{
    AlbumDraft, ErrorPayload, ImageUpload, LoginRequest, PasswordChange, ProfileUpdate,
    RegisterRequest,
};

/// Largest accepted upload.
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// Minimum length of a new password.
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter at least one username.")]
    NoUsernames,

    #[error("Please provide an album name.")]
    MissingAlbumName,

    #[error("Please provide an image name.")]
    MissingImageName,

    #[error("Please select an image file.")]
    MissingImageFile,

    #[error("File size exceeds 5MB limit")]
    FileTooLarge,

    #[error("Unsupported image format; use JPEG, PNG or GIF")]
    UnsupportedFormat,

    #[error("Could not read {path}: {reason}")]
    UnreadableFile { path: String, reason: String },

    #[error("New passwords do not match")]
    PasswordMismatch,

    #[error("New password must be at least 6 characters long")]
    PasswordTooShort,

    #[error("Please enter your {field}.")]
    MissingField { field: &'static str },

    #[error("Comment cannot be empty.")]
    EmptyComment,
}

impl From<ValidationError> for ErrorPayload {
    fn from(err: ValidationError) -> Self {
        ErrorPayload::new(err.to_string())
    }
}

/// Split a free-form username list on whitespace and commas.
///
/// Empty entries and the album owner are dropped; nothing left is an error.
pub fn parse_usernames(input: &str, owner: Option<&str>) -> Result<Vec<String>, ValidationError> {
    let mut usernames: Vec<String> = Vec::new();
    for name in input.split(|c: char| c.is_whitespace() || c == ',') {
        if name.is_empty() || Some(name) == owner {
            continue;
        }
        if !usernames.iter().any(|u| u == name) {
            usernames.push(name.to_string());
        }
    }

    if usernames.is_empty() {
        return Err(ValidationError::NoUsernames);
    }
    Ok(usernames)
}

pub fn album_draft(
    name: &str,
    description: &str,
    album_cover: &str,
) -> Result<AlbumDraft, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::MissingAlbumName);
    }
    Ok(AlbumDraft {
        name: name.to_string(),
        description: description.trim().to_string(),
        album_cover: album_cover.trim().to_string(),
    })
}

pub fn password_change(
    current: &str,
    new: &str,
    confirm: &str,
) -> Result<PasswordChange, ValidationError> {
    if current.is_empty() {
        return Err(ValidationError::MissingField {
            field: "current password",
        });
    }
    if new != confirm {
        return Err(ValidationError::PasswordMismatch);
    }
    if new.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(PasswordChange {
        current_password: current.to_string(),
        new_password: new.to_string(),
    })
}

pub fn login_request(username: &str, password: &str) -> Result<LoginRequest, ValidationError> {
    let username = required(username, "username")?;
    if password.is_empty() {
        return Err(ValidationError::MissingField { field: "password" });
    }
    Ok(LoginRequest {
        username: username.to_string(),
        password: password.to_string(),
    })
}

pub fn register_request(
    name: &str,
    username: &str,
    password: &str,
) -> Result<RegisterRequest, ValidationError> {
    let name = required(name, "name")?;
    let login = login_request(username, password)?;
    Ok(RegisterRequest {
        name: name.to_string(),
        username: login.username,
        password: login.password,
    })
}

pub fn profile_update(name: &str, profile_picture: &str) -> Result<ProfileUpdate, ValidationError> {
    let name = required(name, "name")?;
    Ok(ProfileUpdate {
        name: name.to_string(),
        profile_picture: profile_picture.trim().to_string(),
    })
}

pub fn comment_text(text: &str) -> Result<String, ValidationError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ValidationError::EmptyComment);
    }
    Ok(text.to_string())
}

fn required<'a>(value: &'a str, field: &'static str) -> Result<&'a str, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::MissingField { field });
    }
    Ok(value)
}

impl ImageUpload {
    /// Check an image file for upload.
    ///
    /// The file must be JPEG, PNG or GIF (judged by extension) and at most
    /// [`MAX_UPLOAD_BYTES`]. Its bytes are read later by the upload request.
    pub fn from_path(
        path: &Path,
        name: &str,
        tags: &str,
        person: &str,
        is_favorite: bool,
    ) -> Result<Self, ValidationError> {
        if path.as_os_str().is_empty() {
            return Err(ValidationError::MissingImageFile);
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingImageName);
        }

        let unreadable = |e: std::io::Error| ValidationError::UnreadableFile {
            path: path.display().to_string(),
            reason: e.to_string(),
        };

        let metadata = std::fs::metadata(path).map_err(unreadable)?;
        if !metadata.is_file() {
            return Err(ValidationError::MissingImageFile);
        }
        if metadata.len() > MAX_UPLOAD_BYTES {
            return Err(ValidationError::FileTooLarge);
        }

        let format = ImageFormat::from_path(path).map_err(|_| ValidationError::UnsupportedFormat)?;
        if !matches!(format, ImageFormat::Jpeg | ImageFormat::Png | ImageFormat::Gif) {
            return Err(ValidationError::UnsupportedFormat);
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        Ok(Self {
            path: path.to_path_buf(),
            size: metadata.len(),
            file_name,
            mime_type: format.to_mime_type(),
            name: name.to_string(),
            tags: tags.trim().to_string(),
            person: person.trim().to_string(),
            is_favorite,
        })
    }
}
