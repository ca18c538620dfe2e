//! Typed client for the Picsilfy REST backend.

mod albums;
mod auth;
mod client;
mod error;
mod images;
mod profile;
mod search;
pub mod types;

pub use client::ApiClient;
pub use error::{ApiError, ErrorPayload};
pub use types::{
    Album, AlbumDraft, Comment, Image, ImageUpload, LoginRequest, LoginResponse, PasswordChange,
    ProfileUpdate, RegisterRequest, SearchQuery, User, UserRef,
};
