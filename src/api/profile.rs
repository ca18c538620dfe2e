use reqwest::Method;

use crate::api::client::ApiClient;
use crate::api::error::ApiError;
use crate::api::types::{MessageEnvelope, PasswordChange, ProfileUpdate, User, UserEnvelope};

impl ApiClient {
    /// `GET /profile`
    pub async fn get_profile(&self) -> Result<User, ApiError> {
        let envelope: UserEnvelope = self.execute(Method::GET, "/profile", |r| r).await?;
        Ok(envelope.user)
    }

    /// `PUT /profile`
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, ApiError> {
        let envelope: UserEnvelope = self
            .execute(Method::PUT, "/profile", |r| r.json(update))
            .await?;
        Ok(envelope.user)
    }

    /// `PUT /profile/password`. Returns the server's message, if any.
    pub async fn update_password(&self, change: &PasswordChange) -> Result<Option<String>, ApiError> {
        let envelope: Option<MessageEnvelope> = self
            .execute(Method::PUT, "/profile/password", |r| r.json(change))
            .await?;
        Ok(envelope.and_then(|e| e.message))
    }
}
