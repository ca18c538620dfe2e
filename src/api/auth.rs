use reqwest::Method;

use crate::api::client::ApiClient;
use crate::api::error::ApiError;
use crate::api::types::{
    LoginRequest, LoginResponse, MessageEnvelope, RegisterRequest, User, UserEnvelope,
};

impl ApiClient {
    /// `GET /auth/me`, used to restore a saved session.
    pub async fn current_user(&self) -> Result<User, ApiError> {
        let envelope: UserEnvelope = self.execute(Method::GET, "/auth/me", |r| r).await?;
        Ok(envelope.user)
    }

    /// `POST /auth/login`
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        tracing::info!(username = %request.username, "Logging in");
        self.execute(Method::POST, "/auth/login", |r| r.json(request))
            .await
    }

    /// `POST /auth/register`
    pub async fn register(&self, request: &RegisterRequest) -> Result<Option<String>, ApiError> {
        tracing::info!(username = %request.username, "Registering");
        let envelope: Option<MessageEnvelope> = self
            .execute(Method::POST, "/auth/register", |r| r.json(request))
            .await?;
        Ok(envelope.and_then(|e| e.message))
    }

    /// `POST /auth/logout`
    pub async fn logout(&self) -> Result<(), ApiError> {
        let _: serde_json::Value = self.execute(Method::POST, "/auth/logout", |r| r).await?;
        Ok(())
    }
}
