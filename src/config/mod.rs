//! Configuration, credentials and auth header building.

mod auth;
mod credentials;
mod loader;
mod store;
mod types;

pub use auth::{build_auth_header, AuthHeader};
pub use credentials::{CredentialProvider, SecureString, StaticCredentials};
pub use loader::ConfigError;
pub use store::ConfigStore;
pub use types::{ApiConfig, Config, SearchConfig, UiConfig};
