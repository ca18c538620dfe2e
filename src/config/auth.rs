//! Authentication header building for API requests.

use super::credentials::CredentialProvider;

/// Header name and value for authentication.
pub type AuthHeader = (String, String);

/// Build the `Authorization: Bearer` header from the provider's token.
///
/// Returns `None` when no token is available or the token is empty.
pub fn build_auth_header(provider: &dyn CredentialProvider) -> Option<AuthHeader> {
    let token = provider.token()?;
    if token.is_empty() {
        return None;
    }
    Some((
        "Authorization".to_string(),
        format!("Bearer {}", token.expose()),
    ))
}
