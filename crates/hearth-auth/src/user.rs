//! Canonical user identity and extraction helpers.

use serde::Serialize;
use serde_json::{Map, Value};

/// Claims asserted by a successfully verified token.
///
/// The success value of the [`TokenVerifier`](crate::TokenVerifier)
/// contract. Lifting the well-known fields out of the raw claim bag is the
/// verifier's job; a verifier that cannot produce the required fields fails
/// verification instead of returning a partial value.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    /// Subject identifier, unique per issuer and tenant.
    pub uid: String,
    /// Tenant the account belongs to, for multi-tenant projects.
    pub tenant_id: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// Email address.
    pub email: String,
    /// Whether the provider has verified the email address.
    pub email_verified: bool,
    /// Profile picture URL.
    pub picture: Option<String>,
    /// Token issuer.
    pub issuer: Option<String>,
    /// The full raw claim bag, including the lifted fields.
    pub claims: Map<String, Value>,
}

/// Canonical authenticated identity handed to the principal validator.
///
/// Constructed only from a successfully verified token, via
/// `From<TokenClaims>`; the mapping is total, there is no failure path. The
/// middleware also stores a copy in the request extensions on accept.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorizedUser {
    /// Subject identifier, unique per issuer and tenant.
    pub uid: String,
    /// Tenant the account belongs to, for multi-tenant projects.
    pub tenant_id: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// Email address.
    pub email: String,
    /// Whether the provider has verified the email address.
    pub email_verified: bool,
    /// Profile picture URL.
    pub picture: Option<String>,
    /// Token issuer.
    pub issuer: Option<String>,
    /// The full raw claim bag.
    pub claims: Map<String, Value>,
}

impl From<TokenClaims> for AuthorizedUser {
    fn from(claims: TokenClaims) -> Self {
        Self {
            uid: claims.uid,
            tenant_id: claims.tenant_id,
            name: claims.name,
            email: claims.email,
            email_verified: claims.email_verified,
            picture: claims.picture,
            issuer: claims.issuer,
            claims: claims.claims,
        }
    }
}

/// Extract the [`AuthorizedUser`] from HTTP request `Parts`, if present.
pub fn user_from_parts(parts: &http::request::Parts) -> Option<&AuthorizedUser> {
    parts.extensions.get::<AuthorizedUser>()
}

/// Extract the application principal from HTTP request `Parts`, if present.
pub fn principal_from_parts<P>(parts: &http::request::Parts) -> Option<&P>
where
    P: Clone + Send + Sync + 'static,
{
    parts.extensions.get::<P>()
}
