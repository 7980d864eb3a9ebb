//! Bearer authentication gate for axum services.
//!
//! Provides:
//! - [`AuthorizedUser`] — Canonical identity mapped from verified token claims
//! - [`TokenVerifier`] — Contract for the external token-verification service
//! - [`PrincipalValidator`] — Host-supplied mapping from user to application principal
//! - [`AuthGate`] — The per-request authentication decision engine
//! - [`AuthLayer`] / [`AuthService`] — Tower middleware wrapping the gate
//! - [`GateConfig`] — Realm, revocation flag, and validator registration
//!
//! Each request makes exactly one decision: accept with a principal attached
//! to the request extensions, or answer with a realm-scoped 401 challenge.

mod error;
mod gate;
mod header;
mod middleware;
mod user;

pub use error::{ConfigError, VerifyError};
pub use gate::{AuthGate, ChallengeCause, Decision, GateConfig};
pub use header::{parse_authorization, Credential, HeaderRejection};
pub use middleware::{challenge_response, AuthLayer, AuthService};
pub use user::{principal_from_parts, user_from_parts, AuthorizedUser, TokenClaims};

/// Realm used for challenge responses when none is configured.
pub const DEFAULT_REALM: &str = "Server App";

/// Contract for the external token-verification service.
///
/// Implement this per identity provider. The gate calls `verify()` with the
/// bearer token and converts any error into a challenge; the error detail is
/// logged server-side and never reaches the client. This call is the gate's
/// only suspension point — implementations may do network or cryptographic
/// work, and a provider-side timeout must surface as a [`VerifyError`]
/// rather than hang the request.
pub trait TokenVerifier: Send + Sync + 'static {
    /// Verify a raw bearer token and return the claims it asserts.
    ///
    /// `check_revoked` asks the provider to also consult revocation state
    /// where it supports doing so.
    fn verify(
        &self,
        token: &str,
        check_revoked: bool,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<TokenClaims, VerifyError>> + Send + '_>,
    >;
}

/// Host-supplied mapping from a verified user to an application principal.
///
/// The gate never inspects the principal; it only checks presence. Returning
/// `None` rejects the request with a challenge. Implementations may perform
/// their own I/O (e.g., a database lookup).
pub trait PrincipalValidator: Send + Sync + 'static {
    /// The application-defined identity attached to accepted requests.
    type Principal: Clone + Send + Sync + 'static;

    /// Produce a principal for the verified user, or `None` to reject.
    fn validate<'a>(
        &'a self,
        parts: &'a http::request::Parts,
        user: AuthorizedUser,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Option<Self::Principal>> + Send + 'a>,
    >;
}
