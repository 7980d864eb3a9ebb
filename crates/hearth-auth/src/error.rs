//! Auth-specific error types.

/// Typed failure returned by a [`TokenVerifier`](crate::TokenVerifier).
///
/// The gate handles every variant identically: log server-side, challenge
/// the client.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum VerifyError {
    /// Token is not structurally a token the provider understands.
    #[error("malformed token: {0}")]
    InvalidFormat(String),

    /// Signature verification failed.
    #[error("invalid token signature: {0}")]
    InvalidSignature(String),

    /// Token has expired.
    #[error("token has expired")]
    Expired,

    /// Token audience doesn't match the provider's expected audience.
    #[error("invalid audience")]
    InvalidAudience,

    /// Token issuer doesn't match the provider's expected issuer.
    #[error("invalid issuer")]
    InvalidIssuer,

    /// Token is missing the subject/uid claim.
    #[error("token missing uid claim")]
    MissingUid,

    /// Token is missing the email claim.
    #[error("token missing email claim")]
    MissingEmail,

    /// Token was revoked after issuance.
    #[error("token has been revoked")]
    Revoked,

    /// The account behind the token is disabled.
    #[error("user account is disabled")]
    UserDisabled,

    /// Revocation state could not be determined.
    #[error("revocation lookup failed: {0}")]
    RevocationLookup(String),

    /// Failed to fetch verification key material from the provider.
    #[error("failed to fetch verification keys: {0}")]
    KeyFetch(String),

    /// No key in the provider's key set matches the token's kid.
    #[error("no matching key for kid '{0}'")]
    NoMatchingKey(String),
}

/// Wiring faults detected when a gate is constructed.
///
/// These surface loudly at startup, never as a per-request 401.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// No principal validator was registered on the [`GateConfig`](crate::GateConfig).
    #[error("no principal validator registered for gate '{0}'; call GateConfig::validator before building")]
    MissingValidator(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_error_display() {
        assert_eq!(VerifyError::Expired.to_string(), "token has expired");
        assert_eq!(
            VerifyError::NoMatchingKey("kid-1".to_string()).to_string(),
            "no matching key for kid 'kid-1'"
        );
    }

    #[test]
    fn test_config_error_names_the_gate() {
        let e = ConfigError::MissingValidator("admin".to_string());
        assert!(e.to_string().contains("'admin'"));
    }
}
