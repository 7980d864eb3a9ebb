//! The authentication decision engine.
//!
//! One linear pass per request: parse the Authorization header, check the
//! scheme, delegate verification, map claims to a canonical user, run the
//! host validator, and accept or challenge. There is no retry loop; every
//! failed check exits early into a challenge.

use std::sync::Arc;

use http::header::AUTHORIZATION;
use http::request::Parts;

use crate::header::{parse_authorization, HeaderRejection};
use crate::user::AuthorizedUser;
use crate::{ConfigError, PrincipalValidator, TokenVerifier, DEFAULT_REALM};

/// Why a request was challenged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeCause {
    /// Header absent, malformed, or not a Bearer credential.
    NoCredentials,
    /// Verification failed or the validator produced no principal.
    InvalidCredentials,
}

/// Outcome of one authentication pass.
#[derive(Debug)]
pub enum Decision<P> {
    /// Token verified and a principal produced.
    Accepted {
        /// The principal returned by the host validator.
        principal: P,
        /// The canonical user the principal was produced from.
        user: AuthorizedUser,
    },
    /// The request must be answered with a 401 challenge.
    Challenged(ChallengeCause),
}

/// Configuration for one gate instance.
///
/// A validator must be registered before the config can be turned into a
/// gate; [`AuthGate::new`] fails otherwise. Multiple independently named
/// instances can coexist in one application, each with its own validator
/// and realm.
pub struct GateConfig<A: PrincipalValidator> {
    /// Realm label for challenge responses.
    pub realm: String,
    /// Forwarded to the verifier: also consult revocation state.
    pub check_revoked: bool,
    name: Option<String>,
    validator: Option<Arc<A>>,
}

impl<A: PrincipalValidator> GateConfig<A> {
    /// Configuration for the default (unnamed) gate.
    pub fn new() -> Self {
        Self {
            realm: DEFAULT_REALM.to_string(),
            check_revoked: true,
            name: None,
            validator: None,
        }
    }

    /// Configuration for a named gate instance.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::new()
        }
    }

    /// Register the host's principal validator.
    pub fn validator(mut self, validator: A) -> Self {
        self.validator = Some(Arc::new(validator));
        self
    }

    /// Set the challenge realm.
    pub fn realm(mut self, realm: impl Into<String>) -> Self {
        self.realm = realm.into();
        self
    }
}

impl<A: PrincipalValidator> Default for GateConfig<A> {
    fn default() -> Self {
        Self::new()
    }
}

/// The authentication decision engine.
///
/// Immutable after construction and shared across requests behind an `Arc`;
/// safe under unbounded concurrent invocation. The call into the verifier is
/// the only suspension point — if the host cancels the request the in-flight
/// verification is simply dropped with it.
pub struct AuthGate<V, A: PrincipalValidator> {
    verifier: Arc<V>,
    validator: Arc<A>,
    realm: String,
    check_revoked: bool,
    name: Option<String>,
}

impl<V: TokenVerifier, A: PrincipalValidator> AuthGate<V, A> {
    /// Build a gate from a verifier handle and configuration.
    ///
    /// Fails with [`ConfigError::MissingValidator`] when no validator was
    /// registered — a wiring bug, surfaced at startup rather than degrading
    /// every request into a 401.
    pub fn new(verifier: Arc<V>, config: GateConfig<A>) -> Result<Self, ConfigError> {
        let label = config.name.clone().unwrap_or_else(|| "default".to_string());
        let validator = config
            .validator
            .ok_or(ConfigError::MissingValidator(label))?;
        Ok(Self {
            verifier,
            validator,
            realm: config.realm,
            check_revoked: config.check_revoked,
            name: config.name,
        })
    }

    /// Realm used in this gate's challenge responses.
    pub fn realm(&self) -> &str {
        &self.realm
    }

    fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("default")
    }

    /// Run one authentication pass over the request head.
    pub async fn authenticate(&self, parts: &Parts) -> Decision<A::Principal> {
        let raw = match parts.headers.get(AUTHORIZATION) {
            None => None,
            Some(value) => match value.to_str() {
                Ok(v) => Some(v),
                Err(_) => {
                    log::warn!(
                        "gate '{}': authorization header is not valid UTF-8",
                        self.label()
                    );
                    return Decision::Challenged(ChallengeCause::NoCredentials);
                }
            },
        };

        let credential = match parse_authorization(raw) {
            Ok(credential) => credential,
            Err(HeaderRejection::Absent) => {
                log::debug!("gate '{}': no authorization header", self.label());
                return Decision::Challenged(ChallengeCause::NoCredentials);
            }
            Err(HeaderRejection::Malformed) => {
                log::warn!("gate '{}': malformed authorization header", self.label());
                return Decision::Challenged(ChallengeCause::NoCredentials);
            }
        };

        if !credential.scheme.eq_ignore_ascii_case("Bearer") {
            log::warn!(
                "gate '{}': unsupported authorization scheme '{}'",
                self.label(),
                credential.scheme
            );
            return Decision::Challenged(ChallengeCause::NoCredentials);
        }

        let claims = match self
            .verifier
            .verify(&credential.token, self.check_revoked)
            .await
        {
            Ok(claims) => claims,
            Err(err) => {
                // Failure detail stays in the server log; the client only
                // ever sees the challenge.
                log::warn!("gate '{}': token verification failed: {err}", self.label());
                return Decision::Challenged(ChallengeCause::InvalidCredentials);
            }
        };

        let user = AuthorizedUser::from(claims);
        match self.validator.validate(parts, user.clone()).await {
            Some(principal) => Decision::Accepted { principal, user },
            None => {
                log::warn!(
                    "gate '{}': validator returned no principal for uid {}",
                    self.label(),
                    user.uid
                );
                Decision::Challenged(ChallengeCause::InvalidCredentials)
            }
        }
    }
}
