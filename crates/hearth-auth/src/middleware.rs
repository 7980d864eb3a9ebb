//! Tower middleware wrapping the authentication gate.
//!
//! [`AuthLayer`] installs an [`AuthGate`] in front of any inner service.
//! Accepted requests carry the principal and the [`AuthorizedUser`] in their
//! extensions; everything else short-circuits into the 401 challenge.

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::response::IntoResponse;
use http::{Request, StatusCode};
use tower::{Layer, Service};

use crate::gate::{AuthGate, ChallengeCause, Decision, GateConfig};
use crate::{ConfigError, PrincipalValidator, TokenVerifier};

/// Tower `Layer` that wraps services with the authentication gate.
pub struct AuthLayer<V, A: PrincipalValidator> {
    gate: Arc<AuthGate<V, A>>,
}

impl<V: TokenVerifier, A: PrincipalValidator> AuthLayer<V, A> {
    /// Build a layer from a verifier handle and gate configuration.
    ///
    /// Fails at wiring time when the configuration has no validator.
    pub fn new(verifier: Arc<V>, config: GateConfig<A>) -> Result<Self, ConfigError> {
        Ok(Self {
            gate: Arc::new(AuthGate::new(verifier, config)?),
        })
    }

    /// Wrap an already-constructed gate, sharing it with other layers.
    pub fn from_gate(gate: Arc<AuthGate<V, A>>) -> Self {
        Self { gate }
    }
}

impl<V, A: PrincipalValidator> Clone for AuthLayer<V, A> {
    fn clone(&self) -> Self {
        Self {
            gate: self.gate.clone(),
        }
    }
}

impl<V: TokenVerifier, A: PrincipalValidator, S> Layer<S> for AuthLayer<V, A> {
    type Service = AuthService<V, A, S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthService {
            inner,
            gate: self.gate.clone(),
        }
    }
}

/// Tower `Service` that authenticates requests before forwarding them.
pub struct AuthService<V, A: PrincipalValidator, S> {
    inner: S,
    gate: Arc<AuthGate<V, A>>,
}

impl<V, A: PrincipalValidator, S: Clone> Clone for AuthService<V, A, S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            gate: self.gate.clone(),
        }
    }
}

impl<V, A, S> Service<Request<Body>> for AuthService<V, A, S>
where
    V: TokenVerifier,
    A: PrincipalValidator,
    S: Service<Request<Body>, Error = Infallible> + Clone + Send + 'static,
    S::Response: IntoResponse,
    S::Future: Send,
{
    type Response = axum::response::Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        let gate = self.gate.clone();

        Box::pin(async move {
            let (mut parts, body) = req.into_parts();

            match gate.authenticate(&parts).await {
                Decision::Accepted { principal, user } => {
                    parts.extensions.insert(principal);
                    parts.extensions.insert(user);
                    let req = Request::from_parts(parts, body);
                    let resp = inner
                        .call(req)
                        .await
                        .unwrap_or_else(|infallible| match infallible {});
                    Ok(resp.into_response())
                }
                Decision::Challenged(cause) => Ok(challenge_response(gate.realm(), cause)),
            }
        })
    }
}

/// Build the standardized 401 challenge for the given realm.
///
/// Pure construction; writing it to the wire is the HTTP layer's job. The
/// body carries a generic per-cause message — verifier detail never appears
/// here.
pub fn challenge_response(realm: &str, cause: ChallengeCause) -> axum::response::Response {
    let message = match cause {
        ChallengeCause::NoCredentials => "missing or malformed bearer credentials",
        ChallengeCause::InvalidCredentials => "invalid credentials",
    };
    let body = serde_json::json!({
        "error": {
            "category": "authentication",
            "message": message,
        }
    });
    let challenge = format!(r#"Bearer realm="{realm}""#);

    let mut response = (
        StatusCode::UNAUTHORIZED,
        [(http::header::CONTENT_TYPE, "application/json")],
        serde_json::to_string(&body).unwrap_or_default(),
    )
        .into_response();

    if let Ok(value) = http::HeaderValue::from_str(&challenge) {
        response
            .headers_mut()
            .insert(http::header::WWW_AUTHENTICATE, value);
    }

    response
}
