use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::Method,
    web, Error, HttpMessage,
};
use futures::future::LocalBoxFuture;
use serde_json::{Map, Value};
use std::future::{ready, Ready};

use crate::services::token_service::{TokenService, TOKEN_COOKIE};
use crate::utils::AppError;

/// Decoded token payload, available to handlers as `web::ReqData<VerifiedPayload>`.
#[derive(Debug, Clone)]
pub struct VerifiedPayload(pub Map<String, Value>);

/// Paths that issue or clear the credential and so cannot require it.
const EXEMPT_PATHS: [&str; 2] = ["/jwt", "/logout"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GuardScope {
    /// Every request must carry a valid token.
    All,
    /// Only non-safe methods outside `EXEMPT_PATHS` are checked.
    Writes,
}

/// Verifies the `token` cookie with the app's [`TokenService`].
pub struct TokenGuard {
    scope: GuardScope,
}

impl TokenGuard {
    pub fn all() -> Self {
        Self { scope: GuardScope::All }
    }

    pub fn writes() -> Self {
        Self { scope: GuardScope::Writes }
    }
}

impl<S, B> Transform<S, ServiceRequest> for TokenGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TokenGuardService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TokenGuardService { service, scope: self.scope }))
    }
}

pub struct TokenGuardService<S> {
    service: S,
    scope: GuardScope,
}

impl<S> TokenGuardService<S> {
    fn applies_to(&self, req: &ServiceRequest) -> bool {
        match self.scope {
            GuardScope::All => true,
            GuardScope::Writes => {
                let safe = matches!(*req.method(), Method::GET | Method::HEAD | Method::OPTIONS);
                !safe && !EXEMPT_PATHS.contains(&req.path())
            }
        }
    }
}

fn authenticate(req: &ServiceRequest) -> Result<VerifiedPayload, AppError> {
    let tokens = req
        .app_data::<web::Data<TokenService>>()
        .ok_or_else(|| AppError::Internal("TokenService is not registered".to_string()))?;

    let cookie = req
        .cookie(TOKEN_COOKIE)
        .ok_or_else(|| AppError::Unauthorized("missing token cookie".to_string()))?;

    tokens.verify(cookie.value()).map(VerifiedPayload)
}

impl<S, B> Service<ServiceRequest> for TokenGuardService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if self.applies_to(&req) {
            match authenticate(&req) {
                Ok(payload) => {
                    req.extensions_mut().insert(payload);
                }
                Err(e) => {
                    log::warn!("🔒 {} {} rejected: {}", req.method(), req.path(), e);
                    return Box::pin(async move { Err(e.into()) });
                }
            }
        }

        let fut = self.service.call(req);
        Box::pin(async move { fut.await })
    }
}
