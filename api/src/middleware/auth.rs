//! JWT authentication middleware for protecting API endpoints.
//!
//! The middleware pulls the bearer token from the Authorization header,
//! verifies it through the token service and injects an [`AuthContext`]
//! into the request. Handlers receive the context as an extractor.

use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::AUTHORIZATION;
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use futures_util::future::LocalBoxFuture;
use uuid::Uuid;

use ss_core::errors::{DomainError, TokenError};

use crate::error::to_response;
use crate::state::TokenServiceImpl;

/// User authentication context injected into requests
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// User id extracted from JWT claims
    pub user_id: Uuid,
    /// Login name from the claims
    pub username: String,
    /// JWT id for tracing
    pub jti: String,
}

impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let context = req.extensions().get::<AuthContext>().cloned();
        ready(context.ok_or_else(|| {
            actix_web::error::InternalError::from_response(
                "missing auth context",
                to_response(&DomainError::Unauthorized),
            )
            .into()
        }))
    }
}

/// JWT authentication middleware factory
pub struct JwtAuth {
    tokens: Arc<TokenServiceImpl>,
}

impl JwtAuth {
    pub fn new(tokens: Arc<TokenServiceImpl>) -> Self {
        Self { tokens }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<actix_web::body::EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            tokens: self.tokens.clone(),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    tokens: Arc<TokenServiceImpl>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<actix_web::body::EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let tokens = self.tokens.clone();

        Box::pin(async move {
            let header = req
                .headers()
                .get(AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.strip_prefix("Bearer "));

            let Some(token) = header else {
                let response = to_response(&DomainError::Unauthorized);
                return Ok(req.into_response(response).map_into_right_body());
            };

            match tokens.verify_access_token(token) {
                Ok(claims) => {
                    let context = match claims.user_id() {
                        Ok(user_id) => AuthContext {
                            user_id,
                            username: claims.username,
                            jti: claims.jti,
                        },
                        Err(_) => {
                            let response = to_response(&DomainError::Token(
                                TokenError::InvalidClaims,
                            ));
                            return Ok(req.into_response(response).map_into_right_body());
                        }
                    };

                    req.extensions_mut().insert(context);
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(err) => {
                    let response = to_response(&err);
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}
