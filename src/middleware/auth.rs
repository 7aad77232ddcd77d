use crate::errors::ServiceError;
use crate::services::auth_service::AuthService;
use actix_web::{
    body::{BoxBody, EitherBody},
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    error::ResponseError,
    http::{header::AUTHORIZATION, header::HeaderMap},
    web, Error, HttpMessage,
};
use futures_util::future::LocalBoxFuture;
use std::future::{ready, Ready};
use tracing::{debug, warn};

/// Pulls the token out of an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

/// Requires a valid bearer token and exposes its `Claims` to handlers via `web::ReqData<Claims>`.
/// Attached per route, so only the routes that mutate products are guarded.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B, BoxBody>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
}

type AuthFuture<B> =
    LocalBoxFuture<'static, Result<ServiceResponse<EitherBody<B, BoxBody>>, Error>>;

fn reject<B>(req: ServiceRequest, err: ServiceError) -> AuthFuture<B>
where
    B: 'static,
{
    let (req, _pl) = req.into_parts();
    let res = err.error_response();
    Box::pin(async move { Ok(ServiceResponse::new(req, res).map_into_right_body()) })
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B, BoxBody>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let Some(token) = bearer_token(req.headers()) else {
            warn!(path = %req.path(), "Rejected request without bearer token");
            return reject(req, ServiceError::TokenRequired);
        };

        let verified = match req.app_data::<web::Data<AuthService>>() {
            Some(auth) => auth.verify_token(&token),
            None => Err(ServiceError::internal(
                "Auth service is not registered",
                "missing app data",
            )),
        };

        let claims = match verified {
            Ok(claims) => claims,
            Err(err) => {
                warn!(
                    path = %req.path(),
                    reason = err.kind(),
                    "Rejected request with unusable token"
                );
                return reject(req, err);
            }
        };

        debug!(email = %claims.email, path = %req.path(), "Request authenticated");
        // Insert claims into request extensions
        req.extensions_mut().insert(claims);

        let fut = self.service.call(req);
        Box::pin(async move {
            let res = fut.await?;
            Ok(res.map_into_left_body())
        })
    }
}
