//! Security headers for API responses.
//!
//! Token endpoints return bearer credentials in their bodies, so no
//! response may be cached by browsers or intermediaries. Production
//! deployments additionally advertise HSTS.

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{self, HeaderValue},
    Error,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};
use vc_shared::config::Environment;

/// Security middleware factory
#[derive(Debug, Clone, Copy)]
pub struct SecurityMiddleware {
    /// Whether to send Strict-Transport-Security
    hsts: bool,
}

impl SecurityMiddleware {
    /// Creates a security middleware for the given environment
    pub fn for_environment(environment: Environment) -> Self {
        let hsts = environment.is_production();
        log::info!("Security middleware configured: hsts={}", hsts);
        Self { hsts }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SecurityMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SecurityMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SecurityMiddlewareService {
            service: Rc::new(service),
            hsts: self.hsts,
        }))
    }
}

/// Security middleware service implementation
pub struct SecurityMiddlewareService<S> {
    service: Rc<S>,
    hsts: bool,
}

impl<S, B> Service<ServiceRequest> for SecurityMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let hsts = self.hsts;

        Box::pin(async move {
            let mut response = service.call(req).await?;
            add_security_response_headers(&mut response, hsts);
            Ok(response)
        })
    }
}

fn add_security_response_headers<B>(response: &mut ServiceResponse<B>, hsts: bool) {
    let headers = response.headers_mut();

    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("no-referrer"),
    );

    if hsts {
        headers.insert(
            header::STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static("max-age=31536000; includeSubDomains"),
        );
    }
}
