use std::future::{Ready, ready};

use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::{Error, HttpMessage};
use futures_util::future::LocalBoxFuture;

use crate::auth::{RenewedSession, access_cookie, refresh_cookie};

/// Re-issues both token cookies whenever the identity resolver silently
/// renewed the session during the request.
pub struct SessionRenewal {
    secure: bool,
}

impl SessionRenewal {
    pub fn new(secure: bool) -> Self {
        Self { secure }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SessionRenewal
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = SessionRenewalMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionRenewalMiddleware {
            service,
            secure: self.secure,
        }))
    }
}

pub struct SessionRenewalMiddleware<S> {
    service: S,
    secure: bool,
}

impl<S, B> Service<ServiceRequest> for SessionRenewalMiddleware<S>
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
        let secure = self.secure;
        let fut = self.service.call(req);

        Box::pin(async move {
            let mut res = fut.await?;

            let renewed = res.request().extensions().get::<RenewedSession>().cloned();
            if let Some(RenewedSession(session)) = renewed {
                for cookie in [
                    access_cookie(&session.access_token, secure),
                    refresh_cookie(&session.refresh_token, secure),
                ] {
                    if let Err(err) = res.response_mut().add_cookie(&cookie) {
                        log::error!("failed to attach renewed session cookie: {err}");
                    }
                }
            }

            Ok(res)
        })
    }
}
