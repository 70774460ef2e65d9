//! Request extractor for bearer-token authenticated routes.
//!
//! Handlers that take an [`AuthenticatedUser`] argument reject the request
//! before running when the `Authorization` header does not carry a valid
//! token. The resolved user is created on first sight.

use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, web};
use futures_util::future::LocalBoxFuture;
use tracing::error;

use crate::domain::{Error, ResolvedUser, User, UserId};

use super::state::HttpState;

/// The caller of an authenticated route.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(ResolvedUser);

impl AuthenticatedUser {
    /// Internal user id of the caller.
    pub fn user_id(&self) -> UserId {
        self.0.user.id
    }

    /// The caller's user record.
    pub fn user(&self) -> &User {
        &self.0.user
    }

    /// Whether this request created the user record.
    pub fn is_new(&self) -> bool {
        self.0.is_new
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        // Non-UTF-8 bytes are kept lossily; the verifier rejects them.
        let authorization = req
            .headers()
            .get(AUTHORIZATION)
            .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned());

        Box::pin(async move {
            let Some(state) = state else {
                error!("authenticated route registered without HTTP state");
                return Err(Error::internal("HTTP state is not configured"));
            };
            state
                .authenticator
                .authenticate(authorization)
                .await
                .map(Self)
        })
    }
}
