//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use chrono::{TimeZone, Utc};

use crate::domain::ports::{
    MockFavoriteCommand, MockFavoriteQuery, MockMenuCommand, MockMenuQuery,
    MockRequestAuthenticator,
};
use crate::domain::{Error, ResolvedUser, Subject, User, UserId};
use crate::middleware::Trace;

use super::state::HttpState;
use super::{configure_v1, validation::json_config};

pub(crate) const SUBJECT: &str = "auth0|handler-test";

/// A resolved caller with fixed timestamps.
pub(crate) fn resolved_user(id: i64, is_new: bool) -> ResolvedUser {
    let at = Utc
        .with_ymd_and_hms(2026, 1, 2, 3, 4, 5)
        .single()
        .expect("valid fixture timestamp");
    ResolvedUser {
        user: User {
            id: UserId::new(id),
            subject: Subject::new(SUBJECT).expect("fixture subject"),
            created_at: at,
            updated_at: at,
        },
        is_new,
    }
}

/// Builds [`HttpState`] from mocks; unconfigured mocks panic when called.
#[derive(Default)]
pub(crate) struct StateBuilder {
    menus: MockMenuCommand,
    menus_query: MockMenuQuery,
    favorites: MockFavoriteCommand,
    favorites_query: MockFavoriteQuery,
    authenticator: MockRequestAuthenticator,
}

impl StateBuilder {
    pub(crate) fn menus(mut self, configure: impl FnOnce(&mut MockMenuCommand)) -> Self {
        configure(&mut self.menus);
        self
    }

    pub(crate) fn menus_query(mut self, configure: impl FnOnce(&mut MockMenuQuery)) -> Self {
        configure(&mut self.menus_query);
        self
    }

    pub(crate) fn favorites(mut self, configure: impl FnOnce(&mut MockFavoriteCommand)) -> Self {
        configure(&mut self.favorites);
        self
    }

    pub(crate) fn favorites_query(
        mut self,
        configure: impl FnOnce(&mut MockFavoriteQuery),
    ) -> Self {
        configure(&mut self.favorites_query);
        self
    }

    pub(crate) fn authenticate<F>(mut self, respond: F) -> Self
    where
        F: Fn(Option<String>) -> Result<ResolvedUser, Error> + Send + 'static,
    {
        self.authenticator
            .expect_authenticate()
            .returning(move |header| respond(header));
        self
    }

    /// Accept any request as user `id`.
    pub(crate) fn signed_in_as(self, id: i64) -> Self {
        self.authenticate(move |_| Ok(resolved_user(id, false)))
    }

    pub(crate) fn build(self) -> HttpState {
        HttpState {
            menus: Arc::new(self.menus),
            menus_query: Arc::new(self.menus_query),
            favorites: Arc::new(self.favorites),
            favorites_query: Arc::new(self.favorites_query),
            authenticator: Arc::new(self.authenticator),
        }
    }
}

/// The `/v1` API wired the way the server wires it.
pub(crate) fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(json_config())
        .wrap(Trace)
        .service(web::scope("/v1").configure(configure_v1))
}
