//! Extractor handing handlers the caller identity resolved by middleware.
//!
//! [`IdentityLayer`](crate::middleware::IdentityLayer) stores an
//! [`IdentityContext`] in request extensions. Routes mounted without the
//! layer see an anonymous context, so gated operations fail closed.

use std::convert::Infallible;

use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload};
use futures_util::future::{Ready, ready};

use crate::domain::IdentityContext;

impl FromRequest for IdentityContext {
    type Error = Infallible;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let context = req
            .extensions()
            .get::<IdentityContext>()
            .copied()
            .unwrap_or_default();
        ready(Ok(context))
    }
}
