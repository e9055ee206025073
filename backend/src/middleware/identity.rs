//! Identity middleware populating the per-request [`IdentityContext`].
//!
//! Reads `Authorization: Bearer <token>` (scheme matched case-insensitively),
//! asks the [`TokenVerifier`] which
//! user the token is bound to and stores the result in request extensions.
//! Missing, malformed, unknown and expired tokens all yield an anonymous
//! context, as does a verifier answer carrying an unassigned id; the request still proceeds and gated operations reject it.
//! A verifier outage is the only case answered directly, with
//! `ServiceUnavailable`.

use std::rc::Rc;
use std::sync::Arc;
use std::task::{Context, Poll};

use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::AUTHORIZATION;
use actix_web::{Error, HttpMessage};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{debug, warn};

use crate::domain::ports::TokenVerifier;
use crate::domain::{Error as DomainError, IdentityContext};

const BEARER_SCHEME: &str = "Bearer";

/// Middleware resolving bearer tokens into an [`IdentityContext`].
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use actix_web::App;
/// use accounts::middleware::IdentityLayer;
/// use accounts::outbound::memory::InMemoryTokenService;
///
/// let verifier = Arc::new(InMemoryTokenService::default());
/// let app = App::new().wrap(IdentityLayer::new(verifier));
/// ```
#[derive(Clone)]
pub struct IdentityLayer {
    verifier: Arc<dyn TokenVerifier>,
}

impl IdentityLayer {
    /// Build the layer around a token verifier.
    pub fn new(verifier: Arc<dyn TokenVerifier>) -> Self {
        Self { verifier }
    }
}

impl<S, B> Transform<S, ServiceRequest> for IdentityLayer
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = IdentityMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(IdentityMiddleware {
            service: Rc::new(service),
            verifier: Arc::clone(&self.verifier),
        }))
    }
}

/// Service wrapper produced by [`IdentityLayer`].
pub struct IdentityMiddleware<S> {
    service: Rc<S>,
    verifier: Arc<dyn TokenVerifier>,
}

/// Extract the bearer token, treating anything unexpected as absent.
fn bearer_token(req: &ServiceRequest) -> Option<String> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then(|| token.to_owned())
}

impl<S, B> Service<ServiceRequest> for IdentityMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let verifier = Arc::clone(&self.verifier);
        Box::pin(async move {
            let caller = match bearer_token(&req) {
                None => None,
                Some(token) => match verifier.verify(&token).await {
                    Ok(Some(id)) if !id.is_assigned() => {
                        warn!("token verifier returned an unassigned user id");
                        None
                    }
                    Ok(caller) => caller,
                    Err(error) => {
                        warn!(%error, "token verification unavailable");
                        return Err(DomainError::from(error).into());
                    }
                },
            };
            if caller.is_none() {
                debug!("request carries no resolvable identity");
            }
            req.extensions_mut().insert(IdentityContext::from(caller));
            service.call(req).await
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserId;
    use crate::domain::ports::{MockTokenVerifier, TokenVerificationError};
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpRequest, HttpResponse, test, web};
    use rstest::rstest;

    async fn echo_identity(req: HttpRequest) -> HttpResponse {
        let context = req
            .extensions()
            .get::<IdentityContext>()
            .copied()
            .expect("identity context inserted");
        match context.resolve_identity() {
            Some(id) => HttpResponse::Ok().body(id.to_string()),
            None => HttpResponse::Ok().body("anonymous"),
        }
    }

    async fn call(verifier: MockTokenVerifier, header: Option<&str>) -> (StatusCode, String) {
        let app = test::init_service(
            App::new()
                .wrap(IdentityLayer::new(Arc::new(verifier)))
                .route("/", web::get().to(echo_identity)),
        )
        .await;
        let mut req = test::TestRequest::get().uri("/");
        if let Some(value) = header {
            req = req.insert_header((AUTHORIZATION, value));
        }
        let res = test::call_service(&app, req.to_request()).await;
        let status = res.status();
        let body = test::read_body(res).await;
        (status, String::from_utf8(body.to_vec()).expect("utf8 body"))
    }

    #[actix_web::test]
    async fn valid_token_populates_identity() {
        let mut verifier = MockTokenVerifier::new();
        verifier
            .expect_verify()
            .withf(|token| token == "good-token")
            .times(1)
            .return_once(|_| Ok(Some(UserId::new(5).expect("fixture id"))));

        let (status, body) = call(verifier, Some("Bearer good-token")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "5");
    }

    #[rstest]
    #[case(None)]
    #[case(Some("Basic dXNlcjpwdw=="))]
    #[case(Some("Bearer "))]
    #[case(Some("Bearer"))]
    #[case(Some("Bearertoken"))]
    #[actix_web::test]
    async fn missing_or_malformed_header_is_anonymous_without_verification(
        #[case] header: Option<&'static str>,
    ) {
        let mut verifier = MockTokenVerifier::new();
        verifier.expect_verify().never();

        let (status, body) = call(verifier, header).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "anonymous");
    }

    #[rstest]
    #[case("bearer good-token")]
    #[case("BEARER good-token")]
    #[case("Bearer   good-token  ")]
    #[actix_web::test]
    async fn scheme_is_case_insensitive_and_token_trimmed(#[case] header: &'static str) {
        let mut verifier = MockTokenVerifier::new();
        verifier
            .expect_verify()
            .withf(|token| token == "good-token")
            .times(1)
            .return_once(|_| Ok(Some(UserId::new(5).expect("fixture id"))));

        let (status, body) = call(verifier, Some(header)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "5");
    }

    #[actix_web::test]
    async fn unassigned_id_from_verifier_is_anonymous() {
        let mut verifier = MockTokenVerifier::new();
        verifier
            .expect_verify()
            .times(1)
            .return_once(|_| Ok(Some(UserId::UNASSIGNED)));

        let (status, body) = call(verifier, Some("Bearer shell-token")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "anonymous");
    }

    #[actix_web::test]
    async fn unknown_token_is_anonymous() {
        let mut verifier = MockTokenVerifier::new();
        verifier.expect_verify().times(1).return_once(|_| Ok(None));

        let (status, body) = call(verifier, Some("Bearer expired")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "anonymous");
    }

    #[actix_web::test]
    async fn verifier_outage_is_service_unavailable() {
        let mut verifier = MockTokenVerifier::new();
        verifier
            .expect_verify()
            .times(1)
            .return_once(|_| Err(TokenVerificationError::unavailable("down")));

        let app = test::init_service(
            App::new()
                .wrap(IdentityLayer::new(Arc::new(verifier)))
                .route("/", web::get().to(echo_identity)),
        )
        .await;
        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((AUTHORIZATION, "Bearer token"))
            .to_request();
        let error = test::try_call_service(&app, req)
            .await
            .err()
            .expect("verifier outage fails the request");
        assert_eq!(
            error.as_response_error().status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
