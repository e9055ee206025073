//! Account API handlers.
//!
//! ```text
//! GET   /api/v1/users/{id}
//! GET   /api/v1/users/me        (bearer token)
//! PATCH /api/v1/users/me        (bearer token) {"firstName":"Ada"}
//! POST  /api/v1/login           {"email":"ada@example.com","password":"pw"}
//! POST  /api/v1/register        {"email":"ada@example.com","password":"pw"}
//! ```
//!
//! Handlers only translate HTTP shapes; every decision lives in
//! [`AccountResolvers`](crate::domain::AccountResolvers).

use actix_web::{get, patch, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{
    ApiUser, AuthPayload, Credentials, CredentialsValidationError, Error, IdentityContext,
    UpdateUserInput, UserId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Login and registration request body.
///
/// Example JSON:
/// `{"email":"ada@example.com","password":"pw"}`
#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

impl TryFrom<CredentialsRequest> for Credentials {
    type Error = CredentialsValidationError;

    fn try_from(value: CredentialsRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.password)
    }
}

fn map_credentials_validation_error(err: CredentialsValidationError) -> Error {
    match err {
        CredentialsValidationError::EmptyEmail => Error::invalid_request("email must not be empty")
            .with_details(json!({ "field": "email", "code": "empty_email" })),
        CredentialsValidationError::EmptyPassword => {
            Error::invalid_request("password must not be empty")
                .with_details(json!({ "field": "password", "code": "empty_password" }))
        }
    }
}

fn id_out_of_range() -> Error {
    Error::invalid_request("user id must be a non-negative 32-bit integer")
        .with_details(json!({ "field": "id", "code": "id_out_of_range" }))
}

fn parse_user_id(raw: i64) -> Result<UserId, Error> {
    i32::try_from(raw)
        .ok()
        .and_then(|public| UserId::from_public(public).ok())
        .ok_or_else(id_out_of_range)
}

/// Fetch any user by id. No authentication required.
#[get("/users/{id:-?[0-9]+}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<ApiUser>> {
    let id = parse_user_id(path.into_inner())?;
    let user = state.accounts.user(id).await?;
    Ok(web::Json(user))
}

/// Fetch the caller's own profile.
#[get("/users/me")]
pub async fn user_profile(
    state: web::Data<HttpState>,
    identity: IdentityContext,
) -> ApiResult<web::Json<ApiUser>> {
    let user = state.accounts.user_profile(&identity).await?;
    Ok(web::Json(user))
}

/// Patch the caller's own profile.
#[patch("/users/me")]
pub async fn update_user(
    state: web::Data<HttpState>,
    identity: IdentityContext,
    payload: web::Json<UpdateUserInput>,
) -> ApiResult<web::Json<ApiUser>> {
    let user = state
        .accounts
        .update_user(&identity, payload.into_inner())
        .await?;
    Ok(web::Json(user))
}

/// Exchange credentials for a bearer token.
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<web::Json<AuthPayload>> {
    let credentials =
        Credentials::try_from(payload.into_inner()).map_err(map_credentials_validation_error)?;
    let result = state.accounts.login(credentials).await?;
    Ok(web::Json(result))
}

/// Create an account and return a bearer token for it.
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<web::Json<AuthPayload>> {
    let credentials =
        Credentials::try_from(payload.into_inner()).map_err(map_credentials_validation_error)?;
    let result = state.accounts.register(credentials).await?;
    Ok(web::Json(result))
}

/// Register the account handlers on a scope.
///
/// Malformed JSON bodies and ids too large for the path extractor are
/// answered with the shared error envelope.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use accounts::inbound::http::users;
///
/// let app = App::new().service(web::scope("/api/v1").configure(users::configure));
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("malformed request body: {err}")).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|_err, _req| id_out_of_range().into()))
    .service(user_profile)
    .service(update_user)
    .service(get_user)
    .service(login)
    .service(register);
}
