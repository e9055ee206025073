//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use accounts::domain::ports::TokenVerifier;
use accounts::inbound::http::state::HttpState;
use accounts::inbound::http::users;
use accounts::{IdentityLayer, Trace};

use std::sync::Arc;

#[derive(Clone)]
struct AppDependencies {
    http_state: web::Data<HttpState>,
    verifier: Arc<dyn TokenVerifier>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        http_state,
        verifier,
    } = deps;

    let api = web::scope("/api/v1")
        .wrap(IdentityLayer::new(verifier))
        .configure(users::configure);

    App::new().app_data(http_state).wrap(Trace).service(api)
}

/// Construct an Actix HTTP server from the wired account collaborators.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(config: ServerConfig) -> std::io::Result<Server> {
    let ServerConfig {
        bind_addr,
        accounts,
        verifier,
    } = config;
    let http_state = web::Data::new(HttpState::new(accounts));

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            http_state: http_state.clone(),
            verifier: verifier.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    Ok(server)
}
