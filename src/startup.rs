use std::sync::Arc;
use std::{io, net};

use actix_web::dev::Server;
use actix_web::error::InternalError;
use actix_web::{web, App, HttpResponse, HttpServer};
use tracing_actix_web::TracingLogger;

use crate::configuration::Settings;
use crate::routes::{
    healthcheck, home, join_waitlist, waitlist_count, ErrorResponse, MSG_INVALID_BODY,
};
use crate::store::{PgWaitlistStore, WaitlistStore};

/// Application
pub struct Application {
    server: Server,
    port: u16,
}

impl Application {
    /// Build an application based on settings
    pub fn build(config: Settings) -> anyhow::Result<Self> {
        // Connect lazily to the database
        let store = PgWaitlistStore::connect(&config.database);

        // Run the HTTP server and return its data
        Self::build_with_store(config, Arc::new(store))
    }

    /// Build an application based on settings and an explicit store
    pub fn build_with_store(
        config: Settings,
        store: Arc<dyn WaitlistStore>,
    ) -> anyhow::Result<Self> {
        // Run the HTTP server and return its data
        let listener = net::TcpListener::bind(format!(
            "{}:{}",
            config.application.app_host, config.application.app_port
        ))?;
        let port = listener.local_addr()?.port();
        let server = run_server(listener, store)?;
        Ok(Self { server, port })
    }

    /// Get application port
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Run application until it is stopped
    pub async fn run_until_stopped(self) -> io::Result<()> {
        self.server.await
    }
}

/// Run the HTTP server
pub fn run_server(listener: net::TcpListener, store: Arc<dyn WaitlistStore>) -> io::Result<Server> {
    // Prepare data to be added to the application context
    let store: web::Data<dyn WaitlistStore> = web::Data::from(store);
    let json_config = json_config();

    // Start the HTTP server
    Ok(HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .route("/", web::get().to(home))
            .route("/healthcheck", web::get().to(healthcheck))
            .route("/api/waitlist", web::get().to(waitlist_count))
            .route("/api/waitlist", web::post().to(join_waitlist))
            .app_data(json_config.clone())
            .app_data(store.clone())
    })
    .listen(listener)?
    .run())
}

/// JSON extractor configuration that rejects unusable bodies with the same
/// localized text the signup form shows for them
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(ErrorResponse {
            error: MSG_INVALID_BODY.into(),
        });
        InternalError::from_response(err, response).into()
    })
}
