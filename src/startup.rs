//! src/startup.rs

use crate::configuration::Settings;
use crate::routes::{health_check, method_not_allowed, preflight, send_invitation};
use crate::transport::NotificationTransport;
use actix_web::dev::Server;
use actix_web::middleware::DefaultHeaders;
use actix_web::web::Data;
use actix_web::{web, App, HttpServer};
use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;
use tracing_actix_web::TracingLogger;

/// Largest accepted invitation request body.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Upper bound for a single notification delivery.
#[derive(Debug, Clone, Copy)]
pub struct DeliveryTimeout(pub Duration);

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(configuration: Settings) -> Result<Self, std::io::Error> {
        let transport = configuration.notification.transport();
        let timeout = DeliveryTimeout(configuration.notification.timeout());

        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        let listener = TcpListener::bind(address)?;
        let port = listener.local_addr()?.port();
        tracing::info!(
            port,
            transport = ?configuration.notification.transport,
            "Invitation intake is listening"
        );
        let server = run(listener, transport, timeout)?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    // A more expressive name that makes it clear that
    // this function only returns when the application is stopped.
    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

fn cors_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("Access-Control-Allow-Origin", "*"))
        .add((
            "Access-Control-Allow-Methods",
            "GET, POST, PUT, DELETE, OPTIONS",
        ))
        .add(("Access-Control-Allow-Headers", "Content-Type, Authorization"))
}

pub fn run(
    listener: TcpListener,
    transport: Arc<dyn NotificationTransport>,
    timeout: DeliveryTimeout,
) -> Result<Server, std::io::Error> {
    // Wrap shared state in actix smart pointers
    let transport: Data<dyn NotificationTransport> = Data::from(transport);
    let timeout = Data::new(timeout);
    let server = HttpServer::new(move || {
        App::new()
            .wrap(cors_headers())
            .wrap(TracingLogger::default())
            .route("/health_check", web::get().to(health_check))
            .service(
                web::resource("/api/send-invitation")
                    .route(web::post().to(send_invitation))
                    .route(web::method(actix_web::http::Method::OPTIONS).to(preflight))
                    .default_service(web::to(method_not_allowed)),
            )
            .app_data(web::PayloadConfig::new(MAX_BODY_BYTES))
            .app_data(transport.clone())
            .app_data(timeout.clone())
    })
    .listen(listener)?
    .run();
    Ok(server)
}
