use std::net::TcpListener;

use actix_web::dev::Server;
use actix_web::web::Data;
use actix_web::{web, App, HttpServer};
use tracing_actix_web::TracingLogger;

use crate::email_client::EmailClient;
use crate::routes;
use crate::verification_client::VerificationClient;

pub fn run(
    listener: TcpListener,
    email_client: EmailClient,
    verification_client: VerificationClient,
) -> Result<Server, std::io::Error> {
    let email_client = Data::new(email_client);
    let verification_client = Data::new(verification_client);
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::JsonConfig::default().error_handler(routes::json_error_handler))
            .route("/health", web::get().to(routes::health_check::health_check))
            .service(
                web::scope("/api")
                    .route("/contact", web::post().to(routes::contact::contact))
                    .route(
                        "/contact/settings",
                        web::get().to(routes::contact::contact_settings),
                    )
                    .route("/text-format", web::post().to(routes::text_format::format_text))
                    .route(
                        "/text-format/cases",
                        web::get().to(routes::text_format::list_cases),
                    ),
            )
            .app_data(email_client.clone())
            .app_data(verification_client.clone())
    })
        .listen(listener)?
        .run();
    Ok(server)
}
